use std::path::PathBuf;

use crate::dynamics::{Material, WorldConfig};
use crate::math::Vec2;
use crate::units::DEFAULT_METER_SIZE;

/// Material given to each kind of body the factory creates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MaterialDefaults {
    pub ball: Material,
    pub r#box: Material,
    pub polygon: Material,
}

impl Default for MaterialDefaults {
    fn default() -> Self {
        Self {
            ball: Material {
                density: 1.0,
                friction: 1.0,
                restitution: 0.5,
            },
            r#box: Material {
                density: 1.0,
                friction: 1.0,
                restitution: 0.2,
            },
            polygon: Material {
                density: 1.0,
                friction: 1.0,
                restitution: 0.1,
            },
        }
    }
}

#[derive(Clone, Debug)]
pub struct SceneConfig {
    /// Simulation units (m/s^2).
    pub gravity: Vec2,
    /// Pixels per meter.
    pub meter_size: f32,
    pub screen_width: f32,
    pub screen_height: f32,
    pub velocity_iterations: u32,
    pub position_iterations: u32,
    pub world: WorldConfig,
    pub materials: MaterialDefaults,
    /// Draw fixtures and mass/origin markers.
    pub debug: bool,
    /// Root for textures loaded with the internal asset scope.
    pub asset_root: PathBuf,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -9.8),
            meter_size: DEFAULT_METER_SIZE,
            screen_width: 800.0,
            screen_height: 600.0,
            velocity_iterations: 6,
            position_iterations: 2,
            world: WorldConfig::default(),
            materials: MaterialDefaults::default(),
            debug: false,
            asset_root: PathBuf::from("assets"),
        }
    }
}
