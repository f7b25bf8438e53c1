use tracing::warn;

use crate::error::{ConfigError, Result};
use crate::math::Vec2;

pub const DEFAULT_METER_SIZE: f32 = 100.0;
pub const MAX_METER_SIZE: f32 = 500.0;

/// Pixels per simulation meter.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UnitScale {
    meter_size: f32,
}

impl Default for UnitScale {
    fn default() -> Self {
        Self {
            meter_size: DEFAULT_METER_SIZE,
        }
    }
}

impl UnitScale {
    pub fn new(meter_size: f32) -> Result<Self> {
        let mut scale = Self::default();
        scale.set_meter_size(meter_size)?;
        Ok(scale)
    }

    #[inline]
    pub fn meter_size(&self) -> f32 {
        self.meter_size
    }

    /// Rejected values leave the current scale in place.
    pub fn set_meter_size(&mut self, meter_size: f32) -> Result<()> {
        if !meter_size.is_finite() || meter_size <= 0.0 || meter_size > MAX_METER_SIZE {
            warn!(
                requested = meter_size,
                kept = self.meter_size,
                "meter size rejected, max allowed is {MAX_METER_SIZE}"
            );
            return Err(ConfigError::MeterSize {
                requested: meter_size,
                max: MAX_METER_SIZE,
            }
            .into());
        }
        self.meter_size = meter_size;
        Ok(())
    }

    #[inline]
    pub fn to_sim(&self, pixels: f32) -> f32 {
        pixels / self.meter_size
    }

    #[inline]
    pub fn to_pixels(&self, sim: f32) -> f32 {
        sim * self.meter_size
    }

    #[inline]
    pub fn vec_to_sim(&self, pixels: Vec2) -> Vec2 {
        Vec2::new(self.to_sim(pixels.x), self.to_sim(pixels.y))
    }

    #[inline]
    pub fn vec_to_pixels(&self, sim: Vec2) -> Vec2 {
        Vec2::new(self.to_pixels(sim.x), self.to_pixels(sim.y))
    }
}
