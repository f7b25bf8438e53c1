//! Convenience layer over a box2d-lite style rigid-body engine.
//!
//! The engine lives in [`math`], [`dynamics`] and [`collision`]. On top of it,
//! [`scene::Scene`] creates balls, boxes and polygons in pixel units, combines
//! bodies, keeps sprites glued to them and draws everything with macroquad.

pub mod collision;
pub mod config;
pub mod dynamics;
pub mod error;
pub mod geometry;
pub mod math;
pub mod render;
pub mod scene;
pub mod units;

pub use config::{MaterialDefaults, SceneConfig};
pub use dynamics::BodyType as MotionType;
pub use error::{ConfigError, Error, Result};
pub use scene::{Actor, ActorEditor, ActorHandle, ActorKind, Scene};
