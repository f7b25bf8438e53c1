pub mod arbiter;
pub mod collide;

pub use arbiter::{Arbiter, ArbiterKey, Contact, FeaturePair, LINEAR_SLOP, MAX_POINTS};
pub use collide::{NO_EDGE, collide};
