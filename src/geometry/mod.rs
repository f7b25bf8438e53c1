//! Pure geometry used by the factory and the combiner.

pub mod bounds;
pub mod regular;

pub use bounds::{BoundingBox, bounding_box_of, centroid_of};
pub use regular::{RegularShape, ShapeDescriptor, regular_polygon};
