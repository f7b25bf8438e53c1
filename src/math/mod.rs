pub mod mat22;
pub mod transform;
pub mod utils;
pub mod vec2;

pub use mat22::Mat22;
pub use transform::Transform;
pub use utils::{deg_to_rad, rad_to_deg, random_range};
pub use vec2::Vec2;
