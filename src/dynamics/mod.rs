pub mod body;
pub mod shape;
pub mod world;

pub use body::{Body, BodyDef, BodyType};
pub use shape::{
    Fixture, FixtureDef, MAX_POLYGON_VERTICES, MassData, Material, PolygonShape, Shape, weld,
};
pub use world::{BodyHandle, World, WorldConfig, bodies_two_mut};
