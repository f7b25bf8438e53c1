//! macroquad glue: camera, sprites, texture loading and debug drawing.

pub mod camera;
pub mod debug;
pub mod sprite;
pub mod texture;

pub use camera::Camera;
pub use sprite::Sprite;
pub use texture::{AssetScope, TextureFilter, load_texture};
