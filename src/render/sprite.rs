use core::fmt;

use macroquad::color::WHITE;
use macroquad::texture::{DrawTextureParams, Texture2D, draw_texture_ex};

use crate::math::{Mat22, Vec2, deg_to_rad};
use crate::render::Camera;

/// A texture placed in pixel space (y up).
///
/// `position` is the lower-left corner of the unscaled image; scaling and
/// rotation happen around `position + origin`. A sprite without a texture
/// keeps its placement but draws nothing.
#[derive(Clone)]
pub struct Sprite {
    texture: Option<Texture2D>,
    size: Vec2,
    pub position: Vec2,
    /// Degrees, counter-clockwise.
    pub rotation: f32,
    pub scale: Vec2,
    pub origin: Vec2,
}

impl Sprite {
    /// Sized from the texture itself. Needs a live graphics context.
    pub fn new(texture: Texture2D) -> Self {
        let size = Vec2::new(texture.width(), texture.height());
        Self::with_size(texture, size)
    }

    pub fn with_size(texture: Texture2D, size: Vec2) -> Self {
        Self {
            texture: Some(texture),
            ..Self::untextured(size)
        }
    }

    /// Placement only, for layout before a texture is available.
    pub fn untextured(size: Vec2) -> Self {
        Self {
            texture: None,
            size,
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
            origin: size * 0.5,
        }
    }

    pub fn texture(&self) -> Option<&Texture2D> {
        self.texture.as_ref()
    }

    pub fn set_texture(&mut self, texture: Texture2D) {
        self.texture = Some(texture);
    }

    /// Unscaled size in pixels.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Stretch to `width` x `height` pixels and pivot around the middle.
    pub fn fit(&mut self, width: f32, height: f32) {
        let sx = if self.size.x > 0.0 { width / self.size.x } else { 1.0 };
        let sy = if self.size.y > 0.0 { height / self.size.y } else { 1.0 };
        self.scale = Vec2::new(sx, sy);
        self.origin = self.size * 0.5;
    }

    /// Place the unscaled image so its middle sits on `center`.
    pub fn center_on(&mut self, center: Vec2, rotation_degrees: f32) {
        self.position = center - self.size * 0.5;
        self.rotation = rotation_degrees;
    }

    pub fn pivot(&self) -> Vec2 {
        self.position + self.origin
    }

    /// Middle of the drawn quad in pixel space.
    pub fn drawn_center(&self) -> Vec2 {
        let half = self.size * 0.5 - self.origin;
        let offset = Vec2::new(half.x * self.scale.x, half.y * self.scale.y);
        self.pivot() + Mat22::from_angle(deg_to_rad(self.rotation)) * offset
    }

    pub fn draw(&self, camera: &Camera) {
        let Some(texture) = &self.texture else {
            return;
        };
        let center = camera.pixels_to_screen(self.drawn_center());
        let ppm = camera.pixels_per_meter() / camera.meter_size();
        let w = (self.size.x * self.scale.x * ppm).abs();
        let h = (self.size.y * self.scale.y * ppm).abs();

        draw_texture_ex(
            texture,
            center.x - w / 2.0,
            center.y - h / 2.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(macroquad::math::vec2(w, h)),
                // Screen Y points down, so counter-clockwise flips sign.
                rotation: -deg_to_rad(self.rotation),
                flip_x: self.scale.x < 0.0,
                flip_y: self.scale.y < 0.0,
                ..Default::default()
            },
        );
    }
}

impl fmt::Debug for Sprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sprite")
            .field("textured", &self.texture.is_some())
            .field("size", &self.size)
            .field("position", &self.position)
            .field("rotation", &self.rotation)
            .field("scale", &self.scale)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}
