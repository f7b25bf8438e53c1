use tracing::debug;

use crate::dynamics::{
    BodyDef, BodyHandle, BodyType, FixtureDef, MAX_POLYGON_VERTICES, Material, Shape, weld,
};
use crate::error::{Error, Result};
use crate::geometry::{BoundingBox, RegularShape, bounding_box_of, regular_polygon};
use crate::math::Vec2;
use crate::scene::{ActorHandle, ActorKind, Scene};

/// All factory inputs are pixels; bodies are created in meters.
impl Scene {
    /// Circle centered on (`x`, `y`).
    pub fn new_ball(&mut self, motion: BodyType, x: f32, y: f32, radius: f32) -> ActorHandle {
        let center = self.scale.vec_to_sim(Vec2::new(x, y));
        let r = self.scale.to_sim(radius);
        let material = self.config.materials.ball;

        let body = self.spawn(motion, center, Shape::circle(r), material);
        let handle = self.register(body, ActorKind::Ball, 2.0 * radius, 2.0 * radius);
        debug!(%handle, ?motion, x, y, radius, "ball created");
        handle
    }

    /// Rectangle whose lower-left corner sits at (`x`, `y`).
    pub fn new_box(
        &mut self,
        motion: BodyType,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> ActorHandle {
        let center = self
            .scale
            .vec_to_sim(Vec2::new(x + width / 2.0, y + height / 2.0));
        let hw = self.scale.to_sim(width / 2.0);
        let hh = self.scale.to_sim(height / 2.0);
        let material = self.config.materials.r#box;

        let body = self.spawn(motion, center, Shape::rect(hw, hh), material);
        let handle = self.register(body, ActorKind::Box, width, height);
        debug!(%handle, ?motion, x, y, width, height, "box created");
        handle
    }

    /// Regular polygon of circumradius `radius`. The outline is shifted so
    /// the middle of its bounding box lands on (`cx`, `cy`), which is also
    /// the body origin.
    pub fn new_regular_polygon(
        &mut self,
        shape: RegularShape,
        motion: BodyType,
        cx: f32,
        cy: f32,
        radius: f32,
    ) -> Result<ActorHandle> {
        let outline = regular_polygon(shape, radius);
        let handle = self.new_polygon_actor(motion, &outline, Some(Vec2::new(cx, cy)))?;
        debug!(%handle, ?motion, %shape, cx, cy, radius, "regular polygon created");
        Ok(handle)
    }

    pub fn new_triangle(
        &mut self,
        motion: BodyType,
        cx: f32,
        cy: f32,
        radius: f32,
    ) -> Result<ActorHandle> {
        self.new_regular_polygon(RegularShape::Triangle, motion, cx, cy, radius)
    }

    pub fn new_square(
        &mut self,
        motion: BodyType,
        cx: f32,
        cy: f32,
        radius: f32,
    ) -> Result<ActorHandle> {
        self.new_regular_polygon(RegularShape::Square, motion, cx, cy, radius)
    }

    pub fn new_pentagon(
        &mut self,
        motion: BodyType,
        cx: f32,
        cy: f32,
        radius: f32,
    ) -> Result<ActorHandle> {
        self.new_regular_polygon(RegularShape::Pentagon, motion, cx, cy, radius)
    }

    pub fn new_hexagon(
        &mut self,
        motion: BodyType,
        cx: f32,
        cy: f32,
        radius: f32,
    ) -> Result<ActorHandle> {
        self.new_regular_polygon(RegularShape::Hexagon, motion, cx, cy, radius)
    }

    pub fn new_heptagon(
        &mut self,
        motion: BodyType,
        cx: f32,
        cy: f32,
        radius: f32,
    ) -> Result<ActorHandle> {
        self.new_regular_polygon(RegularShape::Heptagon, motion, cx, cy, radius)
    }

    pub fn new_octagon(
        &mut self,
        motion: BodyType,
        cx: f32,
        cy: f32,
        radius: f32,
    ) -> Result<ActorHandle> {
        self.new_regular_polygon(RegularShape::Octagon, motion, cx, cy, radius)
    }

    /// Arbitrary polygon from absolute pixel vertices.
    ///
    /// Vertices are re-centered on their bounding box. Points closer than the
    /// linear slop are welded, so a ring closed by repeating its first point
    /// is fine. Clockwise input is accepted; concave input is not decomposed.
    pub fn new_polygon(&mut self, motion: BodyType, vertices: &[Vec2]) -> Result<ActorHandle> {
        let handle = self.new_polygon_actor(motion, vertices, None)?;
        debug!(%handle, ?motion, count = vertices.len(), "polygon created");
        Ok(handle)
    }

    /// Body goes to `anchor` if given, else to the middle of the outline.
    fn new_polygon_actor(
        &mut self,
        motion: BodyType,
        vertices: &[Vec2],
        anchor: Option<Vec2>,
    ) -> Result<ActorHandle> {
        let (bounds, local) = self.centered_on_bounds(vertices)?;
        let center = self
            .scale
            .vec_to_sim(anchor.unwrap_or_else(|| bounds.center()));
        let material = self.config.materials.polygon;

        let body = self.spawn(motion, center, Shape::polygon(&local), material);
        Ok(self.register(body, ActorKind::Polygon, bounds.width, bounds.height))
    }

    /// Pixel bounding box plus the vertices relative to its center, in meters.
    fn centered_on_bounds(&self, vertices: &[Vec2]) -> Result<(BoundingBox, Vec<Vec2>)> {
        let bounds = bounding_box_of(vertices)?;
        if vertices.len() < 3 {
            return Err(Error::TooFewVertices(vertices.len()));
        }
        let center = bounds.center();
        let local: Vec<Vec2> = vertices
            .iter()
            .map(|v| self.scale.vec_to_sim(*v - center))
            .collect();

        let local = weld(&local);
        if local.len() < 3 {
            return Err(Error::TooFewVertices(local.len()));
        }
        if local.len() > MAX_POLYGON_VERTICES {
            return Err(Error::TooManyVertices {
                count: local.len(),
                max: MAX_POLYGON_VERTICES,
            });
        }
        Ok((bounds, local))
    }

    pub(crate) fn spawn(
        &mut self,
        body_type: BodyType,
        position: Vec2,
        shape: Shape,
        material: Material,
    ) -> BodyHandle {
        let handle = self.world.create_body(BodyDef {
            body_type,
            position,
            ..Default::default()
        });
        if let Some(body) = self.world.body_mut(handle) {
            body.create_fixture(FixtureDef::new(shape, material));
        }
        handle
    }
}
