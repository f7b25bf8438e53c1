use macroquad::color::{Color, RED};
use macroquad::shapes::{draw_circle, draw_circle_lines, draw_line};

use crate::dynamics::{Body, BodyType, Shape, World};
use crate::math::{Transform, Vec2};
use crate::render::Camera;

pub const MARKER_RADIUS: f32 = 3.0;
pub const CENTER_OF_MASS_COLOR: Color = RED;
pub const ORIGIN_COLOR: Color = Color::new(0.0, 1.0, 1.0, 1.0);

const LINE_THICKNESS: f32 = 1.5;

pub fn body_color(body_type: BodyType) -> Color {
    match body_type {
        BodyType::Static => Color::new(0.5, 0.9, 0.5, 1.0),
        BodyType::Kinematic => Color::new(0.5, 0.5, 0.9, 1.0),
        BodyType::Dynamic => Color::new(0.9, 0.7, 0.7, 1.0),
    }
}

/// Outline every fixture in the world.
pub fn draw_world(world: &World, camera: &Camera) {
    for (_, body) in world.bodies() {
        let color = body_color(body.body_type);
        let xf = body.transform();
        for fixture in body.fixtures() {
            draw_shape(&fixture.shape, &xf, camera, color);
        }
    }
}

pub fn draw_shape(shape: &Shape, xf: &Transform, camera: &Camera, color: Color) {
    match shape {
        Shape::Circle { center, radius } => {
            let c = camera.world_to_screen(xf.apply(*center));
            let r = radius * camera.pixels_per_meter();
            draw_circle_lines(c.x, c.y, r, LINE_THICKNESS, color);

            // Spoke so rotation is visible.
            let rim = camera.world_to_screen(xf.apply(*center + Vec2::new(*radius, 0.0)));
            draw_line(c.x, c.y, rim.x, rim.y, LINE_THICKNESS, color);
        }
        Shape::Polygon(poly) => {
            let pts: Vec<Vec2> = poly
                .vertices()
                .iter()
                .map(|v| camera.world_to_screen(xf.apply(*v)))
                .collect();
            for (i, a) in pts.iter().enumerate() {
                let b = pts[(i + 1) % pts.len()];
                draw_line(a.x, a.y, b.x, b.y, LINE_THICKNESS, color);
            }
        }
        Shape::Edge(edge) => {
            if let [v1, v2] = edge.vertices() {
                let a = camera.world_to_screen(xf.apply(*v1));
                let b = camera.world_to_screen(xf.apply(*v2));
                draw_line(a.x, a.y, b.x, b.y, LINE_THICKNESS, color);
            }
        }
    }
}

/// Filled red dot at the center of mass, cyan ring at the body origin.
pub fn draw_markers(body: &Body, camera: &Camera) {
    let com = camera.world_to_screen(body.world_center());
    draw_circle(com.x, com.y, MARKER_RADIUS, CENTER_OF_MASS_COLOR);

    let origin = camera.world_to_screen(body.position);
    draw_circle_lines(origin.x, origin.y, MARKER_RADIUS, 1.0, ORIGIN_COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_types_get_distinct_colors() {
        let s = body_color(BodyType::Static);
        let k = body_color(BodyType::Kinematic);
        let d = body_color(BodyType::Dynamic);
        assert_ne!(s, k);
        assert_ne!(k, d);
        assert_ne!(s, d);
    }
}
