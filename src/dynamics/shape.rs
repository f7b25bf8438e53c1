use crate::collision::{LINEAR_SLOP, NO_EDGE};
use crate::geometry::{BoundingBox, bounding_box_of};
use crate::math::{Transform, Vec2};

/// Feature ids are stored in a `u8` and `NO_EDGE` is reserved.
pub const MAX_POLYGON_VERTICES: usize = NO_EDGE as usize;

/// Drops points closer than `LINEAR_SLOP` to the last kept one, including a
/// closing point that repeats the first.
pub fn weld(points: &[Vec2]) -> Vec<Vec2> {
    let slop_sq = LINEAR_SLOP * LINEAR_SLOP;
    let mut out: Vec<Vec2> = Vec::with_capacity(points.len());
    for p in points {
        if out.last().is_none_or(|q| (*p - *q).length_squared() > slop_sq) {
            out.push(*p);
        }
    }
    while out.len() > 1 && (out[out.len() - 1] - out[0]).length_squared() <= slop_sq {
        out.pop();
    }
    out
}

/// Convex outline with per-edge outward normals, counter-clockwise.
///
/// Two vertices form a two-sided segment: its "edges" are v0->v1 and v1->v0
/// with opposite normals, which lets the polygon clipper handle edges too.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonShape {
    vertices: Vec<Vec2>,
    normals: Vec<Vec2>,
}

impl PolygonShape {
    /// Near-duplicate points are welded and clockwise input is reversed so
    /// the normals point outward.
    pub fn new(points: &[Vec2]) -> Self {
        let mut vertices = weld(points);
        debug_assert!(vertices.len() >= 2, "polygon needs at least two points");

        if signed_area(&vertices) < 0.0 {
            vertices.reverse();
        }
        Self::from_ccw(vertices)
    }

    pub fn new_box(half_width: f32, half_height: f32) -> Self {
        Self::from_ccw(vec![
            Vec2::new(-half_width, -half_height),
            Vec2::new(half_width, -half_height),
            Vec2::new(half_width, half_height),
            Vec2::new(-half_width, half_height),
        ])
    }

    fn from_ccw(vertices: Vec<Vec2>) -> Self {
        let n = vertices.len();
        debug_assert!(n <= MAX_POLYGON_VERTICES);
        let normals = (0..n)
            .map(|i| {
                let edge = vertices[(i + 1) % n] - vertices[i];
                Vec2::cross_vec_scalar(edge, 1.0).normalize()
            })
            .collect();
        Self { vertices, normals }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    #[inline]
    pub fn normals(&self) -> &[Vec2] {
        &self.normals
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.vertices.len()
    }
}

/// Twice-signed area, positive for counter-clockwise outlines.
fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].cross(points[(i + 1) % n]))
        .sum::<f32>()
}

/// Fixture geometry in body-local coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Circle { center: Vec2, radius: f32 },
    Polygon(PolygonShape),
    Edge(PolygonShape),
}

impl Shape {
    #[inline]
    pub fn circle(radius: f32) -> Self {
        Shape::Circle {
            center: Vec2::ZERO,
            radius,
        }
    }

    #[inline]
    pub fn polygon(points: &[Vec2]) -> Self {
        Shape::Polygon(PolygonShape::new(points))
    }

    #[inline]
    pub fn rect(half_width: f32, half_height: f32) -> Self {
        Shape::Polygon(PolygonShape::new_box(half_width, half_height))
    }

    #[inline]
    pub fn edge(v1: Vec2, v2: Vec2) -> Self {
        Shape::Edge(PolygonShape::from_ccw(vec![v1, v2]))
    }

    /// Same shape under `xf`, still expressed as local geometry.
    pub fn transformed(&self, xf: &Transform) -> Shape {
        match self {
            Shape::Circle { center, radius } => Shape::Circle {
                center: xf.apply(*center),
                radius: *radius,
            },
            Shape::Polygon(poly) => {
                let pts: Vec<Vec2> = poly.vertices().iter().map(|v| xf.apply(*v)).collect();
                Shape::Polygon(PolygonShape::from_ccw(pts))
            }
            Shape::Edge(seg) => {
                let v = seg.vertices();
                Shape::edge(xf.apply(v[0]), xf.apply(v[1]))
            }
        }
    }

    /// Points that bound the shape once placed with `xf`.
    ///
    /// A circle contributes the two opposite corners of its bounding square.
    pub fn world_points(&self, xf: &Transform) -> Vec<Vec2> {
        match self {
            Shape::Circle { center, radius } => {
                let c = xf.apply(*center);
                let r = Vec2::new(*radius, *radius);
                vec![c - r, c + r]
            }
            Shape::Polygon(poly) | Shape::Edge(poly) => {
                poly.vertices().iter().map(|v| xf.apply(*v)).collect()
            }
        }
    }

    pub fn aabb(&self, xf: &Transform) -> BoundingBox {
        bounding_box_of(&self.world_points(xf)).unwrap_or_default()
    }

    pub fn compute_mass(&self, density: f32) -> MassData {
        match self {
            Shape::Circle { center, radius } => {
                let mass = density * core::f32::consts::PI * radius * radius;
                MassData {
                    mass,
                    center: *center,
                    inertia: mass * (0.5 * radius * radius + center.dot(*center)),
                }
            }
            Shape::Polygon(poly) => polygon_mass(poly.vertices(), density),
            Shape::Edge(seg) => {
                let v = seg.vertices();
                MassData {
                    mass: 0.0,
                    center: 0.5 * (v[0] + v[1]),
                    inertia: 0.0,
                }
            }
        }
    }
}

/// Mass, centroid and rotational inertia about the body origin.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MassData {
    pub mass: f32,
    pub center: Vec2,
    pub inertia: f32,
}

// Triangle fan around the first vertex, keeping the numbers small for
// polygons far from the origin.
fn polygon_mass(vertices: &[Vec2], density: f32) -> MassData {
    let s = vertices[0];
    let n = vertices.len();
    let k_inv3 = 1.0 / 3.0;

    let mut area = 0.0;
    let mut center = Vec2::ZERO;
    let mut inertia = 0.0;

    for i in 0..n {
        let e1 = vertices[i] - s;
        let e2 = vertices[(i + 1) % n] - s;
        let d = e1.cross(e2);

        let tri_area = 0.5 * d;
        area += tri_area;
        center += (tri_area * k_inv3) * (e1 + e2);

        let int_x2 = e1.x * e1.x + e2.x * e1.x + e2.x * e2.x;
        let int_y2 = e1.y * e1.y + e2.y * e1.y + e2.y * e2.y;
        inertia += (0.25 * k_inv3 * d) * (int_x2 + int_y2);
    }

    if area <= f32::EPSILON {
        return MassData {
            mass: 0.0,
            center: s,
            inertia: 0.0,
        };
    }

    let mass = density * area;
    center *= 1.0 / area;
    let world_center = center + s;
    MassData {
        mass,
        center: world_center,
        // Shift from the fan origin to the body origin.
        inertia: density * inertia + mass * (world_center.dot(world_center) - center.dot(center)),
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            density: 1.0,
            friction: 1.0,
            restitution: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FixtureDef {
    pub shape: Shape,
    pub material: Material,
}

impl FixtureDef {
    #[inline]
    pub fn new(shape: Shape, material: Material) -> Self {
        Self { shape, material }
    }
}

/// Shape plus material attached to a body.
#[derive(Clone, Debug, PartialEq)]
pub struct Fixture {
    pub shape: Shape,
    pub material: Material,
}

impl From<FixtureDef> for Fixture {
    fn from(def: FixtureDef) -> Self {
        Self {
            shape: def.shape,
            material: def.material,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn clockwise_input_is_reversed() {
        let cw = [
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, -1.0),
            Vec2::new(-1.0, 0.0),
        ];
        let poly = PolygonShape::new(&cw);
        assert_eq!(poly.vertices()[0], Vec2::new(-1.0, 0.0));
        assert!(signed_area(poly.vertices()) > 0.0);
    }

    #[test]
    fn closing_point_is_welded() {
        let ring = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 1.001),
            Vec2::new(0.0, 1.0),
            Vec2::new(0.0, 0.0),
        ];
        let poly = PolygonShape::new(&ring);
        assert_eq!(poly.count(), 4);
        for n in poly.normals() {
            assert_relative_eq!(n.length(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn weld_keeps_distinct_points() {
        let pts = [Vec2::ZERO, Vec2::new(0.1, 0.0), Vec2::new(0.0, 0.1)];
        assert_eq!(weld(&pts), pts.to_vec());
        assert_eq!(weld(&[Vec2::ZERO, Vec2::new(0.001, 0.0)]), vec![Vec2::ZERO]);
    }

    #[test]
    fn box_normals_point_outward() {
        let b = PolygonShape::new_box(1.0, 0.5);
        let expected = [
            Vec2::new(0.0, -1.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(-1.0, 0.0),
        ];
        for (n, e) in b.normals().iter().zip(expected) {
            assert_relative_eq!(n.x, e.x, epsilon = 1e-6);
            assert_relative_eq!(n.y, e.y, epsilon = 1e-6);
        }
    }

    #[test]
    fn edge_has_two_opposite_normals() {
        let Shape::Edge(seg) = Shape::edge(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0)) else {
            panic!("expected an edge");
        };
        assert_eq!(seg.count(), 2);
        assert_relative_eq!(seg.normals()[0].y, -1.0, epsilon = 1e-6);
        assert_relative_eq!(seg.normals()[1].y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn box_mass_matches_closed_form() {
        let md = Shape::rect(1.0, 0.5).compute_mass(2.0);
        // 2 x 1 box, density 2.
        assert_relative_eq!(md.mass, 4.0, epsilon = 1e-5);
        assert_relative_eq!(md.center.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(md.center.y, 0.0, epsilon = 1e-6);
        // m * (w^2 + h^2) / 12
        assert_relative_eq!(md.inertia, 4.0 * (4.0 + 1.0) / 12.0, epsilon = 1e-5);
    }

    #[test]
    fn offset_circle_uses_parallel_axis() {
        let shape = Shape::Circle {
            center: Vec2::new(2.0, 0.0),
            radius: 1.0,
        };
        let md = shape.compute_mass(1.0);
        let pi = core::f32::consts::PI;
        assert_relative_eq!(md.mass, pi, epsilon = 1e-5);
        assert_relative_eq!(md.inertia, pi * (0.5 + 4.0), epsilon = 1e-4);
        assert_eq!(md.center, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn triangle_centroid_is_area_centroid() {
        let md = Shape::polygon(&[
            Vec2::new(0.0, 0.0),
            Vec2::new(3.0, 0.0),
            Vec2::new(0.0, 3.0),
        ])
        .compute_mass(1.0);
        assert_relative_eq!(md.mass, 4.5, epsilon = 1e-5);
        assert_relative_eq!(md.center.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(md.center.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn world_points_of_circle_are_bounding_corners() {
        let xf = Transform::new(Vec2::new(5.0, 1.0), 0.0);
        let pts = Shape::circle(0.5).world_points(&xf);
        assert_eq!(pts, vec![Vec2::new(4.5, 0.5), Vec2::new(5.5, 1.5)]);
        let bb = Shape::circle(0.5).aabb(&xf);
        assert_relative_eq!(bb.width, 1.0);
    }

    #[test]
    fn transformed_moves_geometry() {
        let xf = Transform::new(Vec2::new(1.0, 2.0), 0.0);
        let moved = Shape::rect(0.5, 0.5).transformed(&xf);
        let Shape::Polygon(poly) = moved else {
            panic!("expected a polygon");
        };
        assert_eq!(poly.vertices()[0], Vec2::new(0.5, 1.5));
    }
}
