use crate::collision::FeaturePair;
use crate::collision::arbiter::{Contact, MAX_POINTS};
use crate::dynamics::{PolygonShape, Shape};
use crate::math::{Transform, Vec2};

// Polygon vertex and edge numbering (counter-clockwise):
//
//   edge i runs from vertex i to vertex i + 1 (wrapping), and its outward
//   normal is normals[i]. A two-vertex segment has edges 0 (v0 -> v1) and
//   1 (v1 -> v0).

/// Placeholder for "no edge" in a feature pair.
pub const NO_EDGE: u8 = u8::MAX;

/// Prefer the first polygon as reference unless the second is clearly better.
const RELATIVE_TOL: f32 = 0.95;
const ABSOLUTE_TOL: f32 = 0.005;

#[derive(Copy, Clone, Debug, Default)]
pub struct ClipVertex {
    v: Vec2,
    fp: FeaturePair,
}

pub fn flip(fp: &mut FeaturePair) {
    std::mem::swap(&mut fp.in_edge1, &mut fp.in_edge2);
    std::mem::swap(&mut fp.out_edge1, &mut fp.out_edge2);
}

pub fn clip_segment_to_line(
    v_out: &mut [ClipVertex; 2],
    v_in: &[ClipVertex; 2],
    normal: Vec2,
    offset: f32,
    clip_edge: u8,
) -> usize {
    let mut num_out: usize = 0;

    let distance0 = normal.dot(v_in[0].v) - offset;
    let distance1 = normal.dot(v_in[1].v) - offset;

    if distance0 <= 0.0 {
        v_out[num_out] = v_in[0];
        num_out += 1;
    }
    if distance1 <= 0.0 {
        v_out[num_out] = v_in[1];
        num_out += 1;
    }

    if distance0 * distance1 < 0.0 {
        let interp = distance0 / (distance0 - distance1);
        v_out[num_out].v = v_in[0].v + interp * (v_in[1].v - v_in[0].v);
        if distance0 > 0.0 {
            v_out[num_out].fp = v_in[0].fp;
            v_out[num_out].fp.in_edge1 = clip_edge;
            v_out[num_out].fp.in_edge2 = NO_EDGE;
        } else {
            v_out[num_out].fp = v_in[1].fp;
            v_out[num_out].fp.out_edge1 = clip_edge;
            v_out[num_out].fp.out_edge2 = NO_EDGE;
        }

        num_out += 1;
    }

    num_out
}

/// Edge of `poly1` with the largest separation from `poly2`.
fn find_max_separation(
    poly1: &PolygonShape,
    xf1: &Transform,
    poly2: &PolygonShape,
    xf2: &Transform,
) -> (usize, f32) {
    let mut best_index = 0;
    let mut max_separation = f32::MIN;

    for (i, (n, v)) in poly1.normals().iter().zip(poly1.vertices()).enumerate() {
        let n = xf1.rotate(*n);
        let v1 = xf1.apply(*v);

        let separation = poly2
            .vertices()
            .iter()
            .map(|v2| n.dot(xf2.apply(*v2) - v1))
            .fold(f32::MAX, f32::min);

        if separation > max_separation {
            max_separation = separation;
            best_index = i;
        }
    }

    (best_index, max_separation)
}

/// The edge of `poly` most anti-parallel to the reference normal.
fn compute_incident_edge(
    c: &mut [ClipVertex; 2],
    poly: &PolygonShape,
    xf: &Transform,
    normal: Vec2,
) {
    let count = poly.count();
    let mut index = 0;
    let mut min_dot = f32::MAX;
    for (i, n) in poly.normals().iter().enumerate() {
        let dot = normal.dot(xf.rotate(*n));
        if dot < min_dot {
            min_dot = dot;
            index = i;
        }
    }

    let i1 = index;
    let i2 = (i1 + 1) % count;
    let prev = (i1 + count - 1) % count;

    c[0].v = xf.apply(poly.vertices()[i1]);
    c[0].fp = FeaturePair::new(NO_EDGE, NO_EDGE, prev as u8, i1 as u8);

    c[1].v = xf.apply(poly.vertices()[i2]);
    c[1].fp = FeaturePair::new(NO_EDGE, NO_EDGE, i1 as u8, i2 as u8);
}

// The normal points from A to B
pub fn collide_polygons(
    contacts: &mut [Contact; MAX_POINTS],
    poly_a: &PolygonShape,
    xf_a: &Transform,
    poly_b: &PolygonShape,
    xf_b: &Transform,
) -> usize {
    let (edge_a, separation_a) = find_max_separation(poly_a, xf_a, poly_b, xf_b);
    if separation_a > 0.0 {
        return 0;
    }

    let (edge_b, separation_b) = find_max_separation(poly_b, xf_b, poly_a, xf_a);
    if separation_b > 0.0 {
        return 0;
    }

    let flipped = separation_b > RELATIVE_TOL * separation_a + ABSOLUTE_TOL;
    let (poly1, xf1, poly2, xf2, edge1) = if flipped {
        (poly_b, xf_b, poly_a, xf_a, edge_b)
    } else {
        (poly_a, xf_a, poly_b, xf_b, edge_a)
    };

    let count1 = poly1.count();
    let iv1 = edge1;
    let iv2 = (edge1 + 1) % count1;

    let v11 = xf1.apply(poly1.vertices()[iv1]);
    let v12 = xf1.apply(poly1.vertices()[iv2]);

    let tangent = (v12 - v11).normalize();
    let front_normal = Vec2::cross_vec_scalar(tangent, 1.0);

    let front = front_normal.dot(v11);
    let neg_side = -tangent.dot(v11);
    let pos_side = tangent.dot(v12);
    let neg_edge = ((iv1 + count1 - 1) % count1) as u8;
    let pos_edge = iv2 as u8;

    let mut incident_edge = [ClipVertex::default(); 2];
    compute_incident_edge(&mut incident_edge, poly2, xf2, front_normal);

    // Clip the incident edge to the side planes of the reference edge.
    let mut clip_points1 = [ClipVertex::default(); 2];
    let mut clip_points2 = [ClipVertex::default(); 2];

    let mut np = clip_segment_to_line(
        &mut clip_points1,
        &incident_edge,
        -tangent,
        neg_side,
        neg_edge,
    );
    if np < 2 {
        return 0;
    }

    np = clip_segment_to_line(
        &mut clip_points2,
        &clip_points1,
        tangent,
        pos_side,
        pos_edge,
    );
    if np < 2 {
        return 0;
    }

    let normal = if flipped { -front_normal } else { front_normal };

    // Due to roundoff, it is possible that clipping removes all points.
    let mut num_contacts: usize = 0;
    for cp in &clip_points2 {
        let separation = front_normal.dot(cp.v) - front;

        if separation <= 0.0 {
            let contact = &mut contacts[num_contacts];
            *contact = Contact::default();
            contact.separation = separation;
            contact.normal = normal;
            // slide contact point onto reference face (easy to cull)
            contact.position = cp.v - separation * front_normal;
            contact.feature = cp.fp;
            if flipped {
                flip(&mut contact.feature);
            }
            num_contacts += 1;
        }
    }

    num_contacts
}

// The normal points from the polygon to the circle.
pub fn collide_polygon_circle(
    contacts: &mut [Contact; MAX_POINTS],
    poly: &PolygonShape,
    xf_a: &Transform,
    center: Vec2,
    radius: f32,
    xf_b: &Transform,
) -> usize {
    // Circle center in the polygon's frame.
    let c = xf_a.apply_inverse(xf_b.apply(center));

    let vertices = poly.vertices();
    let normals = poly.normals();
    let count = poly.count();

    let mut normal_index = 0;
    let mut separation = f32::MIN;
    for i in 0..count {
        let s = normals[i].dot(c - vertices[i]);
        if s > radius {
            return 0;
        }
        if s > separation {
            separation = s;
            normal_index = i;
        }
    }

    let face_normal = normals[normal_index];
    let v1 = vertices[normal_index];
    let v2 = vertices[(normal_index + 1) % count];

    let (local_normal, local_point) = if separation < f32::EPSILON {
        // Center is inside the polygon.
        (face_normal, c - separation * face_normal)
    } else if (c - v1).dot(v2 - v1) <= 0.0 {
        if (c - v1).length_squared() > radius * radius {
            return 0;
        }
        (vertex_normal(c - v1, face_normal), v1)
    } else if (c - v2).dot(v1 - v2) <= 0.0 {
        if (c - v2).length_squared() > radius * radius {
            return 0;
        }
        (vertex_normal(c - v2, face_normal), v2)
    } else {
        (face_normal, c - separation * face_normal)
    };

    let contact = &mut contacts[0];
    *contact = Contact::default();
    contact.separation = (c - local_point).dot(local_normal) - radius;
    contact.normal = xf_a.rotate(local_normal);
    contact.position = xf_a.apply(local_point);
    contact.feature = FeaturePair::new(normal_index as u8, NO_EDGE, NO_EDGE, NO_EDGE);
    1
}

fn vertex_normal(d: Vec2, fallback: Vec2) -> Vec2 {
    let n = d.normalize();
    if n.is_zero() { fallback } else { n }
}

// The normal points from A to B
pub fn collide_circles(
    contacts: &mut [Contact; MAX_POINTS],
    center_a: Vec2,
    radius_a: f32,
    xf_a: &Transform,
    center_b: Vec2,
    radius_b: f32,
    xf_b: &Transform,
) -> usize {
    let pa = xf_a.apply(center_a);
    let pb = xf_b.apply(center_b);

    let d = pb - pa;
    let total = radius_a + radius_b;
    let dist_sq = d.length_squared();
    if dist_sq > total * total {
        return 0;
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > f32::EPSILON {
        d * (1.0 / dist)
    } else {
        Vec2::new(0.0, 1.0)
    };

    let contact = &mut contacts[0];
    *contact = Contact::default();
    contact.separation = dist - total;
    contact.normal = normal;
    contact.position = pa + radius_a * normal;
    1
}

/// Narrow phase for one pair of fixtures. The normal points from A to B.
///
/// Two edges never collide with each other.
pub fn collide(
    contacts: &mut [Contact; MAX_POINTS],
    shape_a: &Shape,
    xf_a: &Transform,
    shape_b: &Shape,
    xf_b: &Transform,
) -> usize {
    match (shape_a, shape_b) {
        (
            Shape::Circle {
                center: ca,
                radius: ra,
            },
            Shape::Circle {
                center: cb,
                radius: rb,
            },
        ) => collide_circles(contacts, *ca, *ra, xf_a, *cb, *rb, xf_b),

        (Shape::Polygon(poly) | Shape::Edge(poly), Shape::Circle { center, radius }) => {
            collide_polygon_circle(contacts, poly, xf_a, *center, *radius, xf_b)
        }

        (Shape::Circle { center, radius }, Shape::Polygon(poly) | Shape::Edge(poly)) => {
            let n = collide_polygon_circle(contacts, poly, xf_b, *center, *radius, xf_a);
            for c in &mut contacts[..n] {
                c.normal = -c.normal;
                flip(&mut c.feature);
            }
            n
        }

        (Shape::Edge(_), Shape::Edge(_)) => 0,

        (Shape::Polygon(a) | Shape::Edge(a), Shape::Polygon(b) | Shape::Edge(b)) => {
            collide_polygons(contacts, a, xf_a, b, xf_b)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn flip_swaps_edges() {
        let mut fp = FeaturePair::new(1, 2, 3, 4);
        flip(&mut fp);
        assert_eq!(fp, FeaturePair::new(3, 4, 1, 2));
    }

    #[test]
    fn clip_segment_to_line_clips_one_point() {
        // Line: x = 0.5, keep points with x <= 0.5
        let normal = Vec2::new(1.0, 0.0);
        let offset = 0.5;
        let v_in = [
            ClipVertex {
                v: Vec2::new(0.0, 0.0),
                fp: FeaturePair::default(),
            },
            ClipVertex {
                v: Vec2::new(1.0, 0.0),
                fp: FeaturePair::new(NO_EDGE, NO_EDGE, 1, 2),
            },
        ];
        let mut v_out = [ClipVertex::default(); 2];
        let n = clip_segment_to_line(&mut v_out, &v_in, normal, offset, 7);

        // One is inside, and one intersection point.
        assert_eq!(n, 2);
        assert_relative_eq!(v_out[0].v.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v_out[1].v.x, 0.5, epsilon = 1e-6);
        assert_relative_eq!(v_out[1].v.y, 0.0, epsilon = 1e-6);
        assert_eq!(v_out[1].fp.out_edge1, 7);
        assert_eq!(v_out[1].fp.out_edge2, NO_EDGE);
    }

    #[test]
    fn resting_box_gets_two_contacts_with_upward_normal() {
        let ground = PolygonShape::new_box(5.0, 0.5);
        let crate_ = PolygonShape::new_box(0.5, 0.5);
        let xf_ground = Transform::new(Vec2::new(0.0, 0.0), 0.0);
        let xf_crate = Transform::new(Vec2::new(0.0, 0.98), 0.0);

        let mut contacts = [Contact::default(); MAX_POINTS];
        let n = collide_polygons(&mut contacts, &ground, &xf_ground, &crate_, &xf_crate);

        assert_eq!(n, 2);
        for c in &contacts[..n] {
            assert_relative_eq!(c.normal.x, 0.0, epsilon = 1e-5);
            assert_relative_eq!(c.normal.y, 1.0, epsilon = 1e-5);
            assert_relative_eq!(c.separation, -0.02, epsilon = 1e-4);
            assert_relative_eq!(c.position.y, 0.5, epsilon = 1e-4);
        }
        assert_ne!(contacts[0].feature.key(), contacts[1].feature.key());
    }

    #[test]
    fn flipped_reference_keeps_normal_from_a_to_b() {
        let small = PolygonShape::new_box(0.5, 0.5);
        let big = PolygonShape::new_box(5.0, 0.5);
        let xf_small = Transform::new(Vec2::new(0.0, 0.98), 0.0);
        let xf_big = Transform::new(Vec2::new(0.0, 0.0), 0.0);

        let mut contacts = [Contact::default(); MAX_POINTS];
        let n = collide_polygons(&mut contacts, &small, &xf_small, &big, &xf_big);

        assert!(n > 0);
        for c in &contacts[..n] {
            assert_relative_eq!(c.normal.y, -1.0, epsilon = 1e-5);
            assert!(c.separation <= 0.0);
        }
    }

    #[test]
    fn circle_over_polygon_face() {
        let ground = PolygonShape::new_box(2.0, 0.5);
        let xf_ground = Transform::default();
        let xf_ball = Transform::new(Vec2::new(0.3, 0.9), 0.0);

        let mut contacts = [Contact::default(); MAX_POINTS];
        let n = collide(
            &mut contacts,
            &Shape::Polygon(ground),
            &xf_ground,
            &Shape::circle(0.5),
            &xf_ball,
        );

        assert_eq!(n, 1);
        assert_relative_eq!(contacts[0].normal.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(contacts[0].separation, -0.1, epsilon = 1e-5);
        assert_relative_eq!(contacts[0].position.x, 0.3, epsilon = 1e-5);
        assert_relative_eq!(contacts[0].position.y, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn circle_near_polygon_corner_uses_vertex_normal() {
        let square = PolygonShape::new_box(0.5, 0.5);
        let xf_ball = Transform::new(Vec2::new(0.8, 0.8), 0.0);

        let mut contacts = [Contact::default(); MAX_POINTS];
        let n = collide_polygon_circle(
            &mut contacts,
            &square,
            &Transform::default(),
            Vec2::ZERO,
            0.5,
            &xf_ball,
        );
        assert_eq!(n, 1);
        let s = core::f32::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(contacts[0].normal.x, s, epsilon = 1e-5);
        assert_relative_eq!(contacts[0].normal.y, s, epsilon = 1e-5);

        // Farther out along the diagonal there is no contact.
        let far = Transform::new(Vec2::new(0.9, 0.9), 0.0);
        let n = collide_polygon_circle(
            &mut contacts,
            &square,
            &Transform::default(),
            Vec2::ZERO,
            0.5,
            &far,
        );
        assert_eq!(n, 0);
    }

    #[test]
    fn circle_first_flips_the_normal() {
        let mut contacts = [Contact::default(); MAX_POINTS];
        let n = collide(
            &mut contacts,
            &Shape::circle(0.5),
            &Transform::new(Vec2::new(0.0, 0.9), 0.0),
            &Shape::rect(2.0, 0.5),
            &Transform::default(),
        );
        assert_eq!(n, 1);
        assert_relative_eq!(contacts[0].normal.y, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn overlapping_circles() {
        let mut contacts = [Contact::default(); MAX_POINTS];
        let n = collide(
            &mut contacts,
            &Shape::circle(1.0),
            &Transform::default(),
            &Shape::circle(1.0),
            &Transform::new(Vec2::new(1.5, 0.0), 0.0),
        );
        assert_eq!(n, 1);
        assert_relative_eq!(contacts[0].normal.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(contacts[0].separation, -0.5, epsilon = 1e-6);
        assert_relative_eq!(contacts[0].position.x, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn box_resting_on_edge() {
        let ground = Shape::edge(Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0));
        let crate_ = Shape::rect(0.5, 0.5);

        let mut contacts = [Contact::default(); MAX_POINTS];
        let n = collide(
            &mut contacts,
            &ground,
            &Transform::default(),
            &crate_,
            &Transform::new(Vec2::new(1.0, 0.49), 0.0),
        );
        assert_eq!(n, 2);
        for c in &contacts[..n] {
            assert_relative_eq!(c.normal.y, 1.0, epsilon = 1e-5);
            assert_relative_eq!(c.separation, -0.01, epsilon = 1e-4);
        }
    }

    #[test]
    fn edges_ignore_each_other() {
        let mut contacts = [Contact::default(); MAX_POINTS];
        let e = Shape::edge(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0));
        assert_eq!(collide(&mut contacts, &e, &Transform::default(), &e, &Transform::default()), 0);
    }
}
