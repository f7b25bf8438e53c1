use core::fmt;
use core::str::FromStr;

use crate::error::Error;
use crate::math::{Vec2, deg_to_rad};

/// Side count and step angle of one supported regular polygon.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapeDescriptor {
    pub name: &'static str,
    pub side_count: usize,
    pub step_angle_degrees: f32,
}

const DESCRIPTORS: [ShapeDescriptor; 6] = [
    ShapeDescriptor {
        name: "triangle",
        side_count: 3,
        step_angle_degrees: 120.0,
    },
    ShapeDescriptor {
        name: "square",
        side_count: 4,
        step_angle_degrees: 90.0,
    },
    ShapeDescriptor {
        name: "pentagon",
        side_count: 5,
        step_angle_degrees: 72.0,
    },
    ShapeDescriptor {
        name: "hexagon",
        side_count: 6,
        step_angle_degrees: 60.0,
    },
    ShapeDescriptor {
        name: "heptagon",
        side_count: 7,
        step_angle_degrees: 51.428,
    },
    ShapeDescriptor {
        name: "octagon",
        side_count: 8,
        step_angle_degrees: 45.0,
    },
];

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RegularShape {
    Triangle,
    Square,
    Pentagon,
    Hexagon,
    Heptagon,
    Octagon,
}

impl RegularShape {
    pub const ALL: [RegularShape; 6] = [
        RegularShape::Triangle,
        RegularShape::Square,
        RegularShape::Pentagon,
        RegularShape::Hexagon,
        RegularShape::Heptagon,
        RegularShape::Octagon,
    ];

    #[inline]
    pub fn descriptor(self) -> &'static ShapeDescriptor {
        &DESCRIPTORS[self as usize]
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    #[inline]
    pub fn side_count(self) -> usize {
        self.descriptor().side_count
    }
}

impl fmt::Display for RegularShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RegularShape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        RegularShape::ALL
            .into_iter()
            .find(|shape| shape.name() == lower)
            .ok_or_else(|| Error::UnknownShape(s.to_owned()))
    }
}

/// Vertices of `shape` on a circle of `radius` around the origin.
///
/// Starts at `(0, radius)` and walks counter-clockwise by the shape's step
/// angle. Each point is recorded before it is rotated, so the first vertex is
/// exactly the seed. Winding is left as produced.
pub fn regular_polygon(shape: RegularShape, radius: f32) -> Vec<Vec2> {
    let desc = shape.descriptor();
    let theta = deg_to_rad(desc.step_angle_degrees);
    let (sin, cos) = theta.sin_cos();

    let mut p = Vec2::new(0.0, radius);
    let mut points = Vec::with_capacity(desc.side_count);
    for _ in 0..desc.side_count {
        points.push(p);
        p = p.rotate(cos, sin);
    }
    points
}
