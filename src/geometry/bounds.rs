use crate::error::{Error, Result};
use crate::math::Vec2;

/// Axis-aligned rectangle anchored at its lower-left corner.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoundingBox {
    #[inline]
    pub fn from_corners(min: Vec2, max: Vec2) -> Self {
        Self {
            x: min.x,
            y: min.y,
            width: max.x - min.x,
            height: max.y - min.y,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Touching edges count as overlap.
    #[inline]
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x <= b_max.x && b_min.x <= a_max.x && a_min.y <= b_max.y && b_min.y <= a_max.y
    }

    #[inline]
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

/// Smallest axis-aligned box containing every vertex.
pub fn bounding_box_of(vertices: &[Vec2]) -> Result<BoundingBox> {
    let (first, rest) = vertices.split_first().ok_or(Error::EmptyInput)?;
    let (min, max) = rest
        .iter()
        .fold((*first, *first), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    Ok(BoundingBox::from_corners(min, max))
}

/// Mean of the vertex coordinates.
///
/// This is the vertex centroid, not the area centroid; the two differ for
/// unevenly spaced or non-convex outlines.
pub fn centroid_of(vertices: &[Vec2]) -> Result<Vec2> {
    if vertices.is_empty() {
        return Err(Error::EmptyInput);
    }
    let sum = vertices.iter().fold(Vec2::ZERO, |acc, v| acc + *v);
    Ok(sum * (1.0 / vertices.len() as f32))
}
