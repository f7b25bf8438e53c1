use core::fmt;

use crate::dynamics::BodyHandle;
use crate::math::Vec2;
use crate::render::Sprite;

/// Stable id of an actor in a [`Scene`](crate::Scene). Never reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ActorHandle(pub(crate) u64);

impl ActorHandle {
    #[inline]
    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ActorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ActorKind {
    Ball,
    Box,
    Polygon,
}

/// A body plus the pixel-space state the scene keeps next to it.
#[derive(Debug)]
pub struct Actor {
    pub(crate) handle: ActorHandle,
    pub(crate) body: BodyHandle,
    pub(crate) kind: ActorKind,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) sprite: Option<Sprite>,
    /// Meters per second, re-applied after every step.
    pub(crate) constant_velocity: Option<Vec2>,
}

impl Actor {
    pub(crate) fn new(
        handle: ActorHandle,
        body: BodyHandle,
        kind: ActorKind,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            handle,
            body,
            kind,
            width,
            height,
            sprite: None,
            constant_velocity: None,
        }
    }

    pub fn handle(&self) -> ActorHandle {
        self.handle
    }

    pub fn body(&self) -> BodyHandle {
        self.body
    }

    pub fn kind(&self) -> ActorKind {
        self.kind
    }

    /// Display width in pixels.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Display height in pixels.
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn sprite(&self) -> Option<&Sprite> {
        self.sprite.as_ref()
    }

    pub fn constant_velocity(&self) -> Option<Vec2> {
        self.constant_velocity
    }
}
