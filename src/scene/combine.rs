use tracing::debug;

use crate::dynamics::{BodyDef, BodyHandle, BodyType, Fixture, FixtureDef};
use crate::error::{Error, Result};
use crate::geometry::{BoundingBox, bounding_box_of};
use crate::math::{Transform, Vec2};
use crate::scene::{ActorHandle, ActorKind, Scene};

impl Scene {
    /// Merges several actors into one rigid body.
    ///
    /// Every fixture keeps its place in the world: fixtures are re-expressed
    /// around the center of the sources' combined bounding box, which becomes
    /// the new body origin. Sources are destroyed. Duplicate handles count
    /// once. An unknown handle fails before anything is touched.
    pub fn combine(&mut self, motion: BodyType, handles: &[ActorHandle]) -> Result<ActorHandle> {
        if handles.is_empty() {
            return Err(Error::EmptyCombine);
        }

        let mut sources: Vec<(ActorHandle, BodyHandle)> = Vec::with_capacity(handles.len());
        for &handle in handles {
            if sources.iter().any(|(h, _)| *h == handle) {
                continue;
            }
            let actor = self.actor(handle).ok_or(Error::UnknownActor(handle.id()))?;
            sources.push((handle, actor.body));
        }

        let mut placed: Vec<(Fixture, Transform)> = Vec::new();
        let mut points: Vec<Vec2> = Vec::new();
        for (handle, body) in &sources {
            let body = self
                .world
                .body(*body)
                .ok_or(Error::UnknownActor(handle.id()))?;
            let xf = body.transform();
            for fixture in body.fixtures() {
                points.extend(fixture.shape.world_points(&xf));
                placed.push((fixture.clone(), xf));
            }
        }

        let bounds = bounding_box_of(&points)?;
        let center = bounds.center();

        let combined = self.world.create_body(BodyDef {
            body_type: motion,
            position: center,
            ..Default::default()
        });
        if let Some(body) = self.world.body_mut(combined) {
            for (fixture, xf) in placed {
                let local = Transform {
                    position: xf.position - center,
                    rotation: xf.rotation,
                };
                body.create_fixture(FixtureDef::new(
                    fixture.shape.transformed(&local),
                    fixture.material,
                ));
            }
        }

        for (handle, _) in &sources {
            self.destroy(*handle);
        }

        let px = bounds.scaled(self.scale.meter_size());
        let handle = self.register(combined, ActorKind::Polygon, px.width, px.height);
        debug!(
            %handle,
            ?motion,
            sources = sources.len(),
            fixtures = self.world.body(combined).map_or(0, |b| b.fixtures().len()),
            "actors combined"
        );
        Ok(handle)
    }

    /// Pixel-space bounding box of everything attached to the actor.
    pub fn world_bounds(&self, handle: ActorHandle) -> Option<BoundingBox> {
        let body = self.body_of(handle)?;
        let xf = body.transform();
        let points: Vec<Vec2> = body
            .fixtures()
            .iter()
            .flat_map(|f| f.shape.world_points(&xf))
            .collect();
        bounding_box_of(&points)
            .ok()
            .map(|b| b.scaled(self.scale.meter_size()))
    }
}
