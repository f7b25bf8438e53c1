//! Pixel-space scene on top of the physics world.
//!
//! A [`Scene`] owns the [`World`], the unit scale and a list of actors. Each
//! actor wraps one body and optionally a sprite that follows it. Creation
//! lives in `factory`, merging in `combine`, per-actor settings in `editor`
//! and the per-frame loop in `frame`.

mod actor;
mod combine;
mod editor;
mod factory;
mod frame;

pub use actor::{Actor, ActorHandle, ActorKind};
pub use editor::ActorEditor;

use macroquad::texture::Texture2D;
use tracing::debug;

use crate::config::SceneConfig;
use crate::dynamics::{Body, BodyHandle, World};
use crate::error::Result;
use crate::math::Vec2;
use crate::render::{AssetScope, Camera, TextureFilter, load_texture};
use crate::units::UnitScale;

pub struct Scene {
    world: World,
    scale: UnitScale,
    camera: Camera,
    config: SceneConfig,
    actors: Vec<Actor>,
    next_id: u64,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Result<Self> {
        let scale = UnitScale::new(config.meter_size)?;
        let camera = Camera::new(config.screen_width, config.screen_height, scale.meter_size());
        let world = World::with_config(config.gravity, config.world);

        Ok(Self {
            world,
            scale,
            camera,
            config,
            actors: Vec::new(),
            next_id: 0,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn units(&self) -> &UnitScale {
        &self.scale
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    #[inline]
    pub fn meter_size(&self) -> f32 {
        self.scale.meter_size()
    }

    /// Changes the pixel/meter ratio and rebuilds the camera.
    ///
    /// Bodies already created keep their simulation-space size.
    pub fn set_meter_size(&mut self, meter_size: f32) -> Result<()> {
        self.scale.set_meter_size(meter_size)?;
        self.config.meter_size = meter_size;
        self.rebuild_camera();
        debug!(meter_size, "meter size changed");
        Ok(())
    }

    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        self.config.screen_width = width;
        self.config.screen_height = height;
        self.rebuild_camera();
    }

    fn rebuild_camera(&mut self) {
        self.camera = Camera::new(
            self.config.screen_width,
            self.config.screen_height,
            self.scale.meter_size(),
        );
    }

    #[inline]
    pub fn to_sim(&self, pixels: f32) -> f32 {
        self.scale.to_sim(pixels)
    }

    #[inline]
    pub fn to_pixels(&self, sim: f32) -> f32 {
        self.scale.to_pixels(sim)
    }

    pub fn debug(&self) -> bool {
        self.config.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.config.debug = debug;
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    pub fn contains(&self, handle: ActorHandle) -> bool {
        self.index_of(handle).is_some()
    }

    pub fn actor(&self, handle: ActorHandle) -> Option<&Actor> {
        self.index_of(handle).map(|i| &self.actors[i])
    }

    pub fn body_of(&self, handle: ActorHandle) -> Option<&Body> {
        self.actor(handle).and_then(|a| self.world.body(a.body))
    }

    /// Body origin in pixels.
    pub fn position_of(&self, handle: ActorHandle) -> Option<Vec2> {
        self.body_of(handle).map(|b| self.scale.vec_to_pixels(b.position))
    }

    pub fn edit(&mut self, handle: ActorHandle) -> Option<ActorEditor<'_>> {
        let index = self.index_of(handle)?;
        Some(ActorEditor::new(self, index))
    }

    /// Removes the actor and its body. Unknown handles are ignored.
    pub fn destroy(&mut self, handle: ActorHandle) -> bool {
        let Some(index) = self.index_of(handle) else {
            debug!(%handle, "destroy ignored, no such actor");
            return false;
        };
        let actor = self.actors.remove(index);
        self.world.destroy_body(actor.body);
        debug!(%handle, kind = ?actor.kind, "actor destroyed");
        true
    }

    /// Drops every actor and body.
    pub fn clear(&mut self) {
        self.actors.clear();
        self.world.clear();
    }

    /// Loads a texture relative to the configured asset root.
    pub async fn load_texture(
        &self,
        scope: AssetScope,
        path: &str,
        filter: TextureFilter,
    ) -> Result<Texture2D> {
        load_texture(scope, &self.config.asset_root, path, filter).await
    }

    fn index_of(&self, handle: ActorHandle) -> Option<usize> {
        self.actors.iter().position(|a| a.handle == handle)
    }

    fn register(
        &mut self,
        body: BodyHandle,
        kind: ActorKind,
        width: f32,
        height: f32,
    ) -> ActorHandle {
        let handle = ActorHandle(self.next_id);
        self.next_id += 1;
        self.actors.push(Actor::new(handle, body, kind, width, height));
        handle
    }
}
