use macroquad::texture::Texture2D;

use crate::dynamics::{Body, Material};
use crate::math::{Vec2, rad_to_deg};
use crate::render::Sprite;
use crate::scene::{ActorHandle, Scene};

/// Chained setters for one actor, obtained from [`Scene::edit`].
///
/// ```ignore
/// scene
///     .edit(ball)
///     .unwrap()
///     .density(2.0)
///     .restitution(0.8)
///     .constant_velocity(Vec2::new(120.0, 0.0));
/// ```
pub struct ActorEditor<'a> {
    scene: &'a mut Scene,
    index: usize,
}

impl<'a> ActorEditor<'a> {
    pub(crate) fn new(scene: &'a mut Scene, index: usize) -> Self {
        Self { scene, index }
    }

    pub fn handle(&self) -> ActorHandle {
        self.scene.actors[self.index].handle
    }

    fn body_mut(&mut self) -> Option<&mut Body> {
        let body = self.scene.actors[self.index].body;
        self.scene.world.body_mut(body)
    }

    fn update_materials(&mut self, f: impl Fn(&mut Material)) -> &mut Self {
        if let Some(body) = self.body_mut() {
            for fixture in body.fixtures_mut() {
                f(&mut fixture.material);
            }
            body.reset_mass_data();
        }
        self
    }

    /// Sets density on every fixture and recomputes mass.
    pub fn density(&mut self, density: f32) -> &mut Self {
        self.update_materials(|m| m.density = density)
    }

    pub fn friction(&mut self, friction: f32) -> &mut Self {
        self.update_materials(|m| m.friction = friction)
    }

    pub fn restitution(&mut self, restitution: f32) -> &mut Self {
        self.update_materials(|m| m.restitution = restitution)
    }

    /// Pixels per second, held after every step. Zero clears the override.
    pub fn constant_velocity(&mut self, velocity: Vec2) -> &mut Self {
        let v = self.scene.scale.vec_to_sim(velocity);
        let slot = &mut self.scene.actors[self.index].constant_velocity;
        *slot = if v.is_zero() { None } else { Some(v) };
        self
    }

    /// Force in newtons for the next step. Non-dynamic bodies ignore it.
    pub fn apply_force(&mut self, force: Vec2) -> &mut Self {
        if let Some(body) = self.body_mut() {
            body.add_force(force);
        }
        self
    }

    /// Like [`apply_force`](Self::apply_force) but multiplied by the body's
    /// mass, so `force` acts as an acceleration.
    pub fn apply_force_scaled(&mut self, force: Vec2) -> &mut Self {
        if let Some(body) = self.body_mut() {
            let mass = body.mass;
            body.add_force(mass * force);
        }
        self
    }

    /// Attaches a sprite stretched to the actor's size and centered on it.
    pub fn sprite(&mut self, mut sprite: Sprite) -> &mut Self {
        let meter = self.scene.scale.meter_size();
        let actor = &self.scene.actors[self.index];
        sprite.fit(actor.width, actor.height);
        if let Some(body) = self.scene.world.body(actor.body) {
            sprite.center_on(body.position * meter, rad_to_deg(body.rotation));
        }
        self.scene.actors[self.index].sprite = Some(sprite);
        self
    }

    /// Same as [`sprite`](Self::sprite) with the texture's own size.
    pub fn texture(&mut self, texture: Texture2D) -> &mut Self {
        self.sprite(Sprite::new(texture))
    }

    pub fn clear_sprite(&mut self) -> &mut Self {
        self.scene.actors[self.index].sprite = None;
        self
    }
}
