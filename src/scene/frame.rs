use tracing::trace;

use crate::math::rad_to_deg;
use crate::render::debug;
use crate::scene::Scene;

impl Scene {
    /// Advances the world by `dt` seconds, then re-applies velocity
    /// overrides and moves sprites onto their bodies.
    pub fn update(&mut self, dt: f32) {
        self.world.step(
            dt,
            self.config.velocity_iterations,
            self.config.position_iterations,
        );

        let meter = self.scale.meter_size();
        let mut synced = 0usize;
        for actor in &mut self.actors {
            let Some(body) = self.world.body_mut(actor.body) else {
                continue;
            };
            if let Some(v) = actor.constant_velocity {
                body.set_velocity(v);
            }
            if let Some(sprite) = actor.sprite.as_mut() {
                sprite.center_on(body.position * meter, rad_to_deg(body.rotation));
                synced += 1;
            }
        }
        trace!(dt, actors = self.actors.len(), sprites = synced, "scene updated");
    }

    /// Draws sprites, then fixture outlines and markers when debug is on.
    pub fn draw(&self) {
        for sprite in self.actors.iter().filter_map(|a| a.sprite.as_ref()) {
            sprite.draw(&self.camera);
        }

        if !self.config.debug {
            return;
        }
        debug::draw_world(&self.world, &self.camera);
        for (_, body) in self.world.bodies() {
            debug::draw_markers(body, &self.camera);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::SceneConfig;
    use crate::dynamics::BodyType;
    use crate::math::Vec2;
    use crate::render::Sprite;
    use crate::scene::Scene;
    use approx::assert_relative_eq;

    #[test]
    fn dynamic_ball_falls() {
        let mut s = Scene::new(SceneConfig::default()).unwrap();
        let h = s.new_ball(BodyType::Dynamic, 100.0, 500.0, 10.0);
        for _ in 0..30 {
            s.update(1.0 / 60.0);
        }
        let p = s.position_of(h).unwrap();
        assert!(p.y < 500.0);
        assert_relative_eq!(p.x, 100.0, epsilon = 1e-3);
    }

    #[test]
    fn velocity_override_wins_over_gravity() {
        let mut s = Scene::new(SceneConfig::default()).unwrap();
        let h = s.new_box(BodyType::Dynamic, 0.0, 300.0, 20.0, 20.0);
        s.edit(h).unwrap().constant_velocity(Vec2::new(100.0, 0.0));

        for _ in 0..10 {
            s.update(0.1);
        }
        let body = s.body_of(h).unwrap();
        assert_eq!(body.velocity, Vec2::new(1.0, 0.0));
        // Gravity still acts inside each step before the override lands.
        assert!(body.position.y < 3.1);
        assert!(body.position.x > 0.8);
    }

    #[test]
    fn sprites_follow_bodies() {
        let mut s = Scene::new(SceneConfig::default()).unwrap();
        let h = s.new_ball(BodyType::Dynamic, 200.0, 400.0, 16.0);
        let sprite = Sprite::untextured(Vec2::new(32.0, 32.0));
        s.edit(h).unwrap().sprite(sprite);

        for _ in 0..20 {
            s.update(1.0 / 60.0);
        }

        let pos = s.position_of(h).unwrap();
        let sprite = s.actor(h).unwrap().sprite().unwrap();
        assert_relative_eq!(sprite.position.x, pos.x - 16.0, epsilon = 1e-3);
        assert_relative_eq!(sprite.position.y, pos.y - 16.0, epsilon = 1e-3);
        let c = sprite.drawn_center();
        assert_relative_eq!(c.x, pos.x, epsilon = 1e-3);
        assert_relative_eq!(c.y, pos.y, epsilon = 1e-3);
    }

    #[test]
    fn static_bodies_do_not_move() {
        let mut s = Scene::new(SceneConfig::default()).unwrap();
        let h = s.new_box(BodyType::Static, 0.0, 0.0, 800.0, 20.0);
        s.update(1.0 / 60.0);
        let p = s.position_of(h).unwrap();
        assert_relative_eq!(p.x, 400.0, epsilon = 1e-3);
        assert_relative_eq!(p.y, 10.0, epsilon = 1e-3);
    }
}
