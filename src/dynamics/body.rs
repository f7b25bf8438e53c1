use core::str::FromStr;

use tracing::warn;

use crate::dynamics::{Fixture, FixtureDef};
use crate::error::Error;
use crate::math::{Mat22, Transform, Vec2};

/// How a body responds to the simulation.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum BodyType {
    /// Immovable, infinite mass.
    #[default]
    Static,
    /// Moves by its own velocity only; forces and contacts don't affect it.
    Kinematic,
    /// Full response to gravity, forces and contacts.
    Dynamic,
}

impl FromStr for BodyType {
    type Err = Error;

    /// Accepts the one-letter tokens `d`, `s` and `k` in either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "d" => Ok(BodyType::Dynamic),
            "s" => Ok(BodyType::Static),
            "k" => Ok(BodyType::Kinematic),
            _ => {
                warn!(token = s, "invalid motion type, expected d, s or k");
                Err(Error::InvalidMotionType(s.to_owned()))
            }
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct BodyDef {
    pub body_type: BodyType,
    pub position: Vec2,
    pub rotation: f32,
    pub velocity: Vec2,
    pub angular_velocity: f32,
}

#[derive(Clone, Debug)]
pub struct Body {
    pub body_type: BodyType,

    /// Body origin in world space.
    pub position: Vec2,
    pub rotation: f32,

    pub velocity: Vec2,
    pub angular_velocity: f32,

    pub force: Vec2,
    pub torque: f32,

    pub mass: f32,
    pub inv_mass: f32,
    pub inertia: f32,
    pub inv_i: f32,

    /// Center of mass relative to the origin, in body space.
    pub local_center: Vec2,

    fixtures: Vec<Fixture>,
}

impl Body {
    #[inline]
    pub fn from_def(def: BodyDef) -> Self {
        let mut body = Self {
            body_type: def.body_type,
            position: def.position,
            rotation: def.rotation,
            velocity: def.velocity,
            angular_velocity: def.angular_velocity,
            force: Vec2::ZERO,
            torque: 0.0,
            mass: 0.0,
            inv_mass: 0.0,
            inertia: 0.0,
            inv_i: 0.0,
            local_center: Vec2::ZERO,
            fixtures: Vec::new(),
        };
        if body.body_type == BodyType::Static {
            body.velocity = Vec2::ZERO;
            body.angular_velocity = 0.0;
        }
        body.reset_mass_data();
        body
    }

    /// Attach a fixture and return its index on this body.
    pub fn create_fixture(&mut self, def: FixtureDef) -> usize {
        self.fixtures.push(def.into());
        self.reset_mass_data();
        self.fixtures.len() - 1
    }

    #[inline]
    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    /// Callers that change densities must follow up with `reset_mass_data`.
    #[inline]
    pub fn fixtures_mut(&mut self) -> &mut [Fixture] {
        &mut self.fixtures
    }

    /// Recompute mass, inertia and center of mass from the fixtures.
    ///
    /// A dynamic body whose fixtures have no mass gets unit mass so it still
    /// falls.
    pub fn reset_mass_data(&mut self) {
        let old_center = self.world_center();

        self.mass = 0.0;
        self.inv_mass = 0.0;
        self.inertia = 0.0;
        self.inv_i = 0.0;
        self.local_center = Vec2::ZERO;

        if self.body_type != BodyType::Dynamic {
            return;
        }

        let mut center = Vec2::ZERO;
        let mut inertia = 0.0;
        for fixture in &self.fixtures {
            if fixture.material.density == 0.0 {
                continue;
            }
            let md = fixture.shape.compute_mass(fixture.material.density);
            self.mass += md.mass;
            center += md.mass * md.center;
            inertia += md.inertia;
        }

        if self.mass > 0.0 {
            self.inv_mass = 1.0 / self.mass;
            center *= self.inv_mass;
        } else {
            self.mass = 1.0;
            self.inv_mass = 1.0;
        }

        if inertia > 0.0 {
            // Inertia was accumulated about the origin; move it to the center.
            self.inertia = inertia - self.mass * center.dot(center);
            debug_assert!(self.inertia > 0.0);
            self.inv_i = 1.0 / self.inertia;
        }

        self.local_center = center;
        let new_center = self.world_center();

        // Keep the velocity of the new center consistent.
        self.velocity += Vec2::cross_scalar_vec(self.angular_velocity, new_center - old_center);
    }

    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.body_type == BodyType::Dynamic
    }

    #[inline]
    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.rotation)
    }

    /// Center of mass in world space.
    #[inline]
    pub fn world_center(&self) -> Vec2 {
        self.position + Mat22::from_angle(self.rotation) * self.local_center
    }

    /// Move the body so its center of mass lands on `center` with `rotation`.
    #[inline]
    pub fn set_center(&mut self, center: Vec2, rotation: f32) {
        self.rotation = rotation;
        self.position = center - Mat22::from_angle(rotation) * self.local_center;
    }

    #[inline]
    pub fn add_force(&mut self, f: Vec2) {
        if self.is_dynamic() {
            self.force += f;
        }
    }

    #[inline]
    pub fn apply_linear_impulse(&mut self, impulse: Vec2) {
        if self.is_dynamic() {
            self.velocity += self.inv_mass * impulse;
        }
    }

    /// Static bodies ignore velocity changes.
    #[inline]
    pub fn set_velocity(&mut self, v: Vec2) {
        if self.body_type != BodyType::Static {
            self.velocity = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::{Material, Shape};
    use approx::assert_relative_eq;

    fn unit_box() -> FixtureDef {
        FixtureDef::new(Shape::rect(0.5, 0.5), Material::default())
    }

    #[test]
    fn parses_motion_tokens() {
        assert_eq!("d".parse::<BodyType>(), Ok(BodyType::Dynamic));
        assert_eq!("S".parse::<BodyType>(), Ok(BodyType::Static));
        assert_eq!("k".parse::<BodyType>(), Ok(BodyType::Kinematic));
        assert_eq!(
            "x".parse::<BodyType>(),
            Err(Error::InvalidMotionType("x".into()))
        );
    }

    #[test]
    fn static_body_has_zero_inverse_mass_and_inertia() {
        let mut b = Body::from_def(BodyDef::default());
        b.create_fixture(unit_box());

        assert_relative_eq!(b.inv_mass, 0.0);
        assert_relative_eq!(b.inv_i, 0.0);
        assert_eq!(b.fixtures().len(), 1);
    }

    #[test]
    fn dynamic_body_mass_comes_from_density() {
        let mut b = Body::from_def(BodyDef {
            body_type: BodyType::Dynamic,
            ..Default::default()
        });
        b.create_fixture(FixtureDef::new(
            Shape::rect(1.0, 2.0),
            Material {
                density: 3.0,
                ..Default::default()
            },
        ));

        // 2 x 4 box at density 3.
        let mass = 24.0;
        assert_relative_eq!(b.mass, mass, epsilon = 1e-4);
        assert_relative_eq!(b.inv_mass, 1.0 / mass, epsilon = 1e-6);

        let i = mass * (2.0 * 2.0 + 4.0 * 4.0) / 12.0;
        assert_relative_eq!(b.inv_i, 1.0 / i, epsilon = 1e-6);
    }

    #[test]
    fn massless_dynamic_body_gets_unit_mass() {
        let mut b = Body::from_def(BodyDef {
            body_type: BodyType::Dynamic,
            ..Default::default()
        });
        b.create_fixture(FixtureDef::new(
            Shape::edge(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)),
            Material::default(),
        ));
        assert_relative_eq!(b.mass, 1.0);
        assert_relative_eq!(b.inv_i, 0.0);
    }

    #[test]
    fn off_center_fixture_moves_the_center_of_mass() {
        let mut b = Body::from_def(BodyDef {
            body_type: BodyType::Dynamic,
            position: Vec2::new(10.0, 0.0),
            ..Default::default()
        });
        b.create_fixture(FixtureDef::new(
            Shape::Circle {
                center: Vec2::new(1.0, 0.0),
                radius: 0.5,
            },
            Material::default(),
        ));

        assert_relative_eq!(b.local_center.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(b.local_center.y, 0.0, epsilon = 1e-6);
        let c = b.world_center();
        assert_relative_eq!(c.x, 11.0, epsilon = 1e-6);

        b.set_center(Vec2::new(0.0, 0.0), core::f32::consts::PI);
        assert_relative_eq!(b.position.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(b.position.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn forces_only_accumulate_on_dynamic_bodies() {
        let mut d = Body::from_def(BodyDef {
            body_type: BodyType::Dynamic,
            ..Default::default()
        });
        d.add_force(Vec2::new(1.0, 2.0));
        d.add_force(Vec2::new(-0.5, 3.0));
        assert_relative_eq!(d.force.x, 0.5, epsilon = 1e-6);
        assert_relative_eq!(d.force.y, 5.0, epsilon = 1e-6);

        let mut k = Body::from_def(BodyDef {
            body_type: BodyType::Kinematic,
            ..Default::default()
        });
        k.add_force(Vec2::new(1.0, 0.0));
        k.apply_linear_impulse(Vec2::new(1.0, 0.0));
        assert_eq!(k.force, Vec2::ZERO);
        assert_eq!(k.velocity, Vec2::ZERO);

        k.set_velocity(Vec2::new(2.0, 0.0));
        assert_eq!(k.velocity, Vec2::new(2.0, 0.0));
    }
}
