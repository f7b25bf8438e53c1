use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use tracing::trace;

use crate::collision::{Arbiter, ArbiterKey, LINEAR_SLOP};
use crate::dynamics::{Body, BodyDef, BodyType};
use crate::math::Vec2;

/// Index of a body slot. Slots are never reused, so a handle to a destroyed
/// body stays dead.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub usize);

#[derive(Copy, Clone, Debug)]
pub struct WorldConfig {
    pub accumulate_impulses: bool,
    pub warm_starting: bool,
    /// Run the position solver after integration.
    pub position_correction: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            accumulate_impulses: true,
            warm_starting: true,
            position_correction: true,
        }
    }
}

pub struct World {
    pub gravity: Vec2,
    pub config: WorldConfig,
    pub arbiters: BTreeMap<ArbiterKey, Arbiter>,
    bodies: Vec<Option<Body>>,
}

impl World {
    #[inline]
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            config: WorldConfig::default(),
            arbiters: BTreeMap::new(),
            bodies: Vec::new(),
        }
    }

    pub fn with_config(gravity: Vec2, config: WorldConfig) -> Self {
        Self {
            config,
            ..Self::new(gravity)
        }
    }

    pub fn create_body(&mut self, def: BodyDef) -> BodyHandle {
        let id = self.bodies.len();
        self.bodies.push(Some(Body::from_def(def)));
        BodyHandle(id)
    }

    /// Remove a body and every contact it takes part in.
    pub fn destroy_body(&mut self, h: BodyHandle) -> Option<Body> {
        let body = self.bodies.get_mut(h.0)?.take()?;
        self.arbiters.retain(|key, _| !key.involves(h));
        Some(body)
    }

    #[inline]
    pub fn body(&self, h: BodyHandle) -> Option<&Body> {
        self.bodies.get(h.0)?.as_ref()
    }

    #[inline]
    pub fn body_mut(&mut self, h: BodyHandle) -> Option<&mut Body> {
        self.bodies.get_mut(h.0)?.as_mut()
    }

    #[inline]
    pub fn contains(&self, h: BodyHandle) -> bool {
        self.body(h).is_some()
    }

    /// Live bodies in creation order.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.bodies
            .iter()
            .enumerate()
            .filter_map(|(i, b)| b.as_ref().map(|b| (BodyHandle(i), b)))
    }

    pub fn body_count(&self) -> usize {
        self.bodies.iter().flatten().count()
    }

    pub fn bodies_two_mut(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
    ) -> Option<(&mut Body, &mut Body)> {
        bodies_two_mut(&mut self.bodies, a, b)
    }

    /// Kills every body. Slots stay allocated so old handles remain dead.
    pub fn clear(&mut self) {
        self.bodies.iter_mut().for_each(|b| *b = None);
        self.arbiters.clear();
    }

    pub fn broad_phase(&mut self) {
        // O(n^2) broad-phase over fixture pairs, pruned by bounding boxes.
        let n = self.bodies.len();
        for i in 0..n {
            let Some(bi) = &self.bodies[i] else {
                continue;
            };
            let xf_i = bi.transform();

            for j in i + 1..n {
                let Some(bj) = &self.bodies[j] else {
                    continue;
                };

                if !bi.is_dynamic() && !bj.is_dynamic() {
                    continue;
                }
                let xf_j = bj.transform();

                for (fi, fa) in bi.fixtures().iter().enumerate() {
                    let aabb_a = fa.shape.aabb(&xf_i);

                    for (fj, fb) in bj.fixtures().iter().enumerate() {
                        let key = ArbiterKey::new(BodyHandle(i), fi, BodyHandle(j), fj);

                        if !aabb_a.overlaps(&fb.shape.aabb(&xf_j)) {
                            self.arbiters.remove(&key);
                            continue;
                        }

                        let new_arb = Arbiter::new(key, fa, &xf_i, fb, &xf_j);

                        if new_arb.num_contacts > 0 {
                            match self.arbiters.entry(key) {
                                Entry::Vacant(e) => {
                                    e.insert(new_arb);
                                }
                                Entry::Occupied(mut e) => {
                                    let arb = e.get_mut();
                                    arb.update(
                                        &new_arb.contacts[..new_arb.num_contacts],
                                        self.config.warm_starting,
                                    );
                                    arb.friction = new_arb.friction;
                                    arb.restitution = new_arb.restitution;
                                }
                            }
                        } else {
                            self.arbiters.remove(&key);
                        }
                    }
                }
            }
        }
    }

    /// Advance the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f32, velocity_iterations: u32, position_iterations: u32) {
        let inv_dt = if dt <= 0.0 { 0.0 } else { 1.0 / dt };

        self.broad_phase();

        // Split world so we can borrow parts at the same time.
        let World {
            bodies,
            arbiters,
            gravity,
            config,
        } = self;

        // Integrate forces.
        for b in bodies.iter_mut().flatten() {
            if b.body_type != BodyType::Dynamic {
                continue;
            }
            b.velocity += dt * (*gravity + b.inv_mass * b.force);
            b.angular_velocity += dt * b.inv_i * b.torque;
        }

        // Perform pre-steps.
        for arb in arbiters.values_mut() {
            arb.pre_step(bodies, config);
        }

        // Perform iterations
        for _ in 0..velocity_iterations {
            for arb in arbiters.values_mut() {
                arb.apply_impulse(bodies, config);
            }
        }

        let starts: Vec<Option<(Vec2, f32)>> = bodies
            .iter()
            .map(|b| b.as_ref().map(|b| (b.world_center(), b.rotation)))
            .collect();

        // Integrate Velocities.
        for b in bodies.iter_mut().flatten() {
            if b.body_type != BodyType::Static {
                let center = b.world_center() + dt * b.velocity;
                let rotation = b.rotation + dt * b.angular_velocity;
                b.set_center(center, rotation);
            }

            b.force.set(0.0, 0.0);
            b.torque = 0.0;
        }

        if config.position_correction {
            for _ in 0..position_iterations {
                let mut min_separation: f32 = 0.0;
                for arb in arbiters.values_mut() {
                    min_separation = min_separation.min(arb.solve_position(bodies, &starts));
                }
                if min_separation >= -3.0 * LINEAR_SLOP {
                    break;
                }
            }
        }

        trace!(
            dt,
            inv_dt,
            contacts = arbiters.len(),
            "world stepped"
        );
    }
}

pub fn bodies_two_mut(
    bodies: &mut [Option<Body>],
    a: BodyHandle,
    b: BodyHandle,
) -> Option<(&mut Body, &mut Body)> {
    if a == b || a.0 >= bodies.len() || b.0 >= bodies.len() {
        return None;
    }

    let (i, j) = if a.0 <= b.0 { (a.0, b.0) } else { (b.0, a.0) };
    let (left, right) = bodies.split_at_mut(j);
    let bi = left[i].as_mut()?;
    let bj = right[0].as_mut()?;

    if a.0 < b.0 { Some((bi, bj)) } else { Some((bj, bi)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::{FixtureDef, Material, Shape};
    use approx::assert_relative_eq;

    fn boxed(world: &mut World, body_type: BodyType, position: Vec2) -> BodyHandle {
        let h = world.create_body(BodyDef {
            body_type,
            position,
            ..Default::default()
        });
        world
            .body_mut(h)
            .unwrap()
            .create_fixture(FixtureDef::new(Shape::rect(0.5, 0.5), Material::default()));
        h
    }

    #[test]
    fn create_body_returns_valid_handle() {
        let mut world = World::new(Vec2::new(0.0, -10.0));
        let h = boxed(&mut world, BodyType::Dynamic, Vec2::ZERO);

        let b = world.body(h).unwrap();
        assert_relative_eq!(b.mass, 1.0, epsilon = 1e-5);
        assert_eq!(world.body_count(), 1);
    }

    #[test]
    fn step_static_body_does_not_move() {
        let mut world = World::new(Vec2::new(0.0, -10.0));
        let h = boxed(&mut world, BodyType::Static, Vec2::new(0.0, 5.0));

        world.step(0.1, 6, 2);

        let b = world.body(h).unwrap();
        assert_relative_eq!(b.position.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(b.position.y, 5.0, epsilon = 1e-6);
        assert_relative_eq!(b.velocity.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn step_dynamic_body_accelerates_under_gravity() {
        let mut world = World::new(Vec2::new(0.0, -10.0));
        let h = boxed(&mut world, BodyType::Dynamic, Vec2::ZERO);

        let dt = 0.1;
        world.step(dt, 6, 2);

        let b = world.body(h).unwrap();

        // v.y = -10 * 0.1 = -1
        assert_relative_eq!(b.velocity.y, -1.0, epsilon = 1e-6);

        // pos += dt * v => y = 0 + 0.1 * (-1) = -0.1
        assert_relative_eq!(b.position.y, -0.1, epsilon = 1e-6);
    }

    #[test]
    fn kinematic_body_ignores_gravity_but_keeps_velocity() {
        let mut world = World::new(Vec2::new(0.0, -10.0));
        let h = boxed(&mut world, BodyType::Kinematic, Vec2::ZERO);
        world.body_mut(h).unwrap().set_velocity(Vec2::new(2.0, 0.0));

        world.step(0.5, 6, 2);

        let b = world.body(h).unwrap();
        assert_relative_eq!(b.position.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(b.position.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(b.velocity.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn forces_are_cleared_after_step() {
        let mut world = World::new(Vec2::ZERO);
        let h = boxed(&mut world, BodyType::Dynamic, Vec2::ZERO);

        {
            let b = world.body_mut(h).unwrap();
            b.add_force(Vec2::new(3.0, 4.0));
            b.torque = 2.0;
        }

        world.step(0.1, 6, 2);

        let b = world.body(h).unwrap();
        assert_relative_eq!(b.velocity.x, 0.3, epsilon = 1e-5);
        assert_eq!(b.force, Vec2::ZERO);
        assert_relative_eq!(b.torque, 0.0);
    }

    #[test]
    fn destroyed_bodies_leave_a_dead_slot() {
        let mut world = World::new(Vec2::ZERO);
        let a = boxed(&mut world, BodyType::Dynamic, Vec2::ZERO);
        let b = boxed(&mut world, BodyType::Static, Vec2::new(0.0, -0.9));

        world.step(1.0 / 60.0, 6, 2);
        assert!(!world.arbiters.is_empty());

        assert!(world.destroy_body(a).is_some());
        assert!(world.destroy_body(a).is_none());
        assert!(world.arbiters.is_empty());
        assert!(!world.contains(a));
        assert!(world.contains(b));

        let c = boxed(&mut world, BodyType::Dynamic, Vec2::ZERO);
        assert_ne!(a, c);
        let handles: Vec<BodyHandle> = world.bodies().map(|(h, _)| h).collect();
        assert_eq!(handles, vec![b, c]);
    }

    #[test]
    fn clear_does_not_recycle_handles() {
        let mut world = World::new(Vec2::ZERO);
        let old = boxed(&mut world, BodyType::Dynamic, Vec2::ZERO);

        world.clear();
        assert_eq!(world.body_count(), 0);
        assert!(world.arbiters.is_empty());

        let fresh = boxed(&mut world, BodyType::Static, Vec2::new(5.0, 5.0));
        assert_ne!(old, fresh);
        assert!(world.body(old).is_none());
        assert!(world.contains(fresh));
    }

    #[test]
    fn bodies_two_mut_rejects_same_or_dead_handles() {
        let mut world = World::new(Vec2::ZERO);
        let a = boxed(&mut world, BodyType::Dynamic, Vec2::ZERO);
        let b = boxed(&mut world, BodyType::Dynamic, Vec2::new(3.0, 0.0));

        assert!(world.bodies_two_mut(a, a).is_none());
        let (bb, ba) = world.bodies_two_mut(b, a).unwrap();
        assert_relative_eq!(bb.position.x, 3.0);
        assert_relative_eq!(ba.position.x, 0.0);

        world.destroy_body(b);
        assert!(world.bodies_two_mut(a, b).is_none());
    }
}
