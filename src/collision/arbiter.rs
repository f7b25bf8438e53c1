use crate::collision::collide;
use crate::dynamics::{Body, BodyHandle, Fixture, WorldConfig, bodies_two_mut};
use crate::math::{Transform, Vec2};

/// Allowed overlap before the position solver pushes back.
pub const LINEAR_SLOP: f32 = 0.005;
/// Fraction of the overlap resolved per position iteration.
pub const BAUMGARTE: f32 = 0.2;
pub const MAX_LINEAR_CORRECTION: f32 = 0.2;
/// Approach speed below which contacts don't bounce.
pub const VELOCITY_THRESHOLD: f32 = 1.0;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct FeaturePair {
    pub in_edge1: u8,
    pub out_edge1: u8,
    pub in_edge2: u8,
    pub out_edge2: u8,
}

impl FeaturePair {
    #[inline]
    pub const fn new(in1: u8, out1: u8, in2: u8, out2: u8) -> Self {
        Self {
            in_edge1: in1,
            out_edge1: out1,
            in_edge2: in2,
            out_edge2: out2,
        }
    }

    /// Pack into a stable 32-bit key (little-endian layout).
    #[inline]
    pub const fn key(self) -> u32 {
        (self.in_edge1 as u32)
            | ((self.out_edge1 as u32) << 8)
            | ((self.in_edge2 as u32) << 16)
            | ((self.out_edge2 as u32) << 24)
    }

    /// Inverse of `key()`.
    #[inline]
    pub const fn from_key(v: u32) -> Self {
        Self {
            in_edge1: (v & 0xFF) as u8,
            out_edge1: ((v >> 8) & 0xFF) as u8,
            in_edge2: ((v >> 16) & 0xFF) as u8,
            out_edge2: ((v >> 24) & 0xFF) as u8,
        }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Contact {
    pub position: Vec2,
    pub normal: Vec2,
    pub r1: Vec2,
    pub r2: Vec2,
    pub separation: f32,
    pub pn: f32, // accumulated normal impulse
    pub pt: f32, // accumulated tangent impulse
    pub mass_normal: f32,
    pub mass_tangent: f32,
    pub bias: f32, // restitution target speed
    pub feature: FeaturePair,
}

/// One fixture pair, ordered by body handle.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ArbiterKey {
    pub body1: BodyHandle,
    pub fixture1: usize,
    pub body2: BodyHandle,
    pub fixture2: usize,
}

impl ArbiterKey {
    #[inline]
    pub fn new(b1: BodyHandle, f1: usize, b2: BodyHandle, f2: usize) -> Self {
        if b1 <= b2 {
            Self {
                body1: b1,
                fixture1: f1,
                body2: b2,
                fixture2: f2,
            }
        } else {
            Self {
                body1: b2,
                fixture1: f2,
                body2: b1,
                fixture2: f1,
            }
        }
    }

    #[inline]
    pub fn involves(&self, h: BodyHandle) -> bool {
        self.body1 == h || self.body2 == h
    }
}

pub const MAX_POINTS: usize = 2;

pub struct Arbiter {
    pub contacts: [Contact; MAX_POINTS],
    pub num_contacts: usize,

    pub key: ArbiterKey,

    pub friction: f32,
    pub restitution: f32,
}

impl Arbiter {
    /// `fixture1`/`xf1` must belong to `key.body1`.
    #[inline]
    pub fn new(
        key: ArbiterKey,
        fixture1: &Fixture,
        xf1: &Transform,
        fixture2: &Fixture,
        xf2: &Transform,
    ) -> Self {
        let mut contacts = [Contact::default(); MAX_POINTS];
        let num_contacts = collide(&mut contacts, &fixture1.shape, xf1, &fixture2.shape, xf2);

        Self {
            contacts,
            num_contacts,
            key,
            friction: (fixture1.material.friction * fixture2.material.friction).sqrt(),
            restitution: fixture1.material.restitution.max(fixture2.material.restitution),
        }
    }

    #[inline]
    pub fn update(&mut self, new_contacts: &[Contact], warm_starting: bool) {
        debug_assert!(new_contacts.len() <= MAX_POINTS);

        let mut merged_contacts = [Contact::default(); MAX_POINTS];

        for (i, new_c) in new_contacts.iter().enumerate() {
            let k = self.contacts[..self.num_contacts]
                .iter()
                .position(|old_c| new_c.feature.key() == old_c.feature.key());

            // Copy out new_c.
            let mut c = *new_c;

            if let Some(j) = k {
                if warm_starting {
                    let c_old = &self.contacts[j];
                    c.pn = c_old.pn;
                    c.pt = c_old.pt;
                } else {
                    c.pn = 0.0;
                    c.pt = 0.0;
                }
            }
            merged_contacts[i] = c;
        }
        self.contacts[..new_contacts.len()].copy_from_slice(&merged_contacts[..new_contacts.len()]);
        self.num_contacts = new_contacts.len();
    }

    pub fn pre_step(&mut self, bodies: &mut [Option<Body>], config: &WorldConfig) {
        let Some((body1, body2)) = bodies_two_mut(bodies, self.key.body1, self.key.body2) else {
            return;
        };
        let center1 = body1.world_center();
        let center2 = body2.world_center();

        for c in &mut self.contacts[..self.num_contacts] {
            let r1 = c.position - center1;
            let r2 = c.position - center2;
            c.r1 = r1;
            c.r2 = r2;

            // Precompute normal mass, tangent mass, and bias.
            let rn1 = r1.dot(c.normal);
            let rn2 = r2.dot(c.normal);
            let mut k_normal = body1.inv_mass + body2.inv_mass;
            k_normal +=
                body1.inv_i * (r1.dot(r1) - rn1 * rn1) + body2.inv_i * (r2.dot(r2) - rn2 * rn2);
            c.mass_normal = 1.0 / k_normal;

            let tangent = Vec2::cross_vec_scalar(c.normal, 1.0);
            let rt1 = r1.dot(tangent);
            let rt2 = r2.dot(tangent);
            let mut k_tangent = body1.inv_mass + body2.inv_mass;
            k_tangent +=
                body1.inv_i * (r1.dot(r1) - rt1 * rt1) + body2.inv_i * (r2.dot(r2) - rt2 * rt2);
            c.mass_tangent = 1.0 / k_tangent;

            let dv = body2.velocity + Vec2::cross_scalar_vec(body2.angular_velocity, r2)
                - body1.velocity
                - Vec2::cross_scalar_vec(body1.angular_velocity, r1);
            let vn = dv.dot(c.normal);
            c.bias = if vn < -VELOCITY_THRESHOLD {
                -self.restitution * vn
            } else {
                0.0
            };

            if config.accumulate_impulses {
                // Apply normal + friction impulse
                let p = c.pn * c.normal + c.pt * tangent;

                body1.velocity -= body1.inv_mass * p;
                body1.angular_velocity -= body1.inv_i * r1.cross(p);

                body2.velocity += body2.inv_mass * p;
                body2.angular_velocity += body2.inv_i * r2.cross(p);
            }
        }
    }

    pub fn apply_impulse(&mut self, bodies: &mut [Option<Body>], config: &WorldConfig) {
        let Some((b1, b2)) = bodies_two_mut(bodies, self.key.body1, self.key.body2) else {
            return;
        };

        for c in &mut self.contacts[..self.num_contacts] {
            // Relative velocity at contact
            let mut dv = b2.velocity + Vec2::cross_scalar_vec(b2.angular_velocity, c.r2)
                - b1.velocity
                - Vec2::cross_scalar_vec(b1.angular_velocity, c.r1);

            // Compute normal impulse
            let vn = dv.dot(c.normal);

            let mut dpn = c.mass_normal * (-vn + c.bias);

            if config.accumulate_impulses {
                // Clamp the accumulated impulse
                let pn0 = c.pn;
                c.pn = (pn0 + dpn).max(0.0);
                dpn = c.pn - pn0;
            } else {
                dpn = dpn.max(0.0);
            }

            // Apply contact impulse
            let pn = dpn * c.normal;

            b1.velocity -= b1.inv_mass * pn;
            b1.angular_velocity -= b1.inv_i * c.r1.cross(pn);

            b2.velocity += b2.inv_mass * pn;
            b2.angular_velocity += b2.inv_i * c.r2.cross(pn);

            // Relative velocity at contact
            dv = b2.velocity + Vec2::cross_scalar_vec(b2.angular_velocity, c.r2)
                - b1.velocity
                - Vec2::cross_scalar_vec(b1.angular_velocity, c.r1);

            let tangent = Vec2::cross_vec_scalar(c.normal, 1.0);
            let vt = dv.dot(tangent);
            let mut dpt = c.mass_tangent * (-vt);

            if config.accumulate_impulses {
                // Compute friction impulse
                let max_pt = self.friction * c.pn;

                // Clamp friction
                let old_tangent_impulse = c.pt;
                c.pt = (old_tangent_impulse + dpt).clamp(-max_pt, max_pt);
                dpt = c.pt - old_tangent_impulse;
            } else {
                let max_pt = self.friction * dpn;
                dpt = dpt.clamp(-max_pt, max_pt);
            }

            // apply contact impulse
            let pt = dpt * tangent;

            b1.velocity -= b1.inv_mass * pt;
            b1.angular_velocity -= b1.inv_i * c.r1.cross(pt);

            b2.velocity += b2.inv_mass * pt;
            b2.angular_velocity += b2.inv_i * c.r2.cross(pt);
        }
    }

    /// Push overlapping bodies apart along the contact normals.
    ///
    /// `starts` holds each body's center and rotation from before the position
    /// update, so the separation measured at narrow phase can be carried
    /// forward without re-running collision. Returns the smallest separation
    /// seen.
    pub fn solve_position(
        &mut self,
        bodies: &mut [Option<Body>],
        starts: &[Option<(Vec2, f32)>],
    ) -> f32 {
        let (Some(Some(start1)), Some(Some(start2))) =
            (starts.get(self.key.body1.0), starts.get(self.key.body2.0))
        else {
            return 0.0;
        };
        let Some((b1, b2)) = bodies_two_mut(bodies, self.key.body1, self.key.body2) else {
            return 0.0;
        };

        let mut min_separation: f32 = 0.0;
        for c in &self.contacts[..self.num_contacts] {
            let (c1, a1) = (b1.world_center(), b1.rotation);
            let (c2, a2) = (b2.world_center(), b2.rotation);

            let d1 = c1 - start1.0 + Vec2::cross_scalar_vec(a1 - start1.1, c.r1);
            let d2 = c2 - start2.0 + Vec2::cross_scalar_vec(a2 - start2.1, c.r2);
            let separation = c.separation + c.normal.dot(d2 - d1);
            min_separation = min_separation.min(separation);

            let correction =
                (BAUMGARTE * (separation + LINEAR_SLOP)).clamp(-MAX_LINEAR_CORRECTION, 0.0);
            let p = (-c.mass_normal * correction) * c.normal;

            b1.set_center(c1 - b1.inv_mass * p, a1 - b1.inv_i * c.r1.cross(p));
            b2.set_center(c2 + b2.inv_mass * p, a2 + b2.inv_i * c.r2.cross(p));
        }
        min_separation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_key_round_trips() {
        let fp = FeaturePair::new(1, 2, 3, 255);
        assert_eq!(FeaturePair::from_key(fp.key()), fp);
    }

    #[test]
    fn arbiter_key_orders_bodies() {
        let k = ArbiterKey::new(BodyHandle(4), 1, BodyHandle(2), 0);
        assert_eq!(k.body1, BodyHandle(2));
        assert_eq!(k.fixture1, 0);
        assert_eq!(k.body2, BodyHandle(4));
        assert_eq!(k.fixture2, 1);
        assert!(k.involves(BodyHandle(4)));
        assert!(!k.involves(BodyHandle(3)));
    }

    #[test]
    fn update_carries_impulses_for_matching_features() {
        let mut old = Contact::default();
        old.feature = FeaturePair::new(1, 0, 0, 0);
        old.pn = 3.0;
        old.pt = -1.0;

        let mut arb = Arbiter {
            contacts: [old, Contact::default()],
            num_contacts: 1,
            key: ArbiterKey::new(BodyHandle(0), 0, BodyHandle(1), 0),
            friction: 0.5,
            restitution: 0.0,
        };

        let mut fresh = Contact::default();
        fresh.feature = FeaturePair::new(1, 0, 0, 0);
        let mut other = Contact::default();
        other.feature = FeaturePair::new(2, 0, 0, 0);

        arb.update(&[fresh, other], true);
        assert_eq!(arb.num_contacts, 2);
        assert_eq!(arb.contacts[0].pn, 3.0);
        assert_eq!(arb.contacts[0].pt, -1.0);
        assert_eq!(arb.contacts[1].pn, 0.0);

        arb.update(&[fresh], false);
        assert_eq!(arb.num_contacts, 1);
        assert_eq!(arb.contacts[0].pn, 0.0);
    }
}
