use rand::Rng;

#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * (core::f32::consts::PI / 180.0)
}

#[inline]
pub fn rad_to_deg(radians: f32) -> f32 {
    radians * (180.0 / core::f32::consts::PI)
}

#[inline]
pub fn random_range(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    rng.gen_range(lo..=hi)
}
