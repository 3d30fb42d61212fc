// Quatf is the same type as Bevy's Quat (re-exported from bevy_math).
pub use bevy_math::{Quat as Quatf, Vec3 as Vec3f};

// Basis: standard RHS with +Z forward, +Y up, +X right
pub const BODY_FWD: Vec3f = Vec3f::new(0.0, 0.0, 1.0);
pub const BODY_RIGHT: Vec3f = Vec3f::new(1.0, 0.0, 0.0);
pub const BODY_UP: Vec3f = Vec3f::new(0.0, 1.0, 0.0);

/// Advance a body→world orientation by a body-frame angular velocity.
///
/// The delta rotation is post-multiplied (body frame) and the result is
/// renormalized so repeated integration does not drift off the unit sphere.
#[inline]
pub fn integrate_orientation(orientation: Quatf, omega_body: Vec3f, dt: f32) -> Quatf {
    let delta = Quatf::from_scaled_axis(omega_body * dt);
    let q = (orientation * delta).normalize();
    if q.is_finite() {
        q
    } else {
        Quatf::IDENTITY
    }
}
