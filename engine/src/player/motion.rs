//! Motion helpers shared by the behaviors and the controller.
//!
//! Angles are in degrees, matching `target_angle` and the camera yaw the
//! controller receives. Yaw rotates `+Z` toward `+X`.

use glam::{Quat, Vec3};

/// Linear interpolation with `t` clamped to `[0, 1]`.
pub fn lerp_clamped(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

/// Rotation about +Y by `degrees`.
pub fn yaw_rotation(degrees: f32) -> Quat {
    Quat::from_rotation_y(degrees.to_radians())
}

/// Yaw in degrees that points `+Z` along `direction` on the XZ plane.
pub fn yaw_degrees_of(direction: Vec3) -> f32 {
    direction.x.atan2(direction.z).to_degrees()
}

/// Interpolate `current` toward facing `target_degrees`, with `t` clamped.
pub fn turn_towards(current: Quat, target_degrees: f32, t: f32) -> Quat {
    current
        .lerp(yaw_rotation(target_degrees), t.clamp(0.0, 1.0))
        .normalize()
}

/// Forward (`+Z`) of `rotation`, flattened onto the XZ plane.
pub fn facing_forward(rotation: Quat) -> Vec3 {
    let forward = rotation * Vec3::Z;
    Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero()
}
