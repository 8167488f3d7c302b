//! Shared Locomotion Context
//!
//! State and parameters every behavior reads and writes. The controller owns
//! the single instance; behaviors reach it through [`super::BehaviorCx`]
//! while one of their hooks runs.

use glam::{EulerRot, Quat, Vec2, Vec3};

use crate::config::LocomotionTunables;
use crate::physics::ColliderShape;

use super::motion::lerp_clamped;

/// Mutable locomotion state plus read-only tunables.
#[derive(Debug, Clone)]
pub struct LocomotionContext {
    /// Normalized input direction, zero without input
    pub direction: Vec2,
    /// Raw movement value from the last movement event, zero without input
    pub movement_input: Vec2,
    /// World-space movement direction, refreshed after every physics step
    pub move_direction: Vec3,
    /// Desired facing in degrees, refreshed after every physics step
    pub target_angle: f32,
    /// Current horizontal speed
    pub current_speed: f32,
    /// Horizontal speed the current behavior is steering toward
    pub speed_target: f32,
    /// Normal of the wall being slid on
    pub wall_normal: Option<Vec3>,
    active_shape: ColliderShape,
    tunables: LocomotionTunables,
}

impl LocomotionContext {
    /// Fresh context at rest. `speed_target` starts at `max_speed`.
    pub fn new(tunables: LocomotionTunables) -> Self {
        Self {
            direction: Vec2::ZERO,
            movement_input: Vec2::ZERO,
            move_direction: Vec3::Z,
            target_angle: 0.0,
            current_speed: 0.0,
            speed_target: tunables.max_speed,
            wall_normal: None,
            active_shape: ColliderShape::Normal,
            tunables,
        }
    }

    pub fn tunables(&self) -> &LocomotionTunables {
        &self.tunables
    }

    /// The enabled collision shape.
    pub fn active_shape(&self) -> ColliderShape {
        self.active_shape
    }

    pub(crate) fn set_active_shape(&mut self, shape: ColliderShape) {
        self.active_shape = shape;
    }

    /// Whether any movement input is held.
    pub fn has_input(&self) -> bool {
        self.direction.length() > 0.0
    }

    /// Record a movement event.
    pub fn set_movement_input(&mut self, value: Vec2) {
        self.movement_input = value;
        self.direction = value.normalize_or_zero();
    }

    /// Record movement release.
    pub fn clear_movement_input(&mut self) {
        self.movement_input = Vec2::ZERO;
        self.direction = Vec2::ZERO;
    }

    /// Speed target from input: `max_speed * (|x| + |y|)`.
    ///
    /// The sum of absolute axes, not the vector length; a diagonal stick
    /// yields more than `max_speed` until the physics-step clamp.
    pub fn input_speed_target(&self) -> f32 {
        self.tunables.max_speed * (self.movement_input.x.abs() + self.movement_input.y.abs())
    }

    /// Move `current_speed` toward `speed_target` at `rate` per second.
    pub fn approach_speed_target(&mut self, rate: f32, dt: f32) {
        self.current_speed = lerp_clamped(self.current_speed, self.speed_target, dt * rate);
    }

    /// Recompute `target_angle` and `move_direction` from `direction` and
    /// the camera yaw in degrees.
    pub fn refresh_heading(&mut self, camera_yaw: f32) {
        self.target_angle = self.direction.x.atan2(self.direction.y).to_degrees() + camera_yaw;

        let heading = Quat::from_euler(
            EulerRot::YXZ,
            self.target_angle.to_radians(),
            self.direction.x.to_radians(),
            0.0,
        );
        self.move_direction = heading * Vec3::Z;
    }

    /// Keep `speed_target` within `[-max_speed, max_speed]`.
    pub fn clamp_speed_target(&mut self) {
        let max_speed = self.tunables.max_speed;
        self.speed_target = self.speed_target.clamp(-max_speed, max_speed);
    }
}
