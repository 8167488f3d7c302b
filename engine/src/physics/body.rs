//! Physical Body Contract
//!
//! The locomotion core never integrates motion itself. It reads and writes
//! linear velocity, applies impulses, turns the body, and toggles which of
//! the two character colliders is enabled. [`PhysicsBody`] is that surface.
//!
//! [`SimpleBody`] is a kinematic point body implementing the contract for
//! headless runs: gravity, impulses scaled by mass, and a floor clamp.
//!
//! # Usage
//!
//! ```rust,ignore
//! use locomotion_engine::physics::{PhysicsBody, SimpleBody};
//! use glam::Vec3;
//!
//! let mut body = SimpleBody::at(Vec3::new(0.0, 1.0, 0.0));
//! body.apply_impulse(Vec3::Y, 10.0);
//!
//! // Each physics step, after the controller's fixed update:
//! body.integrate(fixed_dt, floor_height);
//! ```

use glam::{Quat, Vec3};

/// The two mutually exclusive character colliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColliderShape {
    /// Upright capsule used by every behavior except diving and sliding
    #[default]
    Normal,
    /// Flattened capsule used while diving and sliding
    Diving,
}

impl ColliderShape {
    /// The shape that must be disabled while this one is enabled.
    pub fn other(self) -> Self {
        match self {
            ColliderShape::Normal => ColliderShape::Diving,
            ColliderShape::Diving => ColliderShape::Normal,
        }
    }
}

/// Contact reported by the physics collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    /// World-space contact point
    pub point: Vec3,
    /// Contact normal pointing away from the other collider (normalized)
    pub normal: Vec3,
}

impl CollisionInfo {
    /// Creates a contact; the normal is normalized.
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize_or_zero(),
        }
    }
}

/// Operations the locomotion core needs from a rigid body.
pub trait PhysicsBody {
    /// World-space origin of the body.
    fn position(&self) -> Vec3;

    /// Current orientation.
    fn rotation(&self) -> Quat;

    /// Overwrite the orientation.
    fn set_rotation(&mut self, rotation: Quat);

    /// Current linear velocity.
    fn linear_velocity(&self) -> Vec3;

    /// Overwrite the linear velocity.
    fn set_linear_velocity(&mut self, velocity: Vec3);

    /// Apply an instantaneous impulse of `magnitude` along `direction`.
    fn apply_impulse(&mut self, direction: Vec3, magnitude: f32);

    /// Enable or disable one of the two character colliders.
    fn set_collider_enabled(&mut self, shape: ColliderShape, enabled: bool);
}

/// Default downward acceleration for [`SimpleBody`] in m/s^2.
pub const DEFAULT_GRAVITY: f32 = 20.0;

/// Kinematic point body with gravity and a floor clamp.
#[derive(Debug, Clone)]
pub struct SimpleBody {
    pub position: Vec3,
    pub velocity: Vec3,
    pub rotation: Quat,
    /// Mass in kilograms; impulses change velocity by `impulse / mass`
    pub mass: f32,
    /// Downward acceleration in m/s^2
    pub gravity: f32,
    normal_collider: bool,
    diving_collider: bool,
    impulses: Vec<Vec3>,
}

impl Default for SimpleBody {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            mass: 1.0,
            gravity: DEFAULT_GRAVITY,
            normal_collider: false,
            diving_collider: false,
            impulses: Vec::new(),
        }
    }
}

impl SimpleBody {
    /// Create a body at rest at `position`.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Whether the given collider is currently enabled.
    pub fn collider_enabled(&self, shape: ColliderShape) -> bool {
        match shape {
            ColliderShape::Normal => self.normal_collider,
            ColliderShape::Diving => self.diving_collider,
        }
    }

    /// Every impulse applied so far, as `direction * magnitude`.
    pub fn impulses(&self) -> &[Vec3] {
        &self.impulses
    }

    /// Advance the body by `dt` seconds, landing on `floor_height`.
    ///
    /// Uses midpoint integration for the vertical axis. A body that ends
    /// the step at or below the floor is placed on it and loses any downward
    /// velocity.
    pub fn integrate(&mut self, dt: f32, floor_height: f32) {
        let prev_vertical = self.velocity.y;
        self.velocity.y -= self.gravity * dt;
        let avg_vertical = (prev_vertical + self.velocity.y) * 0.5;

        self.position.x += self.velocity.x * dt;
        self.position.z += self.velocity.z * dt;
        self.position.y += avg_vertical * dt;

        if self.position.y <= floor_height {
            self.position.y = floor_height;
            if self.velocity.y < 0.0 {
                self.velocity.y = 0.0;
            }
        }
    }
}

impl PhysicsBody for SimpleBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn linear_velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn apply_impulse(&mut self, direction: Vec3, magnitude: f32) {
        let impulse = direction * magnitude;
        self.velocity += impulse / self.mass;
        self.impulses.push(impulse);
    }

    fn set_collider_enabled(&mut self, shape: ColliderShape, enabled: bool) {
        match shape {
            ColliderShape::Normal => self.normal_collider = enabled,
            ColliderShape::Diving => self.diving_collider = enabled,
        }
    }
}
