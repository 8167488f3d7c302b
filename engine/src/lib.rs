//! Locomotion Engine Library
//!
//! A finite-state locomotion controller for a physically simulated
//! character. Each tick it decides which movement behavior governs the
//! character's velocity, rotation, collision shape and animation triggers,
//! and switches behaviors in response to input, ground contact and velocity.
//!
//! # Modules
//!
//! - [`player`] - Controller, state machine, behaviors and shared context
//! - [`physics`] - Physics body and ground probe contracts, reference implementations
//! - [`input`] - Input events and the subscription registry
//! - [`animation`] - Animation trigger sink
//! - [`config`] - Tunable parameters and JSON loading
//! - [`error`] - Build and configuration errors
//!
//! # Example
//!
//! ```ignore
//! use locomotion_engine::prelude::*;
//!
//! let mut controller = LocomotionController::builder()
//!     .tunables(LocomotionTunables::load("tunables.json")?)
//!     .body(SimpleBody::default())
//!     .ground_probe(GroundPlane::flat(0.0))
//!     .animator(AnimatorFlags::new())
//!     .build()?;
//!
//! controller.handle_input(InputEvent::MovementPerformed(Vec2::new(0.0, 1.0)));
//! controller.handle_input(InputEvent::JumpPerformed);
//!
//! // Each rendered frame:
//! controller.update(frame_dt);
//! // Each physics step:
//! controller.fixed_update(fixed_dt, camera_yaw_degrees);
//! ```

pub mod animation;
pub mod config;
pub mod error;
pub mod input;
pub mod physics;
pub mod player;

pub use error::LocomotionError;

/// Commonly used types in one import.
pub mod prelude {
    pub use crate::animation::{AnimationSink, AnimationTrigger, AnimatorFlags};
    pub use crate::config::{GroundCheckConfig, LocomotionTunables};
    pub use crate::error::LocomotionError;
    pub use crate::input::{InputEvent, InputEventKind};
    pub use crate::physics::{
        ColliderShape, CollisionInfo, GroundBox, GroundCheckBox, GroundPlane, GroundProbe,
        PhysicsBody, SimpleBody,
    };
    pub use crate::player::{BehaviorKind, LocomotionController};
    pub use glam::{Quat, Vec2, Vec3};
}
