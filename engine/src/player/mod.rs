//! Player Module
//!
//! Character locomotion as a finite-state machine over a fixed set of
//! behaviors.
//!
//! # Components
//!
//! - [`LocomotionController`] - Owns everything below; driven by per-frame and
//!   per-physics-step ticks plus input and collision events
//! - [`StateMachine`] - Active behavior, deferred transitions, hook dispatch
//! - [`Behavior`] / [`BehaviorCx`] - Hook contract and the borrowed view hooks
//!   operate on
//! - [`LocomotionContext`] - Shared state and tunables
//! - [`states`] - Idle, ground movement, airborne, diving, sliding, rollout,
//!   wall slide

pub mod behavior;
pub mod context;
pub mod controller;
pub mod motion;
pub mod state_machine;
pub mod states;

pub use behavior::{
    is_same_wall, is_wall_contact, Behavior, BehaviorCx, BehaviorKind, BehaviorTable,
    SAME_WALL_MIN_DOT, WALL_NORMAL_MAX_Y,
};
pub use context::LocomotionContext;
pub use controller::{LocomotionController, LocomotionControllerBuilder};
pub use state_machine::{StateMachine, MAX_CHAINED_TRANSITIONS};
pub use states::STOPPED_SPEED;
