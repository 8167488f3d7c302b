//! Config Module
//!
//! Tunable locomotion parameters, supplied once when a controller is built
//! and treated as read-only during play.

pub mod tunables;

pub use tunables::{GroundCheckConfig, LocomotionTunables};
