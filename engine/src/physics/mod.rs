//! Physics module
//!
//! Collaborator interfaces the locomotion core consumes from a physics
//! engine, plus small reference implementations used by the headless
//! simulation and the tests.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Impulses in kg·m/s
//! - Angles handed to the core in degrees
//!
//! # Submodules
//!
//! - [`body`] - [`PhysicsBody`] contract, collider shapes, contact info, [`SimpleBody`]
//! - [`ground`] - [`GroundProbe`] contract, probe box geometry, [`GroundPlane`]

pub mod body;
pub mod ground;

pub use body::{ColliderShape, CollisionInfo, PhysicsBody, SimpleBody};
pub use ground::{GroundBox, GroundCheckBox, GroundPlane, GroundProbe};
