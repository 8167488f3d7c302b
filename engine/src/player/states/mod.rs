//! Locomotion Behaviors
//!
//! - [`Idle`] - standing still, coasting to a stop
//! - [`GroundMovement`] - running on the ground
//! - [`Airborne`] - jumping or falling, with jump cutting
//! - [`Diving`] - forward dive with the low collision shape
//! - [`Sliding`] - belly slide after a dive lands
//! - [`Rollout`] - hop out of a slide
//! - [`WallSlide`] - clinging to a wall after a rollout hits it

pub mod airborne;
pub mod diving;
pub mod grounded;
pub mod idle;
pub mod rollout;
pub mod sliding;
pub mod wall_slide;

pub use airborne::Airborne;
pub use diving::Diving;
pub use grounded::GroundMovement;
pub use idle::Idle;
pub use rollout::Rollout;
pub use sliding::{Sliding, STOPPED_SPEED};
pub use wall_slide::WallSlide;
