//! Input Module
//!
//! Discrete, already-normalized input events delivered to the locomotion
//! controller, and the subscription registry behaviors use to receive them.
//! Device polling and key bindings live with the input collaborator.
//!
//! # Example
//!
//! ```rust,ignore
//! use locomotion_engine::input::InputEvent;
//! use glam::Vec2;
//!
//! controller.handle_input(InputEvent::MovementPerformed(Vec2::new(0.0, 1.0)));
//! controller.handle_input(InputEvent::JumpPerformed);
//! controller.handle_input(InputEvent::JumpCanceled);
//! ```

pub mod events;
pub mod subscriptions;

pub use events::{InputEvent, InputEventKind};
pub use subscriptions::{InputSubscriptions, Subscription};
