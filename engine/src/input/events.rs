//! Input events consumed by the locomotion controller.

use glam::Vec2;

/// One discrete event from the input collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Movement stick/keys changed; carries the raw 2D value
    MovementPerformed(Vec2),
    /// Movement input released
    MovementCanceled,
    /// Jump pressed
    JumpPerformed,
    /// Jump released
    JumpCanceled,
    /// Dive pressed
    DivePerformed,
}

impl InputEvent {
    /// Payload-free discriminant, used as the subscription key.
    pub fn kind(&self) -> InputEventKind {
        match self {
            InputEvent::MovementPerformed(_) => InputEventKind::MovementPerformed,
            InputEvent::MovementCanceled => InputEventKind::MovementCanceled,
            InputEvent::JumpPerformed => InputEventKind::JumpPerformed,
            InputEvent::JumpCanceled => InputEventKind::JumpCanceled,
            InputEvent::DivePerformed => InputEventKind::DivePerformed,
        }
    }
}

/// Subscription key for [`InputEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEventKind {
    MovementPerformed,
    MovementCanceled,
    JumpPerformed,
    JumpCanceled,
    DivePerformed,
}
