//! Animation Trigger Sink
//!
//! The locomotion core does not blend animations. Each behavior raises one
//! named boolean flag on entry and clears it on exit; the animation
//! collaborator decides what those flags mean.

use std::collections::BTreeSet;

/// Named flags raised by the locomotion behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationTrigger {
    Idle,
    Run,
    Jump,
    Dive,
    Slide,
    Rollout,
    WallSlide,
}

impl AnimationTrigger {
    /// Flag name handed to the animation collaborator.
    pub fn name(self) -> &'static str {
        match self {
            AnimationTrigger::Idle => "isIdle",
            AnimationTrigger::Run => "isRunning",
            AnimationTrigger::Jump => "isJumping",
            AnimationTrigger::Dive => "isDiving",
            AnimationTrigger::Slide => "isSliding",
            AnimationTrigger::Rollout => "isRollingOut",
            AnimationTrigger::WallSlide => "isWallSliding",
        }
    }
}

/// Receives trigger changes from the locomotion core.
pub trait AnimationSink {
    /// Set the named flag.
    fn raise_trigger(&mut self, name: &str);

    /// Clear the named flag.
    fn clear_trigger(&mut self, name: &str);
}

/// Reference sink: a set of raised flag names.
#[derive(Debug, Clone, Default)]
pub struct AnimatorFlags {
    raised: BTreeSet<String>,
}

impl AnimatorFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the named flag is currently set.
    pub fn is_raised(&self, name: &str) -> bool {
        self.raised.contains(name)
    }

    /// Whether the flag for `trigger` is currently set.
    pub fn is_active(&self, trigger: AnimationTrigger) -> bool {
        self.is_raised(trigger.name())
    }

    /// Currently raised flags in name order.
    pub fn raised(&self) -> impl Iterator<Item = &str> {
        self.raised.iter().map(String::as_str)
    }
}

impl AnimationSink for AnimatorFlags {
    fn raise_trigger(&mut self, name: &str) {
        self.raised.insert(name.to_owned());
    }

    fn clear_trigger(&mut self, name: &str) {
        self.raised.remove(name);
    }
}
