//! Behavior Contract
//!
//! A behavior is one locomotion mode (idle, running, diving, ...). The
//! state machine invokes exactly one behavior's hooks at a time, handing it
//! a [`BehaviorCx`]: a bundle of borrows over the shared context, the
//! physics body, the animation sink and the input subscriptions.
//!
//! Behaviors never switch state directly. They call
//! [`BehaviorCx::request_transition`]; the state machine applies the first
//! request once the hook has returned.
//!
//! # Usage
//!
//! ```rust,ignore
//! struct Hover;
//!
//! impl Behavior for Hover {
//!     fn kind(&self) -> BehaviorKind { BehaviorKind::Airborne }
//!
//!     fn on_update(&self, cx: &mut BehaviorCx<'_>) {
//!         if cx.landed() {
//!             cx.request_transition(BehaviorKind::GroundMovement);
//!         }
//!     }
//! }
//! ```

use std::fmt;

use glam::Vec3;
use static_assertions::assert_obj_safe;

use crate::animation::{AnimationSink, AnimationTrigger};
use crate::input::{InputEvent, InputEventKind, InputSubscriptions};
use crate::physics::{ColliderShape, CollisionInfo, PhysicsBody};

use super::context::LocomotionContext;
use super::motion;
use super::states;

/// Largest `|normal.y|` a contact may have and still count as a wall.
pub const WALL_NORMAL_MAX_Y: f32 = 0.3;

/// Whether `contact` is with a mostly vertical surface.
pub fn is_wall_contact(contact: &CollisionInfo) -> bool {
    contact.normal.y.abs() <= WALL_NORMAL_MAX_Y
}

/// Minimum cosine between two normals that count as the same wall.
pub const SAME_WALL_MIN_DOT: f32 = 0.9;

/// Whether `contact` is a wall contact facing along `wall_normal`.
pub fn is_same_wall(contact: &CollisionInfo, wall_normal: Vec3) -> bool {
    is_wall_contact(contact)
        && contact.normal.normalize_or_zero().dot(wall_normal.normalize_or_zero())
            >= SAME_WALL_MIN_DOT
}

/// Identity of a locomotion behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BehaviorKind {
    Idle,
    GroundMovement,
    Airborne,
    Diving,
    Sliding,
    Rollout,
    WallSlide,
}

impl BehaviorKind {
    pub const COUNT: usize = 7;

    /// Every kind, in table order.
    pub const ALL: [BehaviorKind; Self::COUNT] = [
        BehaviorKind::Idle,
        BehaviorKind::GroundMovement,
        BehaviorKind::Airborne,
        BehaviorKind::Diving,
        BehaviorKind::Sliding,
        BehaviorKind::Rollout,
        BehaviorKind::WallSlide,
    ];

    /// Slot in [`BehaviorTable`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            BehaviorKind::Idle => "idle",
            BehaviorKind::GroundMovement => "ground-movement",
            BehaviorKind::Airborne => "airborne",
            BehaviorKind::Diving => "diving",
            BehaviorKind::Sliding => "sliding",
            BehaviorKind::Rollout => "rollout",
            BehaviorKind::WallSlide => "wall-slide",
        }
    }
}

impl fmt::Display for BehaviorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Borrowed view of the controller handed to behavior hooks.
pub struct BehaviorCx<'a> {
    /// Shared locomotion state
    pub context: &'a mut LocomotionContext,
    /// The character's rigid body
    pub body: &'a mut dyn PhysicsBody,
    animator: &'a mut dyn AnimationSink,
    subscriptions: &'a mut InputSubscriptions,
    /// Seconds covered by the current step
    pub dt: f32,
    /// Cached ground contact
    pub grounded: bool,
    owner: Option<BehaviorKind>,
    pending: Option<BehaviorKind>,
}

impl<'a> BehaviorCx<'a> {
    pub fn new(
        context: &'a mut LocomotionContext,
        body: &'a mut dyn PhysicsBody,
        animator: &'a mut dyn AnimationSink,
        subscriptions: &'a mut InputSubscriptions,
        dt: f32,
        grounded: bool,
    ) -> Self {
        Self {
            context,
            body,
            animator,
            subscriptions,
            dt,
            grounded,
            owner: None,
            pending: None,
        }
    }

    /// Behavior whose hook is running.
    ///
    /// # Panics
    /// Outside a hook.
    pub fn owner(&self) -> BehaviorKind {
        self.owner
            .unwrap_or_else(|| panic!("behavior context used outside of a hook"))
    }

    pub(crate) fn bind(&mut self, owner: BehaviorKind) {
        self.owner = Some(owner);
    }

    /// Ask the state machine to switch to `next` after this hook returns.
    ///
    /// The first request in a hook wins; later ones are ignored.
    pub fn request_transition(&mut self, next: BehaviorKind) {
        match self.pending {
            None => self.pending = Some(next),
            Some(first) => {
                log::trace!("{} ignored transition to {next}, {first} already requested", self.owner());
            }
        }
    }

    pub(crate) fn take_transition(&mut self) -> Option<BehaviorKind> {
        self.pending.take()
    }

    /// Install a handler for `event` owned by the running behavior.
    pub fn subscribe(&mut self, event: InputEventKind) {
        let owner = self.owner();
        self.subscriptions.subscribe(owner, event);
    }

    /// Remove the running behavior's handler for `event`.
    pub fn unsubscribe(&mut self, event: InputEventKind) {
        let owner = self.owner();
        self.subscriptions.unsubscribe(owner, event);
    }

    pub fn is_subscribed(&self, owner: BehaviorKind, event: InputEventKind) -> bool {
        self.subscriptions.is_subscribed(owner, event)
    }

    pub(crate) fn subscriptions(&self) -> &InputSubscriptions {
        self.subscriptions
    }

    pub fn raise(&mut self, trigger: AnimationTrigger) {
        self.animator.raise_trigger(trigger.name());
    }

    pub fn clear(&mut self, trigger: AnimationTrigger) {
        self.animator.clear_trigger(trigger.name());
    }

    /// Enable `shape` and disable the other collider.
    pub fn switch_collisions(&mut self, shape: ColliderShape) {
        self.context.set_active_shape(shape);
        self.body.set_collider_enabled(shape, true);
        self.body.set_collider_enabled(shape.other(), false);
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.body.linear_velocity().y
    }

    /// Grounded and not moving upward.
    pub fn landed(&self) -> bool {
        self.grounded && self.vertical_velocity() <= 0.0
    }

    /// Replace horizontal velocity, keeping the vertical component.
    pub fn set_horizontal_velocity(&mut self, horizontal: Vec3) {
        let vy = self.vertical_velocity();
        self.body
            .set_linear_velocity(Vec3::new(horizontal.x, vy, horizontal.z));
    }

    pub fn set_vertical_velocity(&mut self, vy: f32) {
        let mut velocity = self.body.linear_velocity();
        velocity.y = vy;
        self.body.set_linear_velocity(velocity);
    }

    /// Zero vertical velocity, then impulse straight up by `height`.
    pub fn launch(&mut self, height: f32) {
        self.set_vertical_velocity(0.0);
        self.body.apply_impulse(Vec3::Y, height);
    }

    /// Body forward flattened onto the ground plane.
    pub fn facing_forward(&self) -> Vec3 {
        motion::facing_forward(self.body.rotation())
    }

    /// Turn toward `target_angle` at `rate` per second.
    pub fn turn_towards_target(&mut self, rate: f32) {
        let rotation = motion::turn_towards(
            self.body.rotation(),
            self.context.target_angle,
            self.dt * rate,
        );
        self.body.set_rotation(rotation);
    }

    /// Successor once a move has settled: running with input, idle without.
    pub fn settle_kind(&self) -> BehaviorKind {
        if self.context.has_input() {
            BehaviorKind::GroundMovement
        } else {
            BehaviorKind::Idle
        }
    }
}

/// One locomotion mode. Every hook defaults to doing nothing.
pub trait Behavior {
    fn kind(&self) -> BehaviorKind;

    fn on_enter(&self, _cx: &mut BehaviorCx<'_>) {}

    /// Runs once per rendered frame.
    fn on_update(&self, _cx: &mut BehaviorCx<'_>) {}

    /// Runs once per physics step.
    fn on_fixed_update(&self, _cx: &mut BehaviorCx<'_>) {}

    /// Must not request a transition.
    fn on_exit(&self, _cx: &mut BehaviorCx<'_>) {}

    fn on_collision_enter(&self, _cx: &mut BehaviorCx<'_>, _contact: &CollisionInfo) {}

    fn on_collision_stay(&self, _cx: &mut BehaviorCx<'_>, _contact: &CollisionInfo) {}

    fn on_collision_exit(&self, _cx: &mut BehaviorCx<'_>, _contact: &CollisionInfo) {}

    /// Delivered only for events the behavior subscribed to while active.
    fn on_input(&self, _cx: &mut BehaviorCx<'_>, _event: &InputEvent) {}
}

assert_obj_safe!(Behavior);

/// One behavior per [`BehaviorKind`], indexed by kind.
pub struct BehaviorTable {
    behaviors: [Box<dyn Behavior>; BehaviorKind::COUNT],
}

impl BehaviorTable {
    /// Table of the built-in behaviors.
    pub fn standard() -> Self {
        Self {
            behaviors: [
                Box::new(states::Idle),
                Box::new(states::GroundMovement),
                Box::new(states::Airborne),
                Box::new(states::Diving),
                Box::new(states::Sliding),
                Box::new(states::Rollout),
                Box::new(states::WallSlide),
            ],
        }
    }

    /// Standard table with the slot for `behavior.kind()` replaced.
    pub fn with_override(behavior: Box<dyn Behavior>) -> Self {
        Self::standard().and_override(behavior)
    }

    /// Replace the slot for `behavior.kind()`.
    pub fn and_override(mut self, behavior: Box<dyn Behavior>) -> Self {
        let slot = behavior.kind().index();
        self.behaviors[slot] = behavior;
        self
    }

    pub fn get(&self, kind: BehaviorKind) -> &dyn Behavior {
        self.behaviors[kind.index()].as_ref()
    }
}

impl Default for BehaviorTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for BehaviorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.behaviors.iter().map(|b| b.kind()))
            .finish()
    }
}
