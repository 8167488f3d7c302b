//! Sliding: belly slide after a dive lands.
//!
//! Speed decays linearly by `slide_deccel_amount` per second. Jump while
//! sliding hops into a rollout.

use crate::animation::AnimationTrigger;
use crate::input::{InputEvent, InputEventKind};
use crate::physics::{ColliderShape, CollisionInfo};
use crate::player::behavior::is_wall_contact;
use crate::player::{Behavior, BehaviorCx, BehaviorKind};

/// Speed at or below which a slide counts as finished.
pub const STOPPED_SPEED: f32 = 0.05;

#[derive(Debug, Clone, Copy, Default)]
pub struct Sliding;

impl Behavior for Sliding {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Sliding
    }

    fn on_enter(&self, cx: &mut BehaviorCx<'_>) {
        cx.switch_collisions(ColliderShape::Diving);
        cx.raise(AnimationTrigger::Slide);
        cx.subscribe(InputEventKind::JumpPerformed);

        let initial = cx.context.tunables().slide_initial_speed;
        cx.context.current_speed = cx.context.current_speed.max(initial);
    }

    fn on_update(&self, cx: &mut BehaviorCx<'_>) {
        let decel = cx.context.tunables().slide_deccel_amount * cx.dt;
        cx.context.current_speed = (cx.context.current_speed - decel).max(0.0);

        if !cx.grounded {
            cx.request_transition(BehaviorKind::Airborne);
        } else if cx.context.current_speed <= STOPPED_SPEED {
            let next = cx.settle_kind();
            cx.request_transition(next);
        }
    }

    fn on_fixed_update(&self, cx: &mut BehaviorCx<'_>) {
        let horizontal = cx.facing_forward() * cx.context.current_speed;
        cx.set_horizontal_velocity(horizontal);
    }

    fn on_collision_enter(&self, cx: &mut BehaviorCx<'_>, contact: &CollisionInfo) {
        if is_wall_contact(contact) {
            cx.context.current_speed = 0.0;
        }
    }

    fn on_exit(&self, cx: &mut BehaviorCx<'_>) {
        cx.unsubscribe(InputEventKind::JumpPerformed);
        cx.switch_collisions(ColliderShape::Normal);
        cx.clear(AnimationTrigger::Slide);
    }

    fn on_input(&self, cx: &mut BehaviorCx<'_>, event: &InputEvent) {
        if let InputEvent::JumpPerformed = event {
            cx.request_transition(BehaviorKind::Rollout);
        }
    }
}
