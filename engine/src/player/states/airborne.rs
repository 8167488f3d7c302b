//! Airborne: jumping or falling.
//!
//! Entered by an explicit jump (the controller applies the impulse before
//! switching) or by losing ground contact. Releasing jump while rising caps
//! upward velocity at `jump_amount / jump_cut_multiplier`.

use crate::animation::AnimationTrigger;
use crate::input::{InputEvent, InputEventKind};
use crate::player::{Behavior, BehaviorCx, BehaviorKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct Airborne;

impl Airborne {
    fn cut_jump(cx: &mut BehaviorCx<'_>) {
        let tunables = cx.context.tunables();
        let cap = tunables.jump_amount / tunables.jump_cut_multiplier;
        if cx.vertical_velocity() > cap {
            cx.set_vertical_velocity(cap);
        }
    }
}

impl Behavior for Airborne {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Airborne
    }

    fn on_enter(&self, cx: &mut BehaviorCx<'_>) {
        cx.subscribe(InputEventKind::JumpCanceled);
        cx.raise(AnimationTrigger::Jump);
    }

    fn on_update(&self, cx: &mut BehaviorCx<'_>) {
        let dt = cx.dt;
        let rate = cx.context.tunables().accel_speed;
        cx.context.speed_target = cx.context.input_speed_target();
        cx.context.approach_speed_target(rate, dt);

        if cx.landed() {
            cx.request_transition(BehaviorKind::GroundMovement);
        }
    }

    fn on_fixed_update(&self, cx: &mut BehaviorCx<'_>) {
        if !cx.context.has_input() {
            return;
        }

        let turning_speed = cx.context.tunables().turning_speed;
        cx.turn_towards_target(turning_speed);

        let horizontal = cx.context.move_direction * cx.context.current_speed;
        cx.set_horizontal_velocity(horizontal);
    }

    fn on_exit(&self, cx: &mut BehaviorCx<'_>) {
        cx.unsubscribe(InputEventKind::JumpCanceled);
        cx.clear(AnimationTrigger::Jump);
    }

    fn on_input(&self, cx: &mut BehaviorCx<'_>, event: &InputEvent) {
        if let InputEvent::JumpCanceled = event {
            Self::cut_jump(cx);
        }
    }
}
