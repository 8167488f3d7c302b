//! Grounded movement: running with input on the ground.

use crate::animation::AnimationTrigger;
use crate::player::{Behavior, BehaviorCx, BehaviorKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct GroundMovement;

impl Behavior for GroundMovement {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::GroundMovement
    }

    fn on_enter(&self, cx: &mut BehaviorCx<'_>) {
        cx.raise(AnimationTrigger::Run);
    }

    fn on_update(&self, cx: &mut BehaviorCx<'_>) {
        let dt = cx.dt;
        let rate = cx.context.tunables().accel_speed;
        cx.context.speed_target = cx.context.input_speed_target();
        cx.context.approach_speed_target(rate, dt);

        // Walking off a ledge falls without a jump impulse.
        if !cx.grounded {
            cx.request_transition(BehaviorKind::Airborne);
        } else if cx.context.direction.length() == 0.0 {
            cx.request_transition(BehaviorKind::Idle);
        }
    }

    fn on_fixed_update(&self, cx: &mut BehaviorCx<'_>) {
        let turning_speed = cx.context.tunables().turning_speed;
        cx.turn_towards_target(turning_speed);

        let horizontal = cx.context.move_direction * cx.context.current_speed;
        cx.set_horizontal_velocity(horizontal);
    }

    fn on_exit(&self, cx: &mut BehaviorCx<'_>) {
        cx.clear(AnimationTrigger::Run);
    }
}
