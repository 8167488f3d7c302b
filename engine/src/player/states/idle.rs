//! Idle: standing still.

use crate::animation::AnimationTrigger;
use crate::player::{Behavior, BehaviorCx, BehaviorKind};

/// Initial behavior. Coasts along the facing direction until speed decays.
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

impl Behavior for Idle {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Idle
    }

    fn on_enter(&self, cx: &mut BehaviorCx<'_>) {
        cx.raise(AnimationTrigger::Idle);
    }

    fn on_update(&self, cx: &mut BehaviorCx<'_>) {
        let dt = cx.dt;
        let rate = cx.context.tunables().deccel_speed;
        cx.context.speed_target = cx.context.input_speed_target();
        cx.context.approach_speed_target(rate, dt);

        if !cx.grounded {
            cx.request_transition(BehaviorKind::Airborne);
        } else if cx.context.has_input() {
            cx.request_transition(BehaviorKind::GroundMovement);
        }
    }

    fn on_fixed_update(&self, cx: &mut BehaviorCx<'_>) {
        let horizontal = cx.facing_forward() * cx.context.current_speed;
        cx.set_horizontal_velocity(horizontal);
    }

    fn on_exit(&self, cx: &mut BehaviorCx<'_>) {
        cx.clear(AnimationTrigger::Idle);
    }
}
