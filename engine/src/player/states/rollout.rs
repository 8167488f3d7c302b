//! Rollout: hop out of a slide with limited air control.

use crate::animation::AnimationTrigger;
use crate::physics::CollisionInfo;
use crate::player::behavior::is_wall_contact;
use crate::player::{Behavior, BehaviorCx, BehaviorKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct Rollout;

impl Behavior for Rollout {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Rollout
    }

    fn on_enter(&self, cx: &mut BehaviorCx<'_>) {
        cx.raise(AnimationTrigger::Rollout);

        let (height, speed) = {
            let tunables = cx.context.tunables();
            (tunables.roll_height, tunables.rollout_speed)
        };
        cx.launch(height);
        cx.context.current_speed = speed;
    }

    fn on_update(&self, cx: &mut BehaviorCx<'_>) {
        let dt = cx.dt;
        let rate = cx.context.tunables().air_deccel_speed;
        cx.context.speed_target = cx.context.input_speed_target();
        cx.context.approach_speed_target(rate, dt);

        if cx.landed() {
            let next = cx.settle_kind();
            cx.request_transition(next);
        }
    }

    fn on_fixed_update(&self, cx: &mut BehaviorCx<'_>) {
        let heading = if cx.context.has_input() {
            let air_turn = cx.context.tunables().air_turn_control_speed;
            cx.turn_towards_target(air_turn);
            cx.context.move_direction
        } else {
            cx.facing_forward()
        };
        let horizontal = heading * cx.context.current_speed;
        cx.set_horizontal_velocity(horizontal);
    }

    fn on_collision_enter(&self, cx: &mut BehaviorCx<'_>, contact: &CollisionInfo) {
        if is_wall_contact(contact) && !cx.grounded {
            cx.context.wall_normal = Some(contact.normal);
            cx.request_transition(BehaviorKind::WallSlide);
        }
    }

    fn on_exit(&self, cx: &mut BehaviorCx<'_>) {
        cx.clear(AnimationTrigger::Rollout);
    }
}
