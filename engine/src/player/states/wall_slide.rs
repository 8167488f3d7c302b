//! Wall slide: clinging to a wall after a rollout hits it.
//!
//! Falling speed is capped at `wall_slide_speed`. Jumping kicks off the wall
//! along its normal at full speed.

use glam::Vec3;

use crate::animation::AnimationTrigger;
use crate::input::{InputEvent, InputEventKind};
use crate::physics::CollisionInfo;
use crate::player::behavior::{is_same_wall, is_wall_contact};
use crate::player::motion::{yaw_degrees_of, yaw_rotation};
use crate::player::{Behavior, BehaviorCx, BehaviorKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct WallSlide;

impl WallSlide {
    fn wall_jump(cx: &mut BehaviorCx<'_>) {
        let (max_speed, jump_amount) = {
            let tunables = cx.context.tunables();
            (tunables.max_speed, tunables.jump_amount)
        };

        // Without a stored normal, push back against the facing direction.
        let normal = cx.context.wall_normal.unwrap_or_else(|| -cx.facing_forward());
        let away = Vec3::new(normal.x, 0.0, normal.z).normalize_or_zero();

        cx.body.set_linear_velocity(away * max_speed);
        cx.body.apply_impulse(Vec3::Y, jump_amount);
        if away != Vec3::ZERO {
            cx.body.set_rotation(yaw_rotation(yaw_degrees_of(away)));
        }
        cx.context.current_speed = max_speed;
        cx.request_transition(BehaviorKind::Airborne);
    }
}

impl Behavior for WallSlide {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::WallSlide
    }

    fn on_enter(&self, cx: &mut BehaviorCx<'_>) {
        cx.raise(AnimationTrigger::WallSlide);
        cx.subscribe(InputEventKind::JumpPerformed);
        cx.context.current_speed = 0.0;
    }

    fn on_update(&self, cx: &mut BehaviorCx<'_>) {
        if cx.landed() {
            let next = cx.settle_kind();
            cx.request_transition(next);
        }
    }

    fn on_fixed_update(&self, cx: &mut BehaviorCx<'_>) {
        let max_fall = cx.context.tunables().wall_slide_speed;
        let vy = cx.vertical_velocity().max(-max_fall);
        cx.body.set_linear_velocity(Vec3::new(0.0, vy, 0.0));
    }

    fn on_collision_stay(&self, cx: &mut BehaviorCx<'_>, contact: &CollisionInfo) {
        if is_wall_contact(contact) {
            cx.context.wall_normal = Some(contact.normal);
        }
    }

    fn on_collision_exit(&self, cx: &mut BehaviorCx<'_>, contact: &CollisionInfo) {
        let left_wall = match cx.context.wall_normal {
            Some(normal) => is_same_wall(contact, normal),
            None => is_wall_contact(contact),
        };
        if left_wall {
            cx.request_transition(BehaviorKind::Airborne);
        }
    }

    fn on_exit(&self, cx: &mut BehaviorCx<'_>) {
        cx.unsubscribe(InputEventKind::JumpPerformed);
        cx.clear(AnimationTrigger::WallSlide);
        cx.context.wall_normal = None;
    }

    fn on_input(&self, cx: &mut BehaviorCx<'_>, event: &InputEvent) {
        if let InputEvent::JumpPerformed = event {
            Self::wall_jump(cx);
        }
    }
}
