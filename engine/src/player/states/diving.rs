//! Diving: a forward lunge on the low collision shape.

use crate::animation::AnimationTrigger;
use crate::physics::{ColliderShape, CollisionInfo};
use crate::player::behavior::is_wall_contact;
use crate::player::{Behavior, BehaviorCx, BehaviorKind};

#[derive(Debug, Clone, Copy, Default)]
pub struct Diving;

impl Behavior for Diving {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Diving
    }

    fn on_enter(&self, cx: &mut BehaviorCx<'_>) {
        cx.switch_collisions(ColliderShape::Diving);
        cx.raise(AnimationTrigger::Dive);

        let tunables = cx.context.tunables();
        let (hop, boost, cap) = (
            tunables.vertical_dive_height,
            tunables.horizontal_dive_amount,
            tunables.diving_max_speed,
        );
        cx.launch(hop);
        cx.context.current_speed = (cx.context.current_speed + boost).min(cap);
    }

    fn on_update(&self, cx: &mut BehaviorCx<'_>) {
        if cx.landed() {
            cx.request_transition(BehaviorKind::Sliding);
        }
    }

    fn on_fixed_update(&self, cx: &mut BehaviorCx<'_>) {
        let horizontal = cx.facing_forward() * cx.context.current_speed;
        cx.set_horizontal_velocity(horizontal);
    }

    fn on_collision_enter(&self, cx: &mut BehaviorCx<'_>, contact: &CollisionInfo) {
        // Bonk: diving into a wall kills forward speed.
        if is_wall_contact(contact) {
            cx.context.current_speed = 0.0;
            cx.request_transition(BehaviorKind::Airborne);
        }
    }

    fn on_exit(&self, cx: &mut BehaviorCx<'_>) {
        cx.switch_collisions(ColliderShape::Normal);
        cx.clear(AnimationTrigger::Dive);
    }
}
