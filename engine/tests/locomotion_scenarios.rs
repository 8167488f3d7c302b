//! Locomotion Scenario Tests - Transitions, Lag, and Cleanup
//!
//! Drives a full controller (reference body, flat ground, flag animator)
//! through the documented scenarios and the dive/slide/rollout/wall chain.

use glam::{Vec2, Vec3};
use locomotion_engine::animation::{AnimationTrigger, AnimatorFlags};
use locomotion_engine::config::LocomotionTunables;
use locomotion_engine::input::{InputEvent, InputEventKind};
use locomotion_engine::physics::{ColliderShape, CollisionInfo, GroundPlane, SimpleBody};
use locomotion_engine::player::motion::facing_forward;
use locomotion_engine::player::{BehaviorKind, LocomotionController};

type Controller = LocomotionController<SimpleBody, GroundPlane, AnimatorFlags>;

const FRAME_DT: f32 = 1.0 / 60.0;
const FIXED_DT: f32 = 1.0 / 50.0;

fn controller() -> Controller {
    controller_with(LocomotionTunables::default())
}

fn controller_with(tunables: LocomotionTunables) -> Controller {
    LocomotionController::builder()
        .tunables(tunables)
        .body(SimpleBody::default())
        .ground_probe(GroundPlane::flat(0.0))
        .animator(AnimatorFlags::new())
        .build()
        .expect("controller builds")
}

fn assert_one_shape(c: &Controller) {
    let normal = c.body().collider_enabled(ColliderShape::Normal);
    let diving = c.body().collider_enabled(ColliderShape::Diving);
    assert!(normal != diving, "exactly one collider must be enabled");
    let expected = if normal { ColliderShape::Normal } else { ColliderShape::Diving };
    assert_eq!(c.context().active_shape(), expected);
}

fn wall(normal: Vec3) -> CollisionInfo {
    CollisionInfo::new(Vec3::ZERO, normal)
}

// ============================================================================
// Documented Scenarios
// ============================================================================

#[test]
fn test_zero_input_while_running_goes_idle() {
    let mut c = controller();
    c.switch_state(BehaviorKind::GroundMovement);

    c.handle_input(InputEvent::MovementPerformed(Vec2::ZERO));
    c.update(FRAME_DT);

    assert_eq!(c.current_behavior(), BehaviorKind::Idle);
    assert!(c.animator().is_active(AnimationTrigger::Idle));
    assert!(!c.animator().is_active(AnimationTrigger::Run));
}

#[test]
fn test_losing_ground_while_running_falls_without_impulse() {
    let mut c = controller();
    c.handle_input(InputEvent::MovementPerformed(Vec2::Y));
    c.switch_state(BehaviorKind::GroundMovement);

    c.probe_mut().height = None;
    assert!(!c.refresh_ground_contact());
    c.update(FRAME_DT);

    assert_eq!(c.current_behavior(), BehaviorKind::Airborne);
    assert!(c.body().impulses().is_empty());
}

#[test]
fn test_jump_from_idle_applies_impulse() {
    let mut c = controller();
    c.handle_input(InputEvent::JumpPerformed);

    assert_eq!(c.current_behavior(), BehaviorKind::Airborne);
    assert_eq!(c.body().impulses(), &[Vec3::Y * 10.0]);
    assert!(c.animator().is_active(AnimationTrigger::Jump));
}

#[test]
fn test_falling_onto_ground_lands() {
    let mut c = controller();
    c.handle_input(InputEvent::JumpPerformed);
    c.body_mut().velocity.y = -1.0;

    c.update(FRAME_DT);

    assert_eq!(c.current_behavior(), BehaviorKind::GroundMovement);
    assert!(!c.animator().is_active(AnimationTrigger::Jump));
    assert_eq!(c.live_subscription_count(), 0);
}

#[test]
fn test_releasing_jump_cuts_upward_velocity() {
    let mut c = controller_with(LocomotionTunables {
        jump_amount: 10.0,
        jump_cut_multiplier: 2.0,
        ..LocomotionTunables::default()
    });
    c.handle_input(InputEvent::JumpPerformed);
    assert_eq!(c.body().velocity.y, 10.0);

    c.handle_input(InputEvent::JumpCanceled);
    assert_eq!(c.body().velocity.y, 5.0);
}

// ============================================================================
// State Machine Guarantees
// ============================================================================

#[test]
fn test_switch_to_current_behavior_has_no_side_effects() {
    let mut c = controller();
    c.switch_state(BehaviorKind::GroundMovement);
    let transitions = c.transition_count();
    let raised: Vec<String> = c.animator().raised().map(str::to_owned).collect();

    c.switch_state(BehaviorKind::GroundMovement);

    assert_eq!(c.transition_count(), transitions);
    let after: Vec<String> = c.animator().raised().map(str::to_owned).collect();
    assert_eq!(raised, after);
}

#[test]
fn test_round_trips_through_idle_leave_no_subscriptions() {
    for kind in BehaviorKind::ALL {
        let mut c = controller();
        c.switch_state(kind);
        c.switch_state(BehaviorKind::Idle);
        assert_eq!(c.live_subscription_count(), 0, "leaked subscription via {kind}");
        assert_one_shape(&c);
        assert_eq!(c.context().wall_normal, None);
    }
}

#[test]
fn test_only_active_behavior_owns_subscriptions() {
    let mut c = controller();
    for kind in [
        BehaviorKind::Airborne,
        BehaviorKind::Sliding,
        BehaviorKind::WallSlide,
        BehaviorKind::Diving,
    ] {
        c.switch_state(kind);
        assert!(
            c.subscriptions()
                .subscribers(InputEventKind::JumpPerformed)
                .chain(c.subscriptions().subscribers(InputEventKind::JumpCanceled))
                .all(|owner| owner == kind)
        );
    }
}

#[test]
fn test_jump_cancel_outside_airborne_is_ignored() {
    let mut c = controller();
    c.body_mut().velocity.y = 20.0;
    c.handle_input(InputEvent::JumpCanceled);
    assert_eq!(c.body().velocity.y, 20.0);
}

// ============================================================================
// Tick Ordering
// ============================================================================

#[test]
fn test_physics_step_uses_previous_heading() {
    let mut c = controller();
    c.handle_input(InputEvent::MovementPerformed(Vec2::Y));
    c.update(FRAME_DT);
    c.update(FRAME_DT);
    assert_eq!(c.current_behavior(), BehaviorKind::GroundMovement);
    c.fixed_update(FIXED_DT, 0.0);

    c.handle_input(InputEvent::MovementPerformed(Vec2::X));
    c.fixed_update(FIXED_DT, 0.0);
    let velocity = c.body().velocity;
    assert!(velocity.x.abs() < 1e-5, "first step after a turn still runs along +Z");
    assert!(velocity.z > 0.0);

    c.fixed_update(FIXED_DT, 0.0);
    assert!(c.body().velocity.x > 0.0);
}

#[test]
fn test_camera_yaw_rotates_heading() {
    let mut c = controller();
    c.handle_input(InputEvent::MovementPerformed(Vec2::Y));
    c.fixed_update(FIXED_DT, -90.0);

    let heading = c.context().move_direction;
    assert!((heading - Vec3::NEG_X).length() < 1e-4);
    assert!((c.context().target_angle + 90.0).abs() < 1e-4);
}

#[test]
fn test_speed_target_clamped_after_each_step() {
    let mut c = controller();
    c.handle_input(InputEvent::MovementPerformed(Vec2::new(-0.9, 0.9)));
    for _ in 0..10 {
        c.update(FRAME_DT);
        c.fixed_update(FIXED_DT, 30.0);
        assert!(c.context().speed_target.abs() <= c.tunables().max_speed);
    }
}

// ============================================================================
// Dive, Slide, Rollout, Wall Slide
// ============================================================================

#[test]
fn test_dive_slide_rollout_wall_jump_chain() {
    let mut c = controller();
    c.handle_input(InputEvent::MovementPerformed(Vec2::Y));
    c.update(FRAME_DT);
    assert_eq!(c.current_behavior(), BehaviorKind::GroundMovement);

    // Dive: low shape, hop, forward boost.
    c.handle_input(InputEvent::DivePerformed);
    assert_eq!(c.current_behavior(), BehaviorKind::Diving);
    assert_one_shape(&c);
    assert_eq!(c.context().active_shape(), ColliderShape::Diving);
    assert!(c.body().velocity.y > 0.0);

    // Land on the belly.
    c.body_mut().velocity.y = -1.0;
    c.update(FRAME_DT);
    assert_eq!(c.current_behavior(), BehaviorKind::Sliding);
    assert_one_shape(&c);
    assert!(c.context().current_speed >= c.tunables().slide_initial_speed - 1e-4);

    // Jump out of the slide.
    c.handle_input(InputEvent::JumpPerformed);
    assert_eq!(c.current_behavior(), BehaviorKind::Rollout);
    assert_eq!(c.context().active_shape(), ColliderShape::Normal);
    assert_eq!(c.context().current_speed, c.tunables().rollout_speed);
    assert!((c.body().velocity.y - c.tunables().roll_height).abs() < 1e-5);

    // Hit a wall in mid-air.
    c.body_mut().position.y = 2.0;
    assert!(!c.refresh_ground_contact());
    c.collision_enter(&wall(Vec3::NEG_Z));
    assert_eq!(c.current_behavior(), BehaviorKind::WallSlide);
    assert_eq!(c.context().wall_normal, Some(Vec3::NEG_Z));
    assert_eq!(c.context().current_speed, 0.0);

    // Sliding down is capped.
    c.body_mut().velocity.y = -10.0;
    c.fixed_update(FIXED_DT, 0.0);
    assert_eq!(c.body().velocity.y, -c.tunables().wall_slide_speed);

    // Wall jump.
    c.handle_input(InputEvent::JumpPerformed);
    assert_eq!(c.current_behavior(), BehaviorKind::Airborne);
    assert_eq!(c.context().wall_normal, None);
    assert!((c.body().velocity.z + c.tunables().max_speed).abs() < 1e-5);
    assert!((c.body().velocity.y - c.tunables().jump_amount).abs() < 1e-5);
    assert!((facing_forward(c.body().rotation) - Vec3::NEG_Z).length() < 1e-4);
    assert_eq!(c.live_subscription_count(), 1);
}

#[test]
fn test_dive_into_wall_bonks() {
    let mut c = controller();
    c.handle_input(InputEvent::DivePerformed);
    assert_eq!(c.current_behavior(), BehaviorKind::Diving);

    c.collision_enter(&wall(Vec3::NEG_Z));
    assert_eq!(c.current_behavior(), BehaviorKind::Airborne);
    assert_eq!(c.context().current_speed, 0.0);
    assert_eq!(c.context().active_shape(), ColliderShape::Normal);
}

#[test]
fn test_dive_not_allowed_while_sliding() {
    let mut c = controller();
    c.switch_state(BehaviorKind::Sliding);
    c.handle_input(InputEvent::DivePerformed);
    assert_eq!(c.current_behavior(), BehaviorKind::Sliding);
}

#[test]
fn test_leaving_wall_falls() {
    let mut c = controller();
    c.switch_state(BehaviorKind::Rollout);
    c.body_mut().position.y = 3.0;
    c.refresh_ground_contact();
    c.collision_enter(&wall(Vec3::X));
    c.collision_stay(&wall(Vec3::new(1.0, 0.1, 0.0)));
    assert!(c.context().wall_normal.is_some_and(|n| n.y > 0.0));

    c.collision_exit(&wall(Vec3::new(1.0, 0.1, 0.0)));
    assert_eq!(c.current_behavior(), BehaviorKind::Airborne);
    assert_eq!(c.previous_behavior(), Some(BehaviorKind::WallSlide));
}

#[test]
fn test_unrelated_contact_ending_keeps_wall_slide() {
    let mut c = controller();
    c.switch_state(BehaviorKind::Rollout);
    c.body_mut().position.y = 3.0;
    c.refresh_ground_contact();
    c.collision_enter(&wall(Vec3::X));
    assert_eq!(c.current_behavior(), BehaviorKind::WallSlide);

    // A ledge underfoot touches and separates while the wall is still held.
    c.collision_enter(&wall(Vec3::NEG_Y));
    c.collision_stay(&wall(Vec3::X));
    c.collision_exit(&wall(Vec3::NEG_Y));
    assert_eq!(c.current_behavior(), BehaviorKind::WallSlide);
    assert_eq!(c.context().wall_normal, Some(Vec3::X));

    // A second wall at a corner ends too.
    c.collision_enter(&wall(Vec3::Z));
    c.collision_exit(&wall(Vec3::Z));
    assert_eq!(c.current_behavior(), BehaviorKind::WallSlide);

    c.collision_exit(&wall(Vec3::X));
    assert_eq!(c.current_behavior(), BehaviorKind::Airborne);
}

#[test]
fn test_slide_runs_out_to_idle() {
    let mut c = controller();
    c.switch_state(BehaviorKind::Sliding);
    let frames = (c.context().current_speed / (c.tunables().slide_deccel_amount * FRAME_DT)) as usize + 2;
    for _ in 0..frames {
        c.update(FRAME_DT);
    }
    assert_eq!(c.current_behavior(), BehaviorKind::Idle);
    assert_one_shape(&c);
}
