//! Locomotion Controller
//!
//! Owns the shared context, the state machine, the behavior table and the
//! collaborators (physics body, ground probe, animation sink). The host
//! drives it with two independent ticks and forwards input and collision
//! events.
//!
//! # Tick Order
//!
//! - `update(dt)`: the active behavior's per-frame hook sees the ground
//!   contact cached by the *previous* frame; the probe is queried afterwards.
//! - `fixed_update(dt, yaw)`: the active behavior's physics hook runs with
//!   the heading computed by the *previous* step; `target_angle`,
//!   `move_direction` and the `speed_target` clamp are refreshed afterwards.
//!
//! # Usage
//!
//! ```rust,ignore
//! use locomotion_engine::prelude::*;
//!
//! let mut controller = LocomotionController::builder()
//!     .tunables(LocomotionTunables::default())
//!     .body(SimpleBody::default())
//!     .ground_probe(GroundPlane::flat(0.0))
//!     .animator(AnimatorFlags::new())
//!     .build()?;
//!
//! controller.handle_input(InputEvent::MovementPerformed(Vec2::Y));
//! controller.update(frame_dt);
//! controller.fixed_update(fixed_dt, camera_yaw_degrees);
//! ```

use glam::Vec3;

use crate::animation::AnimationSink;
use crate::config::LocomotionTunables;
use crate::error::LocomotionError;
use crate::input::{InputEvent, InputSubscriptions};
use crate::physics::{ColliderShape, CollisionInfo, GroundCheckBox, GroundProbe, PhysicsBody};

use super::behavior::{BehaviorCx, BehaviorKind, BehaviorTable};
use super::context::LocomotionContext;
use super::state_machine::StateMachine;

/// Character locomotion driven by a finite set of behaviors.
pub struct LocomotionController<B, G, A> {
    context: LocomotionContext,
    machine: StateMachine,
    behaviors: BehaviorTable,
    subscriptions: InputSubscriptions,
    body: B,
    probe: G,
    animator: A,
    grounded: bool,
}

impl<B, G, A> LocomotionController<B, G, A>
where
    B: PhysicsBody,
    G: GroundProbe,
    A: AnimationSink,
{
    pub fn builder() -> LocomotionControllerBuilder<B, G, A> {
        LocomotionControllerBuilder::new()
    }

    /// Run one rendered frame.
    ///
    /// # Arguments
    /// * `dt` - Seconds since the previous frame
    pub fn update(&mut self, dt: f32) {
        self.with_cx(dt, |machine, behaviors, cx| machine.dispatch_update(behaviors, cx));
        self.grounded = self.query_ground();
    }

    /// Run one physics step.
    ///
    /// # Arguments
    /// * `fixed_dt` - Seconds covered by the step
    /// * `camera_yaw` - Camera yaw in degrees; input is camera-relative
    pub fn fixed_update(&mut self, fixed_dt: f32, camera_yaw: f32) {
        self.with_cx(fixed_dt, |machine, behaviors, cx| {
            machine.dispatch_fixed_update(behaviors, cx)
        });
        self.context.refresh_heading(camera_yaw);
        self.context.clamp_speed_target();
    }

    /// Feed one input event.
    ///
    /// Movement events update the context. Jump and dive are handled here
    /// for the behaviors that allow them. The event is then delivered to
    /// whichever behavior is active afterwards, if it subscribed.
    pub fn handle_input(&mut self, event: InputEvent) {
        let current = self.machine.current();
        match event {
            InputEvent::MovementPerformed(value) => self.context.set_movement_input(value),
            InputEvent::MovementCanceled => self.context.clear_movement_input(),
            InputEvent::JumpPerformed => {
                self.jump();
            }
            InputEvent::DivePerformed => {
                if matches!(
                    current,
                    BehaviorKind::GroundMovement | BehaviorKind::Idle | BehaviorKind::Airborne
                ) {
                    self.switch_state(BehaviorKind::Diving);
                }
            }
            InputEvent::JumpCanceled => {}
        }

        self.with_cx(0.0, |machine, behaviors, cx| {
            machine.dispatch_input(behaviors, cx, &event);
        });
    }

    /// Apply the jump impulse and become airborne.
    ///
    /// Only running or idle characters can jump; returns whether the jump
    /// happened.
    pub fn jump(&mut self) -> bool {
        if !matches!(
            self.machine.current(),
            BehaviorKind::GroundMovement | BehaviorKind::Idle
        ) {
            return false;
        }
        let jump_amount = self.context.tunables().jump_amount;
        self.body.apply_impulse(Vec3::Y, jump_amount);
        self.switch_state(BehaviorKind::Airborne);
        true
    }

    /// Transition to `next` immediately. Switching to the active behavior
    /// does nothing.
    pub fn switch_state(&mut self, next: BehaviorKind) {
        self.with_cx(0.0, |machine, behaviors, cx| machine.switch_state(behaviors, cx, next));
    }

    pub fn collision_enter(&mut self, contact: &CollisionInfo) {
        self.with_cx(0.0, |machine, behaviors, cx| {
            machine.dispatch_collision_enter(behaviors, cx, contact)
        });
    }

    pub fn collision_stay(&mut self, contact: &CollisionInfo) {
        self.with_cx(0.0, |machine, behaviors, cx| {
            machine.dispatch_collision_stay(behaviors, cx, contact)
        });
    }

    /// `contact` is the last known contact of the collision that ended.
    pub fn collision_exit(&mut self, contact: &CollisionInfo) {
        self.with_cx(0.0, |machine, behaviors, cx| {
            machine.dispatch_collision_exit(behaviors, cx, contact)
        });
    }

    /// Query the ground probe now and cache the result, bypassing the
    /// one-frame lag of [`Self::update`]. Use after teleporting the body.
    pub fn refresh_ground_contact(&mut self) -> bool {
        self.grounded = self.query_ground();
        self.grounded
    }

    /// Probe geometry for the current body pose.
    pub fn ground_check_box(&self) -> GroundCheckBox {
        GroundCheckBox::from_pose(
            self.body.position(),
            self.body.rotation(),
            &self.context.tunables().ground_check,
        )
    }

    pub fn current_behavior(&self) -> BehaviorKind {
        self.machine.current()
    }

    pub fn previous_behavior(&self) -> Option<BehaviorKind> {
        self.machine.previous()
    }

    pub fn transition_count(&self) -> u64 {
        self.machine.transition_count()
    }

    pub fn context(&self) -> &LocomotionContext {
        &self.context
    }

    pub fn tunables(&self) -> &LocomotionTunables {
        self.context.tunables()
    }

    /// Cached ground contact.
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    pub fn probe(&self) -> &G {
        &self.probe
    }

    pub fn probe_mut(&mut self) -> &mut G {
        &mut self.probe
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    pub fn subscriptions(&self) -> &InputSubscriptions {
        &self.subscriptions
    }

    /// Installed input handlers; only the active behavior may own any.
    pub fn live_subscription_count(&self) -> usize {
        self.subscriptions.live_count()
    }

    fn query_ground(&self) -> bool {
        let mask = self.context.tunables().ground_check.layer_mask;
        self.ground_check_box().test(&self.probe, mask)
    }

    fn with_cx<R, F>(&mut self, dt: f32, f: F) -> R
    where
        F: FnOnce(&mut StateMachine, &BehaviorTable, &mut BehaviorCx<'_>) -> R,
    {
        let mut cx = BehaviorCx::new(
            &mut self.context,
            &mut self.body,
            &mut self.animator,
            &mut self.subscriptions,
            dt,
            self.grounded,
        );
        f(&mut self.machine, &self.behaviors, &mut cx)
    }
}

/// Collects the controller's collaborators and validates its tunables.
pub struct LocomotionControllerBuilder<B, G, A> {
    tunables: LocomotionTunables,
    behaviors: Option<BehaviorTable>,
    body: Option<B>,
    probe: Option<G>,
    animator: Option<A>,
}

impl<B, G, A> LocomotionControllerBuilder<B, G, A>
where
    B: PhysicsBody,
    G: GroundProbe,
    A: AnimationSink,
{
    pub fn new() -> Self {
        Self {
            tunables: LocomotionTunables::default(),
            behaviors: None,
            body: None,
            probe: None,
            animator: None,
        }
    }

    pub fn tunables(mut self, tunables: LocomotionTunables) -> Self {
        self.tunables = tunables;
        self
    }

    /// Replace the standard behavior table.
    pub fn behaviors(mut self, behaviors: BehaviorTable) -> Self {
        self.behaviors = Some(behaviors);
        self
    }

    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    pub fn ground_probe(mut self, probe: G) -> Self {
        self.probe = Some(probe);
        self
    }

    pub fn animator(mut self, animator: A) -> Self {
        self.animator = Some(animator);
        self
    }

    /// Validate, wire collaborators and start in [`BehaviorKind::Idle`].
    pub fn build(self) -> Result<LocomotionController<B, G, A>, LocomotionError> {
        let body = self.body.ok_or(LocomotionError::MissingCollaborator("physics body"))?;
        let probe = self
            .probe
            .ok_or(LocomotionError::MissingCollaborator("ground probe"))?;
        let animator = self
            .animator
            .ok_or(LocomotionError::MissingCollaborator("animation sink"))?;
        self.tunables.validate()?;

        let mut controller = LocomotionController {
            context: LocomotionContext::new(self.tunables),
            machine: StateMachine::new(),
            behaviors: self.behaviors.unwrap_or_default(),
            subscriptions: InputSubscriptions::new(),
            body,
            probe,
            animator,
            grounded: false,
        };

        controller.context.set_active_shape(ColliderShape::Normal);
        controller.body.set_collider_enabled(ColliderShape::Normal, true);
        controller.body.set_collider_enabled(ColliderShape::Diving, false);
        controller.context.speed_target = self.tunables.max_speed;
        controller.machine.init(BehaviorKind::Idle);
        controller.grounded = controller.query_ground();

        log::info!(
            "locomotion controller ready: max_speed={} jump={} grounded={}",
            self.tunables.max_speed,
            self.tunables.jump_amount,
            controller.grounded
        );
        Ok(controller)
    }
}

impl<B, G, A> Default for LocomotionControllerBuilder<B, G, A>
where
    B: PhysicsBody,
    G: GroundProbe,
    A: AnimationSink,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationTrigger, AnimatorFlags};
    use crate::input::InputEventKind;
    use crate::physics::{GroundPlane, SimpleBody};
    use glam::Vec2;

    type TestController = LocomotionController<SimpleBody, GroundPlane, AnimatorFlags>;

    fn controller() -> TestController {
        LocomotionController::builder()
            .body(SimpleBody::default())
            .ground_probe(GroundPlane::flat(0.0))
            .animator(AnimatorFlags::new())
            .build()
            .expect("default controller builds")
    }

    #[test]
    fn test_build_starts_idle_on_normal_shape() {
        let c = controller();
        assert_eq!(c.current_behavior(), BehaviorKind::Idle);
        assert_eq!(c.previous_behavior(), None);
        assert_eq!(c.context().active_shape(), ColliderShape::Normal);
        assert!(c.body().collider_enabled(ColliderShape::Normal));
        assert!(!c.body().collider_enabled(ColliderShape::Diving));
        assert_eq!(c.context().speed_target, c.tunables().max_speed);
        assert!(c.is_grounded());
        // Init does not run Idle's enter hook.
        assert!(!c.animator().is_active(AnimationTrigger::Idle));
    }

    #[test]
    fn test_build_without_body_fails() {
        let result = LocomotionController::<SimpleBody, GroundPlane, AnimatorFlags>::builder()
            .ground_probe(GroundPlane::flat(0.0))
            .animator(AnimatorFlags::new())
            .build();
        assert!(matches!(
            result,
            Err(LocomotionError::MissingCollaborator("physics body"))
        ));
    }

    #[test]
    fn test_build_rejects_invalid_tunables() {
        let result = LocomotionController::builder()
            .tunables(LocomotionTunables {
                max_speed: -1.0,
                ..LocomotionTunables::default()
            })
            .body(SimpleBody::default())
            .ground_probe(GroundPlane::flat(0.0))
            .animator(AnimatorFlags::new())
            .build();
        assert!(matches!(
            result,
            Err(LocomotionError::InvalidTunable { field: "max_speed", .. })
        ));
    }

    #[test]
    fn test_movement_input_updates_context() {
        let mut c = controller();
        c.handle_input(InputEvent::MovementPerformed(Vec2::new(0.0, 0.5)));
        assert_eq!(c.context().movement_input, Vec2::new(0.0, 0.5));
        assert_eq!(c.context().direction, Vec2::Y);

        c.handle_input(InputEvent::MovementCanceled);
        assert_eq!(c.context().direction, Vec2::ZERO);
    }

    #[test]
    fn test_jump_from_idle() {
        let mut c = controller();
        c.handle_input(InputEvent::JumpPerformed);
        assert_eq!(c.current_behavior(), BehaviorKind::Airborne);
        assert_eq!(c.body().impulses(), &[Vec3::Y * c.tunables().jump_amount]);
        assert!(c.animator().is_active(AnimationTrigger::Jump));
        assert!(
            c.subscriptions()
                .is_subscribed(BehaviorKind::Airborne, InputEventKind::JumpCanceled)
        );
    }

    #[test]
    fn test_jump_ignored_while_airborne() {
        let mut c = controller();
        c.handle_input(InputEvent::JumpPerformed);
        c.handle_input(InputEvent::JumpPerformed);
        assert_eq!(c.body().impulses().len(), 1);
    }

    #[test]
    fn test_direct_jump_only_from_ground_states() {
        let mut c = controller();
        assert!(c.jump());
        assert_eq!(c.current_behavior(), BehaviorKind::Airborne);

        assert!(!c.jump());
        c.switch_state(BehaviorKind::Diving);
        assert!(!c.jump());
        c.switch_state(BehaviorKind::WallSlide);
        assert!(!c.jump());
        assert_eq!(c.current_behavior(), BehaviorKind::WallSlide);
        let jump = Vec3::Y * c.tunables().jump_amount;
        assert_eq!(c.body().impulses().iter().filter(|&&i| i == jump).count(), 1);
    }

    #[test]
    fn test_dive_from_airborne() {
        let mut c = controller();
        c.handle_input(InputEvent::JumpPerformed);
        c.handle_input(InputEvent::DivePerformed);
        assert_eq!(c.current_behavior(), BehaviorKind::Diving);
        assert_eq!(c.previous_behavior(), Some(BehaviorKind::Airborne));
        assert_eq!(c.live_subscription_count(), 0);
        assert_eq!(c.context().active_shape(), ColliderShape::Diving);
    }

    #[test]
    fn test_update_uses_cached_ground_contact() {
        let mut c = controller();
        c.probe_mut().height = None;

        // First frame still sees the ground cached at build.
        c.update(0.016);
        assert_eq!(c.current_behavior(), BehaviorKind::Idle);
        assert!(!c.is_grounded());

        c.update(0.016);
        assert_eq!(c.current_behavior(), BehaviorKind::Airborne);
    }

    #[test]
    fn test_fixed_update_refreshes_heading_after_dispatch() {
        let mut c = controller();
        c.handle_input(InputEvent::MovementPerformed(Vec2::X));
        assert_eq!(c.context().target_angle, 0.0);

        c.fixed_update(0.02, 0.0);
        assert!((c.context().target_angle - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_fixed_update_clamps_speed_target() {
        let mut c = controller();
        c.handle_input(InputEvent::MovementPerformed(Vec2::new(0.7, 0.7)));
        c.update(0.016);
        c.update(0.016);
        assert_eq!(c.current_behavior(), BehaviorKind::GroundMovement);
        assert!(c.context().speed_target > c.tunables().max_speed);

        c.fixed_update(0.02, 0.0);
        assert_eq!(c.context().speed_target, c.tunables().max_speed);
    }

    #[test]
    fn test_ground_check_box_follows_body() {
        let mut c = controller();
        c.body_mut().position = Vec3::new(3.0, 2.0, -1.0);
        let probe = c.ground_check_box();
        assert_eq!(probe.center, Vec3::new(3.0, 2.0, -1.0) + c.tunables().ground_check.offset);
        assert!(!c.refresh_ground_contact());
    }
}
