//! Locomotion State Machine
//!
//! Tracks which behavior is active and forwards every hook to it. A hook
//! that requests a transition gets it applied as soon as the hook returns:
//! exit the old behavior, swap, enter the new one. Enter hooks may request
//! further transitions; those chain up to [`MAX_CHAINED_TRANSITIONS`].
//!
//! # Usage
//!
//! ```rust,ignore
//! let behaviors = BehaviorTable::standard();
//! let mut machine = StateMachine::new();
//! machine.init(BehaviorKind::Idle);
//!
//! let mut cx = BehaviorCx::new(&mut context, &mut body, &mut animator, &mut subs, dt, grounded);
//! machine.dispatch_update(&behaviors, &mut cx);
//! ```

use crate::input::InputEvent;
use crate::physics::CollisionInfo;

use super::behavior::{Behavior, BehaviorCx, BehaviorKind, BehaviorTable};

/// Chained transitions allowed in one dispatch before the machine treats
/// the chain as an oscillation.
pub const MAX_CHAINED_TRANSITIONS: usize = 8;

/// Active-behavior bookkeeping.
#[derive(Debug, Default)]
pub struct StateMachine {
    current: Option<BehaviorKind>,
    previous: Option<BehaviorKind>,
    /// Set while exit/enter hooks run. Still set afterwards only if a hook
    /// panicked mid-switch, which leaves the machine unusable.
    switching: bool,
    transitions: u64,
}

impl StateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `initial` the active behavior without running any hooks.
    ///
    /// # Panics
    /// If called twice.
    pub fn init(&mut self, initial: BehaviorKind) {
        if let Some(current) = self.current {
            panic!("state machine initialized twice (active: {current}, requested: {initial})");
        }
        self.current = Some(initial);
    }

    /// The active behavior.
    ///
    /// # Panics
    /// Before [`StateMachine::init`].
    pub fn current(&self) -> BehaviorKind {
        self.current
            .unwrap_or_else(|| panic!("state machine used before init"))
    }

    /// Behavior swapped out by the last transition.
    pub fn previous(&self) -> Option<BehaviorKind> {
        self.previous
    }

    /// Transitions performed since init.
    pub fn transition_count(&self) -> u64 {
        self.transitions
    }

    /// Exit the active behavior and enter `next`, then follow any chain of
    /// transitions requested by enter hooks.
    ///
    /// Switching to the active behavior does nothing.
    ///
    /// # Panics
    /// On reentry, when an exit hook requests a transition, or when the
    /// chain exceeds [`MAX_CHAINED_TRANSITIONS`].
    pub fn switch_state(&mut self, behaviors: &BehaviorTable, cx: &mut BehaviorCx<'_>, next: BehaviorKind) {
        assert!(!self.switching, "reentrant switch to {next}");

        let mut next = next;
        let mut chained = 0;
        loop {
            let current = self.current();
            if current == next {
                log::trace!("switch to active behavior {next} ignored");
                return;
            }

            self.switching = true;

            cx.bind(current);
            behaviors.get(current).on_exit(cx);
            if let Some(requested) = cx.take_transition() {
                panic!("{current} requested a transition to {requested} from its exit hook");
            }

            self.previous = Some(current);
            self.current = Some(next);
            self.transitions += 1;
            log::debug!("{current} -> {next}");

            cx.bind(next);
            behaviors.get(next).on_enter(cx);

            self.switching = false;

            match cx.take_transition() {
                Some(requested) => {
                    chained += 1;
                    assert!(
                        chained <= MAX_CHAINED_TRANSITIONS,
                        "transition chain exceeded {MAX_CHAINED_TRANSITIONS} steps at {next} -> {requested}"
                    );
                    next = requested;
                }
                None => return,
            }
        }
    }

    pub fn dispatch_update(&mut self, behaviors: &BehaviorTable, cx: &mut BehaviorCx<'_>) {
        self.run_hook(behaviors, cx, |behavior, cx| behavior.on_update(cx));
    }

    pub fn dispatch_fixed_update(&mut self, behaviors: &BehaviorTable, cx: &mut BehaviorCx<'_>) {
        self.run_hook(behaviors, cx, |behavior, cx| behavior.on_fixed_update(cx));
    }

    pub fn dispatch_collision_enter(
        &mut self,
        behaviors: &BehaviorTable,
        cx: &mut BehaviorCx<'_>,
        contact: &CollisionInfo,
    ) {
        self.run_hook(behaviors, cx, |behavior, cx| behavior.on_collision_enter(cx, contact));
    }

    pub fn dispatch_collision_stay(
        &mut self,
        behaviors: &BehaviorTable,
        cx: &mut BehaviorCx<'_>,
        contact: &CollisionInfo,
    ) {
        self.run_hook(behaviors, cx, |behavior, cx| behavior.on_collision_stay(cx, contact));
    }

    pub fn dispatch_collision_exit(
        &mut self,
        behaviors: &BehaviorTable,
        cx: &mut BehaviorCx<'_>,
        contact: &CollisionInfo,
    ) {
        self.run_hook(behaviors, cx, |behavior, cx| behavior.on_collision_exit(cx, contact));
    }

    /// Deliver `event` to the active behavior if it subscribed to it.
    ///
    /// Returns whether the event was delivered.
    pub fn dispatch_input(
        &mut self,
        behaviors: &BehaviorTable,
        cx: &mut BehaviorCx<'_>,
        event: &InputEvent,
    ) -> bool {
        let current = self.current();
        let kind = event.kind();
        debug_assert!(
            cx.subscriptions().subscribers(kind).all(|owner| owner == current),
            "inactive behavior still subscribed to {kind:?}"
        );

        if !cx.is_subscribed(current, kind) {
            return false;
        }

        log::trace!("{kind:?} delivered to {current}");
        self.run_hook(behaviors, cx, |behavior, cx| behavior.on_input(cx, event));
        true
    }

    fn run_hook<F>(&mut self, behaviors: &BehaviorTable, cx: &mut BehaviorCx<'_>, hook: F)
    where
        F: FnOnce(&dyn Behavior, &mut BehaviorCx<'_>),
    {
        assert!(!self.switching, "hook dispatched during a transition");
        let current = self.current();

        cx.bind(current);
        hook(behaviors.get(current), cx);

        if let Some(next) = cx.take_transition() {
            self.switch_state(behaviors, cx, next);
        }
    }
}
