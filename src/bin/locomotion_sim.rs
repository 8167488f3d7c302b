//! Locomotion Sim - headless run of the locomotion controller
//!
//! Run with: `cargo run --bin locomotion_sim -- [tunables.json]`
//!
//! Plays a scripted input timeline against a flat world with a wall ahead of
//! the spawn point: run, jump with an early release, dive, slide, roll out
//! of the slide into the wall, wall slide, release the stick, wall jump back
//! out, land and stop. Frames tick at 60 Hz and physics at 50 Hz through an
//! accumulator. Set `RUST_LOG=debug` to see every transition as it happens.

use anyhow::{Context, Result};
use glam::{Vec2, Vec3};

use locomotion_engine::prelude::*;

type SimController = LocomotionController<SimpleBody, GroundPlane, AnimatorFlags>;

const FRAME_DT: f32 = 1.0 / 60.0;
const FIXED_DT: f32 = 1.0 / 50.0;
const MAX_FIXED_STEPS_PER_FRAME: usize = 5;
const DURATION_S: f32 = 6.0;
const CAMERA_YAW_DEG: f32 = 0.0;

/// Wall plane facing -Z at this depth.
const WALL_Z: f32 = 24.0;
const BODY_RADIUS: f32 = 0.4;
/// Distance at which a body resting against the wall still counts as touching.
const CONTACT_SLOP: f32 = 0.01;

/// Scripted input: (time in seconds, event).
fn timeline() -> Vec<(f32, InputEvent)> {
    vec![
        (0.25, InputEvent::MovementPerformed(Vec2::new(0.0, 1.0))),
        (1.20, InputEvent::JumpPerformed),
        (1.30, InputEvent::JumpCanceled),
        (2.40, InputEvent::DivePerformed),
        // Belly lands around 2.82s; roll out before the slide reaches the wall.
        (2.88, InputEvent::JumpPerformed),
        (2.93, InputEvent::JumpCanceled),
        (3.25, InputEvent::MovementCanceled),
        (3.35, InputEvent::JumpPerformed),
        (3.45, InputEvent::JumpCanceled),
    ]
}

/// Contact state against the single wall.
#[derive(Debug, Default)]
struct WallContact {
    touching: bool,
}

impl WallContact {
    /// Push the body out of the wall and report enter/stay/exit.
    fn resolve(&mut self, controller: &mut SimController) {
        let body = controller.body_mut();
        let touching = body.position.z + BODY_RADIUS >= WALL_Z - CONTACT_SLOP;
        if touching {
            body.position.z = body.position.z.min(WALL_Z - BODY_RADIUS);
            body.velocity.z = body.velocity.z.min(0.0);
        }

        let contact = CollisionInfo::new(
            Vec3::new(body.position.x, body.position.y, WALL_Z),
            Vec3::NEG_Z,
        );
        match (self.touching, touching) {
            (false, true) => controller.collision_enter(&contact),
            (true, true) => controller.collision_stay(&contact),
            (true, false) => controller.collision_exit(&contact),
            (false, false) => {}
        }
        self.touching = touching;
    }
}

struct TraceEntry {
    time_s: f32,
    behavior: BehaviorKind,
    position: Vec3,
    speed: f32,
}

fn main() -> Result<()> {
    env_logger::init();

    let tunables = match std::env::args().nth(1) {
        Some(path) => LocomotionTunables::load(&path)
            .with_context(|| format!("load tunables from '{}'", path))?,
        None => LocomotionTunables::default(),
    };

    let (controller, trace) = run(tunables)?;

    println!("{:>7}  {:<16} {:>22}  {:>6}", "time", "behavior", "position", "speed");
    for entry in &trace {
        println!(
            "{:>6.2}s  {:<16} ({:>6.2}, {:>5.2}, {:>6.2})  {:>6.2}",
            entry.time_s,
            entry.behavior.name(),
            entry.position.x,
            entry.position.y,
            entry.position.z,
            entry.speed
        );
    }

    let raised: Vec<&str> = controller.animator().raised().collect();
    log::info!(
        "finished in {} after {} transitions; raised triggers: {:?}; live subscriptions: {}",
        controller.current_behavior(),
        controller.transition_count(),
        raised,
        controller.live_subscription_count()
    );
    Ok(())
}

/// Play the timeline to the end. Returns the controller and one trace entry
/// per behavior change, starting with the spawn state.
fn run(tunables: LocomotionTunables) -> Result<(SimController, Vec<TraceEntry>)> {
    let world = GroundPlane::flat(0.0);
    let mut controller: SimController = LocomotionController::builder()
        .tunables(tunables)
        .body(SimpleBody::default())
        .ground_probe(world)
        .animator(AnimatorFlags::new())
        .build()
        .context("build locomotion controller")?;

    let mut script = timeline().into_iter().peekable();
    let mut wall = WallContact::default();
    let mut accumulator = 0.0_f32;
    let mut time_s = 0.0_f32;
    let mut trace = vec![TraceEntry {
        time_s,
        behavior: controller.current_behavior(),
        position: controller.body().position,
        speed: 0.0,
    }];

    while time_s < DURATION_S {
        while let Some((_, event)) = script.next_if(|(at, _)| *at <= time_s) {
            log::info!("t={:.2}s input {:?}", time_s, event);
            controller.handle_input(event);
        }

        accumulator = (accumulator + FRAME_DT).min(FIXED_DT * MAX_FIXED_STEPS_PER_FRAME as f32);
        let mut steps = 0usize;
        while accumulator >= FIXED_DT && steps < MAX_FIXED_STEPS_PER_FRAME {
            controller.fixed_update(FIXED_DT, CAMERA_YAW_DEG);

            let support = controller.probe().support_height(controller.body().position);
            controller.body_mut().integrate(FIXED_DT, support);
            wall.resolve(&mut controller);

            accumulator -= FIXED_DT;
            steps += 1;
        }

        controller.update(FRAME_DT);
        time_s += FRAME_DT;

        let behavior = controller.current_behavior();
        if trace.last().map(|entry| entry.behavior) != Some(behavior) {
            trace.push(TraceEntry {
                time_s,
                behavior,
                position: controller.body().position,
                speed: controller.context().current_speed,
            });
        }
    }

    Ok((controller, trace))
}
