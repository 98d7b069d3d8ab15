#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that loads a level map and runs a headless session.
//!
//! Useful for validating map images outside the full game: it prints the
//! decoded scene summary, then simulates a short scripted walk-and-fire
//! session and reports every event the world broadcasts.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use gemfire_core::{Command, Event};
use gemfire_level_image::load_level;
use gemfire_scene::build_scene;
use gemfire_system_combat::{CombatStepper, FrameInput};
use gemfire_world::{apply, query, World};
use glam::Vec2;

/// Headless Gemfire session runner.
#[derive(Debug, Parser)]
#[command(name = "gemfire")]
struct Args {
    /// Path to the level map image.
    map: std::path::PathBuf,

    /// Number of simulation ticks to run.
    #[arg(long, default_value_t = 60)]
    ticks: u32,

    /// Length of one tick in milliseconds.
    #[arg(long, default_value_t = 16)]
    tick_millis: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = load_level(&args.map)?;
    let scene = build_scene(&level);
    let mut world = World::new(level);

    let grid = query::grid(&world);
    println!(
        "loaded {} ({}x{} tiles, {} wall panels, {} props)",
        args.map.display(),
        grid.width(),
        grid.height(),
        scene.panels.len(),
        scene.props.len()
    );

    let mut stepper = CombatStepper::default();
    let dt = Duration::from_millis(args.tick_millis);
    let mut commands = Vec::new();
    let mut events = Vec::new();

    for tick in 0..args.ticks {
        let now = query::clock(&world);
        let input = scripted_input(tick, now);

        commands.push(Command::Tick { dt });
        stepper.handle(&input, &query::hero_pose(&world), now, &mut commands);

        for command in commands.drain(..) {
            apply(&mut world, command, &mut events);
        }
        for event in events.drain(..) {
            report(tick, &event);
        }
    }

    let gems = query::gem_view(&world);
    println!(
        "session over after {:?}: {} gems remaining, {} bullets in flight",
        query::clock(&world),
        gems.remaining(),
        query::bullet_view(&world).len()
    );
    Ok(())
}

/// Walks forward every frame and taps the trigger once at the start.
fn scripted_input(tick: u32, now: Duration) -> FrameInput {
    FrameInput {
        walk: Vec2::new(0.0, -20.0),
        look: Vec2::ZERO,
        taps: if tick == 0 { vec![now] } else { Vec::new() },
    }
}

fn report(tick: u32, event: &Event) {
    match event {
        Event::TimeAdvanced { .. } => {}
        Event::HeroImpulse { impulse } => println!("[{tick}] hero impulse {impulse}"),
        Event::HeroTorque { torque } => println!("[{tick}] hero torque {torque}"),
        Event::ElevationChanged { elevation } => {
            println!("[{tick}] camera elevation {elevation}");
        }
        Event::BulletSpawned {
            bullet,
            position,
            impulse,
        } => println!(
            "[{tick}] bullet {}:{} fired from {position} with impulse {impulse}",
            bullet.slot(),
            bullet.generation()
        ),
        Event::BulletRetired { bullet } => println!(
            "[{tick}] bullet {}:{} retired to make room",
            bullet.slot(),
            bullet.generation()
        ),
        Event::GemCollected { gem } => {
            // The audio adapter keys its pickup chime off this event.
            println!("[{tick}] gem {} collected", gem.get());
        }
    }
}
