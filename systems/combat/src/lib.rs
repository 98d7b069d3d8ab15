#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-frame combat stepper.
//!
//! Runs once per simulation tick and translates the frame's gesture input
//! plus the hero's current pose into world commands, in a fixed order:
//! movement impulse first, then look handling, then rate-gated firing.
//! The stepper never mutates the world directly; the physics engine
//! accumulates the impulses broadcast by the world in response.

use std::time::Duration;

use gemfire_core::{Command, LOOK_TRANSLATION_SCALE, WALK_TRANSLATION_SCALE};
use gemfire_system_autofire::Autofire;
use gemfire_world::query::HeroPose;
use glam::{Vec2, Vec3};

/// Input snapshot gathered by the gesture adapter for one frame.
///
/// Translations are raw gesture points; the stepper owns the scaling and
/// clamping. Tap timestamps collected on other threads are queued here so
/// the autofire state keeps a single writer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Walk-drag translation; dragging toward the player moves forward.
    pub walk: Vec2,
    /// Look-drag translation.
    pub look: Vec2,
    /// Session timestamps of fire taps registered since the last frame.
    pub taps: Vec<Duration>,
}

/// Per-frame system that turns frame input into command batches.
#[derive(Debug, Default)]
pub struct CombatStepper {
    autofire: Autofire,
}

impl CombatStepper {
    /// Creates a stepper around the provided autofire controller.
    #[must_use]
    pub fn new(autofire: Autofire) -> Self {
        Self { autofire }
    }

    /// Consumes one frame of input and emits commands in tick order.
    pub fn handle(
        &mut self,
        input: &FrameInput,
        hero: &HeroPose,
        now: Duration,
        out: &mut Vec<Command>,
    ) {
        let local = Vec2::new(
            (input.walk.x / WALK_TRANSLATION_SCALE).clamp(-1.0, 1.0),
            (-input.walk.y / WALK_TRANSLATION_SCALE).clamp(-1.0, 1.0),
        );
        if local != Vec2::ZERO {
            out.push(Command::ApplyHeroImpulse {
                impulse: rotate_into_world(local, hero.yaw),
            });
        }

        if input.look != Vec2::ZERO {
            out.push(Command::TurnHero {
                torque: drag_angle(input.look.x),
                elevation_delta: drag_angle(input.look.y),
            });
        }

        for tap in &input.taps {
            self.autofire.register_tap(*tap);
        }
        self.autofire.handle(now, out);
    }
}

/// Rotates the clamped (strafe, forward) pair into world space by the yaw.
fn rotate_into_world(local: Vec2, yaw: f32) -> Vec3 {
    Vec3::new(
        local.x * yaw.cos() - local.y * yaw.sin(),
        0.0,
        local.x * -yaw.sin() - local.y * yaw.cos(),
    )
}

/// Maps a drag translation onto a rotation angle.
fn drag_angle(translation: f32) -> f32 {
    (translation / LOOK_TRANSLATION_SCALE).clamp(-1.0, 1.0).acos() - std::f32::consts::FRAC_PI_2
}
