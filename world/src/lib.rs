#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state for a Gemfire dungeon level.
//!
//! The world owns everything that outlives a frame: the immutable tile
//! grid, the hero pose fed back from the physics engine, gem and monster
//! actors, the bullet pool, and the session clock. Systems submit
//! [`Command`] values; `apply` executes them in the fixed tick order and
//! broadcasts [`Event`] values for the physics, scene, and audio
//! collaborators. Nothing here blocks or suspends; decoding is a bounded
//! synchronous pass that runs once before the simulation starts.

mod bullets;
mod decode;
mod grid;

pub use decode::{decode_rgba, Level};
pub use grid::{Tile, TileGrid};

use std::time::Duration;

use gemfire_core::{
    Command, ContactBody, Event, GemId, MonsterId, SpawnKind, BULLET_IMPULSE,
    BULLET_MUZZLE_HEIGHT, MAX_BULLETS, MAX_ELEVATION,
};
use glam::Vec3;

use bullets::BulletPool;

const HERO_SPAWN_HEIGHT: f32 = 0.5;
const MONSTER_SPAWN_HEIGHT: f32 = 0.2;
const GEM_SPAWN_HEIGHT: f32 = 0.1;

#[derive(Clone, Copy, Debug)]
struct Hero {
    position: Vec3,
    yaw: f32,
    elevation: f32,
}

#[derive(Clone, Copy, Debug)]
struct Gem {
    id: GemId,
    position: Vec3,
    collected: bool,
}

#[derive(Clone, Copy, Debug)]
struct Monster {
    id: MonsterId,
    position: Vec3,
}

/// Represents the authoritative state of one dungeon level session.
#[derive(Clone, Debug)]
pub struct World {
    grid: TileGrid,
    hero: Hero,
    gems: Vec<Gem>,
    monsters: Vec<Monster>,
    bullets: BulletPool,
    clock: Duration,
    tick_index: u64,
}

impl World {
    /// Creates a world from a decoded level.
    ///
    /// Actor identifiers follow the raster order of the spawn list, so the
    /// same image always produces the same identifiers. The decoder has
    /// already guaranteed exactly one hero spawn.
    #[must_use]
    pub fn new(level: Level) -> Self {
        let (grid, spawns) = level.into_parts();

        let mut hero = Hero {
            position: Vec3::new(0.5, HERO_SPAWN_HEIGHT, 0.5),
            yaw: 0.0,
            elevation: 0.0,
        };
        let mut gems = Vec::new();
        let mut monsters = Vec::new();

        for spawn in &spawns {
            match spawn.kind {
                SpawnKind::Hero => {
                    hero.position = Vec3::new(spawn.x, HERO_SPAWN_HEIGHT, spawn.y);
                }
                SpawnKind::Monster => monsters.push(Monster {
                    id: MonsterId::new(monsters.len() as u32),
                    position: Vec3::new(spawn.x, MONSTER_SPAWN_HEIGHT, spawn.y),
                }),
                SpawnKind::Gem => gems.push(Gem {
                    id: GemId::new(gems.len() as u32),
                    position: Vec3::new(spawn.x, GEM_SPAWN_HEIGHT, spawn.y),
                    collected: false,
                }),
            }
        }

        Self {
            grid,
            hero,
            gems,
            monsters,
            bullets: BulletPool::new(MAX_BULLETS),
            clock: Duration::ZERO,
            tick_index: 0,
        }
    }

    fn collect_gem(&mut self, gem_id: GemId, out_events: &mut Vec<Event>) {
        let Some(gem) = self.gems.iter_mut().find(|gem| gem.id == gem_id) else {
            return;
        };
        if gem.collected {
            return;
        }
        gem.collected = true;
        out_events.push(Event::GemCollected { gem: gem_id });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.clock = world.clock.saturating_add(dt);
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::SyncHeroPose { position, yaw } => {
            world.hero.position = position;
            world.hero.yaw = yaw;
        }
        Command::ApplyHeroImpulse { impulse } => {
            // Movement is accumulated by the physics engine, not here.
            out_events.push(Event::HeroImpulse { impulse });
        }
        Command::TurnHero {
            torque,
            elevation_delta,
        } => {
            world.hero.elevation =
                (world.hero.elevation + elevation_delta).clamp(-MAX_ELEVATION, MAX_ELEVATION);
            out_events.push(Event::HeroTorque { torque });
            out_events.push(Event::ElevationChanged {
                elevation: world.hero.elevation,
            });
        }
        Command::FireBullet => {
            let direction = firing_direction(world.hero.yaw, world.hero.elevation);
            let position = Vec3::new(
                world.hero.position.x,
                BULLET_MUZZLE_HEIGHT,
                world.hero.position.z,
            );
            let impulse = direction * BULLET_IMPULSE;

            let (bullet, retired) = world.bullets.spawn(position, impulse);
            if let Some(retired) = retired {
                out_events.push(Event::BulletRetired { bullet: retired });
            }
            out_events.push(Event::BulletSpawned {
                bullet,
                position,
                impulse,
            });
        }
        Command::ReportContact { a, b } => {
            for body in [a, b] {
                if let ContactBody::Gem(gem_id) = body {
                    world.collect_gem(gem_id, out_events);
                }
            }
        }
    }
}

/// Unit-length firing direction combining hero yaw and camera elevation.
fn firing_direction(yaw: f32, elevation: f32) -> Vec3 {
    Vec3::new(
        elevation.cos() * -yaw.sin(),
        elevation.sin(),
        elevation.cos() * -yaw.cos(),
    )
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use gemfire_core::{BulletHandle, GemId, MonsterId};
    use glam::Vec3;

    use super::{TileGrid, World};

    /// Provides read-only access to the finalized tile grid.
    #[must_use]
    pub fn grid(world: &World) -> &TileGrid {
        &world.grid
    }

    /// Simulated time accumulated since the session started.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.clock
    }

    /// Number of ticks processed since the session started.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Resolves a bullet handle, if its slot generation is still current.
    ///
    /// Stale handles held across a pool eviction resolve to `None` instead
    /// of observing the replacement bullet's state.
    #[must_use]
    pub fn bullet_state(world: &World, bullet: BulletHandle) -> Option<BulletSnapshot> {
        world.bullets.get(bullet).map(|state| BulletSnapshot {
            bullet,
            position: state.position,
            impulse: state.impulse,
        })
    }

    /// Captures the hero's current pose.
    #[must_use]
    pub fn hero_pose(world: &World) -> HeroPose {
        HeroPose {
            position: world.hero.position,
            yaw: world.hero.yaw,
            elevation: world.hero.elevation,
        }
    }

    /// Captures a read-only view of the gems in the level.
    #[must_use]
    pub fn gem_view(world: &World) -> GemView {
        GemView {
            snapshots: world
                .gems
                .iter()
                .map(|gem| GemSnapshot {
                    id: gem.id,
                    position: gem.position,
                    collected: gem.collected,
                })
                .collect(),
        }
    }

    /// Captures a read-only view of the monsters in the level.
    #[must_use]
    pub fn monster_view(world: &World) -> MonsterView {
        MonsterView {
            snapshots: world
                .monsters
                .iter()
                .map(|monster| MonsterSnapshot {
                    id: monster.id,
                    position: monster.position,
                })
                .collect(),
        }
    }

    /// Captures a read-only view of the live bullets, oldest first.
    #[must_use]
    pub fn bullet_view(world: &World) -> BulletView {
        BulletView {
            snapshots: world
                .bullets
                .iter()
                .map(|(handle, state)| BulletSnapshot {
                    bullet: handle,
                    position: state.position,
                    impulse: state.impulse,
                })
                .collect(),
        }
    }

    /// Immutable representation of the hero's pose used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct HeroPose {
        /// Presentation position reported by the physics engine.
        pub position: Vec3,
        /// Yaw angle in radians.
        pub yaw: f32,
        /// Camera elevation angle in radians.
        pub elevation: f32,
    }

    /// Read-only snapshot describing all gems within the level.
    #[derive(Clone, Debug)]
    pub struct GemView {
        snapshots: Vec<GemSnapshot>,
    }

    impl GemView {
        /// Iterator over the captured gem snapshots in identifier order.
        pub fn iter(&self) -> impl Iterator<Item = &GemSnapshot> {
            self.snapshots.iter()
        }

        /// Number of gems that have not been collected yet.
        #[must_use]
        pub fn remaining(&self) -> usize {
            self.snapshots
                .iter()
                .filter(|snapshot| !snapshot.collected)
                .count()
        }
    }

    /// Immutable representation of a single gem's state.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct GemSnapshot {
        /// Identifier assigned to the gem in raster order.
        pub id: GemId,
        /// World position of the gem.
        pub position: Vec3,
        /// Whether the gem was already consumed by a contact.
        pub collected: bool,
    }

    /// Read-only snapshot describing all monsters within the level.
    #[derive(Clone, Debug)]
    pub struct MonsterView {
        snapshots: Vec<MonsterSnapshot>,
    }

    impl MonsterView {
        /// Iterator over the captured monster snapshots in identifier order.
        pub fn iter(&self) -> impl Iterator<Item = &MonsterSnapshot> {
            self.snapshots.iter()
        }

        /// Number of monsters in the level.
        #[must_use]
        pub fn len(&self) -> usize {
            self.snapshots.len()
        }

        /// Reports whether the level contains no monsters.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.snapshots.is_empty()
        }
    }

    /// Immutable representation of a single monster's state.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct MonsterSnapshot {
        /// Identifier assigned to the monster in raster order.
        pub id: MonsterId,
        /// World position of the monster.
        pub position: Vec3,
    }

    /// Read-only snapshot of the live bullets, oldest first.
    #[derive(Clone, Debug)]
    pub struct BulletView {
        snapshots: Vec<BulletSnapshot>,
    }

    impl BulletView {
        /// Iterator over the captured bullet snapshots, oldest first.
        pub fn iter(&self) -> impl Iterator<Item = &BulletSnapshot> {
            self.snapshots.iter()
        }

        /// Number of live bullets.
        #[must_use]
        pub fn len(&self) -> usize {
            self.snapshots.len()
        }

        /// Reports whether no bullets have been fired yet.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.snapshots.is_empty()
        }
    }

    /// Immutable representation of a single bullet's spawn state.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct BulletSnapshot {
        /// Handle of the bullet's pool slot at its current generation.
        pub bullet: BulletHandle,
        /// Muzzle position the bullet was fired from.
        pub position: Vec3,
        /// Impulse applied to the bullet body on spawn.
        pub impulse: Vec3,
    }
}
