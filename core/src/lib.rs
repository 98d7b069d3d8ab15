#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Gemfire engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems translate frame input into
//! [`Command`] values, the world executes those commands via its `apply`
//! entry point, and then broadcasts [`Event`] values for collaborators (the
//! physics engine, the scene builder, the audio host) to react to
//! deterministically.

use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Window during which successive taps extend an autofire burst.
pub const AUTOFIRE_TAP_WINDOW: Duration = Duration::from_millis(200);

/// Ceiling applied to the tap-derived fire rate, in shots per second.
pub const MAX_ROUNDS_PER_SECOND: u32 = 30;

/// Fixed capacity of the bullet pool; the oldest slot is recycled beyond it.
pub const MAX_BULLETS: usize = 100;

/// Half-extent of a bullet cube, in world units.
pub const BULLET_RADIUS: f32 = 0.05;

/// Magnitude of the impulse applied to a freshly fired bullet.
pub const BULLET_IMPULSE: f32 = 15.0;

/// Height above the floor at which bullets leave the hero.
pub const BULLET_MUZZLE_HEIGHT: f32 = 0.4;

/// Divisor applied to walk-gesture translations before clamping to [-1, 1].
pub const WALK_TRANSLATION_SCALE: f32 = 50.0;

/// Divisor applied to look-gesture translations before the angle mapping.
pub const LOOK_TRANSLATION_SCALE: f32 = 200.0;

/// Upper bound on the camera elevation angle, in radians (±45°).
pub const MAX_ELEVATION: f32 = std::f32::consts::FRAC_PI_4;

/// Terrain classification assigned to a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Open walkable ground.
    Floor,
    /// Solid masonry that is skinned with wall panels on exposed faces.
    Wall,
    /// Catch-all solid terrain decoded from unrecognized pixel colors.
    Rock,
    /// Wall-class cell rendered with the exit texture instead of brick.
    ///
    /// No pixel color maps to this kind today; it exists for downstream
    /// map editing and future palette entries.
    Door,
}

impl TileKind {
    /// Reports whether faces of this tile receive wall panels.
    #[must_use]
    pub const fn is_wall_class(self) -> bool {
        matches!(self, Self::Wall | Self::Door)
    }

    /// Reports whether the tile blocks movement.
    #[must_use]
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Wall | Self::Rock | Self::Door)
    }
}

/// One of the four sides of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    /// Side facing decreasing `y`.
    Top,
    /// Side facing increasing `x`.
    Right,
    /// Side facing increasing `y`.
    Bottom,
    /// Side facing decreasing `x`.
    Left,
}

impl Edge {
    /// All four edges in the order used for deterministic iteration.
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Grid offset of the neighboring tile across this edge.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Edge::Top => (0, -1),
            Edge::Right => (1, 0),
            Edge::Bottom => (0, 1),
            Edge::Left => (-1, 0),
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Edge::Top => 1 << 0,
            Edge::Right => 1 << 1,
            Edge::Bottom => 1 << 2,
            Edge::Left => 1 << 3,
        }
    }
}

/// Compact set of tile edges that require a wall panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeSet(u8);

impl EdgeSet {
    /// Set containing no edges.
    pub const EMPTY: EdgeSet = EdgeSet(0);

    /// Reports whether the set contains the provided edge.
    #[must_use]
    pub const fn contains(self, edge: Edge) -> bool {
        self.0 & edge.bit() != 0
    }

    /// Adds the provided edge to the set.
    pub fn insert(&mut self, edge: Edge) {
        self.0 |= edge.bit();
    }

    /// Returns a copy of the set with the provided edge added.
    #[must_use]
    pub const fn with(self, edge: Edge) -> Self {
        EdgeSet(self.0 | edge.bit())
    }

    /// Number of edges contained in the set.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Reports whether the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterator over the contained edges in [`Edge::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Edge> {
        Edge::ALL.into_iter().filter(move |edge| self.contains(*edge))
    }
}

/// Kind of actor requested by a colored marker pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnKind {
    /// The player-controlled hero; exactly one per level.
    Hero,
    /// A hostile monster.
    Monster,
    /// A collectible gem.
    Gem,
}

/// Entity spawn record extracted from a marker pixel.
///
/// Positions are expressed in tile space, centered on the marker pixel, so a
/// marker at pixel `(px, py)` spawns at `(px + 0.5, py + 0.5)`. Records are
/// emitted in raster scan order to keep entity identifiers deterministic.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Kind of actor to instantiate.
    pub kind: SpawnKind,
    /// Horizontal tile-space coordinate.
    pub x: f32,
    /// Vertical tile-space coordinate.
    pub y: f32,
}

/// Physics classification assigned to an actor's body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    /// The static level geometry (walls and floor).
    Map,
    /// The player-controlled hero body.
    Hero,
    /// Monster bodies. Gem bodies also use this class.
    Monster,
    /// Projectile bodies recycled through the bullet pool.
    Bullet,
}

/// Bit groups used by [`CollisionFilter`] masks.
pub mod collision {
    /// Mask matching nothing.
    pub const NONE: u32 = 0;
    /// Mask matching every collision group.
    pub const ALL: u32 = 0xFF;
    /// Group occupied by the static level geometry.
    pub const MAP: u32 = 1 << 0;
    /// Group occupied by the hero body.
    pub const HERO: u32 = 1 << 1;
    /// Group occupied by monster and gem bodies.
    pub const MONSTER: u32 = 1 << 2;
    /// Group occupied by bullet bodies.
    pub const BULLET: u32 = 1 << 3;
}

/// Collision and contact masks assigned to one actor class.
///
/// `collides_with` controls physical response while `contact_test` controls
/// which pairs report contact callbacks; the two are independent so bullets
/// can pass through the hero yet still be observed touching everything.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionFilter {
    category: u32,
    collides_with: u32,
    contact_test: u32,
}

impl CollisionFilter {
    /// Returns the fixed mask assignment for the provided actor class.
    ///
    /// This table is the single source of truth for who physically collides
    /// versus who merely triggers a contact callback; physics bindings must
    /// read it rather than hardcode masks.
    #[must_use]
    pub const fn for_actor(kind: ActorKind) -> Self {
        match kind {
            ActorKind::Map => Self {
                category: collision::MAP,
                collides_with: collision::ALL,
                contact_test: collision::ALL,
            },
            ActorKind::Hero => Self {
                category: collision::HERO,
                collides_with: collision::ALL ^ collision::BULLET,
                contact_test: collision::ALL,
            },
            ActorKind::Monster => Self {
                category: collision::MONSTER,
                collides_with: collision::ALL,
                contact_test: collision::ALL,
            },
            ActorKind::Bullet => Self {
                category: collision::BULLET,
                collides_with: collision::ALL ^ collision::HERO,
                contact_test: collision::ALL,
            },
        }
    }

    /// Group bit identifying what the actor is.
    #[must_use]
    pub const fn category(&self) -> u32 {
        self.category
    }

    /// Groups the actor physically collides with.
    #[must_use]
    pub const fn collides_with(&self) -> u32 {
        self.collides_with
    }

    /// Groups whose contacts are reported for this actor.
    #[must_use]
    pub const fn contact_test(&self) -> u32 {
        self.contact_test
    }
}

/// Unique identifier assigned to a gem actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GemId(u32);

impl GemId {
    /// Creates a new gem identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a monster actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonsterId(u32);

impl MonsterId {
    /// Creates a new monster identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Handle naming one slot of the bullet pool at one point in its reuse.
///
/// The slot index is stable for the lifetime of the pool while the
/// generation distinguishes successive bullets recycled through the same
/// slot, so a stale handle never observes its replacement's state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BulletHandle {
    slot: u32,
    generation: u32,
}

impl BulletHandle {
    /// Creates a handle from a slot index and generation tag.
    #[must_use]
    pub const fn new(slot: u32, generation: u32) -> Self {
        Self { slot, generation }
    }

    /// Index of the pool slot backing the bullet.
    #[must_use]
    pub const fn slot(&self) -> u32 {
        self.slot
    }

    /// Reuse generation of the slot when the handle was issued.
    #[must_use]
    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

/// Identity of one body participating in a reported contact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContactBody {
    /// The static level geometry.
    Level,
    /// The hero body.
    Hero,
    /// A monster body.
    Monster(MonsterId),
    /// A gem body.
    Gem(GemId),
    /// A bullet body.
    Bullet(BulletHandle),
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Feeds the physics engine's presentation pose back into the world.
    SyncHeroPose {
        /// Hero position reported by the physics engine.
        position: Vec3,
        /// Hero yaw angle in radians reported by the physics engine.
        yaw: f32,
    },
    /// Requests a world-space movement impulse on the hero body.
    ApplyHeroImpulse {
        /// Impulse already rotated into world space by the combat system.
        impulse: Vec3,
    },
    /// Requests a yaw torque and camera elevation change from a look drag.
    TurnHero {
        /// Torque magnitude to apply around the vertical axis.
        torque: f32,
        /// Signed change to the camera elevation angle, in radians.
        elevation_delta: f32,
    },
    /// Requests that a bullet be fired; emitted only after rate gating.
    FireBullet,
    /// Reports a physics contact between two bodies for resolution.
    ReportContact {
        /// First body of the contact pair.
        a: ContactBody,
        /// Second body of the contact pair.
        b: ContactBody,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Instructs the physics engine to apply an impulse to the hero body.
    HeroImpulse {
        /// World-space impulse accumulated by the physics engine.
        impulse: Vec3,
    },
    /// Instructs the physics engine to apply a yaw torque to the hero body.
    HeroTorque {
        /// Torque magnitude around the vertical axis.
        torque: f32,
    },
    /// Announces the clamped camera elevation for the camera collaborator.
    ElevationChanged {
        /// Elevation angle in radians, within `±MAX_ELEVATION`.
        elevation: f32,
    },
    /// Announces that a pool slot's previous bullet was evicted.
    ///
    /// Always precedes the [`Event::BulletSpawned`] that reuses the slot, so
    /// scene adapters can tear down the retired node before rebuilding it.
    BulletRetired {
        /// Handle of the bullet that was evicted.
        bullet: BulletHandle,
    },
    /// Announces a freshly fired bullet for the scene and physics adapters.
    BulletSpawned {
        /// Handle of the bullet's pool slot at its current generation.
        bullet: BulletHandle,
        /// Muzzle position of the bullet.
        position: Vec3,
        /// Impulse to apply to the bullet body.
        impulse: Vec3,
    },
    /// Announces that a gem was consumed by a contact.
    ///
    /// Emitted exactly once per gem; the audio collaborator treats it as the
    /// fire-and-forget pickup-sound trigger.
    GemCollected {
        /// Identifier of the collected gem.
        gem: GemId,
    },
}

/// Failures raised while decoding a level image into a tile grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum DecodeError {
    /// The image dimensions describe an empty pixel grid.
    #[error("level image has empty dimensions {width}x{height}")]
    EmptyDimensions {
        /// Width supplied by the caller.
        width: u32,
        /// Height supplied by the caller.
        height: u32,
    },
    /// The pixel buffer length disagrees with `width * height * 4`.
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch {
        /// Byte length implied by the dimensions.
        expected: usize,
        /// Byte length of the provided buffer.
        actual: usize,
    },
    /// No hero marker pixel was found; the combat loop has no actor to drive.
    #[error("level image contains no hero spawn marker")]
    MissingHeroSpawn,
    /// More than one hero marker pixel was found.
    #[error("level image contains {count} hero spawn markers, expected exactly one")]
    AmbiguousHeroSpawn {
        /// Number of hero markers encountered.
        count: u32,
    },
}

/// Failure raised by tile grid lookups outside the grid extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("tile ({x}, {y}) lies outside the {width}x{height} grid")]
pub struct OutOfBounds {
    /// Queried horizontal coordinate.
    pub x: u32,
    /// Queried vertical coordinate.
    pub y: u32,
    /// Width of the grid that rejected the query.
    pub width: u32,
    /// Height of the grid that rejected the query.
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::{
        collision, ActorKind, CollisionFilter, DecodeError, Edge, EdgeSet, SpawnKind, SpawnPoint,
        TileKind,
    };
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn hero_filter_never_collides_with_bullets() {
        let hero = CollisionFilter::for_actor(ActorKind::Hero);
        assert_eq!(hero.collides_with() & collision::BULLET, 0);
        assert_eq!(hero.contact_test() & collision::BULLET, collision::BULLET);
    }

    #[test]
    fn bullet_filter_never_collides_with_hero() {
        let bullet = CollisionFilter::for_actor(ActorKind::Bullet);
        assert_eq!(bullet.collides_with() & collision::HERO, 0);
        assert_eq!(bullet.contact_test() & collision::HERO, collision::HERO);
    }

    #[test]
    fn map_and_monster_filters_collide_with_everything() {
        for kind in [ActorKind::Map, ActorKind::Monster] {
            let filter = CollisionFilter::for_actor(kind);
            assert_eq!(filter.collides_with(), collision::ALL);
            assert_eq!(filter.contact_test(), collision::ALL);
        }
    }

    #[test]
    fn categories_are_distinct_bits() {
        let categories = [
            CollisionFilter::for_actor(ActorKind::Map).category(),
            CollisionFilter::for_actor(ActorKind::Hero).category(),
            CollisionFilter::for_actor(ActorKind::Monster).category(),
            CollisionFilter::for_actor(ActorKind::Bullet).category(),
        ];
        for (index, category) in categories.iter().enumerate() {
            assert_eq!(category.count_ones(), 1);
            for other in categories.iter().skip(index + 1) {
                assert_eq!(category & other, 0);
            }
        }
    }

    #[test]
    fn edge_set_tracks_inserted_edges() {
        let mut edges = EdgeSet::EMPTY;
        assert!(edges.is_empty());

        edges.insert(Edge::Left);
        edges.insert(Edge::Top);

        assert!(edges.contains(Edge::Left));
        assert!(edges.contains(Edge::Top));
        assert!(!edges.contains(Edge::Right));
        assert_eq!(edges.len(), 2);
        assert_eq!(edges.iter().collect::<Vec<_>>(), vec![Edge::Top, Edge::Left]);
    }

    #[test]
    fn edge_offsets_are_symmetric() {
        let sum: (i32, i32) = Edge::ALL
            .into_iter()
            .map(Edge::offset)
            .fold((0, 0), |acc, offset| (acc.0 + offset.0, acc.1 + offset.1));
        assert_eq!(sum, (0, 0));
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn spawn_point_round_trips_through_bincode() {
        let spawn = SpawnPoint {
            kind: SpawnKind::Gem,
            x: 3.5,
            y: 7.5,
        };
        assert_round_trip(&spawn);
    }

    #[test]
    fn tile_kind_round_trips_through_bincode() {
        assert_round_trip(&TileKind::Door);
    }

    #[test]
    fn collision_filter_round_trips_through_bincode() {
        assert_round_trip(&CollisionFilter::for_actor(ActorKind::Bullet));
    }

    #[test]
    fn decode_error_round_trips_through_bincode() {
        assert_round_trip(&DecodeError::AmbiguousHeroSpawn { count: 3 });
    }
}
