#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Declarative scene descriptors consumed by rendering backends.
//!
//! Walls are skinned per visible edge: every edge facing open space gets its
//! own textured panel, so interior faces between adjacent wall tiles are
//! never built. Spawn markers become prop descriptors that name the asset,
//! physics body and collision filter a backend should attach.

use gemfire_core::{
    ActorKind, CollisionFilter, Edge, SpawnKind, SpawnPoint, TileKind, BULLET_RADIUS,
};
use gemfire_world::{Level, Tile, TileGrid};
use glam::Vec3;

/// Texture variant applied to a wall panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WallTexture {
    /// Regular brickwork used for walls and rock faces.
    Brick,
    /// Exit texture rendered on door tiles.
    Exit,
}

/// Single upright quad skinning one visible edge of a wall tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallPanel {
    /// Texture drawn on the panel.
    pub texture: WallTexture,
    /// Panel width in world units; side panels overhang to hide seams.
    pub width: f32,
    /// Center of the panel in world space.
    pub position: Vec3,
    /// Rotation around the vertical axis facing the panel outward.
    pub yaw: f32,
}

/// Ground plane spanning the whole grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloorPlane {
    /// Plane width in world units.
    pub width: f32,
    /// Plane depth in world units.
    pub depth: f32,
    /// Center of the plane in world space.
    pub center: Vec3,
}

/// Physics body a backend should create for a prop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// Immovable body that still takes part in contact tests.
    Static,
    /// Simulated body driven by impulses.
    Dynamic,
}

/// Asset and physics recipe for one spawnable prop kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnDescriptor {
    /// Scene file holding the prop's model, if one exists.
    pub asset: Option<&'static str>,
    /// Node to extract from the scene file.
    pub node: Option<&'static str>,
    /// Uniform scale applied to the extracted node.
    pub scale: f32,
    /// Height above the floor at which the prop rests.
    pub height: f32,
    /// Physics body the backend should attach.
    pub body: BodyKind,
    /// Collision filter for the prop's body.
    pub filter: CollisionFilter,
    /// Whether the prop idles with a slow spin animation.
    pub spins: bool,
}

/// Returns the asset and physics recipe for a spawn marker kind.
#[must_use]
pub const fn spawn_descriptor(kind: SpawnKind) -> SpawnDescriptor {
    match kind {
        SpawnKind::Hero => SpawnDescriptor {
            asset: None,
            node: None,
            scale: 1.0,
            height: 0.5,
            body: BodyKind::Dynamic,
            filter: CollisionFilter::for_actor(ActorKind::Hero),
            spins: false,
        },
        SpawnKind::Monster => SpawnDescriptor {
            asset: Some("evil-bug-monster.dae"),
            node: Some("bug_obj_1"),
            scale: 0.2,
            height: 0.2,
            body: BodyKind::Static,
            filter: CollisionFilter::for_actor(ActorKind::Monster),
            spins: true,
        },
        SpawnKind::Gem => SpawnDescriptor {
            asset: Some("crystal.dae"),
            node: Some("crystal"),
            scale: 0.2,
            height: 0.1,
            body: BodyKind::Static,
            filter: CollisionFilter::for_actor(ActorKind::Monster),
            spins: true,
        },
    }
}

/// Prop placed in the scene from a decoded spawn marker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneProp {
    /// Kind of marker that produced the prop.
    pub kind: SpawnKind,
    /// Rest position of the prop in world space.
    pub position: Vec3,
    /// Asset and physics recipe for the prop.
    pub descriptor: SpawnDescriptor,
}

/// Complete static scene built from a decoded level.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Ground plane under the maze.
    pub floor: FloorPlane,
    /// Wall panels skinning every visible edge.
    pub panels: Vec<WallPanel>,
    /// Props spawned from the level's markers.
    pub props: Vec<SceneProp>,
    /// Collision filter for the level geometry body.
    pub level_filter: CollisionFilter,
    /// Radius backends should give bullet bodies.
    pub bullet_radius: f32,
}

/// Builds the static scene description for a decoded level.
#[must_use]
pub fn build_scene(level: &Level) -> Scene {
    let grid = level.grid();

    let mut panels = Vec::new();
    for tile in grid.tiles() {
        for edge in Edge::ALL {
            if tile.edges().contains(edge) {
                panels.push(panel_for_edge(tile, edge));
            }
        }
    }

    let props = level
        .spawns()
        .iter()
        .map(|spawn| prop_for_spawn(spawn))
        .collect();

    Scene {
        floor: floor_plane(grid),
        panels,
        props,
        level_filter: CollisionFilter::for_actor(ActorKind::Map),
        bullet_radius: BULLET_RADIUS,
    }
}

fn floor_plane(grid: &TileGrid) -> FloorPlane {
    let width = grid.width() as f32;
    let depth = grid.height() as f32;
    FloorPlane {
        width,
        depth,
        center: Vec3::new(width / 2.0, 0.0, depth / 2.0),
    }
}

/// Places one panel at the tile edge, facing away from the wall body.
///
/// Side panels are slightly wider than a tile so corners never show a gap
/// between two perpendicular faces.
fn panel_for_edge(tile: &Tile, edge: Edge) -> WallPanel {
    let x = tile.x() as f32;
    let y = tile.y() as f32;
    let texture = if tile.kind() == TileKind::Door {
        WallTexture::Exit
    } else {
        WallTexture::Brick
    };

    let (width, position, yaw) = match edge {
        Edge::Top => (
            1.0,
            Vec3::new(x + 0.5, 0.5, y),
            std::f32::consts::PI,
        ),
        Edge::Right => (
            1.1,
            Vec3::new(x + 1.0, 0.5, y + 0.5),
            std::f32::consts::FRAC_PI_2,
        ),
        Edge::Bottom => (1.0, Vec3::new(x + 0.5, 0.5, y + 1.0), 0.0),
        Edge::Left => (
            1.1,
            Vec3::new(x, 0.5, y + 0.5),
            -std::f32::consts::FRAC_PI_2,
        ),
    };

    WallPanel {
        texture,
        width,
        position,
        yaw,
    }
}

fn prop_for_spawn(spawn: &SpawnPoint) -> SceneProp {
    let descriptor = spawn_descriptor(spawn.kind);
    SceneProp {
        kind: spawn.kind,
        position: Vec3::new(spawn.x, descriptor.height, spawn.y),
        descriptor,
    }
}
