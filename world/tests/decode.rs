use gemfire_core::{DecodeError, Edge, SpawnKind, SpawnPoint, TileKind};
use gemfire_world::decode_rgba;

const BLACK: (u8, u8, u8) = (0, 0, 0);
const GREEN: (u8, u8, u8) = (0, 255, 0);
const RED: (u8, u8, u8) = (255, 0, 0);
const BLUE: (u8, u8, u8) = (0, 0, 255);
const GRAY: (u8, u8, u8) = (128, 128, 128);

#[test]
fn decoding_the_same_buffer_twice_is_deterministic() {
    let pixels = rgba(&[
        GRAY, GRAY, GRAY, GRAY, //
        GRAY, GREEN, RED, GRAY, //
        GRAY, BLUE, BLACK, GRAY, //
        GRAY, GRAY, GRAY, GRAY, //
    ]);

    let first = decode_rgba(&pixels, 4, 4).expect("first decode");
    let second = decode_rgba(&pixels, 4, 4).expect("second decode");

    assert_eq!(first, second);
}

#[test]
fn markers_become_raster_ordered_spawn_records() {
    let pixels = rgba(&[
        BLACK, GREEN, RED, BLACK, //
        RED, BLACK, BLACK, BLUE, //
    ]);

    let level = decode_rgba(&pixels, 4, 2).expect("level decodes");

    assert_eq!(
        level.spawns(),
        &[
            SpawnPoint {
                kind: SpawnKind::Hero,
                x: 1.5,
                y: 0.5,
            },
            SpawnPoint {
                kind: SpawnKind::Monster,
                x: 2.5,
                y: 0.5,
            },
            SpawnPoint {
                kind: SpawnKind::Monster,
                x: 0.5,
                y: 1.5,
            },
            SpawnPoint {
                kind: SpawnKind::Gem,
                x: 3.5,
                y: 1.5,
            },
        ],
    );
}

#[test]
fn decoded_walls_are_skinned_only_toward_open_space() {
    // A wall pocket around the hero: the inner faces must be skinned, the
    // faces between adjacent wall tiles must not.
    let pixels = rgba(&[
        GRAY, GRAY, GRAY, //
        GRAY, GREEN, GRAY, //
        GRAY, GRAY, GRAY, //
    ]);

    let level = decode_rgba(&pixels, 3, 3).expect("level decodes");
    let grid = level.grid();

    let north_wall = grid.tile_at(1, 0).expect("north wall");
    assert_eq!(north_wall.kind(), TileKind::Wall);
    assert!(north_wall.edges().contains(Edge::Bottom), "faces the hero");
    assert!(north_wall.edges().contains(Edge::Top), "faces the boundary");
    assert!(!north_wall.edges().contains(Edge::Left), "faces a wall");
    assert!(!north_wall.edges().contains(Edge::Right), "faces a wall");

    let west_wall = grid.tile_at(0, 1).expect("west wall");
    assert!(west_wall.edges().contains(Edge::Right));
    assert!(west_wall.edges().contains(Edge::Left));
    assert!(!west_wall.edges().contains(Edge::Top));
    assert!(!west_wall.edges().contains(Edge::Bottom));

    let floor = grid.tile_at(1, 1).expect("hero floor");
    assert_eq!(floor.kind(), TileKind::Floor);
    assert!(floor.edges().is_empty());
}

#[test]
fn malformed_buffers_fail_before_any_level_is_built() {
    let pixels = rgba(&[GREEN, BLACK]);

    assert_eq!(
        decode_rgba(&pixels, 3, 1),
        Err(DecodeError::BufferSizeMismatch {
            expected: 12,
            actual: 8,
        }),
    );
    assert_eq!(
        decode_rgba(&[], 0, 0),
        Err(DecodeError::EmptyDimensions {
            width: 0,
            height: 0,
        }),
    );
}

fn rgba(colors: &[(u8, u8, u8)]) -> Vec<u8> {
    colors
        .iter()
        .flat_map(|&(red, green, blue)| [red, green, blue, 255])
        .collect()
}
