//! Level image decoder.
//!
//! Converts an RGBA8 pixel buffer into a [`TileGrid`] plus an ordered list
//! of entity spawn records. The palette is matched exactly, byte for byte;
//! anything unrecognized becomes `Rock` so stray colors degrade to solid
//! terrain instead of corrupting the level.
//!
//! ## Palette
//!   black `(0,0,0)` — floor
//!   green `(0,255,0)` — floor + hero spawn
//!   red `(255,0,0)` — floor + monster spawn
//!   blue `(0,0,255)` — floor + gem spawn
//!   gray `(128,128,128)` — wall
//!   anything else — rock

use gemfire_core::{DecodeError, SpawnKind, SpawnPoint, TileKind};

use crate::grid::TileGrid;

const BYTES_PER_PIXEL: usize = 4;

/// Decoded level: the finalized tile grid and its raster-ordered spawns.
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    grid: TileGrid,
    spawns: Vec<SpawnPoint>,
}

impl Level {
    /// Read access to the finalized tile grid.
    #[must_use]
    pub const fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Spawn records in raster scan order.
    #[must_use]
    pub fn spawns(&self) -> &[SpawnPoint] {
        &self.spawns
    }

    /// Consumes the level, yielding the grid and spawn list.
    #[must_use]
    pub fn into_parts(self) -> (TileGrid, Vec<SpawnPoint>) {
        (self.grid, self.spawns)
    }
}

/// Decodes an RGBA8 pixel buffer into a [`Level`].
///
/// Marker pixels spawn their entity at the pixel center `(x + 0.5, y + 0.5)`
/// and classify the tile underneath as floor. Spawn records preserve raster
/// scan order so downstream entity identifiers stay deterministic. The alpha
/// channel is ignored.
///
/// Fails fast on malformed dimensions, a mismatched buffer length, and on
/// zero or multiple hero markers; no partial level is usable.
pub fn decode_rgba(pixels: &[u8], width: u32, height: u32) -> Result<Level, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyDimensions { width, height });
    }

    let expected = width as usize * height as usize * BYTES_PER_PIXEL;
    if pixels.len() != expected {
        return Err(DecodeError::BufferSizeMismatch {
            expected,
            actual: pixels.len(),
        });
    }

    let mut kinds = Vec::with_capacity(width as usize * height as usize);
    let mut spawns = Vec::new();
    let mut hero_count = 0u32;

    for y in 0..height {
        for x in 0..width {
            let offset = (y as usize * width as usize + x as usize) * BYTES_PER_PIXEL;
            let (kind, spawn) = classify(pixels[offset], pixels[offset + 1], pixels[offset + 2]);
            if let Some(spawn_kind) = spawn {
                if spawn_kind == SpawnKind::Hero {
                    hero_count += 1;
                }
                spawns.push(SpawnPoint {
                    kind: spawn_kind,
                    x: x as f32 + 0.5,
                    y: y as f32 + 0.5,
                });
            }
            kinds.push(kind);
        }
    }

    match hero_count {
        0 => Err(DecodeError::MissingHeroSpawn),
        1 => Ok(Level {
            grid: TileGrid::from_kinds(width, height, kinds),
            spawns,
        }),
        count => Err(DecodeError::AmbiguousHeroSpawn { count }),
    }
}

/// Exact-match pixel classification.
///
/// `Door` is a valid tile kind but no palette entry produces it; unmatched
/// colors become `Rock`, never `Door`.
const fn classify(red: u8, green: u8, blue: u8) -> (TileKind, Option<SpawnKind>) {
    match (red, green, blue) {
        (0, 0, 0) => (TileKind::Floor, None),
        (0, 255, 0) => (TileKind::Floor, Some(SpawnKind::Hero)),
        (255, 0, 0) => (TileKind::Floor, Some(SpawnKind::Monster)),
        (0, 0, 255) => (TileKind::Floor, Some(SpawnKind::Gem)),
        (128, 128, 128) => (TileKind::Wall, None),
        _ => (TileKind::Rock, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(rgb: (u8, u8, u8)) -> [u8; 4] {
        [rgb.0, rgb.1, rgb.2, 255]
    }

    fn buffer(colors: &[(u8, u8, u8)]) -> Vec<u8> {
        colors.iter().flat_map(|&rgb| pixel(rgb)).collect()
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(
            decode_rgba(&[], 0, 3),
            Err(DecodeError::EmptyDimensions {
                width: 0,
                height: 3,
            })
        );
    }

    #[test]
    fn rejects_mismatched_buffer_length() {
        let pixels = buffer(&[(0, 0, 0), (0, 255, 0)]);
        assert_eq!(
            decode_rgba(&pixels, 2, 2),
            Err(DecodeError::BufferSizeMismatch {
                expected: 16,
                actual: 8,
            })
        );
    }

    #[test]
    fn rejects_levels_without_a_hero() {
        let pixels = buffer(&[(0, 0, 0), (255, 0, 0)]);
        assert_eq!(
            decode_rgba(&pixels, 2, 1),
            Err(DecodeError::MissingHeroSpawn)
        );
    }

    #[test]
    fn rejects_levels_with_multiple_heroes() {
        let pixels = buffer(&[(0, 255, 0), (0, 255, 0)]);
        assert_eq!(
            decode_rgba(&pixels, 2, 1),
            Err(DecodeError::AmbiguousHeroSpawn { count: 2 })
        );
    }

    #[test]
    fn unrecognized_colors_become_rock_not_door() {
        let pixels = buffer(&[(0, 255, 0), (127, 128, 128), (12, 34, 56)]);
        let level = decode_rgba(&pixels, 3, 1).expect("level decodes");

        for x in 1..3 {
            let tile = level.grid().tile_at(x, 0).expect("tile");
            assert_eq!(tile.kind(), TileKind::Rock);
        }
    }

    #[test]
    fn markers_sit_on_floor_tiles() {
        let pixels = buffer(&[(0, 255, 0), (255, 0, 0), (0, 0, 255)]);
        let level = decode_rgba(&pixels, 3, 1).expect("level decodes");

        for x in 0..3 {
            let tile = level.grid().tile_at(x, 0).expect("tile");
            assert_eq!(tile.kind(), TileKind::Floor);
        }
        assert_eq!(level.spawns().len(), 3);
    }
}
