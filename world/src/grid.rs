//! Immutable tile grid storage and edge-visibility finalization.

use gemfire_core::{Edge, EdgeSet, OutOfBounds, TileKind};

/// One cell of the level grid.
///
/// The kind is assigned by the decoder from the marker pixel color; the edge
/// set is derived once during finalization and never mutated afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    x: u32,
    y: u32,
    kind: TileKind,
    edges: EdgeSet,
}

impl Tile {
    /// Horizontal grid coordinate of the tile.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Vertical grid coordinate of the tile.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Terrain classification of the tile.
    #[must_use]
    pub const fn kind(&self) -> TileKind {
        self.kind
    }

    /// Edges that require a wall panel because they border open space.
    ///
    /// Always empty for tiles that are not wall-class.
    #[must_use]
    pub const fn edges(&self) -> EdgeSet {
        self.edges
    }
}

/// Exclusive owner of the level's tiles, stored row-major.
///
/// Construction is the only mutation point; once edge visibility is
/// finalized the grid is read-only and may be shared freely between the
/// renderer and the physics engine without locking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Builds a grid from row-major tile kinds and finalizes edge visibility.
    #[must_use]
    pub(crate) fn from_kinds(width: u32, height: u32, kinds: Vec<TileKind>) -> Self {
        debug_assert_eq!(kinds.len(), width as usize * height as usize);

        let tiles = kinds
            .into_iter()
            .enumerate()
            .map(|(index, kind)| Tile {
                x: index as u32 % width,
                y: index as u32 / width,
                kind,
                edges: EdgeSet::EMPTY,
            })
            .collect();

        let mut grid = Self {
            width,
            height,
            tiles,
        };
        grid.finalize_edges();
        grid
    }

    /// Number of tile columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of tile rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Bounds-checked tile lookup.
    pub fn tile_at(&self, x: u32, y: u32) -> Result<&Tile, OutOfBounds> {
        if x < self.width && y < self.height {
            Ok(&self.tiles[self.index(x, y)])
        } else {
            Err(OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Tile adjacent to the provided one across the given edge.
    ///
    /// Returns `None` at the grid boundary, which edge finalization treats
    /// as open space.
    #[must_use]
    pub fn neighbor(&self, tile: &Tile, edge: Edge) -> Option<&Tile> {
        let (dx, dy) = edge.offset();
        let x = tile.x as i64 + i64::from(dx);
        let y = tile.y as i64 + i64::from(dy);
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some(&self.tiles[self.index(x as u32, y as u32)])
    }

    /// Iterator over all tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Marks each wall-class tile's edges that face open space.
    ///
    /// An edge is visible iff the neighbor across it is absent (boundary) or
    /// not itself wall-class, so walls are never skinned between two solid
    /// tiles. Requires the full grid, hence runs after classification.
    fn finalize_edges(&mut self) {
        let mut edge_sets = vec![EdgeSet::EMPTY; self.tiles.len()];

        for tile in &self.tiles {
            if !tile.kind.is_wall_class() {
                continue;
            }
            let mut edges = EdgeSet::EMPTY;
            for edge in Edge::ALL {
                let skinned = match self.neighbor(tile, edge) {
                    Some(neighbor) => !neighbor.kind().is_wall_class(),
                    None => true,
                };
                if skinned {
                    edges.insert(edge);
                }
            }
            edge_sets[self.index(tile.x, tile.y)] = edges;
        }

        for (tile, edges) in self.tiles.iter_mut().zip(edge_sets) {
            tile.edges = edges;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemfire_core::TileKind::{Floor, Wall};

    #[test]
    fn wall_floor_wall_row_skins_the_shared_edges() {
        let grid = TileGrid::from_kinds(3, 1, vec![Wall, Floor, Wall]);

        let left = grid.tile_at(0, 0).expect("left wall");
        assert!(left.edges().contains(Edge::Left), "boundary edge");
        assert!(left.edges().contains(Edge::Right), "edge facing floor");
        assert!(left.edges().contains(Edge::Top), "no vertical neighbor");
        assert!(left.edges().contains(Edge::Bottom), "no vertical neighbor");

        let right = grid.tile_at(2, 0).expect("right wall");
        assert!(right.edges().contains(Edge::Left));
        assert!(right.edges().contains(Edge::Right));
    }

    #[test]
    fn adjacent_walls_share_no_visible_edge() {
        let grid = TileGrid::from_kinds(2, 1, vec![Wall, Wall]);

        let left = grid.tile_at(0, 0).expect("left wall");
        let right = grid.tile_at(1, 0).expect("right wall");
        assert!(!left.edges().contains(Edge::Right));
        assert!(!right.edges().contains(Edge::Left));
    }

    #[test]
    fn floor_tiles_carry_no_edges() {
        let grid = TileGrid::from_kinds(2, 1, vec![Floor, Wall]);
        let floor = grid.tile_at(0, 0).expect("floor tile");
        assert!(floor.edges().is_empty());
    }

    #[test]
    fn tile_at_rejects_out_of_range_queries() {
        let grid = TileGrid::from_kinds(2, 2, vec![Floor; 4]);

        let error = grid.tile_at(2, 0).expect_err("column out of range");
        assert_eq!(
            error,
            OutOfBounds {
                x: 2,
                y: 0,
                width: 2,
                height: 2,
            }
        );
        assert!(grid.tile_at(0, 2).is_err());
    }

    #[test]
    fn neighbor_returns_none_at_the_boundary() {
        let grid = TileGrid::from_kinds(2, 2, vec![Floor; 4]);
        let corner = grid.tile_at(0, 0).expect("corner tile");

        assert!(grid.neighbor(corner, Edge::Top).is_none());
        assert!(grid.neighbor(corner, Edge::Left).is_none());

        let east = grid.neighbor(corner, Edge::Right).expect("east neighbor");
        assert_eq!((east.x(), east.y()), (1, 0));
    }
}
