//! The [`WorldQuery`] trait: everything the pathfinder needs to know about
//! the world it searches.

use std::fmt::Debug;
use std::hash::Hash;

use crate::flags::AreaFlags;
use crate::geom::{Point, Tile, Vec2};

/// Read-only view of a world made of equally sized tile regions laid out on
/// a region grid.
///
/// Tile rows grow downward inside a region, while region grid coordinates
/// grow upward: the region north of `r` sits at `region_coords(r) + (0, 1)`.
pub trait WorldQuery {
    /// Opaque region handle, compared by identity.
    type Region: Copy + Eq + Hash + Debug;

    /// Width in tiles of every region.
    fn region_width(&self) -> u16;

    /// Height in tiles of every region.
    fn region_height(&self) -> u16;

    /// Grid coordinate of `region`.
    fn region_coords(&self, region: Self::Region) -> Point;

    /// The region next to `region` at grid offset `offset` (each axis in
    /// `-1..=1`), or `None` when there is no region there.
    fn adjacent_region(&self, region: Self::Region, offset: Point) -> Option<Self::Region>;

    /// Movement permissions of one tile on one layer. `clearance` is how many
    /// cells of headroom/ground the query may inspect.
    fn tile_flags(&self, region: Self::Region, tile: Tile, layer: u8, clearance: u8) -> AreaFlags;

    /// World-space position of a tile (its center).
    fn world_position(&self, region: Self::Region, tile: Tile) -> Vec2;

    /// Region and tile containing a world-space position.
    fn resolve(&self, position: Vec2) -> Option<(Self::Region, Tile)>;

    /// Tile of `region` containing `position`, or `None` if the position
    /// falls outside that region.
    fn resolve_in(&self, region: Self::Region, position: Vec2) -> Option<Tile>;
}
