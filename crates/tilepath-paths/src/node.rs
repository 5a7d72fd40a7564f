use std::hash::{Hash, Hasher};

use tilepath_core::{Point, Tile, WorldQuery};

/// Path cost unit. Additions saturate at [`INFINITE`].
pub type Cost = u32;

/// Sentinel cost meaning "not reached yet" / "impassable".
pub const INFINITE: Cost = Cost::MAX;

/// Identity of a graph vertex: region, tile and layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey<R> {
    pub region: R,
    pub x: u16,
    pub y: u16,
    pub layer: u8,
}

/// One vertex of the search graph plus its A* bookkeeping.
///
/// Equality and hashing only consider `(x, y, layer, region)`; `g`, `f` and
/// `parent` are bookkeeping. A node without a parent is the search start.
#[derive(Debug, Clone, Copy)]
pub struct PathNode<R> {
    pub x: u16,
    pub y: u16,
    pub layer: u8,
    pub region: R,
    pub g: Cost,
    pub f: Cost,
    pub parent: Option<NodeKey<R>>,
    /// Tile position in world-wide tile space (rows grow downward), used by
    /// the heuristics so estimates stay valid across region boundaries.
    pub(crate) global: Point,
}

impl<R: Copy> PathNode<R> {
    /// Create an unreached node. `global` is its world-wide tile position.
    pub fn new(region: R, tile: Tile, layer: u8, global: Point) -> Self {
        Self {
            x: tile.x,
            y: tile.y,
            layer,
            region,
            g: INFINITE,
            f: INFINITE,
            parent: None,
            global,
        }
    }

    /// Create an unreached node, computing its global position from `world`.
    pub fn at<W>(world: &W, region: R, tile: Tile, layer: u8) -> Self
    where
        W: WorldQuery<Region = R>,
    {
        let coords = world.region_coords(region);
        let global = Point::new(
            coords.x * i32::from(world.region_width()) + i32::from(tile.x),
            i32::from(tile.y) - coords.y * i32::from(world.region_height()),
        );
        Self::new(region, tile, layer, global)
    }

    #[inline]
    pub fn key(&self) -> NodeKey<R> {
        NodeKey {
            region: self.region,
            x: self.x,
            y: self.y,
            layer: self.layer,
        }
    }

    #[inline]
    pub fn tile(&self) -> Tile {
        Tile::new(self.x, self.y)
    }

    #[inline]
    pub fn global(&self) -> Point {
        self.global
    }

    /// Whether this node is the start of its search (no predecessor).
    #[inline]
    pub fn is_start(&self) -> bool {
        self.parent.is_none()
    }
}

impl<R: PartialEq> PartialEq for PathNode<R> {
    fn eq(&self, other: &Self) -> bool {
        self.region == other.region
            && self.x == other.x
            && self.y == other.y
            && self.layer == other.layer
    }
}

impl<R: Eq> Eq for PathNode<R> {}

impl<R: Hash> Hash for PathNode<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.region.hash(state);
        self.x.hash(state);
        self.y.hash(state);
        self.layer.hash(state);
    }
}
