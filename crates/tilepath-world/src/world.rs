//! [`TileWorld`]: regions of cells on a region grid.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tilepath_core::{AreaFlags, Point, Tile, Vec2, WorldQuery};

use crate::layout::{Layout, ParseError, TileKind};
use crate::region::Region;

/// An in-memory world of equally sized regions keyed by grid coordinate.
///
/// Region grid `y` grows upward; tile rows grow downward inside a region.
/// Cells outside every region are void: they block nothing, but count as
/// ground when looking for something to jump from.
#[derive(Debug, Clone)]
pub struct TileWorld {
    width: u16,
    height: u16,
    tile_size: Vec2,
    regions: HashMap<Point, Region>,
}

impl TileWorld {
    /// Create an empty world of `width` x `height` tile regions, with one
    /// world unit per tile.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            tile_size: Vec2::new(1.0, 1.0),
            regions: HashMap::new(),
        }
    }

    /// Set the world-space size of one tile.
    pub fn with_tile_size(mut self, tile_size: Vec2) -> Self {
        self.tile_size = tile_size;
        self
    }

    #[inline]
    pub fn tile_size(&self) -> Vec2 {
        self.tile_size
    }

    pub fn num_regions(&self) -> usize {
        self.regions.len()
    }

    pub fn region(&self, coords: Point) -> Option<&Region> {
        self.regions.get(&coords)
    }

    pub fn region_mut(&mut self, coords: Point) -> Option<&mut Region> {
        self.regions.get_mut(&coords)
    }

    /// Add (or replace) the region at `coords`, filled with `fill` on
    /// layer 0.
    pub fn add_region(&mut self, coords: Point, fill: TileKind) -> &mut Region {
        let region = Region::new(self.width, self.height, fill);
        match self.regions.entry(coords) {
            Entry::Occupied(mut e) => {
                log::debug!("region {coords}: replaced");
                e.insert(region);
                e.into_mut()
            }
            Entry::Vacant(e) => e.insert(region),
        }
    }

    /// Paint `text` onto `layer` of the region at `coords`, creating the
    /// region (all air) if needed.
    pub fn add_layout(&mut self, coords: Point, layer: u8, text: &str) -> Result<(), ParseError> {
        let layout = Layout::parse(text)?;
        let expected = (usize::from(self.width), usize::from(self.height));
        let found = (layout.width(), layout.height());
        if found != expected {
            return Err(ParseError::WrongSize { expected, found });
        }
        let (width, height) = (self.width, self.height);
        self.regions
            .entry(coords)
            .or_insert_with(|| Region::new(width, height, TileKind::Air))
            .paint(layer, &layout);
        log::debug!("region {coords}: layer {layer} loaded");
        Ok(())
    }

    /// Cell at `tile` on `layer` of the region at `coords`.
    pub fn kind_at(&self, coords: Point, tile: Tile, layer: u8) -> Option<TileKind> {
        self.regions.get(&coords)?.get(tile, layer)
    }

    /// Set a cell. Returns false when the region, tile or layer does not
    /// exist.
    pub fn set(&mut self, coords: Point, tile: Tile, layer: u8, kind: TileKind) -> bool {
        self.regions
            .get_mut(&coords)
            .is_some_and(|r| r.set(tile, layer, kind))
    }

    /// World-wide tile position of `tile` in the region at `coords`. Rows
    /// grow downward, so regions north of the origin have negative rows.
    pub fn global_tile(&self, coords: Point, tile: Tile) -> Point {
        Point::new(
            coords.x * i32::from(self.width) + i32::from(tile.x),
            i32::from(tile.y) - coords.y * i32::from(self.height),
        )
    }

    /// Region and tile at a world-wide tile position.
    pub fn split_global(&self, global: Point) -> (Point, Tile) {
        let w = i32::from(self.width);
        let h = i32::from(self.height);
        let coords = Point::new(global.x.div_euclid(w), -global.y.div_euclid(h));
        let tile = Tile::new(global.x.rem_euclid(w) as u16, global.y.rem_euclid(h) as u16);
        (coords, tile)
    }

    /// Cell at a world-wide tile position, `None` in the void.
    pub fn kind_at_global(&self, layer: u8, global: Point) -> Option<TileKind> {
        let (coords, tile) = self.split_global(global);
        self.kind_at(coords, tile, layer)
    }

    /// Movement permissions of one cell.
    ///
    /// Solid and void cells permit nothing. Air is flyable, liquid is
    /// swimmable. A solid cell below makes it walkable; a solid cell to the
    /// right or left makes it jumpable in that direction. Ground (solid or
    /// void) found below within `clearance` open cells makes it jumpable both
    /// ways.
    pub fn area_flags(&self, coords: Point, tile: Tile, layer: u8, clearance: u8) -> AreaFlags {
        let mut flags = match self.kind_at(coords, tile, layer) {
            None | Some(TileKind::Block) => return AreaFlags::NONE,
            Some(TileKind::Air) => AreaFlags::FLYABLE,
            Some(TileKind::Liquid) => AreaFlags::SWIMMABLE,
        };
        let g = self.global_tile(coords, tile);
        let solid = |p: Point| self.kind_at_global(layer, p).is_some_and(TileKind::is_solid);

        if solid(g.shift(0, 1)) {
            flags |= AreaFlags::WALKABLE;
        }
        if solid(g.shift(1, 0)) {
            flags |= AreaFlags::JUMPABLE_RIGHT;
        }
        if solid(g.shift(-1, 0)) {
            flags |= AreaFlags::JUMPABLE_LEFT;
        }

        let mut headroom = i32::from(clearance);
        let mut below = g.shift(0, 1);
        while self
            .kind_at_global(layer, below)
            .is_some_and(|k| !k.is_solid())
        {
            let more = headroom > 0;
            headroom -= 1;
            if !more {
                break;
            }
            below = below.shift(0, 1);
        }
        if headroom > 0 {
            flags |= AreaFlags::JUMPABLE;
        }
        flags
    }
}

impl WorldQuery for TileWorld {
    type Region = Point;

    fn region_width(&self) -> u16 {
        self.width
    }

    fn region_height(&self) -> u16 {
        self.height
    }

    fn region_coords(&self, region: Point) -> Point {
        region
    }

    fn adjacent_region(&self, region: Point, offset: Point) -> Option<Point> {
        let coords = region + offset;
        self.regions.contains_key(&coords).then_some(coords)
    }

    fn tile_flags(&self, region: Point, tile: Tile, layer: u8, clearance: u8) -> AreaFlags {
        self.area_flags(region, tile, layer, clearance)
    }

    fn world_position(&self, region: Point, tile: Tile) -> Vec2 {
        let h = i32::from(self.height);
        let x = region.x * i32::from(self.width) + i32::from(tile.x);
        let y = h * (region.y + 1) - i32::from(tile.y) - 1;
        Vec2::new(
            (x as f32 + 0.5) * self.tile_size.x,
            (y as f32 + 0.5) * self.tile_size.y,
        )
    }

    fn resolve(&self, position: Vec2) -> Option<(Point, Tile)> {
        let w = i32::from(self.width);
        let h = i32::from(self.height);
        let gx = (position.x / self.tile_size.x).floor() as i32;
        let gy = (position.y / self.tile_size.y).floor() as i32;
        let coords = Point::new(gx.div_euclid(w), gy.div_euclid(h));
        if !self.regions.contains_key(&coords) {
            return None;
        }
        let tile = Tile::new(gx.rem_euclid(w) as u16, (h - 1 - gy.rem_euclid(h)) as u16);
        Some((coords, tile))
    }

    fn resolve_in(&self, region: Point, position: Vec2) -> Option<Tile> {
        match self.resolve(position) {
            Some((coords, tile)) if coords == region => Some(tile),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAVE: &str = "\
.....
.....
..#..
.~...
.....
#####";

    fn cave() -> TileWorld {
        let mut world = TileWorld::new(5, 6);
        world.add_layout(Point::ZERO, 0, CAVE).unwrap();
        world
    }

    fn flags(world: &TileWorld, x: u16, y: u16, clearance: u8) -> AreaFlags {
        world.area_flags(Point::ZERO, Tile::new(x, y), 0, clearance)
    }

    #[test]
    fn layout_size_must_match_regions() {
        let mut world = TileWorld::new(4, 4);
        assert_eq!(
            world.add_layout(Point::ZERO, 0, "##\n##"),
            Err(ParseError::WrongSize {
                expected: (4, 4),
                found: (2, 2)
            })
        );
        assert_eq!(world.num_regions(), 0);
    }

    #[test]
    fn solid_and_void_permit_nothing() {
        let world = cave();
        assert_eq!(flags(&world, 2, 2, 3), AreaFlags::NONE);
        assert_eq!(world.area_flags(Point::new(1, 0), Tile::new(0, 0), 0, 3), AreaFlags::NONE);
        assert_eq!(world.area_flags(Point::ZERO, Tile::new(0, 0), 1, 3), AreaFlags::NONE);
    }

    #[test]
    fn floor_is_walkable_and_jumpable() {
        let world = cave();
        assert_eq!(
            flags(&world, 0, 4, 3),
            AreaFlags::FLYABLE | AreaFlags::WALKABLE | AreaFlags::JUMPABLE
        );
        // Standing on the floating block.
        assert_eq!(
            flags(&world, 2, 1, 3),
            AreaFlags::FLYABLE | AreaFlags::WALKABLE | AreaFlags::JUMPABLE
        );
    }

    #[test]
    fn high_air_is_only_flyable() {
        let world = cave();
        assert_eq!(flags(&world, 0, 0, 3), AreaFlags::FLYABLE);
    }

    #[test]
    fn liquid_is_swimmable() {
        let world = cave();
        assert_eq!(
            flags(&world, 1, 3, 3),
            AreaFlags::SWIMMABLE | AreaFlags::JUMPABLE
        );
    }

    #[test]
    fn walls_give_side_jumps() {
        let world = cave();
        assert_eq!(
            flags(&world, 3, 2, 0),
            AreaFlags::FLYABLE | AreaFlags::JUMPABLE_LEFT
        );
        assert_eq!(
            flags(&world, 1, 2, 0),
            AreaFlags::FLYABLE | AreaFlags::JUMPABLE_RIGHT
        );
    }

    #[test]
    fn ground_in_the_region_below_counts() {
        let mut world = TileWorld::new(3, 2);
        world.add_region(Point::ZERO, TileKind::Air);
        let air = world.area_flags(Point::ZERO, Tile::new(1, 1), 0, 3);
        // Nothing below: the void is something to jump from, not to walk on.
        assert_eq!(air, AreaFlags::FLYABLE | AreaFlags::JUMPABLE);

        world.add_layout(Point::new(0, -1), 0, "###\n###").unwrap();
        let floor = world.area_flags(Point::ZERO, Tile::new(1, 1), 0, 3);
        assert_eq!(floor, AreaFlags::FLYABLE | AreaFlags::WALKABLE | AreaFlags::JUMPABLE);
    }

    #[test]
    fn global_tiles_round_trip() {
        let world = TileWorld::new(5, 4);
        for (coords, tile) in [
            (Point::new(0, 0), Tile::new(0, 0)),
            (Point::new(1, 1), Tile::new(2, 3)),
            (Point::new(-2, -1), Tile::new(4, 1)),
        ] {
            let g = world.global_tile(coords, tile);
            assert_eq!(world.split_global(g), (coords, tile));
        }
        assert_eq!(world.global_tile(Point::new(1, 1), Tile::new(2, 3)), Point::new(7, -1));
    }

    #[test]
    fn positions_and_resolution_agree() {
        let mut world = TileWorld::new(5, 4).with_tile_size(Vec2::new(2.0, 2.0));
        world.add_region(Point::ZERO, TileKind::Air);
        world.add_region(Point::new(1, 1), TileKind::Air);

        let p = world.world_position(Point::ZERO, Tile::new(0, 0));
        assert_eq!(p, Vec2::new(1.0, 7.0));
        assert_eq!(world.resolve(p), Some((Point::ZERO, Tile::new(0, 0))));

        let q = world.world_position(Point::new(1, 1), Tile::new(2, 3));
        assert_eq!(q, Vec2::new(15.0, 9.0));
        assert_eq!(world.resolve(q), Some((Point::new(1, 1), Tile::new(2, 3))));
        assert_eq!(world.resolve_in(Point::new(1, 1), q), Some(Tile::new(2, 3)));
        assert_eq!(world.resolve_in(Point::ZERO, q), None);

        // Region (1, 0) does not exist.
        assert_eq!(world.resolve(Vec2::new(11.0, 1.0)), None);
    }

    #[test]
    fn adjacent_regions() {
        let mut world = TileWorld::new(2, 2);
        world.add_region(Point::ZERO, TileKind::Air);
        world.add_region(Point::new(0, 1), TileKind::Air);
        assert_eq!(
            world.adjacent_region(Point::ZERO, Point::new(0, 1)),
            Some(Point::new(0, 1))
        );
        assert_eq!(world.adjacent_region(Point::ZERO, Point::new(1, 0)), None);
    }

    #[test]
    fn set_and_read_cells() {
        let mut world = cave();
        assert!(world.set(Point::ZERO, Tile::new(0, 0), 0, TileKind::Liquid));
        assert_eq!(world.kind_at(Point::ZERO, Tile::new(0, 0), 0), Some(TileKind::Liquid));
        assert!(!world.set(Point::new(3, 3), Tile::new(0, 0), 0, TileKind::Liquid));
        assert_eq!(world.kind_at_global(0, Point::new(2, 2)), Some(TileKind::Block));
    }
}
