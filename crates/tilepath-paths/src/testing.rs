//! Flag-painted world used by the unit tests.

use std::collections::HashMap;

use tilepath_core::{AreaFlags, Point, Tile, Vec2, WorldQuery};

/// Regions keyed by grid coordinate, each a flat grid of [`AreaFlags`].
/// Tiles are one world unit wide; layer and clearance are ignored.
pub(crate) struct FlagWorld {
    width: u16,
    height: u16,
    regions: HashMap<Point, Vec<AreaFlags>>,
}

impl FlagWorld {
    pub(crate) fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            regions: HashMap::new(),
        }
    }

    pub(crate) fn add_region(&mut self, coords: Point, fill: AreaFlags) {
        let len = usize::from(self.width) * usize::from(self.height);
        self.regions.insert(coords, vec![fill; len]);
    }

    pub(crate) fn set(&mut self, region: Point, x: u16, y: u16, flags: AreaFlags) {
        let i = self.index(x, y);
        if let Some(cells) = self.regions.get_mut(&region) {
            cells[i] = flags;
        }
    }

    fn index(&self, x: u16, y: u16) -> usize {
        usize::from(y) * usize::from(self.width) + usize::from(x)
    }
}

impl WorldQuery for FlagWorld {
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
        let next = region + offset;
        self.regions.contains_key(&next).then_some(next)
    }

    fn tile_flags(&self, region: Point, tile: Tile, _layer: u8, _clearance: u8) -> AreaFlags {
        if tile.x >= self.width || tile.y >= self.height {
            return AreaFlags::NONE;
        }
        self.regions
            .get(&region)
            .map_or(AreaFlags::NONE, |cells| cells[self.index(tile.x, tile.y)])
    }

    fn world_position(&self, region: Point, tile: Tile) -> Vec2 {
        let w = i32::from(self.width);
        let h = i32::from(self.height);
        let gx = i32::from(tile.x) + region.x * w;
        let gy = h * (region.y + 1) - i32::from(tile.y) - 1;
        Vec2::new(gx as f32 + 0.5, gy as f32 + 0.5)
    }

    fn resolve(&self, position: Vec2) -> Option<(Point, Tile)> {
        let w = i32::from(self.width);
        let h = i32::from(self.height);
        let gx = position.x.floor() as i32;
        let gy = position.y.floor() as i32;
        let region = Point::new(gx.div_euclid(w), gy.div_euclid(h));
        if !self.regions.contains_key(&region) {
            return None;
        }
        let tile = Tile::new(gx.rem_euclid(w) as u16, (h - 1 - gy.rem_euclid(h)) as u16);
        Some((region, tile))
    }

    fn resolve_in(&self, region: Point, position: Vec2) -> Option<Tile> {
        match self.resolve(position) {
            Some((r, tile)) if r == region => Some(tile),
            _ => None,
        }
    }
}
