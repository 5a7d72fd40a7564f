//! Cell storage for one region.

use tilepath_core::Tile;

use crate::layout::{Layout, TileKind};

/// The cells of one region, one row-major grid per layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    width: u16,
    height: u16,
    layers: Vec<Vec<TileKind>>,
}

impl Region {
    /// Create a region with a single layer filled with `fill`.
    pub fn new(width: u16, height: u16, fill: TileKind) -> Self {
        let mut r = Self {
            width,
            height,
            layers: Vec::new(),
        };
        r.ensure_layer(0, fill);
        r
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Add layers filled with `fill` until `layer` exists.
    pub fn ensure_layer(&mut self, layer: u8, fill: TileKind) {
        let len = usize::from(self.width) * usize::from(self.height);
        while self.layers.len() <= usize::from(layer) {
            self.layers.push(vec![fill; len]);
        }
    }

    fn index(&self, tile: Tile) -> Option<usize> {
        if tile.x >= self.width || tile.y >= self.height {
            return None;
        }
        Some(usize::from(tile.y) * usize::from(self.width) + usize::from(tile.x))
    }

    /// Cell at `tile` on `layer`, or `None` outside the region or for a
    /// missing layer.
    pub fn get(&self, tile: Tile, layer: u8) -> Option<TileKind> {
        let i = self.index(tile)?;
        self.layers.get(usize::from(layer))?.get(i).copied()
    }

    /// Set a cell. Returns false when `tile` or `layer` does not exist.
    pub fn set(&mut self, tile: Tile, layer: u8, kind: TileKind) -> bool {
        let Some(i) = self.index(tile) else {
            return false;
        };
        match self.layers.get_mut(usize::from(layer)) {
            Some(cells) => {
                cells[i] = kind;
                true
            }
            None => false,
        }
    }

    /// Overwrite `layer` with `layout`, which must have the region's size.
    pub(crate) fn paint(&mut self, layer: u8, layout: &Layout) {
        self.ensure_layer(layer, TileKind::Air);
        for (tile, kind) in layout.iter() {
            self.set(tile, layer, kind);
        }
    }
}
