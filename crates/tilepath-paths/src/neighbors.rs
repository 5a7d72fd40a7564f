use tilepath_core::{AreaFlags, Point, Tile, WorldQuery};

use crate::node::PathNode;

/// Moore neighborhood offsets in tile space: NW, N, NE, E, SE, S, SW, W.
const MOORE: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
];

/// A neighbor produced by [`expand`], with the permissions of its tile.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<R> {
    pub node: PathNode<R>,
    pub area: AreaFlags,
}

/// Append the accepted neighbors of `node` into `buf`. The caller clears
/// `buf` before calling.
///
/// Offsets falling off a region edge wrap to the opposite edge of the
/// adjacent region; when the world has no region there the neighbor is
/// dropped. A neighbor is kept only if its tile flags intersect `mask`.
/// Kept neighbors are unreached (`g == f == INFINITE`) with `node` as parent.
pub fn expand<W: WorldQuery>(
    world: &W,
    node: &PathNode<W::Region>,
    mask: AreaFlags,
    clearance: u8,
    buf: &mut Vec<Candidate<W::Region>>,
) {
    let width = i32::from(world.region_width());
    let height = i32::from(world.region_height());
    let parent = node.key();

    for (dx, dy) in MOORE {
        let mut x = i32::from(node.x) + dx;
        let mut y = i32::from(node.y) + dy;

        // Region grid y grows upward while tile rows grow downward.
        let mut offset = Point::ZERO;
        if x < 0 {
            offset.x = -1;
            x = width - 1;
        } else if x >= width {
            offset.x = 1;
            x = 0;
        }
        if y < 0 {
            offset.y = 1;
            y = height - 1;
        } else if y >= height {
            offset.y = -1;
            y = 0;
        }

        let region = if offset == Point::ZERO {
            node.region
        } else {
            match world.adjacent_region(node.region, offset) {
                Some(r) => r,
                None => continue,
            }
        };

        let tile = Tile::new(x as u16, y as u16);
        let area = world.tile_flags(region, tile, node.layer, clearance);
        if !area.intersects(mask) {
            continue;
        }

        let mut neighbor = PathNode::new(region, tile, node.layer, node.global.shift(dx, dy));
        neighbor.parent = Some(parent);
        buf.push(Candidate {
            node: neighbor,
            area,
        });
    }
}
