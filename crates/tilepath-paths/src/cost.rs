//! Movement modes and their cost model.
//!
//! Positions are world-wide tile positions with rows growing downward, so a
//! destination with a smaller `y` is above the origin (a jump for walkers).

use tilepath_core::{AreaFlags, MoveFlags, Point};

use crate::node::{Cost, INFINITE};

const COST_X: Cost = 10;
const COST_XY: Cost = 14;
const COST_DXY: Cost = 4;

const COST_WALK_YMID: Cost = 45;
const COST_WALK_DXMID: Cost = 35;
const COST_WALK_YUP: Cost = 60;
const COST_WALK_YDOWN: Cost = 9;
const COST_WALK_XYUP: Cost = 80;
const COST_WALK_XYDOWN: Cost = 13;

/// The movement capability a search paths for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveMode {
    Fly,
    Walk,
}

impl MoveMode {
    /// Select the mode from agent flags. Exactly one of `FLY` / `WALK` must
    /// be set.
    pub fn from_flags(flags: MoveFlags) -> Option<Self> {
        match (flags.contains(MoveFlags::FLY), flags.contains(MoveFlags::WALK)) {
            (true, false) => Some(Self::Fly),
            (false, true) => Some(Self::Walk),
            _ => None,
        }
    }

    /// Tiles a node may step onto. Walkers may also enter flyable tiles so
    /// they can fall.
    pub const fn area_mask(self) -> AreaFlags {
        match self {
            Self::Fly => AreaFlags::FLYABLE,
            Self::Walk => AreaFlags(
                AreaFlags::WALKABLE.0 | AreaFlags::JUMPABLE.0 | AreaFlags::FLYABLE.0,
            ),
        }
    }

    /// Tiles a search may end on.
    pub const fn goal_mask(self) -> AreaFlags {
        match self {
            Self::Fly => AreaFlags::FLYABLE,
            Self::Walk => AreaFlags(AreaFlags::WALKABLE.0 | AreaFlags::JUMPABLE.0),
        }
    }

    /// Estimated remaining cost from `from` to `to`.
    pub fn heuristic(self, from: Point, to: Point) -> Cost {
        match self {
            Self::Fly => fly_heuristic(from, to),
            Self::Walk => walk_heuristic(from, to),
        }
    }

    /// Cost of stepping from `from` to the adjacent `to`, whose tile has
    /// permissions `to_area`. [`INFINITE`] means the step is not allowed.
    pub fn step_cost(self, from: Point, to: Point, to_area: AreaFlags) -> Cost {
        match self {
            Self::Fly => fly_step(from, to),
            Self::Walk => walk_step(from, to, to_area),
        }
    }
}

/// Octile distance.
#[inline]
pub fn fly_heuristic(from: Point, to: Point) -> Cost {
    let (dx, dy) = from.abs_delta(to);
    if dx > dy {
        dx * COST_X + dy * COST_DXY
    } else {
        dy * COST_X + dx * COST_DXY
    }
}

#[inline]
pub fn fly_step(from: Point, to: Point) -> Cost {
    let (dx, dy) = from.abs_delta(to);
    match (dx, dy) {
        (1, 0) | (0, 1) => COST_X,
        (1, 1) => COST_XY,
        _ => INFINITE,
    }
}

/// Octile-like estimate biased by vertical direction: climbing costs far
/// more than falling.
#[inline]
pub fn walk_heuristic(from: Point, to: Point) -> Cost {
    let (dx, dy) = from.abs_delta(to);
    let vertical = if from.y > to.y {
        dy * COST_WALK_YUP
    } else {
        dy * COST_WALK_YDOWN
    };
    if dx > dy {
        dx * COST_X + dy * COST_WALK_DXMID + vertical
    } else {
        dy * COST_WALK_YMID + dx * COST_WALK_DXMID + vertical
    }
}

#[inline]
pub fn walk_step(from: Point, to: Point, to_area: AreaFlags) -> Cost {
    let diagonal = from.x != to.x;

    // jump
    if from.y > to.y {
        if to_area.intersects(AreaFlags::JUMPABLE | AreaFlags::WALKABLE) {
            return if diagonal { COST_WALK_XYUP } else { COST_WALK_YUP };
        }
        return INFINITE;
    }

    // fall
    if from.y < to.y {
        return if diagonal {
            COST_WALK_XYDOWN
        } else {
            COST_WALK_YDOWN
        };
    }

    if to_area.intersects(AreaFlags::JUMPABLE) {
        COST_WALK_YMID
    } else if to_area.intersects(AreaFlags::WALKABLE) {
        COST_X
    } else {
        INFINITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_selection() {
        assert_eq!(MoveMode::from_flags(MoveFlags::FLY), Some(MoveMode::Fly));
        assert_eq!(
            MoveMode::from_flags(MoveFlags::WALK | MoveFlags::SWIM),
            Some(MoveMode::Walk)
        );
        assert_eq!(MoveMode::from_flags(MoveFlags::NONE), None);
        assert_eq!(MoveMode::from_flags(MoveFlags::FLY | MoveFlags::WALK), None);
    }

    #[test]
    fn walker_mask_allows_falling_through_air() {
        assert!(MoveMode::Walk.area_mask().contains(AreaFlags::FLYABLE));
        assert!(!MoveMode::Walk.goal_mask().intersects(AreaFlags::FLYABLE));
        assert_eq!(MoveMode::Fly.area_mask(), AreaFlags::FLYABLE);
    }

    #[test]
    fn fly_costs() {
        let o = Point::ZERO;
        assert_eq!(fly_heuristic(o, Point::new(9, 0)), 90);
        assert_eq!(fly_heuristic(o, Point::new(3, -5)), 50 + 12);
        assert_eq!(fly_step(o, Point::new(0, 1)), COST_X);
        assert_eq!(fly_step(o, Point::new(-1, 1)), COST_XY);
        assert_eq!(fly_step(o, Point::new(2, 0)), INFINITE);
    }

    #[test]
    fn fly_heuristic_never_overestimates_a_step() {
        let o = Point::new(4, 4);
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let n = o.shift(dx, dy);
                assert!(fly_heuristic(o, n) <= fly_step(o, n));
            }
        }
    }

    #[test]
    fn walk_heuristic_is_exact_on_flat_ground() {
        assert_eq!(walk_heuristic(Point::ZERO, Point::new(-7, 0)), 70);
    }

    #[test]
    fn walk_heuristic_prefers_falling() {
        let o = Point::new(0, 5);
        let up = walk_heuristic(o, Point::new(0, 0));
        let down = walk_heuristic(o, Point::new(0, 10));
        assert!(up > down);
    }

    #[test]
    fn walk_steps() {
        let o = Point::new(5, 5);
        let ground = AreaFlags::WALKABLE;
        let wall_side = AreaFlags::JUMPABLE_LEFT | AreaFlags::FLYABLE;
        let open_air = AreaFlags::FLYABLE;

        assert_eq!(walk_step(o, Point::new(6, 5), ground), COST_X);
        assert_eq!(walk_step(o, Point::new(6, 5), wall_side), COST_WALK_YMID);
        assert_eq!(walk_step(o, Point::new(6, 5), open_air), INFINITE);

        assert_eq!(walk_step(o, Point::new(5, 4), ground), COST_WALK_YUP);
        assert_eq!(walk_step(o, Point::new(6, 4), wall_side), COST_WALK_XYUP);
        assert_eq!(walk_step(o, Point::new(5, 4), open_air), INFINITE);

        assert_eq!(walk_step(o, Point::new(5, 6), open_air), COST_WALK_YDOWN);
        assert_eq!(walk_step(o, Point::new(4, 6), open_air), COST_WALK_XYDOWN);
    }
}
