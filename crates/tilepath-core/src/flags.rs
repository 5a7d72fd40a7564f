//! Movement bitmasks: [`AreaFlags`] (what a tile permits) and
//! [`MoveFlags`] (what an agent can do).

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

// ---------------------------------------------------------------------------
// AreaFlags
// ---------------------------------------------------------------------------

/// Bitmask of movement permissions for one tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaFlags(pub u32);

impl AreaFlags {
    pub const NONE: Self = Self(0);
    pub const WALKABLE: Self = Self(1 << 0);
    pub const JUMPABLE_RIGHT: Self = Self(1 << 1);
    pub const JUMPABLE_LEFT: Self = Self(1 << 2);
    pub const JUMPABLE: Self = Self(Self::JUMPABLE_RIGHT.0 | Self::JUMPABLE_LEFT.0);
    pub const FLYABLE: Self = Self(1 << 3);
    pub const SWIMMABLE: Self = Self(1 << 4);

    /// Whether this mask contains all the bits from `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether this mask shares at least one bit with `other`.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Whether the mask is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for AreaFlags {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for AreaFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for AreaFlags {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// MoveFlags
// ---------------------------------------------------------------------------

/// Bitmask of agent movement capabilities.
///
/// Only `WALK` and `FLY` select a pathfinding mode; other bits are carried
/// along for the caller's benefit and ignored by the search.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveFlags(pub u32);

impl MoveFlags {
    pub const NONE: Self = Self(0);
    pub const WALK: Self = Self(1 << 0);
    pub const FLY: Self = Self(1 << 1);
    pub const SWIM: Self = Self(1 << 2);
    pub const CLIMB: Self = Self(1 << 3);

    /// Whether this mask contains all the bits from `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether the mask is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for MoveFlags {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for MoveFlags {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Display for MoveFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::WALK, "walk"),
            (Self::FLY, "fly"),
            (Self::SWIM, "swim"),
            (Self::CLIMB, "climb"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        if first {
            f.write_str("none")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_flag_ops() {
        let m = AreaFlags::WALKABLE | AreaFlags::JUMPABLE_LEFT;
        assert!(m.contains(AreaFlags::WALKABLE));
        assert!(!m.contains(AreaFlags::JUMPABLE));
        assert!(m.intersects(AreaFlags::JUMPABLE));
        assert!(!m.intersects(AreaFlags::FLYABLE));
        assert_eq!(m & AreaFlags::WALKABLE, AreaFlags::WALKABLE);
        assert!(AreaFlags::NONE.is_empty());
    }

    #[test]
    fn move_flags_display() {
        assert_eq!((MoveFlags::WALK | MoveFlags::SWIM).to_string(), "walk|swim");
        assert_eq!(MoveFlags::NONE.to_string(), "none");
    }
}
