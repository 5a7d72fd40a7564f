//! **tilepath-core**: core types for tile-region pathfinding.
//!
//! This crate provides the types shared by the *tilepath* crates: geometry
//! primitives, movement bitmasks, and the [`WorldQuery`] trait through which
//! the pathfinder reads the world.

pub mod flags;
pub mod geom;
pub mod world;

pub use flags::{AreaFlags, MoveFlags};
pub use geom::{Point, Tile, Vec2};
pub use world::WorldQuery;
