//! **tilepath-world**: an in-memory tile world for the tilepath crates.
//!
//! A [`TileWorld`] is a grid of equally sized [`Region`]s, each holding one
//! or more layers of [`TileKind`] cells, usually loaded from ASCII
//! [`Layout`]s. It implements [`tilepath_core::WorldQuery`], deriving the
//! movement permissions of every cell from its neighborhood.
//!
//! ```
//! use tilepath_core::{AreaFlags, Point, Tile, WorldQuery};
//! use tilepath_world::TileWorld;
//!
//! let mut world = TileWorld::new(4, 3);
//! world
//!     .add_layout(Point::new(0, 0), 0, "....\n....\n####")
//!     .unwrap();
//! let flags = world.tile_flags(Point::new(0, 0), Tile::new(1, 1), 0, 3);
//! assert!(flags.contains(AreaFlags::WALKABLE));
//! ```

pub mod layout;
pub mod region;
pub mod world;

pub use layout::{Layout, ParseError, TileKind};
pub use region::Region;
pub use world::TileWorld;
