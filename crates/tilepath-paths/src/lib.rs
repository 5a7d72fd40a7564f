//! **tilepath-paths**: bounded A* over multi-region tile worlds.
//!
//! The search runs on the tile graph exposed by a
//! [`WorldQuery`](tilepath_core::WorldQuery): every tile of every region is
//! a node, connected to its eight Moore neighbors, including across region
//! edges. A search stops when it reaches the goal, when the expanded node's
//! cost exceeds a multiple of the initial estimate, or when it runs out of
//! time; the last two may still yield a partial path.
//!
//! Found paths are reduced to their corner points, converted to world
//! positions and kept in a [`PathStore`], where any number of consumers can
//! follow the same path with independent progress.
//!
//! The [`PathFinder`] facade ties it together:
//!
//! ```
//! use tilepath_core::{MoveFlags, Point, Tile, WorldQuery};
//! use tilepath_paths::{Advance, ConsumerId, PathFinder, PathRequest, SearchConfig};
//! use tilepath_world::TileWorld;
//!
//! let mut world = TileWorld::new(8, 3);
//! world
//!     .add_layout(Point::new(0, 0), 0, "........\n........\n########")
//!     .unwrap();
//!
//! let start = world.world_position(Point::new(0, 0), Tile::new(0, 1));
//! let goal = world.world_position(Point::new(0, 0), Tile::new(7, 1));
//! let mut finder = PathFinder::new(SearchConfig::default());
//! let id = finder
//!     .find_path(&world, &PathRequest::new(start, goal, MoveFlags::WALK))
//!     .unwrap();
//!
//! let agent = ConsumerId(1);
//! finder.attach_consumer(id, agent).unwrap();
//! let next = finder.advance_consumer(id, agent, start).unwrap();
//! assert_eq!(next, Advance::Heading(1));
//! ```

pub mod astar;
pub mod builder;
pub mod clock;
pub mod config;
pub mod cost;
pub mod error;
pub mod finder;
pub mod neighbors;
pub mod node;
pub mod path;
pub mod store;

#[cfg(test)]
mod testing;

pub use astar::{SearchContext, SearchOutcome, SearchRequest, SearchStats, StopReason};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::SearchConfig;
pub use cost::MoveMode;
pub use error::{BuildError, FindError, StoreError};
pub use finder::{PathFinder, PathRequest};
pub use node::{Cost, INFINITE, NodeKey, PathNode};
pub use path::{Advance, ConsumerId, ConsumerSlot, Path, PathId, PathKind, PathStatus};
pub use store::PathStore;
