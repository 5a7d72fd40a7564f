use std::fmt;

use crate::path::{PathId, PathStatus};

/// Why a path could not be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindError {
    /// The start position is not inside any known region.
    StartUnresolved,
    /// The goal position is not inside any known region.
    GoalUnresolved,
    /// Start and goal are the same tile on the same layer.
    Degenerate,
    /// The movement flags do not select exactly one of fly / walk.
    InvalidMoveFlags,
    /// The goal tile does not permit the requested movement.
    GoalBlocked,
    /// The search ended without reaching the goal.
    NotFound,
    /// The search result could not be turned into a path.
    Build(BuildError),
}

impl fmt::Display for FindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartUnresolved => f.write_str("start position is outside every region"),
            Self::GoalUnresolved => f.write_str("goal position is outside every region"),
            Self::Degenerate => f.write_str("start and goal are the same node"),
            Self::InvalidMoveFlags => f.write_str("movement flags must select exactly one of fly or walk"),
            Self::GoalBlocked => f.write_str("goal tile does not permit this movement"),
            Self::NotFound => f.write_str("no path found"),
            Self::Build(e) => write!(f, "path construction failed: {e}"),
        }
    }
}

impl std::error::Error for FindError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Build(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BuildError> for FindError {
    fn from(e: BuildError) -> Self {
        Self::Build(e)
    }
}

/// Internal inconsistency between a search result and its closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// The terminal node was never expanded.
    TerminalNotClosed,
    /// A parent link points outside the closed set, or loops.
    BrokenParentChain,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TerminalNotClosed => f.write_str("terminal node is not in the closed set"),
            Self::BrokenParentChain => f.write_str("parent chain is broken or cyclic"),
        }
    }
}

impl std::error::Error for BuildError {}

/// Invalid operation on the path store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// No path slot with this id.
    UnknownPath(PathId),
    /// The path is not in a state that accepts consumers.
    NotAttachable { id: PathId, status: PathStatus },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPath(id) => write!(f, "unknown path {id}"),
            Self::NotAttachable { id, status } => {
                write!(f, "path {id} cannot take consumers while {status:?}")
            }
        }
    }
}

impl std::error::Error for StoreError {}
