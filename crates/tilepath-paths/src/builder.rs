use std::hash::Hash;

use tilepath_core::WorldQuery;

use crate::astar::SearchContext;
use crate::config::SearchConfig;
use crate::error::BuildError;
use crate::node::PathNode;
use crate::path::{Path, PathKind};

/// Turn the route ending at `terminal` into a [`Path`].
///
/// The route is read back from the closed set of the search that produced
/// `terminal`, reduced (see [`reduce`]) when `config.reduce_points` is set,
/// and converted to world positions in start-to-terminal order.
pub fn build<W: WorldQuery>(
    ctx: &SearchContext<W::Region>,
    terminal: &PathNode<W::Region>,
    world: &W,
    config: &SearchConfig,
    kind: PathKind,
) -> Result<Path, BuildError> {
    let chain = ctx.trace(terminal)?;
    let kept = if config.reduce_points {
        reduce(&chain, config.max_waypoints)
    } else {
        cap(&chain, config.max_waypoints)
    };

    let points = kept
        .iter()
        .rev()
        .map(|n| world.world_position(n.region, n.tile()))
        .collect::<Vec<_>>();

    log::debug!(
        "built path: {} waypoints from {} traced nodes ({} closed)",
        points.len(),
        chain.len(),
        ctx.closed().len()
    );
    Ok(Path::new(points, kind))
}

/// Drop the interior nodes of straight horizontal and vertical runs.
///
/// `chain` is in terminal-to-start order and so is the result. A node is
/// dropped when it shares its `x` (or its `y`) with both the last kept node
/// and its own parent. The terminal and the start are always kept, unless
/// `max` waypoints are reached first, in which case the start side is cut.
pub fn reduce<R: Copy + Eq + Hash>(chain: &[PathNode<R>], max: usize) -> Vec<PathNode<R>> {
    let Some((&terminal, rest)) = chain.split_first() else {
        return Vec::new();
    };
    let mut kept = vec![terminal];
    let mut child = terminal.global;

    for (i, node) in rest.iter().enumerate() {
        if kept.len() >= max {
            log::warn!("path truncated at {max} waypoints");
            break;
        }
        let Some(parent) = rest.get(i + 1) else {
            // start
            kept.push(*node);
            break;
        };
        let p = node.global;
        let q = parent.global;
        let straight = (child.x == q.x && child.x == p.x) || (child.y == q.y && child.y == p.y);
        if !straight {
            kept.push(*node);
            child = p;
        }
    }
    kept
}

fn cap<R: Copy>(chain: &[PathNode<R>], max: usize) -> Vec<PathNode<R>> {
    if chain.len() > max {
        log::warn!("path truncated at {max} waypoints");
    }
    chain.iter().take(max).copied().collect()
}
