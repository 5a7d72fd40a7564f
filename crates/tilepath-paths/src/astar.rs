use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;
use std::time::Duration;

use tilepath_core::{MoveFlags, WorldQuery};

use crate::clock::Clock;
use crate::config::SearchConfig;
use crate::cost::MoveMode;
use crate::error::{BuildError, FindError};
use crate::neighbors::{Candidate, expand};
use crate::node::{Cost, NodeKey, PathNode};

/// Terminal state of one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome<R> {
    /// The goal was expanded.
    Found(PathNode<R>),
    /// A bound stopped the search; the node being expanded is the best
    /// effort endpoint.
    PartiallyFound(PathNode<R>),
    NotFound,
}

/// Why the search loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Goal,
    Exhausted,
    CostBound,
    TimeBound,
}

/// Counters for the most recent search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub expanded: usize,
    pub elapsed: Duration,
    pub stop: Option<StopReason>,
}

/// Inputs of one search. `start` and `goal` must already be resolved nodes.
#[derive(Debug, Clone, Copy)]
pub struct SearchRequest<R> {
    pub start: PathNode<R>,
    pub goal: PathNode<R>,
    pub flags: MoveFlags,
    pub allow_partial: bool,
}

/// Open-set entry, ordered so `BinaryHeap` (a max-heap) pops the lowest `f`
/// first, then the highest `g`, then the earliest insertion.
#[derive(Clone, Copy)]
struct OpenEntry<R> {
    f: Cost,
    g: Cost,
    seq: u64,
    key: NodeKey<R>,
}

impl<R> PartialEq for OpenEntry<R> {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.g == other.g && self.seq == other.seq
    }
}

impl<R> Eq for OpenEntry<R> {}

impl<R> Ord for OpenEntry<R> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then(self.g.cmp(&other.g))
            .then(other.seq.cmp(&self.seq))
    }
}

impl<R> PartialOrd for OpenEntry<R> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// All mutable state of an A* search.
///
/// The context is reset at the start of every search and keeps its
/// allocations, so a long-lived context stops allocating after warm-up. The
/// closed set survives until the next search and is what paths are
/// reconstructed from.
pub struct SearchContext<R> {
    open: BinaryHeap<OpenEntry<R>>,
    // Best known version of every node currently open, with the sequence
    // number of its live heap entry. Older heap entries are stale.
    open_nodes: HashMap<NodeKey<R>, (PathNode<R>, u64)>,
    closed: Vec<PathNode<R>>,
    closed_index: HashMap<NodeKey<R>, usize>,
    nbuf: Vec<Candidate<R>>,
    seq: u64,
    stats: SearchStats,
}

impl<R: Copy + Eq + Hash> Default for SearchContext<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Copy + Eq + Hash> SearchContext<R> {
    pub fn new() -> Self {
        Self {
            open: BinaryHeap::new(),
            open_nodes: HashMap::new(),
            closed: Vec::new(),
            closed_index: HashMap::new(),
            nbuf: Vec::with_capacity(8),
            seq: 0,
            stats: SearchStats::default(),
        }
    }

    fn reset(&mut self) {
        self.open.clear();
        self.open_nodes.clear();
        self.closed.clear();
        self.closed_index.clear();
        self.seq = 0;
        self.stats = SearchStats::default();
    }

    /// Nodes expanded by the last search, in expansion order.
    pub fn closed(&self) -> &[PathNode<R>] {
        &self.closed
    }

    /// Closed record of a node.
    pub fn closed_node(&self, key: &NodeKey<R>) -> Option<&PathNode<R>> {
        self.closed_index.get(key).map(|&i| &self.closed[i])
    }

    #[inline]
    pub fn is_closed(&self, key: &NodeKey<R>) -> bool {
        self.closed_index.contains_key(key)
    }

    #[inline]
    pub fn is_open(&self, key: &NodeKey<R>) -> bool {
        self.open_nodes.contains_key(key)
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Insert `node` into the open set, superseding any earlier version.
    fn push_open(&mut self, node: PathNode<R>) {
        let key = node.key();
        self.seq += 1;
        self.open.push(OpenEntry {
            f: node.f,
            g: node.g,
            seq: self.seq,
            key,
        });
        self.open_nodes.insert(key, (node, self.seq));
    }

    fn pop_open(&mut self) -> Option<PathNode<R>> {
        while let Some(entry) = self.open.pop() {
            match self.open_nodes.get(&entry.key) {
                Some(&(node, seq)) if seq == entry.seq => {
                    self.open_nodes.remove(&entry.key);
                    return Some(node);
                }
                _ => continue,
            }
        }
        None
    }

    fn close(&mut self, node: PathNode<R>) {
        self.closed_index.insert(node.key(), self.closed.len());
        self.closed.push(node);
    }

    /// Relax the edge `a -> b` costing `step`. If it improves `b.g`, `b` is
    /// re-parented to `a`, its `f` recomputed with `estimate` and it is
    /// (re)queued. Returns whether `b` improved.
    pub fn relax(
        &mut self,
        a: &PathNode<R>,
        mut b: PathNode<R>,
        step: Cost,
        estimate: impl Fn(&PathNode<R>) -> Cost,
    ) -> bool {
        let g = a.g.saturating_add(step);
        if g >= b.g {
            return false;
        }
        b.parent = Some(a.key());
        b.g = g;
        b.f = g.saturating_add(estimate(&b));
        self.push_open(b);
        true
    }

    /// Run a bounded A* search from `request.start` to `request.goal`.
    ///
    /// Rejections (bad flags, blocked goal) are errors; a search that ran
    /// and failed is `Ok(SearchOutcome::NotFound)`.
    pub fn search<W, C>(
        &mut self,
        world: &W,
        clock: &C,
        config: &SearchConfig,
        request: &SearchRequest<R>,
    ) -> Result<SearchOutcome<R>, FindError>
    where
        W: WorldQuery<Region = R>,
        C: Clock,
    {
        self.reset();

        let mode = MoveMode::from_flags(request.flags).ok_or(FindError::InvalidMoveFlags)?;
        let goal = request.goal;
        let clearance = config.vertical_clearance;

        let goal_area = world.tile_flags(goal.region, goal.tile(), goal.layer, clearance);
        if !goal_area.intersects(mode.goal_mask()) {
            return Err(FindError::GoalBlocked);
        }
        let mask = mode.area_mask();

        let started = clock.now();

        let mut start = request.start;
        start.g = 0;
        start.parent = None;
        start.f = mode.heuristic(start.global, goal.global);
        let bound = start.f.saturating_mul(config.cost_factor);
        self.push_open(start);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut last = start;

        let stop = loop {
            let Some(current) = self.pop_open() else {
                break StopReason::Exhausted;
            };
            self.close(current);
            self.stats.expanded += 1;
            last = current;

            if current == goal {
                break StopReason::Goal;
            }
            if current.f > bound {
                break StopReason::CostBound;
            }
            if clock.now().saturating_sub(started) > config.max_search_time {
                break StopReason::TimeBound;
            }

            nbuf.clear();
            expand(world, &current, mask, clearance, &mut nbuf);

            for c in nbuf.iter() {
                let key = c.node.key();
                if self.is_closed(&key) {
                    continue;
                }
                let b = match self.open_nodes.get(&key) {
                    Some(&(open, _)) => open,
                    None => c.node,
                };
                let step = mode.step_cost(current.global, c.node.global, c.area);
                self.relax(&current, b, step, |n| mode.heuristic(n.global, goal.global));
            }
        };

        self.nbuf = nbuf;
        self.stats.stop = Some(stop);
        self.stats.elapsed = clock.now().saturating_sub(started);

        let outcome = match stop {
            StopReason::Goal => SearchOutcome::Found(last),
            StopReason::Exhausted => SearchOutcome::NotFound,
            StopReason::CostBound | StopReason::TimeBound => {
                if request.allow_partial && !last.is_start() && last.g < start.f {
                    SearchOutcome::PartiallyFound(last)
                } else {
                    SearchOutcome::NotFound
                }
            }
        };
        log::debug!(
            "search {:?}: {:?} after {} expansions ({:?})",
            mode,
            stop,
            self.stats.expanded,
            self.stats.elapsed
        );
        Ok(outcome)
    }

    /// Walk parent links from `terminal` back to the start, returning the
    /// closed records in terminal-to-start order.
    pub fn trace(&self, terminal: &PathNode<R>) -> Result<Vec<PathNode<R>>, BuildError> {
        let mut node = *self
            .closed_node(&terminal.key())
            .ok_or(BuildError::TerminalNotClosed)?;
        let mut chain = vec![node];
        while let Some(parent) = node.parent {
            if chain.len() > self.closed.len() {
                return Err(BuildError::BrokenParentChain);
            }
            node = *self
                .closed_node(&parent)
                .ok_or(BuildError::BrokenParentChain)?;
            chain.push(node);
        }
        Ok(chain)
    }
}
