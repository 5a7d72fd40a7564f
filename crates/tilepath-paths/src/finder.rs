//! The [`PathFinder`] facade: resolve, search, build and store in one call.

use std::hash::Hash;

use tilepath_core::{MoveFlags, Vec2, WorldQuery};

use crate::astar::{SearchContext, SearchOutcome, SearchRequest, SearchStats};
use crate::builder;
use crate::clock::{Clock, SystemClock};
use crate::config::SearchConfig;
use crate::cost::MoveMode;
use crate::error::{FindError, StoreError};
use crate::node::{Cost, PathNode};
use crate::path::{Advance, ConsumerId, Path, PathId, PathKind};
use crate::store::PathStore;

/// A path query in world-space positions.
#[derive(Debug, Clone, Copy)]
pub struct PathRequest<R> {
    pub start: Vec2,
    pub start_layer: u8,
    pub goal: Vec2,
    pub goal_layer: u8,
    pub flags: MoveFlags,
    /// Accept a best-effort path when a search bound is hit.
    pub allow_partial: bool,
    /// Resolve both positions inside this region only, instead of looking
    /// them up in the whole world.
    pub region_hint: Option<R>,
}

impl<R> PathRequest<R> {
    /// A complete-path request on layer 0 with no region hint.
    pub fn new(start: Vec2, goal: Vec2, flags: MoveFlags) -> Self {
        Self {
            start,
            start_layer: 0,
            goal,
            goal_layer: 0,
            flags,
            allow_partial: false,
            region_hint: None,
        }
    }

    pub fn with_layers(mut self, start_layer: u8, goal_layer: u8) -> Self {
        self.start_layer = start_layer;
        self.goal_layer = goal_layer;
        self
    }

    pub fn with_partial(mut self, allow_partial: bool) -> Self {
        self.allow_partial = allow_partial;
        self
    }

    pub fn with_region_hint(mut self, region: R) -> Self {
        self.region_hint = Some(region);
        self
    }
}

/// Pathfinding service: owns the search state and the stored paths.
///
/// Each call runs to completion on the calling thread, bounded by the
/// configured time and cost limits.
pub struct PathFinder<R, C = SystemClock> {
    config: SearchConfig,
    clock: C,
    ctx: SearchContext<R>,
    store: PathStore,
    last_terminal: Option<PathNode<R>>,
}

impl<R: Copy + Eq + Hash> PathFinder<R> {
    /// A finder timed by the system clock.
    pub fn new(config: SearchConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<R: Copy + Eq + Hash> Default for PathFinder<R> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<R: Copy + Eq + Hash, C: Clock> PathFinder<R, C> {
    pub fn with_clock(config: SearchConfig, clock: C) -> Self {
        let store = PathStore::new(config.waypoint_threshold);
        Self {
            config,
            clock,
            ctx: SearchContext::new(),
            store,
            last_terminal: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[inline]
    pub fn store(&self) -> &PathStore {
        &self.store
    }

    /// Find and store a path between two world positions.
    pub fn find_path<W>(&mut self, world: &W, request: &PathRequest<R>) -> Result<PathId, FindError>
    where
        W: WorldQuery<Region = R>,
    {
        self.last_terminal = None;
        let result = self.search_and_store(world, request);
        let stats = self.ctx.stats();
        match &result {
            Ok(id) => log::info!(
                "find_path {}: path {id} after {} expansions ({:?})",
                request.flags,
                stats.expanded,
                stats.elapsed
            ),
            Err(FindError::Build(e)) => log::error!("find_path {}: {e}", request.flags),
            Err(e) => log::info!(
                "find_path {}: {e} after {} expansions ({:?})",
                request.flags,
                stats.expanded,
                stats.elapsed
            ),
        }
        result
    }

    fn search_and_store<W>(&mut self, world: &W, request: &PathRequest<R>) -> Result<PathId, FindError>
    where
        W: WorldQuery<Region = R>,
    {
        let resolve = |position: Vec2| match request.region_hint {
            Some(region) => world.resolve_in(region, position).map(|tile| (region, tile)),
            None => world.resolve(position),
        };
        let (start_region, start_tile) = resolve(request.start).ok_or(FindError::StartUnresolved)?;
        let (goal_region, goal_tile) = resolve(request.goal).ok_or(FindError::GoalUnresolved)?;

        let start = PathNode::at(world, start_region, start_tile, request.start_layer);
        let goal = PathNode::at(world, goal_region, goal_tile, request.goal_layer);
        if start == goal {
            return Err(FindError::Degenerate);
        }

        let search = SearchRequest {
            start,
            goal,
            flags: request.flags,
            allow_partial: request.allow_partial,
        };
        let (terminal, kind) = match self.ctx.search(world, &self.clock, &self.config, &search)? {
            SearchOutcome::Found(node) => (node, PathKind::Complete),
            SearchOutcome::PartiallyFound(node) => (node, PathKind::Partial),
            SearchOutcome::NotFound => return Err(FindError::NotFound),
        };
        self.last_terminal = Some(terminal);

        let path = builder::build(&self.ctx, &terminal, world, &self.config, kind)?;
        Ok(self.store.store(path))
    }

    pub fn path(&self, id: PathId) -> Option<&Path> {
        self.store.get(id)
    }

    pub fn attach_consumer(&mut self, id: PathId, consumer: ConsumerId) -> Result<usize, StoreError> {
        self.store.attach(id, consumer)
    }

    pub fn advance_consumer(
        &mut self,
        id: PathId,
        consumer: ConsumerId,
        position: Vec2,
    ) -> Result<Advance, StoreError> {
        self.store.advance(id, consumer, position)
    }

    pub fn detach_consumer(&mut self, id: PathId, consumer: ConsumerId) -> Result<bool, StoreError> {
        self.store.detach(id, consumer)
    }

    pub fn is_finished(&self, id: PathId) -> bool {
        self.store.is_finished(id)
    }

    /// Heuristic estimate between two nodes for a movement mode, 0 when
    /// `flags` do not select a mode.
    pub fn heuristic(&self, from: &PathNode<R>, to: &PathNode<R>, flags: MoveFlags) -> Cost {
        MoveMode::from_flags(flags).map_or(0, |mode| mode.heuristic(from.global, to.global))
    }

    /// `f` of the terminal node of the last successful search, 0 if none.
    pub fn last_f_cost(&self) -> Cost {
        self.last_terminal.map_or(0, |n| n.f)
    }

    /// Counters of the last search.
    pub fn search_stats(&self) -> SearchStats {
        self.ctx.stats()
    }

    /// Forget every stored path and consumer.
    pub fn clear_paths(&mut self) {
        self.store.clear();
        self.last_terminal = None;
    }
}
