use std::collections::HashMap;

use tilepath_core::Vec2;

use crate::error::StoreError;
use crate::path::{Advance, ConsumerId, Path, PathId, PathStatus};

/// Pool of built paths and the consumers following them.
///
/// Slots are never freed: once every consumer has left a path it is marked
/// [`PathStatus::Finished`] and its slot is handed to the next stored path.
/// A consumer follows at most one path at a time.
#[derive(Debug, Default)]
pub struct PathStore {
    paths: Vec<Path>,
    free: Vec<PathId>,
    consumers: HashMap<ConsumerId, PathId>,
    threshold: Vec2,
}

impl PathStore {
    /// Create an empty store. `threshold` is the per-axis distance at which
    /// a consumer reaches a waypoint.
    pub fn new(threshold: Vec2) -> Self {
        Self {
            paths: Vec::new(),
            free: Vec::new(),
            consumers: HashMap::new(),
            threshold,
        }
    }

    /// Store `path`, reusing a finished slot when one is available.
    pub fn store(&mut self, mut path: Path) -> PathId {
        path.status = PathStatus::Ready;
        if let Some(id) = self.free.pop() {
            log::debug!("path {id}: reusing finished slot");
            path.id = id;
            self.paths[id.0] = path;
            return id;
        }
        let id = PathId(self.paths.len());
        path.id = id;
        self.paths.push(path);
        id
    }

    pub fn get(&self, id: PathId) -> Option<&Path> {
        self.paths.get(id.0)
    }

    /// Number of slots, finished ones included.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Number of finished slots waiting for reuse.
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Path `consumer` currently follows.
    pub fn path_of(&self, consumer: ConsumerId) -> Option<PathId> {
        self.consumers.get(&consumer).copied()
    }

    pub fn is_finished(&self, id: PathId) -> bool {
        self.get(id).is_some_and(Path::is_finished)
    }

    /// Register `consumer` on path `id` and return its slot. A consumer
    /// already on the path keeps its slot; one following another path is
    /// detached from it first.
    pub fn attach(&mut self, id: PathId, consumer: ConsumerId) -> Result<usize, StoreError> {
        let path = self.get(id).ok_or(StoreError::UnknownPath(id))?;
        if path.status == PathStatus::Finished {
            return Err(StoreError::NotAttachable {
                id,
                status: path.status,
            });
        }
        if let Some(slot) = path.consumer_slot(consumer) {
            return Ok(slot);
        }

        if let Some(previous) = self.path_of(consumer) {
            if previous != id {
                self.detach(previous, consumer)?;
            }
        }

        let slot = self.paths[id.0].claim_slot(consumer);
        self.consumers.insert(consumer, id);
        log::debug!("path {id}: consumer {} takes slot {slot}", consumer.0);
        Ok(slot)
    }

    /// Move `consumer` along path `id` given its current position.
    ///
    /// Reaching the current waypoint moves the cursor to the next one.
    /// Passing the last waypoint detaches the consumer and yields
    /// [`Advance::NoActivePath`], as does a consumer not on this path.
    pub fn advance(
        &mut self,
        id: PathId,
        consumer: ConsumerId,
        position: Vec2,
    ) -> Result<Advance, StoreError> {
        let threshold = self.threshold;
        let path = self.paths.get_mut(id.0).ok_or(StoreError::UnknownPath(id))?;
        let Some(slot) = path.consumer_slot(consumer) else {
            return Ok(Advance::NoActivePath);
        };
        let num_nodes = path.num_nodes();
        let Some(Some(cursor)) = path.slots.get_mut(slot) else {
            return Ok(Advance::NoActivePath);
        };

        if let Some(&target) = path.points.get(cursor.next) {
            if position.within(target, threshold) {
                cursor.next += 1;
                log::debug!(
                    "path {id}: consumer {} reached waypoint, next {} of {}",
                    consumer.0,
                    cursor.next,
                    num_nodes - 1
                );
            }
        }

        if cursor.next >= num_nodes {
            log::info!("path {id}: consumer {} finished", consumer.0);
            self.release(id, slot);
            return Ok(Advance::NoActivePath);
        }
        Ok(Advance::Heading(cursor.next))
    }

    /// Remove `consumer` from path `id`. Returns whether it was attached.
    pub fn detach(&mut self, id: PathId, consumer: ConsumerId) -> Result<bool, StoreError> {
        let path = self.get(id).ok_or(StoreError::UnknownPath(id))?;
        match path.consumer_slot(consumer) {
            Some(slot) => {
                self.release(id, slot);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn release(&mut self, id: PathId, slot: usize) {
        let path = &mut self.paths[id.0];
        if let Some(Some(entry)) = path.slots.get(slot) {
            if self.consumers.get(&entry.consumer) == Some(&id) {
                self.consumers.remove(&entry.consumer);
            }
        }
        if path.release_slot(slot) {
            log::info!("path {id}: finished, slot returned to the free list");
            self.free.push(id);
        }
    }

    /// Drop every path and consumer registration.
    pub fn clear(&mut self) {
        log::info!("clearing {} stored paths", self.paths.len());
        self.paths.clear();
        self.free.clear();
        self.consumers.clear();
    }

    /// Log the state and waypoints of path `id`.
    pub fn dump(&self, id: PathId) {
        let Some(path) = self.get(id) else {
            log::warn!("path {id}: no such path");
            return;
        };
        log::info!(
            "path {id}: status={:?} kind={:?} nodes={} active_users={}",
            path.status(),
            path.kind(),
            path.num_nodes(),
            path.active_users()
        );
        for (i, p) in path.points().iter().enumerate() {
            log::info!("  points[{i}] = {p}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathKind;

    fn line(n: usize) -> Path {
        let points = (0..n).map(|i| Vec2::new(i as f32 + 0.5, 0.5)).collect();
        Path::new(points, PathKind::Complete)
    }

    fn store() -> PathStore {
        PathStore::new(Vec2::new(0.5, 1.0))
    }

    #[test]
    fn ids_follow_slots() {
        let mut s = store();
        assert_eq!(s.store(line(2)), PathId(0));
        assert_eq!(s.store(line(3)), PathId(1));
        assert_eq!(s.len(), 2);
        assert_eq!(s.get(PathId(1)).map(Path::num_nodes), Some(3));
        assert_eq!(s.get(PathId(1)).map(Path::id), Some(PathId(1)));
        assert!(s.get(PathId(2)).is_none());
    }

    #[test]
    fn attach_is_idempotent() {
        let mut s = store();
        let id = s.store(line(3));
        let c = ConsumerId(9);
        assert_eq!(s.attach(id, c), Ok(0));
        assert_eq!(s.attach(id, c), Ok(0));
        assert_eq!(s.attach(id, ConsumerId(10)), Ok(1));
        let path = s.get(id).unwrap();
        assert_eq!(path.active_users(), 2);
        assert_eq!(path.status(), PathStatus::InUse);
        assert_eq!(path.current_index(0), Some(1));
    }

    #[test]
    fn consumer_follows_one_path_at_a_time() {
        let mut s = store();
        let a = s.store(line(3));
        let b = s.store(line(3));
        let c = ConsumerId(1);
        s.attach(a, c).unwrap();
        s.attach(b, c).unwrap();
        assert!(s.is_finished(a));
        assert_eq!(s.path_of(c), Some(b));
        assert_eq!(s.get(b).unwrap().active_users(), 1);
        assert_eq!(s.free_len(), 1);
    }

    #[test]
    fn finished_paths_reject_consumers() {
        let mut s = store();
        let id = s.store(line(2));
        s.attach(id, ConsumerId(1)).unwrap();
        assert_eq!(s.detach(id, ConsumerId(1)), Ok(true));
        assert_eq!(
            s.attach(id, ConsumerId(2)),
            Err(StoreError::NotAttachable {
                id,
                status: PathStatus::Finished
            })
        );
        assert_eq!(s.detach(id, ConsumerId(1)), Ok(false));
    }

    #[test]
    fn unknown_ids_are_errors() {
        let mut s = store();
        let bad = PathId(4);
        assert_eq!(s.attach(bad, ConsumerId(1)), Err(StoreError::UnknownPath(bad)));
        assert_eq!(s.detach(bad, ConsumerId(1)), Err(StoreError::UnknownPath(bad)));
        assert_eq!(
            s.advance(bad, ConsumerId(1), Vec2::ZERO),
            Err(StoreError::UnknownPath(bad))
        );
        assert!(!s.is_finished(bad));
    }

    #[test]
    fn advance_walks_every_waypoint_then_detaches() {
        let mut s = store();
        let id = s.store(line(4));
        let c = ConsumerId(3);
        s.attach(id, c).unwrap();
        let points = s.get(id).unwrap().points().to_vec();

        // Far away: keep heading to waypoint 1.
        assert_eq!(s.advance(id, c, Vec2::new(50.0, 50.0)), Ok(Advance::Heading(1)));

        for (i, &p) in points.iter().enumerate().skip(1) {
            let got = s.advance(id, c, p).unwrap();
            if i + 1 < points.len() {
                assert_eq!(got, Advance::Heading(i + 1));
            } else {
                assert_eq!(got, Advance::NoActivePath);
            }
        }
        assert!(s.is_finished(id));
        assert_eq!(s.path_of(c), None);
        assert_eq!(s.advance(id, c, points[1]), Ok(Advance::NoActivePath));
    }

    #[test]
    fn advance_thresholds_are_asymmetric() {
        let mut s = store();
        let id = s.store(line(3));
        let c = ConsumerId(1);
        s.attach(id, c).unwrap();
        let target = s.get(id).unwrap().points()[1];
        assert_eq!(
            s.advance(id, c, target + Vec2::new(0.6, 0.0)),
            Ok(Advance::Heading(1))
        );
        assert_eq!(
            s.advance(id, c, target + Vec2::new(0.4, 0.9)),
            Ok(Advance::Heading(2))
        );
    }

    #[test]
    fn finished_slot_is_reused() {
        let mut s = store();
        let a = s.store(line(2));
        let b = s.store(line(2));
        s.attach(a, ConsumerId(1)).unwrap();
        s.detach(a, ConsumerId(1)).unwrap();
        assert!(s.is_finished(a));

        let c = s.store(line(5));
        assert_eq!(c, a);
        assert_eq!(s.len(), 2);
        let reused = s.get(c).unwrap();
        assert_eq!(reused.status(), PathStatus::Ready);
        assert_eq!(reused.num_nodes(), 5);
        assert_eq!(reused.active_users(), 0);
        assert_ne!(b, c);
    }

    #[test]
    fn single_point_path_finishes_immediately() {
        let mut s = store();
        let id = s.store(line(1));
        let c = ConsumerId(1);
        s.attach(id, c).unwrap();
        assert_eq!(s.advance(id, c, Vec2::ZERO), Ok(Advance::NoActivePath));
        assert!(s.is_finished(id));
    }

    #[test]
    fn clear_forgets_everything() {
        let mut s = store();
        let id = s.store(line(2));
        s.attach(id, ConsumerId(1)).unwrap();
        s.clear();
        assert!(s.is_empty());
        assert_eq!(s.path_of(ConsumerId(1)), None);
        assert_eq!(s.store(line(2)), PathId(0));
    }
}
