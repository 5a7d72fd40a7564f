use std::fmt;

use tilepath_core::Vec2;

/// Stable handle of a stored path: its slot index in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathId(pub usize);

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque handle of an agent following paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsumerId(pub u64);

/// Lifecycle of a stored path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathStatus {
    /// Built, no consumer yet.
    Ready,
    /// At least one consumer attached.
    InUse,
    /// Every consumer left; the slot waits for reuse.
    Finished,
}

/// Whether the path reaches the requested goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathKind {
    Complete,
    Partial,
}

/// One consumer's progress along a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumerSlot {
    pub consumer: ConsumerId,
    /// Index of the next waypoint not reached yet. Always >= 1.
    pub next: usize,
}

/// Result of advancing a consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Waypoint index to head toward.
    Heading(usize),
    /// The consumer is not following this path (anymore).
    NoActivePath,
}

impl Advance {
    pub fn waypoint(self) -> Option<usize> {
        match self {
            Self::Heading(i) => Some(i),
            Self::NoActivePath => None,
        }
    }
}

/// A built path: an ordered polyline plus the consumers walking it.
///
/// `points[0]` is the start, the last point the goal (or the partial
/// endpoint). `segments[i] = points[i] - points[i - 1]`, `segments[0]` is
/// zero.
#[derive(Debug, Clone)]
pub struct Path {
    pub(crate) id: PathId,
    pub(crate) points: Vec<Vec2>,
    pub(crate) segments: Vec<Vec2>,
    pub(crate) status: PathStatus,
    pub(crate) kind: PathKind,
    pub(crate) slots: Vec<Option<ConsumerSlot>>,
    pub(crate) active_users: usize,
}

impl Path {
    /// Create a ready path from its waypoints. The id is assigned when the
    /// path is stored.
    pub fn new(points: Vec<Vec2>, kind: PathKind) -> Self {
        let mut segments = Vec::with_capacity(points.len());
        if !points.is_empty() {
            segments.push(Vec2::ZERO);
        }
        segments.extend(points.windows(2).map(|w| w[1] - w[0]));
        Self {
            id: PathId(0),
            points,
            segments,
            status: PathStatus::Ready,
            kind,
            slots: Vec::new(),
            active_users: 0,
        }
    }

    #[inline]
    pub fn id(&self) -> PathId {
        self.id
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    #[inline]
    pub fn segments(&self) -> &[Vec2] {
        &self.segments
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn status(&self) -> PathStatus {
        self.status
    }

    #[inline]
    pub fn kind(&self) -> PathKind {
        self.kind
    }

    #[inline]
    pub fn active_users(&self) -> usize {
        self.active_users
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.status == PathStatus::Finished
    }

    /// Index of the final waypoint.
    #[inline]
    pub fn last_index(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn point(&self, index: usize) -> Option<Vec2> {
        self.points.get(index).copied()
    }

    pub fn segment(&self, index: usize) -> Option<Vec2> {
        self.segments.get(index).copied()
    }

    /// Whether heading toward `index` means walking the final segment.
    #[inline]
    pub fn is_last_segment(&self, index: usize) -> bool {
        index == self.last_index()
    }

    /// Consumer slots; `None` entries are free.
    pub fn slots(&self) -> &[Option<ConsumerSlot>] {
        &self.slots
    }

    /// Next waypoint index of the consumer in `slot`.
    pub fn current_index(&self, slot: usize) -> Option<usize> {
        self.slots.get(slot).copied().flatten().map(|s| s.next)
    }

    /// Slot held by `consumer`, if any.
    pub fn consumer_slot(&self, consumer: ConsumerId) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.is_some_and(|s| s.consumer == consumer))
    }

    /// First occupied slot.
    pub fn first_active_user(&self) -> Option<usize> {
        if self.active_users == 0 {
            return None;
        }
        self.slots.iter().position(Option::is_some)
    }

    /// Give `consumer` a slot, reusing a free one when possible.
    pub(crate) fn claim_slot(&mut self, consumer: ConsumerId) -> usize {
        let entry = Some(ConsumerSlot { consumer, next: 1 });
        let slot = match self.slots.iter().position(Option::is_none) {
            Some(i) => {
                self.slots[i] = entry;
                i
            }
            None => {
                self.slots.push(entry);
                self.slots.len() - 1
            }
        };
        self.active_users += 1;
        self.status = PathStatus::InUse;
        slot
    }

    /// Free `slot`. Returns true when this was the last consumer and the
    /// path became finished.
    pub(crate) fn release_slot(&mut self, slot: usize) -> bool {
        let Some(entry) = self.slots.get_mut(slot) else {
            return false;
        };
        if entry.take().is_none() {
            return false;
        }
        self.active_users -= 1;
        if self.active_users == 0 {
            self.status = PathStatus::Finished;
            return true;
        }
        false
    }
}
