//! Bounded, newest-first record of recent simulation results.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use crate::SimulationResult;

/// Default number of results kept by [`SimulationHistory`].
pub const DEFAULT_HISTORY_CAPACITY: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(capacity) => capacity,
    None => NonZeroUsize::MIN,
};

/// Most recent simulation results, newest first.
///
/// The history lives for the lifetime of its owner and is never persisted.
/// Recording beyond capacity evicts the oldest entry.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use std::time::SystemTime;
/// use catchment_core::{GeoPoint, OrderType, SimulationEngine, SimulationHistory, SimulationRequest};
///
/// let engine = SimulationEngine::new();
/// let mut history = SimulationHistory::with_capacity(NonZeroUsize::MIN);
/// let request = SimulationRequest::new(GeoPoint::new(0.0, 0.0), OrderType::Standard);
/// history.record(engine.simulate_at(&request, &[], SystemTime::UNIX_EPOCH));
/// history.record(engine.simulate(&request, &[]));
/// assert_eq!(history.len(), 1);
/// assert_ne!(history.latest().map(|r| r.timestamp), Some(SystemTime::UNIX_EPOCH));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationHistory {
    entries: VecDeque<SimulationResult>,
    capacity: NonZeroUsize,
}

impl Default for SimulationHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl SimulationHistory {
    /// Empty history holding up to [`DEFAULT_HISTORY_CAPACITY`] results.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty history holding up to `capacity` results.
    #[must_use]
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.get()),
            capacity,
        }
    }

    /// Maximum number of results retained.
    #[must_use]
    pub const fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Prepend `result`, evicting the oldest entry once full.
    pub fn record(&mut self, result: SimulationResult) {
        self.entries.push_front(result);
        self.entries.truncate(self.capacity.get());
    }

    /// Recorded results, newest first.
    pub fn list(&self) -> impl ExactSizeIterator<Item = &SimulationResult> + '_ {
        self.entries.iter()
    }

    /// The most recently recorded result.
    #[must_use]
    pub fn latest(&self) -> Option<&SimulationResult> {
        self.entries.front()
    }

    /// Number of recorded results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every recorded result.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
