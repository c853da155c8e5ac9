//! Nearest-timestamp lookup over a pose-sample sequence.
//!
//! Samples arrive in analyzer output order, which is not guaranteed to be
//! timestamp order. The index shares the caller's sequence (never copies it)
//! and keeps a sort permutation over it, so each lookup is a binary search
//! rather than a scan. Tie-breaks are stable: equidistant neighbors resolve
//! to the earlier timestamp, equal timestamps to the earlier arrival.

use matview_core::PoseSample;
use std::sync::Arc;
use std::time::Duration;

/// Index over a timestamped pose-sample sequence.
pub struct PoseFrameIndex {
    samples: Arc<[PoseSample]>,
    /// Indices into `samples`, sorted by (timestamp, arrival order).
    sorted: Vec<u32>,
}

impl PoseFrameIndex {
    /// Build an index sharing the given sample sequence.
    pub fn new(samples: Arc<[PoseSample]>) -> Self {
        let mut sorted: Vec<u32> = (0..samples.len() as u32).collect();
        sorted.sort_by_key(|&i| (samples[i as usize].timestamp_ms, i));
        Self { samples, sorted }
    }

    /// An index over no samples; every lookup misses.
    pub fn empty() -> Self {
        Self::new(Arc::from(Vec::new()))
    }

    /// The underlying sample sequence, in arrival order.
    pub fn samples(&self) -> &[PoseSample] {
        &self.samples
    }

    /// Number of indexed samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no samples are indexed.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The sample whose timestamp is closest to `position_ms` by absolute
    /// difference; ties prefer the earlier sample.
    pub fn nearest(&self, position_ms: i64) -> Option<&PoseSample> {
        if self.sorted.is_empty() {
            return None;
        }

        // First sorted slot with timestamp >= position.
        let split = self
            .sorted
            .partition_point(|&i| self.samples[i as usize].timestamp_ms < position_ms);

        let after = self
            .sorted
            .get(split)
            .map(|&i| &self.samples[i as usize]);
        let before = split
            .checked_sub(1)
            .map(|s| &self.samples[self.sorted[s] as usize]);

        match (before, after) {
            (Some(b), Some(a)) => {
                let d_before = (position_ms - b.timestamp_ms).abs();
                let d_after = (a.timestamp_ms - position_ms).abs();
                // <= keeps the earlier sample on an exact tie.
                if d_before <= d_after {
                    Some(b)
                } else {
                    Some(a)
                }
            }
            (Some(b), None) => Some(b),
            (None, Some(a)) => Some(a),
            (None, None) => None,
        }
    }

    /// Lookup by playback position.
    pub fn nearest_at(&self, position: Duration) -> Option<&PoseSample> {
        self.nearest(position.as_millis() as i64)
    }
}
