//! Receiver-side snapshot buffer
//!
//! Bounded, time-ordered ring of received snapshots. Rendering reads a
//! deliberately delayed point in server time so two bracketing snapshots are
//! normally available, and the view is interpolated between them. The buffer
//! never extrapolates past the newest sample: display lag is bounded, visual
//! overshoot is not worth it.

use std::collections::VecDeque;

use log::trace;

use crate::client::interpolate::{interpolate_foods, interpolate_snakes};
use crate::sim::{FoodView, FoodsBatch, StateSnapshot};

/// Maximum retained snapshots
pub const MAX_BUFFER_SIZE: usize = 64;
/// Deliberate rendering lag behind estimated server time
pub const INTERPOLATION_DELAY_MS: f64 = 100.0;
/// Snapshots older than this relative to the newest are evicted
pub const MAX_HISTORY_MS: f64 = 1000.0;

#[derive(Debug, Clone)]
struct FoodsEntry {
    time: f64,
    foods: Vec<FoodView>,
}

/// Buffered snapshot history plus the clock-offset estimate
#[derive(Debug, Default)]
pub struct SnapshotBuffer {
    states: VecDeque<StateSnapshot>,
    foods: VecDeque<FoodsEntry>,
    /// `arrival_wall_clock - embedded_time` of the newest push; no smoothing
    time_offset_ms: Option<f64>,
}

impl SnapshotBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest a full snapshot received at `received_at_ms` (wall clock).
    /// Out-of-order snapshots are dropped silently.
    pub fn push(&mut self, mut snapshot: StateSnapshot, received_at_ms: f64) {
        if let Some(last) = self.states.back() {
            if snapshot.time <= last.time {
                trace!("dropping stale snapshot t={}", snapshot.time);
                return;
            }
        }

        // Merge the freshest food-only batch at or before this time
        if let Some(foods) = self.foods_for_time(snapshot.time) {
            snapshot.foods = foods;
        }

        self.time_offset_ms = Some(received_at_ms - snapshot.time);
        self.states.push_back(snapshot);
        let newest = self.states[self.states.len() - 1].time;

        while self
            .states
            .front()
            .is_some_and(|s| s.time < newest - MAX_HISTORY_MS)
        {
            self.states.pop_front();
        }
        while self.states.len() > MAX_BUFFER_SIZE {
            self.states.pop_front();
        }
    }

    /// Ingest a reduced-cadence food batch; same ordering and eviction rules
    /// on its own side buffer.
    pub fn push_foods(&mut self, batch: &FoodsBatch) {
        if let Some(last) = self.foods.back() {
            if batch.time <= last.time {
                return;
            }
        }
        self.foods.push_back(FoodsEntry {
            time: batch.time,
            foods: batch.foods(),
        });

        let newest = batch.time;
        while self
            .foods
            .front()
            .is_some_and(|entry| entry.time < newest - MAX_HISTORY_MS)
        {
            self.foods.pop_front();
        }
        while self.foods.len() > MAX_BUFFER_SIZE {
            self.foods.pop_front();
        }
    }

    /// The interpolated view for wall-clock `now_ms`, or `None` when nothing
    /// has been received yet.
    pub fn interpolated(&self, now_ms: f64) -> Option<StateSnapshot> {
        let first = self.states.front()?;
        if self.states.len() == 1 {
            return Some(first.clone());
        }

        let offset = self.time_offset_ms.unwrap_or(0.0);
        let render_time = (now_ms - offset) - INTERPOLATION_DELAY_MS;

        let last = self.states.back()?;
        if render_time <= first.time {
            return Some(first.clone());
        }
        if render_time >= last.time {
            return Some(last.clone());
        }

        let mut previous = first;
        let mut next = last;
        for i in 0..self.states.len() - 1 {
            let a = &self.states[i];
            let b = &self.states[i + 1];
            if render_time >= a.time && render_time <= b.time {
                previous = a;
                next = b;
                break;
            }
        }

        if next.time == previous.time {
            return Some(next.clone());
        }

        let alpha =
            (((render_time - previous.time) / (next.time - previous.time)) as f32).clamp(0.0, 1.0);
        Some(StateSnapshot {
            time: render_time,
            snakes: interpolate_snakes(&previous.snakes, &next.snakes, alpha),
            foods: interpolate_foods(&previous.foods, &next.foods, alpha),
        })
    }

    /// Newest retained snapshot, unblended
    pub fn latest(&self) -> Option<&StateSnapshot> {
        self.states.back()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Drop everything, including the offset estimate
    pub fn reset(&mut self) {
        self.states.clear();
        self.foods.clear();
        self.time_offset_ms = None;
    }

    fn foods_for_time(&self, time: f64) -> Option<Vec<FoodView>> {
        let mut selected: Option<&FoodsEntry> = None;
        for entry in &self.foods {
            if entry.time <= time {
                selected = Some(entry);
            } else {
                break;
            }
        }
        selected.map(|entry| entry.foods.clone())
    }
}
