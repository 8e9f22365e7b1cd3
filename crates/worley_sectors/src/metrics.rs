//! Engine-agnostic statistics for sector generation.
//!
//! Feature-gated and runtime-toggled: without the `metrics` feature every
//! `record_*` call is a no-op.
//!
//! # Usage
//!
//! ```ignore
//! use worley_sectors::metrics::COLLECT_METRICS;
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! stage.tick(&world);
//! println!("avg flood fill: {} us", stage.metrics().avg_flood_fill_us());
//! ```

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;

use crate::types::SectorType;
use crate::world::{Sector, SectorTimings};

/// Runtime toggle for metrics collection.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
  #[cfg(feature = "metrics")]
  {
    COLLECT_METRICS.load(Ordering::Relaxed)
  }
  #[cfg(not(feature = "metrics"))]
  {
    false
  }
}

const DEFAULT_WINDOW: usize = 128;

/// Fixed-capacity history of recent samples; the oldest is evicted first.
#[derive(Debug, Clone)]
pub struct RollingWindow {
  buffer: VecDeque<u64>,
  capacity: usize,
}

impl RollingWindow {
  pub fn new(capacity: usize) -> Self {
    Self {
      buffer: VecDeque::with_capacity(capacity),
      capacity: capacity.max(1),
    }
  }

  pub fn push(&mut self, value: u64) {
    if self.buffer.len() >= self.capacity {
      self.buffer.pop_front();
    }
    self.buffer.push_back(value);
  }

  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  pub fn clear(&mut self) {
    self.buffer.clear();
  }

  /// Oldest to newest.
  pub fn iter(&self) -> impl Iterator<Item = &u64> {
    self.buffer.iter()
  }

  pub fn last(&self) -> Option<u64> {
    self.buffer.back().copied()
  }

  pub fn sum(&self) -> u64 {
    self.buffer.iter().sum()
  }

  pub fn average(&self) -> f64 {
    if self.buffer.is_empty() {
      0.0
    } else {
      self.sum() as f64 / self.buffer.len() as f64
    }
  }

  pub fn min_max(&self) -> Option<(u64, u64)> {
    let min = self.buffer.iter().min()?;
    let max = self.buffer.iter().max()?;
    Some((*min, *max))
  }
}

impl Default for RollingWindow {
  fn default() -> Self {
    Self::new(DEFAULT_WINDOW)
  }
}

/// Generation statistics accumulated by a [`SectorStage`](crate::task_queue::SectorStage).
#[derive(Debug, Clone, Default)]
pub struct SectorMetrics {
  // Timing (microseconds)
  pub flood_fill_timings: RollingWindow,
  pub classify_timings: RollingWindow,
  pub mesh_timings: RollingWindow,

  // Counters
  /// Generated sectors, indexed by [`type_slot`].
  pub sectors_per_type: [u64; 3],
  /// Points visited by all flood fills.
  pub total_points: u64,
  /// Quads emitted by all meshes.
  pub total_quads: u64,
  /// Requests that ended in an error.
  pub failed_sectors: u64,
}

/// Counter slot of a sector type in [`SectorMetrics::sectors_per_type`].
#[inline]
pub fn type_slot(sector_type: SectorType) -> usize {
  match sector_type {
    SectorType::None => 0,
    SectorType::Mountain => 1,
    SectorType::Lake => 2,
  }
}

impl SectorMetrics {
  pub fn new() -> Self {
    Self::default()
  }

  /// Clear timings and counters.
  pub fn reset(&mut self) {
    *self = Self::default();
  }

  pub fn record_timings(&mut self, timings: &SectorTimings) {
    if is_enabled() {
      self.flood_fill_timings.push(timings.flood_fill_us);
      self.classify_timings.push(timings.classify_us);
      self.mesh_timings.push(timings.mesh_us);
    }
  }

  pub fn record_sector(&mut self, sector: &Sector) {
    if !is_enabled() {
      return;
    }
    self.sectors_per_type[type_slot(sector.sector_type())] += 1;
    self.total_points += sector.region.points.len() as u64;
    self.total_quads += sector.mesh.quad_count() as u64;
  }

  pub fn record_failure(&mut self) {
    if is_enabled() {
      self.failed_sectors += 1;
    }
  }

  pub fn sectors_of(&self, sector_type: SectorType) -> u64 {
    self.sectors_per_type[type_slot(sector_type)]
  }

  pub fn total_sectors(&self) -> u64 {
    self.sectors_per_type.iter().sum()
  }

  pub fn avg_flood_fill_us(&self) -> f64 {
    self.flood_fill_timings.average()
  }

  pub fn avg_classify_us(&self) -> f64 {
    self.classify_timings.average()
  }

  pub fn avg_mesh_us(&self) -> f64 {
    self.mesh_timings.average()
  }
}

#[cfg(all(test, feature = "metrics"))]
#[path = "metrics_test.rs"]
mod metrics_test;
