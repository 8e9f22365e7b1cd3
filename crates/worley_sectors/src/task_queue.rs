//! Task queue for parallel sector generation.
//!
//! Enqueue → Tick → Completions. Each tick fans the pending seeds out over
//! rayon; every seed runs the full discover → classify → mesh chain against
//! one shared [`SectorWorld`].
//!
//! On WASM, requires wasm-bindgen-rayon initialization before use.

use glam::IVec2;
use rayon::prelude::*;
use tracing::debug;

use crate::error::Result;
use crate::metrics::SectorMetrics;
use crate::noise::CellSampler;
use crate::topology::CellTopology;
use crate::world::{Sector, SectorTimings, SectorWorld};

/// Request to generate the sector containing `seed`.
#[derive(Clone, Copy, Debug)]
pub struct SectorRequest {
  pub id: u64,
  pub seed: IVec2,
}

/// Finished request.
#[derive(Debug)]
pub struct SectorCompletion {
  /// Request ID this completion corresponds to.
  pub id: u64,
  pub seed: IVec2,
  pub result: Result<Sector>,
  pub timings: SectorTimings,
}

/// Sector generation stage that processes requests in parallel.
#[derive(Debug, Default)]
pub struct SectorStage {
  pending: Vec<SectorRequest>,
  completed: Vec<SectorCompletion>,
  next_id: u64,
  metrics: SectorMetrics,
}

impl SectorStage {
  pub fn new() -> Self {
    Self::default()
  }

  /// Enqueue a seed position, returning the assigned request ID.
  pub fn enqueue(&mut self, seed: IVec2) -> u64 {
    let id = self.next_id;
    self.next_id += 1;
    self.pending.push(SectorRequest { id, seed });
    id
  }

  /// Process pending requests in parallel and move completions to output.
  /// Returns the number of requests processed this tick.
  ///
  /// Seeds landing in the same region race for its cells; the loser
  /// completes with an ownership conflict.
  #[tracing::instrument(skip_all, name = "task_queue::tick", fields(pending = self.pending.len()))]
  pub fn tick<S, T>(&mut self, world: &SectorWorld<S, T>) -> usize
  where
    S: CellSampler,
    T: CellTopology,
  {
    if self.pending.is_empty() {
      return 0;
    }

    let requests = std::mem::take(&mut self.pending);
    let count = requests.len();

    let completions: Vec<SectorCompletion> = requests
      .into_par_iter()
      .map(|req| {
        let (result, timings) = world.generate_timed(req.seed);
        SectorCompletion {
          id: req.id,
          seed: req.seed,
          result,
          timings,
        }
      })
      .collect();

    for completion in &completions {
      self.metrics.record_timings(&completion.timings);
      match &completion.result {
        Ok(sector) => self.metrics.record_sector(sector),
        Err(_) => self.metrics.record_failure(),
      }
    }

    let failed = completions.iter().filter(|c| c.result.is_err()).count();
    debug!(processed = count, failed, "sector stage ticked");

    self.completed.extend(completions);
    count
  }

  /// Take all completed requests.
  pub fn drain_completions(&mut self) -> Vec<SectorCompletion> {
    std::mem::take(&mut self.completed)
  }

  pub fn pending_count(&self) -> usize {
    self.pending.len()
  }

  /// Number of completed results waiting to be drained.
  pub fn completed_count(&self) -> usize {
    self.completed.len()
  }

  /// True when no work remains.
  pub fn is_idle(&self) -> bool {
    self.pending.is_empty() && self.completed.is_empty()
  }

  pub fn metrics(&self) -> &SectorMetrics {
    &self.metrics
  }

  pub fn metrics_mut(&mut self) -> &mut SectorMetrics {
    &mut self.metrics
  }
}

#[cfg(test)]
#[path = "task_queue_test.rs"]
mod task_queue_test;
