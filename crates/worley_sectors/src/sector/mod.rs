//! Sector classification and cell ownership.
//!
//! A discovered region becomes a sector once its cells are split into the
//! sector's own cells and the foreign cells around it, its type is decided
//! and its cells are claimed in the [`CellRegistry`].
//!
//! ```text
//!   DiscoveredRegion ──► classify_region ──► RegionClassification
//!                                                   │
//!                                   CellRegistry ◄──┘ claim_all(sector_cells)
//! ```

mod classify;
mod registry;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

pub use classify::{classify_region, sector_is_pathable, RegionClassification, LAKE_HEIGHT_GROUP_LIMIT};
pub use registry::CellRegistry;

static SECTOR_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Opaque sector identifier, unique within the process lifetime.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct SectorId(u64);

impl SectorId {
  pub fn new() -> Self {
    Self(SECTOR_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
  }

  pub fn raw(&self) -> u64 {
    self.0
  }
}

impl Default for SectorId {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for SectorId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}
