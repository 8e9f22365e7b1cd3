//! Cell ownership table shared by every sector of a world.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::warn;

use super::SectorId;
use crate::error::{Result, SectorError};
use crate::types::CellIndex;

/// Maps each claimed cell to the sector that owns it.
///
/// Safe to share between threads; claims are serialised by an internal
/// mutex so a cell never ends up with two owners.
#[derive(Debug, Default)]
pub struct CellRegistry {
  owners: Mutex<HashMap<CellIndex, SectorId>>,
}

impl CellRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  fn lock(&self) -> MutexGuard<'_, HashMap<CellIndex, SectorId>> {
    // The map is never left half-written, so a poisoned lock is still usable
    self.owners.lock().unwrap_or_else(PoisonError::into_inner)
  }

  fn conflict(cell: CellIndex, owner: SectorId, claimant: SectorId) -> SectorError {
    warn!(%cell, %owner, %claimant, "cell already owned by another sector");
    SectorError::OwnershipConflict {
      cell,
      owner,
      claimant,
    }
  }

  /// Claim one cell for `sector`.
  ///
  /// Claiming a cell the sector already owns is a no-op.
  pub fn claim(&self, cell: CellIndex, sector: SectorId) -> Result<()> {
    let mut owners = self.lock();
    match owners.get(&cell) {
      Some(&owner) if owner != sector => Err(Self::conflict(cell, owner, sector)),
      Some(_) => Ok(()),
      None => {
        owners.insert(cell, sector);
        Ok(())
      }
    }
  }

  /// Claim every cell for `sector`, or none of them.
  ///
  /// All cells are checked before any is written, so a conflict leaves the
  /// registry unchanged.
  pub fn claim_all<I>(&self, cells: I, sector: SectorId) -> Result<()>
  where
    I: IntoIterator<Item = CellIndex>,
  {
    let cells: Vec<CellIndex> = cells.into_iter().collect();
    let mut owners = self.lock();

    for &cell in &cells {
      if let Some(&owner) = owners.get(&cell) {
        if owner != sector {
          return Err(Self::conflict(cell, owner, sector));
        }
      }
    }

    for cell in cells {
      owners.insert(cell, sector);
    }
    Ok(())
  }

  pub fn owner(&self, cell: CellIndex) -> Option<SectorId> {
    self.lock().get(&cell).copied()
  }

  /// Drop every claim held by `sector`, returning how many were released.
  pub fn release(&self, sector: SectorId) -> usize {
    let mut owners = self.lock();
    let before = owners.len();
    owners.retain(|_, owner| *owner != sector);
    before - owners.len()
  }

  pub fn len(&self) -> usize {
    self.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.lock().is_empty()
  }
}
