//! Error type for sector classification and meshing.

use glam::IVec2;
use thiserror::Error;

use crate::sector::SectorId;
use crate::types::CellIndex;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SectorError {
  /// The region holds no cell of its own grouping, so its aggregate value
  /// is undefined.
  #[error("sector starting at {start_cell} has no sector cells")]
  EmptySector { start_cell: CellIndex },

  /// Two sectors claimed the same cell. Indicates a flood fill or grouping
  /// defect.
  #[error("{cell} is owned by sector {owner} but was claimed by sector {claimant}")]
  OwnershipConflict {
    cell: CellIndex,
    owner: SectorId,
    claimant: SectorId,
  },

  /// Flood fill reached its point limit before the region closed. Happens
  /// when the grouping is too coarse for regions to stay finite.
  #[error("region starting at {start_cell} exceeded {limit} points")]
  RegionTooLarge { start_cell: CellIndex, limit: usize },

  /// Height buffer does not line up with the matrix it is meshed against.
  #[error(
    "height buffer is {actual_width} wide at {actual_root}, matrix is {expected_width} wide at {expected_root}"
  )]
  HeightBufferMismatch {
    expected_width: usize,
    expected_root: IVec2,
    actual_width: usize,
    actual_root: IVec2,
  },
}

pub type Result<T> = std::result::Result<T, SectorError>;
