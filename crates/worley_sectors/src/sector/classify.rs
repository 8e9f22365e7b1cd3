//! Region classification: cell partition, pathability, type and value.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{Result, SectorError};
use crate::topology::CellTopology;
use crate::types::{CellData, CellIndex, PointData, SectorType};

/// Walkable sectors whose master cell sits below this height group are lakes.
pub const LAKE_HEIGHT_GROUP_LIMIT: i32 = 2;

/// Result of classifying one discovered region.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionClassification {
  pub sector_type: SectorType,

  /// Mean value of the sector's own cells.
  pub value: f32,

  /// True if some edge of the sector can be walked across.
  pub pathable: bool,

  /// First sector cell in discovery order.
  pub master_cell: CellData,

  /// Distinct cells of grouping `G`, in discovery order.
  pub sector_cells: Vec<CellData>,

  /// Distinct foreign cells touched by the boundary ring, in discovery order.
  pub adjacent_cells: Vec<CellData>,

  /// Grouping of the start cell.
  pub grouping: f32,
}

impl RegionClassification {
  pub fn sector_cell_indices(&self) -> impl Iterator<Item = CellIndex> + '_ {
    self.sector_cells.iter().map(|c| c.index)
  }
}

/// True if any boundary point of the sector can be walked across.
///
/// A boundary point is one whose current and adjacent cells have different
/// groupings, one of which is `grouping`. It is walkable when both cells
/// have the same height or the edge between them is a slope.
pub fn sector_is_pathable<T>(points: &[PointData], grouping: f32, topology: &T) -> bool
where
  T: CellTopology + ?Sized,
{
  points.iter().filter(|p| p.is_set).any(|point| {
    let current = topology.cell_grouping(point.current_cell_index);
    let adjacent = topology.cell_grouping(point.adjacent_cell_index);
    if current == adjacent || (current != grouping && adjacent != grouping) {
      return false;
    }
    topology.cell_height(point.current_cell_index) == topology.cell_height(point.adjacent_cell_index)
      || topology.edge_is_sloped(point)
  })
}

/// Classify the points of one discovered region.
///
/// Classification is a pure function of its inputs; running it twice on the
/// same points gives the same result.
#[tracing::instrument(skip_all, name = "sector::classify_region", fields(start_cell = %start_cell_index))]
pub fn classify_region<T>(
  points: &[PointData],
  start_cell_index: CellIndex,
  topology: &T,
) -> Result<RegionClassification>
where
  T: CellTopology + ?Sized,
{
  let grouping = topology.cell_grouping(start_cell_index);

  let mut seen = HashSet::new();
  let mut sector_cells = Vec::new();
  let mut adjacent_cells = Vec::new();

  for point in points.iter().filter(|p| p.is_set) {
    let index = point.current_cell_index;
    if !seen.insert(index) {
      continue;
    }
    let cell = topology.cell_data(index);
    if topology.cell_grouping(index) == grouping {
      sector_cells.push(cell);
    } else {
      adjacent_cells.push(cell);
    }
  }

  let master_cell = *sector_cells.first().ok_or(SectorError::EmptySector {
    start_cell: start_cell_index,
  })?;

  let value = sector_cells.iter().map(|c| c.value).sum::<f32>() / sector_cells.len() as f32;
  let pathable = sector_is_pathable(points, grouping, topology);

  let sector_type = if !pathable {
    SectorType::Mountain
  } else if topology.cell_height_group(master_cell.index) < LAKE_HEIGHT_GROUP_LIMIT {
    SectorType::Lake
  } else {
    SectorType::None
  };

  debug!(
    ?sector_type,
    sector_cells = sector_cells.len(),
    adjacent_cells = adjacent_cells.len(),
    value,
    "region classified"
  );

  Ok(RegionClassification {
    sector_type,
    value,
    pathable,
    master_cell,
    sector_cells,
    adjacent_cells,
    grouping,
  })
}
