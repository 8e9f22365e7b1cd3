//! Dense, growable 2D store addressed by world position.
//!
//! The matrix covers the square `[root, root + width)` on both axes. Writes
//! outside that square grow the matrix and move the root so every stored
//! item keeps its world position. Reads outside it report "unset" instead
//! of failing, which is what lets the flood fill stop cleanly at the edge of
//! what it has discovered.
//!
//! ```text
//!   before growth                 after add_item(p)
//!   root ┌──────┐                 root' ┌─────────────┐
//!        │ ■■   │                       │             │
//!        │ ■■■  │          ──►          │    ■■       │
//!        └──────┘  p                    │    ■■■    p │
//!                                       └─────────────┘
//! ```

use glam::IVec2;
use tracing::debug;

use crate::constants::{flatten, unflatten};

/// Square matrix of `T` anchored at a world-space root.
#[derive(Clone, Debug)]
pub struct SpatialMatrix<T> {
  items: Vec<T>,
  set: Vec<bool>,
  width: usize,
  root_position: IVec2,
}

impl<T: Clone + Default> SpatialMatrix<T> {
  /// Allocate an empty `width × width` matrix anchored at `root_position`.
  pub fn new(width: usize, root_position: IVec2) -> Self {
    let width = width.max(1);
    Self {
      items: vec![T::default(); width * width],
      set: vec![false; width * width],
      width,
      root_position,
    }
  }

  pub fn width(&self) -> usize {
    self.width
  }

  pub fn root_position(&self) -> IVec2 {
    self.root_position
  }

  /// Total number of slots (`width²`).
  pub fn capacity(&self) -> usize {
    self.items.len()
  }

  /// Number of slots holding an item.
  pub fn set_count(&self) -> usize {
    self.set.iter().filter(|&&s| s).count()
  }

  /// Grid coordinate of a world position (may be out of range).
  #[inline]
  pub fn world_to_grid(&self, world: IVec2) -> IVec2 {
    IVec2::new(
      world.x.wrapping_sub(self.root_position.x),
      world.y.wrapping_sub(self.root_position.y),
    )
  }

  #[inline]
  pub fn grid_to_world(&self, grid: IVec2) -> IVec2 {
    IVec2::new(
      grid.x.wrapping_add(self.root_position.x),
      grid.y.wrapping_add(self.root_position.y),
    )
  }

  #[inline]
  fn slot(&self, world: IVec2) -> Option<usize> {
    flatten(self.world_to_grid(world), self.width)
  }

  /// True if `world` is inside the matrix and holds an item.
  pub fn item_is_set(&self, world: IVec2) -> bool {
    self.slot(world).is_some_and(|idx| self.set[idx])
  }

  /// True if the grid coordinate is inside the matrix and holds an item.
  pub fn item_is_set_at(&self, grid: IVec2) -> bool {
    flatten(grid, self.width).is_some_and(|idx| self.set[idx])
  }

  /// Store `data` at `world`, growing the matrix first if needed.
  pub fn add_item(&mut self, data: T, world: IVec2) {
    let idx = match self.slot(world) {
      Some(idx) => idx,
      None => {
        self.grow_to_include(world);
        match self.slot(world) {
          Some(idx) => idx,
          // Growth always covers `world`; nothing sensible to store otherwise
          None => return,
        }
      }
    };
    self.items[idx] = data;
    self.set[idx] = true;
  }

  /// Item at `world`, or `None` when out of range or unset.
  pub fn get(&self, world: IVec2) -> Option<&T> {
    self
      .slot(world)
      .filter(|&idx| self.set[idx])
      .map(|idx| &self.items[idx])
  }

  /// Item at a grid coordinate, or `None` when out of range or unset.
  pub fn get_at(&self, grid: IVec2) -> Option<&T> {
    flatten(grid, self.width)
      .filter(|&idx| self.set[idx])
      .map(|idx| &self.items[idx])
  }

  /// Item at `world`, or `T::default()` as the unset sentinel.
  pub fn get_item(&self, world: IVec2) -> T {
    self.get(world).cloned().unwrap_or_default()
  }

  /// Item at a grid coordinate, or `T::default()` as the unset sentinel.
  pub fn get_item_at(&self, grid: IVec2) -> T {
    self.get_at(grid).cloned().unwrap_or_default()
  }

  /// Iterate over set items with their world positions, in slot order.
  pub fn iter_set(&self) -> impl Iterator<Item = (IVec2, &T)> + '_ {
    self
      .items
      .iter()
      .zip(&self.set)
      .enumerate()
      .filter(|(_, (_, &set))| set)
      .map(move |(idx, (item, _))| (self.grid_to_world(unflatten(idx, self.width)), item))
  }

  /// Raw slot buffer (unset slots hold `T::default()`), for host persistence.
  pub fn as_slice(&self) -> &[T] {
    &self.items
  }

  /// Per-slot set flags, parallel to [`as_slice`](Self::as_slice).
  pub fn set_flags(&self) -> &[bool] {
    &self.set
  }

  /// Build a parallel matrix with the same root, width and set slots.
  pub fn map<U: Clone + Default>(&self, mut f: impl FnMut(&T) -> U) -> SpatialMatrix<U> {
    let items = self
      .items
      .iter()
      .zip(&self.set)
      .map(|(item, &set)| if set { f(item) } else { U::default() })
      .collect();
    SpatialMatrix {
      items,
      set: self.set.clone(),
      width: self.width,
      root_position: self.root_position,
    }
  }

  /// Reallocate so that `world` falls inside the matrix.
  ///
  /// The new square spans the old one plus `world`, at least doubled in
  /// width, with the slack split evenly on each axis. Items are copied to
  /// their new slots; world positions are unchanged.
  fn grow_to_include(&mut self, world: IVec2) {
    let old_min = self.root_position.as_i64vec2();
    let old_max = old_min + glam::I64Vec2::splat(self.width as i64 - 1);
    let p = world.as_i64vec2();

    let min = old_min.min(p);
    let max = old_max.max(p);
    let span = max - min + glam::I64Vec2::ONE;

    let new_width = (span.max_element() as usize).max(self.width * 2);
    let slack = glam::I64Vec2::splat(new_width as i64) - span;
    let new_root = min - slack / 2;
    let new_root = IVec2::new(
      new_root.x.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
      new_root.y.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
    );

    let mut grown = SpatialMatrix::new(new_width, new_root);
    for idx in 0..self.items.len() {
      if !self.set[idx] {
        continue;
      }
      let world = self.grid_to_world(unflatten(idx, self.width));
      if let Some(new_idx) = grown.slot(world) {
        grown.items[new_idx] = self.items[idx].clone();
        grown.set[new_idx] = true;
      }
    }

    debug!(
      old_width = self.width,
      new_width,
      root_x = new_root.x,
      root_z = new_root.y,
      "spatial matrix grew"
    );

    *self = grown;
  }
}

#[cfg(test)]
#[path = "matrix_test.rs"]
mod matrix_test;
