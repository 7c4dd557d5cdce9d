//! Cell occupancy bitset used while packing.

use bitvec::vec::BitVec;
use mosaic_core::GridRect;

/// Row-major bitset of occupied cells.
///
/// Grows downward on demand; cells below the last stored row are free.
#[derive(Debug, Clone)]
pub(crate) struct OccupancyMap {
    columns: u32,
    cells: BitVec,
}

impl OccupancyMap {
    pub(crate) fn new(columns: u32) -> Self {
        Self {
            columns: columns.max(1),
            cells: BitVec::new(),
        }
    }

    pub(crate) fn columns(&self) -> u32 {
        self.columns
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.columns as usize + x as usize
    }

    pub(crate) fn is_occupied(&self, x: u32, y: u32) -> bool {
        if x >= self.columns {
            return true;
        }
        self.cells
            .get(self.index(x, y))
            .map_or(false, |bit| *bit)
    }

    /// A rectangle is free when it fits inside the columns and covers no
    /// occupied cell.
    pub(crate) fn is_free(&self, rect: &GridRect) -> bool {
        if rect.w == 0 || rect.right() > self.columns {
            return false;
        }
        (rect.y..rect.bottom()).all(|y| (rect.x..rect.right()).all(|x| !self.is_occupied(x, y)))
    }

    pub(crate) fn occupy(&mut self, rect: &GridRect) {
        let needed = rect.bottom() as usize * self.columns as usize;
        if self.cells.len() < needed {
            self.cells.resize(needed, false);
        }
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right().min(self.columns) {
                let idx = self.index(x, y);
                self.cells.set(idx, true);
            }
        }
    }

    pub(crate) fn release(&mut self, rect: &GridRect) {
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right().min(self.columns) {
                let idx = self.index(x, y);
                if idx < self.cells.len() {
                    self.cells.set(idx, false);
                }
            }
        }
    }
}
