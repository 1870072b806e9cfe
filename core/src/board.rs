use alloc::collections::BTreeSet;
use core::fmt;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Grid of cells plus the set of mine-bearing coordinates.
///
/// Every non-mine cell's adjacency count always matches the mines in its
/// clamped Moore neighborhood; `place_mine` and `remove_mine` are the only
/// operations that change mine status and both keep that invariant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mines: BTreeSet<Coord2>,
}

impl Board {
    pub fn new(width: Coord, height: Coord) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidDimensions);
        }

        Ok(Self {
            cells: Array2::default((width, height).to_nd_index()),
            mines: BTreeSet::new(),
        })
    }

    pub fn size(&self) -> Coord2 {
        let (dim_x, dim_y) = self.cells.dim();
        (dim_x as Coord, dim_y as Coord)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (width, height) = self.size();
        mult(width, height)
    }

    pub fn mine_count(&self) -> CellCount {
        // bounded by `total_cells`, which fits
        self.mines.len() as CellCount
    }

    /// Mine coordinates in ascending `(x, y)` order.
    pub fn mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mines.iter().copied()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// All coordinates in column-major order, matching the storage layout.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (width, height) = self.size();
        (0..width).flat_map(move |x| (0..height).map(move |y| (x, y)))
    }

    /// Counts the mines around `coords` from scratch.
    pub fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors
        self.iter_neighbors(coords)
            .filter(|pos| self.mines.contains(pos))
            .count() as u8
    }

    /// Marks `coords` as a mine, returning `false` when it already was one.
    pub fn place_mine(&mut self, coords: Coord2) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        if !self.mines.insert(coords) {
            return Ok(false);
        }

        self.cell_mut(coords).set_mine(true);
        for pos in self.iter_neighbors(coords) {
            let neighbor = self.cell_mut(pos);
            if !neighbor.is_mine() {
                neighbor.increment_adjacent();
            }
        }
        Ok(true)
    }

    /// Exact undo of [`Board::place_mine`], returning `false` when there was no mine.
    pub fn remove_mine(&mut self, coords: Coord2) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        if !self.mines.remove(&coords) {
            return Ok(false);
        }

        let own_count = self.count_adjacent_mines(coords);
        let cell = self.cell_mut(coords);
        cell.set_mine(false);
        cell.set_adjacent_mines(own_count);

        for pos in self.iter_neighbors(coords) {
            let neighbor = self.cell_mut(pos);
            if !neighbor.is_mine() {
                neighbor.decrement_adjacent();
            }
        }
        Ok(true)
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

/// Renders the full truth of the board, one row per line: `*` for mines,
/// `.` for zero counts, digits otherwise.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.size();
        for y in 0..height {
            for x in 0..width {
                let cell = self[(x, y)];
                let c = if cell.is_mine() {
                    '*'
                } else {
                    CellView::Revealed(cell.adjacent_mines()).as_char()
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
