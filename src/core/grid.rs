//! Grid module - bounded 2D piece storage
//!
//! Row-major `Vec` of optional piece ids. Coordinates: `(x, y)` with
//! `0 <= x < width` left to right and `0 <= y < height` bottom to top.
//! Out-of-bounds queries return a defined out-of-bounds result, never a
//! panic.

use tracing::warn;

use crate::core::piece::{Piece, PieceId};
use crate::types::Coord;

/// The board's cell storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Option<PieceId>>,
}

impl Grid {
    /// Create an empty grid. Dimensions are validated by `BoardConfig`
    /// before any grid is built.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            cells: vec![None; (width as usize) * (height as usize)],
        }
    }

    /// Flat index from `(x, y)`; `None` out of bounds.
    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Occupant of `(x, y)`.
    ///
    /// `None` when out of bounds, `Some(None)` for an empty cell,
    /// `Some(Some(id))` for an occupied one.
    pub fn at(&self, x: i32, y: i32) -> Option<Option<PieceId>> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// In bounds and vacant.
    pub fn is_empty_cell(&self, x: i32, y: i32) -> bool {
        matches!(self.at(x, y), Some(None))
    }

    /// In bounds and occupied.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.at(x, y), Some(Some(_)))
    }

    /// Place a piece at `(x, y)`.
    ///
    /// The piece's coordinate is updated unconditionally; the cell binding
    /// only happens in bounds. An out-of-bounds placement is a deliberate
    /// allowance (pieces entering from above the visible board), logged so
    /// unexpected callers show up in traces.
    pub fn place(&mut self, piece: &mut Piece, x: i32, y: i32) {
        piece.set_coord(Coord::new(x, y));
        match self.index(x, y) {
            Some(idx) => self.cells[idx] = Some(piece.id()),
            None => {
                warn!(
                    x,
                    y,
                    piece = piece.id().0,
                    "placement outside the grid; coordinate updated without a cell binding"
                );
            }
        }
    }

    /// Remove and return the occupant of `(x, y)`, if any.
    pub fn clear(&mut self, x: i32, y: i32) -> Option<PieceId> {
        self.index(x, y).and_then(|idx| self.cells[idx].take())
    }

    /// Coordinates of every occupied cell, bottom-to-top within each column,
    /// columns left to right.
    pub fn occupied_cells(&self) -> Vec<Coord> {
        let mut out = Vec::new();
        for x in 0..self.width {
            for y in 0..self.height {
                if self.is_occupied(x, y) {
                    out.push(Coord::new(x, y));
                }
            }
        }
        out
    }

    /// Number of empty in-bounds cells.
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::piece::PieceStore;
    use crate::types::Category;

    fn store_with_piece(x: i32, y: i32) -> (PieceStore, PieceId) {
        let mut store = PieceStore::new();
        let id = store.create(Category::Red, Coord::new(x, y));
        (store, id)
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(8, 8);
        assert_eq!(grid.width(), 8);
        assert_eq!(grid.height(), 8);
        assert_eq!(grid.empty_count(), 64);

        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(grid.at(x, y), Some(None));
            }
        }
    }

    #[test]
    fn test_at_out_of_bounds() {
        let grid = Grid::new(8, 8);
        assert_eq!(grid.at(-1, 0), None);
        assert_eq!(grid.at(0, -1), None);
        assert_eq!(grid.at(8, 0), None);
        assert_eq!(grid.at(0, 8), None);
    }

    #[test]
    fn test_place_binds_cell_and_coord() {
        let mut grid = Grid::new(8, 8);
        let (mut store, id) = store_with_piece(0, 0);

        grid.place(store.get_mut(id).unwrap(), 3, 5);

        assert_eq!(grid.at(3, 5), Some(Some(id)));
        assert_eq!(store.get(id).unwrap().coord(), Coord::new(3, 5));
    }

    #[test]
    fn test_place_out_of_bounds_updates_coord_only() {
        let mut grid = Grid::new(8, 8);
        let (mut store, id) = store_with_piece(0, 0);

        // Entry-from-above allowance: coordinate moves, no binding.
        grid.place(store.get_mut(id).unwrap(), 3, 12);

        assert_eq!(store.get(id).unwrap().coord(), Coord::new(3, 12));
        assert_eq!(grid.empty_count(), 64);
    }

    #[test]
    fn test_clear_returns_occupant() {
        let mut grid = Grid::new(8, 8);
        let (mut store, id) = store_with_piece(0, 0);
        grid.place(store.get_mut(id).unwrap(), 2, 2);

        assert_eq!(grid.clear(2, 2), Some(id));
        assert_eq!(grid.at(2, 2), Some(None));

        // Clearing an empty or out-of-bounds cell yields nothing.
        assert_eq!(grid.clear(2, 2), None);
        assert_eq!(grid.clear(-1, 0), None);
    }

    #[test]
    fn test_occupied_cells_order() {
        let mut grid = Grid::new(4, 4);
        let mut store = PieceStore::new();
        for (x, y) in [(2, 1), (0, 3), (2, 0)] {
            let id = store.create(Category::Blue, Coord::new(x, y));
            grid.place(store.get_mut(id).unwrap(), x, y);
        }

        assert_eq!(
            grid.occupied_cells(),
            vec![Coord::new(0, 3), Coord::new(2, 0), Coord::new(2, 1)]
        );
    }
}
