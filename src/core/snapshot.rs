//! Observation snapshot of a board
//!
//! Serializable read-only view for observers, recorders, and tests. The
//! engine writes into a caller-owned snapshot (`snapshot_into`) so frame
//! drivers can reuse one allocation.

use serde::{Deserialize, Serialize};

use crate::types::{Category, ResolutionState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub width: i32,
    pub height: i32,
    /// Row-major cell categories, index `y * width + x`; `None` = empty.
    pub cells: Vec<Option<Category>>,
    pub state: ResolutionState,
    pub input_enabled: bool,
    pub piece_count: usize,
    /// Current RNG state, sufficient to replay fills from this point.
    pub seed: u32,
}

impl BoardSnapshot {
    /// Category at `(x, y)`; `None` for empty or out-of-bounds cells.
    pub fn cell(&self, x: i32, y: i32) -> Option<Category> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            return None;
        }
        self.cells[(y * self.width + x) as usize]
    }

    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.cells.clear();
        self.state = ResolutionState::Idle;
        self.input_enabled = true;
        self.piece_count = 0;
        self.seed = 0;
    }

    pub fn is_stable(&self) -> bool {
        self.state == ResolutionState::Idle
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            state: ResolutionState::Idle,
            input_enabled: true,
            piece_count: 0,
            seed: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_indexing() {
        let mut snap = BoardSnapshot::default();
        snap.width = 3;
        snap.height = 2;
        snap.cells = vec![None; 6];
        snap.cells[1 * 3 + 2] = Some(Category::Red);

        assert_eq!(snap.cell(2, 1), Some(Category::Red));
        assert_eq!(snap.cell(0, 0), None);
        assert_eq!(snap.cell(3, 0), None);
        assert_eq!(snap.cell(-1, 0), None);
    }

    #[test]
    fn test_clear_resets() {
        let mut snap = BoardSnapshot::default();
        snap.width = 2;
        snap.height = 2;
        snap.cells = vec![Some(Category::Blue); 4];
        snap.state = ResolutionState::Resolving;
        snap.input_enabled = false;
        snap.piece_count = 4;
        snap.seed = 99;

        snap.clear();
        assert_eq!(snap, BoardSnapshot::default());
    }
}
