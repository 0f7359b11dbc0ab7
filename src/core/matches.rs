//! Match scanning
//!
//! Directional run-length scans and their unions. A horizontal or vertical
//! run qualifies when it reaches the configured minimum length (default 3).
//! Each one-sided scan runs with a minimum of 2 ("at least one neighbor
//! matches") and the per-axis union is held to the real threshold, so the
//! middle piece of a 3-run is found even though neither one-sided scan
//! alone reaches 3.
//!
//! Match sets are transient: produced, consumed by the cascade, never
//! persisted.

use crate::core::grid::Grid;
use crate::core::piece::{PieceId, PieceStore};
use crate::types::{Coord, Direction};

/// An order-irrelevant set of matched pieces.
///
/// Backed by a small vector with insertion dedup; iteration order is a
/// side effect of scan order and must never be observable to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    ids: Vec<PieceId>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an id; returns false if it was already present.
    pub fn insert(&mut self, id: PieceId) -> bool {
        if self.ids.contains(&id) {
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    /// Set union, consuming both operands.
    pub fn union(mut self, other: MatchSet) -> MatchSet {
        for id in other.ids {
            self.insert(id);
        }
        self
    }

    pub fn contains(&self, id: PieceId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.ids.iter().copied()
    }

    /// Current coordinates of the member pieces.
    pub fn coords(&self, pieces: &PieceStore) -> Vec<Coord> {
        self.ids
            .iter()
            .filter_map(|id| pieces.get(*id).map(|p| p.coord()))
            .collect()
    }
}

/// Borrowing view that runs match queries against a grid + piece store.
///
/// Cheap to construct; build one per query site rather than holding it
/// across mutations.
pub struct MatchScanner<'a> {
    grid: &'a Grid,
    pieces: &'a PieceStore,
    min_match_length: usize,
}

impl<'a> MatchScanner<'a> {
    pub fn new(grid: &'a Grid, pieces: &'a PieceStore, min_match_length: usize) -> Self {
        Self {
            grid,
            pieces,
            min_match_length,
        }
    }

    /// Walk one direction from `start`, accumulating pieces that share the
    /// start piece's category. Stops at the first empty cell, out-of-bounds
    /// cell, or category mismatch.
    ///
    /// Returns `None` when the start cell holds no piece or the run is
    /// shorter than `min_length`. A returned run always contains the start
    /// piece.
    pub fn scan_direction(
        &self,
        start: Coord,
        dir: Direction,
        min_length: usize,
    ) -> Option<MatchSet> {
        let start_id = self.grid.at(start.x, start.y)??;
        let start_category = self.pieces.get(start_id)?.category();

        let mut run = MatchSet::new();
        run.insert(start_id);

        let mut cursor = start.step(dir);
        while let Some(Some(id)) = self.grid.at(cursor.x, cursor.y) {
            let Some(piece) = self.pieces.get(id) else {
                break;
            };
            if piece.category() != start_category {
                break;
            }
            run.insert(id);
            cursor = cursor.step(dir);
        }

        if run.len() >= min_length {
            Some(run)
        } else {
            None
        }
    }

    /// Union of the two one-sided scans along one axis, qualified against
    /// the configured minimum. The start piece is counted once.
    fn axis_matches(&self, at: Coord, back: Direction, forward: Direction) -> Option<MatchSet> {
        let mut combined = MatchSet::new();
        if let Some(run) = self.scan_direction(at, back, 2) {
            combined = combined.union(run);
        }
        if let Some(run) = self.scan_direction(at, forward, 2) {
            combined = combined.union(run);
        }

        if combined.len() >= self.min_match_length {
            Some(combined)
        } else {
            None
        }
    }

    /// All qualifying matches through one cell: the union of its horizontal
    /// and vertical runs. Empty when the cell is empty or participates in
    /// no qualifying run.
    pub fn matches_through(&self, x: i32, y: i32) -> MatchSet {
        let at = Coord::new(x, y);
        let mut out = MatchSet::new();
        if let Some(horizontal) = self.axis_matches(at, Direction::Left, Direction::Right) {
            out = out.union(horizontal);
        }
        if let Some(vertical) = self.axis_matches(at, Direction::Down, Direction::Up) {
            out = out.union(vertical);
        }
        out
    }

    /// Union of `matches_through` over a set of seed coordinates. Used after
    /// a collapse to check only the cells that changed; the full-board scan
    /// is reserved for cascade termination.
    pub fn matches_for_any(&self, seeds: &[Coord]) -> MatchSet {
        let mut out = MatchSet::new();
        for seed in seeds {
            out = out.union(self.matches_through(seed.x, seed.y));
        }
        out
    }

    /// Every qualifying match on the board.
    pub fn all_matches(&self) -> MatchSet {
        let mut out = MatchSet::new();
        for x in 0..self.grid.width() {
            for y in 0..self.grid.height() {
                out = out.union(self.matches_through(x, y));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::SimpleRng;
    use crate::types::Category;

    /// Build a grid + store from rows given top-to-bottom, so the literal
    /// reads like the board. '.' is empty; letters map per Category tags.
    fn board_from_rows(rows: &[&str]) -> (Grid, PieceStore) {
        let height = rows.len() as i32;
        let width = rows[0].len() as i32;
        let mut grid = Grid::new(width, height);
        let mut store = PieceStore::new();

        for (row_idx, row) in rows.iter().enumerate() {
            let y = height - 1 - row_idx as i32;
            for (col_idx, c) in row.chars().enumerate() {
                if let Some(category) = Category::from_char(c) {
                    let x = col_idx as i32;
                    let id = store.create(category, Coord::new(x, y));
                    grid.place(store.get_mut(id).unwrap(), x, y);
                }
            }
        }
        (grid, store)
    }

    fn coords_of(set: &MatchSet, store: &PieceStore) -> Vec<Coord> {
        let mut coords = set.coords(store);
        coords.sort();
        coords
    }

    #[test]
    fn test_scan_direction_basic_run() {
        let (grid, store) = board_from_rows(&["RRRB"]);
        let scanner = MatchScanner::new(&grid, &store, 3);

        let run = scanner
            .scan_direction(Coord::new(0, 0), Direction::Right, 3)
            .unwrap();
        assert_eq!(run.len(), 3);
        assert_eq!(
            coords_of(&run, &store),
            vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)]
        );
    }

    #[test]
    fn test_scan_direction_stops_at_gap() {
        let (grid, store) = board_from_rows(&["RR.RR"]);
        let scanner = MatchScanner::new(&grid, &store, 3);

        // The gap at x=2 ends the run before it can qualify.
        assert!(scanner
            .scan_direction(Coord::new(0, 0), Direction::Right, 3)
            .is_none());
    }

    #[test]
    fn test_scan_direction_empty_start() {
        let (grid, store) = board_from_rows(&[".RRR"]);
        let scanner = MatchScanner::new(&grid, &store, 3);

        assert!(scanner
            .scan_direction(Coord::new(0, 0), Direction::Right, 2)
            .is_none());
        // Out-of-bounds start behaves the same as an empty one.
        assert!(scanner
            .scan_direction(Coord::new(-1, 0), Direction::Right, 2)
            .is_none());
    }

    #[test]
    fn test_scan_direction_short_run_includes_start() {
        let (grid, store) = board_from_rows(&["RRB"]);
        let scanner = MatchScanner::new(&grid, &store, 3);

        // Length 2 run qualifies at min 2 and contains the start piece.
        let run = scanner
            .scan_direction(Coord::new(0, 0), Direction::Right, 2)
            .unwrap();
        let start_id = grid.at(0, 0).flatten().unwrap();
        assert!(run.contains(start_id));
        assert_eq!(run.len(), 2);

        // Same run fails the higher threshold.
        assert!(scanner
            .scan_direction(Coord::new(0, 0), Direction::Right, 3)
            .is_none());
    }

    #[test]
    fn test_matches_through_middle_piece() {
        // Neither one-sided scan from the middle reaches 3, but the union
        // does: the essential two-stage threshold.
        let (grid, store) = board_from_rows(&["RRR"]);
        let scanner = MatchScanner::new(&grid, &store, 3);

        let matches = scanner.matches_through(1, 0);
        assert_eq!(
            coords_of(&matches, &store),
            vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)]
        );
    }

    #[test]
    fn test_matches_through_no_match() {
        let (grid, store) = board_from_rows(&["RGB", "GBR", "BRG"]);
        let scanner = MatchScanner::new(&grid, &store, 3);

        for x in 0..3 {
            for y in 0..3 {
                assert!(scanner.matches_through(x, y).is_empty());
            }
        }
    }

    #[test]
    fn test_matches_through_empty_cell() {
        let (grid, store) = board_from_rows(&["R.R"]);
        let scanner = MatchScanner::new(&grid, &store, 3);
        assert!(scanner.matches_through(1, 0).is_empty());
    }

    #[test]
    fn test_matches_through_l_shape() {
        // (2,2) has two matching neighbors leftward and two downward; the
        // horizontal and vertical 3-runs register together, five cells total.
        let (grid, store) = board_from_rows(&[
            "RRRB", // y=2
            "BGRB", // y=1
            "GBRG", // y=0
        ]);
        let scanner = MatchScanner::new(&grid, &store, 3);

        let matches = scanner.matches_through(2, 2);
        assert_eq!(matches.len(), 5);
        assert_eq!(
            coords_of(&matches, &store),
            vec![
                Coord::new(0, 2),
                Coord::new(1, 2),
                Coord::new(2, 0),
                Coord::new(2, 1),
                Coord::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_scan_order_not_observable() {
        // The same run queried from any of its members yields the same set.
        let (grid, store) = board_from_rows(&["RRRR"]);
        let scanner = MatchScanner::new(&grid, &store, 3);

        let from_edge = coords_of(&scanner.matches_through(0, 0), &store);
        let from_middle = coords_of(&scanner.matches_through(2, 0), &store);
        assert_eq!(from_edge, from_middle);
        assert_eq!(from_edge.len(), 4);
    }

    #[test]
    fn test_matches_for_any_matches_full_scan() {
        let (grid, store) = board_from_rows(&[
            "RGBG", //
            "RGGB", //
            "RBGB", //
        ]);
        let scanner = MatchScanner::new(&grid, &store, 3);

        let all = scanner.all_matches();
        let seeded = scanner.matches_for_any(&grid.occupied_cells());
        assert_eq!(coords_of(&all, &store), coords_of(&seeded, &store));
        // The R column at x=0 is the only match.
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_match_homogeneity_on_random_boards() {
        // matches_through never includes a piece of a different category
        // than the seed cell's piece.
        let mut rng = SimpleRng::new(2024);
        for _ in 0..20 {
            let mut grid = Grid::new(6, 6);
            let mut store = PieceStore::new();
            for x in 0..6 {
                for y in 0..6 {
                    let cat = rng.pick_category(&Category::ALL[..3]);
                    let id = store.create(cat, Coord::new(x, y));
                    grid.place(store.get_mut(id).unwrap(), x, y);
                }
            }
            let scanner = MatchScanner::new(&grid, &store, 3);
            for x in 0..6 {
                for y in 0..6 {
                    let seed_cat = store
                        .get(grid.at(x, y).flatten().unwrap())
                        .unwrap()
                        .category();
                    for id in scanner.matches_through(x, y).iter() {
                        assert_eq!(store.get(id).unwrap().category(), seed_cat);
                    }
                }
            }
        }
    }

    #[test]
    fn test_run_contiguity() {
        // A directional run is contiguous and monotonic along its axis.
        let (grid, store) = board_from_rows(&["BRRRRB"]);
        let scanner = MatchScanner::new(&grid, &store, 3);

        let run = scanner
            .scan_direction(Coord::new(1, 0), Direction::Right, 3)
            .unwrap();
        let xs: Vec<i32> = {
            let mut coords = coords_of(&run, &store);
            coords.sort();
            coords.iter().map(|c| c.x).collect()
        };
        assert_eq!(xs, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_match_set_union_dedups() {
        let mut a = MatchSet::new();
        let mut b = MatchSet::new();
        a.insert(PieceId(1));
        a.insert(PieceId(2));
        b.insert(PieceId(2));
        b.insert(PieceId(3));

        let union = a.union(b);
        assert_eq!(union.len(), 3);
        for id in [1, 2, 3] {
            assert!(union.contains(PieceId(id)));
        }
    }
}
