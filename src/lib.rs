//! match-grid: a tile-matching cascade engine.
//!
//! A rectangular grid of categorized pieces, manipulated by swapping two
//! adjacent pieces and resolved through clear/collapse/refill cascades
//! until the board is stable. Pure state + algorithm: rendering, input
//! devices, and tweening live behind the [`Presenter`] trait, and time
//! only enters through [`Board::tick`].
//!
//! ```
//! use match_grid::{Board, BoardConfig, Coord, NullPresenter, TICK_MS};
//!
//! let mut presenter = NullPresenter;
//! let mut board = Board::new(BoardConfig::default(), 12345).unwrap();
//! board.start(&mut presenter);
//!
//! board.begin_select(Coord::new(3, 3));
//! board.drag_over(Coord::new(3, 4));
//! board.release(&mut presenter);
//! while !board.is_stable() {
//!     board.tick(TICK_MS, &mut presenter);
//! }
//! ```

pub mod config;
pub mod core;
pub mod engine;
pub mod types;

pub use crate::config::{BoardConfig, ConfigError};
pub use crate::core::{
    BoardSnapshot, Grid, MatchScanner, MatchSet, Piece, PieceId, PieceStore, SimpleRng,
};
pub use crate::engine::{Board, NullPresenter, Presenter};
pub use crate::types::{Category, Coord, Direction, ResolutionState, TICK_MS};
