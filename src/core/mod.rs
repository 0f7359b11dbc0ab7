//! Core module - pure board state and match logic
//!
//! Storage, piece identity, deterministic randomness, and the match
//! scanner. No timing, no presentation, no I/O; those live in `engine`.

pub mod grid;
pub mod matches;
pub mod piece;
pub mod rng;
pub mod snapshot;

// Re-export commonly used types
pub use grid::Grid;
pub use matches::{MatchScanner, MatchSet};
pub use piece::{Piece, PieceId, PieceStore};
pub use rng::SimpleRng;
pub use snapshot::BoardSnapshot;
