//! Presentation collaborator boundary
//!
//! The engine owns all board state; the collaborator owns everything
//! visual. State mutations are committed synchronously and then narrated
//! through this trait, so the collaborator is always playing back an
//! already-decided change. Every method has a no-op default: a frontend
//! implements only what it draws, and tests implement only what they
//! assert on.

use crate::core::piece::PieceId;
use crate::types::Category;

/// Callbacks from the engine to the presentation layer.
#[allow(unused_variables)]
pub trait Presenter {
    /// A piece came into existence. `(x, y)` is the visual entry position,
    /// which sits above the top row for refilled pieces; the logical cell
    /// is wherever the following `cell_changed`/`animate_move` point.
    fn piece_created(&mut self, id: PieceId, category: Category, x: i32, y: i32) {}

    /// A piece was cleared and its handle is now dead.
    fn piece_destroyed(&mut self, id: PieceId) {}

    /// Animate a piece's visual position to `(x, y)` over `duration_ms`.
    /// The logical move has already happened.
    fn animate_move(&mut self, id: PieceId, x: i32, y: i32, duration_ms: u32) {}

    /// Tint the tile under a matched piece with its category color.
    fn highlight(&mut self, x: i32, y: i32, category: Category) {}

    fn unhighlight(&mut self, x: i32, y: i32) {}

    /// Cell occupancy changed: `Some(id)` bound, `None` vacated.
    fn cell_changed(&mut self, x: i32, y: i32, occupant: Option<PieceId>) {}

    /// Swap input opens/closes with cascade exit/entry.
    fn input_enabled_changed(&mut self, enabled: bool) {}

    /// Settle condition: true once every animated piece's visual position
    /// has reached its logical coordinate. The engine holds collapse,
    /// refill, and swap phases until the timer elapses AND this reports
    /// settled. The default never holds a phase.
    fn animations_settled(&self) -> bool {
        true
    }
}

/// Presenter that draws nothing and never holds a phase. The headless
/// default for drivers and benchmarks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}
