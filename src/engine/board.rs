//! Board controller - swap resolution and the cascade engine
//!
//! Ties together grid, pieces, RNG, and the match scanner, and drives the
//! clear/collapse/refill cascade as a tick-stepped phase machine. Animation
//! waits from the presentation layer become countdown phases: every board
//! mutation is committed synchronously at phase entry, and the following
//! wait only paces the cosmetic playback. Two overlapping resolutions are
//! therefore structurally impossible.

use tracing::{debug, warn};

use crate::config::{BoardConfig, ConfigError};
use crate::core::grid::Grid;
use crate::core::matches::{MatchScanner, MatchSet};
use crate::core::piece::{PieceId, PieceStore};
use crate::core::rng::SimpleRng;
use crate::core::snapshot::BoardSnapshot;
use crate::engine::presenter::Presenter;
use crate::types::{Category, Coord, ResolutionState};

/// Resolution phases. `Idle` accepts swap input; everything else is a wait
/// for the presentation layer to play back an already-committed change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    /// Both pieces exchanged logically, animating toward their new cells.
    SwapForward { a: Coord, b: Coord },
    /// Failed swap animating back; coordinates already restored.
    SwapRevert,
    /// Matched pieces tinted before clearing.
    Highlight,
    /// Matched pieces removed, short visual pause.
    Clear,
    /// Columns compacted, pieces falling.
    Collapse,
    /// Empty cells repopulated, new pieces falling in.
    Refill,
    /// Between-round pause; the next round's match set is already known.
    CascadePause,
}

/// The board controller.
///
/// Owns the grid and every live piece. All mutation funnels through the
/// gesture verbs (`begin_select` / `drag_over` / `release`) and
/// `tick`; the presentation collaborator is narrated to through the
/// [`Presenter`] passed into each call.
#[derive(Debug)]
pub struct Board {
    config: BoardConfig,
    grid: Grid,
    pieces: PieceStore,
    rng: SimpleRng,

    // Swap selection
    origin: Option<Coord>,
    target: Option<Coord>,

    // Resolution state machine
    phase: Phase,
    phase_timer_ms: u32,
    pending: MatchSet,
    touched_columns: Vec<i32>,
    moved: Vec<Coord>,
    input_enabled: bool,
    cascade_rounds: u32,
}

impl Board {
    /// Create an empty board with the given config and RNG seed.
    pub fn new(config: BoardConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height);
        Ok(Self {
            config,
            grid,
            pieces: PieceStore::new(),
            rng: SimpleRng::new(seed),
            origin: None,
            target: None,
            phase: Phase::Idle,
            phase_timer_ms: 0,
            pending: MatchSet::new(),
            touched_columns: Vec::new(),
            moved: Vec::new(),
            input_enabled: true,
            cascade_rounds: 0,
        })
    }

    /// Create a board from an ASCII layout, for scripted drivers and tests.
    ///
    /// Rows are given top to bottom so the literal reads like the board;
    /// `.` is an empty cell, letters map per [`Category::from_char`].
    pub fn with_layout(
        config: BoardConfig,
        seed: u32,
        rows: &[&str],
    ) -> Result<Self, ConfigError> {
        let mut board = Self::new(config, seed)?;

        if rows.len() != board.config.height as usize {
            return Err(ConfigError::LayoutHeight {
                got: rows.len(),
                expected: board.config.height as usize,
            });
        }
        for (row_idx, row) in rows.iter().enumerate() {
            if row.chars().count() != board.config.width as usize {
                return Err(ConfigError::LayoutWidth {
                    row: row_idx,
                    got: row.chars().count(),
                    expected: board.config.width as usize,
                });
            }
            let y = board.config.height - 1 - row_idx as i32;
            for (col_idx, c) in row.chars().enumerate() {
                if c == '.' {
                    continue;
                }
                let category = Category::from_char(c).ok_or(ConfigError::LayoutTag(c))?;
                let x = col_idx as i32;
                let id = board.pieces.create(category, Coord::new(x, y));
                if let Some(piece) = board.pieces.get_mut(id) {
                    board.grid.place(piece, x, y);
                }
            }
        }
        Ok(board)
    }

    /// Initial animated population: every empty cell is dealt a match-safe
    /// piece entering from above the board. The board stays `Idle`; the
    /// initial fill never seeds a cascade.
    pub fn start<P: Presenter>(&mut self, presenter: &mut P) {
        self.fill_empty_avoiding_matches(presenter);
    }

    // ---- accessors -------------------------------------------------------

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pieces(&self) -> &PieceStore {
        &self.pieces
    }

    /// Piece occupying `(x, y)`, if any.
    pub fn piece_at(&self, x: i32, y: i32) -> Option<PieceId> {
        self.grid.at(x, y).flatten()
    }

    /// Category of the piece at `(x, y)`, if any.
    pub fn category_at(&self, x: i32, y: i32) -> Option<Category> {
        self.piece_at(x, y)
            .and_then(|id| self.pieces.get(id))
            .map(|p| p.category())
    }

    /// `Resolving` while a cascade is in flight. Swap animations are not a
    /// cascade: a swap that commits enters `Resolving` only at commit.
    pub fn resolution_state(&self) -> ResolutionState {
        match self.phase {
            Phase::Idle | Phase::SwapForward { .. } | Phase::SwapRevert => ResolutionState::Idle,
            _ => ResolutionState::Resolving,
        }
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// No phase in flight: the board is settled and accepting input.
    pub fn is_stable(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Rounds of the most recent resolution (1 for a plain match, more for
    /// chained cascades).
    pub fn cascade_rounds(&self) -> u32 {
        self.cascade_rounds
    }

    /// Matches through one cell, at the configured minimum length.
    pub fn matches_through(&self, x: i32, y: i32) -> MatchSet {
        self.scanner().matches_through(x, y)
    }

    /// Every qualifying match on the board.
    pub fn all_matches(&self) -> MatchSet {
        self.scanner().all_matches()
    }

    fn scanner(&self) -> MatchScanner<'_> {
        MatchScanner::new(&self.grid, &self.pieces, self.config.min_match_length)
    }

    fn accepting_input(&self) -> bool {
        self.input_enabled && self.phase == Phase::Idle
    }

    // ---- gesture verbs ---------------------------------------------------

    /// Record the swap origin. No-op while one is pending or the board is
    /// mid-resolution.
    pub fn begin_select(&mut self, cell: Coord) {
        if !self.accepting_input() {
            return;
        }
        if self.origin.is_none() {
            self.origin = Some(cell);
        }
    }

    /// Record the swap target; ignored unless 4-adjacent to the pending
    /// origin.
    pub fn drag_over(&mut self, cell: Coord) {
        if !self.accepting_input() {
            return;
        }
        if let Some(origin) = self.origin {
            if origin.is_adjacent(cell) {
                self.target = Some(cell);
            }
        }
    }

    /// Attempt the recorded swap. Selection resets regardless of outcome.
    ///
    /// Returns true when a swap was started. A selection referencing an
    /// empty cell starts nothing: there is no piece to move, so the release
    /// is dropped.
    pub fn release<P: Presenter>(&mut self, presenter: &mut P) -> bool {
        if !self.accepting_input() {
            return false;
        }
        let origin = self.origin.take();
        let target = self.target.take();
        let (Some(a), Some(b)) = (origin, target) else {
            return false;
        };
        if !self.grid.is_occupied(a.x, a.y) || !self.grid.is_occupied(b.x, b.y) {
            return false;
        }

        self.exchange(a, b, presenter);
        self.phase = Phase::SwapForward { a, b };
        self.phase_timer_ms = self.config.swap_ms;
        true
    }

    /// Exchange the pieces at `a` and `b`: coordinates and cell bindings
    /// flip immediately, visuals are asked to catch up over `swap_ms`.
    fn exchange<P: Presenter>(&mut self, a: Coord, b: Coord, presenter: &mut P) {
        let (Some(Some(id_a)), Some(Some(id_b))) = (self.grid.at(a.x, a.y), self.grid.at(b.x, b.y))
        else {
            return;
        };
        if let Some(piece) = self.pieces.get_mut(id_a) {
            self.grid.place(piece, b.x, b.y);
        }
        if let Some(piece) = self.pieces.get_mut(id_b) {
            self.grid.place(piece, a.x, a.y);
        }
        presenter.animate_move(id_a, b.x, b.y, self.config.swap_ms);
        presenter.animate_move(id_b, a.x, a.y, self.config.swap_ms);
        presenter.cell_changed(a.x, a.y, Some(id_b));
        presenter.cell_changed(b.x, b.y, Some(id_a));
    }

    // ---- frame stepping --------------------------------------------------

    /// Advance the resolution machine by `elapsed_ms`.
    ///
    /// Returns true when a phase boundary was crossed. Phases that animate
    /// pieces additionally hold until the presenter reports its animations
    /// settled.
    pub fn tick<P: Presenter>(&mut self, elapsed_ms: u32, presenter: &mut P) -> bool {
        if self.phase == Phase::Idle {
            return false;
        }

        self.phase_timer_ms = self.phase_timer_ms.saturating_sub(elapsed_ms);
        if self.phase_timer_ms > 0 {
            return false;
        }
        if self.waits_for_settle() && !presenter.animations_settled() {
            return false;
        }

        self.advance_phase(presenter);
        true
    }

    fn waits_for_settle(&self) -> bool {
        matches!(
            self.phase,
            Phase::SwapForward { .. } | Phase::SwapRevert | Phase::Collapse | Phase::Refill
        )
    }

    fn advance_phase<P: Presenter>(&mut self, presenter: &mut P) {
        match self.phase {
            Phase::Idle => {}

            Phase::SwapForward { a, b } => {
                let matches = {
                    let scanner = self.scanner();
                    scanner
                        .matches_through(a.x, a.y)
                        .union(scanner.matches_through(b.x, b.y))
                };
                if matches.is_empty() {
                    debug!(?a, ?b, "swap produced no match, reverting");
                    self.exchange(a, b, presenter);
                    self.phase = Phase::SwapRevert;
                    self.phase_timer_ms = self.config.swap_ms;
                } else {
                    self.input_enabled = false;
                    presenter.input_enabled_changed(false);
                    self.cascade_rounds = 0;
                    self.pending = matches;
                    self.enter_highlight(presenter);
                }
            }

            Phase::SwapRevert => {
                self.phase = Phase::Idle;
            }

            Phase::Highlight => self.enter_clear(presenter),

            Phase::Clear => self.enter_collapse(presenter),

            Phase::Collapse => {
                let matches = self.scanner().matches_for_any(&self.moved);
                if matches.is_empty() {
                    self.enter_refill(presenter);
                } else {
                    // Inner round: fallen pieces lined up before any refill.
                    self.pending = matches;
                    self.enter_highlight(presenter);
                }
            }

            Phase::Refill => {
                // The next round's seed is computed here; the pause that
                // follows is purely visual breathing room.
                self.pending = self.scanner().all_matches();
                self.phase = Phase::CascadePause;
                self.phase_timer_ms = self.config.cascade_pause_ms;
            }

            Phase::CascadePause => {
                if self.pending.is_empty() {
                    debug!(rounds = self.cascade_rounds, "cascade settled");
                    self.phase = Phase::Idle;
                    self.input_enabled = true;
                    presenter.input_enabled_changed(true);
                } else {
                    self.enter_highlight(presenter);
                }
            }
        }
    }

    // ---- cascade phases --------------------------------------------------

    fn enter_highlight<P: Presenter>(&mut self, presenter: &mut P) {
        self.cascade_rounds += 1;
        debug!(
            round = self.cascade_rounds,
            matched = self.pending.len(),
            "cascade round"
        );
        for id in self.pending.iter() {
            if let Some(piece) = self.pieces.get(id) {
                let c = piece.coord();
                presenter.highlight(c.x, c.y, piece.category());
            }
        }
        self.phase = Phase::Highlight;
        self.phase_timer_ms = self.config.highlight_pause_ms;
    }

    fn enter_clear<P: Presenter>(&mut self, presenter: &mut P) {
        let cleared: Vec<(PieceId, Coord)> = self
            .pending
            .iter()
            .filter_map(|id| self.pieces.get(id).map(|p| (id, p.coord())))
            .collect();

        self.touched_columns.clear();
        for (id, coord) in cleared {
            self.grid.clear(coord.x, coord.y);
            self.pieces.remove(id);
            presenter.unhighlight(coord.x, coord.y);
            presenter.piece_destroyed(id);
            presenter.cell_changed(coord.x, coord.y, None);
            if !self.touched_columns.contains(&coord.x) {
                self.touched_columns.push(coord.x);
            }
        }
        self.pending = MatchSet::new();

        self.phase = Phase::Clear;
        self.phase_timer_ms = self.config.clear_pause_ms;
    }

    fn enter_collapse<P: Presenter>(&mut self, presenter: &mut P) {
        self.moved.clear();
        let columns = std::mem::take(&mut self.touched_columns);
        let mut max_fall = 0;
        for x in &columns {
            max_fall = max_fall.max(self.collapse_column(*x, presenter));
        }

        self.phase = Phase::Collapse;
        self.phase_timer_ms =
            max_fall * self.config.collapse_step_ms + self.config.post_collapse_pause_ms;
    }

    /// Compact one column toward `y = 0`, preserving relative order.
    /// Returns the longest fall distance in the column. Collapsing a
    /// settled column moves nothing.
    fn collapse_column<P: Presenter>(&mut self, x: i32, presenter: &mut P) -> u32 {
        let mut write_y = 0;
        let mut max_fall = 0u32;
        for y in 0..self.grid.height() {
            let Some(Some(id)) = self.grid.at(x, y) else {
                continue;
            };
            if y != write_y {
                let fall = (y - write_y) as u32;
                self.grid.clear(x, y);
                if let Some(piece) = self.pieces.get_mut(id) {
                    self.grid.place(piece, x, write_y);
                }
                // Fall duration scales with distance: farther pieces take
                // proportionally longer, all land by max_fall * step.
                presenter.animate_move(id, x, write_y, fall * self.config.collapse_step_ms);
                presenter.cell_changed(x, y, None);
                presenter.cell_changed(x, write_y, Some(id));
                self.moved.push(Coord::new(x, write_y));
                max_fall = max_fall.max(fall);
            }
            write_y += 1;
        }
        max_fall
    }

    fn enter_refill<P: Presenter>(&mut self, presenter: &mut P) {
        self.fill_empty_avoiding_matches(presenter);
        self.phase = Phase::Refill;
        self.phase_timer_ms = self.config.refill_ms;
    }

    // ---- fill generator --------------------------------------------------

    /// Deal a random piece into `(x, y)` without collaborator notification.
    fn deal_piece(&mut self, x: i32, y: i32) -> (PieceId, Category) {
        let category = self.rng.pick_category(self.config.categories());
        let id = self.pieces.create(category, Coord::new(x, y));
        if let Some(piece) = self.pieces.get_mut(id) {
            self.grid.place(piece, x, y);
        }
        (id, category)
    }

    /// Match-safe population of every empty cell, in a deterministic
    /// column-major sweep. Each cell is redealt while it completes a match,
    /// up to the retry ceiling; on exhaustion the piece is accepted as-is
    /// and the residual match is logged. Settled pieces are never touched.
    fn fill_empty_avoiding_matches<P: Presenter>(&mut self, presenter: &mut P) {
        for x in 0..self.grid.width() {
            for y in 0..self.grid.height() {
                if !self.grid.is_empty_cell(x, y) {
                    continue;
                }

                let (mut id, mut category) = self.deal_piece(x, y);
                let mut retries = 0u32;
                while !self.scanner().matches_through(x, y).is_empty() {
                    if retries >= self.config.fill_retry_limit {
                        warn!(
                            x,
                            y, retries, "fill retry ceiling reached, accepting residual match"
                        );
                        break;
                    }
                    self.grid.clear(x, y);
                    self.pieces.remove(id);
                    (id, category) = self.deal_piece(x, y);
                    retries += 1;
                }

                // Only the accepted piece is narrated: it enters above the
                // board and falls to its cell.
                let entry_y = y + self.config.spawn_row_offset;
                presenter.piece_created(id, category, x, entry_y);
                presenter.cell_changed(x, y, Some(id));
                presenter.animate_move(id, x, y, self.config.refill_ms);
            }
        }
    }

    // ---- observation -----------------------------------------------------

    pub fn snapshot_into(&self, out: &mut BoardSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.cells.clear();
        out.cells
            .resize((self.grid.width() * self.grid.height()) as usize, None);
        for coord in self.grid.occupied_cells() {
            let idx = (coord.y * self.grid.width() + coord.x) as usize;
            out.cells[idx] = self.category_at(coord.x, coord.y);
        }
        out.state = self.resolution_state();
        out.input_enabled = self.input_enabled;
        out.piece_count = self.pieces.len();
        out.seed = self.rng.seed();
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let mut snap = BoardSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}
