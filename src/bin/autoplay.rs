//! Headless autoplay driver (default binary).
//!
//! Drives a board through the public gesture verbs with seeded random
//! adjacent swaps - the scripted stand-in for a mouse or touch backend.
//! Every run is replayable: same seed, same swaps, same cascades.
//!
//! Usage: autoplay [seed] [attempts]

use anyhow::{Context, Result};
use tracing::info;

use match_grid::{
    Board, BoardConfig, Category, Coord, Direction, PieceId, Presenter, SimpleRng, TICK_MS,
};

/// Presenter that keeps run statistics instead of drawing.
#[derive(Debug, Default)]
struct StatsPresenter {
    commits: u32,
    pieces_created: u32,
    pieces_destroyed: u32,
}

impl Presenter for StatsPresenter {
    fn piece_created(&mut self, _id: PieceId, _category: Category, _x: i32, _y: i32) {
        self.pieces_created += 1;
    }

    fn piece_destroyed(&mut self, _id: PieceId) {
        self.pieces_destroyed += 1;
    }

    fn input_enabled_changed(&mut self, enabled: bool) {
        // Input closes exactly once per committed swap.
        if !enabled {
            self.commits += 1;
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let seed: u32 = match args.next() {
        Some(v) => v.parse().with_context(|| format!("invalid seed: {v}"))?,
        None => 1,
    };
    let attempts: u32 = match args.next() {
        Some(v) => v
            .parse()
            .with_context(|| format!("invalid attempt count: {v}"))?,
        None => 200,
    };

    run(seed, attempts)
}

fn run(seed: u32, attempts: u32) -> Result<()> {
    let mut presenter = StatsPresenter::default();
    let mut board = Board::new(BoardConfig::default(), seed)?;
    board.start(&mut presenter);

    // Separate gesture stream so board fills stay aligned with the seed.
    let mut gestures = SimpleRng::new(seed ^ 0x9e37_79b9);
    let mut total_rounds = 0u32;

    for attempt in 0..attempts {
        let origin = Coord::new(
            gestures.next_range(board.width() as u32) as i32,
            gestures.next_range(board.height() as u32) as i32,
        );
        let target = origin.step(Direction::ALL[gestures.next_range(4) as usize]);

        board.begin_select(origin);
        board.drag_over(target);
        if !board.release(&mut presenter) {
            continue;
        }

        let commits_before = presenter.commits;
        while !board.is_stable() {
            board.tick(TICK_MS, &mut presenter);
        }

        if presenter.commits > commits_before {
            total_rounds += board.cascade_rounds();
            info!(
                attempt,
                ?origin,
                ?target,
                rounds = board.cascade_rounds(),
                "swap committed"
            );
        }
    }

    info!(
        attempts,
        commits = presenter.commits,
        total_rounds,
        pieces_created = presenter.pieces_created,
        pieces_destroyed = presenter.pieces_destroyed,
        "autoplay finished"
    );
    Ok(())
}
