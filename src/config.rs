//! Board configuration
//!
//! All knobs are provided at construction and fixed for the grid's lifetime:
//! dimensions, category-set size, minimum match length, pacing durations, and
//! the fill retry ceiling.

use serde::{Deserialize, Serialize};

use crate::types::{
    Category, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_CASCADE_PAUSE_MS,
    DEFAULT_CLEAR_PAUSE_MS, DEFAULT_COLLAPSE_STEP_MS, DEFAULT_FILL_RETRY_LIMIT,
    DEFAULT_HIGHLIGHT_PAUSE_MS, DEFAULT_MIN_MATCH_LENGTH, DEFAULT_POST_COLLAPSE_PAUSE_MS,
    DEFAULT_REFILL_MS, DEFAULT_SPAWN_ROW_OFFSET, DEFAULT_SWAP_MS,
};

/// Configuration rejected at board construction.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: i32, height: i32 },

    #[error("category count must be between 1 and {max}, got {got}")]
    CategoryCount { got: usize, max: usize },

    #[error("minimum match length must be at least 2, got {0}")]
    MinMatchLength(usize),

    #[error("layout row {row} has width {got}, expected {expected}")]
    LayoutWidth {
        row: usize,
        got: usize,
        expected: usize,
    },

    #[error("layout has {got} rows, expected {expected}")]
    LayoutHeight { got: usize, expected: usize },

    #[error("layout contains unknown tag {0:?}")]
    LayoutTag(char),
}

/// Construction-time board parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: i32,
    pub height: i32,
    /// Number of categories dealt by the fill generator (prefix of
    /// [`Category::ALL`]). A count of 1 is legal and exercises the fill
    /// retry ceiling.
    pub category_count: usize,
    pub min_match_length: usize,
    /// Swap (and revert) animation duration.
    pub swap_ms: u32,
    pub highlight_pause_ms: u32,
    pub clear_pause_ms: u32,
    /// Per-cell fall duration; a piece falling `n` cells animates for
    /// `n * collapse_step_ms`.
    pub collapse_step_ms: u32,
    pub post_collapse_pause_ms: u32,
    pub refill_ms: u32,
    pub cascade_pause_ms: u32,
    /// Retry ceiling for match-safe fill before a cell is accepted as-is.
    pub fill_retry_limit: u32,
    /// Rows above the top edge where refilled pieces visually enter.
    pub spawn_row_offset: i32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            category_count: 5,
            min_match_length: DEFAULT_MIN_MATCH_LENGTH,
            swap_ms: DEFAULT_SWAP_MS,
            highlight_pause_ms: DEFAULT_HIGHLIGHT_PAUSE_MS,
            clear_pause_ms: DEFAULT_CLEAR_PAUSE_MS,
            collapse_step_ms: DEFAULT_COLLAPSE_STEP_MS,
            post_collapse_pause_ms: DEFAULT_POST_COLLAPSE_PAUSE_MS,
            refill_ms: DEFAULT_REFILL_MS,
            cascade_pause_ms: DEFAULT_CASCADE_PAUSE_MS,
            fill_retry_limit: DEFAULT_FILL_RETRY_LIMIT,
            spawn_row_offset: DEFAULT_SPAWN_ROW_OFFSET,
        }
    }
}

impl BoardConfig {
    /// Convenience constructor for the common knobs; everything else stays
    /// at its default.
    pub fn new(width: i32, height: i32, category_count: usize) -> Self {
        Self {
            width,
            height,
            category_count,
            ..Self::default()
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.category_count == 0 || self.category_count > Category::COUNT {
            return Err(ConfigError::CategoryCount {
                got: self.category_count,
                max: Category::COUNT,
            });
        }
        if self.min_match_length < 2 {
            return Err(ConfigError::MinMatchLength(self.min_match_length));
        }
        Ok(())
    }

    /// Categories dealt by the fill generator.
    pub fn categories(&self) -> &'static [Category] {
        &Category::ALL[..self.category_count]
    }
}
