//! Core types shared across the engine
//!
//! Pure data types plus the pacing/default constant table. Durations are in
//! milliseconds and only ever enter the engine through `tick(elapsed_ms)`.

use serde::{Deserialize, Serialize};

/// Default board dimensions
pub const DEFAULT_BOARD_WIDTH: i32 = 8;
pub const DEFAULT_BOARD_HEIGHT: i32 = 8;

/// Minimum run length for a match
pub const DEFAULT_MIN_MATCH_LENGTH: usize = 3;

/// Bounded retry ceiling for match-safe fill
pub const DEFAULT_FILL_RETRY_LIMIT: u32 = 100;

/// Pacing constants (in milliseconds)
pub const DEFAULT_SWAP_MS: u32 = 500;
pub const DEFAULT_HIGHLIGHT_PAUSE_MS: u32 = 250;
pub const DEFAULT_CLEAR_PAUSE_MS: u32 = 250;
pub const DEFAULT_COLLAPSE_STEP_MS: u32 = 100;
pub const DEFAULT_POST_COLLAPSE_PAUSE_MS: u32 = 200;
pub const DEFAULT_REFILL_MS: u32 = 500;
pub const DEFAULT_CASCADE_PAUSE_MS: u32 = 500;

/// Rows above the top edge where refilled pieces visually enter the board
pub const DEFAULT_SPAWN_ROW_OFFSET: i32 = 10;

/// Fixed tick used by the demo driver
pub const TICK_MS: u32 = 16;

/// Match categories
///
/// Two pieces match iff their categories are equal. A board uses a prefix of
/// this palette sized by `BoardConfig::category_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Yellow,
    Red,
    Blue,
    Green,
    Cyan,
    Indigo,
    Magenta,
    Teal,
}

impl Category {
    /// Full palette, in dealing order
    pub const ALL: [Category; 8] = [
        Category::Yellow,
        Category::Red,
        Category::Blue,
        Category::Green,
        Category::Cyan,
        Category::Indigo,
        Category::Magenta,
        Category::Teal,
    ];

    /// Number of categories in the palette
    pub const COUNT: usize = Self::ALL.len();

    /// Single-letter tag used by ASCII board layouts
    pub fn as_char(&self) -> char {
        match self {
            Category::Yellow => 'Y',
            Category::Red => 'R',
            Category::Blue => 'B',
            Category::Green => 'G',
            Category::Cyan => 'C',
            Category::Indigo => 'I',
            Category::Magenta => 'M',
            Category::Teal => 'T',
        }
    }

    /// Parse a layout tag (case-sensitive); `None` for unknown characters
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'Y' => Some(Category::Yellow),
            'R' => Some(Category::Red),
            'B' => Some(Category::Blue),
            'G' => Some(Category::Green),
            'C' => Some(Category::Cyan),
            'I' => Some(Category::Indigo),
            'M' => Some(Category::Magenta),
            'T' => Some(Category::Teal),
            _ => None,
        }
    }
}

/// Axis-aligned scan/neighbor directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step for this direction; `(0, 0)` is the bottom-left cell
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Board cell coordinate
///
/// `x` runs left to right, `y` bottom to top. Gravity compacts toward
/// `y = 0`; refilled pieces enter visually from above the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// One step in the given direction
    pub fn step(&self, dir: Direction) -> Self {
        let (dx, dy) = dir.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// 4-adjacency: Manhattan distance 1 along a single axis
    pub fn is_adjacent(&self, other: Coord) -> bool {
        ((self.x - other.x).abs() == 1 && self.y == other.y)
            || ((self.y - other.y).abs() == 1 && self.x == other.x)
    }
}

/// Board resolution state exposed to the collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionState {
    /// Stable board, swap input accepted
    Idle,
    /// Cascade in flight, external input ignored
    Resolving,
}
