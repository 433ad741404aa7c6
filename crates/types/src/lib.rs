//! Core types module - shared data structures and constants
//!
//! Pure data types with no external dependencies, shared by the game core,
//! the input mapping and the terminal renderer.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 16 rows (indexed 0-15, row 0 at the top)
//! - **Spawn anchor**: (5, 0)
//!
//! # Cell Encoding
//!
//! Every board cell is a signed byte:
//!
//! | Value | Meaning |
//! |-------|---------|
//! | `0` | empty |
//! | `N > 0` | settled block of piece type `N` |
//! | `-N` | cell of the currently falling piece of type `N` |
//!
//! # Gravity Timing
//!
//! The gravity interval is a linear function of the level:
//! `SLOWEST_INTERVAL_MS - FASTEST_INCREMENT_MS * level`.
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 640ms |
//! | 5 | 400ms |
//! | 10 | 100ms |
//!
//! # Examples
//!
//! ```
//! use term_tetris_types::{GameCommand, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_id(1).unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.falling_cell(), -1);
//!
//! assert_eq!(GameCommand::from_str("moveLeft"), Some(GameCommand::MoveLeft));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 16);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (16 rows)
pub const BOARD_HEIGHT: u8 = 16;

/// Number of squares in every piece
pub const NUM_SQUARES: usize = 4;

/// Number of distinct piece types
pub const NUM_TYPES: u8 = 7;

/// Level a fresh game starts at
pub const DEFAULT_LEVEL: u32 = 1;

/// Highest reachable level
pub const MAX_LEVEL: u32 = 10;

/// Cleared lines needed per level step
pub const ROWS_PER_LEVEL: u32 = 5;

/// Gravity interval before any level is applied (700ms)
pub const SLOWEST_INTERVAL_MS: u32 = 700;

/// Interval removed from the gravity timer per level (60ms)
pub const FASTEST_INCREMENT_MS: u32 = 60;

/// Default redraw cadence of the terminal frontend (10ms)
pub const DEFAULT_FRAME_MS: u32 = 10;

/// Delay before a held movement key starts repeating.
pub const DEFAULT_REPEAT_DELAY_MS: u32 = 200;

/// Interval between repeats of a held movement key.
pub const DEFAULT_REPEAT_RATE_MS: u32 = 20;

/// A cell on the game board (see the module docs for the sign encoding).
pub type Cell = i8;

/// The seven piece types.
///
/// The discriminant is the type id stored in board cells. Names follow the
/// usual tetromino letters for the shape each id spawns with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum PieceKind {
    T = 1,
    L = 2,
    J = 3,
    Z = 4,
    S = 5,
    I = 6,
    O = 7,
}

impl PieceKind {
    /// All kinds in type-id order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::I,
        PieceKind::O,
    ];

    /// Look up a kind by its type id (1..=7).
    ///
    /// ```
    /// use term_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_id(6), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_id(0), None);
    /// assert_eq!(PieceKind::from_id(8), None);
    /// ```
    pub fn from_id(id: i8) -> Option<Self> {
        match id {
            1 => Some(PieceKind::T),
            2 => Some(PieceKind::L),
            3 => Some(PieceKind::J),
            4 => Some(PieceKind::Z),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::I),
            7 => Some(PieceKind::O),
            _ => None,
        }
    }

    /// Decode the kind stored in a board cell, ignoring the falling/settled sign.
    pub fn from_cell(cell: Cell) -> Option<Self> {
        Self::from_id(cell.saturating_abs())
    }

    /// Type id (1..=7)
    pub fn id(self) -> i8 {
        self as i8
    }

    /// Cell value for a settled block of this kind
    pub fn settled_cell(self) -> Cell {
        self.id()
    }

    /// Cell value for a falling block of this kind
    pub fn falling_cell(self) -> Cell {
        -self.id()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::T => "t",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::Z => "z",
            PieceKind::S => "s",
            PieceKind::I => "i",
            PieceKind::O => "o",
        }
    }
}

/// Lifecycle of a game.
///
/// `Intro` → `Started` ⇄ `Paused`, `Started` → `GameOver` → `Started` (reset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    /// Nothing active yet
    #[default]
    Intro,
    /// A piece is falling and the gravity timer runs
    Started,
    /// Timer stopped, board frozen
    Paused,
    /// Spawn failed; terminal until the next start
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Intro => "intro",
            GameStatus::Started => "started",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "game_over",
        }
    }
}

/// Commands the frontend can issue to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Start a new game, or resume a paused one
    Start,
    /// Toggle pause
    Pause,
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° about its anchor
    Rotate,
    /// Move piece one cell down
    MoveDown,
    /// Drop piece to its resting row and lock it
    Fall,
}

impl GameCommand {
    /// Parse a command from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use term_tetris_types::GameCommand;
    ///
    /// assert_eq!(GameCommand::from_str("rotate"), Some(GameCommand::Rotate));
    /// assert_eq!(GameCommand::from_str("MOVEDOWN"), Some(GameCommand::MoveDown));
    /// assert_eq!(GameCommand::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(GameCommand::Start),
            "pause" => Some(GameCommand::Pause),
            "moveleft" => Some(GameCommand::MoveLeft),
            "moveright" => Some(GameCommand::MoveRight),
            "rotate" => Some(GameCommand::Rotate),
            "movedown" => Some(GameCommand::MoveDown),
            "fall" => Some(GameCommand::Fall),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::Start => "start",
            GameCommand::Pause => "pause",
            GameCommand::MoveLeft => "moveLeft",
            GameCommand::MoveRight => "moveRight",
            GameCommand::Rotate => "rotate",
            GameCommand::MoveDown => "moveDown",
            GameCommand::Fall => "fall",
        }
    }

    /// Whether the command only acts on the falling piece
    pub fn is_movement(&self) -> bool {
        !matches!(self, GameCommand::Start | GameCommand::Pause)
    }
}
