//! Core types shared across the crate
//! This module contains pure data types with no external dependencies

/// Board dimensions
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Side length of the square rotation masks
pub const MASK_SIZE: usize = 5;

/// Gravity timing (in milliseconds)
pub const BASE_DROP_MS: u32 = 1000;
pub const DROP_STEP_MS: u32 = 100;
pub const DROP_FLOOR_MS: u32 = 100;

/// Scoring constants
pub const LINE_SCORE: u32 = 100;
pub const LEVEL_SCORE_STEP: u32 = 500;

/// Piece shape kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    S,
    Z,
    I,
    O,
    J,
    T,
    L,
}

impl ShapeKind {
    /// All shape kinds, in catalog order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::J,
        ShapeKind::T,
        ShapeKind::L,
    ];

    /// Parse shape kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "j" => Some(ShapeKind::J),
            "t" => Some(ShapeKind::T),
            "l" => Some(ShapeKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
            ShapeKind::I => "i",
            ShapeKind::O => "o",
            ShapeKind::J => "j",
            ShapeKind::T => "t",
            ShapeKind::L => "l",
        }
    }
}

/// Cell color identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Cyan,
    Orange,
}

impl Color {
    /// All colors, in catalog order
    pub const ALL: [Color; 7] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Purple,
        Color::Cyan,
        Color::Orange,
    ];

    /// Stable non-zero code for snapshots (0 is reserved for empty cells)
    pub fn code(&self) -> u8 {
        match self {
            Color::Red => 1,
            Color::Green => 2,
            Color::Blue => 3,
            Color::Yellow => 4,
            Color::Purple => 5,
            Color::Cyan => 6,
            Color::Orange => 7,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
            Color::Cyan => "cyan",
            Color::Orange => "orange",
        }
    }
}

/// Game actions issued by an input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::Restart => "restart",
        }
    }
}

/// Cell on the board (None = empty, Some = filled with a color)
pub type Cell = Option<Color>;
