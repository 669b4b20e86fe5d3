//! Read model for renderer and session collaborators
//!
//! A `GameSnapshot` is a plain copyable view of the simulation: the grid as
//! u8 color codes, both pieces, score/level, timer, and the terminal flag.
//! `GameState::snapshot_into` fills a reusable buffer without allocating.

use crate::core::game_state::Piece;
use crate::types::{Color, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: ShapeKind,
    pub color: Color,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            color: value.color,
            rotation: value.rotation as u8,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Grid as color codes, 0 = empty, row 0 = top
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: PieceSnapshot,
    pub next: PieceSnapshot,
    pub score: u32,
    pub level: u32,
    pub fall_timer_ms: u32,
    pub game_over: bool,
    /// Current RNG state, enough to restart with the same sequence
    pub seed: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let placeholder = PieceSnapshot::from(Piece::new(ShapeKind::I, Color::Cyan));
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: placeholder,
            next: placeholder,
            score: 0,
            level: 1,
            fall_timer_ms: 0,
            game_over: false,
            seed: 0,
        }
    }
}
