//! Core module - pure game logic with no external dependencies
//!
//! Contains all the game rules and state management: the grid, the rotation
//! mask tables, the piece generator, scoring, and the simulation state
//! machine. It has zero dependencies on UI, input, or I/O; drivers consume
//! the accessors and snapshots and call the command methods.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

// Re-export commonly used types
pub use board::Board;
pub use game_state::{GameState, Piece};
pub use pieces::{mask_offsets, masks, rotation_count, RotationMask};
pub use rng::{PieceFactory, SimpleRng};
pub use snapshot::{GameSnapshot, PieceSnapshot};
