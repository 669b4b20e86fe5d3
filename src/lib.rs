//! Falling-block puzzle simulation core.
//!
//! Owns the 10x20 playfield, the active and next piece, scoring/level state,
//! and the gravity timer. Presentation stays outside: a scheduler calls
//! [`crate::core::GameState::tick`] once per frame, an input layer calls the
//! discrete command methods, and a renderer reads the accessors or a
//! [`crate::core::GameSnapshot`]. All mutation is synchronous; invalid
//! commands are silent no-ops and game over is a level-triggered flag
//! cleared only by [`crate::core::GameState::reset`].

pub mod core;
pub mod types;
