//! Game state module - the complete board simulation
//!
//! Ties together board, pieces, RNG, and scoring. Owns the active and next
//! piece, score/level, the gravity timer, and the terminal flag. A scheduler
//! collaborator drives `tick(elapsed_ms)` at frame cadence; an input
//! collaborator calls the discrete command methods. Invalid commands are
//! silent no-ops, never errors.

use crate::core::pieces::{mask_offsets, masks, rotation_count, RotationMask, SPAWN_X, SPAWN_Y};
use crate::core::scoring::{drop_interval_ms, level_for_score, line_clear_score};
use crate::core::snapshot::{GameSnapshot, PieceSnapshot};
use crate::core::{Board, PieceFactory};
use crate::types::{Color, GameAction, ShapeKind};

/// A falling piece: shape, color, rotation state, and board-space origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    pub color: Color,
    pub rotation: usize,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a new piece at the spawn position, rotation 0
    pub fn new(kind: ShapeKind, color: Color) -> Self {
        Self {
            kind,
            color,
            rotation: 0,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Get the mask for the current rotation state.
    /// The index wraps modulo the state count, so an out-of-range value
    /// written through the public field selects a valid state rather than
    /// panicking.
    pub fn mask(&self) -> &'static RotationMask {
        let table = masks(self.kind);
        &table[self.rotation % table.len()]
    }

    /// Iterate the absolute board coordinates of the occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        mask_offsets(self.mask()).map(move |(dx, dy)| (x + dx, y + dy))
    }

    /// Check whether the piece fits after applying (dx, dy)
    pub fn fits(&self, board: &Board, dx: i8, dy: i8) -> bool {
        self.fits_rotated(board, self.rotation, dx, dy)
    }

    /// Check whether the piece fits at a candidate rotation after (dx, dy).
    /// The rotation index wraps modulo the state count.
    pub fn fits_rotated(&self, board: &Board, rotation: usize, dx: i8, dy: i8) -> bool {
        let table = masks(self.kind);
        mask_offsets(&table[rotation % table.len()])
            .all(|(mx, my)| board.is_open(self.x + mx + dx, self.y + my + dy))
    }
}

/// Complete simulation state: one writer (the commands and tick below),
/// any number of readers through the accessors and snapshots.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Piece,
    next: Piece,
    factory: PieceFactory,
    score: u32,
    level: u32,
    fall_timer_ms: u32,
    game_over: bool,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        let mut factory = PieceFactory::new(seed);
        let (kind, color) = factory.draw();
        let active = Piece::new(kind, color);
        let (kind, color) = factory.draw();
        let next = Piece::new(kind, color);

        Self {
            board: Board::new(),
            active,
            next,
            factory,
            score: 0,
            level: 1,
            fall_timer_ms: 0,
            game_over: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Piece {
        self.active
    }

    pub fn next_piece(&self) -> Piece {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Current fall interval, derived from the level
    pub fn fall_interval_ms(&self) -> u32 {
        drop_interval_ms(self.level)
    }

    /// Try to move the active piece by (dx, dy); no-op if blocked or terminal
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.game_over {
            return false;
        }
        if self.active.fits(&self.board, dx, dy) {
            self.active.x += dx;
            self.active.y += dy;
            return true;
        }
        false
    }

    /// Move the active piece one column left
    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    /// Move the active piece one column right
    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Move the active piece one row down. When the row below is blocked the
    /// piece locks instead; returns whether the piece actually moved.
    pub fn soft_drop(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        if self.try_move(0, 1) {
            return true;
        }
        self.lock_active();
        false
    }

    /// Advance the rotation index by one state, validated against the grid.
    /// A blocked rotation leaves the piece untouched.
    pub fn rotate(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let count = rotation_count(self.active.kind);
        if count == 1 {
            return false;
        }
        let candidate = (self.active.rotation + 1) % count;
        if self.active.fits_rotated(&self.board, candidate, 0, 0) {
            self.active.rotation = candidate;
            return true;
        }
        false
    }

    /// Gravity tick: accumulate elapsed time and perform one downward step
    /// (move or lock) each time the fall interval elapses.
    /// Returns whether gravity advanced the simulation.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.game_over {
            return false;
        }

        self.fall_timer_ms += elapsed_ms;
        if self.fall_timer_ms < self.fall_interval_ms() {
            return false;
        }

        self.fall_timer_ms = 0;
        self.soft_drop();
        true
    }

    /// Lock the active piece into the grid, clear full rows, update score and
    /// level, and promote the next piece. Ends the game when the promoted
    /// piece does not fit at spawn.
    fn lock_active(&mut self) {
        // The piece sits at a position already proven valid, so the write
        // cannot overlap occupied cells. Cells above the top are discarded.
        self.board
            .fill_cells(self.active.cells(), self.active.color);

        let cleared = self.board.clear_full_rows().len();
        if cleared > 0 {
            self.score += line_clear_score(cleared);
        }
        self.level = level_for_score(self.score);

        let (kind, color) = self.factory.draw();
        self.active = std::mem::replace(&mut self.next, Piece::new(kind, color));

        if !self.active.fits(&self.board, 0, 0) {
            self.game_over = true;
        }
    }

    /// Start over: empty grid, two fresh pieces, zeroed score and timers,
    /// level 1, terminal flag cleared. The RNG stream continues from its
    /// current state so a restart does not replay the previous game.
    pub fn reset(&mut self) {
        *self = Self::new(self.factory.state());
    }

    /// Apply a game action from an input collaborator
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }

    /// Write the full read model into a reusable snapshot buffer
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.active = PieceSnapshot::from(self.active);
        out.next = PieceSnapshot::from(self.next);
        out.score = self.score;
        out.level = self.level;
        out.fall_timer_ms = self.fall_timer_ms;
        out.game_over = self.game_over;
        out.seed = self.factory.state();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

    /// Pin the active piece to a vertical I at column `x + 2`, row `y`
    fn force_vertical_i(state: &mut GameState, x: i8, y: i8) {
        state.active = Piece {
            kind: ShapeKind::I,
            color: Color::Cyan,
            rotation: 0,
            x,
            y,
        };
    }

    fn fill_row_except(state: &mut GameState, y: i8, gap_x: i8) {
        for x in 0..BOARD_WIDTH as i8 {
            if x != gap_x {
                state.board.set(x, y, Some(Color::Red));
            }
        }
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.fall_timer_ms, 0);
        assert_eq!(state.fall_interval_ms(), 900);
        assert_eq!((state.active.x, state.active.y), (SPAWN_X, SPAWN_Y));
        assert_eq!(state.active.rotation, 0);
        assert!(state.board.cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_move_left_right() {
        let mut state = GameState::new(12345);

        let initial_x = state.active.x;
        assert!(state.move_right());
        assert_eq!(state.active.x, initial_x + 1);
        assert!(state.move_left());
        assert_eq!(state.active.x, initial_x);
    }

    #[test]
    fn test_move_blocked_at_walls_is_noop() {
        let mut state = GameState::new(12345);

        for _ in 0..BOARD_WIDTH {
            state.move_left();
        }
        let at_wall = state.active.x;
        assert!(!state.move_left());
        assert_eq!(state.active.x, at_wall);
        assert!(state.active.cells().all(|(x, _)| x >= 0));

        for _ in 0..2 * BOARD_WIDTH {
            state.move_right();
        }
        let at_wall = state.active.x;
        assert!(!state.move_right());
        assert_eq!(state.active.x, at_wall);
        assert!(state.active.cells().all(|(x, _)| x < BOARD_WIDTH as i8));
    }

    #[test]
    fn test_rotation_commits_only_when_valid() {
        let mut state = GameState::new(1);
        // Vertical I resting on the floor: occupies column 5, rows 16-19.
        force_vertical_i(&mut state, 3, 16);

        // The horizontal state needs row 17, columns 3-6; block column 3.
        state.board.set(3, 17, Some(Color::Red));
        assert!(!state.rotate());
        assert_eq!(state.active.rotation, 0);

        // Unblock and the same rotation commits.
        state.board.set(3, 17, None);
        assert!(state.rotate());
        assert_eq!(state.active.rotation, 1);
    }

    #[test]
    fn test_rotation_rejection_is_idempotent() {
        let mut state = GameState::new(1);
        force_vertical_i(&mut state, 3, 16);
        state.board.set(3, 17, Some(Color::Red));

        for _ in 0..4 {
            assert!(!state.rotate());
        }
        assert_eq!(state.active.rotation, 0);
        assert_eq!((state.active.x, state.active.y), (3, 16));
    }

    #[test]
    fn test_out_of_range_rotation_index_wraps() {
        let board = Board::new();
        let mut piece = Piece::new(ShapeKind::T, Color::Purple);

        // A driver writing past the table through the public field must not
        // panic the geometry queries.
        piece.rotation = 6;
        assert_eq!(piece.mask(), &masks(ShapeKind::T)[2]);
        assert_eq!(piece.cells().count(), 4);
        assert!(piece.fits_rotated(&board, 9, 0, 0));
    }

    #[test]
    fn test_rotate_single_state_shape_is_noop() {
        let mut state = GameState::new(1);
        state.active = Piece::new(ShapeKind::O, Color::Yellow);

        assert!(!state.rotate());
        assert_eq!(state.active.rotation, 0);
    }

    #[test]
    fn test_rotation_wraps_modulo_state_count() {
        let mut state = GameState::new(1);
        state.active = Piece {
            kind: ShapeKind::T,
            color: Color::Purple,
            rotation: 0,
            x: 3,
            y: 5,
        };

        for expected in [1, 2, 3, 0, 1] {
            assert!(state.rotate());
            assert_eq!(state.active.rotation, expected);
        }
    }

    #[test]
    fn test_soft_drop_locks_i_piece_at_bottom() {
        let mut state = GameState::new(12345);
        force_vertical_i(&mut state, 3, 0);
        let queued = state.next;

        // Lowest mask row is offset 3, so the piece rests at origin y=16
        // with its bottom cell on row 19. 16 drops move, the 17th locks.
        for _ in 0..16 {
            assert!(state.soft_drop());
        }
        assert_eq!(state.active.y, 16);
        assert!(!state.soft_drop());

        for y in 16..=19 {
            assert_eq!(state.board.get(5, y), Some(Some(Color::Cyan)));
        }
        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        // The queued piece was promoted wholesale.
        assert_eq!(state.active, queued);
    }

    #[test]
    fn test_lock_writes_exact_footprint() {
        let mut state = GameState::new(7);
        state.active = Piece {
            kind: ShapeKind::S,
            color: Color::Green,
            rotation: 0,
            x: 2,
            y: 15,
        };
        let expected: Vec<(i8, i8)> = state.active.cells().collect();

        // Drop until the piece locks.
        while state.soft_drop() {}

        // The S mask's lowest row sits at offset 3, so from y=15 the piece
        // falls exactly one more row before locking.
        let landed: Vec<(i8, i8)> = expected.iter().map(|&(x, y)| (x, y + 1)).collect();
        for &(x, y) in &landed {
            assert_eq!(state.board.get(x, y), Some(Some(Color::Green)));
        }
        assert_eq!(
            state.board.cells().iter().filter(|c| c.is_some()).count(),
            4
        );
    }

    #[test]
    fn test_single_row_clear_awards_100() {
        let mut state = GameState::new(12345);
        fill_row_except(&mut state, 19, 5);
        force_vertical_i(&mut state, 3, 16);

        // Locking fills the gap in row 19: exactly one clear.
        assert!(!state.soft_drop());
        assert_eq!(state.score, 100);
        assert_eq!(state.level, 1);
        assert!(!state.game_over);

        // The surviving I cells shifted down one row; row 19 keeps only them.
        assert_eq!(state.board.get(5, 19), Some(Some(Color::Cyan)));
        for x in 0..BOARD_WIDTH as i8 {
            if x != 5 {
                assert_eq!(state.board.get(x, 19), Some(None));
            }
        }
    }

    #[test]
    fn test_quad_clear_scoring_and_level() {
        let mut state = GameState::new(12345);
        state.score = 400;
        for y in 16..=19 {
            fill_row_except(&mut state, y, 5);
        }
        force_vertical_i(&mut state, 3, 16);

        assert!(!state.soft_drop());
        // Four rows at 100 each on top of the pre-existing 400.
        assert_eq!(state.score, 800);
        assert_eq!(state.level, 2);
        assert_eq!(state.fall_interval_ms(), 800);
        assert!(state.board.cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_blocked_spawn_sets_terminal() {
        let mut state = GameState::new(12345);
        // Occupy the spawn band rows 0-3, leaving column 0 open in each so
        // the lock clears nothing. Every shape's spawn state lands inside
        // columns 4-6, so the promoted piece cannot fit.
        for y in 0..4i8 {
            fill_row_except(&mut state, y, 0);
        }
        force_vertical_i(&mut state, 3, 16);

        assert!(!state.soft_drop());
        assert!(state.game_over);
        // No row completed during the lock: the band is still in place.
        assert_eq!(state.score, 0);
        assert!(state.board.is_occupied(4, 0));
        assert!(!state.board.is_occupied(0, 0));
    }

    #[test]
    fn test_terminal_state_ignores_commands_and_ticks() {
        let mut state = GameState::new(12345);
        state.game_over = true;
        let before = state.clone();

        assert!(!state.move_left());
        assert!(!state.move_right());
        assert!(!state.rotate());
        assert!(!state.soft_drop());
        assert!(!state.tick(10_000));

        assert_eq!(state.snapshot(), before.snapshot());
    }

    #[test]
    fn test_reset_clears_terminal_state() {
        let mut state = GameState::new(12345);
        state.game_over = true;
        state.score = 700;
        state.board.set(0, 19, Some(Color::Red));
        state.fall_timer_ms = 123;

        state.reset();

        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.fall_timer_ms, 0);
        assert!(state.board.cells().iter().all(|c| c.is_none()));
        assert_eq!((state.active.x, state.active.y), (SPAWN_X, SPAWN_Y));
    }

    #[test]
    fn test_tick_accumulates_to_fall_interval() {
        let mut state = GameState::new(12345);
        let y0 = state.active.y;

        assert!(!state.tick(450));
        assert_eq!(state.active.y, y0);
        assert!(state.tick(450));
        assert_eq!(state.active.y, y0 + 1);
        // Timer resets to zero on each gravity step.
        assert_eq!(state.fall_timer_ms, 0);
    }

    #[test]
    fn test_tick_at_bottom_locks_like_soft_drop() {
        let mut state = GameState::new(12345);
        force_vertical_i(&mut state, 3, 16);

        assert!(state.tick(900));
        assert_eq!(state.board.get(5, 19), Some(Some(Color::Cyan)));
        // The queued piece took over at its spawn position.
        assert_eq!((state.active.x, state.active.y), (SPAWN_X, SPAWN_Y));
    }

    #[test]
    fn test_score_is_monotonic_during_play() {
        let mut state = GameState::new(99);
        let mut last_score = 0;

        for _ in 0..2_000 {
            if state.game_over {
                break;
            }
            state.soft_drop();
            assert!(state.score >= last_score);
            last_score = state.score;
        }
    }

    #[test]
    fn test_board_height_constant_for_session() {
        let mut state = GameState::new(3);
        for _ in 0..200 {
            state.soft_drop();
            assert_eq!(state.board.height(), BOARD_HEIGHT);
            assert_eq!(state.board.width(), BOARD_WIDTH);
        }
    }
}
