//! Pieces module - rotation-state mask tables for every shape
//!
//! Each shape is an ordered list of rotation states; each state is a 5x5
//! boolean mask marking occupied cells relative to the piece origin.
//! `rotate` advances the index modulo the state count, so shapes carry only
//! as many states as they have distinct orientations (O: 1, S/Z/I: 2,
//! J/T/L: 4). Successive states are 90-degree clockwise turns about the
//! mask center.

use crate::types::{ShapeKind, BOARD_WIDTH, MASK_SIZE};

/// One rotation state: occupied cells relative to the piece origin
pub type RotationMask = [[bool; MASK_SIZE]; MASK_SIZE];

/// Number of occupied cells in every mask
pub const CELLS_PER_PIECE: usize = 4;

/// Spawn position for new pieces (x, y): top row, centered for a 5-wide mask
pub const SPAWN_X: i8 = BOARD_WIDTH as i8 / 2 - MASK_SIZE as i8 / 2;
pub const SPAWN_Y: i8 = 0;

macro_rules! mask {
    ($([$($c:literal),* $(,)?]),* $(,)?) => {
        [$([$($c != 0),*]),*]
    };
}

const S_MASKS: [RotationMask; 2] = [
    mask![
        [0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0],
        [0, 0, 1, 1, 0],
        [0, 1, 1, 0, 0],
        [0, 0, 0, 0, 0],
    ],
    mask![
        [0, 0, 0, 0, 0],
        [0, 0, 1, 0, 0],
        [0, 0, 1, 1, 0],
        [0, 0, 0, 1, 0],
        [0, 0, 0, 0, 0],
    ],
];

const Z_MASKS: [RotationMask; 2] = [
    mask![
        [0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0],
        [0, 1, 1, 0, 0],
        [0, 0, 1, 1, 0],
        [0, 0, 0, 0, 0],
    ],
    mask![
        [0, 0, 0, 0, 0],
        [0, 0, 1, 0, 0],
        [0, 1, 1, 0, 0],
        [0, 1, 0, 0, 0],
        [0, 0, 0, 0, 0],
    ],
];

const I_MASKS: [RotationMask; 2] = [
    mask![
        [0, 0, 1, 0, 0],
        [0, 0, 1, 0, 0],
        [0, 0, 1, 0, 0],
        [0, 0, 1, 0, 0],
        [0, 0, 0, 0, 0],
    ],
    mask![
        [0, 0, 0, 0, 0],
        [1, 1, 1, 1, 0],
        [0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0],
    ],
];

const O_MASKS: [RotationMask; 1] = [mask![
    [0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0],
    [0, 1, 1, 0, 0],
    [0, 1, 1, 0, 0],
    [0, 0, 0, 0, 0],
]];

const J_MASKS: [RotationMask; 4] = [
    mask![
        [0, 0, 0, 0, 0],
        [0, 1, 0, 0, 0],
        [0, 1, 1, 1, 0],
        [0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0],
    ],
    mask![
        [0, 0, 0, 0, 0],
        [0, 0, 1, 1, 0],
        [0, 0, 1, 0, 0],
        [0, 0, 1, 0, 0],
        [0, 0, 0, 0, 0],
    ],
    mask![
        [0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0],
        [0, 1, 1, 1, 0],
        [0, 0, 0, 1, 0],
        [0, 0, 0, 0, 0],
    ],
    mask![
        [0, 0, 0, 0, 0],
        [0, 0, 1, 0, 0],
        [0, 0, 1, 0, 0],
        [0, 1, 1, 0, 0],
        [0, 0, 0, 0, 0],
    ],
];

const T_MASKS: [RotationMask; 4] = [
    mask![
        [0, 0, 0, 0, 0],
        [0, 0, 1, 0, 0],
        [0, 1, 1, 1, 0],
        [0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0],
    ],
    mask![
        [0, 0, 0, 0, 0],
        [0, 0, 1, 0, 0],
        [0, 0, 1, 1, 0],
        [0, 0, 1, 0, 0],
        [0, 0, 0, 0, 0],
    ],
    mask![
        [0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0],
        [0, 1, 1, 1, 0],
        [0, 0, 1, 0, 0],
        [0, 0, 0, 0, 0],
    ],
    mask![
        [0, 0, 0, 0, 0],
        [0, 0, 1, 0, 0],
        [0, 1, 1, 0, 0],
        [0, 0, 1, 0, 0],
        [0, 0, 0, 0, 0],
    ],
];

const L_MASKS: [RotationMask; 4] = [
    mask![
        [0, 0, 0, 0, 0],
        [0, 0, 0, 1, 0],
        [0, 1, 1, 1, 0],
        [0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0],
    ],
    mask![
        [0, 0, 0, 0, 0],
        [0, 0, 1, 0, 0],
        [0, 0, 1, 0, 0],
        [0, 0, 1, 1, 0],
        [0, 0, 0, 0, 0],
    ],
    mask![
        [0, 0, 0, 0, 0],
        [0, 0, 0, 0, 0],
        [0, 1, 1, 1, 0],
        [0, 1, 0, 0, 0],
        [0, 0, 0, 0, 0],
    ],
    mask![
        [0, 0, 0, 0, 0],
        [0, 1, 1, 0, 0],
        [0, 0, 1, 0, 0],
        [0, 0, 1, 0, 0],
        [0, 0, 0, 0, 0],
    ],
];

/// Get the rotation-state table for a shape kind
pub fn masks(kind: ShapeKind) -> &'static [RotationMask] {
    match kind {
        ShapeKind::S => &S_MASKS,
        ShapeKind::Z => &Z_MASKS,
        ShapeKind::I => &I_MASKS,
        ShapeKind::O => &O_MASKS,
        ShapeKind::J => &J_MASKS,
        ShapeKind::T => &T_MASKS,
        ShapeKind::L => &L_MASKS,
    }
}

/// Number of rotation states for a shape kind
pub fn rotation_count(kind: ShapeKind) -> usize {
    masks(kind).len()
}

/// Iterate the occupied (x, y) offsets of a mask
pub fn mask_offsets(mask: &RotationMask) -> impl Iterator<Item = (i8, i8)> + '_ {
    mask.iter().enumerate().flat_map(|(y, row)| {
        row.iter()
            .enumerate()
            .filter_map(move |(x, &occupied)| occupied.then_some((x as i8, y as i8)))
    })
}
