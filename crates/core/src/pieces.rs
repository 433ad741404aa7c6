//! Pieces module - shape table and rotation
//!
//! Each piece type is four offsets relative to the anchor. Rotation turns the
//! offsets 90° about the anchor; there is no kick table, a blocked rotation
//! simply fails.

use crate::types::{PieceKind, NUM_SQUARES};

/// Offset of a single square relative to the piece anchor
pub type SquareOffset = (i8, i8);

/// Shape of a piece - 4 square offsets from the anchor
pub type PieceShape = [SquareOffset; NUM_SQUARES];

/// Spawn shapes indexed by type id. Index 0 is reserved.
pub const SHAPE_TABLE: [PieceShape; 8] = [
    [(0, 0); NUM_SQUARES],
    // T
    [(0, 0), (1, 0), (-1, 0), (0, 1)],
    // L
    [(0, 0), (1, 0), (-1, 0), (-1, 1)],
    // J
    [(0, 0), (1, 0), (-1, 0), (1, 1)],
    // Z
    [(0, 0), (-1, 0), (1, 1), (0, 1)],
    // S
    [(0, 0), (1, 0), (-1, 1), (0, 1)],
    // I
    [(0, 0), (1, 0), (-1, 0), (-2, 0)],
    // O
    [(0, 0), (1, 0), (1, 1), (0, 1)],
];

/// Spawn shape for a piece kind
pub fn get_shape(kind: PieceKind) -> PieceShape {
    SHAPE_TABLE[kind.id() as usize]
}

/// Rotate a shape 90° about the anchor: `(dx, dy) -> (dy, -dx)`.
pub fn rotate(shape: &PieceShape) -> PieceShape {
    let mut out = *shape;
    for (dst, &(dx, dy)) in out.iter_mut().zip(shape.iter()) {
        *dst = (dy, -dx);
    }
    out
}
