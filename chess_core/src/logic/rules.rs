use crate::logic::board::{Board, BoardCoordinate, Color};
use crate::logic::generator::MoveGenerator;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no piece on the start square")]
    NoPieceAtSource,
    #[error("the piece belongs to the side not on move")]
    NotYourTurn,
    #[error("move is not legal in this position")]
    IllegalMove,
    #[error("the game is over")]
    GameOver,
}

/// True if any piece of `by` attacks `target`. Pawns attack both forward diagonals
/// regardless of what stands there.
///
/// This reads the generator's attack mode, not the pseudo-legal move list, so a
/// square a pawn can only push onto is never attacked while an empty diagonal is.
#[must_use]
pub fn is_square_attacked(board: &Board, target: BoardCoordinate, by: Color) -> bool {
    MoveGenerator::new()
        .generate_attacks(board, by)
        .iter()
        .any(|mv| mv.end == target)
}

/// True if the `color` king on `king_pos` is attacked.
#[must_use]
pub fn is_in_check(board: &Board, king_pos: BoardCoordinate, color: Color) -> bool {
    is_square_attacked(board, king_pos, color.opposite())
}
