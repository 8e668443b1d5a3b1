use crate::logic::board::{Board, BoardCoordinate, Piece, PieceType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// One ply. Built once against the board it is played on and never mutated.
///
/// Equality and hashing only look at the start and end squares, so a move built
/// from two selected squares matches the flagged move produced by the generator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Move {
    pub start: BoardCoordinate,
    pub end: BoardCoordinate,
    pub piece_moved: Piece,
    pub piece_captured: Option<Piece>,
    pub is_promotion: bool,
    pub is_en_passant: bool,
    pub is_castle: bool,
}

impl Move {
    /// Reads the moving and captured pieces off `board`. `None` if `start` is empty.
    #[must_use]
    pub fn new(start: BoardCoordinate, end: BoardCoordinate, board: &Board) -> Option<Self> {
        let piece_moved = board.get_piece(start)?;
        let is_promotion = piece_moved.piece_type == PieceType::Pawn
            && end.row == piece_moved.color.promotion_row();
        Some(Self {
            start,
            end,
            piece_moved,
            piece_captured: board.get_piece(end),
            is_promotion,
            is_en_passant: false,
            is_castle: false,
        })
    }

    /// Diagonal pawn capture onto the empty en-passant square. The captured piece is the
    /// enemy pawn beside the mover, not the (empty) destination.
    #[must_use]
    pub fn en_passant(start: BoardCoordinate, end: BoardCoordinate, board: &Board) -> Option<Self> {
        let mut mv = Self::new(start, end, board)?;
        mv.is_en_passant = true;
        mv.piece_captured = Some(Piece::new(
            PieceType::Pawn,
            mv.piece_moved.color.opposite(),
        ));
        Some(mv)
    }

    /// Two-square king move; the rook is relocated when the move is applied.
    #[must_use]
    pub fn castle(start: BoardCoordinate, end: BoardCoordinate, board: &Board) -> Option<Self> {
        let mut mv = Self::new(start, end, board)?;
        mv.is_castle = true;
        Some(mv)
    }

    #[must_use]
    pub const fn move_id(&self) -> usize {
        self.start.row * 1000 + self.start.col * 100 + self.end.row * 10 + self.end.col
    }

    #[must_use]
    pub const fn is_capture(&self) -> bool {
        self.piece_captured.is_some()
    }

    #[must_use]
    pub const fn is_king_side_castle(&self) -> bool {
        self.is_castle && self.end.col > self.start.col
    }

    /// Square of the pawn removed by an en-passant capture.
    #[must_use]
    pub const fn en_passant_square(&self) -> BoardCoordinate {
        BoardCoordinate {
            row: self.start.row,
            col: self.end.col,
        }
    }

    /// Rook start and end squares for a castle move.
    #[must_use]
    pub const fn castle_rook_squares(&self) -> (BoardCoordinate, BoardCoordinate) {
        let row = self.end.row;
        if self.is_king_side_castle() {
            (
                BoardCoordinate { row, col: self.end.col + 1 },
                BoardCoordinate { row, col: self.end.col - 1 },
            )
        } else {
            (
                BoardCoordinate { row, col: self.end.col - 2 },
                BoardCoordinate { row, col: self.end.col + 1 },
            )
        }
    }

    /// `e2e4`-style notation.
    #[must_use]
    pub fn notation(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.move_id() == other.move_id()
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.move_id().hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.start, self.end)
    }
}
