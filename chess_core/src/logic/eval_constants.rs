// Piece Values
pub const VAL_PAWN: i32 = 1;
pub const VAL_KNIGHT: i32 = 3;
pub const VAL_BISHOP: i32 = 3;
pub const VAL_ROOK: i32 = 5;
pub const VAL_QUEEN: i32 = 10;
pub const VAL_KING: i32 = 0;

// Terminal scores, from the point of view of the side to move.
pub const MATE_SCORE: i32 = 1000;
pub const STALEMATE_SCORE: i32 = 0;
