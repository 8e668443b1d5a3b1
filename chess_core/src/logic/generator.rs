use crate::logic::board::{Board, BoardCoordinate, Color, Piece, PieceType};
use crate::logic::castling::CastlingRights;
use crate::logic::moves::Move;

const ROOK_DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];
const BISHOP_DIRECTIONS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
const KING_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const KING_START_COL: usize = 4;

/// What the generator is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GenContext {
    en_passant: Option<BoardCoordinate>,
    // Pawns report both diagonals whether or not something stands there, and never push.
    attacks_only: bool,
}

type PieceMoveFn = fn(&Board, BoardCoordinate, Piece, GenContext, &mut Vec<Move>);

// Indexed by `PieceType::index()`.
const PIECE_GENERATORS: [PieceMoveFn; 6] = [
    pawn_moves,
    knight_moves,
    bishop_moves,
    rook_moves,
    queen_moves,
    king_moves,
];

const fn generator_for(piece_type: PieceType) -> PieceMoveFn {
    PIECE_GENERATORS[piece_type.index()]
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Pseudo-legal moves for `turn`, in row-major square order. Castling is not included.
    #[must_use]
    pub fn generate_moves(
        &self,
        board: &Board,
        turn: Color,
        en_passant: Option<BoardCoordinate>,
    ) -> Vec<Move> {
        let ctx = GenContext {
            en_passant,
            attacks_only: false,
        };
        Self::generate(board, turn, ctx)
    }

    /// Every square `color` attacks, one entry per attacking move.
    #[must_use]
    pub fn generate_attacks(&self, board: &Board, color: Color) -> Vec<Move> {
        let ctx = GenContext {
            en_passant: None,
            attacks_only: true,
        };
        Self::generate(board, color, ctx)
    }

    fn generate(board: &Board, turn: Color, ctx: GenContext) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        for (from, piece) in board.pieces() {
            if piece.color == turn {
                generator_for(piece.piece_type)(board, from, piece, ctx, &mut moves);
            }
        }
        moves
    }

    /// Castle moves for the king on `king_pos`. `is_attacked` answers whether the
    /// opponent attacks a square.
    pub fn generate_castle_moves<F>(
        &self,
        board: &Board,
        king_pos: BoardCoordinate,
        color: Color,
        rights: CastlingRights,
        is_attacked: F,
        moves: &mut Vec<Move>,
    ) where
        F: Fn(BoardCoordinate) -> bool,
    {
        let row = color.back_rank();
        if king_pos.row != row || king_pos.col != KING_START_COL {
            return;
        }
        if board.get_piece(king_pos) != Some(Piece::new(PieceType::King, color)) {
            return;
        }
        if is_attacked(king_pos) {
            return;
        }

        let rook = Some(Piece::new(PieceType::Rook, color));
        let square = |col: usize| BoardCoordinate { row, col };
        let empty = |cols: &[usize]| cols.iter().all(|&c| board.get_piece(square(c)).is_none());
        let safe = |cols: &[usize]| cols.iter().all(|&c| !is_attacked(square(c)));

        if rights.king_side(color)
            && board.get_piece(square(7)) == rook
            && empty(&[5, 6])
            && safe(&[5, 6])
        {
            if let Some(mv) = Move::castle(king_pos, square(6), board) {
                moves.push(mv);
            }
        }

        if rights.queen_side(color)
            && board.get_piece(square(0)) == rook
            && empty(&[1, 2, 3])
            && safe(&[3, 2])
        {
            if let Some(mv) = Move::castle(king_pos, square(2), board) {
                moves.push(mv);
            }
        }
    }
}

fn push_move(board: &Board, from: BoardCoordinate, to: BoardCoordinate, moves: &mut Vec<Move>) {
    if let Some(mv) = Move::new(from, to, board) {
        moves.push(mv);
    }
}

fn pawn_moves(
    board: &Board,
    from: BoardCoordinate,
    piece: Piece,
    ctx: GenContext,
    moves: &mut Vec<Move>,
) {
    let color = piece.color;
    let forward = color.forward();

    if !ctx.attacks_only {
        if let Some(one) = from.offset(forward, 0) {
            if board.get_piece(one).is_none() {
                push_move(board, from, one, moves);
                if from.row == color.pawn_start_row() {
                    if let Some(two) = one.offset(forward, 0) {
                        if board.get_piece(two).is_none() {
                            push_move(board, from, two, moves);
                        }
                    }
                }
            }
        }
    }

    for d_col in [-1, 1] {
        let Some(to) = from.offset(forward, d_col) else {
            continue;
        };
        match board.get_piece(to) {
            Some(target) if target.color != color => push_move(board, from, to, moves),
            Some(_) => {}
            None if ctx.attacks_only => push_move(board, from, to, moves),
            None if ctx.en_passant == Some(to) => {
                if let Some(mv) = Move::en_passant(from, to, board) {
                    moves.push(mv);
                }
            }
            None => {}
        }
    }
}

fn slide(
    board: &Board,
    from: BoardCoordinate,
    color: Color,
    directions: &[(isize, isize)],
    moves: &mut Vec<Move>,
) {
    for &(d_row, d_col) in directions {
        let mut next = from.offset(d_row, d_col);
        while let Some(to) = next {
            match board.get_piece(to) {
                None => push_move(board, from, to, moves),
                Some(target) => {
                    if target.color != color {
                        push_move(board, from, to, moves);
                    }
                    break;
                }
            }
            next = to.offset(d_row, d_col);
        }
    }
}

fn jump(
    board: &Board,
    from: BoardCoordinate,
    color: Color,
    offsets: &[(isize, isize)],
    moves: &mut Vec<Move>,
) {
    for &(d_row, d_col) in offsets {
        if let Some(to) = from.offset(d_row, d_col) {
            if board.get_piece(to).map_or(true, |target| target.color != color) {
                push_move(board, from, to, moves);
            }
        }
    }
}

fn knight_moves(
    board: &Board,
    from: BoardCoordinate,
    piece: Piece,
    _ctx: GenContext,
    moves: &mut Vec<Move>,
) {
    jump(board, from, piece.color, &KNIGHT_OFFSETS, moves);
}

fn bishop_moves(
    board: &Board,
    from: BoardCoordinate,
    piece: Piece,
    _ctx: GenContext,
    moves: &mut Vec<Move>,
) {
    slide(board, from, piece.color, &BISHOP_DIRECTIONS, moves);
}

fn rook_moves(
    board: &Board,
    from: BoardCoordinate,
    piece: Piece,
    _ctx: GenContext,
    moves: &mut Vec<Move>,
) {
    slide(board, from, piece.color, &ROOK_DIRECTIONS, moves);
}

fn queen_moves(
    board: &Board,
    from: BoardCoordinate,
    piece: Piece,
    _ctx: GenContext,
    moves: &mut Vec<Move>,
) {
    slide(board, from, piece.color, &ROOK_DIRECTIONS, moves);
    slide(board, from, piece.color, &BISHOP_DIRECTIONS, moves);
}

fn king_moves(
    board: &Board,
    from: BoardCoordinate,
    piece: Piece,
    _ctx: GenContext,
    moves: &mut Vec<Move>,
) {
    jump(board, from, piece.color, &KING_OFFSETS, moves);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> BoardCoordinate {
        BoardCoordinate::from_algebraic(text).unwrap()
    }

    fn targets(moves: &[Move], from: &str) -> Vec<String> {
        let mut out: Vec<String> = moves
            .iter()
            .filter(|m| m.start == sq(from))
            .map(|m| m.end.to_string())
            .collect();
        out.sort();
        out
    }

    #[test]
    fn test_start_position_counts() {
        let board = Board::new();
        let generator = MoveGenerator::new();
        assert_eq!(generator.generate_moves(&board, Color::White, None).len(), 20);
        assert_eq!(generator.generate_moves(&board, Color::Black, None).len(), 20);
    }

    #[test]
    fn test_generation_is_row_major() {
        let board = Board::new();
        let moves = MoveGenerator::new().generate_moves(&board, Color::Black, None);
        let first = moves.first().unwrap();
        assert_eq!(first.start, sq("b8"));
        let last = moves.last().unwrap();
        assert_eq!(last.start, sq("h7"));
    }

    #[test]
    fn test_knight_in_corner() {
        let board = Board::from_fen_placement("8/8/8/8/8/8/8/N7").unwrap();
        let moves = MoveGenerator::new().generate_moves(&board, Color::White, None);
        assert_eq!(targets(&moves, "a1"), vec!["b3", "c2"]);
    }

    #[test]
    fn test_rook_ray_stops_at_pieces() {
        // White rook d4, friendly pawn d6, enemy pawn f4.
        let board = Board::from_fen_placement("8/8/3P4/8/3R1p2/8/8/8").unwrap();
        let moves = MoveGenerator::new().generate_moves(&board, Color::White, None);
        assert_eq!(
            targets(&moves, "d4"),
            vec!["a4", "b4", "c4", "d1", "d2", "d3", "d5", "e4", "f4"]
        );
        let capture = moves.iter().find(|m| m.end == sq("f4")).unwrap();
        assert!(capture.is_capture());
    }

    #[test]
    fn test_queen_combines_rays() {
        let board = Board::from_fen_placement("8/8/8/8/8/8/8/Q7").unwrap();
        let moves = MoveGenerator::new().generate_moves(&board, Color::White, None);
        assert_eq!(moves.len(), 21);
    }

    #[test]
    fn test_pawn_double_push_needs_clear_path() {
        let board = Board::from_fen_placement("8/8/8/8/8/4n3/4P3/8").unwrap();
        let moves = MoveGenerator::new().generate_moves(&board, Color::White, None);
        assert!(targets(&moves, "e2").is_empty());

        let board = Board::from_fen_placement("8/8/8/8/4n3/8/4P3/8").unwrap();
        let moves = MoveGenerator::new().generate_moves(&board, Color::White, None);
        assert_eq!(targets(&moves, "e2"), vec!["e3"]);
    }

    #[test]
    fn test_pawn_en_passant_only_on_target() {
        let board = Board::from_fen_placement("8/8/8/3pP3/8/8/8/8").unwrap();
        let generator = MoveGenerator::new();

        let without = generator.generate_moves(&board, Color::White, None);
        assert_eq!(targets(&without, "e5"), vec!["e6"]);

        let with = generator.generate_moves(&board, Color::White, Some(sq("d6")));
        assert_eq!(targets(&with, "e5"), vec!["d6", "e6"]);
        let ep = with.iter().find(|m| m.end == sq("d6")).unwrap();
        assert!(ep.is_en_passant);
    }

    #[test]
    fn test_pawn_attacks_cover_empty_diagonals() {
        let board = Board::from_fen_placement("8/8/8/8/8/8/4P3/8").unwrap();
        let attacks = MoveGenerator::new().generate_attacks(&board, Color::White);
        assert_eq!(targets(&attacks, "e2"), vec!["d3", "f3"]);
    }

    #[test]
    fn test_castle_moves_respect_attacks() {
        let board = Board::from_fen_placement("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        let generator = MoveGenerator::new();

        let mut moves = Vec::new();
        generator.generate_castle_moves(
            &board,
            sq("e1"),
            Color::White,
            CastlingRights::all(),
            |_| false,
            &mut moves,
        );
        assert_eq!(targets(&moves, "e1"), vec!["c1", "g1"]);
        assert!(moves.iter().all(|m| m.is_castle));

        let mut moves = Vec::new();
        generator.generate_castle_moves(
            &board,
            sq("e1"),
            Color::White,
            CastlingRights::all(),
            |pos| pos == sq("f1"),
            &mut moves,
        );
        assert_eq!(targets(&moves, "e1"), vec!["c1"]);

        // b1 may be attacked, only the king's path matters.
        let mut moves = Vec::new();
        generator.generate_castle_moves(
            &board,
            sq("e1"),
            Color::White,
            CastlingRights::all(),
            |pos| pos == sq("b1"),
            &mut moves,
        );
        assert_eq!(targets(&moves, "e1"), vec!["c1", "g1"]);
    }

    #[test]
    fn test_castle_requires_rights_and_empty_path() {
        let board = Board::from_fen_placement("8/8/8/8/8/8/8/RN2K2R").unwrap();
        let mut rights = CastlingRights::all();
        rights.revoke_king_side(Color::White);

        let mut moves = Vec::new();
        MoveGenerator::new().generate_castle_moves(
            &board,
            sq("e1"),
            Color::White,
            rights,
            |_| false,
            &mut moves,
        );
        assert!(moves.is_empty());
    }
}
