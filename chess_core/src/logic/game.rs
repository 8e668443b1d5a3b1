use crate::logic::board::{Board, BoardCoordinate, Color, Piece, PieceType};
use crate::logic::castling::CastlingRights;
use crate::logic::generator::MoveGenerator;
use crate::logic::moves::Move;
use crate::logic::rules::{is_in_check, is_square_attacked, MoveError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Checkmate(Color), // Winner
    Stalemate,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected 4 to 6 fields, found {0}")]
    FieldCount(usize),
    #[error("invalid piece placement: {0}")]
    Placement(String),
    #[error("invalid side to move: {0}")]
    SideToMove(String),
    #[error("invalid castling field: {0}")]
    Castling(String),
    #[error("invalid en passant square: {0}")]
    EnPassant(String),
    #[error("invalid move counter: {0}")]
    Counter(String),
    #[error("no {0:?} king on the board")]
    MissingKing(Color),
}

/// The position plus everything needed to take moves back.
///
/// `castle_rights_log` and `en_passant_log` always hold one more entry than
/// `move_log`; entry 0 is the state the game started from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    turn: Color,
    king_locations: [BoardCoordinate; 2],
    en_passant: Option<BoardCoordinate>,
    en_passant_log: Vec<Option<BoardCoordinate>>,
    castling_rights: CastlingRights,
    castle_rights_log: Vec<CastlingRights>,
    move_log: Vec<Move>,
    checkmate: bool,
    stalemate: bool,
    initial_halfmove: u32,
    initial_fullmove: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub const START_FEN: &'static str =
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[must_use]
    pub fn new() -> Self {
        let white_king = BoardCoordinate { row: 7, col: 4 };
        let black_king = BoardCoordinate { row: 0, col: 4 };
        Self {
            board: Board::new(),
            turn: Color::White,
            king_locations: [white_king, black_king],
            en_passant: None,
            en_passant_log: vec![None],
            castling_rights: CastlingRights::all(),
            castle_rights_log: vec![CastlingRights::all()],
            move_log: Vec::new(),
            checkmate: false,
            stalemate: false,
            initial_halfmove: 0,
            initial_fullmove: 1,
        }
    }

    /// Loads a position. The two move counters are optional.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(FenError::FieldCount(fields.len()));
        }

        let placement = fields.first().copied().unwrap_or_default();
        let board = Board::from_fen_placement(placement)
            .ok_or_else(|| FenError::Placement(placement.to_string()))?;

        let side = fields.get(1).copied().unwrap_or_default();
        let turn = match side {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };

        let castling = fields.get(2).copied().unwrap_or_default();
        let castling_rights = CastlingRights::from_fen(castling)
            .ok_or_else(|| FenError::Castling(castling.to_string()))?;

        let ep_field = fields.get(3).copied().unwrap_or_default();
        let en_passant = if ep_field == "-" {
            None
        } else {
            // Rank 6 when white is to move, rank 3 when black is.
            let expected_row = match turn {
                Color::White => 2,
                Color::Black => 5,
            };
            // The target is empty with the pawn that just double-stepped right past it.
            let passed_pawn = Piece::new(PieceType::Pawn, turn.opposite());
            let square = BoardCoordinate::from_algebraic(ep_field)
                .filter(|sq| sq.row == expected_row)
                .filter(|sq| board.get_piece(*sq).is_none())
                .filter(|sq| {
                    sq.offset(turn.opposite().forward(), 0)
                        .and_then(|pawn_sq| board.get_piece(pawn_sq))
                        == Some(passed_pawn)
                })
                .ok_or_else(|| FenError::EnPassant(ep_field.to_string()))?;
            Some(square)
        };

        let counter = |index: usize, default: u32| -> Result<u32, FenError> {
            fields.get(index).map_or(Ok(default), |text| {
                text.parse::<u32>()
                    .map_err(|_| FenError::Counter((*text).to_string()))
            })
        };
        let initial_halfmove = counter(4, 0)?;
        let initial_fullmove = counter(5, 1)?.max(1);

        let white_king = board
            .find_king(Color::White)
            .ok_or(FenError::MissingKing(Color::White))?;
        let black_king = board
            .find_king(Color::Black)
            .ok_or(FenError::MissingKing(Color::Black))?;

        Ok(Self {
            board,
            turn,
            king_locations: [white_king, black_king],
            en_passant,
            en_passant_log: vec![en_passant],
            castling_rights,
            castle_rights_log: vec![castling_rights],
            move_log: Vec::new(),
            checkmate: false,
            stalemate: false,
            initial_halfmove,
            initial_fullmove,
        })
    }

    #[must_use]
    pub fn to_fen(&self) -> String {
        let side = match self.turn {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let en_passant = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());
        format!(
            "{} {} {} {} {} {}",
            self.board.to_fen_placement(),
            side,
            self.castling_rights.to_fen(),
            en_passant,
            self.halfmove_clock(),
            self.fullmove_number()
        )
    }

    /// Plies since the last pawn move or capture.
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        let mut count = 0;
        for mv in self.move_log.iter().rev() {
            if mv.piece_moved.piece_type == PieceType::Pawn || mv.is_capture() {
                return count;
            }
            count += 1;
        }
        self.initial_halfmove + count
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        let started_black = (self.turn == Color::Black) == (self.move_log.len() % 2 == 0);
        let plies = self.move_log.len() + usize::from(started_black);
        self.initial_fullmove + u32::try_from(plies / 2).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub const fn turn(&self) -> Color {
        self.turn
    }

    #[must_use]
    pub const fn white_to_move(&self) -> bool {
        matches!(self.turn, Color::White)
    }

    #[must_use]
    pub const fn king_location(&self, color: Color) -> BoardCoordinate {
        self.king_locations[color.index()]
    }

    #[must_use]
    pub const fn en_passant_target(&self) -> Option<BoardCoordinate> {
        self.en_passant
    }

    #[must_use]
    pub const fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[must_use]
    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    /// Only meaningful right after `get_valid_moves`.
    #[must_use]
    pub const fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    /// Only meaningful right after `get_valid_moves`.
    #[must_use]
    pub const fn is_stalemate(&self) -> bool {
        self.stalemate
    }

    /// Reads the terminal flags, so call `get_valid_moves` first.
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        if self.checkmate {
            GameStatus::Checkmate(self.turn.opposite())
        } else if self.stalemate {
            GameStatus::Stalemate
        } else {
            GameStatus::Playing
        }
    }

    /// Applies `mv` without checking legality.
    pub fn make_move(&mut self, mv: &Move) {
        let mover = mv.piece_moved;

        self.board.set_piece(mv.start, None);
        let placed = if mv.is_promotion {
            Piece::new(PieceType::Queen, mover.color)
        } else {
            mover
        };
        self.board.set_piece(mv.end, Some(placed));

        if mover.piece_type == PieceType::King {
            self.king_locations[mover.color.index()] = mv.end;
        }

        if mv.is_en_passant {
            self.board.set_piece(mv.en_passant_square(), None);
        }

        if mv.is_castle {
            let (rook_from, rook_to) = mv.castle_rook_squares();
            let rook = self.board.take_piece(rook_from);
            self.board.set_piece(rook_to, rook);
        }

        self.en_passant = if mover.piece_type == PieceType::Pawn
            && mv.start.row.abs_diff(mv.end.row) == 2
        {
            Some(BoardCoordinate {
                row: (mv.start.row + mv.end.row) / 2,
                col: mv.start.col,
            })
        } else {
            None
        };

        self.update_castling_rights(mv);

        self.move_log.push(*mv);
        self.castle_rights_log.push(self.castling_rights);
        self.en_passant_log.push(self.en_passant);
        self.turn = self.turn.opposite();
        self.checkmate = false;
        self.stalemate = false;
    }

    // A king move drops both rights. Anything leaving or landing on a rook corner
    // drops the right tied to that corner.
    fn update_castling_rights(&mut self, mv: &Move) {
        if mv.piece_moved.piece_type == PieceType::King {
            self.castling_rights.revoke_all(mv.piece_moved.color);
        }
        for square in [mv.start, mv.end] {
            for color in [Color::White, Color::Black] {
                if square.row != color.back_rank() {
                    continue;
                }
                match square.col {
                    0 => self.castling_rights.revoke_queen_side(color),
                    7 => self.castling_rights.revoke_king_side(color),
                    _ => {}
                }
            }
        }
    }

    /// Takes back the last move. `None` when there is nothing to undo.
    pub fn undo_move(&mut self) -> Option<Move> {
        let mv = self.move_log.pop()?;
        self.turn = self.turn.opposite();

        self.board.set_piece(mv.start, Some(mv.piece_moved));
        if mv.is_en_passant {
            self.board.set_piece(mv.end, None);
            self.board.set_piece(mv.en_passant_square(), mv.piece_captured);
        } else {
            self.board.set_piece(mv.end, mv.piece_captured);
        }

        if mv.piece_moved.piece_type == PieceType::King {
            self.king_locations[mv.piece_moved.color.index()] = mv.start;
        }

        if mv.is_castle {
            let (rook_from, rook_to) = mv.castle_rook_squares();
            let rook = self.board.take_piece(rook_to);
            self.board.set_piece(rook_from, rook);
        }

        self.castle_rights_log.pop();
        self.castling_rights = self.castle_rights_log.last().copied().unwrap_or_default();
        self.en_passant_log.pop();
        self.en_passant = self.en_passant_log.last().copied().flatten();

        self.checkmate = false;
        self.stalemate = false;
        Some(mv)
    }

    /// Legal moves for the side to move. Also refreshes the checkmate and
    /// stalemate flags.
    pub fn get_valid_moves(&mut self) -> Vec<Move> {
        let saved_en_passant = self.en_passant;
        let saved_rights = self.castling_rights;
        let us = self.turn;
        let generator = MoveGenerator::new();

        let pseudo_legal = generator.generate_moves(&self.board, us, self.en_passant);
        let mut moves = Vec::with_capacity(pseudo_legal.len());
        for mv in pseudo_legal {
            self.make_move(&mv);
            if !is_in_check(&self.board, self.king_location(us), us) {
                moves.push(mv);
            }
            self.undo_move();
        }

        let board = &self.board;
        generator.generate_castle_moves(
            board,
            self.king_location(us),
            us,
            self.castling_rights,
            |square| is_square_attacked(board, square, us.opposite()),
            &mut moves,
        );

        if moves.is_empty() {
            if self.in_check() {
                self.checkmate = true;
                log::debug!("{us:?} is checkmated after {} plies", self.move_log.len());
            } else {
                self.stalemate = true;
                log::debug!("{us:?} is stalemated after {} plies", self.move_log.len());
            }
        } else {
            self.checkmate = false;
            self.stalemate = false;
        }

        self.en_passant = saved_en_passant;
        self.castling_rights = saved_rights;
        moves
    }

    #[must_use]
    pub fn in_check(&self) -> bool {
        is_in_check(&self.board, self.king_location(self.turn), self.turn)
    }

    /// True if the opponent of the side to move attacks `square`.
    #[must_use]
    pub fn square_under_attack(&self, square: BoardCoordinate) -> bool {
        is_square_attacked(&self.board, square, self.turn.opposite())
    }

    /// Matches a two-square selection against the legal moves.
    pub fn find_valid_move(
        &mut self,
        from: BoardCoordinate,
        to: BoardCoordinate,
    ) -> Result<Move, MoveError> {
        let valid = self.get_valid_moves();
        if valid.is_empty() {
            return Err(MoveError::GameOver);
        }
        let piece = self
            .board
            .get_piece(from)
            .ok_or(MoveError::NoPieceAtSource)?;
        if piece.color != self.turn {
            return Err(MoveError::NotYourTurn);
        }
        let candidate = Move::new(from, to, &self.board).ok_or(MoveError::NoPieceAtSource)?;
        valid
            .into_iter()
            .find(|mv| *mv == candidate)
            .ok_or(MoveError::IllegalMove)
    }

    pub fn try_make_move(
        &mut self,
        from: BoardCoordinate,
        to: BoardCoordinate,
    ) -> Result<Move, MoveError> {
        let mv = self.find_valid_move(from, to)?;
        self.make_move(&mv);
        Ok(mv)
    }
}
