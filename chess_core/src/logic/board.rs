use serde::{Deserialize, Serialize};
use std::fmt;

pub const BOARD_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => 1,
        }
    }

    /// Row direction a pawn of this colour advances in.
    #[must_use]
    pub const fn forward(self) -> isize {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    #[must_use]
    pub const fn back_rank(self) -> usize {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }

    #[must_use]
    pub const fn pawn_start_row(self) -> usize {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    #[must_use]
    pub const fn promotion_row(self) -> usize {
        self.opposite().back_rank()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceType {
    pub const ALL: [Self; 6] = [
        Self::Pawn,
        Self::Knight,
        Self::Bishop,
        Self::Rook,
        Self::Queen,
        Self::King,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase FEN letter.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_lowercase() {
            'p' => Some(Self::Pawn),
            'n' => Some(Self::Knight),
            'b' => Some(Self::Bishop),
            'r' => Some(Self::Rook),
            'q' => Some(Self::Queen),
            'k' => Some(Self::King),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    #[must_use]
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Self { piece_type, color }
    }

    /// FEN letter, uppercase for white.
    #[must_use]
    pub const fn symbol(self) -> char {
        let c = self.piece_type.symbol();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        let piece_type = PieceType::from_symbol(symbol)?;
        let color = if symbol.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Self { piece_type, color })
    }
}

/// A square on the board. Row 0 is black's back rank, column 0 is the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardCoordinate {
    pub row: usize,
    pub col: usize,
}

impl BoardCoordinate {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Steps by a signed offset, `None` when the result leaves the board.
    #[must_use]
    pub const fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row as isize + d_row;
        let col = self.col as isize + d_col;
        if row < 0 || col < 0 {
            return None;
        }
        Self::new(row as usize, col as usize)
    }

    #[must_use]
    pub const fn file(self) -> char {
        (b'a' + self.col as u8) as char
    }

    #[must_use]
    pub const fn rank(self) -> char {
        (b'8' - self.row as u8) as char
    }

    /// Parses `e4`-style notation.
    #[must_use]
    pub fn from_algebraic(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank)
        {
            return None;
        }
        let col = file as usize - 'a' as usize;
        let row = '8' as usize - rank as usize;
        Self::new(row, col)
    }
}

impl fmt::Display for BoardCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    // 8 rows (0..7), 8 columns (0..7)
    // (0,0) is a8, (7,7) is h1
    pub grid: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_initial_position();
        board
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            grid: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    fn setup_initial_position(&mut self) {
        self.setup_pieces(Color::Black);
        self.setup_pieces(Color::White);
    }

    fn setup_pieces(&mut self, color: Color) {
        let back_row = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        for (col, &piece_type) in back_row.iter().enumerate() {
            self.grid[color.back_rank()][col] = Some(Piece::new(piece_type, color));
            self.grid[color.pawn_start_row()][col] = Some(Piece::new(PieceType::Pawn, color));
        }
    }

    #[must_use]
    pub const fn get_piece(&self, pos: BoardCoordinate) -> Option<Piece> {
        self.grid[pos.row][pos.col]
    }

    pub fn set_piece(&mut self, pos: BoardCoordinate, piece: Option<Piece>) {
        self.grid[pos.row][pos.col] = piece;
    }

    pub fn take_piece(&mut self, pos: BoardCoordinate) -> Option<Piece> {
        self.grid[pos.row][pos.col].take()
    }

    /// All occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (BoardCoordinate, Piece)> + '_ {
        self.grid.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                cell.map(|piece| (BoardCoordinate { row, col }, piece))
            })
        })
    }

    #[must_use]
    pub fn find_king(&self, color: Color) -> Option<BoardCoordinate> {
        self.pieces()
            .find(|(_, p)| p.color == color && p.piece_type == PieceType::King)
            .map(|(pos, _)| pos)
    }

    /// Piece-placement field of a FEN string.
    #[must_use]
    pub fn to_fen_placement(&self) -> String {
        let mut fen = String::new();
        for (row, cells) in self.grid.iter().enumerate() {
            let mut empty_count = 0;
            for cell in cells {
                if let Some(piece) = cell {
                    if empty_count > 0 {
                        fen.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    fen.push(piece.symbol());
                } else {
                    empty_count += 1;
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if row + 1 < BOARD_SIZE {
                fen.push('/');
            }
        }
        fen
    }

    /// Parses the piece-placement field of a FEN string. Returns `None` on malformed input.
    #[must_use]
    pub fn from_fen_placement(placement: &str) -> Option<Self> {
        let mut board = Self::empty();
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != BOARD_SIZE {
            return None;
        }

        for (row, text) in rows.iter().enumerate() {
            let mut col = 0;
            for ch in text.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    col += skip as usize;
                } else {
                    let pos = BoardCoordinate::new(row, col)?;
                    board.set_piece(pos, Some(Piece::from_symbol(ch)?));
                    col += 1;
                }
                if col > BOARD_SIZE {
                    return None;
                }
            }
            if col != BOARD_SIZE {
                return None;
            }
        }

        Some(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> BoardCoordinate {
        BoardCoordinate::from_algebraic(text).unwrap()
    }

    #[test]
    fn test_initial_setup() {
        let board = Board::new();

        let king = board.get_piece(sq("e1")).unwrap();
        assert_eq!(king.piece_type, PieceType::King);
        assert_eq!(king.color, Color::White);

        let queen = board.get_piece(sq("d8")).unwrap();
        assert_eq!(queen.piece_type, PieceType::Queen);
        assert_eq!(queen.color, Color::Black);

        assert_eq!(board.pieces().count(), 32);
        assert!(board.get_piece(sq("e4")).is_none());
    }

    #[test]
    fn test_coordinates_follow_board_orientation() {
        let a8 = BoardCoordinate::new(0, 0).unwrap();
        let h1 = BoardCoordinate::new(7, 7).unwrap();
        assert_eq!(a8.to_string(), "a8");
        assert_eq!(h1.to_string(), "h1");
        assert_eq!(sq("e2"), BoardCoordinate { row: 6, col: 4 });
        assert!(BoardCoordinate::new(8, 0).is_none());
        assert!(BoardCoordinate::from_algebraic("i1").is_none());
        assert!(BoardCoordinate::from_algebraic("a9").is_none());
    }

    #[test]
    fn test_offset_stays_on_board() {
        let a1 = sq("a1");
        assert_eq!(a1.offset(-1, 1), Some(sq("b2")));
        assert!(a1.offset(1, 0).is_none());
        assert!(a1.offset(0, -1).is_none());
    }

    #[test]
    fn test_fen_placement() {
        let board = Board::new();
        let placement = board.to_fen_placement();
        assert_eq!(placement, "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
        assert_eq!(Board::from_fen_placement(&placement), Some(board));
    }

    #[test]
    fn test_fen_placement_rejects_bad_rows() {
        assert!(Board::from_fen_placement("8/8/8/8/8/8/8").is_none());
        assert!(Board::from_fen_placement("9/8/8/8/8/8/8/8").is_none());
        assert!(Board::from_fen_placement("7x/8/8/8/8/8/8/8").is_none());
        assert!(Board::from_fen_placement("ppppppppp/8/8/8/8/8/8/8").is_none());
    }

    #[test]
    fn test_find_king() {
        let board = Board::new();
        assert_eq!(board.find_king(Color::White), Some(sq("e1")));
        assert_eq!(board.find_king(Color::Black), Some(sq("e8")));
        assert_eq!(Board::empty().find_king(Color::White), None);
    }
}
