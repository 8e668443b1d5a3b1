use crate::logic::board::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastlingRights {
    #[must_use]
    pub const fn all() -> Self {
        Self {
            white_king_side: true,
            white_queen_side: true,
            black_king_side: true,
            black_queen_side: true,
        }
    }

    #[must_use]
    pub const fn none() -> Self {
        Self {
            white_king_side: false,
            white_queen_side: false,
            black_king_side: false,
            black_queen_side: false,
        }
    }

    #[must_use]
    pub const fn king_side(self, color: Color) -> bool {
        match color {
            Color::White => self.white_king_side,
            Color::Black => self.black_king_side,
        }
    }

    #[must_use]
    pub const fn queen_side(self, color: Color) -> bool {
        match color {
            Color::White => self.white_queen_side,
            Color::Black => self.black_queen_side,
        }
    }

    pub fn revoke_king_side(&mut self, color: Color) {
        match color {
            Color::White => self.white_king_side = false,
            Color::Black => self.black_king_side = false,
        }
    }

    pub fn revoke_queen_side(&mut self, color: Color) {
        match color {
            Color::White => self.white_queen_side = false,
            Color::Black => self.black_queen_side = false,
        }
    }

    pub fn revoke_all(&mut self, color: Color) {
        self.revoke_king_side(color);
        self.revoke_queen_side(color);
    }

    /// Castling field of a FEN string (`KQkq`, `-` when empty).
    #[must_use]
    pub fn to_fen(self) -> String {
        let mut out = String::new();
        for (flag, ch) in [
            (self.white_king_side, 'K'),
            (self.white_queen_side, 'Q'),
            (self.black_king_side, 'k'),
            (self.black_queen_side, 'q'),
        ] {
            if flag {
                out.push(ch);
            }
        }
        if out.is_empty() {
            out.push('-');
        }
        out
    }

    #[must_use]
    pub fn from_fen(field: &str) -> Option<Self> {
        let mut rights = Self::none();
        if field == "-" {
            return Some(rights);
        }
        for ch in field.chars() {
            match ch {
                'K' => rights.white_king_side = true,
                'Q' => rights.white_queen_side = true,
                'k' => rights.black_king_side = true,
                'q' => rights.black_queen_side = true,
                _ => return None,
            }
        }
        Some(rights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revoke_is_per_color() {
        let mut rights = CastlingRights::all();
        rights.revoke_all(Color::White);
        assert!(!rights.king_side(Color::White));
        assert!(!rights.queen_side(Color::White));
        assert!(rights.king_side(Color::Black));
        assert!(rights.queen_side(Color::Black));

        rights.revoke_queen_side(Color::Black);
        assert_eq!(rights.to_fen(), "k");
    }

    #[test]
    fn test_fen_field() {
        assert_eq!(CastlingRights::all().to_fen(), "KQkq");
        assert_eq!(CastlingRights::none().to_fen(), "-");
        assert_eq!(CastlingRights::from_fen("Kq").map(CastlingRights::to_fen), Some("Kq".to_string()));
        assert_eq!(CastlingRights::from_fen("-"), Some(CastlingRights::none()));
        assert_eq!(CastlingRights::from_fen("KX"), None);
    }
}
