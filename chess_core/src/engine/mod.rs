use crate::logic::board::Board;
use crate::logic::game::GameState;
use crate::logic::moves::Move;
use serde::{Deserialize, Serialize};

pub mod config;
pub mod eval;
pub mod search;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u32,
    pub score: i32,
    pub time_ms: u64,
}

pub trait Evaluator {
    /// Material balance, white minus black.
    fn evaluate(&self, board: &Board) -> i32;
}

pub trait Searcher {
    /// Picks a move out of `valid_moves`, which must be the legal moves of `game_state`.
    /// The position is walked in place and left as it was found.
    fn search(
        &mut self,
        game_state: &mut GameState,
        valid_moves: &[Move],
    ) -> Option<(Move, SearchStats)>;
}
