use crate::engine::config::EngineConfig;
use crate::engine::Evaluator;
use crate::logic::board::{Board, Color};
use std::sync::Arc;

pub struct MaterialEvaluator {
    config: Arc<EngineConfig>,
}

impl MaterialEvaluator {
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        board
            .pieces()
            .map(|(_, piece)| {
                let value = self.config.piece_value(piece.piece_type);
                match piece.color {
                    Color::White => value,
                    Color::Black => -value,
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluator() -> MaterialEvaluator {
        MaterialEvaluator::new(Arc::new(EngineConfig::default()))
    }

    #[test]
    fn test_start_position_is_balanced() {
        assert_eq!(evaluator().evaluate(&Board::new()), 0);
    }

    #[test]
    fn test_material_difference() {
        // White: queen + pawn, black: rook + knight. 11 - 8.
        let board = Board::from_fen_placement("4k3/8/3rn3/8/8/4P3/3Q4/4K3").unwrap();
        assert_eq!(evaluator().evaluate(&board), 3);
    }

    #[test]
    fn test_configured_values() {
        let config = EngineConfig {
            val_pawn: 2,
            ..EngineConfig::default()
        };
        let eval = MaterialEvaluator::new(Arc::new(config));
        let board = Board::from_fen_placement("4k3/pppp4/8/8/8/8/8/4K3").unwrap();
        assert_eq!(eval.evaluate(&board), -8);
    }
}
