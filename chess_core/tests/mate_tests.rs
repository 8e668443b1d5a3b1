#[cfg(test)]
mod tests {
    use chess_core::engine::config::EngineConfig;
    use chess_core::engine::search::NegamaxEngine;
    use chess_core::engine::Searcher;
    use chess_core::logic::board::{BoardCoordinate, Color};
    use chess_core::logic::game::{GameState, GameStatus};
    use std::sync::Arc;

    fn sq(text: &str) -> BoardCoordinate {
        BoardCoordinate::from_algebraic(text).unwrap()
    }

    fn engine(depth: u8) -> NegamaxEngine {
        NegamaxEngine::new(Arc::new(EngineConfig {
            depth,
            seed: Some(2024),
            ..EngineConfig::default()
        }))
    }

    #[test]
    fn test_fools_mate_through_public_api() {
        let mut game = GameState::new();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            game.try_make_move(sq(from), sq(to)).unwrap();
        }
        assert!(game.get_valid_moves().is_empty());
        assert_eq!(game.status(), GameStatus::Checkmate(Color::Black));
    }

    #[test]
    fn test_back_rank_mate_in_1_white() {
        let mut game = GameState::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let moves = game.get_valid_moves();
        let (mv, stats) = engine(3).search(&mut game, &moves).unwrap();
        assert_eq!(mv.to_string(), "a1a8");
        assert_eq!(stats.score, 1000);

        game.make_move(&mv);
        assert!(game.get_valid_moves().is_empty());
        assert!(game.is_checkmate());
    }

    #[test]
    fn test_back_rank_mate_in_1_black() {
        let mut game = GameState::from_fen("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1").unwrap();
        let moves = game.get_valid_moves();
        let (mv, stats) = engine(2).search(&mut game, &moves).unwrap();
        assert_eq!(mv.to_string(), "a8a1");
        assert_eq!(stats.score, 1000);
    }

    #[test]
    fn test_avoids_stalemating_when_winning() {
        // Qf7 stalemates, Qf8 mates.
        let mut game = GameState::from_fen("7k/8/6K1/8/8/8/8/5Q2 w - - 0 1").unwrap();
        let moves = game.get_valid_moves();
        let mv = engine(2).find_best_move(&mut game, &moves).unwrap();
        game.make_move(&mv);
        game.get_valid_moves();
        assert!(!game.is_stalemate());
    }
}
