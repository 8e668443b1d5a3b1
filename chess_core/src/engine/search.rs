use crate::engine::config::EngineConfig;
use crate::engine::eval::MaterialEvaluator;
use crate::engine::{Evaluator, SearchStats, Searcher};
use crate::logic::game::GameState;
use crate::logic::moves::Move;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Uniform pick, used when the search comes back empty.
pub fn find_random_move<R: Rng + ?Sized>(valid_moves: &[Move], rng: &mut R) -> Option<Move> {
    valid_moves.choose(rng).copied()
}

/// Fixed-depth negamax over the live position, with optional alpha-beta pruning.
pub struct NegamaxEngine {
    config: Arc<EngineConfig>,
    evaluator: MaterialEvaluator,
    rng: StdRng,
    nodes_searched: u32,
}

impl NegamaxEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: MaterialEvaluator::new(config.clone()),
            rng: Self::make_rng(&config),
            config,
            nodes_searched: 0,
        }
    }

    pub fn update_config(&mut self, config: Arc<EngineConfig>) {
        if config.seed != self.config.seed {
            self.rng = Self::make_rng(&config);
        }
        self.evaluator = MaterialEvaluator::new(config.clone());
        self.config = config;
    }

    fn make_rng(config: &EngineConfig) -> StdRng {
        config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
    }

    #[must_use]
    pub const fn nodes_searched(&self) -> u32 {
        self.nodes_searched
    }

    /// Best move for the side to move, `None` when every move loses to mate
    /// (or the list is empty). Callers then fall back to `random_move`.
    pub fn find_best_move(&mut self, game: &mut GameState, valid_moves: &[Move]) -> Option<Move> {
        self.search(game, valid_moves).map(|(mv, _)| mv)
    }

    pub fn random_move(&mut self, valid_moves: &[Move]) -> Option<Move> {
        find_random_move(valid_moves, &mut self.rng)
    }

    /// Runs one search and reports statistics even when no move is chosen.
    pub fn analyze(
        &mut self,
        game: &mut GameState,
        valid_moves: &[Move],
    ) -> (Option<Move>, SearchStats) {
        self.nodes_searched = 0;
        let start_time = Self::now();
        let depth = self.config.depth.max(1);

        if valid_moves.is_empty() {
            let stats = SearchStats {
                depth,
                ..SearchStats::default()
            };
            return (None, stats);
        }

        let mut root_moves = valid_moves.to_vec();
        root_moves.shuffle(&mut self.rng);

        let turn_multiplier = if game.white_to_move() { 1 } else { -1 };
        let mate = self.config.mate_score;
        let (score, best_move) =
            self.negamax(game, &root_moves, depth, -mate, mate, turn_multiplier);

        let elapsed = (Self::now() - start_time).max(0.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let stats = SearchStats {
            depth,
            nodes: self.nodes_searched(),
            score,
            time_ms: elapsed as u64,
        };

        match best_move {
            Some(mv) => log::debug!(
                "depth {} best {mv} score {score} nodes {} in {}ms",
                stats.depth,
                stats.nodes,
                stats.time_ms
            ),
            None => log::debug!(
                "depth {} found nothing above {}, nodes {}",
                stats.depth,
                -mate,
                stats.nodes
            ),
        }

        (best_move, stats)
    }

    fn now() -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            if let Some(window) = web_sys::window() {
                return window.performance().map(|p| p.now()).unwrap_or(0.0);
            }
            let global = js_sys::global();
            if let Ok(worker) = global.dyn_into::<web_sys::WorkerGlobalScope>() {
                return worker.performance().map(|p| p.now()).unwrap_or(0.0);
            }
            0.0
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::time::{SystemTime, UNIX_EPOCH};
            let since_the_epoch = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default();
            #[allow(clippy::cast_precision_loss)]
            let time_ms = (since_the_epoch.as_secs() as f64).mul_add(
                1000.0,
                f64::from(since_the_epoch.subsec_nanos()) / 1_000_000.0,
            );
            time_ms
        }
    }

    /// Score of the node from the side to move's point of view, and the move that
    /// achieved it. `moves` are the legal moves of the node.
    fn negamax(
        &mut self,
        game: &mut GameState,
        moves: &[Move],
        depth: u8,
        mut alpha: i32,
        beta: i32,
        turn_multiplier: i32,
    ) -> (i32, Option<Move>) {
        self.nodes_searched += 1;

        if depth == 0 {
            return (turn_multiplier * self.evaluator.evaluate(game.board()), None);
        }

        if moves.is_empty() {
            let score = if game.in_check() {
                -self.config.mate_score
            } else {
                self.config.stalemate_score
            };
            return (score, None);
        }

        let mut best_score = -self.config.mate_score;
        let mut best_move = None;

        for mv in moves {
            game.make_move(mv);
            // Leaves are scored on material alone, so their replies are never needed.
            let replies = if depth > 1 {
                game.get_valid_moves()
            } else {
                Vec::new()
            };
            let (child_score, _) =
                self.negamax(game, &replies, depth - 1, -beta, -alpha, -turn_multiplier);
            game.undo_move();

            let score = -child_score;
            if score > best_score {
                best_score = score;
                best_move = Some(*mv);
            }

            alpha = alpha.max(best_score);
            if self.config.alpha_beta && alpha >= beta {
                break;
            }
        }

        (best_score, best_move)
    }
}

impl Searcher for NegamaxEngine {
    fn search(
        &mut self,
        game_state: &mut GameState,
        valid_moves: &[Move],
    ) -> Option<(Move, SearchStats)> {
        let (best_move, stats) = self.analyze(game_state, valid_moves);
        best_move.map(|mv| (mv, stats))
    }
}
