use crate::engine::config::EngineConfig;
use crate::engine::search::NegamaxEngine;
use crate::engine::SearchStats;
use crate::logic::game::GameState;
use crate::logic::moves::Move;
use gloo_worker::{HandlerId, Worker, WorkerScope};
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use thiserror::Error;

/// Chosen move (if any) and the statistics of the search that produced it.
pub type SearchResult = (Option<Move>, SearchStats);

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("failed to start search thread: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("search thread exited without a result")]
    Disconnected,
}

#[derive(Serialize, Deserialize)]
pub enum Input {
    ComputeMove(GameState, EngineConfig),
}

#[derive(Serialize, Deserialize)]
pub enum Output {
    SearchComplete(Option<Move>, SearchStats),
}

/// Searches an owned copy of a position from its own legal moves.
pub fn compute_move(engine: &mut NegamaxEngine, mut game_state: GameState) -> SearchResult {
    let valid_moves = game_state.get_valid_moves();
    engine.analyze(&mut game_state, &valid_moves)
}

/// One search running on a background thread. Dropping the handle discards the
/// result; the search itself always runs to completion.
pub struct SearchHandle {
    receiver: Receiver<SearchResult>,
}

impl SearchHandle {
    pub fn spawn(game_state: GameState, config: EngineConfig) -> Result<Self, WorkerError> {
        let (sender, receiver) = mpsc::channel();
        thread::Builder::new()
            .name("search".to_string())
            .spawn(move || {
                let mut engine = NegamaxEngine::new(Arc::new(config));
                let result = compute_move(&mut engine, game_state);
                // The receiver may already be gone.
                let _ = sender.send(result);
            })?;
        Ok(Self { receiver })
    }

    /// `Ok(None)` while the search is still running.
    pub fn try_result(&self) -> Result<Option<SearchResult>, WorkerError> {
        match self.receiver.try_recv() {
            Ok(result) => Ok(Some(result)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(WorkerError::Disconnected),
        }
    }

    pub fn wait(self) -> Result<SearchResult, WorkerError> {
        self.receiver.recv().map_err(|_| WorkerError::Disconnected)
    }
}

pub struct GameWorker {
    engine: Option<NegamaxEngine>,
}

impl Worker for GameWorker {
    type Input = Input;
    type Message = ();
    type Output = Output;

    fn create(_scope: &WorkerScope<Self>) -> Self {
        Self { engine: None }
    }

    fn update(&mut self, _scope: &WorkerScope<Self>, _msg: Self::Message) {}

    fn received(&mut self, scope: &WorkerScope<Self>, msg: Self::Input, id: HandlerId) {
        match msg {
            Input::ComputeMove(game_state, config) => {
                let config = Arc::new(config);

                if let Some(engine) = &mut self.engine {
                    engine.update_config(config.clone());
                }
                let engine = self
                    .engine
                    .get_or_insert_with(|| NegamaxEngine::new(config));

                let (best_move, stats) = compute_move(engine, game_state);
                scope.respond(id, Output::SearchComplete(best_move, stats));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(depth: u8) -> EngineConfig {
        EngineConfig {
            depth,
            seed: Some(17),
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_handle_returns_legal_move() {
        let mut game = GameState::new();
        let legal = game.get_valid_moves();

        let handle = SearchHandle::spawn(game.clone(), config(2)).unwrap();
        let (best, stats) = handle.wait().unwrap();
        assert!(legal.contains(&best.unwrap()));
        assert_eq!(stats.depth, 2);
        assert!(stats.nodes > 0);
    }

    #[test]
    fn test_try_result_eventually_ready() {
        let handle = SearchHandle::spawn(GameState::new(), config(1)).unwrap();
        let result = loop {
            if let Some(result) = handle.try_result().unwrap() {
                break result;
            }
            thread::yield_now();
        };
        assert!(result.0.is_some());
    }

    #[test]
    fn test_compute_move_on_finished_game() {
        let game = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let mut engine = NegamaxEngine::new(Arc::new(config(3)));
        let (best, _) = compute_move(&mut engine, game);
        assert!(best.is_none());
    }

    #[test]
    fn test_messages_cross_serde() {
        let input = Input::ComputeMove(GameState::new(), config(2));
        let json = serde_json::to_string(&input).unwrap();
        let Input::ComputeMove(game, restored) = serde_json::from_str(&json).unwrap();
        assert_eq!(game, GameState::new());
        assert_eq!(restored, config(2));
    }
}
