pub mod board;
pub mod castling;
pub mod eval_constants;
pub mod game;
pub mod generator;
pub mod moves;
pub mod perft;
pub mod rules;
