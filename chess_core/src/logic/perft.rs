use crate::logic::game::GameState;
use crate::logic::moves::Move;

/// Number of leaf nodes of the legal move tree `depth` plies deep.
pub fn perft(game: &mut GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = game.get_valid_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for mv in &moves {
        game.make_move(mv);
        nodes += perft(game, depth - 1);
        game.undo_move();
    }
    nodes
}

/// Per-root-move breakdown of `perft`, in generation order.
pub fn perft_divide(game: &mut GameState, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let moves = game.get_valid_moves();
    let mut counts = Vec::with_capacity(moves.len());
    for mv in moves {
        game.make_move(&mv);
        counts.push((mv, perft(game, depth - 1)));
        game.undo_move();
    }
    counts
}
