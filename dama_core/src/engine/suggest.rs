use crate::engine::eval::HeuristicEvaluator;
use crate::engine::{Evaluator, Move};
use crate::logic::board::{Board, Side};
use crate::logic::generator::MoveGenerator;
use crate::logic::rules::apply_move;

/// Hint moves for `side` using the default evaluator.
#[must_use]
pub fn suggested_moves(board: &Board, side: Side) -> Vec<Move> {
    suggested_moves_with(board, side, &HeuristicEvaluator::default())
}

/// Longest mandatory captures when any exist, otherwise every move tying for the
/// best one-ply evaluation. Order follows move generation.
#[must_use]
pub fn suggested_moves_with<E: Evaluator + ?Sized>(
    board: &Board,
    side: Side,
    evaluator: &E,
) -> Vec<Move> {
    let mut moves = MoveGenerator::new().generate_moves(board, side);
    if moves.iter().any(Move::is_capture) {
        let longest = moves.iter().map(Move::capture_count).max().unwrap_or(0);
        moves.retain(|mv| mv.capture_count() == longest);
        return moves;
    }

    let scored: Vec<(Move, i32)> = moves
        .into_iter()
        .map(|mv| {
            let score = evaluator.evaluate(&apply_move(board, &mv).board, side);
            (mv, score)
        })
        .collect();
    let Some(best) = scored.iter().map(|(_, score)| *score).max() else {
        return Vec::new();
    };
    scored
        .into_iter()
        .filter(|(_, score)| *score == best)
        .map(|(mv, _)| mv)
        .collect()
}
