//! Difficulty dispatch for the computer player.
//!
//! Every call is a fresh computation over the given board; nothing is kept between moves.

use crate::engine::config::EngineConfig;
use crate::engine::search::AlphaBetaEngine;
use crate::engine::{Difficulty, Move, SearchStats};
use crate::logic::board::{Board, Side};
use crate::logic::generator::MoveGenerator;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

/// Picks a move for `side` with the default engine settings and the thread RNG.
#[must_use]
pub fn choose_move(board: &Board, side: Side, difficulty: Difficulty) -> Option<Move> {
    let config = Arc::new(EngineConfig::default());
    let mut rng = rand::thread_rng();
    choose_move_with(board, side, difficulty, config, &mut rng).map(|(mv, _)| mv)
}

/// Like [`choose_move`], with explicit settings and randomness, also returning search stats.
///
/// Only the hard level searches; the random levels report empty stats.
pub fn choose_move_with<R: Rng + ?Sized>(
    board: &Board,
    side: Side,
    difficulty: Difficulty,
    config: Arc<EngineConfig>,
    rng: &mut R,
) -> Option<(Move, SearchStats)> {
    let moves = MoveGenerator::new().generate_moves(board, side);
    choose_among(board, side, difficulty, moves, config, rng)
}

/// Picks one of `moves`, which must be legal for `side` on `board`.
pub fn choose_among<R: Rng + ?Sized>(
    board: &Board,
    side: Side,
    difficulty: Difficulty,
    moves: Vec<Move>,
    config: Arc<EngineConfig>,
    rng: &mut R,
) -> Option<(Move, SearchStats)> {
    match difficulty {
        Difficulty::Easy => random_move(&moves, rng),
        Difficulty::Medium => capture_biased_move(&moves, rng),
        Difficulty::Hard => AlphaBetaEngine::new(config).search_moves(board, side, moves),
    }
}

fn random_move<R: Rng + ?Sized>(moves: &[Move], rng: &mut R) -> Option<(Move, SearchStats)> {
    moves
        .choose(rng)
        .cloned()
        .map(|mv| (mv, SearchStats::default()))
}

fn capture_biased_move<R: Rng + ?Sized>(
    moves: &[Move],
    rng: &mut R,
) -> Option<(Move, SearchStats)> {
    let captures: Vec<&Move> = moves.iter().filter(|mv| mv.is_capture()).collect();
    let choice = if captures.is_empty() {
        moves.choose(rng)
    } else {
        captures.choose(rng).copied()
    };
    choice.cloned().map(|mv| (mv, SearchStats::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    #[test]
    fn test_random_levels_pick_legal_moves() {
        let board = Board::initial();
        let legal = MoveGenerator::new().generate_moves(&board, Side::White);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            for difficulty in [Difficulty::Easy, Difficulty::Medium] {
                let config = Arc::new(EngineConfig::default());
                let (mv, stats) =
                    choose_move_with(&board, Side::White, difficulty, config, &mut rng).unwrap();
                assert!(legal.contains(&mv));
                assert_eq!(stats, SearchStats::default());
            }
        }
    }

    #[test]
    fn test_single_move_at_every_level() {
        let board = Board::from_notation("8/8/8/8/3b4/2w5/8/8").unwrap();
        let expected = MoveGenerator::new().generate_moves(&board, Side::White);
        assert_eq!(expected.len(), 1);
        for difficulty in ALL {
            assert_eq!(
                choose_move(&board, Side::White, difficulty).as_ref(),
                expected.first()
            );
        }
    }

    #[test]
    fn test_no_move_at_every_level() {
        let board = Board::from_notation("1b6/w7/8/8/8/8/8/8").unwrap();
        for difficulty in ALL {
            assert!(choose_move(&board, Side::White, difficulty).is_none());
        }
    }

    #[test]
    fn test_same_seed_same_choice() {
        let board = Board::initial();
        let pick = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let config = Arc::new(EngineConfig::default());
            choose_move_with(&board, Side::Black, Difficulty::Easy, config, &mut rng)
        };
        assert_eq!(pick(42), pick(42));
    }
}
