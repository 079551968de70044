use crate::engine::config::EngineConfig;
use crate::engine::eval::HeuristicEvaluator;
use crate::engine::{Evaluator, Move, SearchStats};
use crate::logic::board::{Board, Side};
use crate::logic::generator::MoveGenerator;
use crate::logic::rules::{apply_move, check_winner};
use std::sync::Arc;

/// Fixed-depth minimax with alpha-beta pruning.
///
/// Every score in the tree is from the searching side's perspective: maximizing
/// nodes are that side to move, minimizing nodes its opponent. Decided positions
/// score `±(win_score + remaining depth)` so nearer wins outrank later ones.
pub struct AlphaBetaEngine {
    config: Arc<EngineConfig>,
    evaluator: HeuristicEvaluator,
    generator: MoveGenerator,
    nodes_searched: u32,
}

impl AlphaBetaEngine {
    #[must_use]
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: HeuristicEvaluator::new(config.clone()),
            generator: MoveGenerator::new(),
            config,
            nodes_searched: 0,
        }
    }

    fn now() -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            if let Some(window) = web_sys::window() {
                return window.performance().map_or(0.0, |p| p.now());
            }
            let global = js_sys::global();
            if let Ok(worker) = global.dyn_into::<web_sys::WorkerGlobalScope>() {
                return worker.performance().map_or(0.0, |p| p.now());
            }
            0.0
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::time::{SystemTime, UNIX_EPOCH};
            let since_the_epoch = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default();
            since_the_epoch.as_secs_f64() * 1000.0
        }
    }

    /// Best move for `side`, or `None` when it has no legal move.
    ///
    /// A lone legal move is returned without searching. Root ties keep the
    /// first move in generation order.
    pub fn search(&mut self, board: &Board, side: Side) -> Option<(Move, SearchStats)> {
        let moves = self.generator.generate_moves(board, side);
        self.search_moves(board, side, moves)
    }

    /// Searches only the given root moves, e.g. the continuations of a pending capture chain.
    pub fn search_moves(
        &mut self,
        board: &Board,
        side: Side,
        mut moves: Vec<Move>,
    ) -> Option<(Move, SearchStats)> {
        self.nodes_searched = 0;
        if moves.len() <= 1 {
            return moves.pop().map(|mv| (mv, SearchStats::default()));
        }

        let start_time = Self::now();
        let depth = self.config.depth_for(board.total_pieces());
        let mut best: Option<(Move, i32)> = None;

        for mv in moves {
            let next = apply_move(board, &mv).board;
            let score = self.minimax(
                &next,
                depth.saturating_sub(1),
                i32::MIN,
                i32::MAX,
                false,
                side,
            );
            if best.as_ref().is_none_or(|(_, best_score)| score > *best_score) {
                best = Some((mv, score));
            }
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let time_ms = (Self::now() - start_time).max(0.0) as u64;
        best.map(|(mv, score)| {
            let stats = SearchStats {
                depth,
                nodes: self.nodes_searched,
                score,
                time_ms,
            };
            log::debug!(
                "{} plays {mv}: depth {depth}, {} nodes, score {score}, {time_ms} ms",
                side.name(),
                stats.nodes
            );
            (mv, stats)
        })
    }

    fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        searcher: Side,
    ) -> i32 {
        self.nodes_searched = self.nodes_searched.saturating_add(1);

        let to_move = if maximizing {
            searcher
        } else {
            searcher.opposite()
        };
        if let Some(winner) = check_winner(board, to_move) {
            let score = self.config.win_score + i32::from(depth);
            return if winner == searcher { score } else { -score };
        }
        if depth == 0 {
            return self.evaluator.evaluate(board, searcher);
        }

        let moves = self.generator.generate_moves(board, to_move);
        if maximizing {
            let mut max_eval = i32::MIN;
            for mv in moves {
                let next = apply_move(board, &mv).board;
                let eval = self.minimax(&next, depth - 1, alpha, beta, false, searcher);
                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break;
                }
            }
            max_eval
        } else {
            let mut min_eval = i32::MAX;
            for mv in moves {
                let next = apply_move(board, &mv).board;
                let eval = self.minimax(&next, depth - 1, alpha, beta, true, searcher);
                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break;
                }
            }
            min_eval
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::WIN_SCORE;
    use crate::logic::board::Position;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    fn engine() -> AlphaBetaEngine {
        AlphaBetaEngine::new(Arc::new(EngineConfig::default()))
    }

    #[test]
    fn test_single_move_skips_search() {
        let board = Board::from_notation("8/8/8/8/3b4/2w5/8/8").unwrap();
        let (mv, stats) = engine().search(&board, Side::White).unwrap();
        assert_eq!(mv.captured, vec![pos(4, 3)]);
        assert_eq!(stats.nodes, 0);
    }

    #[test]
    fn test_no_moves_returns_none() {
        let board = Board::from_notation("1b6/w7/8/8/8/8/8/8").unwrap();
        assert!(engine().search(&board, Side::White).is_none());
    }

    #[test]
    fn test_finds_immobilizing_win() {
        // King to (7,1) leaves the Black man on (6,0) without a move.
        let board = Board::from_notation("8/8/8/8/8/8/b1W5/8").unwrap();
        let (mv, stats) = engine().search(&board, Side::White).unwrap();
        assert_eq!(mv.to, pos(7, 1));
        assert_eq!(stats.depth, 6);
        assert_eq!(stats.score, WIN_SCORE + 5);
    }

    #[test]
    fn test_white_avoids_hanging_last_piece() {
        // Stepping to (3,2) lets Black jump it from (2,3).
        let board = Board::from_notation("8/8/3b4/8/1w6/8/8/8").unwrap();
        let (mv, stats) = engine().search(&board, Side::White).unwrap();
        assert_eq!(mv.to, pos(3, 0));
        assert!(stats.score > -WIN_SCORE);
        assert!(stats.nodes > 0);
    }

    #[test]
    fn test_black_avoids_hanging_last_piece() {
        let board = Board::from_notation("8/8/8/6b1/8/4w3/8/8").unwrap();
        let (mv, _) = engine().search(&board, Side::Black).unwrap();
        assert_eq!(mv.to, pos(4, 7));
    }

    #[test]
    fn test_search_is_deterministic() {
        let board = Board::initial();
        let mut engine = engine();
        let first = engine.search(&board, Side::White).map(|(mv, _)| mv);
        let second = engine.search(&board, Side::White).map(|(mv, _)| mv);
        assert!(first.is_some());
        assert_eq!(first, second);
    }
}
