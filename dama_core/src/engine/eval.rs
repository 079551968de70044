use crate::engine::config::EngineConfig;
use crate::engine::Evaluator;
use crate::logic::board::{Board, Piece, Position, Rank, Side, BOARD_SIZE};
use std::sync::Arc;

/// Material, man advancement, king centralization and edge safety.
pub struct HeuristicEvaluator {
    config: Arc<EngineConfig>,
}

impl Default for HeuristicEvaluator {
    fn default() -> Self {
        Self::new(Arc::new(EngineConfig::default()))
    }
}

impl HeuristicEvaluator {
    #[must_use]
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    /// Unsigned worth of one piece on its square.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn piece_value(&self, pos: Position, piece: Piece) -> i32 {
        let cfg = &self.config;
        let mut value = match piece.rank {
            Rank::Man => {
                let progress = match piece.side {
                    Side::White => BOARD_SIZE - 1 - pos.row,
                    Side::Black => pos.row,
                };
                cfg.val_man + progress as i32 * cfg.bonus_advance
            }
            Rank::King => {
                // Manhattan distance to (3.5, 3.5), computed in half-squares; always even.
                let doubled = (2 * pos.row as i32 - 7).abs() + (2 * pos.col as i32 - 7).abs();
                cfg.val_king + (cfg.center_reach - doubled / 2) * cfg.bonus_center
            }
        };
        if pos.is_edge() {
            value += cfg.bonus_edge;
        }
        value
    }
}

impl Evaluator for HeuristicEvaluator {
    fn evaluate(&self, board: &Board, side: Side) -> i32 {
        board
            .pieces()
            .map(|(pos, piece)| {
                let value = self.piece_value(pos, piece);
                if piece.side == side {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }
}
