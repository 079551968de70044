use crate::engine::Move;
use crate::logic::board::{Board, Rank, Side};
use crate::logic::generator::MoveGenerator;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("the game is already over")]
    GameOver,
    #[error("no piece on the source square")]
    NoPieceAtSource,
    #[error("that piece belongs to the other side")]
    NotYourTurn,
    #[error("move is not legal in this position")]
    IllegalMove,
    #[error("square out of bounds")]
    OutOfBounds,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    pub board: Board,
    pub promoted: bool,
}

/// Plays `mv` on a copy of `board`, removing captured men and promoting on the last row.
///
/// A move without a piece on `from`, or with an endpoint off the board, returns an
/// unchanged copy and `promoted = false`. Callers should only pass generated moves.
#[must_use]
pub fn apply_move(board: &Board, mv: &Move) -> AppliedMove {
    let unchanged = || AppliedMove {
        board: board.clone(),
        promoted: false,
    };
    if !mv.from.is_on_board() || !mv.to.is_on_board() {
        return unchanged();
    }
    let Some(mut piece) = board.get(mv.from) else {
        return unchanged();
    };

    let mut next = board.clone();
    next.set(mv.from, None);
    for &jumped in &mv.captured {
        next.set(jumped, None);
    }

    let promoted = piece.rank == Rank::Man && mv.to.row == piece.side.promotion_row();
    if promoted {
        piece.rank = Rank::King;
    }
    next.set(mv.to, Some(piece));

    AppliedMove {
        board: next,
        promoted,
    }
}

/// Winner of the position with `to_move` about to play, if the game is decided.
///
/// A side without legal moves loses. Otherwise the side to move wins when the
/// opponent has no pieces left, or has pieces but none of them can move.
#[must_use]
pub fn check_winner(board: &Board, to_move: Side) -> Option<Side> {
    let generator = MoveGenerator::new();
    let opponent = to_move.opposite();

    if !generator.has_legal_moves(board, to_move) {
        return Some(opponent);
    }
    if board.count(opponent) == 0 || !generator.has_legal_moves(board, opponent) {
        return Some(to_move);
    }
    None
}
