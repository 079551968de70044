use crate::engine::Move;
use crate::logic::board::{Board, Piece, Position, Side};

/// Legal move generation under the mandatory longest-capture rule.
///
/// Capture chains are explored by recursion over board copies: each jump relocates
/// the piece and removes the jumped man on a fresh board, so branches never share state.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Every legal move for `side`. Captures, when any exist, exclude all other moves.
    #[must_use]
    pub fn generate_moves(&self, board: &Board, side: Side) -> Vec<Move> {
        let captures = self.capture_moves(board, side);
        if captures.is_empty() {
            Self::step_moves(board, side)
        } else {
            captures
        }
    }

    /// The legal moves starting on `from`; empty for an empty, foreign or off-board square.
    #[must_use]
    pub fn moves_from(&self, board: &Board, from: Position) -> Vec<Move> {
        let Some(piece) = board.get(from) else {
            return Vec::new();
        };
        let captures = self.capture_moves(board, piece.side);
        if !captures.is_empty() {
            return captures.into_iter().filter(|mv| mv.from == from).collect();
        }
        let mut moves = Vec::with_capacity(4);
        Self::piece_steps(board, from, piece, &mut moves);
        moves
    }

    /// Mandatory captures for `side`: chains reaching the board-wide maximum length.
    #[must_use]
    pub fn capture_moves(&self, board: &Board, side: Side) -> Vec<Move> {
        let mut captures = Vec::new();
        for (from, piece) in board.pieces().filter(|(_, p)| p.side == side) {
            captures.extend(self.piece_captures(board, from, piece));
        }
        retain_longest(&mut captures);
        captures
    }

    /// Capture chains of one piece, keeping only its longest ones.
    #[must_use]
    pub fn piece_captures(&self, board: &Board, from: Position, piece: Piece) -> Vec<Move> {
        let mut chains = Vec::new();
        Self::collect_chains(board, from, from, piece, &[], &mut chains);
        retain_longest(&mut chains);
        chains
    }

    #[must_use]
    pub fn has_legal_moves(&self, board: &Board, side: Side) -> bool {
        board
            .pieces()
            .filter(|(_, p)| p.side == side)
            .any(|(pos, piece)| {
                piece.directions().iter().any(|&dir| {
                    pos.offset(dir, 1).is_some_and(|to| board.is_empty_square(to))
                        || Self::jump_target(board, pos, piece, dir, &[]).is_some()
                })
            })
    }

    fn step_moves(board: &Board, side: Side) -> Vec<Move> {
        let mut moves = Vec::with_capacity(32);
        for (from, piece) in board.pieces().filter(|(_, p)| p.side == side) {
            Self::piece_steps(board, from, piece, &mut moves);
        }
        moves
    }

    fn piece_steps(board: &Board, from: Position, piece: Piece, moves: &mut Vec<Move>) {
        for &dir in piece.directions() {
            if let Some(to) = from.offset(dir, 1).filter(|&to| board.is_empty_square(to)) {
                moves.push(Move::step(from, to));
            }
        }
    }

    /// `(jumped, landing)` if `piece` on `at` can capture along `dir`.
    fn jump_target(
        board: &Board,
        at: Position,
        piece: Piece,
        dir: (isize, isize),
        captured: &[Position],
    ) -> Option<(Position, Position)> {
        let landing = at.offset(dir, 2)?;
        let jumped = at.offset(dir, 1)?;
        let victim = board.get(jumped)?;
        (board.is_empty_square(landing)
            && victim.side == piece.side.opposite()
            && !captured.contains(&jumped))
        .then_some((jumped, landing))
    }

    // A chain is only recorded where it cannot be extended; intermediate stops are dropped.
    fn collect_chains(
        board: &Board,
        origin: Position,
        at: Position,
        piece: Piece,
        captured: &[Position],
        chains: &mut Vec<Move>,
    ) {
        for &dir in piece.directions() {
            let Some((jumped, landing)) = Self::jump_target(board, at, piece, dir, captured) else {
                continue;
            };

            let mut next = board.clone();
            next.set(landing, Some(piece));
            next.set(at, None);
            next.set(jumped, None);

            let mut path = captured.to_vec();
            path.push(jumped);

            let before = chains.len();
            Self::collect_chains(&next, origin, landing, piece, &path, chains);
            if chains.len() == before {
                chains.push(Move {
                    from: origin,
                    to: landing,
                    captured: path,
                });
            }
        }
    }
}

fn retain_longest(moves: &mut Vec<Move>) {
    let longest = moves.iter().map(Move::capture_count).max().unwrap_or(0);
    moves.retain(|mv| mv.capture_count() == longest);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::Rank;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_opening_moves() {
        let board = Board::initial();
        let generator = MoveGenerator::new();
        let moves = generator.generate_moves(&board, Side::White);

        assert_eq!(moves.len(), 7);
        assert!(moves.iter().all(|m| !m.is_capture()));
        assert!(moves.iter().all(|m| m.from.row == 5 && m.to.row == 4));

        let mut movers: Vec<Position> = moves.iter().map(|m| m.from).collect();
        movers.dedup();
        assert_eq!(movers.len(), 4);
    }

    #[test]
    fn test_simple_capture_is_mandatory() {
        // White man on (5,2), Black man on (4,3), landing (3,4) empty.
        let board = Board::from_notation("8/8/8/8/3b4/2w5/8/7w").unwrap();
        let generator = MoveGenerator::new();
        let moves = generator.generate_moves(&board, Side::White);

        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].from, pos(5, 2));
        assert_eq!(moves[0].to, pos(3, 4));
        assert_eq!(moves[0].captured, vec![pos(4, 3)]);
    }

    #[test]
    fn test_double_jump_drops_intermediate_stop() {
        let board = Board::from_notation("8/8/3b4/8/3b4/2w5/8/8").unwrap();
        let generator = MoveGenerator::new();
        let moves = generator.generate_moves(&board, Side::White);

        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to, pos(1, 2));
        assert_eq!(moves[0].captured, vec![pos(4, 3), pos(2, 3)]);
    }

    #[test]
    fn test_longest_chain_per_piece() {
        // From (5,2): left jump over (4,1) stops; right jump over (4,3) continues over (2,3).
        let board = Board::from_notation("8/8/3b4/8/1b1b4/2w5/8/8").unwrap();
        let generator = MoveGenerator::new();
        let chains = generator.piece_captures(&board, pos(5, 2), Piece::man(Side::White));

        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].capture_count(), 2);
    }

    #[test]
    fn test_global_maximum_across_pieces() {
        // (5,2) has a double jump; (6,5) only a single one over (5,6).
        let board = Board::from_notation("8/8/3b4/8/3b4/2w3b1/5w2/8").unwrap();
        let generator = MoveGenerator::new();
        assert_eq!(
            generator
                .piece_captures(&board, pos(6, 5), Piece::man(Side::White))
                .len(),
            1
        );

        let moves = generator.generate_moves(&board, Side::White);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].capture_count(), 2);
        assert_eq!(moves[0].from, pos(5, 2));
        assert!(generator.moves_from(&board, pos(6, 5)).is_empty());
    }

    #[test]
    fn test_man_cannot_capture_backwards() {
        let board = Board::from_notation("8/8/8/8/8/2w5/3b4/8").unwrap();
        let generator = MoveGenerator::new();
        let moves = generator.generate_moves(&board, Side::White);
        assert!(moves.iter().all(|m| !m.is_capture()));
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn test_king_moves_all_directions() {
        let board = Board::from_notation("8/8/8/8/3W4/8/8/8").unwrap();
        let generator = MoveGenerator::new();
        let moves = generator.moves_from(&board, pos(4, 3));
        assert_eq!(moves.len(), 4);
        assert_eq!(board.get(pos(4, 3)).map(|p| p.rank), Some(Rank::King));
    }

    #[test]
    fn test_king_does_not_recapture_same_piece() {
        // A king circling a lone man may only jump it once.
        let board = Board::from_notation("8/8/8/8/3b4/2W5/8/8").unwrap();
        let generator = MoveGenerator::new();
        let moves = generator.generate_moves(&board, Side::White);
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].captured, vec![pos(4, 3)]);
    }

    #[test]
    fn test_king_loop_returns_to_origin() {
        // Four men around (3,3); the king jumps all of them and lands where it started.
        let board = Board::from_notation("8/8/8/2b1b3/1W6/2b1b3/8/8").unwrap();
        let generator = MoveGenerator::new();
        let moves = generator.generate_moves(&board, Side::White);

        assert_eq!(moves.len(), 2);
        assert!(moves
            .iter()
            .all(|m| m.from == pos(4, 1) && m.to == pos(4, 1) && m.capture_count() == 4));
        assert_eq!(
            moves[0].captured,
            vec![pos(3, 2), pos(3, 4), pos(5, 4), pos(5, 2)]
        );
        assert_eq!(
            moves[1].captured,
            vec![pos(5, 2), pos(5, 4), pos(3, 4), pos(3, 2)]
        );

        let applied = crate::logic::rules::apply_move(&board, &moves[0]);
        assert_eq!(applied.board.get(pos(4, 1)), Some(Piece::king(Side::White)));
        assert_eq!(applied.board.total_pieces(), 1);
        assert!(!applied.promoted);
    }

    #[test]
    fn test_empty_and_foreign_squares_have_no_moves() {
        let board = Board::initial();
        let generator = MoveGenerator::new();
        assert!(generator.moves_from(&board, pos(4, 3)).is_empty());
        assert!(generator
            .moves_from(&board, Position { row: 9, col: 9 })
            .is_empty());
        // Black pieces answer for Black, regardless of whose turn it is.
        assert_eq!(generator.moves_from(&board, pos(2, 1)).len(), 2);
    }

    #[test]
    fn test_has_legal_moves_blocked() {
        // White man on (1,0) is blocked by a Black man on (0,1) with no landing square.
        let board = Board::from_notation("1b6/w7/8/8/8/8/8/8").unwrap();
        let generator = MoveGenerator::new();
        assert!(!generator.has_legal_moves(&board, Side::White));
        assert!(generator.generate_moves(&board, Side::White).is_empty());
    }
}
