use crate::engine::ai::choose_among;
use crate::engine::config::EngineConfig;
use crate::engine::suggest::suggested_moves;
use crate::engine::{Difficulty, Move, SearchStats};
use crate::logic::board::{Board, Position, Side};
use crate::logic::generator::MoveGenerator;
use crate::logic::rules::{apply_move, check_winner, MoveError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Human plays White against the computer playing Black.
    Single,
    Two,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won(Side),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mv: Move,
    pub side: Side,
    pub promoted: bool,
    // Snapshot to restore on undo
    board_before: Board,
    pending_before: Vec<Move>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub promoted: bool,
    pub captured: usize,
    /// The same side must keep capturing with the piece that just moved.
    pub turn_continues: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: Side,
    pub winner_name: String,
    pub score: u32,
    pub moves: usize,
    pub mode: GameMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub turn: Side,
    pub mode: GameMode,
    pub status: GameStatus,
    pub last_move: Option<Move>,
    pub history: Vec<MoveRecord>,
    pending_chain: Vec<Move>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameMode::Two)
    }
}

impl GameState {
    #[must_use]
    pub fn new(mode: GameMode) -> Self {
        Self {
            board: Board::initial(),
            turn: Side::White,
            mode,
            status: GameStatus::Playing,
            last_move: None,
            history: Vec::new(),
            pending_chain: Vec::new(),
        }
    }

    /// Starts from an arbitrary position, e.g. a composed puzzle.
    #[must_use]
    pub fn from_position(board: Board, turn: Side, mode: GameMode) -> Self {
        let mut game = Self {
            board,
            turn,
            ..Self::new(mode)
        };
        game.update_status();
        game
    }

    pub fn restart(&mut self) {
        *self = Self::new(self.mode);
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Playing
    }

    /// The side the computer plays, if any.
    #[must_use]
    pub const fn computer_side(&self) -> Option<Side> {
        match self.mode {
            GameMode::Single => Some(Side::Black),
            GameMode::Two => None,
        }
    }

    #[must_use]
    pub fn is_computer_turn(&self) -> bool {
        !self.is_over() && self.computer_side() == Some(self.turn)
    }

    /// Continuations the side to move is bound to after a capture, if any.
    #[must_use]
    pub fn pending_chain(&self) -> &[Move] {
        &self.pending_chain
    }

    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        if self.pending_chain.is_empty() {
            MoveGenerator::new().generate_moves(&self.board, self.turn)
        } else {
            self.pending_chain.clone()
        }
    }

    /// Legal moves of the piece on `from`; empty unless it belongs to the side to move.
    #[must_use]
    pub fn moves_from(&self, from: Position) -> Vec<Move> {
        if self.board.get(from).map(|p| p.side) != Some(self.turn) {
            return Vec::new();
        }
        self.legal_moves()
            .into_iter()
            .filter(|mv| mv.from == from)
            .collect()
    }

    #[must_use]
    pub fn mandatory_captures(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        if self.pending_chain.is_empty() {
            MoveGenerator::new().capture_moves(&self.board, self.turn)
        } else {
            self.pending_chain.clone()
        }
    }

    #[must_use]
    pub fn hints(&self) -> Vec<Move> {
        if self.is_over() {
            Vec::new()
        } else if self.pending_chain.is_empty() {
            suggested_moves(&self.board, self.turn)
        } else {
            self.pending_chain.clone()
        }
    }

    /// Plays `mv` for the side to move.
    ///
    /// # Errors
    ///
    /// Returns a [`MoveError`] when the game is over, the move leaves the board,
    /// `from` is empty or foreign, or the move is not among [`Self::legal_moves`].
    pub fn make_move(&mut self, mv: &Move) -> Result<MoveOutcome, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if !mv.from.is_on_board() || !mv.to.is_on_board() {
            return Err(MoveError::OutOfBounds);
        }
        let piece = self.board.get(mv.from).ok_or(MoveError::NoPieceAtSource)?;
        if piece.side != self.turn {
            return Err(MoveError::NotYourTurn);
        }
        if !self.legal_moves().contains(mv) {
            log::warn!("{} tried illegal move {mv}", self.turn.name());
            return Err(MoveError::IllegalMove);
        }

        let applied = apply_move(&self.board, mv);
        let board_before = std::mem::replace(&mut self.board, applied.board);
        let pending_before = std::mem::take(&mut self.pending_chain);
        self.history.push(MoveRecord {
            mv: mv.clone(),
            side: self.turn,
            promoted: applied.promoted,
            board_before,
            pending_before,
        });
        self.last_move = Some(mv.clone());

        // A capture may be extended from the landing square, e.g. by a freshly crowned king.
        if mv.is_capture() {
            self.pending_chain = MoveGenerator::new()
                .capture_moves(&self.board, self.turn)
                .into_iter()
                .filter(|next| next.from == mv.to)
                .collect();
        }
        let turn_continues = !self.pending_chain.is_empty();
        log::trace!(
            "{} played {mv}{}",
            self.turn.name(),
            if turn_continues { ", chain continues" } else { "" }
        );
        if !turn_continues {
            self.turn = self.turn.opposite();
        }

        self.update_status();

        Ok(MoveOutcome {
            promoted: applied.promoted,
            captured: mv.capture_count(),
            turn_continues,
        })
    }

    /// Chooses and plays a move for the side to move.
    pub fn play_computer_move<R: Rng + ?Sized>(
        &mut self,
        difficulty: Difficulty,
        config: Arc<EngineConfig>,
        rng: &mut R,
    ) -> Option<(Move, SearchStats)> {
        if self.is_over() {
            return None;
        }
        let (mv, stats) = choose_among(
            &self.board,
            self.turn,
            difficulty,
            self.legal_moves(),
            config,
            rng,
        )?;
        self.make_move(&mv).ok()?;
        Some((mv, stats))
    }

    fn update_status(&mut self) {
        if let Some(winner) = check_winner(&self.board, self.turn) {
            log::debug!("{} wins after {} plies", winner.name(), self.history.len());
            self.status = GameStatus::Won(winner);
        }
    }

    /// Takes back the last ply, or the computer's reply and the move before it in
    /// single-player mode. Not available once the game is decided.
    pub fn undo_move(&mut self) -> bool {
        if self.is_over() || self.history.is_empty() {
            return false;
        }
        let plies = if self.mode == GameMode::Single && self.history.len() >= 2 {
            2
        } else {
            1
        };
        let keep = self.history.len() - plies;
        let Some(record) = self.history.drain(keep..).next() else {
            return false;
        };

        self.board = record.board_before;
        self.turn = record.side;
        self.pending_chain = record.pending_before;
        self.last_move = self.history.last().map(|r| r.mv.clone());
        self.status = GameStatus::Playing;
        true
    }

    /// Full moves played, counting two plies as one move.
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.history.len() / 2
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        let GameStatus::Won(winner) = self.status else {
            return None;
        };
        let winner_name = match (self.mode, winner) {
            (GameMode::Single, Side::White) => "Player",
            (GameMode::Single, Side::Black) => "CPU",
            (GameMode::Two, side) => side.name(),
        };
        let moves = self.move_count();
        Some(GameResult {
            winner,
            winner_name: winner_name.to_string(),
            score: final_score(&self.board, winner, moves),
            moves,
            mode: self.mode,
        })
    }
}

/// 100 per surviving piece, 200 more per king, minus 5 per move, plus 1000; never negative.
#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
fn final_score(board: &Board, winner: Side, moves: usize) -> u32 {
    let pieces = board.count(winner) as i64;
    let kings = board.kings(winner) as i64;
    let score = pieces * 100 + kings * 200 - moves as i64 * 5 + 1000;
    u32::try_from(score.max(0)).unwrap_or(u32::MAX)
}
