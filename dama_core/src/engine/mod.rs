use crate::logic::board::{Board, Position, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod ai;
pub mod config;
pub mod eval;
pub mod search;
pub mod suggest;

/// A single step, or a capture chain listing every jumped square in traversal order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub captured: Vec<Position>,
}

impl Move {
    #[must_use]
    pub const fn step(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            captured: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }

    #[must_use]
    pub fn capture_count(&self) -> usize {
        self.captured.len()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)?;
        if self.is_capture() {
            write!(f, " x{}", self.captured.len())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Case-insensitive; unrecognized names fall back to `Easy`.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "medium" => Self::Medium,
            "hard" => Self::Hard,
            _ => Self::Easy,
        }
    }
}

impl From<&str> for Difficulty {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u32,
    pub score: i32,
    pub time_ms: u64,
}

/// Scores a board from `side`'s point of view: positive favours `side`.
///
/// Implementations must be antisymmetric, `evaluate(b, s) == -evaluate(b, s.opposite())`,
/// because the search maximizes and minimizes the same perspective score.
pub trait Evaluator {
    fn evaluate(&self, board: &Board, side: Side) -> i32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse_falls_back_to_easy() {
        assert_eq!(Difficulty::parse("HARD"), Difficulty::Hard);
        assert_eq!(Difficulty::parse(" medium "), Difficulty::Medium);
        assert_eq!(Difficulty::parse("easy"), Difficulty::Easy);
        assert_eq!(Difficulty::parse("grandmaster"), Difficulty::Easy);
        assert_eq!(Difficulty::from(""), Difficulty::Easy);
    }

    #[test]
    fn test_move_display() {
        let from = Position::new(5, 2).unwrap();
        let to = Position::new(3, 4).unwrap();
        let mv = Move {
            from,
            to,
            captured: vec![Position::new(4, 3).unwrap()],
        };
        assert!(mv.is_capture());
        assert_eq!(mv.to_string(), "(5, 2) -> (3, 4) x1");
        assert_eq!(Move::step(from, to).to_string(), "(5, 2) -> (3, 4)");
    }
}
