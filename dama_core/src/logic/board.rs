use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use std::fmt;

pub const BOARD_SIZE: usize = 8;
const SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// The two players. White starts on rows 5-7, moves toward row 0 and plays first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

impl Side {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Row delta of a forward step.
    #[must_use]
    pub const fn forward(self) -> isize {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    #[must_use]
    pub const fn promotion_row(self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => BOARD_SIZE - 1,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Man,
    King,
}

const KING_DIRECTIONS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const WHITE_MAN_DIRECTIONS: [(isize, isize); 2] = [(-1, -1), (-1, 1)];
const BLACK_MAN_DIRECTIONS: [(isize, isize); 2] = [(1, -1), (1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub side: Side,
    pub rank: Rank,
}

impl Piece {
    #[must_use]
    pub const fn man(side: Side) -> Self {
        Self {
            side,
            rank: Rank::Man,
        }
    }

    #[must_use]
    pub const fn king(side: Side) -> Self {
        Self {
            side,
            rank: Rank::King,
        }
    }

    #[must_use]
    pub const fn is_king(self) -> bool {
        matches!(self.rank, Rank::King)
    }

    /// Diagonals this piece may step or jump along, in generation order.
    #[must_use]
    pub const fn directions(self) -> &'static [(isize, isize)] {
        match (self.rank, self.side) {
            (Rank::King, _) => &KING_DIRECTIONS,
            (Rank::Man, Side::White) => &WHITE_MAN_DIRECTIONS,
            (Rank::Man, Side::Black) => &BLACK_MAN_DIRECTIONS,
        }
    }

    const fn symbol(self) -> char {
        match (self.side, self.rank) {
            (Side::White, Rank::Man) => 'w',
            (Side::White, Rank::King) => 'W',
            (Side::Black, Rank::Man) => 'b',
            (Side::Black, Rank::King) => 'B',
        }
    }

    const fn from_symbol(c: char) -> Option<Self> {
        match c {
            'w' => Some(Self::man(Side::White)),
            'W' => Some(Self::king(Side::White)),
            'b' => Some(Self::man(Side::Black)),
            'B' => Some(Self::king(Side::Black)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    #[must_use]
    pub const fn is_on_board(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// The square `steps` diagonal steps away along `(dr, dc)`, clipped to the board.
    #[must_use]
    pub fn offset(self, (dr, dc): (isize, isize), steps: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(dr * steps)?;
        let col = self.col.checked_add_signed(dc * steps)?;
        Self::new(row, col)
    }

    #[must_use]
    pub const fn is_edge(self) -> bool {
        self.row == 0 || self.col == 0 || self.row == BOARD_SIZE - 1 || self.col == BOARD_SIZE - 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Row-major 8x8 grid. Only dark squares (`row + col` odd) are used in legal play.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    #[serde(with = "BigArray")]
    grid: [Option<Piece>; SQUARES],
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl Board {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            grid: [None; SQUARES],
        }
    }

    /// Black men on the dark squares of rows 0-2, White men on rows 5-7.
    #[must_use]
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for row in 0..BOARD_SIZE {
            let side = match row {
                0..=2 => Side::Black,
                5..=7 => Side::White,
                _ => continue,
            };
            for col in (0..BOARD_SIZE).filter(|col| (row + col) % 2 == 1) {
                board.set(Position { row, col }, Some(Piece::man(side)));
            }
        }
        board
    }

    #[must_use]
    pub const fn square_index(pos: Position) -> Option<usize> {
        if pos.is_on_board() {
            Some(pos.row * BOARD_SIZE + pos.col)
        } else {
            None
        }
    }

    const fn index_to_position(sq: usize) -> Position {
        Position {
            row: sq / BOARD_SIZE,
            col: sq % BOARD_SIZE,
        }
    }

    /// Off-board positions read as empty.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Piece> {
        Self::square_index(pos).and_then(|sq| self.grid.get(sq).copied().flatten())
    }

    /// Off-board writes are ignored.
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        if let Some(slot) = Self::square_index(pos).and_then(|sq| self.grid.get_mut(sq)) {
            *slot = piece;
        }
    }

    #[must_use]
    pub fn is_empty_square(&self, pos: Position) -> bool {
        pos.is_on_board() && self.get(pos).is_none()
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.grid
            .iter()
            .enumerate()
            .filter_map(|(sq, piece)| piece.map(|p| (Self::index_to_position(sq), p)))
    }

    #[must_use]
    pub fn count(&self, side: Side) -> usize {
        self.pieces().filter(|(_, p)| p.side == side).count()
    }

    #[must_use]
    pub fn kings(&self, side: Side) -> usize {
        self.pieces()
            .filter(|(_, p)| p.side == side && p.is_king())
            .count()
    }

    #[must_use]
    pub fn total_pieces(&self) -> usize {
        self.pieces().count()
    }

    /// Rows 0..7 separated by `/`; `w`/`b` men, `W`/`B` kings, digits for empty runs.
    #[must_use]
    pub fn to_notation(&self) -> String {
        let mut out = String::with_capacity(SQUARES + BOARD_SIZE);
        for row in 0..BOARD_SIZE {
            let mut empty_count = 0;
            for col in 0..BOARD_SIZE {
                match self.get(Position { row, col }) {
                    Some(piece) => {
                        if empty_count > 0 {
                            out.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        out.push(piece.symbol());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                out.push_str(&empty_count.to_string());
            }
            if row + 1 < BOARD_SIZE {
                out.push('/');
            }
        }
        out
    }

    /// Inverse of [`Board::to_notation`]. `None` if any row does not describe exactly 8 squares.
    #[must_use]
    pub fn from_notation(notation: &str) -> Option<Self> {
        let rows: Vec<&str> = notation.trim().split('/').collect();
        if rows.len() != BOARD_SIZE {
            return None;
        }
        let mut board = Self::empty();
        for (row, text) in rows.into_iter().enumerate() {
            let mut col = 0;
            for c in text.chars() {
                if let Some(run) = c.to_digit(10) {
                    col += usize::try_from(run).ok()?;
                } else {
                    let piece = Piece::from_symbol(c)?;
                    board.set(Position::new(row, col)?, Some(piece));
                    col += 1;
                }
                if col > BOARD_SIZE {
                    return None;
                }
            }
            if col != BOARD_SIZE {
                return None;
            }
        }
        Some(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  0 1 2 3 4 5 6 7")?;
        for row in 0..BOARD_SIZE {
            write!(f, "{row}")?;
            for col in 0..BOARD_SIZE {
                let c = match self.get(Position { row, col }) {
                    Some(piece) => piece.symbol(),
                    None if (row + col) % 2 == 1 => '.',
                    None => ' ',
                };
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
