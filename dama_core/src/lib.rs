//! Rules engine and computer opponent for Ethiopian dama.
//!
//! Every engine operation is a pure function of the board it is given and returns
//! fresh values; callers own the board, the turn and the move history.

pub mod engine;
pub mod logic;
pub mod worker;
