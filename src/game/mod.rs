//! Core Connect Four game logic: the board engine, player identities, and the
//! session that owns turn order and the game result.

mod board;
mod player;
mod session;

pub use board::{Board, Cell, COLS, CONNECT, ROWS};
pub use player::Player;
pub use session::{GameOutcome, Placement, Session};
