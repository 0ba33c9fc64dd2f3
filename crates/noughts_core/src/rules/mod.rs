//! Game rules for noughts and crosses.
//!
//! Pure functions over the nine cells of a board. Board storage lives in
//! [`crate::Board`], which delegates its terminal-state queries here.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{WIN_LINES, WinLine, completed_line, is_win_for};
