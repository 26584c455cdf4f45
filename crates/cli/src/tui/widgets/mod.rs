//! Custom ratatui widgets for the terminal UI.

mod board;

pub use board::BoardWidget;
