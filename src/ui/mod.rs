//! Presentation: the terminal UI with mouse and keyboard play, and a plain
//! text mode for pipes and dumb terminals.

mod app;
mod game_view;
pub mod input;
pub mod text;

pub use app::App;
