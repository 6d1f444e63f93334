//! Ratatui front-end: a single screen showing the current quote with
//! shortcuts to draw a new one, copy it, or share it.

mod app;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
