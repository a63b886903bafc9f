//! Full-screen front-end: one input line, one result region, one status bar.
mod command;
mod editor;
mod feeders;
mod styles;
mod tui;
mod view;

pub use feeders::spawn_tui_feeders;
pub use tui::{TuiActor, TuiMsg};
