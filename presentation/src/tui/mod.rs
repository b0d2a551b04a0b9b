//! TUI (Text User Interface) module for therabot-chat
//!
//! A full-screen chat view built on ratatui. The ChatClient runs in a
//! controller task; the UI loop mirrors its transcript from UiEvents.

mod app;
mod controller;
mod event;
mod mode;
mod presenter;
mod scroll;
mod state;
mod widgets;

pub use app::{TuiApp, TuiOptions};
pub use event::TuiCommand;
pub use mode::{Action, KeyHandler};
pub use presenter::TuiPresenter;
pub use scroll::{DEFAULT_SCROLL_DEBOUNCE, ScrollCoalescer};
pub use state::TuiState;
pub use widgets::{
    MainLayout, conversation::ConversationWidget, header::HeaderWidget, help::HelpWidget,
    input::InputWidget, status_bar::StatusBarWidget,
};
