//! Plain line-based chat mode
//!
//! Reads one message per line from stdin and prints the conversation as it
//! changes. Used with `--plain` or when stdout is not a terminal.

mod repl;
mod view;

pub use repl::ChatRepl;
pub use view::PlainView;
