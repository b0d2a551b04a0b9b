//! Console output formatting for the plain REPL

pub mod console;
pub mod sanitize;
