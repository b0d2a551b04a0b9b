//! Progress indicators for the plain REPL

pub mod reporter;
