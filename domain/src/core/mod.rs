//! Core domain concepts shared across all subdomains.
//!
//! - [`outgoing::OutgoingMessage`]: validated user text ready to be sent
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod outgoing;
