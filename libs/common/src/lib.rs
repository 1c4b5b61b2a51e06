//! Shared types, money helpers, and error definitions for the offer bot.

pub mod error;
pub mod money;
pub mod types;

pub use error::Error;
pub use types::*;

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
