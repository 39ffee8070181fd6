//! Shared utilities and error types

pub mod error;
mod truncate;

pub use error::{BlogError, Result};
pub use truncate::{ELLIPSIS, truncate, truncate_cow};
