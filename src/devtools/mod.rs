//! Developer tools for jubelogs pages
//!
//! - Console: the diagnostic channel every page reports failures to

mod console;

pub use console::{Console, ConsoleMessage, LogLevel};
