//! Page console
//!
//! Messages are kept in a bounded buffer and forwarded to the `log` facade
//! under the `console` target.

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

/// Default number of retained messages
const DEFAULT_MAX_MESSAGES: usize = 1000;

/// Log level for console messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Debug,
}

impl LogLevel {
    fn as_log_level(self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Debug => log::Level::Debug,
        }
    }
}

/// A console message
#[derive(Debug, Clone)]
pub struct ConsoleMessage {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: u64,
}

impl ConsoleMessage {
    /// Create a new console message
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        Self {
            level,
            message: message.into(),
            timestamp,
        }
    }
}

/// Diagnostic channel attached to a page
#[derive(Debug)]
pub struct Console {
    messages: VecDeque<ConsoleMessage>,
    max_messages: usize,
}

impl Console {
    /// Create a new console
    pub fn new() -> Self {
        Self {
            messages: VecDeque::new(),
            max_messages: DEFAULT_MAX_MESSAGES,
        }
    }

    /// Log an error message
    pub fn error(&mut self, message: impl Into<String>) {
        self.add_message(ConsoleMessage::new(LogLevel::Error, message));
    }

    /// Log a debug message
    pub fn debug(&mut self, message: impl Into<String>) {
        self.add_message(ConsoleMessage::new(LogLevel::Debug, message));
    }

    fn add_message(&mut self, message: ConsoleMessage) {
        log::log!(target: "console", message.level.as_log_level(), "{}", message.message);
        if self.messages.len() >= self.max_messages {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    /// Get all messages
    pub fn messages(&self) -> impl Iterator<Item = &ConsoleMessage> {
        self.messages.iter()
    }

    /// Messages at exactly `level`
    pub fn messages_at(&self, level: LogLevel) -> impl Iterator<Item = &ConsoleMessage> {
        self.messages.iter().filter(move |m| m.level == level)
    }

    /// Whether any error was reported
    pub fn has_errors(&self) -> bool {
        self.messages_at(LogLevel::Error).next().is_some()
    }

    /// Get message count
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}
