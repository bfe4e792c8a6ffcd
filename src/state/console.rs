// Console state.
// Short activity log shown in the status bar: load results and user-facing errors.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::error::AppError;

/// Console message level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Info,
    Warn,
    Error,
}

/// A console message for the activity log.
#[derive(Debug, Clone)]
pub struct ConsoleMessage {
    pub level: ConsoleLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ConsoleMessage {
    pub fn info(message: impl Into<String>) -> Self {
        Self::at(ConsoleLevel::Info, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::at(ConsoleLevel::Warn, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::at(ConsoleLevel::Error, message)
    }

    fn at(level: ConsoleLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Bounded log of recent messages.
#[derive(Debug, Default)]
pub struct Console {
    messages: VecDeque<ConsoleMessage>,
}

impl Console {
    const CAPACITY: usize = 50;

    pub fn new() -> Self {
        Self::default()
    }

    /// Add an info message.
    pub fn log_info(&mut self, message: impl Into<String>) {
        self.push(ConsoleMessage::info(message));
    }

    /// Add a warning message.
    pub fn log_warn(&mut self, message: impl Into<String>) {
        self.push(ConsoleMessage::warn(message));
    }

    /// Add the user-facing text for a failure.
    pub fn log_error(&mut self, error: &AppError) {
        self.push(ConsoleMessage::error(error.to_string()));
    }

    pub fn latest(&self) -> Option<&ConsoleMessage> {
        self.messages.back()
    }

    fn push(&mut self, message: ConsoleMessage) {
        if self.messages.len() == Self::CAPACITY {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }
}
