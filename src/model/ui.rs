//! UI state - presentation state separate from domain data

use std::time::{Duration, Instant};

/// Screen currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    AddStudents,
    Attendance,
}

impl View {
    pub fn title(&self) -> &str {
        match self {
            View::Home => "Home",
            View::AddStudents => "Add Students",
            View::Attendance => "Mark Attendance",
        }
    }
}

/// Severity of the one-line status bar message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Success,
    Warning,
    Error,
}

/// Message shown in the status bar until it expires
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub notice: Notice,
    pub text: String,
    pub shown_at: Instant,
}

impl StatusLine {
    /// How long a message stays visible
    pub const TTL: Duration = Duration::from_secs(4);

    pub fn new(notice: Notice, text: impl Into<String>) -> Self {
        Self {
            notice,
            text: text.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(Notice::Success, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(Notice::Warning, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Notice::Error, text)
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= Self::TTL
    }
}
