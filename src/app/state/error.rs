use chrono::{DateTime, Local};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorState {
    pub message: String,
    pub timestamp: DateTime<Local>,
    pub severity: ErrorSeverity,
    pub suggestions: Vec<String>,
}

impl ErrorState {
    pub fn new(message: impl Into<String>, severity: ErrorSeverity) -> Self {
        let message = message.into();
        Self {
            suggestions: crate::app::recovery::get_suggestions(&message),
            message,
            timestamp: Local::now(),
            severity,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.severity {
            ErrorSeverity::Warning => " WARNING ",
            ErrorSeverity::Error => " ERROR ",
        }
    }
}
