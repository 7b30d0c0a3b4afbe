//! Core data types shared across the application.

/// Severity of a single progress event, used for log coloring and tallies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventStatus {
    Normal,
    Success,
    Warning,
    Error,
}

/// One unit of the progress callback contract reported by a driver.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressEvent {
    pub fraction: f32, // 0.0 ..= 1.0, normalized to the batch size
    pub message: String,
    pub status: EventStatus,
}

impl ProgressEvent {
    pub fn normal(fraction: f32, message: impl Into<String>) -> Self {
        Self::new(fraction, message, EventStatus::Normal)
    }

    pub fn success(fraction: f32, message: impl Into<String>) -> Self {
        Self::new(fraction, message, EventStatus::Success)
    }

    pub fn warning(fraction: f32, message: impl Into<String>) -> Self {
        Self::new(fraction, message, EventStatus::Warning)
    }

    pub fn error(fraction: f32, message: impl Into<String>) -> Self {
        Self::new(fraction, message, EventStatus::Error)
    }

    fn new(fraction: f32, message: impl Into<String>, status: EventStatus) -> Self {
        Self {
            fraction,
            message: message.into(),
            status,
        }
    }
}

/// Kind of batch operation a background worker is running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Install,
    Uninstall,
}

/// Progress update message sent from background workers to the UI.
#[derive(Clone, Debug)]
pub struct TaskUpdate {
    pub op: Operation,
    pub event: ProgressEvent,
    pub finished: bool, // whether the whole batch finished
}
