//! Transient user-facing notices.
//!
//! The wizard's validation failures and the booking confirmation are
//! delivered through a generic "show transient message" capability. The
//! booking core only needs a sink accepting title, description and severity;
//! the toast surface rendering them is someone else's concern.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;

/// How prominently a notice should be rendered
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Neutral information
    Info,
    /// Something completed
    Success,
    /// Something was rejected
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A transient message surfaced to the user
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Short heading
    pub title: String,
    /// One-sentence detail
    pub description: String,
    /// Rendering severity
    pub severity: Severity,
}

impl Notice {
    /// Creates an informational notice
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Info,
        }
    }

    /// Creates a success notice
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Success,
        }
    }

    /// Creates an error notice
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Error,
        }
    }
}

/// Sink accepting transient notices
///
/// Injected through the environment so reducer tests can observe exactly
/// which notices an action produced.
pub trait NoticeSink: Send + Sync {
    /// Deliver one notice
    fn publish(&self, notice: Notice);
}

/// Production sink that logs notices through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNoticeSink;

impl NoticeSink for TracingNoticeSink {
    fn publish(&self, notice: Notice) {
        match notice.severity {
            Severity::Info => {
                tracing::info!(title = %notice.title, description = %notice.description, "notice");
            },
            Severity::Success => {
                tracing::info!(title = %notice.title, description = %notice.description, "notice (success)");
            },
            Severity::Error => {
                tracing::warn!(title = %notice.title, description = %notice.description, "notice (error)");
            },
        }
    }
}

/// In-memory sink that records notices for assertions
#[derive(Debug, Default)]
pub struct MemoryNoticeSink {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNoticeSink {
    /// Creates an empty sink
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices published so far, in order
    pub fn snapshot(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Number of notices published so far
    pub fn len(&self) -> usize {
        self.notices
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Whether no notice has been published
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NoticeSink for MemoryNoticeSink {
    fn publish(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(notice);
    }
}
