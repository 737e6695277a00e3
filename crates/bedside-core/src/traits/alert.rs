//! Operator-facing alert sink.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Severity of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    /// Informational message.
    Info,
    /// Something degraded but the operation continued.
    Warning,
    /// An operation failed.
    Error,
}

impl AlertLevel {
    /// Return the level as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives user/operator feedback (toasts, activity log entries).
///
/// Delivery is best-effort: a sink must not fail the caller.
#[async_trait]
pub trait AlertSink: Send + Sync + std::fmt::Debug + 'static {
    /// Deliver an alert.
    async fn alert(&self, level: AlertLevel, message: &str);
}
