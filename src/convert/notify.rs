//! User-facing notices raised during conversion.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// Progress information
    Info,
    /// A step completed
    Success,
    /// Degraded but usable result
    Warning,
    /// A step failed
    Error,
}

impl NoticeLevel {
    /// Lowercase name of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeLevel::Info => "info",
            NoticeLevel::Success => "success",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        }
    }
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receiver of user-facing notices.
///
/// A pipeline holds its notifier explicitly; there is no global instance.
pub trait Notifier: Send + Sync {
    /// Deliver a notice.
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Forwards notices to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info | NoticeLevel::Success => log::info!("{}", message),
            NoticeLevel::Warning => log::warn!("{}", message),
            NoticeLevel::Error => log::error!("{}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names() {
        assert_eq!(NoticeLevel::Success.to_string(), "success");
        assert_eq!(
            serde_json::to_string(&NoticeLevel::Warning).unwrap(),
            "\"warning\""
        );
    }

    #[test]
    fn test_log_notifier_is_object_safe() {
        let notifier: Box<dyn Notifier> = Box::new(LogNotifier);
        notifier.notify(NoticeLevel::Info, "hello");
    }
}
