//! User-facing notification records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::generate_id;

/// Severity/category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A completed operation.
    Success,
    /// Informational follow-up.
    #[default]
    Info,
    /// Something needs attention soon.
    Warning,
    /// Something went wrong.
    Alert,
}

/// Optional navigation target attached to a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    /// Where the action leads, e.g. `/analysis?id=3`.
    pub target: String,
    /// Label shown on the action.
    pub label: String,
}

/// An alert shown to the user. Lives only for the session; never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique id.
    pub id: String,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Category.
    pub kind: NotificationKind,
    /// Creation instant.
    pub timestamp: DateTime<Utc>,
    /// Whether the user has seen it.
    pub read: bool,
    /// Optional navigation target.
    pub action: Option<NotificationAction>,
}

impl Notification {
    /// Creates an unread notification stamped with the current time.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> Self {
        Self {
            id: generate_id(),
            title: title.into(),
            message: message.into(),
            kind,
            timestamp: Utc::now(),
            read: false,
            action: None,
        }
    }

    /// Attaches a navigation action.
    #[must_use]
    pub fn with_action(mut self, target: impl Into<String>, label: impl Into<String>) -> Self {
        self.action = Some(NotificationAction {
            target: target.into(),
            label: label.into(),
        });
        self
    }
}
