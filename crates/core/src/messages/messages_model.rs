//! Notification message models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MessageSeverity {
    Info,
    Success,
    Warning,
    Error,
}

/// What produced a message; the dashboard styles and filters by kind.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MessageKind {
    /// Standing weekend notice, recomputed per login
    Weekend,
    /// Portfolio moved since the previous login
    ValueChange,
    /// Explicitly posted, shown until dismissed
    OneTime,
}

/// One notification ready for display.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Only one-time messages carry an id (needed to dismiss them)
    pub id: Option<String>,
    pub text: String,
    pub severity: MessageSeverity,
    pub kind: MessageKind,
}

impl Message {
    pub fn is_dismissible(&self) -> bool {
        self.kind == MessageKind::OneTime
    }
}

/// A persisted one-time message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredMessage {
    pub id: String,
    pub text: String,
    pub severity: MessageSeverity,
    pub created: DateTime<Utc>,
}

/// Per-user message box: pending one-time messages and the dismissed pile.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserMessages {
    pub one_time: Vec<StoredMessage>,
    pub dismissed: Vec<StoredMessage>,
}

/// Login history used for the value-change notice.
///
/// The previous pair is kept alongside the last one so the notice can be
/// computed for the login that is currently being recorded.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserHistory {
    pub last_login: Option<DateTime<Utc>>,
    pub last_portfolio_value: Option<Decimal>,
    pub previous_login: Option<DateTime<Utc>>,
    pub previous_portfolio_value: Option<Decimal>,
}
