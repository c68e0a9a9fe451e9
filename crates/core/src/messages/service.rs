//! Login-time message generation and one-time message lifecycle.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::constants::PERCENT_PRECISION;
use crate::errors::Result;
use crate::translations::{self, Language};
use crate::users::User;
use crate::utils::time_utils;

use super::messages_model::{Message, MessageKind, MessageSeverity, StoredMessage, UserMessages};
use super::store::MessageStore;

pub struct MessageService {
    store: MessageStore,
}

impl MessageService {
    pub fn new(store: MessageStore) -> Self {
        Self { store }
    }

    /// Messages the dashboard shows for a login right now.
    ///
    /// The dashboard currently surfaces only the weekend notice here; the
    /// value-change and one-time messages are produced by their own methods
    /// so the caller decides where to place them.
    pub fn user_messages(&self, username: &str) -> Vec<Message> {
        let language = translations::language_for_user(username);
        self.weekend_message_for_date(language, time_utils::market_date_today())
            .into_iter()
            .collect()
    }

    /// The weekend notice, when the exchange is closed today.
    pub fn weekend_message(&self, language: Language) -> Option<Message> {
        self.weekend_message_for_date(language, time_utils::market_date_today())
    }

    pub(crate) fn weekend_message_for_date(
        &self,
        language: Language,
        date: chrono::NaiveDate,
    ) -> Option<Message> {
        if !time_utils::is_weekend(date) {
            return None;
        }
        Some(Message {
            id: None,
            text: translations::weekend_notice(language).to_string(),
            severity: MessageSeverity::Info,
            kind: MessageKind::Weekend,
        })
    }

    /// A notice describing how the portfolio moved since the previous login.
    ///
    /// Returns `None` when there is no previous login to compare against or
    /// when the previous login was earlier today.
    pub fn value_change_message(
        &self,
        username: &str,
        current_value: Decimal,
    ) -> Option<Message> {
        self.value_change_message_at(username, current_value, Utc::now())
    }

    pub(crate) fn value_change_message_at(
        &self,
        username: &str,
        current_value: Decimal,
        now: DateTime<Utc>,
    ) -> Option<Message> {
        let history = self.store.load_history();
        let entry = history.get(username)?;
        let previous_login = entry.previous_login?;
        let previous_value = entry.previous_portfolio_value?;

        let days_ago = (time_utils::market_date_from_utc(now)
            - time_utils::market_date_from_utc(previous_login))
        .num_days();
        if days_ago < 1 {
            return None;
        }

        let change = current_value - previous_value;
        let change_pct = change
            .checked_div(previous_value)
            .map(|r| (r * Decimal::ONE_HUNDRED).round_dp(PERCENT_PRECISION))
            .unwrap_or(Decimal::ZERO);

        let severity = if change > Decimal::ZERO {
            MessageSeverity::Success
        } else if change < Decimal::ZERO {
            MessageSeverity::Error
        } else {
            MessageSeverity::Info
        };

        let language = translations::language_for_user(username);
        Some(Message {
            id: None,
            text: translations::value_change_notice(language, change, change_pct, days_ago),
            severity,
            kind: MessageKind::ValueChange,
        })
    }

    /// Records a login, rotating the stored last login into the previous slot.
    pub fn update_last_login(&self, username: &str, portfolio_value: Decimal) -> Result<()> {
        self.update_last_login_at(username, portfolio_value, Utc::now())
    }

    pub(crate) fn update_last_login_at(
        &self,
        username: &str,
        portfolio_value: Decimal,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let mut history = self.store.load_history();
        let entry = history.entry(username.to_string()).or_default();
        entry.previous_login = entry.last_login;
        entry.previous_portfolio_value = entry.last_portfolio_value;
        entry.last_login = Some(now);
        entry.last_portfolio_value = Some(portfolio_value);
        self.store.save_history(&history)
    }

    /// Posts a one-time message to a single user.
    pub fn add_one_time_message(
        &self,
        username: &str,
        text: &str,
        severity: MessageSeverity,
    ) -> Result<()> {
        let mut messages = self.store.load_messages();
        Self::push_one_time(&mut messages, username, text, severity);
        self.store.save_messages(&messages)
    }

    /// Posts the same one-time message to every configured user.
    pub fn add_global_one_time_message(
        &self,
        users: &[User],
        text: &str,
        severity: MessageSeverity,
    ) -> Result<()> {
        let mut messages = self.store.load_messages();
        for user in users {
            Self::push_one_time(&mut messages, &user.username, text, severity);
        }
        self.store.save_messages(&messages)
    }

    /// One-time messages the user has not dismissed yet.
    pub fn pending_messages(&self, username: &str) -> Vec<Message> {
        let messages = self.store.load_messages();
        messages
            .get(username)
            .map(|inbox| {
                inbox
                    .one_time
                    .iter()
                    .map(|stored| Message {
                        id: Some(stored.id.clone()),
                        text: stored.text.clone(),
                        severity: stored.severity,
                        kind: MessageKind::OneTime,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Moves a one-time message into the dismissed pile.
    ///
    /// Dismissing an unknown id is a no-op.
    pub fn dismiss_message(&self, username: &str, id: &str) -> Result<()> {
        let mut messages = self.store.load_messages();
        let Some(inbox) = messages.get_mut(username) else {
            return Ok(());
        };
        let Some(index) = inbox.one_time.iter().position(|m| m.id == id) else {
            return Ok(());
        };
        let dismissed = inbox.one_time.remove(index);
        inbox.dismissed.push(dismissed);
        self.store.save_messages(&messages)
    }

    fn push_one_time(
        messages: &mut std::collections::HashMap<String, UserMessages>,
        username: &str,
        text: &str,
        severity: MessageSeverity,
    ) {
        let inbox = messages.entry(username.to_string()).or_default();
        let created = Utc::now();
        // Millis plus an inbox ordinal keeps ids unique within a user
        let id = format!(
            "msg-{}-{}",
            created.timestamp_millis(),
            inbox.one_time.len() + inbox.dismissed.len()
        );
        inbox.one_time.push(StoredMessage {
            id,
            text: text.to_string(),
            severity,
            created,
        });
    }
}
