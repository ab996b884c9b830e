//! Notification channels for member receipts
//!
//! Delivery is simulated: notifiers format an acknowledgment instead of
//! talking to a mail or SMS gateway.

use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Delivery channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
}

impl Channel {
    /// Label used in acknowledgments
    pub fn label(&self) -> &'static str {
        match self {
            Channel::Email => "EMAIL",
            Channel::Sms => "SMS",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Channel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email" => Ok(Channel::Email),
            "sms" => Ok(Channel::Sms),
            _ => Err(AppError::UnknownChannel(s.trim().to_string())),
        }
    }
}

/// Something that can deliver a message to a member's contact handle
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn channel(&self) -> Channel;

    /// Send a message and return a human-readable acknowledgment
    fn send(&self, to: &str, message: &str) -> AppResult<String>;
}

#[derive(Debug, Clone, Default)]
pub struct EmailNotifier;

impl Notifier for EmailNotifier {
    fn channel(&self) -> Channel {
        Channel::Email
    }

    fn send(&self, to: &str, message: &str) -> AppResult<String> {
        Ok(format!("EMAIL sent to: {} | Message: {}", to, message))
    }
}

#[derive(Debug, Clone, Default)]
pub struct SmsNotifier;

impl Notifier for SmsNotifier {
    fn channel(&self) -> Channel {
        Channel::Sms
    }

    fn send(&self, to: &str, message: &str) -> AppResult<String> {
        Ok(format!("SMS sent to: {} | Message: {}", to, message))
    }
}

/// Builds the notifier for a channel name
#[derive(Debug, Clone, Copy, Default)]
pub struct NotifierFactory;

impl NotifierFactory {
    pub fn new() -> Self {
        Self
    }

    /// Create a notifier from a case-insensitive channel name (`email`, `sms`)
    pub fn create(&self, kind: &str) -> AppResult<Box<dyn Notifier>> {
        Ok(Self::for_channel(kind.parse()?))
    }

    pub fn for_channel(channel: Channel) -> Box<dyn Notifier> {
        match channel {
            Channel::Email => Box::new(EmailNotifier),
            Channel::Sms => Box::new(SmsNotifier),
        }
    }
}
