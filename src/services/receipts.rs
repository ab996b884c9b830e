//! Borrow and return receipts sent to members

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::notify::{Channel, Notifier, NotifierFactory};
use crate::{error::AppResult, models::Book};

/// Record of a receipt handed to a notifier
#[derive(Debug, Clone, Serialize)]
pub struct Delivery {
    pub id: Uuid,
    pub channel: Channel,
    pub to: String,
    pub acknowledgment: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ReceiptService {
    notifier: Arc<dyn Notifier>,
}

impl ReceiptService {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Receipt service on the configured default channel
    pub fn from_channel_name(kind: &str) -> AppResult<Self> {
        let notifier: Arc<dyn Notifier> = NotifierFactory::new().create(kind)?.into();
        Ok(Self::new(notifier))
    }

    pub fn channel(&self) -> Channel {
        self.notifier.channel()
    }

    pub fn borrow_receipt(&self, to: &str, book: &Book) -> AppResult<Delivery> {
        let message = format!(
            "Receipt: You borrowed '{}' by '{}'",
            book.title(),
            book.author()
        );
        self.send(to, &message)
    }

    pub fn return_receipt(&self, to: &str, book: &Book) -> AppResult<Delivery> {
        let message = format!("Receipt: You successfully returned '{}'", book.title());
        self.send(to, &message)
    }

    fn send(&self, to: &str, message: &str) -> AppResult<Delivery> {
        let acknowledgment = self.notifier.send(to, message)?;
        let delivery = Delivery {
            id: Uuid::new_v4(),
            channel: self.notifier.channel(),
            to: to.to_string(),
            acknowledgment,
            sent_at: Utc::now(),
        };
        tracing::debug!(id = %delivery.id, channel = %delivery.channel, to = %to, "Receipt sent");
        Ok(delivery)
    }
}
