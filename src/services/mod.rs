//! Business logic services

pub mod catalog;
pub mod loans;
pub mod members;
pub mod notify;
pub mod receipts;

use crate::{config::AppConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub members: members::MembersService,
    pub loans: loans::LoansService,
    pub receipts: receipts::ReceiptService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> AppResult<Self> {
        Ok(Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            members: members::MembersService::new(repository.clone()),
            loans: loans::LoansService::new(repository),
            receipts: receipts::ReceiptService::from_channel_name(
                &config.notifications.default_channel,
            )?,
        })
    }
}
