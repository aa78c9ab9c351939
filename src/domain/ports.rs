use super::checkout::{CheckoutRequest, CheckoutResult, ReaderTarget};
use super::transaction::{StatusQuery, TransactionStatus};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    async fn create_checkout(
        &self,
        target: &ReaderTarget,
        request: &CheckoutRequest,
    ) -> Result<CheckoutResult>;
}

/// A single, unretried status lookup.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self, query: &StatusQuery) -> Result<TransactionStatus>;
}

pub type CheckoutGatewayBox = Box<dyn CheckoutGateway>;
pub type StatusSourceBox = Box<dyn StatusSource>;
