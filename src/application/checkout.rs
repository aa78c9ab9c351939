use crate::domain::checkout::{CheckoutRequest, CheckoutResult, ReaderTarget};
use crate::domain::ports::CheckoutGatewayBox;
use crate::error::Result;

/// Starts a payment on one card reader.
///
/// Each call creates a new remote checkout. Nothing is retried: any error
/// from the gateway is returned to the caller as-is.
pub struct CheckoutInitiator {
    gateway: CheckoutGatewayBox,
    target: ReaderTarget,
}

impl CheckoutInitiator {
    pub fn new(gateway: CheckoutGatewayBox, target: ReaderTarget) -> Self {
        Self { gateway, target }
    }

    pub fn target(&self) -> &ReaderTarget {
        &self.target
    }

    pub async fn initiate(&self, request: &CheckoutRequest) -> Result<CheckoutResult> {
        tracing::info!(
            merchant_code = self.target.merchant_code(),
            reader_id = self.target.reader_id(),
            amount = %request,
            "creating reader checkout"
        );

        let result = self.gateway.create_checkout(&self.target, request).await?;

        tracing::info!(
            transaction_id = %result.transaction_id,
            "reader checkout created"
        );
        Ok(result)
    }
}
