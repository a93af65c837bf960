use crate::core::client::PalClient;
use crate::core::modification::{Modification, ModificationAction};
use crate::core::{Example, Outcome, Report, Result};
use crate::domain::model::{Amount, ModificationRequest};
use async_trait::async_trait;

/// capture / cancel / refund / cancelOrRefund 共用同一個請求形狀
#[derive(Debug, Clone)]
pub struct ModificationExample {
    pub action: ModificationAction,
    pub original_reference: String,
    pub reference: Option<String>,
    pub amount: Option<Amount>,
}

impl ModificationExample {
    pub fn capture(original_reference: impl Into<String>, amount: Amount) -> Self {
        Self::with_action(ModificationAction::Capture, original_reference, Some(amount))
    }

    pub fn cancel(original_reference: impl Into<String>) -> Self {
        Self::with_action(ModificationAction::Cancel, original_reference, None)
    }

    pub fn refund(original_reference: impl Into<String>, amount: Amount) -> Self {
        Self::with_action(ModificationAction::Refund, original_reference, Some(amount))
    }

    pub fn cancel_or_refund(original_reference: impl Into<String>) -> Self {
        Self::with_action(ModificationAction::CancelOrRefund, original_reference, None)
    }

    fn with_action(
        action: ModificationAction,
        original_reference: impl Into<String>,
        amount: Option<Amount>,
    ) -> Self {
        Self {
            action,
            original_reference: original_reference.into(),
            reference: Some("YourReference".to_string()),
            amount,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn build_request(&self, merchant_account: &str) -> ModificationRequest {
        ModificationRequest {
            merchant_account: merchant_account.to_string(),
            original_reference: self.original_reference.clone(),
            reference: self.reference.clone(),
            modification_amount: self.amount.clone(),
        }
    }
}

#[async_trait]
impl Example for ModificationExample {
    fn name(&self) -> &str {
        match self.action {
            ModificationAction::Capture => "CapturePayment",
            ModificationAction::Cancel => "CancelPayment",
            ModificationAction::Refund => "RefundPayment",
            ModificationAction::CancelOrRefund => "CancelOrRefundPayment",
        }
    }

    async fn execute(&self, client: &PalClient) -> Result<Outcome> {
        let request = self.build_request(client.merchant_account());
        let result = Modification::new(client)
            .modify(self.action, &request)
            .await?;
        Ok(Outcome::Completed(Report::from(&result)))
    }
}
