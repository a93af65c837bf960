use crate::core::client::PalClient;
use crate::domain::model::{ModificationRequest, ModificationResult};
use crate::utils::error::Result;

/// 對已授權付款的後續操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModificationAction {
    Capture,
    Cancel,
    Refund,
    CancelOrRefund,
}

impl ModificationAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModificationAction::Capture => "capture",
            ModificationAction::Cancel => "cancel",
            ModificationAction::Refund => "refund",
            ModificationAction::CancelOrRefund => "cancelOrRefund",
        }
    }
}

pub struct Modification<'a> {
    client: &'a PalClient,
}

impl<'a> Modification<'a> {
    pub fn new(client: &'a PalClient) -> Self {
        Self { client }
    }

    pub async fn capture(&self, request: &ModificationRequest) -> Result<ModificationResult> {
        self.modify(ModificationAction::Capture, request).await
    }

    pub async fn cancel(&self, request: &ModificationRequest) -> Result<ModificationResult> {
        self.modify(ModificationAction::Cancel, request).await
    }

    pub async fn refund(&self, request: &ModificationRequest) -> Result<ModificationResult> {
        self.modify(ModificationAction::Refund, request).await
    }

    pub async fn cancel_or_refund(
        &self,
        request: &ModificationRequest,
    ) -> Result<ModificationResult> {
        self.modify(ModificationAction::CancelOrRefund, request).await
    }

    pub async fn modify(
        &self,
        action: ModificationAction,
        request: &ModificationRequest,
    ) -> Result<ModificationResult> {
        tracing::info!(
            "🔁 Payment.{} originalReference={}",
            action.as_str(),
            request.original_reference
        );
        let url = self.client.servlet_url("Payment", action.as_str());
        self.client.post_json(&url, request).await
    }
}
