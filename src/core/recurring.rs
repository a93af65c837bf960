use crate::core::client::PalClient;
use crate::domain::model::{
    DisableRequest, DisableResult, RecurringDetailsRequest, RecurringDetailsResult,
};
use crate::utils::error::Result;

pub struct RecurringService<'a> {
    client: &'a PalClient,
}

impl<'a> RecurringService<'a> {
    pub fn new(client: &'a PalClient) -> Self {
        Self { client }
    }

    pub async fn list_recurring_details(
        &self,
        request: &RecurringDetailsRequest,
    ) -> Result<RecurringDetailsResult> {
        tracing::info!(
            "📇 Recurring.listRecurringDetails shopperReference={}",
            request.shopper_reference
        );
        let url = self.client.servlet_url("Recurring", "listRecurringDetails");
        let result: RecurringDetailsResult = self.client.post_json(&url, request).await?;
        tracing::debug!("Found {} recurring details", result.details.len());
        Ok(result)
    }

    pub async fn disable(&self, request: &DisableRequest) -> Result<DisableResult> {
        tracing::info!(
            "🚫 Recurring.disable shopperReference={}",
            request.shopper_reference
        );
        let url = self.client.servlet_url("Recurring", "disable");
        self.client.post_json(&url, request).await
    }
}
