use crate::core::client::PalClient;
use crate::core::recurring::RecurringService;
use crate::core::{Example, Outcome, Report, Result};
use crate::domain::model::{ContractType, DisableRequest, Recurring, RecurringDetailsRequest};
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct RetrieveRecurringContract {
    pub shopper_reference: String,
    pub contract: ContractType,
}

impl RetrieveRecurringContract {
    pub fn new(shopper_reference: impl Into<String>) -> Self {
        Self {
            shopper_reference: shopper_reference.into(),
            contract: ContractType::OneClick,
        }
    }

    pub fn build_request(&self, merchant_account: &str) -> RecurringDetailsRequest {
        RecurringDetailsRequest {
            merchant_account: merchant_account.to_string(),
            shopper_reference: self.shopper_reference.clone(),
            recurring: Some(Recurring {
                contract: self.contract,
            }),
        }
    }
}

#[async_trait]
impl Example for RetrieveRecurringContract {
    fn name(&self) -> &str {
        "RetrieveRecurringContract"
    }

    async fn execute(&self, client: &PalClient) -> Result<Outcome> {
        let request = self.build_request(client.merchant_account());
        let result = RecurringService::new(client)
            .list_recurring_details(&request)
            .await?;
        Ok(Outcome::Completed(Report::from(&result)))
    }
}

/// 不指定 recurringDetailReference 時會停用該購物者的所有合約
#[derive(Debug, Clone)]
pub struct DisableRecurringContract {
    pub shopper_reference: String,
    pub recurring_detail_reference: Option<String>,
}

impl DisableRecurringContract {
    pub fn new(
        shopper_reference: impl Into<String>,
        recurring_detail_reference: Option<String>,
    ) -> Self {
        Self {
            shopper_reference: shopper_reference.into(),
            recurring_detail_reference,
        }
    }

    pub fn build_request(&self, merchant_account: &str) -> DisableRequest {
        DisableRequest {
            merchant_account: merchant_account.to_string(),
            shopper_reference: self.shopper_reference.clone(),
            recurring_detail_reference: self.recurring_detail_reference.clone(),
        }
    }
}

#[async_trait]
impl Example for DisableRecurringContract {
    fn name(&self) -> &str {
        "DisableRecurringContract"
    }

    async fn execute(&self, client: &PalClient) -> Result<Outcome> {
        let request = self.build_request(client.merchant_account());
        let result = RecurringService::new(client).disable(&request).await?;
        Ok(Outcome::Completed(Report::from(&result)))
    }
}
