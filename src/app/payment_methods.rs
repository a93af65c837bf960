use crate::app::{session_validity, timestamped_reference};
use crate::core::client::PalClient;
use crate::core::hpp::HostedPaymentPages;
use crate::core::{Example, Outcome, Report, Result};
use crate::domain::model::DirectoryLookupRequest;
use async_trait::async_trait;
use chrono::Utc;

/// 依國家、幣別與金額查詢 HPP skin 可用的付款方式
#[derive(Debug, Clone)]
pub struct GetPaymentMethods {
    pub skin_code: String,
    pub hmac_key: String,
    pub country_code: String,
    pub currency_code: String,
    pub payment_amount: i64,
    pub merchant_reference: String,
}

impl GetPaymentMethods {
    pub fn new(skin_code: impl Into<String>, hmac_key: impl Into<String>) -> Self {
        Self {
            skin_code: skin_code.into(),
            hmac_key: hmac_key.into(),
            country_code: "NL".to_string(),
            currency_code: "EUR".to_string(),
            payment_amount: 100,
            merchant_reference: timestamped_reference("TEST-DIRECTORY"),
        }
    }

    pub fn build_request(&self, merchant_account: &str) -> DirectoryLookupRequest {
        DirectoryLookupRequest {
            merchant_account: merchant_account.to_string(),
            skin_code: self.skin_code.clone(),
            country_code: self.country_code.clone(),
            currency_code: self.currency_code.clone(),
            payment_amount: self.payment_amount,
            merchant_reference: self.merchant_reference.clone(),
            session_validity: session_validity(Utc::now()),
        }
    }
}

#[async_trait]
impl Example for GetPaymentMethods {
    fn name(&self) -> &str {
        "GetPaymentMethods"
    }

    async fn execute(&self, client: &PalClient) -> Result<Outcome> {
        let request = self.build_request(client.merchant_account());
        let methods = HostedPaymentPages::new(client)
            .directory_lookup(&request, &self.hmac_key)
            .await?;
        Ok(Outcome::Completed(Report::from(methods.as_slice())))
    }
}
