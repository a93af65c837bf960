use crate::core::client::PalClient;
use crate::core::form;
use crate::domain::model::{PaymentRequest, PaymentRequest3d, PaymentResult};
use crate::utils::error::{PalError, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// 請求的送出方式：JSON servlet 或 HTTP-POST adapter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Transport {
    #[default]
    Json,
    HttpPost,
}

pub struct Payment<'a> {
    client: &'a PalClient,
}

impl<'a> Payment<'a> {
    pub fn new(client: &'a PalClient) -> Self {
        Self { client }
    }

    pub async fn authorise(&self, request: &PaymentRequest) -> Result<PaymentResult> {
        tracing::info!("💳 Payment.authorise reference={}", request.reference);
        let url = self.client.servlet_url("Payment", "authorise");
        self.client.post_json(&url, request).await
    }

    pub async fn authorise_3d(&self, request: &PaymentRequest3d) -> Result<PaymentResult> {
        tracing::info!("🔐 Payment.authorise3d");
        let url = self.client.servlet_url("Payment", "authorise3d");
        self.client.post_json(&url, request).await
    }

    pub async fn authorise_http_post(&self, request: &PaymentRequest) -> Result<PaymentResult> {
        tracing::info!(
            "💳 Payment.authorise (http post) reference={}",
            request.reference
        );
        let mut fields = vec![("action".to_string(), "Payment.authorise".to_string())];
        fields.extend(form::flatten("paymentRequest", request)?);
        self.http_post(fields).await
    }

    pub async fn authorise_3d_http_post(
        &self,
        request: &PaymentRequest3d,
    ) -> Result<PaymentResult> {
        tracing::info!("🔐 Payment.authorise3d (http post)");
        let mut fields = vec![("action".to_string(), "Payment.authorise3d".to_string())];
        fields.extend(form::flatten("paymentRequest3d", request)?);
        self.http_post(fields).await
    }

    pub async fn authorise_with(
        &self,
        transport: Transport,
        request: &PaymentRequest,
    ) -> Result<PaymentResult> {
        match transport {
            Transport::Json => self.authorise(request).await,
            Transport::HttpPost => self.authorise_http_post(request).await,
        }
    }

    pub async fn authorise_3d_with(
        &self,
        transport: Transport,
        request: &PaymentRequest3d,
    ) -> Result<PaymentResult> {
        match transport {
            Transport::Json => self.authorise_3d(request).await,
            Transport::HttpPost => self.authorise_3d_http_post(request).await,
        }
    }

    async fn http_post(&self, fields: Vec<(String, String)>) -> Result<PaymentResult> {
        let response = self
            .client
            .post_form(&self.client.http_post_url(), &fields)
            .await?;
        payment_result_from_fields(&response)
    }
}

pub(crate) fn payment_result_from_fields(fields: &HashMap<String, String>) -> Result<PaymentResult> {
    if !fields.keys().any(|k| k.starts_with("paymentResult.")) {
        return Err(PalError::MalformedResponse {
            message: "response contains no paymentResult fields".to_string(),
        });
    }
    let value = form::unflatten_prefixed(fields, "paymentResult");
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_result_from_fields() {
        let fields = form::parse_query_string(
            "paymentResult.pspReference=8813760000000001&paymentResult.resultCode=Authorised&paymentResult.authCode=64158",
        );
        let result = payment_result_from_fields(&fields).unwrap();

        assert_eq!(result.psp_reference.as_deref(), Some("8813760000000001"));
        assert_eq!(result.auth_code.as_deref(), Some("64158"));
        assert!(result.refusal_reason.is_none());
    }

    #[test]
    fn test_payment_result_from_fields_requires_prefix() {
        let fields = form::parse_query_string("unexpected=1");
        assert!(matches!(
            payment_result_from_fields(&fields),
            Err(PalError::MalformedResponse { .. })
        ));
    }
}
