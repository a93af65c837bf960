use crate::core::form;
use crate::domain::model::ApiErrorBody;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PalError, Result};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

/// 帶 web service user 憑證的 HTTP client
#[derive(Debug, Clone)]
pub struct PalClient {
    client: Client,
    ws_user: String,
    ws_password: String,
    merchant_account: String,
    pal_base_url: String,
    hpp_base_url: String,
}

impl PalClient {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .user_agent(format!(
                "{} ({}/{})",
                config.application_name(),
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            client,
            ws_user: config.ws_user().to_string(),
            ws_password: config.ws_password().to_string(),
            merchant_account: config.merchant_account().to_string(),
            pal_base_url: config.pal_base_url(),
            hpp_base_url: config.hpp_base_url(),
        })
    }

    pub fn merchant_account(&self) -> &str {
        &self.merchant_account
    }

    /// `servlet/{service}/v10/{action}`
    pub fn servlet_url(&self, service: &str, action: &str) -> String {
        format!("{}/servlet/{}/v10/{}", self.pal_base_url, service, action)
    }

    pub fn http_post_url(&self) -> String {
        format!("{}/adapter/httppost", self.pal_base_url)
    }

    pub fn hpp_url(&self, page: &str) -> String {
        format!("{}/{}", self.hpp_base_url, page)
    }

    /// JSON 請求；非 200 時回傳遠端的 `errorType errorCode message`
    pub async fn post_json<Req, Resp>(&self, url: &str, request: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        tracing::debug!("📤 POST {} (json)", url);
        let response = self
            .client
            .post(url)
            .basic_auth(&self.ws_user, Some(&self.ws_password))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("📥 {} {} ({} bytes)", url, status, body.len());

        if status != StatusCode::OK {
            return Err(api_error(status, body));
        }

        serde_json::from_str(&body).map_err(|e| PalError::MalformedResponse {
            message: format!("cannot parse response from {}: {}", url, e),
        })
    }

    /// HTTP-POST adapter：表單送出、回應是 query string
    pub async fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> Result<HashMap<String, String>> {
        let body = self.send_form(url, fields, true).await?;
        Ok(form::parse_query_string(&body))
    }

    /// HPP 表單請求 (以簽名驗證，不需要 basic auth)，回應為 JSON
    pub async fn post_signed_form<Resp: DeserializeOwned>(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> Result<Resp> {
        let body = self.send_form(url, fields, false).await?;
        serde_json::from_str(&body).map_err(|e| PalError::MalformedResponse {
            message: format!("cannot parse response from {}: {}", url, e),
        })
    }

    async fn send_form(
        &self,
        url: &str,
        fields: &[(String, String)],
        authenticated: bool,
    ) -> Result<String> {
        tracing::debug!("📤 POST {} (form, {} fields)", url, fields.len());
        let mut request = self.client.post(url).form(fields);
        if authenticated {
            request = request.basic_auth(&self.ws_user, Some(&self.ws_password));
        }
        let response: Response = request.send().await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("📥 {} {} ({} bytes)", url, status, body.len());

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            return Err(PalError::ServerError { body });
        }
        if status != StatusCode::OK {
            return Err(PalError::UnexpectedStatus {
                status_line: status_line(status),
                body,
            });
        }

        Ok(body)
    }
}

fn status_line(status: StatusCode) -> String {
    format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    )
}

fn api_error(status: StatusCode, body: String) -> PalError {
    match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(error) if error.is_populated() => {
            tracing::warn!(
                "⚠️ Request rejected: {} {} {}",
                error.error_type.as_deref().unwrap_or_default(),
                error.error_code.as_deref().unwrap_or_default(),
                error.message.as_deref().unwrap_or_default()
            );
            PalError::ApiError {
                status: error.status.unwrap_or(status.as_u16()),
                error_type: error.error_type.unwrap_or_default(),
                error_code: error.error_code.unwrap_or_default(),
                message: error.message.unwrap_or_default(),
                psp_reference: error.psp_reference,
            }
        }
        _ => PalError::UnexpectedStatus {
            status_line: status_line(status),
            body,
        },
    }
}
