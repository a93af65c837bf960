//! Hosted Payment Pages：directory lookup 與 HMAC-SHA256 簽名

use crate::core::client::PalClient;
use crate::domain::model::{DirectoryLookupRequest, DirectoryLookupResult, PaymentMethod};
use crate::utils::error::{PalError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::collections::BTreeMap;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_FIELD: &str = "merchantSig";

/// `\` → `\\`，`:` → `\:`
pub fn escape_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace(':', "\\:")
}

/// 簽名字串：排序後的 key 以 `:` 串接，再接上相同順序、跳脫過的 value
pub fn signing_string(fields: &BTreeMap<String, String>) -> String {
    let keys: Vec<String> = fields.keys().map(|k| escape_value(k)).collect();
    let values: Vec<String> = fields.values().map(|v| escape_value(v)).collect();
    format!("{}:{}", keys.join(":"), values.join(":"))
}

pub fn sign(fields: &BTreeMap<String, String>, hmac_key_hex: &str) -> Result<String> {
    let key = hex::decode(hmac_key_hex).map_err(|e| PalError::SigningError {
        message: format!("HMAC key is not valid hex: {}", e),
    })?;

    let mut mac = HmacSha256::new_from_slice(&key).map_err(|e| PalError::SigningError {
        message: e.to_string(),
    })?;
    mac.update(signing_string(fields).as_bytes());

    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

pub struct HostedPaymentPages<'a> {
    client: &'a PalClient,
}

impl<'a> HostedPaymentPages<'a> {
    pub fn new(client: &'a PalClient) -> Self {
        Self { client }
    }

    pub async fn directory_lookup(
        &self,
        request: &DirectoryLookupRequest,
        hmac_key_hex: &str,
    ) -> Result<Vec<PaymentMethod>> {
        tracing::info!(
            "📚 Directory lookup country={} currency={}",
            request.country_code,
            request.currency_code
        );

        let mut fields = request.fields();
        let signature = sign(&fields, hmac_key_hex)?;
        fields.insert(SIGNATURE_FIELD.to_string(), signature);
        let fields: Vec<(String, String)> = fields.into_iter().collect();

        let result: DirectoryLookupResult = self
            .client
            .post_signed_form(&self.client.hpp_url("directory.shtml"), &fields)
            .await?;

        tracing::debug!("Received {} payment methods", result.payment_methods.len());
        Ok(result.payment_methods)
    }
}
