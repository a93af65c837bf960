use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub currency: String,
    /// 最小貨幣單位 (EUR 1,00 = 100)
    pub value: i64,
}

impl Amount {
    pub fn new(currency: impl Into<String>, value: i64) -> Self {
        Self {
            currency: currency.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub house_number_or_name: String,
    pub city: String,
    pub postal_code: String,
    pub state_or_province: String,
    pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
}

impl Card {
    pub fn new(
        number: impl Into<String>,
        holder_name: impl Into<String>,
        expiry_month: impl Into<String>,
        expiry_year: impl Into<String>,
        cvc: impl Into<String>,
    ) -> Self {
        Self {
            number: Some(number.into()),
            expiry_month: Some(expiry_month.into()),
            expiry_year: Some(expiry_year.into()),
            holder_name: Some(holder_name.into()),
            cvc: Some(cvc.into()),
            billing_address: None,
        }
    }

    /// One-click 定期付款只需要 CVC
    pub fn cvc_only(cvc: impl Into<String>) -> Self {
        Self {
            cvc: Some(cvc.into()),
            ..Default::default()
        }
    }

    pub fn with_billing_address(mut self, address: Address) -> Self {
        self.billing_address = Some(address);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserInfo {
    pub user_agent: String,
    pub accept_header: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractType {
    #[serde(rename = "ONECLICK")]
    OneClick,
    #[serde(rename = "RECURRING")]
    Recurring,
    #[serde(rename = "ONECLICK,RECURRING")]
    OneClickRecurring,
    #[serde(rename = "PAYOUT")]
    Payout,
}

impl std::str::FromStr for ContractType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ONECLICK" => Ok(ContractType::OneClick),
            "RECURRING" => Ok(ContractType::Recurring),
            "ONECLICK,RECURRING" => Ok(ContractType::OneClickRecurring),
            "PAYOUT" => Ok(ContractType::Payout),
            other => Err(format!("unknown recurring contract: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurring {
    pub contract: ContractType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub merchant_account: String,
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    #[serde(rename = "shopperIP", skip_serializing_if = "Option::is_none")]
    pub shopper_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shopper_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shopper_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fraud_offset: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_info: Option<BrowserInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_data: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring: Option<Recurring>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_recurring_detail_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shopper_interaction: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest3d {
    pub merchant_account: String,
    pub md: String,
    pub pa_response: String,
    #[serde(rename = "shopperIP", skip_serializing_if = "Option::is_none")]
    pub shopper_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_info: Option<BrowserInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultCode {
    Authorised,
    Refused,
    Error,
    Received,
    RedirectShopper,
    Cancelled,
    Pending,
    Other(String),
}

impl From<&str> for ResultCode {
    fn from(value: &str) -> Self {
        match value {
            "Authorised" => ResultCode::Authorised,
            "Refused" => ResultCode::Refused,
            "Error" => ResultCode::Error,
            "Received" => ResultCode::Received,
            "RedirectShopper" => ResultCode::RedirectShopper,
            "Cancelled" => ResultCode::Cancelled,
            "Pending" => ResultCode::Pending,
            other => ResultCode::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    pub psp_reference: Option<String>,
    pub result_code: Option<String>,
    pub auth_code: Option<String>,
    pub refusal_reason: Option<String>,
    pub issuer_url: Option<String>,
    pub pa_request: Option<String>,
    pub md: Option<String>,
    pub additional_data: Option<BTreeMap<String, String>>,
}

impl PaymentResult {
    pub fn result_code(&self) -> Option<ResultCode> {
        self.result_code.as_deref().map(ResultCode::from)
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self.result_code(), Some(ResultCode::RedirectShopper))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificationRequest {
    pub merchant_account: String,
    pub original_reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modification_amount: Option<Amount>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificationResult {
    pub psp_reference: Option<String>,
    pub response: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringDetailsRequest {
    pub merchant_account: String,
    pub shopper_reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring: Option<Recurring>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringDetail {
    pub recurring_detail_reference: Option<String>,
    pub variant: Option<String>,
    pub creation_date: Option<String>,
    pub bank: Option<serde_json::Value>,
    pub card: Option<serde_json::Value>,
    pub elv: Option<serde_json::Value>,
    pub name: Option<String>,
}

/// 遠端把每一筆明細包在 `{"RecurringDetail": {...}}` 裡
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringDetailEntry {
    #[serde(rename = "RecurringDetail")]
    pub recurring_detail: RecurringDetail,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringDetailsResult {
    pub creation_date: Option<String>,
    pub last_known_shopper_email: Option<String>,
    pub shopper_reference: Option<String>,
    #[serde(default)]
    pub details: Vec<RecurringDetailEntry>,
}

impl RecurringDetailsResult {
    pub fn recurring_details(&self) -> impl Iterator<Item = &RecurringDetail> {
        self.details.iter().map(|entry| &entry.recurring_detail)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisableRequest {
    pub merchant_account: String,
    pub shopper_reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_detail_reference: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisableResult {
    pub response: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryLookupRequest {
    pub merchant_account: String,
    pub skin_code: String,
    pub country_code: String,
    pub currency_code: String,
    pub payment_amount: i64,
    pub merchant_reference: String,
    pub session_validity: String,
}

impl DirectoryLookupRequest {
    /// HPP 簽名所用的欄位 (不含 merchantSig)
    pub fn fields(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("countryCode".to_string(), self.country_code.clone()),
            ("currencyCode".to_string(), self.currency_code.clone()),
            ("merchantAccount".to_string(), self.merchant_account.clone()),
            ("merchantReference".to_string(), self.merchant_reference.clone()),
            ("paymentAmount".to_string(), self.payment_amount.to_string()),
            ("sessionValidity".to_string(), self.session_validity.clone()),
            ("skinCode".to_string(), self.skin_code.clone()),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issuer {
    pub issuer_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    pub brand_code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issuers: Vec<Issuer>,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.brand_code)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryLookupResult {
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub status: Option<u16>,
    pub error_code: Option<String>,
    pub message: Option<String>,
    pub error_type: Option<String>,
    pub psp_reference: Option<String>,
}

impl ApiErrorBody {
    /// 至少要有一個錯誤欄位才算是遠端的錯誤回應
    pub fn is_populated(&self) -> bool {
        self.error_code.is_some() || self.error_type.is_some() || self.message.is_some()
    }
}

/// 測試或正式環境
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Environment {
    #[default]
    Test,
    Live,
}

impl Environment {
    pub fn pal_base_url(&self) -> &'static str {
        match self {
            Environment::Test => "https://pal-test.adyen.com/pal",
            Environment::Live => "https://pal-live.adyen.com/pal",
        }
    }

    pub fn hpp_base_url(&self) -> &'static str {
        match self {
            Environment::Test => "https://test.adyen.com/hpp",
            Environment::Live => "https://live.adyen.com/hpp",
        }
    }
}

/// `RedirectShopper` 時交給購物者瀏覽器的欄位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreeDSecureRedirect {
    pub issuer_url: String,
    pub pa_request: String,
    pub md: String,
    pub term_url: String,
}
