//! 每一支範例各自組出固定的示範請求，送出後把回應欄位印成報表。

pub mod modifications;
pub mod payment_methods;
pub mod payments;
pub mod recurring;

use crate::domain::model::{Address, Amount, BrowserInfo, Card};
use chrono::{DateTime, Duration, Local, SecondsFormat, TimeZone, Utc};
use std::fmt;

pub const DEFAULT_SHOPPER_IP: &str = "123.123.123.123";
pub const DEFAULT_SHOPPER_EMAIL: &str = "test@example.com";

/// `TEST-PAYMENT-2015-06-25-10:31:06` 這種格式的商家參考號
pub fn timestamped_reference(prefix: &str) -> String {
    format!("{}-{}", prefix, Local::now().format("%Y-%m-%d-%H:%M:%S"))
}

/// CSE 加密表單需要的 generationtime (`yyyy-MM-ddTHH:mm:ss+hh:mm`)
pub fn cse_generation_time<Tz: TimeZone>(now: DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    // 零時差印成 `Z`
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// HPP session 有效期限，預設一天後
pub fn session_validity(now: DateTime<Utc>) -> String {
    (now + Duration::days(1)).to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopperDetails {
    pub ip: String,
    pub email: String,
    pub reference: String,
    pub fraud_offset: i32,
}

impl Default for ShopperDetails {
    fn default() -> Self {
        Self {
            ip: DEFAULT_SHOPPER_IP.to_string(),
            email: DEFAULT_SHOPPER_EMAIL.to_string(),
            reference: "YourReference".to_string(),
            fraud_offset: 0,
        }
    }
}

pub fn sample_amount() -> Amount {
    Amount::new("EUR", 199)
}

pub fn sample_billing_address() -> Address {
    Address {
        street: "Simon Carmiggeltstraat".to_string(),
        house_number_or_name: "6-50".to_string(),
        city: "Amsterdam".to_string(),
        postal_code: "1011 DJ".to_string(),
        state_or_province: String::new(),
        country: "NL".to_string(),
    }
}

/// 測試環境的 MasterCard 測試卡
pub fn sample_card() -> Card {
    Card::new("5555444433331111", "John Doe", "03", "2030", "737")
        .with_billing_address(sample_billing_address())
}

/// 會觸發 3-D Secure 的測試卡
pub fn sample_3d_secure_card() -> Card {
    Card::new("5212345678901234", "John Doe", "03", "2030", "737")
        .with_billing_address(sample_billing_address())
}

pub fn sample_browser_info() -> BrowserInfo {
    BrowserInfo {
        user_agent: "Mozilla/5.0 (X11; Linux x86_64)".to_string(),
        accept_header: "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
            .to_string(),
    }
}
