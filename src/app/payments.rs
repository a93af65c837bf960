use crate::app::{
    sample_3d_secure_card, sample_amount, sample_browser_info, sample_card, timestamped_reference,
    ShopperDetails,
};
use crate::core::client::PalClient;
use crate::core::payment::{Payment, Transport};
use crate::core::{Example, Outcome, Report, Result};
use crate::domain::model::{
    Amount, BrowserInfo, Card, ContractType, PaymentRequest, PaymentRequest3d, Recurring,
    ThreeDSecureRedirect,
};
use crate::utils::error::PalError;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// CSE 加密後卡片資料放在 additionalData 的這個 key
pub const ENCRYPTED_CARD_KEY: &str = "card.encrypted.json";

fn base_request(
    merchant_account: &str,
    reference: &str,
    amount: &Amount,
    shopper: &ShopperDetails,
) -> PaymentRequest {
    PaymentRequest {
        merchant_account: merchant_account.to_string(),
        reference: reference.to_string(),
        amount: Some(amount.clone()),
        shopper_ip: Some(shopper.ip.clone()),
        shopper_email: Some(shopper.email.clone()),
        shopper_reference: Some(shopper.reference.clone()),
        fraud_offset: Some(shopper.fraud_offset),
        ..Default::default()
    }
}

/// 直接以卡號授權 (需要 PCI 合規)
#[derive(Debug, Clone)]
pub struct CreatePaymentApi {
    pub reference: String,
    pub amount: Amount,
    pub shopper: ShopperDetails,
    pub card: Card,
    pub transport: Transport,
}

impl Default for CreatePaymentApi {
    fn default() -> Self {
        Self {
            reference: timestamped_reference("TEST-PAYMENT"),
            amount: sample_amount(),
            shopper: ShopperDetails::default(),
            card: sample_card(),
            transport: Transport::Json,
        }
    }
}

impl CreatePaymentApi {
    pub fn build_request(&self, merchant_account: &str) -> PaymentRequest {
        PaymentRequest {
            card: Some(self.card.clone()),
            ..base_request(merchant_account, &self.reference, &self.amount, &self.shopper)
        }
    }
}

#[async_trait]
impl Example for CreatePaymentApi {
    fn name(&self) -> &str {
        "CreatePaymentAPI"
    }

    async fn execute(&self, client: &PalClient) -> Result<Outcome> {
        let request = self.build_request(client.merchant_account());
        let result = Payment::new(client)
            .authorise_with(self.transport, &request)
            .await?;
        Ok(Outcome::Completed(Report::from(&result)))
    }
}

/// Client-Side Encryption：卡片在瀏覽器加密，伺服器只轉送密文
#[derive(Debug, Clone)]
pub struct CreatePaymentCse {
    pub reference: String,
    pub amount: Amount,
    pub shopper: ShopperDetails,
    pub encrypted_card: String,
}

impl CreatePaymentCse {
    pub fn new(encrypted_card: impl Into<String>) -> Self {
        Self {
            reference: timestamped_reference("TEST-PAYMENT"),
            amount: sample_amount(),
            shopper: ShopperDetails::default(),
            encrypted_card: encrypted_card.into(),
        }
    }

    pub fn build_request(&self, merchant_account: &str) -> Result<PaymentRequest> {
        if self.encrypted_card.trim().is_empty() {
            return Err(PalError::ValidationError {
                message: "encrypted card data is empty".to_string(),
            });
        }

        Ok(PaymentRequest {
            additional_data: Some(BTreeMap::from([(
                ENCRYPTED_CARD_KEY.to_string(),
                self.encrypted_card.clone(),
            )])),
            ..base_request(merchant_account, &self.reference, &self.amount, &self.shopper)
        })
    }
}

#[async_trait]
impl Example for CreatePaymentCse {
    fn name(&self) -> &str {
        "CreatePaymentCSE"
    }

    async fn execute(&self, client: &PalClient) -> Result<Outcome> {
        let request = self.build_request(client.merchant_account())?;
        let result = Payment::new(client).authorise(&request).await?;
        Ok(Outcome::Completed(Report::from(&result)))
    }
}

/// 3-D Secure 第一步：授權請求帶上 browserInfo，可能回 `RedirectShopper`
#[derive(Debug, Clone)]
pub struct Create3dSecurePayment {
    pub reference: String,
    pub amount: Amount,
    pub shopper: ShopperDetails,
    pub card: Card,
    pub browser_info: BrowserInfo,
    pub term_url: String,
    pub transport: Transport,
}

impl Create3dSecurePayment {
    pub fn new(term_url: impl Into<String>) -> Self {
        Self {
            reference: timestamped_reference("TEST-3D-SECURE-PAYMENT"),
            amount: sample_amount(),
            shopper: ShopperDetails::default(),
            card: sample_3d_secure_card(),
            browser_info: sample_browser_info(),
            term_url: term_url.into(),
            transport: Transport::Json,
        }
    }

    pub fn build_request(&self, merchant_account: &str) -> PaymentRequest {
        PaymentRequest {
            card: Some(self.card.clone()),
            browser_info: Some(self.browser_info.clone()),
            ..base_request(merchant_account, &self.reference, &self.amount, &self.shopper)
        }
    }
}

#[async_trait]
impl Example for Create3dSecurePayment {
    fn name(&self) -> &str {
        "Create3dSecurePayment"
    }

    async fn execute(&self, client: &PalClient) -> Result<Outcome> {
        let request = self.build_request(client.merchant_account());
        let result = Payment::new(client)
            .authorise_with(self.transport, &request)
            .await?;

        match ThreeDSecureRedirect::from_result(&result, &self.term_url)? {
            Some(redirect) => Ok(Outcome::Redirect {
                report: redirect.report(),
                redirect,
            }),
            None => Ok(Outcome::Completed(Report::from(&result))),
        }
    }
}

/// 3-D Secure 第二步：發卡行把 MD 與 PaRes 送回 TermUrl 之後完成授權
#[derive(Debug, Clone)]
pub struct Authorise3dSecurePayment {
    pub md: String,
    pub pa_response: String,
    pub shopper_ip: String,
    pub browser_info: BrowserInfo,
    pub transport: Transport,
}

impl Authorise3dSecurePayment {
    pub fn new(md: impl Into<String>, pa_response: impl Into<String>) -> Self {
        Self {
            md: md.into(),
            pa_response: pa_response.into(),
            shopper_ip: crate::app::DEFAULT_SHOPPER_IP.to_string(),
            browser_info: sample_browser_info(),
            transport: Transport::Json,
        }
    }

    pub fn build_request(&self, merchant_account: &str) -> PaymentRequest3d {
        PaymentRequest3d {
            merchant_account: merchant_account.to_string(),
            md: self.md.clone(),
            pa_response: self.pa_response.clone(),
            shopper_ip: Some(self.shopper_ip.clone()),
            browser_info: Some(self.browser_info.clone()),
        }
    }
}

#[async_trait]
impl Example for Authorise3dSecurePayment {
    fn name(&self) -> &str {
        "Authorise3dSecurePayment"
    }

    async fn execute(&self, client: &PalClient) -> Result<Outcome> {
        let request = self.build_request(client.merchant_account());
        let result = Payment::new(client)
            .authorise_3d_with(self.transport, &request)
            .await?;
        Ok(Outcome::Completed(Report::from(&result)))
    }
}

/// 以先前儲存的合約付款；ONECLICK 需要購物者輸入 CVC，RECURRING 由商家發起
#[derive(Debug, Clone)]
pub struct CreateRecurringPayment {
    pub reference: String,
    pub amount: Amount,
    pub shopper: ShopperDetails,
    pub contract: ContractType,
    pub selected_recurring_detail_reference: String,
    pub cvc: Option<String>,
}

impl CreateRecurringPayment {
    pub fn new(shopper_reference: impl Into<String>) -> Self {
        Self {
            reference: timestamped_reference("TEST-PAYMENT"),
            amount: sample_amount(),
            shopper: ShopperDetails {
                reference: shopper_reference.into(),
                ..Default::default()
            },
            contract: ContractType::OneClick,
            selected_recurring_detail_reference: "LATEST".to_string(),
            cvc: Some("737".to_string()),
        }
    }

    pub fn build_request(&self, merchant_account: &str) -> PaymentRequest {
        let (shopper_interaction, card) = match self.contract {
            ContractType::Recurring => ("ContAuth", None),
            _ => ("Ecommerce", self.cvc.clone().map(Card::cvc_only)),
        };

        PaymentRequest {
            selected_recurring_detail_reference: Some(
                self.selected_recurring_detail_reference.clone(),
            ),
            shopper_interaction: Some(shopper_interaction.to_string()),
            recurring: Some(Recurring {
                contract: self.contract,
            }),
            card,
            ..base_request(merchant_account, &self.reference, &self.amount, &self.shopper)
        }
    }
}

#[async_trait]
impl Example for CreateRecurringPayment {
    fn name(&self) -> &str {
        "CreateRecurringPayment"
    }

    async fn execute(&self, client: &PalClient) -> Result<Outcome> {
        let request = self.build_request(client.merchant_account());
        let result = Payment::new(client).authorise(&request).await?;
        Ok(Outcome::Completed(Report::from(&result)))
    }
}
