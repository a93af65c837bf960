use crate::app::modifications::ModificationExample;
use crate::app::payment_methods::GetPaymentMethods;
use crate::app::payments::{
    Authorise3dSecurePayment, Create3dSecurePayment, CreatePaymentApi, CreatePaymentCse,
    CreateRecurringPayment,
};
use crate::app::recurring::{DisableRecurringContract, RetrieveRecurringContract};
use crate::app::ShopperDetails;
use crate::config::toml_config::TomlConfig;
use crate::config::{DEFAULT_APPLICATION_NAME, DEFAULT_OUTPUT_PATH, DEFAULT_TIMEOUT_SECONDS};
use crate::core::payment::Transport;
use crate::core::{ConfigProvider, Example};
use crate::domain::model::{Amount, ContractType, Environment};
use crate::utils::error::{PalError, Result};
use crate::utils::validation::{self, Validate};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "payment-examples")]
#[command(about = "Runnable examples for the payment API: authorise, 3-D Secure, modifications, recurring")]
pub struct CliConfig {
    /// Path to a TOML configuration file; flags override its values
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(long, value_enum, global = true)]
    pub environment: Option<Environment>,

    /// Web service user (ws@Company.YourCompany)
    #[arg(long, env = "PAL_WS_USER", global = true)]
    pub ws_user: Option<String>,

    #[arg(long, env = "PAL_WS_PASSWORD", hide_env_values = true, global = true)]
    pub ws_password: Option<String>,

    #[arg(long, env = "PAL_MERCHANT_ACCOUNT", global = true)]
    pub merchant_account: Option<String>,

    #[arg(long, global = true)]
    pub skin_code: Option<String>,

    #[arg(long, env = "HPP_HMAC_KEY", hide_env_values = true, global = true)]
    pub hmac_key: Option<String>,

    /// Override the payment API base URL
    #[arg(long, global = true)]
    pub pal_endpoint: Option<String>,

    /// Override the hosted payment pages base URL
    #[arg(long, global = true)]
    pub hpp_endpoint: Option<String>,

    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Where redirect pages are written
    #[arg(long, global = true)]
    pub output_path: Option<String>,

    #[arg(short, long, help = "Enable verbose output", global = true)]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON", global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Args)]
pub struct PaymentArgs {
    #[arg(long)]
    pub reference: Option<String>,

    #[arg(long, default_value = "EUR")]
    pub currency: String,

    /// Amount in minor units (EUR 1,00 = 100)
    #[arg(long, default_value_t = 199)]
    pub value: i64,

    #[arg(long)]
    pub shopper_reference: Option<String>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Authorise a card payment
    CreatePayment {
        #[command(flatten)]
        payment: PaymentArgs,
        #[arg(long, value_enum, default_value = "json")]
        transport: Transport,
    },
    /// Authorise a payment with client-side encrypted card data
    CreatePaymentCse {
        #[command(flatten)]
        payment: PaymentArgs,
        #[arg(long)]
        encrypted_data: String,
    },
    /// Print the generation time for the client-side encryption form
    CseGenerationTime,
    /// Start a 3-D Secure payment; writes the issuer redirect page when required
    #[command(name = "create-3d-secure-payment")]
    Create3dSecurePayment {
        #[command(flatten)]
        payment: PaymentArgs,
        /// URL the issuer posts MD and PaRes back to
        #[arg(long)]
        term_url: String,
        #[arg(long, value_enum, default_value = "json")]
        transport: Transport,
    },
    /// Finish a 3-D Secure payment with the issuer's MD and PaRes
    #[command(name = "authorise-3d-secure-payment")]
    Authorise3dSecurePayment {
        #[arg(long)]
        md: String,
        #[arg(long)]
        pa_res: String,
        #[arg(long, value_enum, default_value = "json")]
        transport: Transport,
    },
    /// Pay with a stored recurring contract
    CreateRecurringPayment {
        #[command(flatten)]
        payment: PaymentArgs,
        #[arg(long, default_value = "ONECLICK")]
        contract: ContractType,
        #[arg(long, default_value = "LATEST")]
        recurring_detail_reference: String,
        #[arg(long)]
        cvc: Option<String>,
    },
    /// List the stored recurring contracts of a shopper
    RetrieveRecurringContract {
        #[arg(long)]
        shopper_reference: String,
        #[arg(long, default_value = "ONECLICK")]
        contract: ContractType,
    },
    /// Disable one (or all) recurring contracts of a shopper
    DisableRecurringContract {
        #[arg(long)]
        shopper_reference: String,
        #[arg(long)]
        recurring_detail_reference: Option<String>,
    },
    Capture(ModificationArgs),
    Cancel(ModificationArgs),
    Refund(ModificationArgs),
    CancelOrRefund(ModificationArgs),
    /// List payment methods available for a skin
    PaymentMethods {
        #[arg(long, default_value = "NL")]
        country_code: String,
        #[arg(long, default_value = "EUR")]
        currency: String,
        #[arg(long, default_value_t = 100)]
        value: i64,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ModificationArgs {
    /// PSP reference of the authorised payment
    #[arg(long)]
    pub original_reference: String,

    #[arg(long)]
    pub reference: Option<String>,

    #[arg(long, default_value = "EUR")]
    pub currency: String,

    /// Amount in minor units; ignored by cancel and cancel-or-refund
    #[arg(long, default_value_t = 199)]
    pub value: i64,
}

/// 幣別必須是 ISO 4217 代碼，金額以最小單位計且大於零
fn checked_amount(currency: &str, value: i64) -> Result<Amount> {
    validation::validate_currency_code("currency", currency)?;
    validation::validate_range("value", value, 1, i64::MAX)?;
    Ok(Amount::new(currency, value))
}

impl PaymentArgs {
    fn amount(&self) -> Result<Amount> {
        checked_amount(&self.currency, self.value)
    }

    fn shopper(&self) -> ShopperDetails {
        let mut shopper = ShopperDetails::default();
        if let Some(reference) = &self.shopper_reference {
            shopper.reference = reference.clone();
        }
        shopper
    }
}

impl ModificationArgs {
    fn build(&self, example: ModificationExample) -> ModificationExample {
        match &self.reference {
            Some(reference) => example.with_reference(reference),
            None => example,
        }
    }
}

impl Command {
    /// 把子命令轉成可執行的範例；`cse-generation-time` 不需要呼叫遠端，回傳 None
    pub fn to_example<C: ConfigProvider + ?Sized>(
        &self,
        config: &C,
    ) -> Result<Option<Box<dyn Example>>> {
        let example: Box<dyn Example> = match self {
            Command::CreatePayment { payment, transport } => {
                let mut example = CreatePaymentApi {
                    amount: payment.amount()?,
                    shopper: payment.shopper(),
                    transport: *transport,
                    ..Default::default()
                };
                if let Some(reference) = &payment.reference {
                    example.reference = reference.clone();
                }
                Box::new(example)
            }
            Command::CreatePaymentCse {
                payment,
                encrypted_data,
            } => {
                let mut example = CreatePaymentCse::new(encrypted_data.clone());
                example.amount = payment.amount()?;
                example.shopper = payment.shopper();
                if let Some(reference) = &payment.reference {
                    example.reference = reference.clone();
                }
                Box::new(example)
            }
            Command::CseGenerationTime => return Ok(None),
            Command::Create3dSecurePayment {
                payment,
                term_url,
                transport,
            } => {
                let mut example = Create3dSecurePayment::new(term_url.clone());
                example.amount = payment.amount()?;
                example.shopper = payment.shopper();
                example.transport = *transport;
                if let Some(reference) = &payment.reference {
                    example.reference = reference.clone();
                }
                Box::new(example)
            }
            Command::Authorise3dSecurePayment {
                md,
                pa_res,
                transport,
            } => {
                let mut example = Authorise3dSecurePayment::new(md.clone(), pa_res.clone());
                example.transport = *transport;
                Box::new(example)
            }
            Command::CreateRecurringPayment {
                payment,
                contract,
                recurring_detail_reference,
                cvc,
            } => {
                let shopper_reference = payment.shopper_reference.clone().ok_or_else(|| {
                    PalError::ValidationError {
                        message: "--shopper-reference is required for recurring payments"
                            .to_string(),
                    }
                })?;
                let mut example = CreateRecurringPayment::new(shopper_reference);
                example.amount = payment.amount()?;
                example.contract = *contract;
                example.selected_recurring_detail_reference = recurring_detail_reference.clone();
                if cvc.is_some() {
                    example.cvc = cvc.clone();
                }
                if let Some(reference) = &payment.reference {
                    example.reference = reference.clone();
                }
                Box::new(example)
            }
            Command::RetrieveRecurringContract {
                shopper_reference,
                contract,
            } => {
                let mut example = RetrieveRecurringContract::new(shopper_reference.clone());
                example.contract = *contract;
                Box::new(example)
            }
            Command::DisableRecurringContract {
                shopper_reference,
                recurring_detail_reference,
            } => Box::new(DisableRecurringContract::new(
                shopper_reference.clone(),
                recurring_detail_reference.clone(),
            )),
            Command::Capture(args) => Box::new(args.build(ModificationExample::capture(
                &args.original_reference,
                checked_amount(&args.currency, args.value)?,
            ))),
            Command::Cancel(args) => {
                Box::new(args.build(ModificationExample::cancel(&args.original_reference)))
            }
            Command::Refund(args) => Box::new(args.build(ModificationExample::refund(
                &args.original_reference,
                checked_amount(&args.currency, args.value)?,
            ))),
            Command::CancelOrRefund(args) => Box::new(
                args.build(ModificationExample::cancel_or_refund(&args.original_reference)),
            ),
            Command::PaymentMethods {
                country_code,
                currency,
                value,
            } => {
                validation::validate_country_code("country_code", country_code)?;
                checked_amount(currency, *value)?;
                let skin_code = config
                    .skin_code()
                    .ok_or_else(|| PalError::MissingConfigError {
                        field: "skin_code".to_string(),
                    })?;
                let hmac_key = config.hmac_key().ok_or_else(|| PalError::MissingConfigError {
                    field: "hmac_key".to_string(),
                })?;
                let mut example = GetPaymentMethods::new(skin_code, hmac_key);
                example.country_code = country_code.clone();
                example.currency_code = currency.clone();
                example.payment_amount = *value;
                Box::new(example)
            }
        };

        Ok(Some(example))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSettings {
    pub verbose: bool,
    pub json: bool,
}

impl CliConfig {
    /// 命令列旗標或設定檔 `[logging]` 任一開啟即生效
    pub fn log_settings(&self, file: Option<&TomlConfig>) -> LogSettings {
        LogSettings {
            verbose: self.verbose || file.is_some_and(TomlConfig::verbose),
            json: self.json_logs || file.is_some_and(TomlConfig::json_logs),
        }
    }

    /// 命令列參數覆蓋 TOML 設定
    pub fn apply_to(&self, config: &mut TomlConfig) {
        if let Some(environment) = self.environment {
            config.client.environment = Some(environment);
        }
        if let Some(user) = &self.ws_user {
            config.credentials.ws_user = user.clone();
        }
        if let Some(password) = &self.ws_password {
            config.credentials.ws_password = password.clone();
        }
        if let Some(account) = &self.merchant_account {
            config.merchant.account = account.clone();
        }
        if let Some(skin_code) = &self.skin_code {
            config.merchant.skin_code = Some(skin_code.clone());
        }
        if let Some(hmac_key) = &self.hmac_key {
            config.merchant.hmac_key = Some(hmac_key.clone());
        }
        if let Some(pal) = &self.pal_endpoint {
            config.endpoints.get_or_insert_with(Default::default).pal = Some(pal.clone());
        }
        if let Some(hpp) = &self.hpp_endpoint {
            config.endpoints.get_or_insert_with(Default::default).hpp = Some(hpp.clone());
        }
        if let Some(timeout) = self.timeout {
            config.client.timeout_seconds = Some(timeout);
        }
        if let Some(output_path) = &self.output_path {
            config.client.output_path = Some(output_path.clone());
        }
    }
}

impl ConfigProvider for CliConfig {
    fn environment(&self) -> Environment {
        self.environment.unwrap_or_default()
    }

    fn ws_user(&self) -> &str {
        self.ws_user.as_deref().unwrap_or_default()
    }

    fn ws_password(&self) -> &str {
        self.ws_password.as_deref().unwrap_or_default()
    }

    fn merchant_account(&self) -> &str {
        self.merchant_account.as_deref().unwrap_or_default()
    }

    fn application_name(&self) -> &str {
        DEFAULT_APPLICATION_NAME
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn output_path(&self) -> &str {
        self.output_path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn skin_code(&self) -> Option<&str> {
        self.skin_code.as_deref()
    }

    fn hmac_key(&self) -> Option<&str> {
        self.hmac_key.as_deref()
    }

    fn pal_endpoint_override(&self) -> Option<&str> {
        self.pal_endpoint.as_deref()
    }

    fn hpp_endpoint_override(&self) -> Option<&str> {
        self.hpp_endpoint.as_deref()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_required_field("ws_user", &self.ws_user)?;
        validation::validate_required_field("ws_password", &self.ws_password)?;
        validation::validate_required_field("merchant_account", &self.merchant_account)?;
        validation::validate_non_empty_string("ws_user", self.ws_user())?;
        validation::validate_non_empty_string("merchant_account", self.merchant_account())?;
        validation::validate_range("timeout", self.timeout_seconds(), 1, 300)?;

        if let Some(pal) = &self.pal_endpoint {
            validation::validate_url("pal_endpoint", pal)?;
        }
        if let Some(hpp) = &self.hpp_endpoint {
            validation::validate_url("hpp_endpoint", hpp)?;
        }
        if let Some(key) = &self.hmac_key {
            validation::validate_hex("hmac_key", key)?;
        }
        Ok(())
    }
}
