use crate::config::{DEFAULT_APPLICATION_NAME, DEFAULT_OUTPUT_PATH, DEFAULT_TIMEOUT_SECONDS};
use crate::core::ConfigProvider;
use crate::domain::model::Environment;
use crate::utils::error::{PalError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub client: ClientSection,
    pub credentials: CredentialsSection,
    pub merchant: MerchantSection,
    pub endpoints: Option<EndpointsSection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientSection {
    pub environment: Option<Environment>,
    pub application_name: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsSection {
    pub ws_user: String,
    pub ws_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantSection {
    pub account: String,
    pub skin_code: Option<String>,
    pub hmac_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointsSection {
    pub pal: Option<String>,
    pub hpp: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub verbose: Option<bool>,
    /// "compact" 或 "json"
    pub format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PalError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PalError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PAL_WS_PASSWORD})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid env var pattern")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.format.as_deref())
            .map(|format| format.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn environment(&self) -> Environment {
        self.client.environment.unwrap_or_default()
    }

    fn ws_user(&self) -> &str {
        &self.credentials.ws_user
    }

    fn ws_password(&self) -> &str {
        &self.credentials.ws_password
    }

    fn merchant_account(&self) -> &str {
        &self.merchant.account
    }

    fn application_name(&self) -> &str {
        self.client
            .application_name
            .as_deref()
            .unwrap_or(DEFAULT_APPLICATION_NAME)
    }

    fn timeout_seconds(&self) -> u64 {
        self.client.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn output_path(&self) -> &str {
        self.client
            .output_path
            .as_deref()
            .unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn skin_code(&self) -> Option<&str> {
        self.merchant.skin_code.as_deref()
    }

    fn hmac_key(&self) -> Option<&str> {
        self.merchant.hmac_key.as_deref()
    }

    fn pal_endpoint_override(&self) -> Option<&str> {
        self.endpoints.as_ref().and_then(|e| e.pal.as_deref())
    }

    fn hpp_endpoint_override(&self) -> Option<&str> {
        self.endpoints.as_ref().and_then(|e| e.hpp.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("credentials.ws_user", &self.credentials.ws_user)?;
        validation::validate_non_empty_string(
            "credentials.ws_password",
            &self.credentials.ws_password,
        )?;
        validation::validate_non_empty_string("merchant.account", &self.merchant.account)?;

        // 未替換的 ${VAR} 代表環境變數沒有設定
        for (field, value) in [
            ("credentials.ws_user", &self.credentials.ws_user),
            ("credentials.ws_password", &self.credentials.ws_password),
            ("merchant.account", &self.merchant.account),
        ] {
            if value.starts_with("${") {
                return Err(PalError::MissingConfigError {
                    field: format!("{} (environment variable {})", field, value),
                });
            }
        }

        validation::validate_range("client.timeout_seconds", self.timeout_seconds(), 1, 300)?;

        if let Some(pal) = self.pal_endpoint_override() {
            validation::validate_url("endpoints.pal", pal)?;
        }
        if let Some(hpp) = self.hpp_endpoint_override() {
            validation::validate_url("endpoints.hpp", hpp)?;
        }
        if let Some(key) = &self.merchant.hmac_key {
            validation::validate_hex("merchant.hmac_key", key)?;
        }

        Ok(())
    }
}
