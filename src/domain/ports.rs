use crate::core::client::PalClient;
use crate::domain::model::{Environment, ThreeDSecureRedirect};
use crate::domain::report::Report;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn environment(&self) -> Environment;
    fn ws_user(&self) -> &str;
    fn ws_password(&self) -> &str;
    fn merchant_account(&self) -> &str;
    fn application_name(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn output_path(&self) -> &str;

    fn skin_code(&self) -> Option<&str> {
        None
    }

    fn hmac_key(&self) -> Option<&str> {
        None
    }

    /// 覆寫 PAL 位址 (測試時指向 mock server)
    fn pal_endpoint_override(&self) -> Option<&str> {
        None
    }

    fn hpp_endpoint_override(&self) -> Option<&str> {
        None
    }

    fn pal_base_url(&self) -> String {
        self.pal_endpoint_override()
            .unwrap_or_else(|| self.environment().pal_base_url())
            .trim_end_matches('/')
            .to_string()
    }

    fn hpp_base_url(&self) -> String {
        self.hpp_endpoint_override()
            .unwrap_or_else(|| self.environment().hpp_base_url())
            .trim_end_matches('/')
            .to_string()
    }
}

/// 範例執行的結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed(Report),
    /// 3-D Secure: 需要把購物者導向發卡行
    Redirect {
        report: Report,
        redirect: ThreeDSecureRedirect,
    },
}

impl Outcome {
    pub fn report(&self) -> &Report {
        match self {
            Outcome::Completed(report) => report,
            Outcome::Redirect { report, .. } => report,
        }
    }
}

/// 一個範例 = 建立請求 → 呼叫遠端 → 解析回應
#[async_trait]
pub trait Example: Send + Sync {
    fn name(&self) -> &str;
    async fn execute(&self, client: &PalClient) -> Result<Outcome>;
}
