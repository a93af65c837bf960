use crate::core::client::PalClient;
use crate::core::{Example, Outcome, Storage};
use crate::utils::error::Result;
use std::time::Instant;

pub const REDIRECT_PAGE: &str = "3d-secure-redirect.html";

pub struct ExampleRunner<S: Storage> {
    client: PalClient,
    storage: S,
    quiet: bool,
}

impl<S: Storage> ExampleRunner<S> {
    pub fn new(client: PalClient, storage: S) -> Self {
        Self {
            client,
            storage,
            quiet: false,
        }
    }

    /// 不印出報表 (測試用)
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    pub fn client(&self) -> &PalClient {
        &self.client
    }

    pub async fn run(&self, example: &dyn Example) -> Result<Outcome> {
        let started = Instant::now();
        tracing::info!("🚀 Running example: {}", example.name());

        let outcome = example.execute(&self.client).await?;

        if let Outcome::Redirect { redirect, .. } = &outcome {
            tracing::info!("↪️ Shopper must be redirected to {}", redirect.issuer_url);
            self.storage
                .write_file(REDIRECT_PAGE, redirect.render_form().as_bytes())
                .await?;
            tracing::info!("📁 Redirect page saved as {}", REDIRECT_PAGE);
        }

        if !self.quiet {
            print!("{}", outcome.report());
        }

        tracing::info!(
            "✅ {} finished in {:?}",
            example.name(),
            started.elapsed()
        );
        Ok(outcome)
    }
}
