pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub mod args;

#[cfg(feature = "cli")]
pub use args::{CliConfig, Command, LogSettings, ModificationArgs, PaymentArgs};

pub const DEFAULT_APPLICATION_NAME: &str = "payment-examples";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_OUTPUT_PATH: &str = "./output";
