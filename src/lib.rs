pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
pub use config::toml_config::TomlConfig;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::{client::PalClient, runner::ExampleRunner};
pub use domain::ports::{ConfigProvider, Example, Outcome};
pub use utils::error::{PalError, Result};
