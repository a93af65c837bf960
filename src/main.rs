use chrono::Local;
use clap::Parser;
use payment_examples::app::cse_generation_time;
use payment_examples::utils::error::{ErrorSeverity, PalError};
use payment_examples::utils::{logger, validation::Validate};
use payment_examples::{
    CliConfig, ConfigProvider, ExampleRunner, LocalStorage, Outcome, PalClient, TomlConfig,
};

/// 有 --config 時以 TOML 為底，命令列參數覆蓋；否則只用命令列與環境變數
fn resolve_config(
    cli: &CliConfig,
    file_config: Option<TomlConfig>,
) -> Result<Box<dyn ConfigProvider>, PalError> {
    match file_config {
        Some(mut config) => {
            cli.apply_to(&mut config);
            config.validate()?;
            Ok(Box::new(config))
        }
        None => {
            cli.validate()?;
            Ok(Box::new(cli.clone()))
        }
    }
}

fn report_failure(e: &PalError) -> ! {
    tracing::error!(
        "❌ Example failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 設定檔先讀，`[logging]` 才能影響日誌初始化
    let file_config = match cli.config.as_deref().map(TomlConfig::from_file).transpose() {
        Ok(file_config) => file_config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            report_failure(&e);
        }
    };

    let logging = cli.log_settings(file_config.as_ref());
    if logging.json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(logging.verbose);
    }

    tracing::info!("Starting payment-examples CLI");
    if let Some(path) = &cli.config {
        tracing::info!("📋 Loaded configuration from {}", path);
    }
    tracing::debug!("Command: {:?}", cli.command);

    // 不需要呼叫遠端的子命令
    if matches!(cli.command, payment_examples::config::Command::CseGenerationTime) {
        println!("generationtime: {}", cse_generation_time(Local::now()));
        return Ok(());
    }

    let config = match resolve_config(&cli, file_config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            report_failure(&e);
        }
    };

    let example = match cli.command.to_example(config.as_ref()) {
        Ok(Some(example)) => example,
        Ok(None) => return Ok(()),
        Err(e) => report_failure(&e),
    };

    let client = match PalClient::new(config.as_ref()) {
        Ok(client) => client,
        Err(e) => report_failure(&e),
    };

    tracing::info!(
        "🌐 {:?} environment, PAL at {}",
        config.environment(),
        config.pal_base_url()
    );

    let storage = LocalStorage::new(config.output_path());
    let runner = ExampleRunner::new(client, storage);

    match runner.run(example.as_ref()).await {
        Ok(Outcome::Redirect { redirect, .. }) => {
            println!(
                "📁 Open {}/{} in a browser to continue at {}",
                config.output_path(),
                payment_examples::core::runner::REDIRECT_PAGE,
                redirect.issuer_url
            );
        }
        Ok(Outcome::Completed(_)) => {}
        Err(e) => report_failure(&e),
    }

    Ok(())
}
