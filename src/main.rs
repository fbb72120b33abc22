use clap::Parser;
use kindle2cosense::core::ConfigProvider;
use kindle2cosense::utils::{logger, validation::Validate};
use kindle2cosense::{CliConfig, ConvertEngine, ConvertError, ConvertPipeline, LocalStorage, TomlConfig};

async fn run_pipeline<C: ConfigProvider + 'static>(
    config: C,
    monitor_enabled: bool,
) -> kindle2cosense::Result<String> {
    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = ConvertPipeline::new(storage, config);
    let engine = ConvertEngine::new_with_monitoring(pipeline, monitor_enabled);
    engine.run().await
}

fn exit_config_error(e: ConvertError) -> ! {
    tracing::error!("❌ Configuration validation failed: {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting kindle2cosense CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let monitor_requested = cli.monitor;
    if monitor_requested {
        tracing::info!("🔍 System monitoring enabled");
    }

    let run_result = if let Some(config_path) = cli.config.clone() {
        tracing::info!("Loading configuration from: {}", config_path);
        let file_config = match TomlConfig::from_file(&config_path) {
            Ok(config) => config,
            Err(e) => exit_config_error(e),
        };
        if let Err(e) = file_config.validate() {
            exit_config_error(e);
        }

        let monitor_enabled = monitor_requested || file_config.monitoring_enabled();
        run_pipeline(file_config, monitor_enabled).await
    } else {
        if let Err(e) = cli.validate() {
            exit_config_error(e);
        }
        run_pipeline(cli, monitor_requested).await
    };

    match run_result {
        Ok(output_path) => {
            tracing::info!("✅ Conversion completed successfully!");
            tracing::info!("📁 Output saved to: {}", output_path);
            println!("✅ 変換完了: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                kindle2cosense::utils::error::ErrorSeverity::Low => 0,
                kindle2cosense::utils::error::ErrorSeverity::Medium => 2,
                kindle2cosense::utils::error::ErrorSeverity::High => 1,
                kindle2cosense::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
