use carga_horaria::config::toml_config::TomlConfig;
use carga_horaria::core::ConfigProvider;
use carga_horaria::utils::{logger, validation::Validate};
use carga_horaria::{CliConfig, LocalStorage, WorkloadEngine, WorkloadPipeline};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose, cli.log_json);

    tracing::info!("Starting carga-horaria CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let monitor_enabled = cli.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let config_path = cli.config.clone();
    let result = match config_path {
        Some(path) => match TomlConfig::from_file(&path) {
            Ok(config) => run(config, monitor_enabled).await,
            Err(e) => config_failure(e),
        },
        None => {
            if let Err(e) = cli.validate() {
                config_failure(e);
            }
            run(cli, monitor_enabled).await
        }
    };

    match result {
        Ok(output_path) => {
            tracing::info!("✅ Workload reports generated successfully!");
            tracing::info!("📁 Output saved to: {}", output_path);
            println!("✅ Workload reports generated successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Report run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                carga_horaria::utils::error::ErrorSeverity::Low => 0,
                carga_horaria::utils::error::ErrorSeverity::Medium => 2,
                carga_horaria::utils::error::ErrorSeverity::High => 1,
                carga_horaria::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn run<C: ConfigProvider>(config: C, monitor_enabled: bool) -> carga_horaria::Result<String> {
    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = WorkloadPipeline::new(storage, config);
    let engine = WorkloadEngine::new_with_monitoring(pipeline, monitor_enabled);
    engine.run().await
}

fn config_failure(e: carga_horaria::EngineError) -> ! {
    tracing::error!("❌ Configuration validation failed: {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(1);
}
