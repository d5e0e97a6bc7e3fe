use clap::Parser;
use diagram_check::core::report::{render_json, render_text};
use diagram_check::utils::{logger, validation::Validate};
use diagram_check::{CheckEngine, CliConfig, JsonFileSource, SuiteProvider};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting diagram-check");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    let source = JsonFileSource::new(
        config.model_path(),
        config.blocks_path().map(PathBuf::from),
    );

    let engine = match CheckEngine::from_source(&source, config.inline_blocks(), config.options())
    {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!("Failed to load model: {}", e);
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    let report = engine.run().await;

    if config.json {
        println!("{}", render_json(&report)?);
    } else {
        print!("{}", render_text(&report));
    }

    if !report.all_passed() {
        std::process::exit(1);
    }

    Ok(())
}
