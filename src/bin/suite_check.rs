use clap::Parser;
use diagram_check::core::report::{render_json, render_text};
use diagram_check::utils::{logger, validation::Validate};
use diagram_check::{CheckEngine, JsonFileSource, SuiteProvider, TomlConfig, ViewMode};
use std::path::Path;

#[derive(Parser)]
#[command(name = "suite_check")]
#[command(about = "Run a TOML-described check suite against a block-diagram model")]
struct Args {
    /// Path to the suite TOML file
    #[arg(short, long, default_value = "diagram-suite.toml")]
    suite: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the matching mode from the suite
    #[arg(long, value_enum)]
    mode: Option<ViewMode>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Dry run - show what would be checked without loading the model
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    if args.json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Loading suite from: {}", args.suite);

    let mut config = match TomlConfig::from_file(&args.suite) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load suite file '{}': {}", args.suite, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(e.exit_code());
        }
    };

    // 應用命令列覆蓋設定
    if let Some(mode) = args.mode {
        config.matching.mode = mode;
        tracing::info!("Matching mode overridden to: {}", mode);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Suite validation failed: {}", e);
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    display_suite_summary(&config);

    if args.dry_run {
        tracing::info!("DRY RUN MODE - no checks will run");
        return Ok(());
    }

    // 模型路徑相對於 suite 檔案所在目錄
    let base = Path::new(&args.suite)
        .parent()
        .unwrap_or_else(|| Path::new("."));
    let source = JsonFileSource::relative_to(base, config.model_path(), config.blocks_path());

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

    if args.json {
        println!("{}", render_json(&report)?);
    } else {
        print!("{}", render_text(&report));
    }

    if !report.all_passed() {
        std::process::exit(1);
    }

    Ok(())
}

fn display_suite_summary(config: &TomlConfig) {
    let options = config.options();

    tracing::info!("Suite: {}", config.suite.name);
    if let Some(description) = &config.suite.description {
        tracing::info!("Description: {}", description);
    }
    tracing::info!("Model: {}", config.model_path());
    tracing::info!(
        "Checks: closed_loop={}, duplicate_destination={}, wire_types={}",
        options.closed_loop,
        options.duplicate_destination,
        options.wire_types
    );
    tracing::info!(
        "Matching: mode={}, only_open_terminals={}, inline blocks={}",
        options.mode,
        options.only_open_terminals,
        config.inline_blocks().len()
    );
}
