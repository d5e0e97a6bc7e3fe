use crate::core::engine::CheckOptions;
use crate::core::{Block, SuiteProvider};
use crate::domain::model::ViewMode;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "diagram-check")]
#[command(about = "Validate block-diagram wiring models and match them against block signatures")]
pub struct CliConfig {
    /// Path to the model JSON file
    #[arg(long)]
    pub model: String,

    /// Path to a JSON file with one block or an array of blocks
    #[arg(long)]
    pub blocks: Option<String>,

    #[arg(long, value_enum, default_value_t = ViewMode::Effective)]
    pub mode: ViewMode,

    /// Basic view: only count terminals no wire uses as a source
    #[arg(long)]
    pub only_open_terminals: bool,

    #[arg(long, help = "Skip the closed-loop check")]
    pub skip_closed_loop: bool,

    #[arg(long, help = "Print the report as JSON")]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl SuiteProvider for CliConfig {
    fn model_path(&self) -> &str {
        &self.model
    }

    fn blocks_path(&self) -> Option<&str> {
        self.blocks.as_deref()
    }

    fn inline_blocks(&self) -> &[Block] {
        // 命令列只能透過檔案提供 block
        &[]
    }

    fn options(&self) -> CheckOptions {
        CheckOptions {
            closed_loop: !self.skip_closed_loop,
            mode: self.mode,
            only_open_terminals: self.only_open_terminals,
            ..CheckOptions::default()
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("--model", &self.model)?;
        if let Some(blocks) = &self.blocks {
            validate_path("--blocks", blocks)?;
        }
        Ok(())
    }
}
