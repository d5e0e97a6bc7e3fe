use crate::core::engine::CheckOptions;
use crate::domain::model::{Block, Model};
use crate::utils::error::Result;

/// Loads the model and the blocks it is checked against.
pub trait ModelSource: Send + Sync {
    fn load_model(&self) -> Result<Model>;
    fn load_blocks(&self) -> Result<Vec<Block>>;
}

/// Where a check run gets its inputs and settings from.
pub trait SuiteProvider: Send + Sync {
    fn model_path(&self) -> &str;
    fn blocks_path(&self) -> Option<&str>;
    fn inline_blocks(&self) -> &[Block];
    fn options(&self) -> CheckOptions;
}
