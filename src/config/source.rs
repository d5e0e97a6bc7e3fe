use crate::core::{Block, Model, ModelSource};
use crate::utils::error::{DiagramError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize)]
#[serde(untagged)]
enum BlockFile {
    Many(Vec<Block>),
    One(Block),
}

/// Reads a model JSON file and, optionally, a blocks JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    model_path: PathBuf,
    blocks_path: Option<PathBuf>,
}

impl JsonFileSource {
    pub fn new(model_path: impl Into<PathBuf>, blocks_path: Option<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
            blocks_path,
        }
    }

    /// Resolves relative paths against `base`, e.g. the suite file's directory.
    pub fn relative_to(base: &Path, model_path: &str, blocks_path: Option<&str>) -> Self {
        Self::new(base.join(model_path), blocks_path.map(|p| base.join(p)))
    }
}

impl ModelSource for JsonFileSource {
    fn load_model(&self) -> Result<Model> {
        tracing::debug!("Loading model from {}", self.model_path.display());
        let content = fs::read_to_string(&self.model_path)?;
        let model = Model::from_json_str(&content)?;
        tracing::info!(
            "Loaded model with {} processors and {} wires",
            model.processors().len(),
            model.wires().len()
        );
        Ok(model)
    }

    fn load_blocks(&self) -> Result<Vec<Block>> {
        let Some(path) = &self.blocks_path else {
            return Ok(Vec::new());
        };

        tracing::debug!("Loading blocks from {}", path.display());
        let content = fs::read_to_string(path)?;
        let blocks = match serde_json::from_str::<BlockFile>(&content)? {
            BlockFile::Many(blocks) => blocks,
            BlockFile::One(block) => vec![block],
        };

        if let Some(block) = blocks.iter().find(|b| b.id.trim().is_empty()) {
            return Err(DiagramError::ConfigValidationError {
                field: "blocks.ID".to_string(),
                message: format!("block with Domain {:?} has an empty ID", block.domain),
            });
        }

        Ok(blocks)
    }
}
