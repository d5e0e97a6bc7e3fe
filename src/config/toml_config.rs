use crate::core::engine::CheckOptions;
use crate::core::{Block, SuiteProvider};
use crate::domain::model::ViewMode;
use crate::utils::error::{DiagramError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_required_field, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub suite: SuiteConfig,
    #[serde(default)]
    pub checks: ChecksConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    pub name: String,
    pub description: Option<String>,
    pub model: Option<String>,
    pub blocks_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecksConfig {
    #[serde(default = "enabled")]
    pub closed_loop: bool,
    #[serde(default = "enabled")]
    pub duplicate_destination: bool,
    #[serde(default = "enabled")]
    pub wire_types: bool,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            closed_loop: true,
            duplicate_destination: true,
            wire_types: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchingConfig {
    #[serde(default)]
    pub mode: ViewMode,
    #[serde(default)]
    pub only_open_terminals: bool,
}

fn enabled() -> bool {
    true
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DiagramError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DiagramError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MODEL_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DiagramError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("suite.name", &self.suite.name)?;

        let model = validate_required_field("suite.model", &self.suite.model)?;
        validate_path("suite.model", model)?;

        if let Some(blocks_file) = &self.suite.blocks_file {
            validate_path("suite.blocks_file", blocks_file)?;
        }

        for block in &self.blocks {
            validate_non_empty_string("blocks.ID", &block.id)?;
        }

        Ok(())
    }
}

impl SuiteProvider for TomlConfig {
    fn model_path(&self) -> &str {
        self.suite.model.as_deref().unwrap_or_default()
    }

    fn blocks_path(&self) -> Option<&str> {
        self.suite.blocks_file.as_deref()
    }

    fn inline_blocks(&self) -> &[Block] {
        &self.blocks
    }

    fn options(&self) -> CheckOptions {
        CheckOptions {
            closed_loop: self.checks.closed_loop,
            duplicate_destination: self.checks.duplicate_destination,
            wire_types: self.checks.wire_types,
            mode: self.matching.mode,
            only_open_terminals: self.matching.only_open_terminals,
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_suite() {
        let toml_content = r#"
[suite]
name = "control-loop"
model = "control_loop.json"

[matching]
mode = "basic"

[[blocks]]
ID = "Loop"
Domain = []
Codomain = ["X"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.suite.name, "control-loop");
        assert_eq!(config.model_path(), "control_loop.json");
        assert_eq!(config.inline_blocks()[0].codomain, vec!["X"]);
        assert_eq!(config.options().mode, ViewMode::Basic);
        assert!(config.options().closed_loop);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_checks_can_be_disabled() {
        let toml_content = r#"
[suite]
name = "partial"
model = "m.json"

[checks]
closed_loop = false
"#;

        let options = TomlConfig::from_toml_str(toml_content).unwrap().options();

        assert!(!options.closed_loop);
        assert!(options.duplicate_destination);
        assert!(options.wire_types);
        assert_eq!(options.mode, ViewMode::Effective);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DIAGRAM_CHECK_TEST_MODEL", "from_env.json");

        let toml_content = r#"
[suite]
name = "env"
model = "${DIAGRAM_CHECK_TEST_MODEL}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.model_path(), "from_env.json");

        std::env::remove_var("DIAGRAM_CHECK_TEST_MODEL");
    }

    #[test]
    fn test_missing_model_fails_validation() {
        let toml_content = r#"
[suite]
name = "no-model"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(DiagramError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_invalid_mode_is_parse_error() {
        let toml_content = r#"
[suite]
name = "bad"
model = "m.json"

[matching]
mode = "sideways"
"#;

        assert!(TomlConfig::from_toml_str(toml_content).is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[suite]\nname = \"file-test\"\nmodel = \"m.json\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.suite.name, "file-test");
    }
}
