//! Configuration settings for the N-Queens assistant

use crate::bdd::EngineCapacity;
use crate::queens::InferenceStrategy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest board the diagram backend can allocate variables for
pub const MAX_BOARD_SIZE: usize = 255;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub board: BoardConfig,
    pub engine: EngineConfig,
    pub inference: InferenceConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: usize,
}

/// Node table and cache budget for the decision-diagram engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub node_limit: usize,
    pub cache_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    pub strategy: InferenceStrategy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        let capacity = EngineCapacity::default();
        Self {
            board: BoardConfig { size: 8 },
            engine: EngineConfig {
                node_limit: capacity.node_limit,
                cache_size: capacity.cache_size,
            },
            inference: InferenceConfig {
                strategy: InferenceStrategy::default(),
            },
            output: OutputConfig {
                format: OutputFormat::Text,
            },
        }
    }
}

impl From<&EngineConfig> for EngineCapacity {
    fn from(config: &EngineConfig) -> Self {
        Self {
            node_limit: config.node_limit,
            cache_size: config.cache_size,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.board.size == 0 {
            anyhow::bail!("Board size must be positive");
        }

        if self.board.size > MAX_BOARD_SIZE {
            anyhow::bail!("Board size {} exceeds the maximum of {}", self.board.size, MAX_BOARD_SIZE);
        }

        if self.engine.node_limit == 0 {
            anyhow::bail!("Engine node limit must be positive");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(size) = cli_overrides.size {
            self.board.size = size;
        }
        if let Some(strategy) = cli_overrides.strategy {
            self.inference.strategy = strategy;
        }
        if let Some(node_limit) = cli_overrides.node_limit {
            self.engine.node_limit = node_limit;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub size: Option<usize>,
    pub strategy: Option<InferenceStrategy>,
    pub node_limit: Option<usize>,
    pub format: Option<OutputFormat>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();

        assert!(settings.validate().is_ok());
        assert_eq!(settings.board.size, 8);
        assert_eq!(settings.engine.node_limit, 2_000_000);
        assert_eq!(settings.engine.cache_size, 200_000);
        assert_eq!(settings.inference.strategy, InferenceStrategy::RowSingletons);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.board.size = 6;
        settings.inference.strategy = InferenceStrategy::RowAndColumnSingletons;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.board.size, 6);
        assert_eq!(loaded.inference.strategy, InferenceStrategy::RowAndColumnSingletons);
        assert_eq!(loaded.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
board:
  size: 5
engine:
  node_limit: 1000
  cache_size: 100
inference:
  strategy: impossibility_only
output:
  format: json
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(settings.board.size, 5);
        assert_eq!(settings.inference.strategy, InferenceStrategy::ImpossibilityOnly);
        assert_eq!(settings.output.format, OutputFormat::Json);
        assert_eq!(EngineCapacity::from(&settings.engine).node_limit, 1000);
    }

    #[test]
    fn test_validation() {
        let mut settings = Settings::default();
        settings.board.size = 0;
        assert!(settings.validate().is_err());

        settings.board.size = MAX_BOARD_SIZE + 1;
        assert!(settings.validate().is_err());

        settings.board.size = 4;
        settings.engine.node_limit = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            size: Some(10),
            strategy: Some(InferenceStrategy::ImpossibilityOnly),
            node_limit: None,
            format: Some(OutputFormat::Json),
        });

        assert_eq!(settings.board.size, 10);
        assert_eq!(settings.inference.strategy, InferenceStrategy::ImpossibilityOnly);
        assert_eq!(settings.engine.node_limit, 2_000_000);
        assert_eq!(settings.output.format, OutputFormat::Json);
    }
}
