use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::transcript::DEFAULT_LANGUAGE;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// External extractor settings
    pub extractor: ExtractorConfig,

    /// Application settings
    pub app: AppConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Path or name of the yt-dlp binary
    pub binary: String,

    /// Caption language used when a request does not name one
    pub default_language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Parent directory for private scratch directories (system temp dir if unset)
    pub temp_dir: Option<PathBuf>,

    /// Default output format for the CLI
    pub default_output_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extractor: ExtractorConfig {
                binary: "yt-dlp".to_string(),
                default_language: DEFAULT_LANGUAGE.to_string(),
            },
            app: AppConfig {
                temp_dir: None,
                default_output_format: "text".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from file or create default
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs_err::read_to_string(&config_path)
                .context("Failed to read config file")?;

            let config = Self::from_yaml(&content)?;
            tracing::debug!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Self::default();
            config.save().await?;
            Ok(config)
        }
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)
            .context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs_err::write(&config_path, content)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get configuration file path
    pub fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?;

        Ok(config_dir.join("yt-scribe").join("config.yaml"))
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.extractor.binary.trim().is_empty() {
            anyhow::bail!("extractor.binary must not be empty");
        }

        if self.extractor.default_language.trim().is_empty() {
            anyhow::bail!("extractor.default_language must not be empty");
        }

        if let Some(dir) = &self.app.temp_dir {
            if !dir.is_dir() {
                anyhow::bail!("app.temp_dir is not a directory: {}", dir.display());
            }
        }

        Ok(())
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Extractor: {}", self.extractor.binary);
        println!("  Default Language: {}", self.extractor.default_language);
        match &self.app.temp_dir {
            Some(dir) => println!("  Scratch Root: {}", dir.display()),
            None => println!("  Scratch Root: (system temp directory)"),
        }
        println!("  Default Format: {}", self.app.default_output_format);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.extractor.binary, "yt-dlp");
        assert_eq!(config.extractor.default_language, "en");
        assert!(config.app.temp_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
extractor:
  binary: /opt/bin/yt-dlp
  default_language: ja
app:
  temp_dir: null
  default_output_format: json
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.extractor.binary, "/opt/bin/yt-dlp");
        assert_eq!(config.extractor.default_language, "ja");
        assert_eq!(config.app.default_output_format, "json");
    }

    #[test]
    fn test_rejects_empty_language() {
        let yaml = r#"
extractor:
  binary: yt-dlp
  default_language: ""
app:
  default_output_format: text
"#;
        let err = Config::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("default_language"));
    }

    #[test]
    fn test_rejects_missing_temp_dir() {
        let mut config = Config::default();
        config.app.temp_dir = Some(PathBuf::from("/definitely/not/here/4d1f"));
        assert!(config.validate().is_err());
    }
}
