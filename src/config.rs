//! Unstick configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main Unstick configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GenAI provider configuration
    pub llm: LlmConfig,

    /// Breakdown planner configuration
    pub planner: PlannerConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Checks that an API key is resolvable. Call this early in startup to
    /// fail fast with a clear error message.
    pub fn validate(&self) -> Result<()> {
        self.llm.get_api_key()?;
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .unstick.yml
        let local_config = PathBuf::from(".unstick.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/unstick/unstick.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("unstick").join("unstick.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// GenAI provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name (currently only "gemini" supported)
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// File containing the API key (fallback when the env var is unset)
    #[serde(rename = "api-key-file")]
    pub api_key_file: Option<PathBuf>,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per response
    #[serde(rename = "max-output-tokens")]
    pub max_output_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key_file: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            max_output_tokens: 2048,
            timeout_ms: 30_000,
        }
    }
}

impl LlmConfig {
    /// Resolve the API key from the env var or the key file
    pub fn get_api_key(&self) -> Result<String> {
        if let Ok(key) = std::env::var(&self.api_key_env)
            && !key.trim().is_empty()
        {
            return Ok(key.trim().to_string());
        }

        if let Some(path) = &self.api_key_file {
            let key = fs::read_to_string(path).context(format!("Failed to read API key file {}", path.display()))?;
            let key = key.trim();
            if !key.is_empty() {
                return Ok(key.to_string());
            }
        }

        Err(eyre::eyre!(
            "No API key found. Set the {} environment variable or configure api-key-file.",
            self.api_key_env
        ))
    }
}

/// Breakdown planner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Minimum number of steps the assistant is asked for
    #[serde(rename = "min-steps")]
    pub min_steps: u8,

    /// Maximum number of steps the assistant is asked for
    #[serde(rename = "max-steps")]
    pub max_steps: u8,

    /// Optional file overriding the embedded system-instruction template
    #[serde(rename = "prompt-file")]
    pub prompt_file: Option<PathBuf>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            min_steps: 3,
            max_steps: 6,
            prompt_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.llm.provider, "gemini");
        assert!(config.llm.model.contains("gemini"));
        assert_eq!(config.llm.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.planner.min_steps, 3);
        assert_eq!(config.planner.max_steps, 6);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
llm:
  provider: gemini
  model: gemini-2.5-pro
  api-key-env: MY_API_KEY
  base-url: https://api.example.com
  max-output-tokens: 4096
  timeout-ms: 60000

planner:
  min-steps: 2
  max-steps: 8
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.llm.model, "gemini-2.5-pro");
        assert_eq!(config.llm.api_key_env, "MY_API_KEY");
        assert_eq!(config.llm.max_output_tokens, 4096);
        assert_eq!(config.llm.timeout_ms, 60000);
        assert_eq!(config.planner.min_steps, 2);
        assert_eq!(config.planner.max_steps, 8);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
llm:
  model: gemini-2.0-flash
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        // Specified value
        assert_eq!(config.llm.model, "gemini-2.0-flash");

        // Defaults for unspecified
        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.llm.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.planner.max_steps, 6);
    }

    #[test]
    #[serial]
    fn test_get_api_key_from_env() {
        // SAFETY: guarded by #[serial], no other test thread touches this var
        unsafe { std::env::set_var("UNSTICK_TEST_KEY", "sk-test") };
        let config = LlmConfig {
            api_key_env: "UNSTICK_TEST_KEY".to_string(),
            ..Default::default()
        };

        assert_eq!(config.get_api_key().unwrap(), "sk-test");

        unsafe { std::env::remove_var("UNSTICK_TEST_KEY") };
    }

    #[test]
    #[serial]
    fn test_get_api_key_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sk-from-file").unwrap();

        let config = LlmConfig {
            api_key_env: "UNSTICK_UNSET_KEY".to_string(),
            api_key_file: Some(file.path().to_path_buf()),
            ..Default::default()
        };

        assert_eq!(config.get_api_key().unwrap(), "sk-from-file");
    }

    #[test]
    #[serial]
    fn test_get_api_key_missing() {
        let config = LlmConfig {
            api_key_env: "UNSTICK_UNSET_KEY".to_string(),
            ..Default::default()
        };

        assert!(config.get_api_key().is_err());
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "llm:\n  model: gemini-custom").unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();
        assert_eq!(config.llm.model, "gemini-custom");
    }

    #[test]
    fn test_load_from_missing_explicit_path_errors() {
        let path = PathBuf::from("/nonexistent/unstick.yml");
        assert!(Config::load(Some(&path)).is_err());
    }
}
