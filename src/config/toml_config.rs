use crate::adapters::opendata::{DEFAULT_BASE_URL, DEFAULT_DATASET_ID};
use crate::core::export::OutputFormat;
use crate::core::ConfigProvider;
use crate::utils::error::{ExplorerError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

pub const SUPPORTED_LANGUAGES: [&str; 5] = ["de", "fr", "it", "rm", "en"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub source: SourceConfig,
    pub display: DisplayConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub dataset_id: String,
    pub timeout_seconds: u64,
    pub retry_attempts: u32,
    pub retry_delay_seconds: u64,
    pub headers: HashMap<String, String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            dataset_id: DEFAULT_DATASET_ID.to_string(),
            timeout_seconds: 30,
            retry_attempts: 2,
            retry_delay_seconds: 1,
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub language: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub archive_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: "./output".to_string(),
            output_formats: OutputFormat::ALL.iter().map(|f| f.to_string()).collect(),
            archive_name: "swiss_votes.zip".to_string(),
        }
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

impl ExplorerConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| ExplorerError::ConfigError {
            message: format!("Cannot read '{}': {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ExplorerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${API_KEY})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn output_formats(&self) -> Result<Vec<OutputFormat>> {
        self.export
            .output_formats
            .iter()
            .map(|f| f.parse())
            .collect()
    }
}

impl ConfigProvider for ExplorerConfig {
    fn base_url(&self) -> &str {
        &self.source.base_url
    }

    fn dataset_id(&self) -> &str {
        &self.source.dataset_id
    }

    fn language(&self) -> &str {
        &self.display.language
    }

    fn timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds
    }

    fn retry_attempts(&self) -> u32 {
        self.source.retry_attempts
    }

    fn retry_delay_seconds(&self) -> u64 {
        self.source.retry_delay_seconds
    }

    fn headers(&self) -> HashMap<String, String> {
        self.source.headers.clone()
    }
}

impl Validate for ExplorerConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.base_url", &self.source.base_url)?;
        validation::validate_non_empty_string("source.dataset_id", &self.source.dataset_id)?;
        validation::validate_range("source.timeout_seconds", self.source.timeout_seconds, 1, 600)?;
        validation::validate_range("source.retry_attempts", self.source.retry_attempts, 0, 10)?;
        validation::validate_range(
            "source.retry_delay_seconds",
            self.source.retry_delay_seconds,
            0,
            60,
        )?;

        for value in self.source.headers.values() {
            // 未替換的環境變數代表設定不完整
            if let Some(caps) = env_var_pattern().captures(value) {
                return Err(ExplorerError::MissingConfigError {
                    field: format!("environment variable {}", &caps[1]),
                });
            }
        }

        validation::validate_one_of("display.language", &self.display.language, &SUPPORTED_LANGUAGES)?;

        validation::validate_path("export.output_path", &self.export.output_path)?;
        validation::validate_non_empty_string("export.archive_name", &self.export.archive_name)?;
        validation::validate_positive_number(
            "export.output_formats",
            self.export.output_formats.len(),
            1,
        )?;
        self.output_formats()?;

        Ok(())
    }
}
