use super::{default_workers, MAX_WORKERS, OUTPUT_FORMATS};
use crate::core::ConfigProvider;
use crate::extract::DocumentFormat;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub input: InputConfig,
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub dir: String,
    #[serde(default)]
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParserConfig {
    pub skills_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchConfig {
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    #[serde(default = "default_output_formats")]
    pub output_formats: Vec<String>,
    #[serde(default)]
    pub archive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn default_output_formats() -> Vec<String> {
    OUTPUT_FORMATS.iter().map(|f| f.to_string()).collect()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${RESUME_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_existing_dir("input.dir", &self.input.dir)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_range("batch.workers", self.workers(), 1, MAX_WORKERS)?;
        validation::validate_allowed_values(
            "load.output_formats",
            &self.load.output_formats,
            OUTPUT_FORMATS,
        )?;

        if !self.input.extensions.is_empty() {
            validation::validate_allowed_values(
                "input.extensions",
                &self.input.extensions,
                DocumentFormat::SUPPORTED_EXTENSIONS,
            )?;
        }

        if let Some(skills_file) = &self.parser.skills_file {
            validation::validate_non_empty_string("parser.skills_file", skills_file)?;
        }

        Ok(())
    }

    /// 取得 worker 數量，未設定時依 CPU 核心數
    pub fn workers(&self) -> usize {
        self.batch.workers.unwrap_or_else(default_workers)
    }

    /// 取得監控設定
    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_dir(&self) -> &str {
        &self.input.dir
    }

    fn input_extensions(&self) -> &[String] {
        &self.input.extensions
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }

    fn archive_output(&self) -> bool {
        self.load.archive
    }

    fn skills_file(&self) -> Option<&str> {
        self.parser.skills_file.as_deref()
    }

    fn workers(&self) -> usize {
        TomlConfig::workers(self)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
