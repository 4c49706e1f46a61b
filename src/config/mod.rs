pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::extract::DocumentFormat;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const OUTPUT_FORMATS: &[&str] = &["json", "csv"];
pub const MAX_WORKERS: usize = 256;

/// One worker per available core.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(MAX_WORKERS)
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "resume-etl")]
#[command(about = "Extracts structured fields from a directory of résumés")]
pub struct CliConfig {
    #[arg(long, default_value = "./resumes")]
    pub input_dir: String,

    #[arg(long, value_delimiter = ',', help = "Only process these extensions (default: all files)")]
    pub extensions: Vec<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value_t = default_workers())]
    pub workers: usize,

    #[arg(long, help = "CSV file of skills replacing the built-in list")]
    pub skills_file: Option<String>,

    #[arg(long, value_delimiter = ',', default_value = "json,csv")]
    pub formats: Vec<String>,

    #[arg(long, help = "Bundle the output files into resumes.zip")]
    pub archive: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log system resource usage per phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_dir(&self) -> &str {
        &self.input_dir
    }

    fn input_extensions(&self) -> &[String] {
        &self.extensions
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn archive_output(&self) -> bool {
        self.archive
    }

    fn skills_file(&self) -> Option<&str> {
        self.skills_file.as_deref()
    }

    fn workers(&self) -> usize {
        self.workers
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_existing_dir("input_dir", &self.input_dir)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_range("workers", self.workers, 1, MAX_WORKERS)?;
        validation::validate_allowed_values("formats", &self.formats, OUTPUT_FORMATS)?;

        if !self.extensions.is_empty() {
            validation::validate_allowed_values(
                "extensions",
                &self.extensions,
                DocumentFormat::SUPPORTED_EXTENSIONS,
            )?;
        }

        if let Some(skills_file) = &self.skills_file {
            validation::validate_non_empty_string("skills_file", skills_file)?;
        }

        Ok(())
    }
}
