pub mod config;
pub mod core;
pub mod domain;
pub mod extract;
pub mod nlp;
pub mod parser;
pub mod utils;

pub use config::cli::LocalStorage;
pub use config::toml_config::TomlConfig;
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::{etl::EtlEngine, pipeline::ResumePipeline, pool::WorkerPool};
pub use domain::model::{BatchResult, CategoryMatches, DocumentResult, ResumeRecord};
pub use nlp::{Annotator, RuleAnnotator};
pub use parser::{fields::SkillSet, ParseOutcome, ResumeParser};
pub use utils::error::{EtlError, Result};
