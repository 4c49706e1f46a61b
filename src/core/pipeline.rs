use crate::core::pool::WorkerPool;
use crate::core::{BatchResult, ConfigProvider, Pipeline, SourceDocument, Storage};
use crate::domain::model::{CategoryMatches, DocumentResult};
use crate::nlp::RuleAnnotator;
use crate::parser::fields::{self, SkillSet};
use crate::parser::ResumeParser;
use crate::utils::error::{EtlError, Result};
use std::collections::HashSet;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use walkdir::WalkDir;
use zip::write::{FileOptions, ZipWriter};

pub const JSON_OUTPUT: &str = "resumes.json";
pub const CSV_OUTPUT: &str = "resumes.csv";
pub const ARCHIVE_OUTPUT: &str = "resumes.zip";

/// Parses every résumé under the input directory and writes the batch as
/// JSON and/or a CSV summary.
pub struct ResumePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    skills: Arc<SkillSet>,
}

impl<S: Storage, C: ConfigProvider> ResumePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let skills = match config.skills_file() {
            Some(path) => {
                let skills = SkillSet::from_csv_file(path)?;
                tracing::info!("Loaded {} skills from {}", skills.len(), path);
                skills
            }
            None => SkillSet::builtin(),
        };

        Ok(Self {
            storage,
            config,
            skills: Arc::new(skills),
        })
    }

    fn wanted_extensions(&self) -> HashSet<String> {
        self.config
            .input_extensions()
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
            .collect()
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ResumePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<SourceDocument>> {
        let input_dir = self.config.input_dir();
        if !Path::new(input_dir).is_dir() {
            return Err(EtlError::ConfigError {
                message: format!("input directory '{}' does not exist", input_dir),
            });
        }

        // No configured extensions means every file is taken; unsupported
        // ones then fail individually in the transform phase.
        let wanted = self.wanted_extensions();

        let mut documents: Vec<SourceDocument> = WalkDir::new(input_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
            .map(|entry| SourceDocument::new(entry.into_path()))
            .filter(|doc| wanted.is_empty() || wanted.contains(&doc.extension))
            .collect();

        documents.sort_by(|a, b| a.path.cmp(&b.path));
        tracing::debug!("Found {} document(s) under {}", documents.len(), input_dir);
        Ok(documents)
    }

    async fn transform(&self, documents: Vec<SourceDocument>) -> Result<BatchResult> {
        let pool = WorkerPool::new(self.config.workers());
        let skills = Arc::clone(&self.skills);
        let today = chrono::Local::now().date_naive();

        tracing::debug!(
            "Parsing {} document(s) on {} worker(s)",
            documents.len(),
            pool.workers()
        );

        let outcomes = pool
            .run(documents.clone(), move || {
                let parser = ResumeParser::new(RuleAnnotator::new(), Arc::clone(&skills));
                move |doc: SourceDocument| parser.parse_document(&doc.path)
            })
            .await;

        let results = documents
            .iter()
            .zip(outcomes)
            .map(|(doc, outcome)| match outcome {
                Ok(parsed) => {
                    let warnings = parsed.warnings();
                    let months = fields::total_experience_months(&parsed.record.experience, today);
                    tracing::info!(
                        "Parsed {} ({} warning(s))",
                        doc.display_path(),
                        warnings.len()
                    );
                    let mut result = DocumentResult::parsed(doc.display_path(), parsed.record, warnings);
                    result.experience_months = months;
                    result
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse {}: {} (Category: {:?})",
                        doc.display_path(),
                        e,
                        e.category()
                    );
                    DocumentResult::failed(doc.display_path(), e.to_string())
                }
            })
            .collect();

        Ok(BatchResult::new(results))
    }

    async fn load(&self, result: BatchResult) -> Result<String> {
        let formats: HashSet<String> = self
            .config
            .output_formats()
            .iter()
            .map(|f| f.trim().to_lowercase())
            .collect();

        let mut files: Vec<(&str, Vec<u8>)> = Vec::new();
        if formats.contains("json") {
            files.push((JSON_OUTPUT, serde_json::to_vec_pretty(&result)?));
        }
        if formats.contains("csv") {
            files.push((CSV_OUTPUT, summary_csv(&result)?));
        }
        if files.is_empty() {
            return Err(EtlError::ConfigError {
                message: "no output format selected".to_string(),
            });
        }

        let output_dir = self.config.output_path();

        if self.config.archive_output() {
            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
                for (name, data) in &files {
                    zip.start_file::<_, ()>(*name, FileOptions::default())?;
                    zip.write_all(data)?;
                }
                zip.finish()?.into_inner()
            };

            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.storage.write_file(ARCHIVE_OUTPUT, &zip_data).await?;
            return Ok(format!("{}/{}", output_dir, ARCHIVE_OUTPUT));
        }

        let mut written = Vec::with_capacity(files.len());
        for (name, data) in &files {
            tracing::debug!("Writing {} ({} bytes) to storage", name, data.len());
            self.storage.write_file(name, data).await?;
            written.push(format!("{}/{}", output_dir, name));
        }
        Ok(written.join(", "))
    }
}

/// One row per document; list fields are joined with `; `.
pub fn summary_csv(result: &BatchResult) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "path",
        "status",
        "name",
        "email",
        "mobile_number",
        "skills",
        "education",
        "experience_months",
        "competencies",
        "measurable_results",
        "error",
    ])?;

    for doc in &result.documents {
        let record = doc.record.as_ref();
        let text = |value: Option<&String>| value.cloned().unwrap_or_default();
        let list = |values: Option<&Vec<String>>| values.map(|v| v.join("; ")).unwrap_or_default();
        let categories = |matches: Option<&Vec<CategoryMatches>>| {
            matches
                .map(|m| {
                    m.iter()
                        .map(|c| format!("{}:{}", c.category, c.sentences.len()))
                        .collect::<Vec<_>>()
                        .join("; ")
                })
                .unwrap_or_default()
        };

        writer.write_record([
            doc.path.clone(),
            (if doc.is_parsed() { "parsed" } else { "failed" }).to_string(),
            text(record.and_then(|r| r.name.as_ref())),
            text(record.and_then(|r| r.email.as_ref())),
            text(record.and_then(|r| r.mobile_number.as_ref())),
            list(record.map(|r| &r.skills)),
            list(record.map(|r| &r.education)),
            doc.experience_months.map(|m| m.to_string()).unwrap_or_default(),
            categories(record.map(|r| &r.competencies)),
            categories(record.map(|r| &r.measurable_results)),
            text(doc.error.as_ref()),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}
