use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Sentences of a section that matched one taxonomy category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMatches {
    pub category: String,
    pub sentences: Vec<String>,
}

/// Structured fields extracted from one résumé.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub skills: Vec<String>,
    pub education: Vec<String>,
    pub experience: Vec<String>,
    pub competencies: Vec<CategoryMatches>,
    pub measurable_results: Vec<CategoryMatches>,
}

impl ResumeRecord {
    pub fn competency(&self, category: &str) -> Option<&[String]> {
        find_category(&self.competencies, category)
    }

    pub fn measurable_result(&self, category: &str) -> Option<&[String]> {
        find_category(&self.measurable_results, category)
    }
}

fn find_category<'a>(matches: &'a [CategoryMatches], category: &str) -> Option<&'a [String]> {
    matches
        .iter()
        .find(|m| m.category == category)
        .map(|m| m.sentences.as_slice())
}

/// An input file discovered by the extract phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub extension: String,
}

impl SourceDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        Self { path, extension }
    }

    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Parsed,
    Failed,
}

/// Outcome of one document in a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentResult {
    pub path: String,
    pub status: DocumentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<ResumeRecord>,
    /// Recoverable conditions met while parsing, such as a missing section.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Sum of the experience date ranges, when any could be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_months: Option<u32>,
}

impl DocumentResult {
    pub fn parsed(path: String, record: ResumeRecord, warnings: Vec<String>) -> Self {
        Self {
            path,
            status: DocumentStatus::Parsed,
            record: Some(record),
            warnings,
            error: None,
            experience_months: None,
        }
    }

    pub fn failed(path: String, error: String) -> Self {
        Self {
            path,
            status: DocumentStatus::Failed,
            record: None,
            warnings: Vec::new(),
            error: Some(error),
            experience_months: None,
        }
    }

    pub fn is_parsed(&self) -> bool {
        self.status == DocumentStatus::Parsed
    }
}

/// All document outcomes of one run, in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub generated_at: DateTime<Utc>,
    pub parsed: usize,
    pub failed: usize,
    pub documents: Vec<DocumentResult>,
}

impl BatchResult {
    pub fn new(documents: Vec<DocumentResult>) -> Self {
        let parsed = documents.iter().filter(|d| d.is_parsed()).count();
        Self {
            generated_at: Utc::now(),
            parsed,
            failed: documents.len() - parsed,
            documents,
        }
    }
}
