//! Résumé parsing: field extraction, section segmentation and sentence
//! classification over one document.

pub mod classifier;
pub mod fields;
pub mod sections;
pub mod taxonomy;

use crate::domain::model::{CategoryMatches, ResumeRecord};
use crate::extract;
use crate::nlp::Annotator;
use crate::utils::error::{EtlError, Result};
use fields::SkillSet;
use sections::{SectionLabel, Sections};
use std::path::Path;
use std::sync::Arc;
use taxonomy::{COMPETENCIES, MEASURABLE_RESULTS};

/// A parsed record plus the recoverable conditions met on the way.
#[derive(Debug)]
pub struct ParseOutcome {
    pub record: ResumeRecord,
    /// Only recoverable errors (`MissingSection`, `NoMatchFound`).
    pub diagnostics: Vec<EtlError>,
}

impl ParseOutcome {
    pub fn warnings(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }
}

/// Parses résumés with one annotator. Not shared between threads; the batch
/// pool builds one parser per worker.
pub struct ResumeParser<A: Annotator> {
    annotator: A,
    skills: Arc<SkillSet>,
}

impl<A: Annotator> ResumeParser<A> {
    pub fn new(annotator: A, skills: Arc<SkillSet>) -> Self {
        Self { annotator, skills }
    }

    pub fn annotator(&self) -> &A {
        &self.annotator
    }

    /// Reads and parses one file. Unsupported or unreadable files are the
    /// only errors.
    pub fn parse_document(&self, path: &Path) -> Result<ParseOutcome> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        let raw_text = extract::extract_text(path, extension)?;

        tracing::debug!("Parsing {}", path.display());
        Ok(self.parse_text(&raw_text))
    }

    pub fn parse(&self, raw_text: &str) -> ResumeRecord {
        self.parse_text(raw_text).record
    }

    pub fn parse_text(&self, raw_text: &str) -> ParseOutcome {
        let mut diagnostics = Vec::new();

        let text = normalize_whitespace(raw_text);
        let doc = self.annotator.annotate(&text);

        let name = fields::extract_name(&self.annotator, &doc);
        let email = fields::extract_email(&text);
        let mobile_number = fields::extract_mobile_number(&text);
        let skills = fields::extract_skills(&doc, &self.skills);
        let education = fields::extract_education(&doc.sentences);
        let experience = fields::extract_experience(raw_text);

        for (field, found) in [
            ("name", name.is_some()),
            ("email", email.is_some()),
            ("mobile_number", mobile_number.is_some()),
            ("skills", !skills.is_empty()),
            ("education", !education.is_empty()),
            ("experience", !experience.is_empty()),
        ] {
            if !found {
                diagnostics.push(EtlError::NoMatchFound {
                    field: field.to_string(),
                });
            }
        }

        let sections = sections::segment(raw_text);
        let (competencies, measurable_results) = match experience_text(&sections) {
            Some(section) => (
                classifier::classify(&self.annotator, section, &COMPETENCIES),
                classifier::classify(&self.annotator, section, &MEASURABLE_RESULTS),
            ),
            None => {
                diagnostics.push(EtlError::MissingSection {
                    section: SectionLabel::Experience.to_string(),
                });
                (Vec::<CategoryMatches>::new(), Vec::new())
            }
        };

        ParseOutcome {
            record: ResumeRecord {
                name,
                email,
                mobile_number,
                skills,
                education,
                experience,
                competencies,
                measurable_results,
            },
            diagnostics,
        }
    }
}

/// The experience section, falling back to "professional experience".
fn experience_text(sections: &Sections) -> Option<&str> {
    sections
        .get(SectionLabel::Experience)
        .or_else(|| sections.get(SectionLabel::ProfessionalExperience))
}

/// Collapses every whitespace run, line breaks included, into one space.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::RuleAnnotator;

    const RESUME: &str = "Jane Doe
jane.doe@example.com | (555) 123-4567

Skills
Python, SQL, Docker

Experience
Acme Corp, Data Engineer  Jan 2018 - Mar 2020
Led a team of 5 engineers. Increased revenue by 20%.

Education
BS in Computer Science, State University 2016
";

    fn parser() -> ResumeParser<RuleAnnotator> {
        ResumeParser::new(RuleAnnotator::new(), Arc::new(SkillSet::builtin()))
    }

    #[test]
    fn test_parse_full_resume() {
        let outcome = parser().parse_text(RESUME);
        let record = &outcome.record;

        assert_eq!(record.name.as_deref(), Some("Jane Doe"));
        assert_eq!(record.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(record.mobile_number.as_deref(), Some("5551234567"));
        assert_eq!(record.skills, vec!["Python", "Sql", "Docker"]);
        assert_eq!(record.education, vec!["BS (2016)"]);
        assert_eq!(
            record.experience,
            vec!["Acme Corp, Data Engineer  Jan 2018 - Mar 2020"]
        );
        assert_eq!(
            record.competency("result_driven"),
            Some(&["Increased revenue by 20%.".to_string()][..])
        );
        assert_eq!(
            record.measurable_result("action_words"),
            Some(&["Led a team of 5 engineers.".to_string()][..])
        );
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_missing_experience_defaults_to_empty() {
        let outcome = parser().parse_text("John Smith\nEducation\nMS Physics 2012\n");

        assert!(outcome.record.competencies.is_empty());
        assert!(outcome.record.measurable_results.is_empty());
        assert!(outcome
            .diagnostics
            .iter()
            .any(|e| matches!(e, EtlError::MissingSection { section } if section == "experience")));
        assert!(outcome.diagnostics.iter().all(EtlError::is_recoverable));
    }

    #[test]
    fn test_professional_experience_is_used_as_fallback() {
        let record = parser().parse("Professional Experience\nMentored two interns.\n");
        assert_eq!(
            record.competency("teamwork"),
            Some(&["Mentored two interns.".to_string()][..])
        );
    }

    #[test]
    fn test_parse_is_idempotent() {
        let parser = parser();
        assert_eq!(parser.parse(RESUME), parser.parse(RESUME));
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a\n\tb   c \r\n"), "a b c");
    }

    #[test]
    fn test_parse_document_rejects_unknown_extension() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("resume.pages");
        std::fs::write(&path, "Experience").unwrap();

        let result = parser().parse_document(&path);
        assert!(matches!(result, Err(EtlError::UnsupportedFileFormat { .. })));
    }
}
