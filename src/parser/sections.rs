use serde::{Deserialize, Serialize};
use std::fmt;

/// Section headings recognized in a résumé.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionLabel {
    Accomplishments,
    Experience,
    Education,
    Interests,
    Projects,
    ProfessionalExperience,
    Publications,
    Skills,
}

impl SectionLabel {
    pub const ALL: [SectionLabel; 8] = [
        SectionLabel::Accomplishments,
        SectionLabel::Experience,
        SectionLabel::Education,
        SectionLabel::Interests,
        SectionLabel::Projects,
        SectionLabel::ProfessionalExperience,
        SectionLabel::Publications,
        SectionLabel::Skills,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionLabel::Accomplishments => "accomplishments",
            SectionLabel::Experience => "experience",
            SectionLabel::Education => "education",
            SectionLabel::Interests => "interests",
            SectionLabel::Projects => "projects",
            SectionLabel::ProfessionalExperience => "professional experience",
            SectionLabel::Publications => "publications",
            SectionLabel::Skills => "skills",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|label| label.as_str() == name)
    }

    /// Labels ordered longest name first, so the most specific heading wins.
    fn by_length() -> [SectionLabel; 8] {
        let mut labels = Self::ALL;
        labels.sort_by_key(|label| std::cmp::Reverse(label.as_str().len()));
        labels
    }
}

impl fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labeled block of résumé text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub label: SectionLabel,
    pub text: String,
}

/// Sections of one document, in order of first appearance. A label occurs
/// at most once; repeated headings are merged into it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    sections: Vec<Section>,
}

impl Sections {
    pub fn get(&self, label: SectionLabel) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.text.as_str())
    }

    pub fn contains(&self, label: SectionLabel) -> bool {
        self.get(label).is_some()
    }

    pub fn labels(&self) -> impl Iterator<Item = SectionLabel> + '_ {
        self.sections.iter().map(|s| s.label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    fn append(&mut self, label: SectionLabel, lines: Vec<&str>) {
        let block = lines.join("\n");
        match self.sections.iter_mut().find(|s| s.label == label) {
            Some(section) => {
                if !section.text.is_empty() && !block.is_empty() {
                    section.text.push('\n');
                }
                section.text.push_str(&block);
            }
            None => self.sections.push(Section { label, text: block }),
        }
    }
}

/// Returns the heading label of `line` and whatever follows the heading on
/// the same line, when the line is a heading.
pub fn match_header(line: &str) -> Option<(SectionLabel, &str)> {
    let trimmed = line.trim();
    let lowered = trimmed.to_lowercase();

    // Lower-casing can change byte lengths outside ASCII; only a prefix that
    // maps one-to-one is sliced from the original line.
    if lowered.len() != trimmed.len() {
        return SectionLabel::from_name(trimmed).map(|label| (label, ""));
    }

    SectionLabel::by_length().into_iter().find_map(|label| {
        let name = label.as_str();
        if !lowered.starts_with(name) {
            return None;
        }
        let rest = &trimmed[name.len()..];
        if rest.chars().next().is_some_and(char::is_alphanumeric) {
            return None;
        }
        let rest = rest.trim_start_matches(|c: char| c == ':' || c == '-' || c.is_whitespace());
        Some((label, rest.trim_end()))
    })
}

/// Splits raw document text into labeled sections. Text before the first
/// heading is dropped; a repeated heading appends to its earlier section.
pub fn segment(raw_text: &str) -> Sections {
    let mut sections = Sections::default();
    let mut current: Option<(SectionLabel, Vec<&str>)> = None;

    for line in raw_text.lines() {
        match match_header(line) {
            Some((label, inline)) => {
                if let Some((open, lines)) = current.take() {
                    sections.append(open, lines);
                }
                let mut lines = Vec::new();
                if !inline.is_empty() {
                    lines.push(inline);
                }
                current = Some((label, lines));
            }
            None => {
                if let Some((_, lines)) = current.as_mut() {
                    lines.push(line);
                }
            }
        }
    }

    if let Some((open, lines)) = current {
        sections.append(open, lines);
    }

    tracing::debug!(
        "Segmented {} section(s): {:?}",
        sections.len(),
        sections.labels().map(|l| l.as_str()).collect::<Vec<_>>()
    );
    sections
}
