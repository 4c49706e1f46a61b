//! Single-purpose field extractors. None of them depends on another's
//! output; each returns `None` or an empty list when nothing matched.

use crate::nlp::{AnnotatedText, Annotator, PosTag, TokenPattern};
use crate::parser::sections::SectionLabel;
use crate::parser::taxonomy::{EDUCATION_DEGREES, MONTHS_LONG, MONTHS_SHORT, YEAR};
use crate::utils::error::{EtlError, Result};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

const NAME_PATTERN: [TokenPattern; 2] = [
    TokenPattern::Pos(PosTag::ProperNoun),
    TokenPattern::Pos(PosTag::ProperNoun),
];

// Capitalized words that open résumés but are never part of a name.
const NOT_NAME_WORDS: &[&str] = &[
    "resume", "résumé", "curriculum", "vitae", "cv", "contact", "summary", "profile", "objective",
    "email", "phone", "mobile", "address", "linkedin", "github", "professional",
];

const DEFAULT_SKILLS: &[&str] = &[
    "python", "java", "javascript", "typescript", "c++", "c#", "golang", "rust", "ruby", "php",
    "scala", "kotlin", "swift", "matlab", "sql", "nosql", "mysql",
    "postgresql", "mongodb", "redis", "oracle", "html", "css", "react", "angular", "vue",
    "node.js", "django", "flask", "spring", "linux", "unix", "git", "docker", "kubernetes",
    "aws", "azure", "gcp", "terraform", "ansible", "jenkins", "spark", "hadoop", "kafka",
    "tableau", "excel", "pandas", "numpy", "tensorflow", "pytorch", "keras", "scikit-learn",
    "machine learning", "deep learning", "data analysis", "data science", "statistics",
    "natural language processing", "computer vision", "graphql", "microservices",
    "agile", "scrum", "jira", "testing", "automation", "networking", "security", "cloud",
    "devops", "api", "apis", "android", "ios", "photoshop", "marketing", "sales", "finance",
    "accounting", "budgeting", "negotiation", "leadership", "communication", "project management",
    "product management", "customer service", "operations", "analytics", "research", "writing",
    "content", "design", "ux", "ui", "engineering", "mathematics", "physics", "economics",
];

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("email pattern is valid")
});

// North-American shaped numbers with optional country code and extension.
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:\+?(\d{1,3})[\s.-]*)?(?:\(\s*(\d{3})\s*\)|(\d{3}))[\s.-]*(\d{3})[\s.-]*(\d{4})(?:\s*(?:#|x\.?|ext\.?|extension)\s*(\d+))?",
    )
    .expect("phone pattern is valid")
});

// International numbers written with a leading '+'.
static INTERNATIONAL_PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+(\d{1,3})[\s.-]?(\d{4,5})[\s.-]?(\d{4,6})\b")
        .expect("international phone pattern is valid")
});

static EDUCATION_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?|$.!,]").expect("education noise pattern is valid"));

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\b{}\b", YEAR)).expect("year pattern is valid"));

static DATE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    let month = format!("(?:{}|{})", MONTHS_LONG, MONTHS_SHORT);
    let pattern = format!(
        r"(?i)\b(?:(?P<start_month>{month})\.?,?\s+|(?P<start_num>0?[1-9]|1[0-2])/)?(?P<start_year>{year})\s*(?:-|–|—|to|until)\s*(?:(?:(?P<end_month>{month})\.?,?\s+|(?P<end_num>0?[1-9]|1[0-2])/)?(?P<end_year>{year})|(?P<ongoing>present|current|now|till\s+date|to\s+date|date))\b",
        month = month,
        year = YEAR,
    );
    Regex::new(&pattern).expect("date range pattern is valid")
});

/// Reference vocabulary for skill lookup, stored lower-case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillSet {
    skills: HashSet<String>,
}

impl SkillSet {
    pub fn builtin() -> Self {
        Self::from_phrases(DEFAULT_SKILLS.iter().copied())
    }

    pub fn from_phrases<'a>(phrases: impl IntoIterator<Item = &'a str>) -> Self {
        let skills = phrases
            .into_iter()
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self { skills }
    }

    /// Every cell of every row is a skill; there is no header row.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut skills = HashSet::new();
        for record in csv_reader.records() {
            for field in record?.iter() {
                let skill = field.to_lowercase();
                if !skill.is_empty() {
                    skills.insert(skill);
                }
            }
        }

        if skills.is_empty() {
            return Err(EtlError::ConfigError {
                message: "skills file contains no skills".to_string(),
            });
        }
        Ok(Self { skills })
    }

    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.skills.contains(phrase)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl Default for SkillSet {
    fn default() -> Self {
        Self::builtin()
    }
}

/// First two consecutive proper nouns that are not heading words.
pub fn extract_name<A: Annotator + ?Sized>(annotator: &A, doc: &AnnotatedText) -> Option<String> {
    annotator
        .match_pattern(&doc.tokens, &NAME_PATTERN)
        .into_iter()
        .map(|range| &doc.tokens[range])
        .find(|tokens| {
            tokens.iter().all(|t| {
                !NOT_NAME_WORDS.contains(&t.lower.as_str())
                    && !SectionLabel::ALL
                        .iter()
                        .any(|label| label.as_str().split(' ').any(|w| w == t.lower))
            })
        })
        .map(|tokens| {
            tokens
                .iter()
                .map(|t| t.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        })
}

pub fn extract_email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_string())
}

/// Digits of the first phone number; prefixed with `+` when longer than a
/// ten-digit national number.
pub fn extract_mobile_number(text: &str) -> Option<String> {
    let captures = PHONE
        .captures_iter(text)
        .find(|caps| is_phone_shaped(text, caps))
        .or_else(|| INTERNATIONAL_PHONE.captures(text))?;

    let number: String = captures
        .iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str())
        .collect();

    if number.len() > 10 {
        Some(format!("+{}", number))
    } else {
        Some(number)
    }
}

/// A `+` prefix or a parenthesized area code always reads as a phone
/// number. Bare digit groups must be split the same way throughout, so a
/// postcode followed by a year ("411001 2016") is not taken for one.
fn is_phone_shaped(text: &str, caps: &regex::Captures) -> bool {
    if caps[0].starts_with('+') || caps.get(2).is_some() {
        return true;
    }
    match (caps.get(3), caps.get(4), caps.get(5)) {
        (Some(area), Some(exchange), Some(line)) => {
            let first = &text[area.end()..exchange.start()];
            let second = &text[exchange.end()..line.start()];
            first.is_empty() == second.is_empty()
        }
        _ => false,
    }
}

/// Skill unigrams and bigrams found in the reference set, capitalized, in
/// order of first appearance.
pub fn extract_skills(doc: &AnnotatedText, skills: &SkillSet) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();
    let mut push = |phrase: String| {
        if seen.insert(phrase.clone()) {
            found.push(capitalize(&phrase));
        }
    };

    for (i, token) in doc.tokens.iter().enumerate() {
        if token.is_punctuation() {
            continue;
        }
        if !token.is_stop() && skills.contains(&token.lower) {
            push(token.lower.clone());
        }
        if let Some(next) = doc.tokens.get(i + 1).filter(|t| !t.is_punctuation()) {
            let bigram = format!("{} {}", token.lower, next.lower);
            if skills.contains(&bigram) {
                push(bigram);
            }
        }
    }

    found
}

/// Degrees written in upper case, each with the first year found in its
/// sentence or the next one.
pub fn extract_education(sentences: &[String]) -> Vec<String> {
    let mut degrees: Vec<(String, String)> = Vec::new();

    for (index, sentence) in sentences.iter().enumerate() {
        for word in sentence.split_whitespace() {
            let cleaned = EDUCATION_NOISE.replace_all(word, "");
            let degree: &str = &cleaned;
            let is_upper = degree.chars().any(char::is_alphabetic) && degree == degree.to_uppercase();
            if !is_upper || !EDUCATION_DEGREES.contains(&degree) {
                continue;
            }

            let context = match sentences.get(index + 1) {
                Some(next) => format!("{} {}", sentence, next),
                None => sentence.clone(),
            };
            match degrees.iter_mut().find(|(known, _)| known == degree) {
                Some(entry) => entry.1 = context,
                None => degrees.push((degree.to_string(), context)),
            }
        }
    }

    degrees
        .into_iter()
        .map(|(degree, context)| match YEAR_RE.find(&context) {
            Some(year) => format!("{} ({})", degree, year.as_str()),
            None => degree,
        })
        .collect()
}

/// Lines of the raw text that contain a date range, trimmed and distinct.
pub fn extract_experience(raw_text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw_text
        .lines()
        .map(str::trim)
        .filter(|line| DATE_RANGE.is_match(line))
        .filter(|line| seen.insert(line.to_string()))
        .map(str::to_string)
        .collect()
}

/// A span of employment read from a date range. A missing month counts as
/// January; `end == None` means the position is ongoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn parse_all(text: &str) -> Vec<DateRange> {
        DATE_RANGE
            .captures_iter(text)
            .filter_map(|caps| {
                let start = month_start(
                    caps.name("start_year")?.as_str(),
                    caps.name("start_month")
                        .or_else(|| caps.name("start_num"))
                        .map(|m| m.as_str()),
                )?;
                let end = match caps.name("end_year") {
                    Some(year) => Some(month_start(
                        year.as_str(),
                        caps.name("end_month")
                            .or_else(|| caps.name("end_num"))
                            .map(|m| m.as_str()),
                    )?),
                    None => None,
                };
                Some(DateRange { start, end })
            })
            .collect()
    }

    /// Whole months between start and end (or `today` when ongoing).
    pub fn months(&self, today: NaiveDate) -> u32 {
        let end = self.end.unwrap_or(today);
        month_index(end).saturating_sub(month_index(self.start))
    }
}

/// Total months covered by the date ranges in `lines`, counting
/// overlapping periods once.
pub fn total_experience_months(lines: &[String], today: NaiveDate) -> Option<u32> {
    let mut spans: Vec<(u32, u32)> = lines
        .iter()
        .flat_map(|line| DateRange::parse_all(line))
        .map(|range| {
            let start = month_index(range.start);
            let end = month_index(range.end.unwrap_or(today)).max(start);
            (start, end)
        })
        .collect();

    if spans.is_empty() {
        return None;
    }
    spans.sort_unstable();

    let mut total = 0;
    let (mut open_start, mut open_end) = spans[0];
    for &(start, end) in &spans[1..] {
        if start <= open_end {
            open_end = open_end.max(end);
        } else {
            total += open_end - open_start;
            open_start = start;
            open_end = end;
        }
    }
    total += open_end - open_start;
    Some(total)
}

fn month_index(date: NaiveDate) -> u32 {
    date.year() as u32 * 12 + date.month0()
}

fn month_start(year: &str, month: Option<&str>) -> Option<NaiveDate> {
    let year: i32 = year.parse().ok()?;
    let month = match month {
        None => 1,
        Some(m) if m.chars().all(|c| c.is_ascii_digit()) => m.parse().ok()?,
        Some(m) => month_number(m)?,
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}

fn month_number(name: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    let prefix: String = name.to_lowercase().chars().take(3).collect();
    MONTHS
        .iter()
        .position(|m| *m == prefix)
        .map(|i| i as u32 + 1)
}

fn capitalize(phrase: &str) -> String {
    let mut chars = phrase.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
