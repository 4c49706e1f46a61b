use resume_etl::parser::classifier;
use resume_etl::parser::sections::{self, SectionLabel};
use resume_etl::parser::taxonomy::{COMPETENCIES, MEASURABLE_RESULTS};
use resume_etl::{ResumeParser, RuleAnnotator, SkillSet};
use std::sync::Arc;

fn parser() -> ResumeParser<RuleAnnotator> {
    ResumeParser::new(RuleAnnotator::new(), Arc::new(SkillSet::builtin()))
}

#[test]
fn test_text_without_headings_has_no_sections() {
    let sections = sections::segment("Jane Doe\nBuilt things in Rust.\nLikes hiking.");
    assert!(sections.is_empty());
}

#[test]
fn test_repeated_trigger_sentence_appears_once() {
    let annotator = RuleAnnotator::new();
    let text = "Managed the team. Managed the team.\nManaged the team.";

    let matches = classifier::classify(&annotator, text, &COMPETENCIES);
    let teamwork = matches.iter().find(|m| m.category == "teamwork").unwrap();

    assert_eq!(teamwork.sentences, vec!["Managed the team."]);
}

#[test]
fn test_trigger_match_ignores_case() {
    let annotator = RuleAnnotator::new();
    let matches = classifier::classify(&annotator, "MENTORED junior staff.", &COMPETENCIES);

    assert!(matches
        .iter()
        .any(|m| m.category == "teamwork" && m.sentences == ["MENTORED junior staff."]));
}

#[test]
fn test_sentences_keep_first_appearance_order() {
    let annotator = RuleAnnotator::new();
    let text = "Supervised night shifts. Planned the roadmap. Supervised night shifts.";

    let matches = classifier::classify(&annotator, text, &COMPETENCIES);
    let teamwork = matches.iter().find(|m| m.category == "teamwork").unwrap();

    assert_eq!(
        teamwork.sentences,
        vec!["Supervised night shifts.", "Planned the roadmap."]
    );
}

#[test]
fn test_led_and_increased_scenario() {
    let annotator = RuleAnnotator::new();
    let text = "Led a team of 5 engineers. Increased revenue by 20%.";

    let competencies = classifier::classify(&annotator, text, &COMPETENCIES);
    let find = |label: &str| {
        competencies
            .iter()
            .find(|m| m.category == label)
            .map(|m| m.sentences.clone())
            .unwrap_or_default()
    };
    assert!(find("teamwork").contains(&"Led a team of 5 engineers.".to_string()));
    assert!(find("analytical").contains(&"Led a team of 5 engineers.".to_string()));
    assert_eq!(find("result_driven"), vec!["Increased revenue by 20%."]);

    let results = classifier::classify(&annotator, text, &MEASURABLE_RESULTS);
    let metrics = results.iter().find(|m| m.category == "metrics").unwrap();
    assert_eq!(metrics.sentences, vec!["Increased revenue by 20%."]);
}

#[test]
fn test_parsing_is_idempotent() {
    let raw = "Jane Doe\nExperience\nScheduled weekly releases. Cut costs by 10%.\nSkills\nRust, Kubernetes\n";
    let parser = parser();

    let first = parser.parse(raw);
    let second = parser.parse(raw);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_two_experience_blocks_are_concatenated() {
    let raw = "Experience\nManaged a team.\nSkills\nRust\nExperience\nTrained new hires.\n";

    let sections = sections::segment(raw);
    assert_eq!(
        sections.get(SectionLabel::Experience),
        Some("Managed a team.\nTrained new hires.")
    );

    let record = parser().parse(raw);
    assert_eq!(
        record.competency("teamwork"),
        Some(&["Managed a team.".to_string()][..])
    );
    assert!(record
        .competency("communication")
        .is_some_and(|s| s.contains(&"Trained new hires.".to_string())));
}

#[test]
fn test_missing_experience_yields_empty_classification() {
    let outcome = parser().parse_text("John Smith\nSkills\nPython\nEducation\nMBA 2015\n");

    assert!(outcome.record.competencies.is_empty());
    assert!(outcome.record.measurable_results.is_empty());
    assert!(outcome
        .warnings()
        .iter()
        .any(|w| w == "Section 'experience' not found"));
}

#[test]
fn test_substring_triggers_match_inside_words() {
    let annotator = RuleAnnotator::new();
    let matches = classifier::classify(&annotator, "Scheduled weekly releases.", &COMPETENCIES);

    // "led" is found inside "scheduled".
    assert!(matches
        .iter()
        .any(|m| m.category == "analytical" && m.sentences == ["Scheduled weekly releases."]));
}

#[test]
fn test_sentence_ending_in_single_letter_is_classified_alone() {
    let annotator = RuleAnnotator::new();
    let matches = classifier::classify(
        &annotator,
        "Built plan A. Increased sales by 10%.",
        &COMPETENCIES,
    );
    let find = |label: &str| {
        matches
            .iter()
            .find(|m| m.category == label)
            .map(|m| m.sentences.clone())
            .unwrap_or_default()
    };

    assert_eq!(find("teamwork"), vec!["Built plan A."]);
    assert_eq!(find("result_driven"), vec!["Increased sales by 10%."]);
}
