use super::lexicon::{
    is_stop_word, ABBREVIATIONS, ADPOSITIONS, AUXILIARIES, CONJUNCTIONS, DETERMINERS, PRONOUNS,
};
use super::{Annotator, PosTag, Token};
use regex::Regex;

// Words joined by apostrophes, dots, @, &, / or hyphens stay one token, so
// "node.js", "c++", "john.doe@mail.com" and "B.E" survive tokenization.
const TOKEN_PATTERN: &str = r"[\p{L}\p{N}]+(?:['’.@&/_-][\p{L}\p{N}]+)*(?:\+\+|#)?|\S";

const SYMBOLS: &str = "$%+<=>^|~#&*@€£¥©®°";

const BULLETS: &[char] = &['•', '·', '▪', '◦', '●', '○', '■', '*', '-', '–', '—', '>'];

/// Lexicon and suffix driven annotator. Cheap to construct; holds no state
/// besides its compiled token pattern.
#[derive(Debug, Clone)]
pub struct RuleAnnotator {
    token_re: Regex,
}

impl RuleAnnotator {
    pub fn new() -> Self {
        Self {
            token_re: Regex::new(TOKEN_PATTERN).expect("token pattern is valid"),
        }
    }
}

impl Default for RuleAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

impl Annotator for RuleAnnotator {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        self.token_re
            .find_iter(text)
            .map(|m| Token::new(m.as_str(), m.start()))
            .collect()
    }

    fn tag_part_of_speech(&self, tokens: &mut [Token]) {
        for token in tokens.iter_mut() {
            token.pos = tag_token(token);
        }
    }

    /// Line breaks always end a sentence; inside a line a sentence ends at
    /// `.`, `!` or `?` followed by whitespace, unless the period closes an
    /// abbreviation or an initial. Leading bullet glyphs are dropped.
    fn split_sentences(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        for line in text.lines() {
            split_line(line, &mut sentences);
        }
        sentences
    }
}

fn split_line(line: &str, out: &mut Vec<String>) {
    let mut start = 0;
    let mut chars = line.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        let followed_by_space = chars.peek().is_some_and(|&(_, next)| next.is_whitespace());
        if !followed_by_space {
            continue;
        }
        if ch == '.' && ends_with_abbreviation(&line[start..pos]) {
            continue;
        }

        let end = pos + ch.len_utf8();
        push_sentence(&line[start..end], out);
        start = end;
    }

    push_sentence(&line[start..], out);
}

fn push_sentence(candidate: &str, out: &mut Vec<String>) {
    let sentence = candidate
        .trim()
        .trim_start_matches(|c: char| BULLETS.contains(&c) || c.is_whitespace());
    if !sentence.is_empty() {
        out.push(sentence.to_string());
    }
}

fn ends_with_abbreviation(preceding: &str) -> bool {
    let mut words = preceding
        .split_whitespace()
        .rev()
        .map(|w| w.trim_start_matches(['(', '[', '"', '\'']));
    let word = words.next().unwrap_or("");

    // A lone capital is an initial only inside a capitalized run or at the
    // start of a sentence: "Jane B. Doe" but not "written in C."
    let mut chars = word.chars();
    if let (Some(letter), None) = (chars.next(), chars.next()) {
        return letter.is_uppercase()
            && words
                .next()
                .is_none_or(|prev| prev.chars().next().is_some_and(char::is_uppercase));
    }

    let word = word.to_lowercase();
    if ABBREVIATIONS.contains(&word.as_str()) {
        return true;
    }
    // Dotted short forms such as "u.s" or "ph.d", but never versions like "v1.2".
    word.contains('.') && word.len() <= 5 && !word.chars().any(|c| c.is_ascii_digit())
}

fn tag_token(token: &Token) -> PosTag {
    let Some(first) = token.text.chars().next() else {
        return PosTag::Other;
    };

    if !first.is_alphanumeric() {
        return if SYMBOLS.contains(first) {
            PosTag::Symbol
        } else {
            PosTag::Punctuation
        };
    }
    if first.is_numeric() {
        return PosTag::Numeral;
    }

    let lower = token.lower.as_str();
    if AUXILIARIES.contains(&lower) {
        return PosTag::Auxiliary;
    }
    if PRONOUNS.contains(&lower) {
        return PosTag::Pronoun;
    }
    if DETERMINERS.contains(&lower) {
        return PosTag::Determiner;
    }
    if ADPOSITIONS.contains(&lower) {
        return PosTag::Adposition;
    }
    if CONJUNCTIONS.contains(&lower) {
        return PosTag::Conjunction;
    }
    if first.is_uppercase() && !is_stop_word(lower) {
        return PosTag::ProperNoun;
    }

    let len = lower.chars().count();
    if len > 4 && lower.ends_with("ly") {
        PosTag::Adverb
    } else if len > 4 && (lower.ends_with("ed") || lower.ends_with("ing")) {
        PosTag::Verb
    } else if len > 5
        && ["ous", "ful", "ive", "able", "ible", "ical"]
            .iter()
            .any(|suffix| lower.ends_with(suffix))
    {
        PosTag::Adjective
    } else {
        PosTag::Noun
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::TokenPattern;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_tokenize_keeps_compound_words() {
        let annotator = RuleAnnotator::new();
        let tokens = annotator.tokenize("Wrote C++ and node.js code; mail john.doe@acme.io (20%)");

        assert_eq!(
            texts(&tokens),
            vec![
                "Wrote",
                "C++",
                "and",
                "node.js",
                "code",
                ";",
                "mail",
                "john.doe@acme.io",
                "(",
                "20",
                "%",
                ")"
            ]
        );
        assert_eq!(tokens[1].offset, 6);
        assert_eq!(tokens[1].lower, "c++");
    }

    #[test]
    fn test_tag_part_of_speech() {
        let annotator = RuleAnnotator::new();
        let mut tokens = annotator.tokenize("Jane Doe quickly managed the team in 2019 .");
        annotator.tag_part_of_speech(&mut tokens);

        let tags: Vec<PosTag> = tokens.iter().map(|t| t.pos).collect();
        assert_eq!(
            tags,
            vec![
                PosTag::ProperNoun,
                PosTag::ProperNoun,
                PosTag::Adverb,
                PosTag::Verb,
                PosTag::Determiner,
                PosTag::Noun,
                PosTag::Adposition,
                PosTag::Numeral,
                PosTag::Punctuation,
            ]
        );
    }

    #[test]
    fn test_split_sentences_on_punctuation_and_lines() {
        let annotator = RuleAnnotator::new();
        let sentences = annotator
            .split_sentences("Led a team of 5 engineers. Increased revenue by 20%.\n• Built APIs\n\n");

        assert_eq!(
            sentences,
            vec![
                "Led a team of 5 engineers.",
                "Increased revenue by 20%.",
                "Built APIs"
            ]
        );
    }

    #[test]
    fn test_split_sentences_skips_abbreviations_and_initials() {
        let annotator = RuleAnnotator::new();
        let sentences =
            annotator.split_sentences("Worked with Dr. Smith and Jane B. Doe on tools, e.g. linters. Shipped it.");

        assert_eq!(
            sentences,
            vec![
                "Worked with Dr. Smith and Jane B. Doe on tools, e.g. linters.",
                "Shipped it."
            ]
        );
    }

    #[test]
    fn test_match_pattern_reports_overlapping_windows() {
        let annotator = RuleAnnotator::new();
        let doc = annotator.annotate("Ada Byron King wrote notes");
        let pattern = [
            TokenPattern::Pos(PosTag::ProperNoun),
            TokenPattern::Pos(PosTag::ProperNoun),
        ];

        let matches = annotator.match_pattern(&doc.tokens, &pattern);
        assert_eq!(matches, vec![0..2, 1..3]);
        assert!(annotator.match_pattern(&doc.tokens, &[]).is_empty());
    }

    #[test]
    fn test_split_sentences_after_single_letter_words() {
        let annotator = RuleAnnotator::new();

        assert_eq!(
            annotator.split_sentences("Wrote drivers in C. Reduced boot time by 40%."),
            vec!["Wrote drivers in C.", "Reduced boot time by 40%."]
        );
        assert_eq!(
            annotator.split_sentences("Built plan A. Increased sales by 10%."),
            vec!["Built plan A.", "Increased sales by 10%."]
        );
        assert_eq!(
            annotator.split_sentences("J. Doe joined. Started in May."),
            vec!["J. Doe joined.", "Started in May."]
        );
    }

    #[test]
    fn test_split_sentences_after_version_numbers() {
        let annotator = RuleAnnotator::new();

        assert_eq!(
            annotator.split_sentences("Shipped v1.2. Reduced latency."),
            vec!["Shipped v1.2.", "Reduced latency."]
        );
        assert_eq!(
            annotator.split_sentences("Holds a Ph.D. in physics."),
            vec!["Holds a Ph.D. in physics."]
        );
    }
}
