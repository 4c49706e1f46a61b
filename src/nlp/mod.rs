// NLP capability used by the field extractors and the sentence classifier.
// Any backend that can tokenize, tag, split sentences and match token
// patterns can stand in for the rule-based one shipped here.

pub mod lexicon;
pub mod rule;

use std::ops::Range;

pub use rule::RuleAnnotator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    Noun,
    ProperNoun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Adposition,
    Conjunction,
    Auxiliary,
    Numeral,
    Punctuation,
    Symbol,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub lower: String,
    /// Byte offset of the token in the annotated text.
    pub offset: usize,
    pub pos: PosTag,
}

impl Token {
    pub fn new(text: &str, offset: usize) -> Self {
        Self {
            text: text.to_string(),
            lower: text.to_lowercase(),
            offset,
            pos: PosTag::Other,
        }
    }

    pub fn is_alphabetic(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_alphabetic)
    }

    pub fn is_stop(&self) -> bool {
        lexicon::is_stop_word(&self.lower)
    }

    pub fn is_punctuation(&self) -> bool {
        matches!(self.pos, PosTag::Punctuation | PosTag::Symbol)
    }
}

/// One element of a token pattern, tested against a single token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenPattern {
    Pos(PosTag),
    Lower(String),
    Alphabetic,
    Any,
}

impl TokenPattern {
    pub fn matches(&self, token: &Token) -> bool {
        match self {
            TokenPattern::Pos(tag) => token.pos == *tag,
            TokenPattern::Lower(word) => token.lower == *word,
            TokenPattern::Alphabetic => token.is_alphabetic(),
            TokenPattern::Any => true,
        }
    }
}

/// Text annotated once and shared by every extractor of a parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedText {
    pub text: String,
    pub tokens: Vec<Token>,
    pub sentences: Vec<String>,
}

/// NLP backend. Implementations need not be `Sync`: the batch pool gives
/// every worker its own instance.
pub trait Annotator: Send {
    fn tokenize(&self, text: &str) -> Vec<Token>;

    fn tag_part_of_speech(&self, tokens: &mut [Token]);

    fn split_sentences(&self, text: &str) -> Vec<String>;

    /// Token index ranges where `pattern` matches contiguously, in order.
    /// Overlapping matches are all reported.
    fn match_pattern(&self, tokens: &[Token], pattern: &[TokenPattern]) -> Vec<Range<usize>> {
        if pattern.is_empty() || tokens.len() < pattern.len() {
            return Vec::new();
        }

        tokens
            .windows(pattern.len())
            .enumerate()
            .filter(|(_, window)| window.iter().zip(pattern).all(|(t, p)| p.matches(t)))
            .map(|(start, _)| start..start + pattern.len())
            .collect()
    }

    fn annotate(&self, text: &str) -> AnnotatedText {
        let mut tokens = self.tokenize(text);
        self.tag_part_of_speech(&mut tokens);
        AnnotatedText {
            text: text.to_string(),
            tokens,
            sentences: self.split_sentences(text),
        }
    }
}

impl<A: Annotator + ?Sized> Annotator for Box<A> {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        (**self).tokenize(text)
    }

    fn tag_part_of_speech(&self, tokens: &mut [Token]) {
        (**self).tag_part_of_speech(tokens)
    }

    fn split_sentences(&self, text: &str) -> Vec<String> {
        (**self).split_sentences(text)
    }

    fn match_pattern(&self, tokens: &[Token], pattern: &[TokenPattern]) -> Vec<Range<usize>> {
        (**self).match_pattern(tokens, pattern)
    }

    fn annotate(&self, text: &str) -> AnnotatedText {
        (**self).annotate(text)
    }
}
