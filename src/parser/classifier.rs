use crate::domain::model::CategoryMatches;
use crate::nlp::Annotator;
use crate::parser::taxonomy::Taxonomy;

/// A sentence and every category whose triggers it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedSentence {
    pub sentence: String,
    pub categories: Vec<&'static str>,
}

/// Classifies each sentence of `text`, keeping only sentences that matched
/// at least one category. Sentence order is preserved; duplicates are kept.
pub fn classify_sentences<A: Annotator + ?Sized>(
    annotator: &A,
    text: &str,
    taxonomy: &Taxonomy,
) -> Vec<ClassifiedSentence> {
    annotator
        .split_sentences(text)
        .into_iter()
        .filter_map(|sentence| {
            let lowered = sentence.to_lowercase();
            let categories: Vec<&'static str> = taxonomy
                .categories
                .iter()
                .filter(|category| category.first_trigger_in(&lowered).is_some())
                .map(|category| category.label)
                .collect();

            (!categories.is_empty()).then_some(ClassifiedSentence {
                sentence,
                categories,
            })
        })
        .collect()
}

/// Groups the matching sentences of `text` by category. Categories come out
/// in taxonomy order and only when they matched; each category lists its
/// distinct sentences in order of first appearance.
pub fn classify<A: Annotator + ?Sized>(
    annotator: &A,
    text: &str,
    taxonomy: &Taxonomy,
) -> Vec<CategoryMatches> {
    let classified = classify_sentences(annotator, text, taxonomy);

    let mut grouped: Vec<CategoryMatches> = taxonomy
        .labels()
        .map(|label| CategoryMatches {
            category: label.to_string(),
            sentences: Vec::new(),
        })
        .collect();

    for item in &classified {
        for label in &item.categories {
            if let Some(group) = grouped.iter_mut().find(|g| g.category == *label) {
                if !group.sentences.contains(&item.sentence) {
                    group.sentences.push(item.sentence.clone());
                }
            }
        }
    }

    grouped.retain(|group| !group.sentences.is_empty());

    tracing::debug!(
        taxonomy = taxonomy.name,
        sentences = classified.len(),
        categories = grouped.len(),
        "Classified section"
    );
    grouped
}
