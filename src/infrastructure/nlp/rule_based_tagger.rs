use crate::application::ports::{PosTag, PosTagger, TaggedToken, TaggerError};
use crate::domain::normalize_word;

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "my", "your", "his", "her", "its", "our",
    "their", "some", "every", "each", "no",
];

const CLOSED_CLASS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "who", "whom",
    "which", "what", "and", "or", "but", "nor", "so", "yet", "if", "then", "than", "because",
    "as", "while", "when", "where", "in", "on", "at", "by", "for", "with", "from", "to", "of",
    "into", "onto", "over", "under", "through", "across", "after", "before", "behind", "near",
    "up", "down", "out", "off", "about", "is", "am", "are", "was", "were", "be", "been", "being",
    "has", "have", "had", "do", "does", "did", "will", "would", "can", "could", "shall",
    "should", "may", "might", "must", "not", "there", "here",
];

const COMMON_VERBS: &[&str] = &[
    "ran", "went", "came", "saw", "heard", "began", "fell", "stood", "took", "made", "felt",
    "knew", "found", "left", "held", "broke", "shook", "rang", "sang", "threw", "drove", "rose",
    "blew", "flew", "struck", "hit", "shut", "run", "go", "see", "hear", "fall", "open", "close",
];

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "less", "able", "ible", "al", "ic", "ish", "y"];
const NOUN_SUFFIXES: &[&str] = &["tion", "sion", "ness", "ment", "ity", "ance", "ence", "ship", "hood"];
const VERB_SUFFIXES: &[&str] = &["ing", "ed"];

/// Closed-class lexicon plus suffix rules. Cheap and deterministic, good
/// enough to separate content words for the lexical fallback.
///
/// Unknown words directly after a determiner are read as nouns; other unknown
/// words stay untagged.
#[derive(Debug, Default, Clone)]
pub struct RuleBasedTagger;

impl RuleBasedTagger {
    pub fn new() -> Self {
        Self
    }

    fn tag_word(word: &str, previous: Option<&str>) -> PosTag {
        if CLOSED_CLASS.contains(&word) || DETERMINERS.contains(&word) {
            return PosTag::Other;
        }
        if word.ends_with("ly") && word.len() > 4 {
            return PosTag::Adverb;
        }
        if COMMON_VERBS.contains(&word) {
            return PosTag::Verb;
        }
        if NOUN_SUFFIXES.iter().any(|s| has_suffix(word, s)) {
            return PosTag::Noun;
        }
        if VERB_SUFFIXES.iter().any(|s| has_suffix(word, s)) {
            return PosTag::Verb;
        }
        if ADJECTIVE_SUFFIXES.iter().any(|s| has_suffix(word, s)) {
            return PosTag::Adjective;
        }
        match previous {
            Some(prev) if DETERMINERS.contains(&prev) => PosTag::Noun,
            _ => PosTag::Other,
        }
    }
}

/// Suffix match that leaves a stem of at least three letters.
fn has_suffix(word: &str, suffix: &str) -> bool {
    word.len() >= suffix.len() + 3 && word.ends_with(suffix)
}

impl PosTagger for RuleBasedTagger {
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>, TaggerError> {
        let mut tokens = Vec::new();
        let mut previous: Option<String> = None;

        for (word_index, raw) in text.split_whitespace().enumerate() {
            let word = normalize_word(raw);
            if word.is_empty() {
                continue;
            }
            let tag = Self::tag_word(&word, previous.as_deref());
            previous = Some(word.clone());
            tokens.push(TaggedToken {
                word_index,
                text: word,
                tag,
            });
        }

        Ok(tokens)
    }
}
