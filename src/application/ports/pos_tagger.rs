use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosTag {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Other,
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            PosTag::Noun => "NOUN",
            PosTag::Verb => "VERB",
            PosTag::Adjective => "ADJ",
            PosTag::Adverb => "ADV",
            PosTag::Other => "X",
        };
        write!(f, "{}", tag)
    }
}

/// A tagged story word. `word_index` is the whitespace-token position.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedToken {
    pub word_index: usize,
    pub text: String,
    pub tag: PosTag,
}

/// Optional part-of-speech tagger used to refine keyword extraction.
pub trait PosTagger: Send + Sync {
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>, TaggerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TaggerError {
    #[error("tagger unavailable: {0}")]
    Unavailable(String),
    #[error("tagging failed: {0}")]
    TaggingFailed(String),
}
