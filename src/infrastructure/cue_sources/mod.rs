mod keyword_cue_source;
mod lexical_cue_source;
mod llm_cue_source;
mod prompt;
mod response_parser;
mod vocabulary;

pub use keyword_cue_source::KeywordCueSource;
pub use lexical_cue_source::LexicalCueSource;
pub use llm_cue_source::LlmCueSource;
pub use prompt::build_cue_prompt;
pub use response_parser::{ResponseParseError, parse_cue_response};
pub use vocabulary::{KeywordEntry, classify_word, default_keyword_table};
