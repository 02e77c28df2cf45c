pub mod audio;
pub mod cue_sources;
pub mod llm;
pub mod nlp;
pub mod observability;
