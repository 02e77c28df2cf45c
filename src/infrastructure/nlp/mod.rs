mod rule_based_tagger;

pub use rule_based_tagger::RuleBasedTagger;
