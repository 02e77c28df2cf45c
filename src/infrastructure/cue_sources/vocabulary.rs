use crate::application::ports::PosTag;
use crate::domain::Channel;

/// One row of the keyword table: any variant in the story triggers the cue.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordEntry {
    pub key: String,
    pub channel: Channel,
    pub description: String,
    /// Lowercase words or space-separated phrases.
    pub variants: Vec<String>,
}

impl KeywordEntry {
    pub fn new(key: &str, channel: Channel, description: &str, variants: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            channel,
            description: description.to_string(),
            variants: variants.iter().map(|v| v.to_lowercase()).collect(),
        }
    }
}

pub fn default_keyword_table() -> Vec<KeywordEntry> {
    vec![
        KeywordEntry::new("rain", Channel::Ambience, "rain falling", &["rain", "raining", "rainy", "raindrop", "raindrops"]),
        KeywordEntry::new("dog", Channel::Sfx, "dog barking", &["dog", "barking", "bark", "barked"]),
        KeywordEntry::new("run", Channel::Sfx, "footsteps running", &["run", "ran", "running", "runs"]),
        KeywordEntry::new("shelter", Channel::Ambience, "shelter ambience", &["shelter", "roof", "indoors"]),
        KeywordEntry::new("loud", Channel::Sfx, "loud sound", &["loud", "loudly"]),
        KeywordEntry::new("suddenly", Channel::Music, "dramatic stinger", &["suddenly", "sudden", "abrupt"]),
        KeywordEntry::new("started", Channel::Sfx, "sound starting", &["started", "start", "began"]),
        KeywordEntry::new("heard", Channel::Sfx, "sound heard", &["heard", "hear", "hearing"]),
        KeywordEntry::new("thunder", Channel::Ambience, "thunderstorm", &["thunder", "thunderstorm", "storm", "lightning"]),
        KeywordEntry::new("door", Channel::Sfx, "door creaking open", &["door", "creaked", "creak", "door slammed"]),
    ]
}

const SOUND_VERBS: &[&str] = &[
    "bark", "barking", "barked", "run", "running", "ran", "runs", "scream", "screaming",
    "screamed", "screams", "shout", "shouting", "shouted", "shouts", "laugh", "laughing",
    "laughed", "laughs", "cry", "crying", "cried", "cries", "knock", "knocking", "knocked",
    "knocks", "crash", "crashing", "crashed", "crashes", "slam", "slamming", "slammed", "slams",
    "bang", "banging", "banged", "bangs", "whistle", "whistling", "whistled", "whistles", "clap",
    "clapping", "clapped", "claps", "step", "stepping", "stepped", "steps", "walk", "walking",
    "walked", "walks",
];

const ENVIRONMENT_WORDS: &[&str] = &[
    "rain", "raining", "rainy", "storm", "stormy", "thunder", "wind", "windy", "blowing",
    "forest", "jungle", "wood", "city", "urban", "traffic", "ocean", "sea", "waves", "beach",
    "river", "stream", "waterfall", "fire", "burning", "crackling", "snow", "snowing", "snowy",
    "desert", "mountain", "valley", "shelter", "roof", "indoors", "room", "street", "park",
    "garden",
];

const EMOTION_WORDS: &[&str] = &[
    "sad", "sadness", "melancholy", "depressed", "happy", "happiness", "joy", "joyful", "scared",
    "scary", "frightened", "fear", "fearful", "suspense", "suspenseful", "tense", "tension",
    "eerie", "creepy", "horror", "horrifying", "emotional", "feeling", "calm", "peaceful",
    "serene", "tranquil", "excited", "exciting", "thrilling", "romantic", "love", "loving",
    "angry", "anger", "furious", "sudden", "suddenly", "abrupt",
];

/// Maps one normalized story word to a channel and a render description.
///
/// Known sound verbs, environment words and mood words win. Otherwise the
/// part-of-speech tag decides: verbs become effects, adjectives score, nouns
/// ambience. Without a tag, unknown words are ignored.
pub fn classify_word(word: &str, tag: Option<PosTag>) -> Option<(Channel, String)> {
    if SOUND_VERBS.contains(&word) || tag == Some(PosTag::Verb) {
        return Some((Channel::Sfx, effect_description(word)));
    }
    if ENVIRONMENT_WORDS.contains(&word) {
        return Some((Channel::Ambience, ambience_description(word)));
    }
    if EMOTION_WORDS.contains(&word) {
        return Some((Channel::Music, music_description(word)));
    }
    match tag {
        Some(PosTag::Adjective) => Some((Channel::Music, format!("{word} background music"))),
        Some(PosTag::Noun) => Some((Channel::Ambience, format!("{word} ambient sound"))),
        _ => None,
    }
}

fn contains_any(word: &str, stems: &[&str]) -> bool {
    stems.iter().any(|stem| word.contains(stem))
}

fn effect_description(word: &str) -> String {
    if word.contains("bark") {
        "dog barking".to_string()
    } else if contains_any(word, &["run", "step", "walk"]) {
        "footsteps running".to_string()
    } else if contains_any(word, &["scream", "shout"]) {
        "person shouting".to_string()
    } else if word.contains("laugh") {
        "person laughing".to_string()
    } else if word.contains("knock") {
        "door knocking".to_string()
    } else if contains_any(word, &["crash", "slam", "bang"]) {
        format!("{word} sound")
    } else {
        format!("{word} sound effect")
    }
}

fn ambience_description(word: &str) -> String {
    let description = if word.contains("rain") {
        "rain falling"
    } else if contains_any(word, &["storm", "thunder"]) {
        "thunderstorm"
    } else if word.contains("wind") {
        "wind blowing"
    } else if contains_any(word, &["forest", "jungle", "wood"]) {
        "forest ambience"
    } else if contains_any(word, &["city", "traffic", "urban"]) {
        "city traffic"
    } else if contains_any(word, &["ocean", "sea", "wave"]) {
        "ocean waves"
    } else if word.contains("fire") {
        "fire crackling"
    } else if contains_any(word, &["shelter", "roof"]) {
        "rain on roof"
    } else {
        return format!("{word} ambience");
    };
    description.to_string()
}

fn music_description(word: &str) -> String {
    let description = if word.contains("sad") {
        "sad emotional music"
    } else if contains_any(word, &["happy", "joy"]) {
        "happy upbeat music"
    } else if contains_any(word, &["scared", "scary", "fear"]) {
        "scary horror music"
    } else if contains_any(word, &["suspense", "tense"]) {
        "suspenseful music"
    } else if contains_any(word, &["eerie", "creepy", "horror"]) {
        "eerie suspense music"
    } else if word.contains("sudden") {
        "dramatic stinger"
    } else if contains_any(word, &["calm", "peaceful"]) {
        "calm soothing music"
    } else {
        return format!("{word} emotional music");
    };
    description.to_string()
}
