use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Channel {
    Sfx,
    Ambience,
    Music,
    Narrator,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::Sfx,
        Channel::Ambience,
        Channel::Music,
        Channel::Narrator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Sfx => "SFX",
            Channel::Ambience => "AMBIENCE",
            Channel::Music => "MUSIC",
            Channel::Narrator => "NARRATOR",
        }
    }

    /// Continuous channels carry background texture and must never overlap
    /// with themselves. SFX events may stack freely.
    pub fn is_continuous(&self) -> bool {
        !matches!(self, Channel::Sfx)
    }

    /// Lenient parse for untrusted tags: unknown values become `Sfx`.
    pub fn from_tag(tag: &str) -> Self {
        tag.trim().parse().unwrap_or(Channel::Sfx)
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Channel::Sfx => 0,
            Channel::Ambience => 1,
            Channel::Music => 2,
            Channel::Narrator => 3,
        }
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SFX" => Ok(Channel::Sfx),
            "AMBIENCE" => Ok(Channel::Ambience),
            "MUSIC" => Ok(Channel::Music),
            "NARRATOR" => Ok(Channel::Narrator),
            other => Err(format!("Invalid channel: {}", other)),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
