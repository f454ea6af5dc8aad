use serde::{Deserialize, Serialize};

/// Author shown when a chat line carries no `name`
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// A single chat message as seen by the navigator.
///
/// `index` is the message's position in the transcript ("floor"). The host owns
/// the transcript; the navigator only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub index: usize,
    pub author: String,
    pub text: String,
    pub is_user: bool,
    pub is_system: bool,
}

impl Message {
    pub fn new(index: usize, author: impl Into<String>, text: impl Into<String>) -> Self {
        Self { index, author: author.into(), text: text.into(), is_user: false, is_system: false }
    }

    pub fn from_user(mut self) -> Self {
        self.is_user = true;
        self
    }

    pub fn from_system(mut self) -> Self {
        self.is_system = true;
        self
    }
}

/// One line of a chat JSONL file, before it is assigned an index.
///
/// The first line of a chat file is usually a metadata header without `mes`;
/// `mes` is therefore optional here and the parser skips lines lacking it.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatLine {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mes: Option<String>,
    #[serde(default)]
    pub is_user: bool,
    #[serde(default)]
    pub is_system: bool,
}

impl ChatLine {
    /// Whether this line is a chat message rather than the file header
    pub fn is_message(&self) -> bool {
        self.mes.is_some()
    }

    pub fn into_message(self, index: usize) -> Message {
        Message {
            index,
            author: self
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            text: self.mes.unwrap_or_default(),
            is_user: self.is_user,
            is_system: self.is_system,
        }
    }
}
