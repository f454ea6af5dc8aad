//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::cell::Cell;
use std::collections::HashSet;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use message_navigator::{Message, RenderSurface, ScrollAlign};
use serde_json::json;
use tempfile::TempDir;

/// Builder for chat JSONL files in a temp directory
pub struct ChatFileBuilder {
    temp_dir: TempDir,
    lines: Vec<String>,
}

impl ChatFileBuilder {
    /// Create a new builder for an empty chat
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir, lines: Vec::new() }
    }

    /// Add the metadata header line chat files start with
    pub fn with_header(mut self) -> Self {
        self.lines.push(
            json!({"user_name": "User", "character_name": "Alice", "create_date": "2024-01-01"})
                .to_string(),
        );
        self
    }

    /// Add a message line
    pub fn with_message(mut self, message: ChatLineBuilder) -> Self {
        self.lines.push(message.to_json());
        self
    }

    /// Add one character message per text
    pub fn with_texts(mut self, texts: &[&str]) -> Self {
        for text in texts {
            self.lines.push(ChatLineBuilder::character(text).to_json());
        }
        self
    }

    /// Add a raw line verbatim (for malformed input)
    pub fn with_raw_line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    /// Write `chat.jsonl` and return the temp dir with its path
    pub fn build(self) -> (TempDir, PathBuf) {
        let path = self.temp_dir.path().join("chat.jsonl");
        fs::write(&path, self.lines.join("\n")).expect("Failed to write chat file");
        (self.temp_dir, path)
    }
}

impl Default for ChatFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one chat message line
pub struct ChatLineBuilder {
    name: Option<String>,
    text: String,
    is_user: bool,
    is_system: bool,
}

impl ChatLineBuilder {
    /// A message from the character "Alice"
    pub fn character(text: &str) -> Self {
        Self { name: Some("Alice".to_string()), text: text.to_string(), is_user: false, is_system: false }
    }

    /// A message from the user "User"
    pub fn user(text: &str) -> Self {
        Self { name: Some("User".to_string()), text: text.to_string(), is_user: true, is_system: false }
    }

    /// A system narrator message
    pub fn system(text: &str) -> Self {
        Self { name: Some("System".to_string()), text: text.to_string(), is_user: false, is_system: true }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn without_name(mut self) -> Self {
        self.name = None;
        self
    }

    pub fn to_json(&self) -> String {
        let mut value = json!({
            "mes": self.text,
            "is_user": self.is_user,
            "is_system": self.is_system,
        });
        if let Some(name) = &self.name {
            value["name"] = json!(name);
        }
        value.to_string()
    }
}

/// In-memory transcript with one message per text
pub fn transcript(texts: &[&str]) -> Vec<Message> {
    texts.iter().enumerate().map(|(i, text)| Message::new(i, "Alice", *text)).collect()
}

/// Render surface double: renders a contiguous range and records every call
pub struct RecordingSurface {
    rendered: Range<usize>,
    pub lookups: Cell<usize>,
    pub scrolls: Vec<(usize, ScrollAlign)>,
    pub highlighted: HashSet<usize>,
    /// Every highlight change in order
    pub highlight_log: Vec<(usize, bool)>,
}

impl RecordingSurface {
    pub fn new(rendered: Range<usize>) -> Self {
        Self {
            rendered,
            lookups: Cell::new(0),
            scrolls: Vec::new(),
            highlighted: HashSet::new(),
            highlight_log: Vec::new(),
        }
    }
}

impl RenderSurface for RecordingSurface {
    type Element = usize;

    fn lookup_rendered_element(&self, index: usize) -> Option<usize> {
        self.lookups.set(self.lookups.get() + 1);
        self.rendered.contains(&index).then_some(index)
    }

    fn scroll_into_view(&mut self, element: &usize, align: ScrollAlign) {
        self.scrolls.push((*element, align));
    }

    fn set_highlight_state(&mut self, element: &usize, highlighted: bool) {
        self.highlight_log.push((*element, highlighted));
        if highlighted {
            self.highlighted.insert(*element);
        } else {
            self.highlighted.remove(element);
        }
    }
}

/// Read a file written by the code under test
pub fn read_json(path: &Path) -> serde_json::Value {
    let content = fs::read_to_string(path).expect("Failed to read file");
    serde_json::from_str(&content).expect("File is not valid JSON")
}
