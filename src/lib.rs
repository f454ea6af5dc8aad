//! Message Navigator - keyword search and jump-to-message for chat transcripts
//!
//! This library provides the navigation core of a chat frontend panel:
//!
//! - Case-(in)sensitive keyword search with context previews and highlight markers
//! - Resolving a message index to a rendered element, scrolling and highlighting it
//! - Jump-to-floor input validation
//! - Debounced live search with stale-result protection
//! - Persisted settings, a JSONL transcript parser and a terminal host
//!
//! # Example
//!
//! ```
//! use message_navigator::{Message, SearchOptions, search};
//!
//! let transcript = vec![
//!     Message::new(0, "Alice", "a dog"),
//!     Message::new(1, "Bob", "a cat"),
//! ];
//! let results = search(&transcript, "CAT", &SearchOptions::default())?;
//! assert_eq!(results[0].message_index, 1);
//! assert_eq!(results[0].preview, "a <mark>cat</mark>");
//! # Ok::<(), message_navigator::NavigatorError>(())
//! ```

pub mod cli;
pub mod error;
pub mod models;
pub mod navigator;
pub mod notify;
pub mod parsers;
pub mod search;
pub mod settings;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use error::NavigatorError;
pub use models::{MatchRecord, Message, NavigationOutcome, NotFoundReason, SearchOptions};
pub use navigator::{
    Navigator, NavigatorConfig, RenderSurface, ScrollAlign, jump_to_floor, parse_floor,
};
pub use notify::{Notifier, RecordingNotifier};
pub use parsers::parse_transcript_file;
pub use search::{list_messages, search};
pub use settings::{NavigatorSettings, SettingsStore};
