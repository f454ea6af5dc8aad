//! Data models for the message navigator.
//!
//! - [`Message`] - A chat message read from the host transcript
//! - [`SearchOptions`] / [`MatchRecord`] - Search inputs and results
//! - [`NavigationOutcome`] - Result of resolving a message index to a rendered element

pub mod message;
pub mod navigation;
pub mod search;

pub use message::{ChatLine, Message, UNKNOWN_AUTHOR};
pub use navigation::{NavigationOutcome, NotFoundReason};
pub use search::{DEFAULT_MAX_RESULTS, DEFAULT_PREVIEW_RADIUS, MatchRecord, SearchOptions};
