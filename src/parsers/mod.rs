//! JSONL parser for chat transcripts
//!
//! # Error Handling Strategy
//!
//! Parsing degrades gracefully, like the rest of the CLI:
//!
//! - **Individual line failures**: Malformed lines are logged via `tracing` and
//!   skipped, so one bad line does not hide the rest of the chat.
//!
//! - **Catastrophic failure detection**: More than 50% failed lines, or 100
//!   consecutive failures, rejects the whole file.
//!
//! - **Error propagation**: `anyhow::Result` with context; callers only report.
//!
//! Skipped lines do not consume an index, so message indices stay contiguous.

pub mod transcript;

pub use transcript::{parse_transcript, parse_transcript_file};
