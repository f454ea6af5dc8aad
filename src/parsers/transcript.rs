use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::models::{ChatLine, Message};
use crate::utils::{MAX_TRANSCRIPT_BYTES, validate_file_size};

const MAX_CONSECUTIVE_ERRORS: usize = 100;

/// Parse a chat JSONL file into a transcript.
///
/// The header line (no `mes` field) is skipped. Malformed lines are logged and
/// skipped; the parse fails if more than 50% of lines or 100 consecutive lines
/// are malformed.
pub fn parse_transcript_file(path: &Path) -> Result<Vec<Message>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open chat file: {}", path.display()))?;
    validate_file_size(&file, path, MAX_TRANSCRIPT_BYTES)?;

    parse_transcript(BufReader::new(file))
        .with_context(|| format!("Failed to parse chat file: {}", path.display()))
}

/// Parse chat JSONL from any reader; see [`parse_transcript_file`]
pub fn parse_transcript<R: Read>(reader: BufReader<R>) -> Result<Vec<Message>> {
    let mut messages = Vec::new();
    let mut skipped_count = 0;
    let mut total_lines = 0;
    let mut consecutive_errors = 0;

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read line from chat file")?;
        if line.trim().is_empty() {
            continue;
        }
        total_lines += 1;

        match serde_json::from_str::<ChatLine>(&line) {
            Ok(chat_line) => {
                consecutive_errors = 0;
                if chat_line.is_message() {
                    let index = messages.len();
                    messages.push(chat_line.into_message(index));
                }
            }
            Err(e) => {
                tracing::warn!(line = line_num + 1, error = %e, "Skipping malformed chat line");
                skipped_count += 1;
                consecutive_errors += 1;

                if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                    bail!(
                        "Too many consecutive parse errors ({}) - file may be corrupted",
                        consecutive_errors
                    );
                }
            }
        }
    }

    if total_lines > 0 {
        let failure_rate = (skipped_count as f64) / (total_lines as f64);
        if failure_rate > 0.5 {
            bail!(
                "Too many parse failures: {} of {} lines failed ({:.1}%)",
                skipped_count,
                total_lines,
                failure_rate * 100.0
            );
        }
    }

    if skipped_count > 0 {
        tracing::info!(messages = messages.len(), skipped = skipped_count, "Parsed chat file");
    }

    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<Vec<Message>> {
        parse_transcript(BufReader::new(content.as_bytes()))
    }

    #[test]
    fn test_parse_skips_header_and_assigns_indices() {
        let content = r#"{"user_name":"You","character_name":"Bot","chat_metadata":{}}
{"name":"You","is_user":true,"is_system":false,"mes":"hi"}
{"name":"Bot","is_user":false,"is_system":false,"mes":"hello there"}"#;

        let messages = parse(content).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].index, 0);
        assert_eq!(messages[0].author, "You");
        assert!(messages[0].is_user);
        assert_eq!(messages[1].index, 1);
        assert_eq!(messages[1].text, "hello there");
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let content = r#"{"name":"A","mes":"one"}
not json
{"name":"B","mes":"two"}
{"name":"C","mes":"three"}"#;

        let messages = parse(content).unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].index, 2);
        assert_eq!(messages[2].author, "C");
    }

    #[test]
    fn test_parse_fails_when_mostly_garbage() {
        let content = "garbage\nmore garbage\n{\"mes\":\"ok\"}";
        let err = parse(content).unwrap_err();
        assert!(err.to_string().contains("Too many parse failures"));
    }

    #[test]
    fn test_parse_fails_on_consecutive_errors() {
        let mut content = String::new();
        for i in 0..150 {
            content.push_str(&format!("{{\"mes\":\"ok {}\"}}\n", i));
        }
        for _ in 0..100 {
            content.push_str("{broken\n");
        }
        let err = parse(&content).unwrap_err();
        assert!(err.to_string().contains("consecutive"));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("\n\n  \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_transcript_file(Path::new("/nonexistent/chat.jsonl")).unwrap_err();
        assert!(err.to_string().contains("Failed to open chat file"));
    }
}
