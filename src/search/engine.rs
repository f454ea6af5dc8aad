use super::matcher::Matcher;
use super::preview::{build_preview, truncate_preview};
use crate::error::Result;
use crate::models::{MatchRecord, Message, SearchOptions};

/// Search the transcript for messages containing `query` as a literal substring.
///
/// Results are in ascending index order. Scanning stops as soon as
/// `options.max_results` matches have been produced, so later messages are
/// never examined. An empty or whitespace-only query yields no results.
///
/// # Errors
///
/// Returns [`crate::error::NavigatorError::Configuration`] if `max_results` is 0.
pub fn search(
    transcript: &[Message],
    query: &str,
    options: &SearchOptions,
) -> Result<Vec<MatchRecord>> {
    options.validate()?;

    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let matcher = Matcher::new(query, options.case_sensitive);
    let highlighter = options.highlight.then_some(&matcher);
    let mut results = Vec::new();

    for (index, message) in transcript.iter().enumerate() {
        let Some(first) = matcher.find_first(&message.text) else {
            continue;
        };

        results.push(MatchRecord {
            message_index: index,
            author: message.author.clone(),
            preview: build_preview(&message.text, first, options.preview_radius, highlighter),
            raw_text: message.text.clone(),
        });

        if results.len() >= options.max_results {
            tracing::debug!(
                limit = options.max_results,
                stopped_at = index,
                "Search result cap reached"
            );
            break;
        }
    }

    tracing::debug!(query, matches = results.len(), scanned = transcript.len(), "Search completed");
    Ok(results)
}

/// List every message with a head-truncated preview (shown when no query is active)
pub fn list_messages(transcript: &[Message], max_preview_length: usize) -> Vec<MatchRecord> {
    transcript
        .iter()
        .enumerate()
        .map(|(index, message)| MatchRecord {
            message_index: index,
            author: message.author.clone(),
            preview: truncate_preview(&message.text, max_preview_length),
            raw_text: message.text.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NavigatorError;

    fn transcript(texts: &[&str]) -> Vec<Message> {
        texts.iter().enumerate().map(|(i, t)| Message::new(i, format!("author{}", i), *t)).collect()
    }

    fn indices(results: &[MatchRecord]) -> Vec<usize> {
        results.iter().map(|r| r.message_index).collect()
    }

    #[test]
    fn test_search_returns_matches_in_order() {
        let t = transcript(&["dog", "a cat", "bird", "catalog", "fish"]);
        let results = search(&t, "cat", &SearchOptions::default()).unwrap();
        assert_eq!(indices(&results), vec![1, 3]);
        assert_eq!(results[0].author, "author1");
        assert_eq!(results[0].raw_text, "a cat");
    }

    #[test]
    fn test_search_respects_max_results() {
        let t = transcript(&["dog", "a cat", "bird", "catalog", "fish"]);
        let opts = SearchOptions { max_results: 1, ..Default::default() };
        let results = search(&t, "cat", &opts).unwrap();
        assert_eq!(indices(&results), vec![1]);
    }

    #[test]
    fn test_search_empty_query_is_noop() {
        let t = transcript(&["cat"]);
        assert!(search(&t, "", &SearchOptions::default()).unwrap().is_empty());
        assert!(search(&t, "   \t", &SearchOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn test_search_rejects_zero_max_results() {
        let t = transcript(&["cat"]);
        let opts = SearchOptions { max_results: 0, ..Default::default() };
        assert!(matches!(search(&t, "cat", &opts), Err(NavigatorError::Configuration(_))));
    }

    #[test]
    fn test_search_case_sensitivity() {
        let t = transcript(&["Cat", "cat", "CAT"]);

        let insensitive = search(&t, "cat", &SearchOptions::default()).unwrap();
        assert_eq!(indices(&insensitive), vec![0, 1, 2]);

        let opts = SearchOptions { case_sensitive: true, ..Default::default() };
        let sensitive = search(&t, "cat", &opts).unwrap();
        assert_eq!(indices(&sensitive), vec![1]);
    }

    #[test]
    fn test_search_does_not_match_author() {
        let t = vec![Message::new(0, "Catherine", "hello")];
        assert!(search(&t, "cat", &SearchOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn test_search_highlight_toggle() {
        let t = transcript(&["my cat"]);

        let results = search(&t, "cat", &SearchOptions::default()).unwrap();
        assert_eq!(results[0].preview, "my <mark>cat</mark>");

        let opts = SearchOptions { highlight: false, ..Default::default() };
        let results = search(&t, "cat", &opts).unwrap();
        assert_eq!(results[0].preview, "my cat");
    }

    #[test]
    fn test_search_trims_query() {
        let t = transcript(&["the cat"]);
        let results = search(&t, "  cat ", &SearchOptions::default()).unwrap();
        assert_eq!(indices(&results), vec![0]);
    }

    #[test]
    fn test_list_messages() {
        let t = transcript(&["short", "a much longer message body"]);
        let listed = list_messages(&t, 6);
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].preview, "short");
        assert_eq!(listed[1].preview, "a much...");
        assert_eq!(listed[1].message_index, 1);
    }
}
