/// End-to-end tests for search and navigation over parsed chat files
mod common;

use std::time::{Duration, Instant};

use common::{ChatFileBuilder, ChatLineBuilder, RecordingSurface, transcript};
use message_navigator::search::preview::strip_markers;
use message_navigator::search::{SearchSession, paginate};
use message_navigator::settings::MemorySettingsStore;
use message_navigator::{
    NavigationOutcome, Navigator, NavigatorConfig, NavigatorError, NavigatorSettings,
    NotFoundReason, RecordingNotifier, ScrollAlign, SearchOptions, SettingsStore, jump_to_floor,
    parse_transcript_file, search,
};

fn cat_transcript() -> Vec<message_navigator::Message> {
    transcript(&["a dog", "the cat sat", "a bird", "Cat food", "a fish"])
}

#[test]
fn test_search_cat_scenario() {
    let results = search(&cat_transcript(), "cat", &SearchOptions::default()).unwrap();
    let indices: Vec<usize> = results.iter().map(|r| r.message_index).collect();
    assert_eq!(indices, vec![1, 3]);
}

#[test]
fn test_search_cat_scenario_capped() {
    let options = SearchOptions { max_results: 1, ..SearchOptions::default() };
    let results = search(&cat_transcript(), "cat", &options).unwrap();
    let indices: Vec<usize> = results.iter().map(|r| r.message_index).collect();
    assert_eq!(indices, vec![1]);
}

#[test]
fn test_search_zero_max_results_is_configuration_error() {
    let options = SearchOptions { max_results: 0, ..SearchOptions::default() };
    let err = search(&cat_transcript(), "cat", &options).unwrap_err();
    assert!(matches!(err, NavigatorError::Configuration(_)));
}

fn corpus() -> Vec<message_navigator::Message> {
    let texts = [
        "The Cat sat on the mat",
        "no felines here",
        "concatenate strings",
        "CAT CAT CAT",
        "",
        "über cat café",
        "scattered thoughts about catalogs",
        "dogs only",
        "cAt in the middle of a very long sentence that keeps going and going past the radius",
        "ends with cat",
    ];
    transcript(&texts)
}

#[test]
fn test_every_result_contains_query_and_none_skipped() {
    let corpus = corpus();

    for query in ["cat", "CAT", "at", "the", "é", "going"] {
        for case_sensitive in [false, true] {
            let options = SearchOptions { case_sensitive, ..SearchOptions::default() };
            let results = search(&corpus, query, &options).unwrap();

            let contains = |text: &str| {
                if case_sensitive {
                    text.contains(query)
                } else {
                    text.to_lowercase().contains(&query.to_lowercase())
                }
            };

            let expected: Vec<usize> = corpus
                .iter()
                .enumerate()
                .filter(|(_, m)| contains(&m.text))
                .map(|(i, _)| i)
                .collect();
            let actual: Vec<usize> = results.iter().map(|r| r.message_index).collect();

            assert_eq!(actual, expected, "query {:?} case_sensitive {}", query, case_sensitive);
        }
    }
}

#[test]
fn test_cap_only_skips_after_limit() {
    let corpus = corpus();
    let all = search(&corpus, "cat", &SearchOptions::default()).unwrap();

    for cap in 1..=all.len() {
        let options = SearchOptions { max_results: cap, ..SearchOptions::default() };
        let capped = search(&corpus, "cat", &options).unwrap();
        assert_eq!(capped, all[..cap].to_vec());
    }
}

#[test]
fn test_results_strictly_increasing() {
    let corpus = corpus();
    for query in ["cat", "a", "t"] {
        let results = search(&corpus, query, &SearchOptions::default()).unwrap();
        assert!(results.windows(2).all(|w| w[0].message_index < w[1].message_index));
    }
}

#[test]
fn test_preview_round_trip_is_substring() {
    let corpus = corpus();

    for radius in [0, 3, 10, 40] {
        for highlight in [false, true] {
            let options =
                SearchOptions { preview_radius: radius, highlight, ..SearchOptions::default() };
            for record in search(&corpus, "cat", &options).unwrap() {
                let window = strip_markers(&record.preview);
                assert!(
                    corpus[record.message_index].text.contains(&window),
                    "{:?} is not a substring of {:?}",
                    window,
                    corpus[record.message_index].text
                );
            }
        }
    }
}

#[test]
fn test_preview_round_trip_with_marker_text_in_message() {
    let corpus = transcript(&["<mark>x cat", "a </mark> then cat <mark>", "cat &lt; dog"]);

    for highlight in [false, true] {
        let options = SearchOptions { highlight, ..SearchOptions::default() };
        let results = search(&corpus, "cat", &options).unwrap();
        assert_eq!(results.len(), 3);

        for record in results {
            assert_eq!(strip_markers(&record.preview), corpus[record.message_index].text);
        }
    }
}

#[test]
fn test_search_never_mutates_transcript() {
    let corpus = corpus();
    let before = corpus.clone();
    search(&corpus, "cat", &SearchOptions::default()).unwrap();
    assert_eq!(corpus, before);
}

#[test]
fn test_resolve_out_of_range_never_queries_surface() {
    let transcript = cat_transcript();
    let mut surface = RecordingSurface::new(0..5);
    let mut navigator = Navigator::default();

    let outcome = navigator.resolve_and_focus(&transcript, &mut surface, 10, Instant::now());

    assert_eq!(outcome, NavigationOutcome::NotFound(NotFoundReason::OutOfRange));
    assert_eq!(surface.lookups.get(), 0);
    assert!(surface.scrolls.is_empty());
}

#[test]
fn test_resolve_not_rendered() {
    let transcript = cat_transcript();
    // Only the last two messages are materialized
    let mut surface = RecordingSurface::new(3..5);
    let mut navigator = Navigator::default();

    let outcome = navigator.resolve_and_focus(&transcript, &mut surface, 2, Instant::now());

    assert_eq!(outcome, NavigationOutcome::NotFound(NotFoundReason::NotRendered));
    assert_eq!(surface.lookups.get(), 1);
    assert!(surface.highlighted.is_empty());
}

#[test]
fn test_resolve_found_scrolls_to_center_and_highlights() {
    let transcript = cat_transcript();
    let mut surface = RecordingSurface::new(0..5);
    let mut navigator = Navigator::default();

    let outcome = navigator.resolve_and_focus(&transcript, &mut surface, 3, Instant::now());

    assert_eq!(outcome, NavigationOutcome::Found(3));
    assert_eq!(surface.scrolls, vec![(3, ScrollAlign::Center)]);
    assert!(surface.highlighted.contains(&3));
}

#[test]
fn test_rapid_focus_leaves_one_effective_removal() {
    let transcript = cat_transcript();
    let mut surface = RecordingSurface::new(0..5);
    let mut navigator = Navigator::new(NavigatorConfig::default());
    let start = Instant::now();

    for offset in [0, 100, 200] {
        navigator.resolve_and_focus(
            &transcript,
            &mut surface,
            1,
            start + Duration::from_millis(offset),
        );
    }

    assert_eq!(navigator.pending_removals(), 3);
    assert_eq!(navigator.effective_removals(), 1);
    let latest = navigator.active_token(&1).unwrap();

    // The first two timers fire without clearing the newer highlight
    assert_eq!(navigator.tick(&mut surface, start + Duration::from_millis(2100)), 0);
    assert!(surface.highlighted.contains(&1));
    assert_eq!(navigator.active_token(&1), Some(latest));

    assert_eq!(navigator.tick(&mut surface, start + Duration::from_millis(2200)), 1);
    assert!(!surface.highlighted.contains(&1));
    assert_eq!(navigator.pending_removals(), 0);

    // Exactly one removal was applied to the surface
    let removals = surface.highlight_log.iter().filter(|(_, on)| !on).count();
    assert_eq!(removals, 1);
}

#[test]
fn test_jump_to_floor_from_parsed_file() {
    let (_dir, path) = ChatFileBuilder::new()
        .with_header()
        .with_message(ChatLineBuilder::user("hello"))
        .with_message(ChatLineBuilder::character("hi there"))
        .with_message(ChatLineBuilder::system("narration"))
        .build();

    let transcript = parse_transcript_file(&path).unwrap();
    assert_eq!(transcript.len(), 3);

    let mut surface = RecordingSurface::new(0..3);
    let mut navigator = Navigator::default();
    let mut notifier = RecordingNotifier::new();
    let now = Instant::now();

    assert!(jump_to_floor(&mut navigator, &transcript, &mut surface, &mut notifier, " 2 ", now));
    assert!(surface.highlighted.contains(&2));

    assert!(!jump_to_floor(&mut navigator, &transcript, &mut surface, &mut notifier, "3", now));
    assert_eq!(notifier.last().unwrap().message, "Floor 3 is out of range (0-2)");

    assert!(!jump_to_floor(&mut navigator, &transcript, &mut surface, &mut notifier, "-1", now));
    assert_eq!(surface.lookups.get(), 1);
}

#[test]
fn test_not_rendered_guidance_differs_from_invalid_id() {
    let transcript = cat_transcript();
    let mut surface = RecordingSurface::new(4..5);
    let mut navigator = Navigator::default();
    let mut notifier = RecordingNotifier::new();
    let now = Instant::now();

    navigator.jump_to_message(&transcript, &mut surface, &mut notifier, 0, now);
    navigator.jump_to_message(&transcript, &mut surface, &mut notifier, 9, now);

    let messages: Vec<&str> =
        notifier.notifications().iter().map(|n| n.message.as_str()).collect();
    assert_eq!(messages, vec!["Floor not loaded, cannot jump", "Invalid message id"]);
}

#[test]
fn test_debounced_session_publishes_latest_query_only() {
    let transcript = cat_transcript();
    let options = SearchOptions::default();
    let mut session = SearchSession::new(Duration::from_millis(300));
    let start = Instant::now();

    session.input("d", start);
    session.input("do", start + Duration::from_millis(100));
    session.input("cat", start + Duration::from_millis(200));
    assert!(session.poll(start + Duration::from_millis(400)).is_none());

    let ticket = session.poll(start + Duration::from_millis(500)).unwrap();
    assert_eq!(ticket.query, "cat");

    // A newer search starts before the first completes
    let newer = session.begin("dog");
    let stale = search(&transcript, &ticket.query, &options).unwrap();
    assert!(!session.complete(ticket, stale));

    let fresh = search(&transcript, &newer.query, &options).unwrap();
    assert!(session.complete(newer, fresh));
    assert_eq!(session.displayed_query(), "dog");
    assert_eq!(session.results().len(), 1);
}

#[test]
fn test_settings_drive_search_and_paging() {
    let mut store = MemorySettingsStore::new();
    store.set(
        "message-navigator",
        serde_json::json!({"caseSensitive": true, "messagesPerPage": 5, "maxResults": 7}),
    );
    let settings = NavigatorSettings::load(&mut store);

    let texts: Vec<String> = (0..20).map(|i| format!("Cat {} cat", i)).collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    let transcript = transcript(&refs);

    let results = search(&transcript, "Cat", &settings.search_options()).unwrap();
    assert_eq!(results.len(), 7);

    let page = paginate(&results, 2, settings.messages_per_page);
    assert_eq!(page.label(), "2/2");
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].message_index, 5);
}
