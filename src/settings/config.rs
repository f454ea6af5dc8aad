use std::fmt::Display;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::store::SettingsStore;
use crate::models::SearchOptions;
use crate::models::search::{DEFAULT_MAX_RESULTS, DEFAULT_PREVIEW_RADIUS};
use crate::navigator::NavigatorConfig;

/// Key under which the navigator's settings object is stored
pub const SETTINGS_KEY: &str = "message-navigator";

pub const PREVIEW_LENGTH_RANGE: (usize, usize) = (50, 500);
pub const PER_PAGE_RANGE: (usize, usize) = (5, 50);
pub const HIGHLIGHT_DURATION_RANGE_MS: (u64, u64) = (500, 10_000);
pub const MAX_RESULTS_RANGE: (usize, usize) = (1, 1000);
pub const PREVIEW_RADIUS_RANGE: (usize, usize) = (0, 200);
pub const SEARCH_DEBOUNCE_RANGE_MS: (u64, u64) = (0, 2000);

/// Navigator settings, persisted as one JSON object in the host settings store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigatorSettings {
    /// Characters shown per message when listing without a query
    pub max_preview_length: usize,
    pub messages_per_page: usize,
    pub highlight_jumped_message: bool,
    pub show_full_message_on_click: bool,
    pub auto_scroll_to_position: bool,
    pub highlight_duration_ms: u64,
    pub case_sensitive: bool,
    pub max_results: usize,
    pub preview_radius: usize,
    pub highlight_matches: bool,
    pub search_debounce_ms: u64,
}

impl Default for NavigatorSettings {
    fn default() -> Self {
        Self {
            max_preview_length: 100,
            messages_per_page: 10,
            highlight_jumped_message: true,
            show_full_message_on_click: true,
            auto_scroll_to_position: true,
            highlight_duration_ms: 2000,
            case_sensitive: false,
            max_results: DEFAULT_MAX_RESULTS,
            preview_radius: DEFAULT_PREVIEW_RADIUS,
            highlight_matches: true,
            search_debounce_ms: 300,
        }
    }
}

impl NavigatorSettings {
    /// Load settings from `store`.
    ///
    /// When nothing (or an empty object) is stored, the defaults are written
    /// back. Malformed values fall back to defaults; out-of-range values are
    /// clamped.
    pub fn load<S: SettingsStore + ?Sized>(store: &mut S) -> Self {
        let stored = store.get(SETTINGS_KEY);
        let is_empty = match &stored {
            None | Some(Value::Null) => true,
            Some(Value::Object(map)) => map.is_empty(),
            Some(_) => false,
        };

        if is_empty {
            let settings = Self::default();
            if let Err(e) = settings.save(store) {
                tracing::warn!(error = %e, "Failed to store default settings");
            }
            return settings;
        }

        match stored.map(serde_json::from_value::<Self>) {
            Some(Ok(settings)) => settings.normalized(),
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Stored settings are malformed, using defaults");
                Self::default()
            }
            None => Self::default(),
        }
    }

    pub fn save<S: SettingsStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        let value = serde_json::to_value(self).context("Failed to serialize settings")?;
        store.set(SETTINGS_KEY, value);
        Ok(())
    }

    /// Clamp every value into its supported range
    pub fn normalized(mut self) -> Self {
        self.max_preview_length =
            clamp_logged("maxPreviewLength", self.max_preview_length, PREVIEW_LENGTH_RANGE);
        self.messages_per_page =
            clamp_logged("messagesPerPage", self.messages_per_page, PER_PAGE_RANGE);

        self.highlight_duration_ms = clamp_logged(
            "highlightDurationMs",
            self.highlight_duration_ms,
            HIGHLIGHT_DURATION_RANGE_MS,
        );
        self.preview_radius =
            clamp_logged("previewRadius", self.preview_radius, PREVIEW_RADIUS_RANGE);
        self.search_debounce_ms =
            clamp_logged("searchDebounceMs", self.search_debounce_ms, SEARCH_DEBOUNCE_RANGE_MS);

        if self.max_results == 0 {
            tracing::warn!("maxResults must be at least 1, using default");
            self.max_results = DEFAULT_MAX_RESULTS;
        }
        self.max_results = clamp_logged("maxResults", self.max_results, MAX_RESULTS_RANGE);
        self
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            case_sensitive: self.case_sensitive,
            max_results: self.max_results,
            preview_radius: self.preview_radius,
            highlight: self.highlight_matches,
        }
        .validated_or_default()
    }

    pub fn navigator_config(&self) -> NavigatorConfig {
        NavigatorConfig {
            highlight: self.highlight_jumped_message,
            highlight_duration: Duration::from_millis(self.highlight_duration_ms),
            auto_scroll: self.auto_scroll_to_position,
        }
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

fn clamp_logged<T>(name: &str, value: T, (min, max): (T, T)) -> T
where
    T: Ord + Copy + Display,
{
    let clamped = value.clamp(min, max);
    if clamped != value {
        tracing::warn!(
            setting = name,
            value = %value,
            min = %min,
            max = %max,
            "Setting out of range, clamping"
        );
    }
    clamped
}
