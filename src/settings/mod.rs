//! Navigator settings and the settings store they live in.

pub mod config;
pub mod store;

pub use config::{
    HIGHLIGHT_DURATION_RANGE_MS, MAX_RESULTS_RANGE, NavigatorSettings, PER_PAGE_RANGE,
    PREVIEW_LENGTH_RANGE, PREVIEW_RADIUS_RANGE, SEARCH_DEBOUNCE_RANGE_MS, SETTINGS_KEY,
};
pub use store::{JsonFileSettingsStore, MemorySettingsStore, SettingsStore, default_settings_path};
