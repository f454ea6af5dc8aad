//! TUI application state and event handling.
//!
//! The `App` plays the host for the navigator: it owns the transcript, the
//! [`TranscriptView`] render surface, the settings store and a notifier whose
//! notifications become transient status messages.
//!
//! - **Live search**: keystrokes go through the debounced [`SearchSession`];
//!   an empty query lists every message instead
//! - **Paging**: results are shown `messagesPerPage` at a time
//! - **Navigation**: Enter jumps to the selected result, Ctrl+G to a floor
//! - **Timers**: highlight removal, search debounce and deferred settings
//!   writes are deadlines polled from `tick`
//!
//! # Example
//!
//! ```rust,ignore
//! let store = JsonFileSettingsStore::open(default_settings_path()?)?;
//! let mut app = App::new(messages, store).with_source(path);
//! app.run(&mut terminal)?;
//! ```

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::layout::Rect;

use super::events::{Action, poll_event};
use super::layout::AppLayout;
use super::rendering::{Overlay, RenderState, render_ui};
use super::transcript_view::{DEFAULT_RENDER_WINDOW, TranscriptView};
use crate::models::{MatchRecord, Message};
use crate::navigator::{Navigator, jump_to_floor};
use crate::notify::{NotificationKind, Notifier, RecordingNotifier};
use crate::parsers::parse_transcript_file;
use crate::search::{Page, SearchSession, SearchTicket, list_messages, paginate, search};
use crate::settings::{
    HIGHLIGHT_DURATION_RANGE_MS, MAX_RESULTS_RANGE, NavigatorSettings, PER_PAGE_RANGE,
    PREVIEW_LENGTH_RANGE, PREVIEW_RADIUS_RANGE, SEARCH_DEBOUNCE_RANGE_MS, SettingsStore,
};

/// Duration for success and info status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;

const MAX_QUERY_CHARS: usize = 256;
const MAX_FLOOR_INPUT_CHARS: usize = 20;

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Info,
    Error,
}

impl From<NotificationKind> for MessageType {
    fn from(kind: NotificationKind) -> Self {
        match kind {
            NotificationKind::Success => MessageType::Success,
            NotificationKind::Info => MessageType::Info,
            NotificationKind::Error => MessageType::Error,
        }
    }
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// Settings overlay state: an edited copy plus the selected row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDraft {
    pub settings: NavigatorSettings,
    pub row: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Search,
    JumpInput(String),
    FullMessage(usize),
    Settings(SettingsDraft),
}

pub struct App<S: SettingsStore> {
    transcript: Vec<Message>,
    source: Option<PathBuf>,
    settings: NavigatorSettings,
    store: S,
    view: TranscriptView,
    navigator: Navigator<usize>,
    session: SearchSession,
    query: String,
    // Shown while no query is active
    listing: Vec<MatchRecord>,
    page: usize,
    selected: usize,
    mode: Mode,
    panel_minimized: bool,
    notifier: RecordingNotifier,
    status_message: Option<StatusMessage>,
    should_quit: bool,
    // Dirty state tracking for efficient rendering
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl<S: SettingsStore> App<S> {
    pub fn new(transcript: Vec<Message>, mut store: S) -> Self {
        let settings = NavigatorSettings::load(&mut store);
        let view = TranscriptView::new(transcript.len(), DEFAULT_RENDER_WINDOW);
        let listing = list_messages(&transcript, settings.max_preview_length);

        Self {
            navigator: Navigator::new(settings.navigator_config()),
            session: SearchSession::new(settings.search_debounce()),
            transcript,
            source: None,
            settings,
            store,
            view,
            query: String::new(),
            listing,
            page: 1,
            selected: 0,
            mode: Mode::Search,
            panel_minimized: false,
            notifier: RecordingNotifier::new(),
            status_message: None,
            should_quit: false,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        }
    }

    /// Remember where the transcript came from so Ctrl+R can reload it
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    pub fn settings(&self) -> &NavigatorSettings {
        &self.settings
    }

    /// Validate `input` as a floor number and jump to it
    pub fn jump_to_floor(&mut self, input: &str, now: Instant) -> bool {
        let jumped = jump_to_floor(
            &mut self.navigator,
            &self.transcript,
            &mut self.view,
            &mut self.notifier,
            input,
            now,
        );
        self.needs_redraw = true;
        jumped
    }

    /// Size the transcript viewport for a terminal of `width` x `height`
    pub fn prepare_viewport(&mut self, width: u16, height: u16) {
        let layout = AppLayout::new(Rect::new(0, 0, width, height), self.panel_minimized);
        self.view.set_viewport(layout.transcript_capacity());
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, now: Instant) {
        let duration_ms = match message_type {
            MessageType::Error => STATUS_ERROR_DURATION_MS,
            MessageType::Success | MessageType::Info => STATUS_SUCCESS_DURATION_MS,
        };
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: now + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    /// Check and clear expired status messages
    fn check_and_clear_expired_status(&mut self, now: Instant) {
        let should_clear =
            self.status_message.as_ref().map(|msg| now >= msg.expires_at).unwrap_or(false);
        if should_clear {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    /// Fire every timer due at `now`
    fn tick(&mut self, now: Instant) {
        if let Some(ticket) = self.session.poll(now) {
            self.run_search(ticket);
        }

        if self.navigator.tick(&mut self.view, now) > 0 {
            self.needs_redraw = true;
        }

        if let Err(e) = self.store.flush_if_due(now) {
            tracing::warn!(error = %e, "Failed to write settings");
            self.notifier.notify_error("Failed to save settings");
        }

        for notification in self.notifier.drain() {
            self.set_status(notification.message, notification.kind.into(), now);
        }
        self.check_and_clear_expired_status(now);
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            let now = Instant::now();
            self.tick(now);

            let size = terminal.size()?;
            self.prepare_viewport(size.width, size.height);

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let elapsed = now.duration_since(self.last_draw_time);
            if self.needs_redraw || elapsed >= Duration::from_millis(100) {
                terminal.draw(|f| render_ui(f, &self.render_state()))?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(50))?;
            self.handle_action(action, Instant::now());
        }

        self.shutdown();
        Ok(())
    }

    /// Clear highlights and drop in-flight searches
    fn shutdown(&mut self) {
        self.navigator.reset(&mut self.view);
        self.session.reset();
    }

    fn render_state(&self) -> RenderState<'_> {
        let overlay = match &self.mode {
            Mode::Search => Overlay::None,
            Mode::JumpInput(input) => Overlay::JumpInput(input.as_str()),
            Mode::FullMessage(index) => {
                self.transcript.get(*index).map(Overlay::FullMessage).unwrap_or(Overlay::None)
            }
            Mode::Settings(draft) => {
                Overlay::Settings { rows: setting_rows(&draft.settings), selected: draft.row }
            }
        };

        RenderState {
            transcript: &self.transcript,
            view: &self.view,
            query: &self.query,
            search_pending: self.session.is_pending(),
            showing_search: !self.session.displayed_query().is_empty(),
            result_count: self.results().len(),
            page: self.current_page(),
            selected: self.selected,
            case_sensitive: self.settings.case_sensitive,
            panel_minimized: self.panel_minimized,
            overlay,
            status_message: self.status_message.as_ref(),
        }
    }

    /// Results on display: search hits, or the full listing without a query
    fn results(&self) -> &[MatchRecord] {
        if self.session.displayed_query().is_empty() {
            &self.listing
        } else {
            self.session.results()
        }
    }

    fn current_page(&self) -> Page<'_, MatchRecord> {
        paginate(self.results(), self.page, self.settings.messages_per_page)
    }

    fn selected_index(&self) -> Option<usize> {
        self.current_page().items.get(self.selected).map(|record| record.message_index)
    }

    fn run_search(&mut self, ticket: SearchTicket) {
        let results = match search(&self.transcript, &ticket.query, &self.settings.search_options())
        {
            Ok(results) => results,
            Err(e) => {
                self.notifier.notify_error(&e.to_string());
                Vec::new()
            }
        };

        if self.session.complete(ticket, results) {
            self.page = 1;
            self.selected = 0;
            self.needs_redraw = true;
        }
    }

    /// Re-run the current query right away
    fn rerun_search(&mut self) {
        let ticket = self.session.begin(self.query.trim());
        self.run_search(ticket);
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action, now: Instant) {
        if action == Action::Quit {
            self.should_quit = true;
            return;
        }
        if action != Action::None {
            self.needs_redraw = true;
        }

        match std::mem::replace(&mut self.mode, Mode::Search) {
            Mode::Search => self.handle_search_action(action, now),
            Mode::JumpInput(input) => self.handle_jump_input(input, action, now),
            Mode::FullMessage(index) => {
                if !matches!(action, Action::Escape | Action::Submit) {
                    self.mode = Mode::FullMessage(index);
                }
            }
            Mode::Settings(draft) => self.handle_settings_action(draft, action),
        }
    }

    fn handle_search_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::Escape => {
                if self.query.is_empty() {
                    self.should_quit = true;
                } else {
                    self.query.clear();
                    self.rerun_search();
                }
            }
            Action::Up => self.move_selection(-1),
            Action::Down => self.move_selection(1),
            Action::Left | Action::PrevPage => self.change_page(-1),
            Action::Right | Action::NextPage => self.change_page(1),
            Action::Submit => {
                if let Some(ticket) = self.session.flush() {
                    self.run_search(ticket);
                } else {
                    self.open_selected(now);
                }
            }
            Action::ScrollTranscript(delta) => self.view.scroll_by(delta),
            Action::JumpToFloor => {
                if self.transcript.is_empty() {
                    self.notifier.notify_error("The chat has no messages");
                } else {
                    self.mode = Mode::JumpInput(String::new());
                }
            }
            Action::LoadMore => match self.view.load_more() {
                0 => self.notifier.notify_info("All messages are loaded"),
                n => self.notifier.notify_info(&format!("Loaded {} earlier messages", n)),
            },
            Action::Refresh => self.refresh(),
            Action::ToggleCase => {
                let mut settings = self.settings.clone();
                settings.case_sensitive = !settings.case_sensitive;
                self.apply_settings(settings);
                let label = if self.settings.case_sensitive { "on" } else { "off" };
                self.notifier.notify_info(&format!("Case sensitive search {}", label));
            }
            Action::OpenSettings => {
                let draft = SettingsDraft { settings: self.settings.clone(), row: 0 };
                self.mode = Mode::Settings(draft);
            }
            Action::TogglePanel => self.panel_minimized = !self.panel_minimized,
            Action::Input(c) if !self.panel_minimized => self.update_search(c, now),
            Action::DeleteChar if !self.panel_minimized => self.delete_char(now),
            _ => {}
        }
    }

    fn handle_jump_input(&mut self, mut input: String, action: Action, now: Instant) {
        match action {
            Action::Escape => {}
            Action::Submit => {
                self.jump_to_floor(&input, now);
            }
            Action::Input(c) => {
                if input.chars().count() < MAX_FLOOR_INPUT_CHARS {
                    input.push(c);
                }
                self.mode = Mode::JumpInput(input);
            }
            Action::DeleteChar => {
                input.pop();
                self.mode = Mode::JumpInput(input);
            }
            _ => self.mode = Mode::JumpInput(input),
        }
    }

    fn handle_settings_action(&mut self, mut draft: SettingsDraft, action: Action) {
        match action {
            Action::Escape => {}
            Action::Submit => {
                self.apply_settings(draft.settings);
                self.notifier.notify_success("Settings saved");
            }
            Action::Up => {
                draft.row = draft.row.saturating_sub(1);
                self.mode = Mode::Settings(draft);
            }
            Action::Down => {
                draft.row = (draft.row + 1).min(SETTING_COUNT - 1);
                self.mode = Mode::Settings(draft);
            }
            Action::Left | Action::Right => {
                adjust_setting(&mut draft.settings, draft.row, action == Action::Right);
                self.mode = Mode::Settings(draft);
            }
            _ => self.mode = Mode::Settings(draft),
        }
    }

    /// Jump to the selected result, opening the full message if configured
    fn open_selected(&mut self, now: Instant) {
        let Some(index) = self.selected_index() else {
            self.notifier.notify_info("No message selected");
            return;
        };

        let jumped = self.navigator.jump_to_message(
            &self.transcript,
            &mut self.view,
            &mut self.notifier,
            index,
            now,
        );
        if jumped && self.settings.show_full_message_on_click {
            self.mode = Mode::FullMessage(index);
        }
    }

    /// Persist and adopt new settings, then rebuild what depends on them
    fn apply_settings(&mut self, settings: NavigatorSettings) {
        self.settings = settings.normalized();
        if let Err(e) = self.settings.save(&mut self.store) {
            tracing::warn!(error = %e, "Failed to store settings");
            self.notifier.notify_error("Failed to save settings");
        }

        self.navigator.set_config(self.settings.navigator_config());
        self.session.set_delay(self.settings.search_debounce());
        self.listing = list_messages(&self.transcript, self.settings.max_preview_length);
        self.rerun_search();
    }

    /// Re-read the transcript file and re-run the current search
    fn refresh(&mut self) {
        let Some(path) = self.source.clone() else {
            self.notifier.notify_info("Nothing to refresh");
            return;
        };

        match parse_transcript_file(&path) {
            Ok(messages) => {
                self.navigator.reset(&mut self.view);
                self.transcript = messages;
                self.view.sync_len(self.transcript.len());
                self.listing = list_messages(&self.transcript, self.settings.max_preview_length);
                self.rerun_search();
                self.notifier
                    .notify_success(&format!("Reloaded {} messages", self.transcript.len()));
            }
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "Failed to reload transcript");
                self.notifier.notify_error(&format!("Failed to reload chat: {}", e));
            }
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.current_page().items.len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = self.selected.saturating_add_signed(delta).min(len - 1);
    }

    fn change_page(&mut self, delta: isize) {
        let page = self.current_page();
        let target = page.number.saturating_add_signed(delta).clamp(1, page.total_pages);
        if target != page.number {
            self.page = target;
            self.selected = 0;
        }
    }

    fn update_search(&mut self, c: char, now: Instant) {
        // Limit search query length
        if self.query.chars().count() < MAX_QUERY_CHARS {
            self.query.push(c);
            self.session.input(self.query.trim(), now);
        }
    }

    fn delete_char(&mut self, now: Instant) {
        if self.query.pop().is_some() {
            self.session.input(self.query.trim(), now);
        }
    }
}

const SETTING_COUNT: usize = 11;

/// Label and display value of each row in the settings overlay
pub(super) fn setting_rows(s: &NavigatorSettings) -> Vec<(&'static str, String)> {
    let flag = |on: bool| if on { "on".to_string() } else { "off".to_string() };
    vec![
        ("Preview length", s.max_preview_length.to_string()),
        ("Messages per page", s.messages_per_page.to_string()),
        ("Highlight jumped message", flag(s.highlight_jumped_message)),
        ("Show full message on open", flag(s.show_full_message_on_click)),
        ("Auto scroll to message", flag(s.auto_scroll_to_position)),
        ("Highlight duration (ms)", s.highlight_duration_ms.to_string()),
        ("Case sensitive", flag(s.case_sensitive)),
        ("Max results", s.max_results.to_string()),
        ("Preview radius", s.preview_radius.to_string()),
        ("Highlight matches", flag(s.highlight_matches)),
        ("Search delay (ms)", s.search_debounce_ms.to_string()),
    ]
}

fn step(value: usize, amount: usize, forward: bool, (min, max): (usize, usize)) -> usize {
    let next = if forward { value.saturating_add(amount) } else { value.saturating_sub(amount) };
    next.clamp(min, max)
}

fn step_ms(value: u64, amount: u64, forward: bool, (min, max): (u64, u64)) -> u64 {
    let next = if forward { value.saturating_add(amount) } else { value.saturating_sub(amount) };
    next.clamp(min, max)
}

/// Toggle or step the setting on `row`
fn adjust_setting(s: &mut NavigatorSettings, row: usize, forward: bool) {
    match row {
        0 => s.max_preview_length = step(s.max_preview_length, 10, forward, PREVIEW_LENGTH_RANGE),
        1 => s.messages_per_page = step(s.messages_per_page, 1, forward, PER_PAGE_RANGE),
        2 => s.highlight_jumped_message = !s.highlight_jumped_message,
        3 => s.show_full_message_on_click = !s.show_full_message_on_click,
        4 => s.auto_scroll_to_position = !s.auto_scroll_to_position,
        5 => {
            s.highlight_duration_ms =
                step_ms(s.highlight_duration_ms, 500, forward, HIGHLIGHT_DURATION_RANGE_MS)
        }
        6 => s.case_sensitive = !s.case_sensitive,
        7 => s.max_results = step(s.max_results, 50, forward, MAX_RESULTS_RANGE),
        8 => s.preview_radius = step(s.preview_radius, 10, forward, PREVIEW_RADIUS_RANGE),
        9 => s.highlight_matches = !s.highlight_matches,
        10 => {
            s.search_debounce_ms =
                step_ms(s.search_debounce_ms, 50, forward, SEARCH_DEBOUNCE_RANGE_MS)
        }
        _ => {}
    }
}
