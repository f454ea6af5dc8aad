use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};

use super::app::{MessageType, StatusMessage};
use super::layout::AppLayout;
use super::transcript_view::TranscriptView;
use crate::models::{MatchRecord, Message};
use crate::search::Page;
use crate::search::preview::split_highlights;
use crate::utils::{single_line, strip_control_sequences};

const ACCENT: Color = Color::Rgb(16, 185, 129); // Emerald
const MUTED: Color = Color::Rgb(113, 113, 122);
const BRIGHT: Color = Color::Rgb(250, 250, 250);
const BAR_BG: Color = Color::Rgb(24, 24, 27);
const ERROR: Color = Color::Rgb(239, 68, 68);
const INFO: Color = Color::Rgb(96, 165, 250);

/// Popup drawn over the main screen
pub enum Overlay<'a> {
    None,
    JumpInput(&'a str),
    FullMessage(&'a Message),
    Settings { rows: Vec<(&'static str, String)>, selected: usize },
}

/// Everything the renderer needs from the app for one frame
pub struct RenderState<'a> {
    pub transcript: &'a [Message],
    pub view: &'a TranscriptView,
    pub query: &'a str,
    pub search_pending: bool,
    /// Results come from a query rather than the full listing
    pub showing_search: bool,
    pub result_count: usize,
    pub page: Page<'a, MatchRecord>,
    pub selected: usize,
    pub case_sensitive: bool,
    pub panel_minimized: bool,
    pub overlay: Overlay<'a>,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let area = frame.area();
    let layout = AppLayout::new(area, state.panel_minimized);

    render_transcript(frame, layout.transcript_area, state.transcript, state.view);
    if !state.panel_minimized {
        render_search_input(frame, layout.search_area, state);
        render_results_list(frame, layout.results_area, state);
        render_page_footer(frame, layout.footer_area, &state.page);
    }
    render_status_bar(frame, layout.status_area, state.status_message);

    match &state.overlay {
        Overlay::None => {}
        Overlay::JumpInput(input) => render_jump_input(frame, area, input, state.transcript.len()),
        Overlay::FullMessage(message) => render_full_message(frame, area, message),
        Overlay::Settings { rows, selected } => render_settings(frame, area, rows, *selected),
    }
}

fn muted() -> Style {
    Style::default().fg(MUTED)
}

fn bordered(title: impl Into<String>) -> Block<'static> {
    Block::default().borders(Borders::ALL).border_style(muted()).title(title.into())
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn render_transcript(frame: &mut Frame, area: Rect, transcript: &[Message], view: &TranscriptView) {
    let width = area.width.saturating_sub(2) as usize;
    let mut lines = Vec::new();

    let header = if view.loaded_from() > 0 {
        format!("↑ {} earlier messages not loaded (Ctrl+L)", view.loaded_from())
    } else {
        "Start of chat".to_string()
    };
    lines.push(Line::from(Span::styled(header, muted())));

    for index in view.visible_range() {
        let Some(message) = transcript.get(index) else {
            continue;
        };

        let name_color = if message.is_user {
            ACCENT
        } else if message.is_system {
            MUTED
        } else {
            BRIGHT
        };
        let title = Line::from(vec![
            Span::styled(format!("#{} ", index), muted()),
            Span::styled(
                single_line(&message.author),
                Style::default().fg(name_color).add_modifier(Modifier::BOLD),
            ),
        ]);
        let body = Line::from(truncate_chars(&single_line(&message.text), width));

        if view.is_highlighted(index) {
            let style = Style::default().fg(BRIGHT).bg(ACCENT);
            lines.push(title.style(style));
            lines.push(body.style(style));
        } else {
            lines.push(title);
            lines.push(body);
        }
    }

    let paragraph = Paragraph::new(lines).block(bordered(format!(" Chat ({}) ", view.len())));
    frame.render_widget(paragraph, area);
}

fn render_search_input(frame: &mut Frame, area: Rect, state: &RenderState) {
    let case = if state.case_sensitive { "Aa" } else { "aa" };
    let mut title = format!(" Search [{}] ", case);
    if state.search_pending {
        title.push_str("… ");
    }

    let input = Line::from(vec![
        Span::raw(single_line(state.query)),
        Span::styled("▏", Style::default().fg(ACCENT)),
    ]);
    frame.render_widget(Paragraph::new(input).block(bordered(title)), area);
}

/// Preview spans with the highlighted parts emphasized
fn preview_line(preview: &str) -> Line<'static> {
    let clean = single_line(preview);
    let spans: Vec<Span<'static>> = split_highlights(&clean)
        .into_iter()
        .map(|(part, highlighted)| {
            if highlighted {
                Span::styled(
                    part.into_owned(),
                    Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                )
            } else {
                Span::raw(part.into_owned())
            }
        })
        .collect();
    Line::from(spans)
}

fn render_results_list(frame: &mut Frame, area: Rect, state: &RenderState) {
    let title = if state.showing_search {
        format!(" Matches ({}) ", state.result_count)
    } else {
        format!(" Messages ({}) ", state.result_count)
    };

    if state.page.items.is_empty() {
        let text = if state.showing_search { "No matches" } else { "The chat has no messages" };
        let paragraph = Paragraph::new(Span::styled(text, muted())).block(bordered(title));
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = state
        .page
        .items
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let header = Line::from(vec![
                Span::raw(format!("#{} ", record.message_index)),
                Span::styled(
                    single_line(&record.author),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]);

            let style = if idx == state.selected {
                Style::default()
                    .fg(BRIGHT) // Bright text
                    .bg(ACCENT) // Emerald background
            } else {
                muted()
            };

            ListItem::new(Text::from(vec![header, preview_line(&record.preview)])).style(style)
        })
        .collect();

    let list = List::new(items).block(bordered(title));
    let mut list_state = ListState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_page_footer(frame: &mut Frame, area: Rect, page: &Page<'_, MatchRecord>) {
    let prev = if page.has_prev() { "◀ PgUp" } else { "      " };
    let next = if page.has_next() { "PgDn ▶" } else { "" };
    let text = format!(" {}  Page {}  {}", prev, page.label(), next);
    frame.render_widget(Paragraph::new(text).style(muted()), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, status: Option<&StatusMessage>) {
    let (text, style) = match status {
        Some(msg) => {
            let (icon, color) = match msg.message_type {
                MessageType::Success => ("✓", ACCENT),
                MessageType::Info => ("ℹ", INFO),
                MessageType::Error => ("✗", ERROR),
            };
            (
                format!(" {} {} ", icon, single_line(&msg.text)),
                Style::default().fg(color).bg(BAR_BG),
            )
        }
        None => (
            " Enter: jump | Ctrl+G: floor | Ctrl+L: load more | Ctrl+R: refresh | \
             Ctrl+T: case | Ctrl+S: settings | Ctrl+B: panel | Esc: clear/quit "
                .to_string(),
            Style::default().fg(BRIGHT).bg(BAR_BG),
        ),
    };

    frame.render_widget(Paragraph::new(text).style(style), area);
}

/// Rectangle of the given percentage size centered in `area`
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn render_jump_input(frame: &mut Frame, area: Rect, input: &str, transcript_len: usize) {
    let popup = centered_rect(40, 20, area);
    let lines = vec![
        Line::from(vec![
            Span::raw(format!("Floor: {}", single_line(input))),
            Span::styled("▏", Style::default().fg(ACCENT)),
        ]),
        Line::from(Span::styled(
            format!("0-{} | Enter: jump | Esc: cancel", transcript_len.saturating_sub(1)),
            muted(),
        )),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(bordered(" Jump to floor ")), popup);
}

fn render_full_message(frame: &mut Frame, area: Rect, message: &Message) {
    let popup = centered_rect(80, 70, area);
    let title = format!(" #{} {} (Esc: close) ", message.index, single_line(&message.author));

    let paragraph = Paragraph::new(strip_control_sequences(&message.text))
        .block(bordered(title))
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup);
    frame.render_widget(paragraph, popup);
}

fn render_settings(
    frame: &mut Frame,
    area: Rect,
    rows: &[(&'static str, String)],
    selected: usize,
) {
    let popup = centered_rect(60, 60, area);

    let mut lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .map(|(idx, (label, value))| {
            let line = Line::from(format!(" {:<28}{}", label, value));
            if idx == selected {
                line.style(Style::default().fg(BRIGHT).bg(ACCENT).add_modifier(Modifier::BOLD))
            } else {
                line
            }
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " ↑/↓: select | ←/→: change | Enter: save | Esc: cancel",
        muted(),
    )));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(bordered(" Settings ")), popup);
}
