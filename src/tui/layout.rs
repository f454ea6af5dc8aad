use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rows used by one message in the transcript pane
pub const ROWS_PER_MESSAGE: u16 = 2;

/// Screen regions: the chat on the left, the navigator panel on the right
pub struct AppLayout {
    pub transcript_area: Rect,
    pub search_area: Rect,
    pub results_area: Rect,
    pub footer_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// - Transcript: 60% width (left), or the full width when the panel is minimized
    /// - Panel (right 40%): search input (3 rows), results, page footer (1 row)
    /// - Status bar: bottom row
    pub fn new(area: Rect, panel_minimized: bool) -> Self {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        let panel_width = if panel_minimized { 0 } else { 40 };
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(100 - panel_width),
                Constraint::Percentage(panel_width),
            ])
            .split(vertical[0]);

        let panel = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
            .split(horizontal[1]);

        Self {
            transcript_area: horizontal[0],
            search_area: panel[0],
            results_area: panel[1],
            footer_area: panel[2],
            status_area: vertical[1],
        }
    }

    /// Messages that fit in the transcript pane (borders and the
    /// "earlier messages" row excluded)
    pub fn transcript_capacity(&self) -> usize {
        (self.transcript_area.height.saturating_sub(3) / ROWS_PER_MESSAGE) as usize
    }

    /// Result rows that fit in the results list (borders excluded)
    pub fn results_capacity(&self) -> usize {
        self.results_area.height.saturating_sub(2) as usize
    }
}
