use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// User actions from keyboard events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Close overlay, then clear the query, then quit
    Escape,
    Up,
    Down,
    Left,
    Right,
    PrevPage,
    NextPage,
    /// Run a pending search, or open the selected result
    Submit,
    ScrollTranscript(isize),
    JumpToFloor,
    LoadMore,
    Refresh,
    ToggleCase,
    OpenSettings,
    TogglePanel,
    Input(char),
    DeleteChar,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
        && key.kind == KeyEventKind::Press
    {
        return Ok(key_to_action(key));
    }
    Ok(Action::None)
}

fn key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Escape,

        // Transcript scrolling
        (KeyCode::Up, KeyModifiers::ALT) => Action::ScrollTranscript(-1),
        (KeyCode::Down, KeyModifiers::ALT) => Action::ScrollTranscript(1),

        // Result list
        (KeyCode::Up, _) => Action::Up,
        (KeyCode::Down, _) => Action::Down,
        (KeyCode::Left, _) => Action::Left,
        (KeyCode::Right, _) => Action::Right,
        (KeyCode::PageUp, _) => Action::PrevPage,
        (KeyCode::PageDown, _) => Action::NextPage,
        (KeyCode::Enter, _) => Action::Submit,

        // Commands
        (KeyCode::Char('g'), KeyModifiers::CONTROL) => Action::JumpToFloor,
        (KeyCode::Char('l'), KeyModifiers::CONTROL) => Action::LoadMore,
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => Action::Refresh,
        (KeyCode::Char('t'), KeyModifiers::CONTROL) => Action::ToggleCase,
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => Action::OpenSettings,
        (KeyCode::Char('b'), KeyModifiers::CONTROL) => Action::TogglePanel,

        // Text input
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::Input(c)
        }
        (KeyCode::Backspace, _) => Action::DeleteChar,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Action {
        key_to_action(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_quit_and_escape() {
        assert_eq!(key(KeyCode::Char('c'), KeyModifiers::CONTROL), Action::Quit);
        assert_eq!(key(KeyCode::Esc, KeyModifiers::NONE), Action::Escape);
    }

    #[test]
    fn test_list_navigation() {
        assert_eq!(key(KeyCode::Up, KeyModifiers::NONE), Action::Up);
        assert_eq!(key(KeyCode::Down, KeyModifiers::NONE), Action::Down);
        assert_eq!(key(KeyCode::PageUp, KeyModifiers::NONE), Action::PrevPage);
        assert_eq!(key(KeyCode::PageDown, KeyModifiers::NONE), Action::NextPage);
    }

    #[test]
    fn test_transcript_scroll_with_alt() {
        assert_eq!(key(KeyCode::Up, KeyModifiers::ALT), Action::ScrollTranscript(-1));
        assert_eq!(key(KeyCode::Down, KeyModifiers::ALT), Action::ScrollTranscript(1));
    }

    #[test]
    fn test_commands() {
        assert_eq!(key(KeyCode::Enter, KeyModifiers::NONE), Action::Submit);
        assert_eq!(key(KeyCode::Char('g'), KeyModifiers::CONTROL), Action::JumpToFloor);
        assert_eq!(key(KeyCode::Char('l'), KeyModifiers::CONTROL), Action::LoadMore);
        assert_eq!(key(KeyCode::Char('r'), KeyModifiers::CONTROL), Action::Refresh);
        assert_eq!(key(KeyCode::Char('t'), KeyModifiers::CONTROL), Action::ToggleCase);
        assert_eq!(key(KeyCode::Char('s'), KeyModifiers::CONTROL), Action::OpenSettings);
        assert_eq!(key(KeyCode::Char('b'), KeyModifiers::CONTROL), Action::TogglePanel);
    }

    #[test]
    fn test_text_input() {
        assert_eq!(key(KeyCode::Char('a'), KeyModifiers::NONE), Action::Input('a'));
        assert_eq!(key(KeyCode::Char('A'), KeyModifiers::SHIFT), Action::Input('A'));
        assert_eq!(key(KeyCode::Backspace, KeyModifiers::NONE), Action::DeleteChar);
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(key(KeyCode::F(1), KeyModifiers::NONE), Action::None);
    }
}
