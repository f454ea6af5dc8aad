// TUI module: the terminal host for the message navigator
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;
pub mod transcript_view;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
pub use app::App;
pub use transcript_view::TranscriptView;

use self::terminal::TerminalGuard;
use crate::models::Message;
use crate::settings::SettingsStore;

/// Run the interactive browser over `transcript`.
///
/// `source` enables reloading with Ctrl+R; `floor` is jumped to on start.
pub fn run_browser<S: SettingsStore>(
    transcript: Vec<Message>,
    store: S,
    source: Option<PathBuf>,
    floor: Option<&str>,
) -> Result<()> {
    let mut app = App::new(transcript, store);
    if let Some(path) = source {
        app = app.with_source(path);
    }

    let mut guard = TerminalGuard::enter()?;
    if let Some(floor) = floor {
        // The viewport is only known once the terminal is up
        let size = guard.terminal_mut().size()?;
        app.prepare_viewport(size.width, size.height);
        app.jump_to_floor(floor, Instant::now());
    }

    let res = app.run(guard.terminal_mut());

    // Restore terminal
    guard.restore()?;
    res
}
