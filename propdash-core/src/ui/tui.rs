//! Interactive player picker.
//!
//! Renders the search widget and the parlay slip in an inline viewport and
//! feeds terminal input to the [`SearchController`]. Clicks outside the
//! widget and terminal focus loss count as outside interactions.

use std::io;

use anyhow::{Context, Result};
use crossterm::{
    ExecutableCommand,
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event as CrosstermEvent, EventStream,
    },
    terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, TerminalOptions, Viewport, backend::CrosstermBackend};

use crate::api::PricingClient;
use crate::parlay::ParlaySlip;
use crate::search::SearchController;

mod action;
mod app;
mod components;
mod types;

pub use action::{Action, SlipAction};
pub use app::{App, Background};
pub use types::{PickerTheme, TextStyle};

const MAX_VIEWPORT_ROWS: u16 = 24;

enum LoopEvent {
    Terminal(Option<io::Result<CrosstermEvent>>),
    Background(Background),
}

/// Run the picker until the user exits, returning the slip they built.
pub async fn run_picker(
    search: SearchController,
    pricing: PricingClient,
    theme: PickerTheme,
) -> Result<ParlaySlip> {
    let (_, rows) = crossterm::terminal::size().context("failed to query terminal size")?;
    let mut stdout = io::stdout();
    let backend = CrosstermBackend::new(&mut stdout);
    let options = TerminalOptions {
        viewport: Viewport::Inline(rows.min(MAX_VIEWPORT_ROWS)),
    };
    let mut terminal = Terminal::with_options(backend, options)
        .context("failed to initialize ratatui terminal")?;
    let _guard = TerminalGuard::new().context("failed to configure terminal for picker")?;
    terminal
        .clear()
        .context("failed to clear terminal for picker")?;

    let mut app = App::new(search, pricing, theme);
    let mut event_stream = EventStream::new();

    loop {
        if app.take_redraw() {
            terminal
                .draw(|frame| app.draw(frame))
                .context("failed to draw picker frame")?;
        }
        if app.should_exit() {
            break;
        }

        let next = tokio::select! {
            event = event_stream.next() => LoopEvent::Terminal(event),
            Some(background) = app.next_background() => LoopEvent::Background(background),
        };

        match next {
            LoopEvent::Terminal(Some(Ok(event))) => {
                if matches!(event, CrosstermEvent::Resize(_, _)) {
                    terminal
                        .autoresize()
                        .context("failed to autoresize terminal viewport")?;
                }
                app.handle_event(event);
            }
            LoopEvent::Terminal(Some(Err(error))) => {
                tracing::debug!(%error, "failed to read terminal event");
                app.mark_redraw();
            }
            LoopEvent::Terminal(None) => app.set_should_exit(),
            LoopEvent::Background(background) => app.handle_background(background),
        }
    }

    terminal.show_cursor().ok();
    terminal
        .clear()
        .context("failed to clear terminal after picker session")?;

    Ok(app.into_slip())
}

/// Raw mode plus mouse and focus reporting for the lifetime of the picker.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        stdout
            .execute(EnableMouseCapture)
            .context("failed to enable mouse capture")?;
        stdout
            .execute(EnableFocusChange)
            .context("failed to enable focus reporting")?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = stdout.execute(DisableFocusChange);
        let _ = stdout.execute(DisableMouseCapture);
        let _ = disable_raw_mode();
        let _ = stdout.execute(Clear(ClearType::FromCursorDown));
    }
}
