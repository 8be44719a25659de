//! TUI application loop
//!
//! Terminal lifecycle plus the two execution contexts acting on the
//! panel: an input task reading the crossterm event stream and a
//! render loop multiplexing tick, redraw requests, and shutdown.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{Result, VigilError};
use crate::tui::panel::{ConfigPanel, ConfigPanelView};
use crate::tui::theme::Theme;

pub struct App {
    panel: Arc<ConfigPanel>,
    theme: Theme,
    refresh: Duration,
    terminal: Option<Terminal<CrosstermBackend<Stdout>>>,
}

impl App {
    /// Terminal init is deferred to [`run`](Self::run); constructing an
    /// App has no side effects.
    pub fn new(panel: Arc<ConfigPanel>, refresh: Duration) -> Self {
        Self {
            panel,
            theme: Theme::default(),
            refresh,
            terminal: None,
        }
    }

    fn init_terminal(&mut self) -> Result<()> {
        enable_raw_mode()
            .map_err(|e| terminal_error(format!("failed to enable raw mode: {e}")))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)
            .map_err(|e| terminal_error(format!("failed to enter alternate screen: {e}")))?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))
            .map_err(|e| terminal_error(format!("failed to create terminal: {e}")))?;
        self.terminal = Some(terminal);
        Ok(())
    }

    fn cleanup(&mut self) {
        if disable_raw_mode().is_err() {
            warn!("could not disable raw mode");
        }
        if execute!(io::stdout(), LeaveAlternateScreen).is_err() {
            warn!("could not leave alternate screen");
        }
        self.terminal = None;
    }

    fn draw(&mut self) -> Result<()> {
        let Self {
            terminal,
            panel,
            theme,
            ..
        } = self;
        let Some(terminal) = terminal.as_mut() else {
            return Ok(());
        };
        terminal
            .draw(|frame| {
                frame.render_widget(ConfigPanelView::new(panel, theme), frame.area());
            })
            .map_err(|e| terminal_error(format!("draw failed: {e}")))?;
        Ok(())
    }

    /// Run until the user quits. The terminal is restored on every
    /// exit path, including draw errors.
    pub async fn run(mut self) -> Result<()> {
        self.init_terminal()?;
        debug!("terminal initialized, {} entries", self.panel.len());

        let cancel = CancellationToken::new();
        let (redraw_tx, mut redraw_rx) = mpsc::channel::<()>(8);
        let input = tokio::spawn(input_task(
            Arc::clone(&self.panel),
            cancel.clone(),
            redraw_tx,
        ));

        // A zero interval would spin; floor it at one frame.
        let mut tick = tokio::time::interval(self.refresh.max(Duration::from_millis(16)));

        let result = loop {
            tokio::select! {
                _ = cancel.cancelled() => break Ok(()),
                _ = tick.tick() => {
                    if let Err(e) = self.draw() {
                        break Err(e);
                    }
                }
                Some(()) = redraw_rx.recv() => {
                    if let Err(e) = self.draw() {
                        break Err(e);
                    }
                }
            }
        };

        cancel.cancel();
        let _ = input.await;
        debug!("shutting down");
        self.cleanup();
        result
    }
}

/// Read keys until quit or stream end. Scroll keys go to the panel;
/// a redraw request is sent only when the panel reports dirty.
async fn input_task(
    panel: Arc<ConfigPanel>,
    cancel: CancellationToken,
    redraw: mpsc::Sender<()>,
) {
    let mut events = EventStream::new();
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        if is_quit_key(key) {
                            cancel.cancel();
                            break;
                        }
                        if panel.handle_key(key, page_height()) {
                            let _ = redraw.try_send(());
                        }
                    }
                    Some(Ok(Event::Resize(_, _))) => {
                        let _ = redraw.try_send(());
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("input stream error: {e}");
                    }
                    None => {
                        cancel.cancel();
                        break;
                    }
                }
            }
        }
    }
}

fn is_quit_key(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Entry rows available below the header for the current terminal.
fn page_height() -> usize {
    crossterm::terminal::size()
        .map(|(_, rows)| rows.saturating_sub(1) as usize)
        .unwrap_or(0)
}

fn terminal_error(reason: String) -> VigilError {
    VigilError::Terminal { reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_keys() {
        assert!(is_quit_key(KeyEvent::from(KeyCode::Char('q'))));
        assert!(is_quit_key(KeyEvent::from(KeyCode::Esc)));
        assert!(is_quit_key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
    }

    #[test]
    fn test_plain_keys_do_not_quit() {
        assert!(!is_quit_key(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!is_quit_key(KeyEvent::from(KeyCode::Down)));
        assert!(!is_quit_key(KeyEvent::from(KeyCode::Char('j'))));
    }

    #[tokio::test]
    async fn test_new_defers_terminal_init() {
        let panel = Arc::new(
            ConfigPanel::local(&crate::store::LocalStore::new())
                .await
                .unwrap(),
        );
        let app = App::new(panel, Duration::from_millis(100));
        assert!(app.terminal.is_none());
    }
}
