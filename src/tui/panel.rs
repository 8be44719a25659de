//! The configuration-state panel
//!
//! Owns the snapshot and scroll offset behind one lock. An input task
//! scrolls, a render loop draws; both serialize through the same mutex
//! for their whole critical section.

use crossterm::event::KeyEvent;
use parking_lot::Mutex;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use tracing::debug;

use crate::config::Aliases;
use crate::control::ControlPort;
use crate::error::Result;
use crate::store::LocalStore;
use crate::tui::entry::ConfigEntry;
use crate::tui::layout::{crop, ColumnLayout};
use crate::tui::scroll::{self, ScrollIntent};
use crate::tui::source::{load_snapshot, DaemonConfigSource, LocalConfigSource};
use crate::tui::theme::Theme;
use crate::tui::widgets::GutterScrollBar;

/// Gutter columns reserved for the scrollbar when the snapshot
/// overflows the viewport.
const SCROLLBAR_GUTTER: u16 = 3;

/// Which backend filled the panel; fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelMode {
    Daemon,
    Local,
}

impl PanelMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Daemon => "Daemon",
            Self::Local => "Local",
        }
    }
}

/// Everything the input and render contexts share.
#[derive(Debug)]
struct PanelState {
    entries: Vec<ConfigEntry>,
    scroll: usize,
}

/// Scrollable snapshot of a configuration source.
///
/// The snapshot is loaded once at construction and never mutated;
/// only the scroll offset moves afterwards.
#[derive(Debug)]
pub struct ConfigPanel {
    mode: PanelMode,
    state: Mutex<PanelState>,
}

impl ConfigPanel {
    /// Snapshot the daemon's full recognized configuration. Fails fast
    /// when the control port cannot serve the capability listing.
    pub async fn daemon<C: ControlPort>(port: &mut C, aliases: &Aliases) -> Result<Self> {
        let mut source = DaemonConfigSource::new(port, aliases);
        let entries = load_snapshot(&mut source).await?;
        Ok(Self::with_entries(PanelMode::Daemon, entries))
    }

    /// Snapshot the supplied local settings store.
    pub async fn local(store: &LocalStore) -> Result<Self> {
        let mut source = LocalConfigSource::new(store);
        let entries = load_snapshot(&mut source).await?;
        Ok(Self::with_entries(PanelMode::Local, entries))
    }

    fn with_entries(mode: PanelMode, entries: Vec<ConfigEntry>) -> Self {
        debug!("{} panel loaded {} entries", mode.label(), entries.len());
        Self {
            mode,
            state: Mutex::new(PanelState { entries, scroll: 0 }),
        }
    }

    pub fn mode(&self) -> PanelMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn scroll_offset(&self) -> usize {
        self.state.lock().scroll
    }

    /// Apply a navigation key. Returns true when the offset moved and
    /// the panel needs a redraw; unrecognized keys and no-op moves
    /// return false.
    pub fn handle_key(&self, key: KeyEvent, page_height: usize) -> bool {
        let Some(intent) = ScrollIntent::from_key(key) else {
            return false;
        };
        let mut state = self.state.lock();
        let next = scroll::next_offset(intent, state.scroll, page_height, state.entries.len());
        if next != state.scroll {
            state.scroll = next;
            true
        } else {
            false
        }
    }
}

/// One frame of the panel.
///
/// Row 0 is the highlighted header. When entries overflow the
/// viewport a gutter on the left carries a proportional scrollbar.
/// Each visible entry paints option, value, and type at fixed column
/// offsets, the first two cropped to the shared column widths.
pub struct ConfigPanelView<'a> {
    panel: &'a ConfigPanel,
    theme: &'a Theme,
}

impl<'a> ConfigPanelView<'a> {
    pub fn new(panel: &'a ConfigPanel, theme: &'a Theme) -> Self {
        Self { panel, theme }
    }
}

impl Widget for ConfigPanelView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let mut state = self.panel.state.lock();
        let total = state.entries.len();
        let page_height = (area.height as usize).saturating_sub(1);

        // Resize tolerance: pull the offset back inside the viewport.
        let max_offset = total.saturating_sub(page_height);
        if state.scroll > max_offset {
            state.scroll = max_offset;
        }

        let title = format!("{} Config:", self.panel.mode.label());
        buf.set_string(area.x, area.y, &title, self.theme.header_style());

        let gutter: u16 = if total > page_height {
            SCROLLBAR_GUTTER
        } else {
            0
        };
        if gutter > 0 && area.height > 1 {
            let bar_area = Rect::new(area.x, area.y + 1, 2, area.height - 1);
            GutterScrollBar::new()
                .position(state.scroll, total, page_height)
                .thumb_style(self.theme.thumb_style())
                .track_style(self.theme.track_style())
                .rail_style(self.theme.rail_style())
                .render(bar_area, buf);
        }

        let layout = ColumnLayout::measure(&state.entries);
        let style = self.theme.entry_style();
        let option_col = area.x + gutter;
        let value_col = option_col + layout.option_width as u16 + 1;
        let type_col = value_col + layout.value_width as u16 + 1;

        let scroll = state.scroll;
        for (i, entry) in state.entries.iter().enumerate().skip(scroll) {
            let row = i - scroll + 1;
            if row >= area.height as usize {
                break;
            }
            let y = area.y + row as u16;
            buf.set_string(option_col, y, crop(&entry.option, layout.option_width), style);
            buf.set_string(value_col, y, crop(&entry.value, layout.value_width), style);
            buf.set_string(type_col, y, &entry.type_tag, style);
        }
    }
}
