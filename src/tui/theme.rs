//! Panel color theme

use ratatui::style::{Color, Modifier, Style};

/// Colors for the configuration panel.
#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Color,
    pub entry: Color,
    pub scrollbar_thumb: Color,
    pub scrollbar_track: Color,
    pub scrollbar_rail: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header: Color::White,
            entry: Color::Green,
            scrollbar_thumb: Color::White,
            scrollbar_track: Color::DarkGray,
            scrollbar_rail: Color::DarkGray,
        }
    }
}

impl Theme {
    /// Header row: reverse video.
    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header)
            .add_modifier(Modifier::REVERSED)
    }

    /// Entry cells; all three columns share one style.
    pub fn entry_style(&self) -> Style {
        Style::default()
            .fg(self.entry)
            .add_modifier(Modifier::BOLD)
    }

    pub fn thumb_style(&self) -> Style {
        Style::default().fg(self.scrollbar_thumb)
    }

    pub fn track_style(&self) -> Style {
        Style::default().fg(self.scrollbar_track)
    }

    pub fn rail_style(&self) -> Style {
        Style::default().fg(self.scrollbar_rail)
    }
}
