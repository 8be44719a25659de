//! Gutter scrollbar widget
//!
//! Fills the panel's left gutter with a proportional thumb column and
//! a rail column separating it from the entry text.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Vertical scrollbar for the panel gutter.
///
/// The first column carries the proportional thumb over a faint
/// track; the second, when there is room, a rail line.
pub struct GutterScrollBar {
    /// Current scroll offset (first visible entry)
    offset: usize,
    /// Total number of entries
    total: usize,
    /// Number of entry rows that fit in the viewport
    visible: usize,
    track_style: Style,
    thumb_style: Style,
    rail_style: Style,
}

impl Default for GutterScrollBar {
    fn default() -> Self {
        Self {
            offset: 0,
            total: 0,
            visible: 0,
            track_style: Style::default().fg(Color::DarkGray),
            thumb_style: Style::default().fg(Color::Cyan),
            rail_style: Style::default().fg(Color::DarkGray),
        }
    }
}

impl GutterScrollBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set scroll position
    ///
    /// - `offset`: current scroll offset (first visible entry index)
    /// - `total`: total number of entries
    /// - `visible`: entry rows that fit in the visible area
    pub fn position(mut self, offset: usize, total: usize, visible: usize) -> Self {
        self.offset = offset;
        self.total = total;
        self.visible = visible;
        self
    }

    pub fn track_style(mut self, style: Style) -> Self {
        self.track_style = style;
        self
    }

    pub fn thumb_style(mut self, style: Style) -> Self {
        self.thumb_style = style;
        self
    }

    pub fn rail_style(mut self, style: Style) -> Self {
        self.rail_style = style;
        self
    }

    /// True when there are more entries than visible rows
    pub fn is_scrollable(&self) -> bool {
        self.total > self.visible
    }

    /// Thumb start row and length within a track of `track_height` rows
    fn calculate_thumb(&self, track_height: usize) -> (usize, usize) {
        if !self.is_scrollable() || track_height == 0 {
            return (0, track_height);
        }

        // Thumb length is proportional to visible/total, minimum 1
        let thumb_size = ((self.visible as f64 / self.total as f64) * track_height as f64)
            .max(1.0)
            .min(track_height as f64) as usize;

        let max_offset = self.total.saturating_sub(self.visible);
        let scrollable_track = track_height.saturating_sub(thumb_size);

        let thumb_pos = if max_offset > 0 {
            ((self.offset as f64 / max_offset as f64) * scrollable_track as f64) as usize
        } else {
            0
        };

        (thumb_pos, thumb_size)
    }
}

impl Widget for GutterScrollBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let track_height = area.height as usize;
        let (thumb_pos, thumb_size) = self.calculate_thumb(track_height);

        for i in 0..track_height {
            let y = area.y + i as u16;
            if let Some(cell) = buf.cell_mut((area.x, y)) {
                if self.is_scrollable() && i >= thumb_pos && i < thumb_pos + thumb_size {
                    cell.set_char('█');
                    cell.set_style(self.thumb_style);
                } else {
                    cell.set_char('░');
                    cell.set_style(self.track_style);
                }
            }
            if area.width >= 2 {
                if let Some(cell) = buf.cell_mut((area.x + 1, y)) {
                    cell.set_char('│');
                    cell.set_style(self.rail_style);
                }
            }
        }
    }
}
