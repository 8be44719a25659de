//! Column layout for the three-field rows

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::entry::ConfigEntry;

/// Option and value columns share one width cap; the type column takes
/// whatever remains.
pub const COLUMN_WIDTH_CAP: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub option_width: usize,
    pub value_width: usize,
}

impl ColumnLayout {
    /// Measure the widest option and value in display columns, each
    /// capped at [`COLUMN_WIDTH_CAP`].
    pub fn measure(entries: &[ConfigEntry]) -> Self {
        let mut option_width = 0;
        let mut value_width = 0;
        for entry in entries {
            option_width = option_width.max(entry.option.width());
            value_width = value_width.max(entry.value.width());
        }
        Self {
            option_width: option_width.min(COLUMN_WIDTH_CAP),
            value_width: value_width.min(COLUMN_WIDTH_CAP),
        }
    }
}

/// Longest prefix fitting in `width` terminal columns. Crops, never
/// pads or wraps; a wide character straddling the boundary is dropped.
pub fn crop(text: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, c) in text.char_indices() {
        let char_width = c.width().unwrap_or(0);
        if used + char_width > width {
            return &text[..idx];
        }
        used += char_width;
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(option: &str, value: &str) -> ConfigEntry {
        ConfigEntry::new(option.to_string(), value.to_string(), String::new())
    }

    #[test]
    fn test_measure_tracks_widest_fields() {
        let entries = vec![entry("SocksPort", "9050"), entry("ORPort", "443, 9001")];
        let layout = ColumnLayout::measure(&entries);
        assert_eq!(layout.option_width, 9);
        assert_eq!(layout.value_width, 9);
    }

    #[test]
    fn test_widths_never_exceed_cap() {
        let entries = vec![entry(
            "AnExtraordinarilyLongOptionNameThatKeepsGoing",
            "a-value-well-past-twenty-five-columns-long",
        )];
        let layout = ColumnLayout::measure(&entries);
        assert_eq!(layout.option_width, COLUMN_WIDTH_CAP);
        assert_eq!(layout.value_width, COLUMN_WIDTH_CAP);
    }

    #[test]
    fn test_measure_empty_snapshot() {
        let layout = ColumnLayout::measure(&[]);
        assert_eq!(layout.option_width, 0);
        assert_eq!(layout.value_width, 0);
    }

    #[test]
    fn test_crop_ascii() {
        assert_eq!(crop("UseEntryGuards", 25), "UseEntryGuards");
        assert_eq!(crop("UseEntryGuards", 6), "UseEnt");
        assert_eq!(crop("abc", 0), "");
    }

    #[test]
    fn test_crop_counts_display_columns() {
        // each CJK character occupies two columns
        assert_eq!(crop("日本語", 4), "日本");
        assert_eq!(crop("日本語", 3), "日");
        assert_eq!(crop("a日b", 2), "a");
    }
}
