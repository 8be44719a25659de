//! Scroll navigation: key vocabulary and offset arithmetic

use crossterm::event::{KeyCode, KeyEvent};

/// Navigation intents the panel recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollIntent {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    Home,
    End,
}

impl ScrollIntent {
    /// Arrow keys plus vim motions; None for anything else.
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Self::LineUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Self::LineDown),
            KeyCode::PageUp => Some(Self::PageUp),
            KeyCode::PageDown => Some(Self::PageDown),
            KeyCode::Home | KeyCode::Char('g') => Some(Self::Home),
            KeyCode::End | KeyCode::Char('G') => Some(Self::End),
            _ => None,
        }
    }
}

pub fn is_scroll_key(key: KeyEvent) -> bool {
    ScrollIntent::from_key(key).is_some()
}

/// Apply an intent to the current offset and clamp the result into
/// `[0, max(0, total - page_height)]`.
pub fn next_offset(
    intent: ScrollIntent,
    current: usize,
    page_height: usize,
    total: usize,
) -> usize {
    let max_offset = total.saturating_sub(page_height);
    let target = match intent {
        ScrollIntent::LineUp => current.saturating_sub(1),
        ScrollIntent::LineDown => current.saturating_add(1),
        ScrollIntent::PageUp => current.saturating_sub(page_height),
        ScrollIntent::PageDown => current.saturating_add(page_height),
        ScrollIntent::Home => 0,
        ScrollIntent::End => max_offset,
    };
    target.min(max_offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALL_INTENTS: [ScrollIntent; 6] = [
        ScrollIntent::LineUp,
        ScrollIntent::LineDown,
        ScrollIntent::PageUp,
        ScrollIntent::PageDown,
        ScrollIntent::Home,
        ScrollIntent::End,
    ];

    #[test]
    fn test_line_moves() {
        assert_eq!(next_offset(ScrollIntent::LineDown, 0, 10, 50), 1);
        assert_eq!(next_offset(ScrollIntent::LineUp, 1, 10, 50), 0);
        assert_eq!(next_offset(ScrollIntent::LineUp, 0, 10, 50), 0);
    }

    #[test]
    fn test_page_moves() {
        assert_eq!(next_offset(ScrollIntent::PageDown, 0, 10, 50), 10);
        assert_eq!(next_offset(ScrollIntent::PageUp, 15, 10, 50), 5);
        assert_eq!(next_offset(ScrollIntent::PageUp, 3, 10, 50), 0);
    }

    #[test]
    fn test_home_and_end() {
        assert_eq!(next_offset(ScrollIntent::Home, 33, 10, 50), 0);
        assert_eq!(next_offset(ScrollIntent::End, 0, 10, 50), 40);
    }

    #[test]
    fn test_clamp_at_bottom() {
        assert_eq!(next_offset(ScrollIntent::LineDown, 40, 10, 50), 40);
        assert_eq!(next_offset(ScrollIntent::PageDown, 35, 10, 50), 40);
    }

    #[test]
    fn test_short_list_never_scrolls() {
        for intent in ALL_INTENTS {
            assert_eq!(next_offset(intent, 0, 10, 5), 0, "{intent:?}");
        }
    }

    #[test]
    fn test_scroll_key_vocabulary() {
        let cases = [
            (KeyCode::Up, Some(ScrollIntent::LineUp)),
            (KeyCode::Char('k'), Some(ScrollIntent::LineUp)),
            (KeyCode::Down, Some(ScrollIntent::LineDown)),
            (KeyCode::Char('j'), Some(ScrollIntent::LineDown)),
            (KeyCode::PageUp, Some(ScrollIntent::PageUp)),
            (KeyCode::PageDown, Some(ScrollIntent::PageDown)),
            (KeyCode::Home, Some(ScrollIntent::Home)),
            (KeyCode::Char('g'), Some(ScrollIntent::Home)),
            (KeyCode::End, Some(ScrollIntent::End)),
            (KeyCode::Char('G'), Some(ScrollIntent::End)),
            (KeyCode::Char('q'), None),
            (KeyCode::Enter, None),
            (KeyCode::Tab, None),
        ];
        for (code, expected) in cases {
            assert_eq!(ScrollIntent::from_key(KeyEvent::from(code)), expected);
        }
    }

    #[test]
    fn test_is_scroll_key() {
        assert!(is_scroll_key(KeyEvent::from(KeyCode::Up)));
        assert!(!is_scroll_key(KeyEvent::from(KeyCode::Esc)));
    }

    proptest! {
        #[test]
        fn prop_offset_stays_in_range(
            intent_idx in 0usize..6,
            current in 0usize..10_000,
            page_height in 0usize..200,
            total in 0usize..10_000,
        ) {
            let next = next_offset(ALL_INTENTS[intent_idx], current, page_height, total);
            prop_assert!(next <= total.saturating_sub(page_height));
        }

        #[test]
        fn prop_home_is_zero(current in 0usize..10_000, page in 1usize..100, total in 0usize..10_000) {
            prop_assert_eq!(next_offset(ScrollIntent::Home, current, page, total), 0);
        }
    }
}
