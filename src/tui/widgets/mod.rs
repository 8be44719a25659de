//! TUI Widgets
//!
//! Reusable UI components for the panel.
//!
//! - GutterScrollBar: proportional scrollbar for the panel gutter

mod scrollbar;

pub use scrollbar::GutterScrollBar;
