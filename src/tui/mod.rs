//! Terminal user interface
//!
//! Architecture:
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 APP LAYER (app.rs)                       │
//! │  Terminal lifecycle. Input task + render loop.           │
//! └──────────────────────────────────────────────────────────┘
//!                            ▲
//!                            │ handle_key / draw
//! ┌──────────────────────────────────────────────────────────┐
//! │               PANEL LAYER (panel.rs)                     │
//! │  Lock-guarded view model: snapshot + scroll offset.      │
//! │  scroll.rs, layout.rs, theme.rs, widgets/ serve it.      │
//! └──────────────────────────────────────────────────────────┘
//!                            ▲
//!                            │ ConfigEntry snapshot
//! ┌──────────────────────────────────────────────────────────┐
//! │            SOURCE LAYER (source.rs, entry.rs)            │
//! │  One list_entries capability over daemon or local store. │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod entry;
pub mod layout;
pub mod panel;
pub mod scroll;
pub mod source;
pub mod theme;
pub mod widgets;

use std::sync::Arc;
use std::time::Duration;

pub use app::App;
pub use entry::{ConfigEntry, OptionType};
pub use panel::{ConfigPanel, ConfigPanelView, PanelMode};
pub use theme::Theme;

use crate::error::Result;

/// Run the TUI until the user quits.
pub async fn run_tui(panel: Arc<ConfigPanel>, refresh: Duration) -> Result<()> {
    App::new(panel, refresh).run().await
}
