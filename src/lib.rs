//! Vigil - live configuration panel for daemon and local settings
//!
//! ## Module Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     PRESENTATION LAYER                       │
//! │  tui/       Panel, scroll, layout, app loop (ratatui)        │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       SOURCE LAYER                           │
//! │  control/   Control-channel client (addr, proto, conn)       │
//! │  store/     Local settings store                             │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      CROSS-CUTTING                           │
//! │  config/    TOML config file + env overrides + aliases       │
//! │  error/     Error types with fix suggestions                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Responsibilities
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`tui`] | Config panel rendering, scrolling, terminal lifecycle |
//! | [`control`] | Line-oriented control protocol over TCP |
//! | [`store`] | Ordered key → values map for local mode |
//! | [`config`] | `config.toml` loading, env overrides, option aliases |
//! | [`error`] | Error types with `[VIGIL-NNN]` codes and fix suggestions |

// ═══════════════════════════════════════════════════════════════
// PRESENTATION LAYER - Terminal UI
// ═══════════════════════════════════════════════════════════════
pub mod tui;

// ═══════════════════════════════════════════════════════════════
// SOURCE LAYER - Daemon control channel, local store
// ═══════════════════════════════════════════════════════════════
pub mod control;
pub mod store;

// ═══════════════════════════════════════════════════════════════
// CROSS-CUTTING - Error handling, configuration
// ═══════════════════════════════════════════════════════════════
pub mod config;
pub mod error;

// ═══════════════════════════════════════════════════════════════
// PUBLIC API RE-EXPORTS
// ═══════════════════════════════════════════════════════════════

// Error types
pub use error::{FixSuggestion, Result, VigilError};

// Config types
pub use config::{Aliases, VigilConfig};

// Control types
pub use control::{ControlAddr, ControlPort, Controller, Reply, ReplyLine};

// Store types
pub use store::LocalStore;

// TUI types
pub use tui::{App, ConfigEntry, ConfigPanel, ConfigPanelView, OptionType, PanelMode, Theme};
