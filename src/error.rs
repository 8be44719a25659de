// The #[error] attribute from thiserror uses struct fields via string interpolation,
// but Rust's unused_assignments lint doesn't recognize this.
#![allow(unused_assignments)]

//! Vigil Error Types with Error Codes
//!
//! Error code ranges:
//! - VIGIL-000-009: Control channel errors
//! - VIGIL-010-019: Configuration/CLI errors
//! - VIGIL-020-029: Terminal errors
//! - VIGIL-030-039: IO errors

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, VigilError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// All error variants are part of the public API.
///
/// Implements both `thiserror::Error` for std error compatibility
/// and `miette::Diagnostic` for fancy terminal error display.
#[derive(Error, Debug, Diagnostic)]
#[diagnostic(url(docsrs))]
pub enum VigilError {
    // ═══════════════════════════════════════════
    // CONTROL CHANNEL ERRORS (000-009)
    // ═══════════════════════════════════════════
    #[error("[VIGIL-001] Cannot reach control port {addr}: {reason}")]
    #[diagnostic(
        code(vigil::connection_failed),
        help("Check that the daemon is running and --interface matches its control port")
    )]
    ConnectionFailed { addr: String, reason: String },

    #[error("[VIGIL-002] Control port answered {status}: {message}")]
    #[diagnostic(
        code(vigil::control_reply),
        help("The daemon rejected the request; its own log may say why")
    )]
    ControlReply { status: u16, message: String },

    #[error("[VIGIL-003] Malformed control reply: {reason}")]
    #[diagnostic(
        code(vigil::protocol),
        help("The endpoint may not speak the control protocol")
    )]
    Protocol { reason: String },

    #[error("[VIGIL-004] Malformed option listing record: {line:?}")]
    #[diagnostic(
        code(vigil::malformed_listing),
        help("The option listing must carry one 'name type' record per line")
    )]
    MalformedListing { line: String },

    // ═══════════════════════════════════════════
    // CONFIGURATION/CLI ERRORS (010-019)
    // ═══════════════════════════════════════════
    #[error("[VIGIL-010] Invalid control interface {input:?}: {reason}")]
    #[diagnostic(
        code(vigil::invalid_interface),
        help("Use [ADDRESS:]PORT, e.g. 127.0.0.1:9751 or just 9751")
    )]
    InvalidInterface { input: String, reason: String },

    #[error("[VIGIL-011] Cannot load config from {path}: {reason}")]
    #[diagnostic(
        code(vigil::config),
        help("Fix or remove the config file; defaults apply when it is absent")
    )]
    Config { path: String, reason: String },

    #[error("[VIGIL-012] Cannot open debug log {path}: {reason}")]
    #[diagnostic(code(vigil::log_file), help("Check that the path is writable"))]
    LogFile { path: String, reason: String },

    // ═══════════════════════════════════════════
    // TERMINAL ERRORS (020-029)
    // ═══════════════════════════════════════════
    #[error("[VIGIL-020] Terminal error: {reason}")]
    #[diagnostic(
        code(vigil::terminal),
        help("Run vigil from an interactive terminal")
    )]
    Terminal { reason: String },

    // ═══════════════════════════════════════════
    // IO ERRORS (030-039)
    // ═══════════════════════════════════════════
    #[error("[VIGIL-030] IO error: {0}")]
    #[diagnostic(code(vigil::io), help("Check file path and permissions"))]
    Io(#[from] std::io::Error),
}

impl VigilError {
    /// Get the error code (e.g., "VIGIL-001")
    pub fn code(&self) -> &'static str {
        match self {
            // Control channel errors
            Self::ConnectionFailed { .. } => "VIGIL-001",
            Self::ControlReply { .. } => "VIGIL-002",
            Self::Protocol { .. } => "VIGIL-003",
            Self::MalformedListing { .. } => "VIGIL-004",
            // Configuration/CLI errors
            Self::InvalidInterface { .. } => "VIGIL-010",
            Self::Config { .. } => "VIGIL-011",
            Self::LogFile { .. } => "VIGIL-012",
            // Terminal errors
            Self::Terminal { .. } => "VIGIL-020",
            // IO errors
            Self::Io(_) => "VIGIL-030",
        }
    }
}

impl FixSuggestion for VigilError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            VigilError::ConnectionFailed { .. } => {
                Some("Check that the daemon is running and --interface matches its control port")
            }
            VigilError::ControlReply { .. } => {
                Some("The daemon rejected the request; its own log may say why")
            }
            VigilError::Protocol { .. } => {
                Some("The endpoint may not speak the control protocol")
            }
            VigilError::MalformedListing { .. } => {
                Some("The option listing must carry one 'name type' record per line")
            }
            VigilError::InvalidInterface { .. } => {
                Some("Use [ADDRESS:]PORT, e.g. 127.0.0.1:9751 or just 9751")
            }
            VigilError::Config { .. } => {
                Some("Fix or remove the config file; defaults apply when it is absent")
            }
            VigilError::LogFile { .. } => Some("Check that the path is writable"),
            VigilError::Terminal { .. } => Some("Run vigil from an interactive terminal"),
            VigilError::Io(_) => Some("Check file path and permissions"),
        }
    }
}
