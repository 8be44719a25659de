//! Daemon control channel
//!
//! Line-oriented request/reply client used to enumerate the daemon's
//! recognized options and resolve their current values.

pub mod addr;
pub mod conn;
pub mod proto;

pub use addr::ControlAddr;
pub use conn::{ControlPort, Controller};
pub use proto::{Reply, ReplyLine};
