//! Control protocol reply format
//!
//! Each reply line is `DDDs<text>`: a 3-digit status code and a
//! one-byte separator. `-` marks an intermediate data line, `+` opens
//! a multiline block terminated by a lone `.`, and a space marks the
//! final line of the reply. Inside a block a leading `..` unescapes
//! to `.`.

use crate::error::{Result, VigilError};

pub const STATUS_OK: u16 = 250;

/// The separator byte after the status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// `-`: intermediate data line
    Mid,
    /// `+`: opens a multiline data block
    Data,
    /// ` `: final line of the reply
    End,
}

/// One parsed reply line; `Data` carries its whole block body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyLine {
    Mid {
        status: u16,
        text: String,
    },
    Data {
        status: u16,
        header: String,
        body: Vec<String>,
    },
    End {
        status: u16,
        text: String,
    },
}

/// A complete reply: zero or more Mid/Data lines closed by one End line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reply {
    pub lines: Vec<ReplyLine>,
}

impl Reply {
    /// Status of the final line.
    pub fn status(&self) -> Option<u16> {
        self.lines.iter().rev().find_map(|line| match line {
            ReplyLine::End { status, .. } => Some(*status),
            _ => None,
        })
    }

    /// Error unless the final status is 250.
    pub fn check_status(&self) -> Result<()> {
        match self.lines.last() {
            Some(ReplyLine::End {
                status: STATUS_OK, ..
            }) => Ok(()),
            Some(ReplyLine::End { status, text }) => Err(VigilError::ControlReply {
                status: *status,
                message: text.clone(),
            }),
            _ => Err(protocol("reply missing final line".to_string())),
        }
    }

    /// `key=value` pairs across intermediate lines, block headers, and
    /// the final line. A block's value is its body joined with newlines.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for line in &self.lines {
            match line {
                ReplyLine::Mid { text, .. } | ReplyLine::End { text, .. } => {
                    if let Some((key, value)) = text.split_once('=') {
                        pairs.push((key.to_string(), value.to_string()));
                    }
                }
                ReplyLine::Data { header, body, .. } => {
                    if let Some((key, _)) = header.split_once('=') {
                        pairs.push((key.to_string(), body.join("\n")));
                    }
                }
            }
        }
        pairs
    }

    /// Values among the pairs whose key equals `name`.
    pub fn values_for(&self, name: &str) -> Vec<String> {
        self.pairs()
            .into_iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value)
            .collect()
    }
}

/// Split a raw line into status code, separator, and trailing text.
pub fn parse_status_line(line: &str) -> Result<(u16, Separator, &str)> {
    let bytes = line.as_bytes();
    if bytes.len() < 4 {
        return Err(protocol(format!("reply line too short: {line:?}")));
    }
    let status = line
        .get(..3)
        .and_then(|code| code.parse::<u16>().ok())
        .ok_or_else(|| protocol(format!("non-numeric status in {line:?}")))?;
    let sep = match bytes[3] {
        b'-' => Separator::Mid,
        b'+' => Separator::Data,
        b' ' => Separator::End,
        other => {
            return Err(protocol(format!(
                "unknown separator {:?} in {line:?}",
                other as char
            )))
        }
    };
    Ok((status, sep, &line[4..]))
}

/// A block line starting with `..` carries a literal leading `.`.
pub fn unescape_block_line(line: &str) -> &str {
    if line.starts_with("..") {
        &line[1..]
    } else {
        line
    }
}

fn protocol(reason: String) -> VigilError {
    VigilError::Protocol { reason }
}
