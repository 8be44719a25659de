//! Async client for the control channel
//!
//! Connects over TCP or, on Unix, a control socket; both transports
//! carry the same line protocol through one buffered stream.

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, ReadBuf};
use tokio::net::TcpStream;
#[cfg(unix)]
use tokio::net::UnixStream;
use tracing::debug;

use crate::control::addr::ControlAddr;
use crate::control::proto::{self, Reply, ReplyLine, Separator};
use crate::error::{Result, VigilError};

/// Read operations the daemon adapter needs from a control channel.
///
/// Split from [`Controller`] so the adapter can be exercised against a
/// canned implementation in tests.
#[async_trait]
pub trait ControlPort: Send {
    /// `GETINFO key`: one value; a data block arrives joined with newlines.
    async fn info(&mut self, key: &str) -> Result<String>;

    /// `GETCONF name`: every configured value for the option; empty when
    /// the option is unset.
    async fn option_values(&mut self, name: &str) -> Result<Vec<String>>;

    /// `GETCONF query`: `key=value` mapping over every reply line.
    async fn option_map(&mut self, query: &str) -> Result<FxHashMap<String, String>>;
}

/// Transport behind a [`Controller`]; reads and writes dispatch to
/// whichever stream the connection was opened on.
#[derive(Debug)]
enum ControlStream {
    Tcp(TcpStream),
    #[cfg(unix)]
    Unix(UnixStream),
}

impl AsyncRead for ControlStream {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Self::Tcp(stream) => Pin::new(stream).poll_read(cx, buf),
            #[cfg(unix)]
            Self::Unix(stream) => Pin::new(stream).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for ControlStream {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match self.get_mut() {
            Self::Tcp(stream) => Pin::new(stream).poll_write(cx, buf),
            #[cfg(unix)]
            Self::Unix(stream) => Pin::new(stream).poll_write(cx, buf),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Self::Tcp(stream) => Pin::new(stream).poll_flush(cx),
            #[cfg(unix)]
            Self::Unix(stream) => Pin::new(stream).poll_flush(cx),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Self::Tcp(stream) => Pin::new(stream).poll_shutdown(cx),
            #[cfg(unix)]
            Self::Unix(stream) => Pin::new(stream).poll_shutdown(cx),
        }
    }
}

/// Control channel client.
#[derive(Debug)]
pub struct Controller {
    stream: BufReader<ControlStream>,
}

impl Controller {
    /// Connect over TCP, failing fast when the port is unreachable.
    pub async fn connect(addr: ControlAddr) -> Result<Self> {
        let stream = TcpStream::connect(addr.to_socket_addr())
            .await
            .map_err(|e| VigilError::ConnectionFailed {
                addr: addr.to_string(),
                reason: e.to_string(),
            })?;
        debug!("connected to control port {addr}");
        Ok(Self::new(ControlStream::Tcp(stream)))
    }

    /// Connect over a Unix control socket, with the same fail-fast
    /// contract as [`Controller::connect`].
    #[cfg(unix)]
    pub async fn connect_socket(path: &std::path::Path) -> Result<Self> {
        let stream = UnixStream::connect(path)
            .await
            .map_err(|e| VigilError::ConnectionFailed {
                addr: path.display().to_string(),
                reason: e.to_string(),
            })?;
        debug!("connected to control socket {}", path.display());
        Ok(Self::new(ControlStream::Unix(stream)))
    }

    fn new(stream: ControlStream) -> Self {
        Self {
            stream: BufReader::new(stream),
        }
    }

    /// Send one command line and read the full reply.
    pub async fn request(&mut self, command: &str) -> Result<Reply> {
        self.send(command).await?;
        self.read_reply().await
    }

    /// Best-effort QUIT; the daemon closes the stream.
    pub async fn quit(mut self) {
        let _ = self.send("QUIT").await;
    }

    async fn send(&mut self, command: &str) -> Result<()> {
        self.stream.write_all(command.as_bytes()).await?;
        self.stream.write_all(b"\r\n").await?;
        self.stream.flush().await?;
        Ok(())
    }

    async fn read_reply(&mut self) -> Result<Reply> {
        let mut lines = Vec::new();
        loop {
            let raw = self.read_line().await?;
            let (status, sep, text) = proto::parse_status_line(&raw)?;
            match sep {
                Separator::Mid => lines.push(ReplyLine::Mid {
                    status,
                    text: text.to_string(),
                }),
                Separator::Data => {
                    let header = text.to_string();
                    let mut body = Vec::new();
                    loop {
                        let block_line = self.read_line().await?;
                        if block_line == "." {
                            break;
                        }
                        body.push(proto::unescape_block_line(&block_line).to_string());
                    }
                    lines.push(ReplyLine::Data {
                        status,
                        header,
                        body,
                    });
                }
                Separator::End => {
                    lines.push(ReplyLine::End {
                        status,
                        text: text.to_string(),
                    });
                    break;
                }
            }
        }
        let reply = Reply { lines };
        reply.check_status()?;
        Ok(reply)
    }

    async fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self.stream.read_line(&mut line).await?;
        if read == 0 {
            return Err(VigilError::Protocol {
                reason: "connection closed mid-reply".to_string(),
            });
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }
}

#[async_trait]
impl ControlPort for Controller {
    async fn info(&mut self, key: &str) -> Result<String> {
        let reply = self.request(&format!("GETINFO {key}")).await?;
        reply
            .pairs()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
            .ok_or_else(|| VigilError::Protocol {
                reason: format!("GETINFO {key}: reply carried no value"),
            })
    }

    async fn option_values(&mut self, name: &str) -> Result<Vec<String>> {
        let reply = self.request(&format!("GETCONF {name}")).await?;
        Ok(reply.values_for(name))
    }

    async fn option_map(&mut self, query: &str) -> Result<FxHashMap<String, String>> {
        let reply = self.request(&format!("GETCONF {query}")).await?;
        Ok(reply.pairs().into_iter().collect())
    }
}
