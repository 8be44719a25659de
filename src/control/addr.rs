//! Control interface address grammar: `[ADDRESS:]PORT`

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;

use crate::error::{Result, VigilError};

/// Where the daemon's control port listens.
///
/// Bare `PORT` keeps the default loopback address. The address part
/// must be an IPv4 dotted quad, the port in 1-65535.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlAddr {
    pub address: Ipv4Addr,
    pub port: u16,
}

impl ControlAddr {
    pub fn new(address: Ipv4Addr, port: u16) -> Self {
        Self { address, port }
    }

    /// Build from separate config fields, validating the address string.
    pub fn from_parts(address: &str, port: u16) -> Result<Self> {
        let input = format!("{address}:{port}");
        let address = parse_address(&input, address)?;
        let port = check_port_range(&input, port)?;
        Ok(Self { address, port })
    }

    pub fn to_socket_addr(self) -> SocketAddr {
        SocketAddr::from((self.address, self.port))
    }
}

impl Default for ControlAddr {
    fn default() -> Self {
        Self {
            address: Ipv4Addr::LOCALHOST,
            port: crate::config::DEFAULT_CONTROL_PORT,
        }
    }
}

impl fmt::Display for ControlAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}

impl FromStr for ControlAddr {
    type Err = VigilError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(invalid(s, "empty interface"));
        }
        match s.rsplit_once(':') {
            Some((address, port)) => {
                if address.is_empty() {
                    return Err(invalid(s, "missing address before ':'"));
                }
                if port.is_empty() {
                    return Err(invalid(s, "missing port after ':'"));
                }
                Ok(Self {
                    address: parse_address(s, address)?,
                    port: parse_port(s, port)?,
                })
            }
            None => Ok(Self {
                port: parse_port(s, s)?,
                ..Self::default()
            }),
        }
    }
}

fn parse_address(input: &str, part: &str) -> Result<Ipv4Addr> {
    part.parse()
        .map_err(|_| invalid(input, "address is not an IPv4 dotted quad"))
}

fn parse_port(input: &str, part: &str) -> Result<u16> {
    let port = part
        .parse::<u16>()
        .map_err(|_| invalid(input, "port must be a number in 1-65535"))?;
    check_port_range(input, port)
}

fn check_port_range(input: &str, port: u16) -> Result<u16> {
    if port == 0 {
        return Err(invalid(input, "port must be a number in 1-65535"));
    }
    Ok(port)
}

fn invalid(input: &str, reason: &str) -> VigilError {
    VigilError::InvalidInterface {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}
