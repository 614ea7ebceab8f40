//! Network collaborator traits
//!
//! The bridge needs very little from the network: wait until an address is
//! configured, resolve one name, and open one TCP stream.

use core::net::Ipv4Addr;

use embedded_io_async::{ErrorKind, ErrorType, Read, Write};

/// Errors reported by the network collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NetError {
    /// Name did not resolve to an IPv4 address
    DnsFailed,
    /// TCP connect failed or was refused
    ConnectFailed,
    /// Write on an open connection failed
    WriteFailed,
    /// Read on an open connection failed
    ReadFailed,
    /// Peer reset the connection
    Closed,
}

impl embedded_io_async::Error for NetError {
    fn kind(&self) -> ErrorKind {
        match self {
            NetError::DnsFailed => ErrorKind::AddrNotAvailable,
            NetError::ConnectFailed => ErrorKind::ConnectionRefused,
            NetError::WriteFailed | NetError::ReadFailed => ErrorKind::Other,
            NetError::Closed => ErrorKind::ConnectionReset,
        }
    }
}

/// An open TCP stream
///
/// `read` returning `Ok(0)` means the server closed the stream.
#[allow(async_fn_in_trait)]
pub trait Connection: Read + Write + ErrorType<Error = NetError> {
    /// Close the stream and release its resources
    async fn close(&mut self);
}

/// Network stack used by the orchestrator
#[allow(async_fn_in_trait)]
pub trait Network {
    /// Connection type, borrowing the stack's socket buffers
    type Connection<'a>: Connection
    where
        Self: 'a;

    /// Wait, without timeout, until the link is up and has an address
    async fn wait_ready(&mut self);

    /// Resolve a host name to an IPv4 address
    async fn resolve(&mut self, host: &str) -> Result<Ipv4Addr, NetError>;

    /// Open a TCP connection
    async fn connect(&mut self, addr: Ipv4Addr, port: u16)
        -> Result<Self::Connection<'_>, NetError>;
}
