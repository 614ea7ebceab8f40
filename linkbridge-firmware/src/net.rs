//! Network collaborator over embassy-net
//!
//! One TCP socket at a time, with buffers allocated once at boot.

use core::net::Ipv4Addr;

use defmt::*;
use embassy_net::dns::DnsQueryType;
use embassy_net::tcp::{self, TcpSocket};
use embassy_net::{IpAddress, Stack};
use embassy_time::Duration;
use embedded_io_async::{ErrorType, Read, Write};
use static_cell::StaticCell;

use linkbridge_core::traits::{Connection, NetError, Network};

const RX_BUFFER_LEN: usize = 4096;
const TX_BUFFER_LEN: usize = 1024;

/// Reads and writes that stall longer than this end the session
const SOCKET_TIMEOUT: Duration = Duration::from_secs(30);

struct SocketBuffers {
    rx: [u8; RX_BUFFER_LEN],
    tx: [u8; TX_BUFFER_LEN],
}

static BUFFERS: StaticCell<SocketBuffers> = StaticCell::new();

/// `Network` backed by an embassy-net stack
pub struct EmbassyNetwork {
    stack: Stack<'static>,
    buffers: &'static mut SocketBuffers,
}

impl EmbassyNetwork {
    /// Create the network; may only be called once
    pub fn new(stack: Stack<'static>) -> Self {
        let buffers = BUFFERS.init(SocketBuffers {
            rx: [0; RX_BUFFER_LEN],
            tx: [0; TX_BUFFER_LEN],
        });
        Self { stack, buffers }
    }
}

impl Network for EmbassyNetwork {
    type Connection<'a>
        = EmbassyConnection<'a>
    where
        Self: 'a;

    async fn wait_ready(&mut self) {
        self.stack.wait_config_up().await;
    }

    async fn resolve(&mut self, host: &str) -> Result<Ipv4Addr, NetError> {
        let addrs = self
            .stack
            .dns_query(host, DnsQueryType::A)
            .await
            .map_err(|e| {
                debug!("DNS query error: {}", e);
                NetError::DnsFailed
            })?;

        addrs
            .iter()
            .find_map(|addr| match addr {
                IpAddress::Ipv4(v4) => Some(*v4),
                #[allow(unreachable_patterns)]
                _ => None,
            })
            .ok_or(NetError::DnsFailed)
    }

    async fn connect(
        &mut self,
        addr: Ipv4Addr,
        port: u16,
    ) -> Result<EmbassyConnection<'_>, NetError> {
        let buffers = &mut *self.buffers;
        let mut socket = TcpSocket::new(self.stack, &mut buffers.rx, &mut buffers.tx);
        socket.set_timeout(Some(SOCKET_TIMEOUT));

        socket.connect((addr, port)).await.map_err(|e| {
            debug!("TCP connect error: {}", e);
            NetError::ConnectFailed
        })?;

        Ok(EmbassyConnection { socket })
    }
}

/// An open TCP stream on the bridge's socket
pub struct EmbassyConnection<'a> {
    socket: TcpSocket<'a>,
}

fn read_error(e: tcp::Error) -> NetError {
    match e {
        tcp::Error::ConnectionReset => NetError::Closed,
        #[allow(unreachable_patterns)]
        _ => NetError::ReadFailed,
    }
}

impl ErrorType for EmbassyConnection<'_> {
    type Error = NetError;
}

impl Read for EmbassyConnection<'_> {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, NetError> {
        self.socket.read(buf).await.map_err(read_error)
    }
}

impl Write for EmbassyConnection<'_> {
    async fn write(&mut self, buf: &[u8]) -> Result<usize, NetError> {
        self.socket.write(buf).await.map_err(|_| NetError::WriteFailed)
    }

    async fn flush(&mut self) -> Result<(), NetError> {
        self.socket.flush().await.map_err(|_| NetError::WriteFailed)
    }
}

impl Connection for EmbassyConnection<'_> {
    async fn close(&mut self) {
        self.socket.close();
        // Let the FIN go out before the socket is dropped
        if self.socket.flush().await.is_err() {
            self.socket.abort();
        }
    }
}
