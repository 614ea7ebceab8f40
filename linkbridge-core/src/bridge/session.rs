//! One network session on the bridge side
//!
//! A session owns the connection and a small read buffer for as long as the
//! connection is open. Bytes that do not fill a whole word are carried over
//! to the next read; only the final word of the stream is zero-padded.

use linkbridge_protocol::{encode_word, LinkWord, WordExchange, SENTINEL, WORD_BYTES};

use crate::config::CollisionPolicy;
use crate::fmt::{debug, warn};
use crate::traits::{Connection, NetError};

/// Bytes requested from the connection per read
pub const READ_BUFFER_LEN: usize = 64;

/// Counters for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionStats {
    /// Sentinel exchanges performed while syncing
    pub sync_attempts: u32,
    /// Response bytes read from the connection
    pub bytes: u32,
    /// Data words clocked out
    pub words: u32,
    /// Data words equal to the sentinel
    pub collisions: u32,
}

/// How streaming stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadEnd {
    /// Read returned zero bytes
    Closed,
    /// Read returned an error
    Failed(NetError),
}

/// Connection plus link progress for one request
pub struct LinkSession<C> {
    connection: C,
    buffer: [u8; READ_BUFFER_LEN],
    filled: usize,
    synced: bool,
    stats: SessionStats,
    last_read: Option<ReadEnd>,
}

impl<C: Connection> LinkSession<C> {
    pub fn new(connection: C) -> Self {
        Self {
            connection,
            buffer: [0; READ_BUFFER_LEN],
            filled: 0,
            synced: false,
            stats: SessionStats::default(),
            last_read: None,
        }
    }

    /// Write the request in one go
    pub async fn send_request(&mut self, request: &[u8]) -> Result<(), NetError> {
        self.connection.write_all(request).await?;
        self.connection.flush().await
    }

    /// Exchange sentinels until the peer echoes one, at most `limit` times
    ///
    /// Returns true once synced.
    pub fn sync<L: WordExchange>(&mut self, link: &mut L, limit: u32) -> bool {
        for attempt in 1..=limit {
            if link.exchange(SENTINEL).is_sentinel() {
                self.synced = true;
                self.stats.sync_attempts = attempt;
                return true;
            }
        }
        self.stats.sync_attempts = limit;
        false
    }

    /// Forward the response to the link until the connection ends
    ///
    /// Must only be called after a successful [`sync`](Self::sync). Words
    /// received from the peer during streaming are ignored.
    pub async fn stream<L: WordExchange>(
        &mut self,
        link: &mut L,
        policy: CollisionPolicy,
    ) -> ReadEnd {
        debug_assert!(self.synced, "streaming before sync");

        let end = loop {
            match self.connection.read(&mut self.buffer[self.filled..]).await {
                Ok(0) => break ReadEnd::Closed,
                Ok(n) => {
                    self.stats.bytes = self.stats.bytes.saturating_add(n as u32);
                    self.filled += n;
                    self.send_whole_words(link, policy);
                }
                Err(e) => break ReadEnd::Failed(e),
            }
        };

        self.flush_tail(link, policy);
        self.last_read = Some(end);
        end
    }

    /// Close the connection and hand back the counters
    pub async fn close(mut self) -> SessionStats {
        self.connection.close().await;
        self.stats
    }

    pub fn is_synced(&self) -> bool {
        self.synced
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn last_read(&self) -> Option<ReadEnd> {
        self.last_read
    }

    /// Send every complete word in the buffer and keep the remainder
    fn send_whole_words<L: WordExchange>(&mut self, link: &mut L, policy: CollisionPolicy) {
        let whole = self.filled - self.filled % WORD_BYTES;

        for offset in (0..whole).step_by(WORD_BYTES) {
            if let Ok(word) = encode_word(&self.buffer[..whole], offset) {
                self.send(link, word, policy);
            }
        }

        self.buffer.copy_within(whole..self.filled, 0);
        self.filled -= whole;
        self.buffer[self.filled..].fill(0);
    }

    /// Send the last partial word, zero-padded
    fn flush_tail<L: WordExchange>(&mut self, link: &mut L, policy: CollisionPolicy) {
        if let Ok(word) = encode_word(&self.buffer[..self.filled], 0) {
            debug!("Flushing {=usize} trailing bytes", self.filled);
            self.send(link, word, policy);
        }
        self.filled = 0;
        self.buffer.fill(0);
    }

    fn send<L: WordExchange>(&mut self, link: &mut L, word: LinkWord, policy: CollisionPolicy) {
        if word.is_sentinel() {
            self.stats.collisions = self.stats.collisions.saturating_add(1);
            warn!(
                "Data word equals sentinel ({=u32} this session)",
                self.stats.collisions
            );
            if policy == CollisionPolicy::Skip {
                return;
            }
        }

        link.exchange(word);
        self.stats.words = self.stats.words.saturating_add(1);
    }
}
