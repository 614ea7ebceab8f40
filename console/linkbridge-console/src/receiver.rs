//! Console receiver loop
//!
//! Every iteration offers the sentinel to the bridge and acts on the word
//! that comes back.

use linkbridge_protocol::{decode_word, text_len, LinkWord, WordExchange, SENTINEL, WORD_BYTES};

use crate::backend::TextConsole;

/// Printed once before the first transfer
pub const BANNER: &str = "Waiting for link...\n";

/// What one received word did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReceiverEvent {
    /// Bridge sent the sentinel; screen cleared
    Idle,
    /// Bridge sent data; the first `len` bytes were printed
    Text { bytes: [u8; WORD_BYTES], len: usize },
}

/// Word handling independent of how words arrive
pub struct Receiver<C> {
    console: C,
    text_words: u32,
    idle_words: u32,
}

impl<C: TextConsole> Receiver<C> {
    pub fn new(console: C) -> Self {
        Self {
            console,
            text_words: 0,
            idle_words: 0,
        }
    }

    /// Print the banner
    pub fn start(&mut self) {
        self.console.write_str(BANNER);
    }

    /// Act on one word received from the bridge
    pub fn handle(&mut self, word: LinkWord) -> ReceiverEvent {
        match decode_word(word) {
            None => {
                self.idle_words = self.idle_words.wrapping_add(1);
                self.console.clear();
                ReceiverEvent::Idle
            }
            Some(bytes) => {
                self.text_words = self.text_words.wrapping_add(1);
                let len = text_len(&bytes);
                self.console.write_bytes(&bytes[..len]);
                ReceiverEvent::Text { bytes, len }
            }
        }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// Data words handled so far
    pub fn text_words(&self) -> u32 {
        self.text_words
    }

    /// Sentinels handled so far
    pub fn idle_words(&self) -> u32 {
        self.idle_words
    }
}

/// Receiver driven by the console's own link port
pub struct ReceiverLoop<L, C> {
    link: L,
    receiver: Receiver<C>,
}

impl<L: WordExchange, C: TextConsole> ReceiverLoop<L, C> {
    pub fn new(link: L, console: C) -> Self {
        Self {
            link,
            receiver: Receiver::new(console),
        }
    }

    /// Print the banner before polling
    pub fn start(&mut self) {
        self.receiver.start();
    }

    /// One exchange: offer the sentinel, handle the reply
    pub fn poll(&mut self) -> ReceiverEvent {
        let word = self.link.exchange(SENTINEL);
        self.receiver.handle(word)
    }

    /// Print the banner and poll forever
    pub fn run(&mut self) -> ! {
        self.start();
        loop {
            self.poll();
        }
    }

    pub fn receiver(&self) -> &Receiver<C> {
        &self.receiver
    }
}
