//! Link-port framing protocol
//!
//! This crate defines the wire protocol between the bridge (circuit master)
//! and the handheld console (clock follower). The link carries nothing but
//! 32-bit words, clocked MSB first.
//!
//! # Protocol Overview
//!
//! ```text
//! bridge                                   console
//!   │  SENTINEL ──────────────────────────▶  │   sync: repeat until the
//!   │  ◀────────────────────────── SENTINEL  │   console echoes SENTINEL
//!   │                                        │
//!   │  [b0 b1 b2 b3] ─────────────────────▶  │   stream: 4 payload bytes
//!   │  ◀────────────────────────── SENTINEL  │   per word, big-endian
//!   │  [b4 b5 00 00] ─────────────────────▶  │   tail zero-filled
//! ```
//!
//! `0xDEADB00F` is reserved: it always means "idle / resynchronize" and is
//! never interpreted as payload.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod exchange;
pub mod framing;
pub mod request;
pub mod word;

pub use exchange::WordExchange;
pub use framing::{
    decode_word, encode_word, text_len, FramingError, StreamAssembler, WordSegmenter,
};
pub use request::{HttpGet, RequestError, HTTP_PORT, MAX_REQUEST_LEN};
pub use word::{LinkWord, SENTINEL, WORD_BITS, WORD_BYTES};
