//! Full-duplex word exchange abstraction
//!
//! Both ends of the link implement this: the bridge drives the clock and the
//! console follows it, but either way one word goes out while one comes in.

use crate::word::LinkWord;

/// One full-duplex 32-bit transfer
pub trait WordExchange {
    /// Send `outgoing` and return the word clocked in at the same time
    fn exchange(&mut self, outgoing: LinkWord) -> LinkWord;
}

impl<T: WordExchange + ?Sized> WordExchange for &mut T {
    fn exchange(&mut self, outgoing: LinkWord) -> LinkWord {
        (**self).exchange(outgoing)
    }
}
