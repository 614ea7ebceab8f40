//! Text console trait
//!
//! Defines the interface the receiver prints through.

/// Character output on the console
///
/// Implementations decide how bytes map to glyphs; the receiver only ever
/// writes the printable prefix of each word.
pub trait TextConsole {
    /// Clear the whole console and home the cursor
    fn clear(&mut self);

    /// Write raw bytes at the cursor
    fn write_bytes(&mut self, bytes: &[u8]);

    /// Write a string at the cursor
    fn write_str(&mut self, text: &str) {
        self.write_bytes(text.as_bytes());
    }
}

impl<C: TextConsole + ?Sized> TextConsole for &mut C {
    fn clear(&mut self) {
        (**self).clear();
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        (**self).write_bytes(bytes);
    }
}
