//! Screen buffer types
//!
//! Provides a character-based screen buffer for text-mode consoles. Text
//! wraps at the right edge and the buffer scrolls up when the cursor moves
//! past the last row.

use heapless::String;

use crate::backend::TextConsole;

/// Character rows on the handheld's 8x8 tile text console
pub const SCREEN_ROWS: usize = 20;

/// Character columns on the handheld's 8x8 tile text console
pub const SCREEN_COLS: usize = 30;

/// Screen sized for the handheld console
pub type GbaScreen = Screen<SCREEN_COLS, SCREEN_ROWS>;

/// Glyph used for bytes outside printable ASCII
const REPLACEMENT: char = '?';

/// Text screen buffer
#[derive(Clone)]
pub struct Screen<const COLS: usize, const ROWS: usize> {
    /// Current display content
    lines: [String<COLS>; ROWS],
    /// Row the cursor is on
    row: usize,
    /// Whether the screen needs to be redrawn
    dirty: bool,
}

impl<const COLS: usize, const ROWS: usize> Default for Screen<COLS, ROWS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const COLS: usize, const ROWS: usize> Screen<COLS, ROWS> {
    /// Create a new empty screen
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            row: 0,
            dirty: true,
        }
    }

    /// Get the content of a specific row, empty if out of range
    pub fn line(&self, row: usize) -> &str {
        self.lines.get(row).map(|s| s.as_str()).unwrap_or("")
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Cursor position as (row, col)
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.lines.get(self.row).map_or(0, |l| l.len()))
    }

    /// Returns true if nothing is on screen
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.is_empty())
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Get number of rows
    pub const fn rows(&self) -> usize {
        ROWS
    }

    /// Get number of columns
    pub const fn cols(&self) -> usize {
        COLS
    }

    fn newline(&mut self) {
        if ROWS == 0 {
            return;
        }
        if self.row + 1 < ROWS {
            self.row += 1;
        } else {
            self.lines.rotate_left(1);
            self.lines[ROWS - 1].clear();
        }
    }

    fn put(&mut self, byte: u8) {
        if ROWS == 0 || COLS == 0 {
            return;
        }
        match byte {
            b'\n' => self.newline(),
            b'\r' => {}
            _ => {
                let ch = match byte {
                    b'\t' => ' ',
                    0x20..=0x7E => byte as char,
                    _ => REPLACEMENT,
                };
                if self.lines[self.row].len() == COLS {
                    self.newline();
                }
                // Row has room after the wrap above
                let _ = self.lines[self.row].push(ch);
            }
        }
    }
}

impl<const COLS: usize, const ROWS: usize> TextConsole for Screen<COLS, ROWS> {
    fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.row = 0;
        self.dirty = true;
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.put(byte);
        }
        if !bytes.is_empty() {
            self.dirty = true;
        }
    }
}

#[cfg(feature = "defmt")]
impl<const COLS: usize, const ROWS: usize> defmt::Format for Screen<COLS, ROWS> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}
