use std::io::{self, Write};

use crate::prelude::*;

/// How grammar symbols reach the underlying sink.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Mode {
    /// One ASCII `'0'`/`'1'` per symbol.
    Text,
    /// Eight symbols per byte, least-significant bit first.
    Packed,
}

/// Output sink shared by every renderer so all targets agree on the bit layout.
pub struct BitWriter<W: Write> {
    inner: W,
    mode: Mode,
    byte: u8,
    bit: u8,
}

impl<W: Write> BitWriter<W> {
    pub fn new(inner: W, mode: Mode) -> Self {
        Self {
            inner,
            mode,
            byte: 0,
            bit: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn emit(&mut self, symbols: impl IntoIterator<Item = bool>) -> io::Result<()> {
        for symbol in symbols {
            match self.mode {
                Mode::Text => self.inner.write_all(if symbol { b"1" } else { b"0" })?,
                Mode::Packed => {
                    if symbol {
                        self.byte |= 1 << self.bit;
                    }
                    self.bit += 1;
                    if self.bit == 8 {
                        self.inner.write_all(&[self.byte])?;
                        self.byte = 0;
                        self.bit = 0;
                    }
                }
            }
        }
        Ok(())
    }

    pub fn abstraction(&mut self) -> io::Result<()> {
        self.emit([false, false])
    }

    pub fn application(&mut self) -> io::Result<()> {
        self.emit([false, true])
    }

    pub fn variable(&mut self, index: Index) -> io::Result<()> {
        self.emit(std::iter::repeat(true).take(index + 1))?;
        self.emit([false])
    }

    /// Flushes a pending partial byte and hands back the sink.
    pub fn finish(mut self) -> io::Result<W> {
        if self.bit > 0 {
            self.inner.write_all(&[self.byte])?;
            self.byte = 0;
            self.bit = 0;
        }
        self.inner.flush()?;
        Ok(self.inner)
    }
}
