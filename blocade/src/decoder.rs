use tracing::{debug, trace};

use crate::{prelude::*, term::*};

pub const MAGIC: &[u8; 4] = b"BLoC";
/// Magic followed by the little-endian `u16` entry count.
pub const HEADER_LEN: usize = MAGIC.len() + 2;

/// Number of index bits announced by a reference selector.
pub fn index_width(s0: bool, s1: bool) -> usize {
    1 << (2 * s0 as usize + s1 as usize + 2)
}

enum Production {
    Abstraction,
    Application,
    Leaf(Term),
}

enum Frame {
    Abstraction,
    Left,
    Right(Term),
}

/// Reads one entry, most-significant bit of each byte first.
struct BitCursor<'a> {
    bytes: &'a [u8],
    bit: usize,
    entry: EntryId,
}

impl<'a> BitCursor<'a> {
    fn peek(&self, offset: usize) -> Option<bool> {
        let i = self.bit + offset;
        self.bytes.get(i / 8).map(|byte| (byte >> (7 - i % 8)) & 1 == 1)
    }

    fn read(&mut self) -> Result<bool> {
        let bit = self.peek(0).ok_or(Error::Truncated { entry: self.entry })?;
        self.bit += 1;
        Ok(bit)
    }

    fn consumed_bytes(&self) -> usize {
        (self.bit + 7) / 8
    }

    fn production(&mut self, length: usize) -> Result<Production> {
        loop {
            match (self.peek(0), self.peek(1), self.peek(2)) {
                (Some(true), _, _) => {
                    let ones = (0..).take_while(|&i| self.peek(i) == Some(true)).count();
                    if self.peek(ones) == Some(false) {
                        self.bit += ones + 1;
                        return Ok(Production::Leaf(Term::Variable(ones - 1)));
                    }
                    // Skip marker. Skipping one bit at a time would only shorten the
                    // same unterminated run, so drop all of it at once.
                    self.bit += ones;
                }
                (Some(false), Some(false), _) => {
                    self.bit += 2;
                    return Ok(Production::Application);
                }
                (Some(false), Some(true), Some(false)) => {
                    self.bit += 3;
                    return Ok(Production::Abstraction);
                }
                (Some(false), Some(true), Some(true)) => {
                    self.bit += 3;
                    return self.reference(length).map(Production::Leaf);
                }
                _ => return Err(Error::Truncated { entry: self.entry }),
            }
        }
    }

    fn reference(&mut self, length: usize) -> Result<Term> {
        let s0 = self.read()?;
        let s1 = self.read()?;
        let mut raw = 0u64;
        for i in 0..index_width(s0, s1) {
            if self.read()? {
                raw |= 1 << i;
            }
        }
        let index = length as i64 - raw as i64 - 2;
        if index < 0 || index >= length as i64 {
            return Err(Error::out_of_range(index, length));
        }
        Ok(Term::Reference(index as EntryId))
    }

    fn entry(&mut self, length: usize) -> Result<Term> {
        let mut frames = vec![];
        loop {
            let mut term = match self.production(length)? {
                Production::Abstraction => {
                    frames.push(Frame::Abstraction);
                    continue;
                }
                Production::Application => {
                    frames.push(Frame::Left);
                    continue;
                }
                Production::Leaf(term) => term,
            };
            loop {
                match frames.pop() {
                    None => return Ok(term),
                    Some(Frame::Abstraction) => term = Term::Abstraction(term.into()),
                    Some(Frame::Left) => {
                        frames.push(Frame::Right(term));
                        break;
                    }
                    Some(Frame::Right(lhs)) => term = Term::Application(lhs.into(), term.into()),
                }
            }
        }
    }
}

pub fn decode(input: &[u8]) -> Result<Table> {
    if input.len() < HEADER_LEN || &input[..MAGIC.len()] != MAGIC {
        return Err(Error::MalformedHeader);
    }
    let length = u16::from_le_bytes([input[MAGIC.len()], input[MAGIC.len() + 1]]) as usize;
    debug!(entries = length, "decoding BLoC table");

    let mut offset = HEADER_LEN;
    let mut entries = Vec::with_capacity(length);
    for entry in 0..length {
        let mut cursor = BitCursor {
            bytes: &input[offset..],
            bit: 0,
            entry,
        };
        let term = cursor.entry(length)?;
        trace!(entry, bits = cursor.bit, "decoded entry");
        offset += cursor.consumed_bytes();
        entries.push(term);
    }
    if offset < input.len() {
        debug!(bytes = input.len() - offset, "ignoring trailing bytes");
    }
    Table::new(entries)
}
