use crate::{
    decoder::{index_width, HEADER_LEN, MAGIC},
    prelude::*,
    term::*,
};

const SELECTORS: [(bool, bool); 4] = [(false, false), (false, true), (true, false), (true, true)];

/// Bit sink mirroring the decoder's cursor: most-significant bit first.
#[derive(Default)]
struct Bits {
    bytes: Vec<u8>,
    len: usize,
}

impl Bits {
    fn push(&mut self, bit: bool) {
        if self.len % 8 == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(last) = self.bytes.last_mut() {
                *last |= 1 << (7 - self.len % 8);
            }
        }
        self.len += 1;
    }

    fn extend(&mut self, bits: impl IntoIterator<Item = bool>) {
        bits.into_iter().for_each(|bit| self.push(bit));
    }
}

fn reference(bits: &mut Bits, entry: EntryId, length: usize) -> Result<()> {
    let raw: u32 = (length as i64 - entry as i64 - 2)
        .try_into()
        .map_err(|_| Error::out_of_range(entry, length))?;
    let (s0, s1) = SELECTORS
        .into_iter()
        .find(|&(s0, s1)| u64::from(raw) < 1u64 << index_width(s0, s1))
        .ok_or_else(|| Error::out_of_range(entry, length))?;
    bits.extend([false, true, true, s0, s1]);
    bits.extend((0..index_width(s0, s1)).map(|i| raw >> i & 1 == 1));
    Ok(())
}

/// Serializes a table into a BLoC container that [`decode`](crate::decoder::decode) reads back.
pub fn encode(table: &Table) -> Result<Vec<u8>> {
    let length = table.len();
    let count = u16::try_from(length).map_err(|_| Error::TableTooLarge { length })?;
    let mut out = Vec::with_capacity(HEADER_LEN);
    out.extend(MAGIC);
    out.extend(count.to_le_bytes());
    for term in table.entries() {
        let mut bits = Bits::default();
        for (node, _) in term.walk() {
            match node {
                Term::Abstraction(_) => bits.extend([false, true, false]),
                Term::Application(_, _) => bits.extend([false, false]),
                Term::Variable(index) => {
                    bits.extend(std::iter::repeat(true).take(index + 1));
                    bits.push(false);
                }
                Term::Reference(entry) => reference(&mut bits, *entry, length)?,
            }
        }
        out.extend(bits.bytes);
    }
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::decoder::decode;

    #[test]
    fn test_shared_identity() {
        let table = Table::new(vec![abs!(var!(0)), app!(ref_!(0), ref_!(0))]).unwrap();
        assert_eq!(
            encode(&table).unwrap(),
            b"BLoC\x02\x00\x50\x18\x0c\x00".to_vec()
        );
    }

    #[test]
    fn test_selector_grows_with_distance() {
        let mut entries = (0..22).map(|_| abs!(var!(0))).collect::<Vec<_>>();
        entries.push(app!(ref_!(1), abs!(app!(var!(0), ref_!(20)))));
        let table = Table::new(entries).unwrap();
        let bytes = encode(&table).unwrap();
        // root starts after 22 one-byte entries: 00 011 01 00101000 ...
        assert_eq!(bytes[HEADER_LEN + 22], 0b0001_1010);
        assert_eq!(decode(&bytes).unwrap(), table);
    }

    #[test]
    fn test_root_cannot_be_referenced() {
        let table = Table::new(vec![abs!(var!(0)), app!(ref_!(1), ref_!(0))]).unwrap();
        assert!(matches!(
            encode(&table),
            Err(Error::OutOfRangeReference { index: 1, length: 2 })
        ));
    }
}
