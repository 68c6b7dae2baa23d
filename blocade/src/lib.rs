//! Conversion of BLoC programs (lambda terms with a table of shared entries)
//! into plain binary lambda calculus.

use std::io::Write;

#[cfg(test)]
#[macro_use]
mod macros;
#[cfg(test)]
mod fixtures;

pub mod decoder;
pub mod encoder;
pub mod flatten;
pub mod graph;
pub mod parser;
pub mod prelude;
pub mod reconstruct;
pub mod target;
pub mod term;
pub mod writer;

pub use prelude::{Error, Result};
pub use reconstruct::Options;
pub use target::Target;

/// Decodes a BLoC container and writes it out as `target`.
pub fn convert<W: Write>(input: &[u8], target: Target, output: W, options: Options) -> Result<W> {
    let table = decoder::decode(input)?;
    target.convert(&table, output, options)
}

#[cfg(test)]
mod test {
    use anyhow::Result;
    use util::ResultExt;

    use super::*;
    use crate::{flatten::flatten_term, reconstruct::Schedule};

    fn bloc(table: &term::Table) -> Vec<u8> {
        encoder::encode(table).unwrap()
    }

    #[test]
    fn test_shared_identity() -> Result<()> {
        let input = b"BLoC\x02\x00\x50\x18\x0c\x00";
        let output = convert(input, Target::Unblc, vec![], Options::default())?;
        assert_eq!(output, b"0100100010");
        let output = convert(input, Target::Unbblc, vec![], Options::default())?;
        assert_eq!(output, vec![0b0001_0010, 0b0000_0001]);
        let output = convert(input, Target::Blc, vec![], Options::default())?;
        assert_eq!(output, b"01000110100010");
        Ok(())
    }

    #[test]
    fn test_flattened_output_parses_back() -> Result<()> {
        for table in fixtures::acyclic() {
            let input = bloc(&table);
            let expected = flatten_term(&decoder::decode(&input)?)?;
            let text = convert(&input, Target::Unblc, vec![], Options::default())?;
            let text = String::from_utf8(text)?;
            assert_eq!(parser::parse_text(&text).staticalize()?, expected);
            let packed = convert(&input, Target::Unbblc, vec![], Options::default())?;
            assert_eq!(parser::parse_packed(&packed).staticalize()?, expected);
        }
        Ok(())
    }

    #[test]
    fn test_reconstruction_preserves_meaning() -> Result<()> {
        for table in fixtures::acyclic() {
            for prune_unreachable in [false, true] {
                let options = Options { prune_unreachable };
                let input = bloc(&table);
                let bindings = Schedule::new(&decoder::decode(&input)?, options)?.len();
                let packed = convert(&input, Target::Bblc, vec![], options)?;
                let term = parser::parse_packed(&packed).staticalize()?;
                assert_eq!(
                    fixtures::contract_bindings(term, bindings),
                    flatten_term(&table)?
                );
            }
        }
        Ok(())
    }

    #[test]
    fn test_fatal_conditions() {
        assert!(matches!(
            convert(b"BLOC\x01\x00\x80", Target::Unblc, vec![], Options::default()),
            Err(Error::MalformedHeader)
        ));
        assert!(matches!(
            convert(b"BLoC\x01\x00\x60\x00", Target::Blc, vec![], Options::default()),
            Err(Error::OutOfRangeReference { .. })
        ));
        let cyclic = bloc(&fixtures::cyclic());
        for target in Target::ALL {
            assert!(matches!(
                convert(&cyclic, target, vec![], Options::default()),
                Err(Error::CyclicReference { entry: 0 })
            ));
        }
    }
}
