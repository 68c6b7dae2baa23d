use std::{io::Write, str::FromStr};

use crate::{
    flatten::flatten,
    prelude::*,
    reconstruct::{reconstruct, Options},
    term::Table,
    writer::{BitWriter, Mode},
};

#[derive(PartialEq, Eq, Hash, Clone, Copy, derive_more::Display, Debug)]
pub enum Target {
    /// Sharing-free BLC text.
    #[display(fmt = "unblc")]
    Unblc,
    /// Sharing-free packed BLC.
    #[display(fmt = "unbblc")]
    Unbblc,
    /// BLC text with shared entries bound once.
    #[display(fmt = "blc")]
    Blc,
    /// Packed BLC with shared entries bound once.
    #[display(fmt = "bblc")]
    Bblc,
}

impl Target {
    pub const ALL: [Target; 4] = [Target::Unblc, Target::Unbblc, Target::Blc, Target::Bblc];

    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn mode(self) -> Mode {
        match self {
            Target::Unblc | Target::Blc => Mode::Text,
            Target::Unbblc | Target::Bblc => Mode::Packed,
        }
    }

    pub fn convert<W: Write>(self, table: &Table, output: W, options: Options) -> Result<W> {
        let mut writer = BitWriter::new(output, self.mode());
        match self {
            Target::Unblc | Target::Unbblc => flatten(table, &mut writer)?,
            Target::Blc | Target::Bblc => {
                reconstruct(table, &mut writer, options)?;
            }
        }
        Ok(writer.finish()?)
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|target| target.to_string() == name)
            .ok_or_else(|| Error::UnknownTarget {
                name: name.to_string(),
            })
    }
}
