use thiserror::Error;

/// de Bruijn index of a variable.
pub type Index = usize;
/// Position of an entry inside a [`Table`](crate::term::Table).
pub type EntryId = usize;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid BLoC identifier")]
    MalformedHeader,
    #[error("input ends in the middle of entry {entry}")]
    Truncated { entry: EntryId },
    #[error("invalid reference index {index} in a table of {length} entries")]
    OutOfRangeReference { index: i64, length: usize },
    #[error("dependency graph has a cycle through entry {entry} (infinite term)")]
    CyclicReference { entry: EntryId },
    #[error("BLoC table has no entries")]
    EmptyTable,
    #[error("a BLoC table holds at most {} entries, found {length}", u16::MAX)]
    TableTooLarge { length: usize },
    #[error("unknown target `{name}`, available targets: {}", crate::target::Target::names())]
    UnknownTarget { name: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn out_of_range(index: impl TryInto<i64>, length: usize) -> Self {
        Error::OutOfRangeReference {
            index: index.try_into().unwrap_or(i64::MAX),
            length,
        }
    }
}
