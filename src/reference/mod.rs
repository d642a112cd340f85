//! Read-only reference tables loaded once per run: the surah index, the
//! canonical verse text, the translation table and the name resolver that
//! bridges the detector's surah names to surah numbers.

mod corpus;
mod resolver;
mod translation;

pub use corpus::{Corpus, Unit, load_units};
pub use resolver::NameResolver;
pub use translation::TranslationTable;

/// Address of one verse: surah number and ayah number, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VerseRef {
    pub surah: u32,
    pub ayah: u32,
}

impl VerseRef {
    pub fn new(surah: u32, ayah: u32) -> Self {
        Self { surah, ayah }
    }
}

/// Line counters for a pipe-delimited table load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableLoadStats {
    pub lines: usize,
    pub loaded: usize,
    pub skipped: usize,
}

/// Splits `surah|ayah|rest` and parses the two numeric keys. Returns `None`
/// for comment lines, blank lines and anything whose keys do not parse.
fn split_keyed_line(line: &str) -> Option<(VerseRef, Vec<&str>)> {
    let mut parts = line.split('|');
    let surah = parts.next()?.trim().parse::<u32>().ok()?;
    let ayah = parts.next()?.trim().parse::<u32>().ok()?;
    let rest = parts.collect::<Vec<&str>>();
    if rest.is_empty() {
        return None;
    }
    Some((VerseRef::new(surah, ayah), rest))
}
