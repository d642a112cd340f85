use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use super::{TableLoadStats, VerseRef, split_keyed_line};
use crate::util::read_utf8;

/// Per-verse translation text. Lookups never fail: a missing verse reads as "".
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    entries: HashMap<VerseRef, String>,
}

impl TranslationTable {
    /// Loads the table if the file exists; a missing file yields an empty table.
    pub fn load_optional(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "translation file missing, translations will be empty");
            return Ok(Self::default());
        }

        let contents = read_utf8(path)?;
        let (table, stats) = Self::parse(&contents);
        info!(
            path = %path.display(),
            lines = stats.lines,
            translations = stats.loaded,
            skipped_lines = stats.skipped,
            "loaded translations"
        );

        Ok(table)
    }

    /// Parses `surah|ayah|text`. Only the first two delimiters are significant;
    /// the rest of the line, pipes included, is the translation.
    pub fn parse(contents: &str) -> (Self, TableLoadStats) {
        let mut entries = HashMap::new();
        let mut stats = TableLoadStats::default();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            stats.lines += 1;

            match split_keyed_line(line) {
                Some((verse, rest)) => {
                    entries.insert(verse, rest.join("|").trim().to_string());
                    stats.loaded += 1;
                }
                None => stats.skipped += 1,
            }
        }

        (Self { entries }, stats)
    }

    pub fn get(&self, verse: VerseRef) -> &str {
        self.entries.get(&verse).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
