use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{info, warn};

use super::{TableLoadStats, VerseRef, split_keyed_line};
use crate::util::read_utf8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub index: u32,
    pub name: String,
    pub tname: String,
    pub ename: String,
    pub ayah_count: u32,
}

/// Surah metadata plus the canonical text of every verse.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    units: BTreeMap<u32, Unit>,
    verses: BTreeMap<VerseRef, String>,
}

impl Corpus {
    pub fn load(index_path: &Path, text_path: &Path) -> Result<Self> {
        let units = load_units(index_path)?;

        if !text_path.exists() {
            bail!("canonical verse text not found: {}", text_path.display());
        }
        let contents = read_utf8(text_path)?;
        let (corpus, stats) = Self::from_parts(units, &contents);

        info!(
            path = %text_path.display(),
            surahs = corpus.units.len(),
            lines = stats.lines,
            verses = stats.loaded,
            skipped_lines = stats.skipped,
            "loaded canonical verse text"
        );

        Ok(corpus)
    }

    /// Builds the corpus from parsed units and the raw `surah|ayah|text` table.
    /// Rows for unknown surahs and rows without exactly three fields are skipped.
    pub fn from_parts(units: Vec<Unit>, text_table: &str) -> (Self, TableLoadStats) {
        let units = units
            .into_iter()
            .map(|unit| (unit.index, unit))
            .collect::<BTreeMap<u32, Unit>>();
        let mut verses = BTreeMap::new();
        let mut stats = TableLoadStats::default();

        for line in text_table.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            stats.lines += 1;

            match split_keyed_line(line) {
                Some((verse, rest)) if rest.len() == 1 && units.contains_key(&verse.surah) => {
                    verses.insert(verse, rest[0].to_string());
                    stats.loaded += 1;
                }
                _ => stats.skipped += 1,
            }
        }

        (Self { units, verses }, stats)
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn verse_count(&self) -> usize {
        self.verses.len()
    }

    pub fn contains(&self, verse: VerseRef) -> bool {
        self.verses.contains_key(&verse)
    }

    /// Verses of one surah in ayah order.
    pub fn verses_of(&self, surah: u32) -> impl Iterator<Item = (u32, &str)> {
        self.verses
            .range(VerseRef::new(surah, 0)..=VerseRef::new(surah, u32::MAX))
            .map(|(verse, text)| (verse.ayah, text.as_str()))
    }
}

pub fn load_units(path: &Path) -> Result<Vec<Unit>> {
    if !path.exists() {
        bail!("surah index not found: {}", path.display());
    }

    let xml = read_utf8(path)?;
    let units =
        parse_unit_index(&xml).with_context(|| format!("failed to parse {}", path.display()))?;

    if units.is_empty() {
        warn!(path = %path.display(), "surah index contains no <sura> elements");
    }
    info!(path = %path.display(), surahs = units.len(), "loaded surah index");

    Ok(units)
}

/// Parses `<sura index=".." name=".." tname=".." ename=".." ayas=".."/>` elements.
pub fn parse_unit_index(xml: &str) -> Result<Vec<Unit>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut units = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref element)) | Ok(Event::Empty(ref element)) => {
                if element.name().as_ref() == b"sura" {
                    units.push(unit_from_element(element)?);
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                bail!(
                    "malformed surah index at byte {}: {err}",
                    reader.buffer_position()
                );
            }
            _ => {}
        }
        buf.clear();
    }

    units.sort_by_key(|unit| unit.index);
    Ok(units)
}

fn unit_from_element(element: &BytesStart) -> Result<Unit> {
    let index = required_attribute(element, b"index")?
        .parse::<u32>()
        .context("invalid sura index attribute")?;
    let ayah_count = required_attribute(element, b"ayas")?
        .parse::<u32>()
        .with_context(|| format!("invalid ayas attribute for sura {index}"))?;

    Ok(Unit {
        index,
        name: get_attribute(element, b"name").unwrap_or_default(),
        tname: get_attribute(element, b"tname").unwrap_or_default(),
        ename: get_attribute(element, b"ename").unwrap_or_default(),
        ayah_count,
    })
}

fn required_attribute(element: &BytesStart, name: &[u8]) -> Result<String> {
    get_attribute(element, name).with_context(|| {
        format!(
            "sura element missing '{}' attribute",
            String::from_utf8_lossy(name)
        )
    })
}

fn get_attribute(element: &BytesStart, name: &[u8]) -> Option<String> {
    element
        .attributes()
        .filter_map(|attribute| attribute.ok())
        .find(|attribute| attribute.key.as_ref() == name)
        .and_then(|attribute| attribute.unescape_value().ok())
        .map(|value| value.into_owned())
}
