use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    pub vol: u32,
    pub filename: String,
    pub extension: String,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInventoryManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source_directory: String,
    pub document_count: usize,
    pub documents: Vec<SourceDocument>,
}

/// One occurrence reported by the verse detector, in the detector's own vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMatch {
    pub aya_name: String,
    pub start_idx: u32,
    pub end_idx: u32,
    pub start_in_text: usize,
    pub end_in_text: usize,
    pub matched_text: String,
}

/// A normalized match as persisted in the per-book `*_verses.json` artifact.
///
/// Most fields default so that older or hand-edited artifacts still load; a
/// record missing its verse reference simply fails to land in the cross-index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseMatch {
    #[serde(default)]
    pub original_file: String,
    #[serde(default)]
    pub vol: u32,
    #[serde(default)]
    pub surah: String,
    #[serde(default)]
    pub surah_idx: Option<u32>,
    #[serde(default)]
    pub ayah_start: Option<u32>,
    #[serde(default)]
    pub ayah_end: Option<u32>,
    #[serde(default)]
    pub word_start: usize,
    #[serde(default)]
    pub word_end: usize,
    #[serde(default, alias = "verse_text")]
    pub text_matched: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossIndexMatch {
    pub book_id: String,
    pub vol: u32,
    pub word_start: usize,
    pub word_end: usize,
    pub verse_in_text: String,
    pub translation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseEntry {
    pub text: String,
    pub matches: Vec<CrossIndexMatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurahEntry {
    pub name: String,
    pub tname: String,
    pub ename: String,
    pub ayahs: u32,
    pub verses: BTreeMap<u32, VerseEntry>,
}

/// Master cross-index keyed by surah number, then ayah number.
pub type CrossIndex = BTreeMap<u32, SurahEntry>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookMetadata {
    pub id: String,
    pub original_file: String,
    pub vol: u32,
    pub arabic_title: String,
    pub english_title: String,
    pub global_id: Option<u32>,
}

pub type BookMetadataIndex = BTreeMap<String, BookMetadata>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterHeading {
    pub title: String,
    pub word_start: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookOutline {
    pub book_id: String,
    pub arabic_title: String,
    pub english_title: String,
    pub vol: u32,
    pub global_id: Option<u32>,
    pub chapters: Vec<ChapterHeading>,
}

pub type BookStructure = BTreeMap<String, BookOutline>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestPaths {
    pub data_root: String,
    pub source_root: String,
    pub processed_dir: String,
    pub inventory_manifest_path: String,
    pub quran_index_path: String,
    pub translation_path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestCounts {
    pub document_count: usize,
    pub documents_processed: usize,
    pub documents_failed: usize,
    pub matcher_failures: usize,
    pub verse_files_written: usize,
    pub surah_mappings: usize,
    pub translations_loaded: usize,
    pub raw_matches: usize,
    pub accepted_matches: usize,
    pub rejected_invocation: usize,
    pub rejected_too_short: usize,
    pub unresolved_surah_names: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub command: String,
    pub matcher: Option<String>,
    pub paths: IngestPaths,
    pub counts: IngestCounts,
    pub warnings: Vec<String>,
}
