use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::commands::{
    BOOK_METADATA_FILE, BOOK_STRUCTURE_FILE, CROSS_INDEX_FILE, INVENTORY_MANIFEST_FILE,
    MANIFEST_DIR, PROCESSED_DIR, VERSES_SUFFIX,
};
use crate::model::{
    BookMetadataIndex, BookStructure, CrossIndex, IngestRunManifest, SourceInventoryManifest,
};
use crate::util::{files_with_suffix, read_json};

const INGEST_RUN_PREFIX: &str = "ingest_run_";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct InventorySummary {
    pub generated_at: String,
    pub document_count: usize,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub run_id: String,
    pub status: String,
    pub documents_processed: usize,
    pub documents_failed: usize,
    pub accepted_matches: usize,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CrossIndexSummary {
    pub surahs: usize,
    pub verses: usize,
    pub verses_with_matches: usize,
    pub matches: usize,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct StatusReport {
    pub inventory: Option<InventorySummary>,
    pub latest_ingest: Option<IngestSummary>,
    pub raw_texts: usize,
    pub verse_files: usize,
    pub cross_index: Option<CrossIndexSummary>,
    pub books_with_metadata: Option<usize>,
    pub outline: Option<(usize, usize)>,
}

pub fn run(args: StatusArgs) -> Result<()> {
    info!(data_root = %args.data_root.display(), "status requested");

    let report = collect_status(&args.data_root)?;

    match &report.inventory {
        Some(inventory) => info!(
            generated_at = %inventory.generated_at,
            documents = inventory.document_count,
            "loaded source inventory"
        ),
        None => warn!("source inventory missing"),
    }

    match &report.latest_ingest {
        Some(ingest) => info!(
            run_id = %ingest.run_id,
            status = %ingest.status,
            processed = ingest.documents_processed,
            failed = ingest.documents_failed,
            accepted_matches = ingest.accepted_matches,
            "loaded latest ingest run"
        ),
        None => warn!("no ingest run manifest found"),
    }

    info!(
        raw_texts = report.raw_texts,
        verse_files = report.verse_files,
        "processed directory contents"
    );

    match &report.cross_index {
        Some(index) => info!(
            surahs = index.surahs,
            verses = index.verses,
            verses_with_matches = index.verses_with_matches,
            matches = index.matches,
            "loaded cross-index"
        ),
        None => warn!("cross-index missing"),
    }

    match report.books_with_metadata {
        Some(books) => info!(books, "loaded book metadata"),
        None => warn!("book metadata missing"),
    }

    match report.outline {
        Some((books, headings)) => info!(books, headings, "loaded book structure"),
        None => warn!("book structure missing"),
    }

    Ok(())
}

/// Summarizes whatever artifacts exist under `data_root`. Missing artifacts are
/// reported as absent; unreadable ones are errors.
pub fn collect_status(data_root: &Path) -> Result<StatusReport> {
    let manifest_dir = data_root.join(MANIFEST_DIR);
    let processed_dir = data_root.join(PROCESSED_DIR);

    let mut report = StatusReport::default();

    let inventory_path = manifest_dir.join(INVENTORY_MANIFEST_FILE);
    if inventory_path.exists() {
        let inventory: SourceInventoryManifest = read_json(&inventory_path)?;
        report.inventory = Some(InventorySummary {
            generated_at: inventory.generated_at,
            document_count: inventory.document_count,
        });
    }

    if let Some(path) = latest_ingest_manifest(&manifest_dir)? {
        let manifest: IngestRunManifest = read_json(&path)?;
        report.latest_ingest = Some(IngestSummary {
            run_id: manifest.run_id,
            status: manifest.status,
            documents_processed: manifest.counts.documents_processed,
            documents_failed: manifest.counts.documents_failed,
            accepted_matches: manifest.counts.accepted_matches,
        });
    }

    if processed_dir.is_dir() {
        report.raw_texts = files_with_suffix(&processed_dir, ".txt")?.len();
        report.verse_files = files_with_suffix(&processed_dir, VERSES_SUFFIX)?.len();
    }

    let cross_index_path = data_root.join(CROSS_INDEX_FILE);
    if cross_index_path.exists() {
        let index: CrossIndex = read_json(&cross_index_path)?;
        let mut summary = CrossIndexSummary {
            surahs: index.len(),
            ..CrossIndexSummary::default()
        };
        for verse in index.values().flat_map(|surah| surah.verses.values()) {
            summary.verses += 1;
            if !verse.matches.is_empty() {
                summary.verses_with_matches += 1;
            }
            summary.matches += verse.matches.len();
        }
        report.cross_index = Some(summary);
    }

    let metadata_path = data_root.join(BOOK_METADATA_FILE);
    if metadata_path.exists() {
        let metadata: BookMetadataIndex = read_json(&metadata_path)?;
        report.books_with_metadata = Some(metadata.len());
    }

    let structure_path = data_root.join(BOOK_STRUCTURE_FILE);
    if structure_path.exists() {
        let structure: BookStructure = read_json(&structure_path)?;
        let headings = structure.values().map(|book| book.chapters.len()).sum();
        report.outline = Some((structure.len(), headings));
    }

    Ok(report)
}

/// Run manifests carry a compact UTC timestamp, so the last name sorts newest.
fn latest_ingest_manifest(manifest_dir: &Path) -> Result<Option<PathBuf>> {
    if !manifest_dir.is_dir() {
        return Ok(None);
    }

    let latest = files_with_suffix(manifest_dir, ".json")?
        .into_iter()
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(INGEST_RUN_PREFIX))
        })
        .next_back();

    Ok(latest)
}
