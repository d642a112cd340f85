use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::matching::MIN_MATCH_WORDS;

#[derive(Parser, Debug)]
#[command(
    name = "ihya-index",
    version,
    about = "Quran verse cross-index and chapter outline tooling for the Ihya corpus"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Hash and list the source documents under Vol1..Vol4.
    Inventory(InventoryArgs),
    /// Extract raw text from every source document and detect verse quotations.
    Ingest(IngestArgs),
    /// Merge per-book verse matches into the master cross-index.
    Index(IndexArgs),
    /// Resolve each processed book to its title and global book number.
    Metadata(MetadataArgs),
    /// Derive the chapter/section outline of every book.
    Outline(OutlineArgs),
    /// Report which artifacts exist under the data root.
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct InventoryArgs {
    #[arg(long, default_value = "data")]
    pub data_root: PathBuf,

    #[arg(long)]
    pub source_root: Option<PathBuf>,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct IngestArgs {
    #[arg(long, default_value = "data")]
    pub data_root: PathBuf,

    #[arg(long)]
    pub source_root: Option<PathBuf>,

    #[arg(long)]
    pub processed_dir: Option<PathBuf>,

    #[arg(long)]
    pub inventory_manifest_path: Option<PathBuf>,

    #[arg(long)]
    pub ingest_manifest_path: Option<PathBuf>,

    /// Use the existing inventory manifest instead of rescanning the source volumes.
    #[arg(long, default_value_t = false)]
    pub reuse_inventory: bool,

    #[arg(long)]
    pub quran_index_path: Option<PathBuf>,

    #[arg(long)]
    pub translation_path: Option<PathBuf>,

    /// Verse detector executable; verse extraction is skipped when absent.
    #[arg(long)]
    pub matcher_program: Option<String>,

    #[arg(long = "matcher-arg")]
    pub matcher_args: Vec<String>,

    /// Directory the detector loads its own reference data from.
    #[arg(long)]
    pub matcher_root: Option<PathBuf>,

    #[arg(long, default_value_t = MIN_MATCH_WORDS)]
    pub min_match_words: usize,
}

#[derive(Args, Debug, Clone)]
pub struct IndexArgs {
    #[arg(long, default_value = "data")]
    pub data_root: PathBuf,

    #[arg(long)]
    pub processed_dir: Option<PathBuf>,

    #[arg(long)]
    pub quran_index_path: Option<PathBuf>,

    #[arg(long)]
    pub quran_text_path: Option<PathBuf>,

    #[arg(long)]
    pub output_path: Option<PathBuf>,

    #[arg(long, default_value_t = MIN_MATCH_WORDS)]
    pub min_match_words: usize,
}

#[derive(Args, Debug, Clone)]
pub struct MetadataArgs {
    #[arg(long, default_value = "data")]
    pub data_root: PathBuf,

    #[arg(long)]
    pub processed_dir: Option<PathBuf>,

    #[arg(long)]
    pub output_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct OutlineArgs {
    #[arg(long, default_value = "data")]
    pub data_root: PathBuf,

    #[arg(long)]
    pub processed_dir: Option<PathBuf>,

    #[arg(long)]
    pub metadata_path: Option<PathBuf>,

    #[arg(long)]
    pub output_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = "data")]
    pub data_root: PathBuf,
}
