use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use tracing::{info, warn};

use crate::cli::IngestArgs;
use crate::commands::inventory::{self, volume_dir};
use crate::commands::{
    INVENTORY_MANIFEST_FILE, MANIFEST_DIR, PROCESSED_DIR, QURAN_INDEX_FILE, SOURCE_DIR,
    TRANSLATION_FILE, raw_text_file_name, verses_file_name,
};
use crate::matching::{
    ExternalMatcher, FilterPolicy, MatchPipeline, MatchStats, SourceProvenance, VerseMatcher,
};
use crate::model::{
    IngestCounts, IngestPaths, IngestRunManifest, SourceDocument, SourceInventoryManifest,
};
use crate::reference::{NameResolver, TranslationTable, load_units};
use crate::util::{
    ensure_directory, now_utc_string, read_json, utc_compact_string, write_json_pretty,
};

mod document;
mod extract_text;
mod run;

pub use run::run;

use document::*;
use extract_text::*;
