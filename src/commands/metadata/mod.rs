use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use regex::Regex;
use tracing::{info, warn};

use crate::cli::MetadataArgs;
use crate::commands::{BOOK_METADATA_FILE, PROCESSED_DIR};
use crate::model::{BookMetadata, BookMetadataIndex};
use crate::util::{file_name_string, files_with_suffix, read_utf8, write_json_pretty};

mod catalog;
mod resolve;
mod run;

pub use run::run;

use catalog::*;
use resolve::*;

/// Title lines appear near the top of each book.
const TITLE_SEARCH_LINES: usize = 50;
const UNKNOWN_TITLE: &str = "Unknown";
