use std::path::Path;

use anyhow::{Context, Result, bail};
use regex::Regex;
use tracing::{debug, info, warn};

use crate::cli::OutlineArgs;
use crate::commands::{BOOK_METADATA_FILE, BOOK_STRUCTURE_FILE, PROCESSED_DIR};
use crate::model::{BookMetadataIndex, BookOutline, BookStructure, ChapterHeading};
use crate::util::{read_json, read_utf8, write_json_pretty};

mod extractor;
mod run;

pub use run::run;

use extractor::*;
