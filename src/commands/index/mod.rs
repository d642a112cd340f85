use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Result, bail};
use tracing::{debug, info, warn};

use crate::cli::IndexArgs;
use crate::commands::{
    CROSS_INDEX_FILE, PROCESSED_DIR, QURAN_INDEX_FILE, QURAN_TEXT_FILE, VERSES_SUFFIX,
    book_id_for,
};
use crate::matching::{FilterPolicy, FilterStats, FilterVerdict};
use crate::model::{CrossIndex, CrossIndexMatch, SurahEntry, VerseEntry, VerseMatch};
use crate::reference::{Corpus, VerseRef};
use crate::util::{files_with_suffix, read_json, write_json_pretty};

mod aggregate;
mod run;
#[cfg(test)]
mod tests;

pub use run::run;

use aggregate::*;
