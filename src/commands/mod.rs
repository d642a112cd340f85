pub mod index;
pub mod ingest;
pub mod inventory;
pub mod metadata;
pub mod outline;
pub mod status;

/// The corpus ships as four volumes of ten books each.
pub const VOLUME_COUNT: u32 = 4;

pub const SOURCE_DIR: &str = "source";
pub const PROCESSED_DIR: &str = "processed";
pub const MANIFEST_DIR: &str = "manifests";
pub const INVENTORY_MANIFEST_FILE: &str = "source_inventory.json";
pub const QURAN_INDEX_FILE: &str = "reference/quran-index.xml";
pub const QURAN_TEXT_FILE: &str = "reference/quran-simple.txt";
pub const TRANSLATION_FILE: &str = "translations/abdel_haleem.txt";
pub const CROSS_INDEX_FILE: &str = "quran_tafsir_index.json";
pub const BOOK_METADATA_FILE: &str = "book_metadata.json";
pub const BOOK_STRUCTURE_FILE: &str = "book_structure.json";
pub const VERSES_SUFFIX: &str = "_verses.json";

/// Identifier of a source document across every artifact: `vol{V}_{file}`.
pub fn book_id_for(vol: u32, original_file: &str) -> String {
    format!("vol{vol}_{original_file}")
}

pub fn raw_text_file_name(vol: u32, original_file: &str) -> String {
    format!("{}.txt", book_id_for(vol, original_file))
}

pub fn verses_file_name(vol: u32, original_file: &str) -> String {
    format!("{}{}", book_id_for(vol, original_file), VERSES_SUFFIX)
}
