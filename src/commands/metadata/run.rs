use super::*;

pub fn run(args: MetadataArgs) -> Result<()> {
    let processed_dir = args
        .processed_dir
        .clone()
        .unwrap_or_else(|| args.data_root.join(PROCESSED_DIR));
    let output_path = args
        .output_path
        .clone()
        .unwrap_or_else(|| args.data_root.join(BOOK_METADATA_FILE));

    let metadata = build_metadata(&processed_dir)?;

    let unresolved = metadata
        .values()
        .filter(|book| book.global_id.is_none())
        .count();
    write_json_pretty(&output_path, &metadata)?;

    info!(path = %output_path.display(), "wrote book metadata");
    info!(
        books = metadata.len(),
        unresolved,
        "metadata resolution completed"
    );

    Ok(())
}

pub(super) fn build_metadata(processed_dir: &Path) -> Result<BookMetadataIndex> {
    if !processed_dir.is_dir() {
        bail!("processed directory not found: {}", processed_dir.display());
    }

    let resolver = BookResolver::new()?;
    let text_files: Vec<PathBuf> = files_with_suffix(processed_dir, ".txt")?;
    info!(files = text_files.len(), "resolving book metadata");

    let mut metadata = BookMetadataIndex::new();
    for path in text_files {
        let filename = file_name_string(&path)?;
        let text = match read_utf8(&path) {
            Ok(text) => text,
            Err(err) => {
                warn!(path = %path.display(), error = %format!("{err:#}"), "skipping unreadable book");
                continue;
            }
        };

        let book = resolver.resolve(&filename, &text);
        if book.global_id.is_none() {
            warn!(file = %filename, title = %book.arabic_title, "book not found in catalog");
        }
        metadata.insert(book.id.clone(), book);
    }

    Ok(metadata)
}
