use super::*;

pub fn run(args: OutlineArgs) -> Result<()> {
    let processed_dir = args
        .processed_dir
        .clone()
        .unwrap_or_else(|| args.data_root.join(PROCESSED_DIR));
    let metadata_path = args
        .metadata_path
        .clone()
        .unwrap_or_else(|| args.data_root.join(BOOK_METADATA_FILE));
    let output_path = args
        .output_path
        .clone()
        .unwrap_or_else(|| args.data_root.join(BOOK_STRUCTURE_FILE));

    if !metadata_path.exists() {
        bail!(
            "book metadata not found: {} (run the metadata command first)",
            metadata_path.display()
        );
    }
    let metadata: BookMetadataIndex = read_json(&metadata_path)?;

    let structure = build_structure(&metadata, &processed_dir)?;

    write_json_pretty(&output_path, &structure)?;
    info!(path = %output_path.display(), "wrote book structure");
    info!(
        books = structure.len(),
        headings = structure.values().map(|book| book.chapters.len()).sum::<usize>(),
        "outline extraction completed"
    );

    Ok(())
}

pub(super) fn build_structure(
    metadata: &BookMetadataIndex,
    processed_dir: &Path,
) -> Result<BookStructure> {
    let extractor = OutlineExtractor::new()?;
    let mut structure = BookStructure::new();

    for (book_id, info) in metadata {
        let text_path = processed_dir.join(&info.original_file);
        if !text_path.exists() {
            warn!(book_id = %book_id, path = %text_path.display(), "skipping book, text file not found");
            continue;
        }

        let text = read_utf8(&text_path)?;
        let chapters = extractor.extract(&text);
        info!(book_id = %book_id, headings = chapters.len(), "extracted outline");

        structure.insert(
            book_id.clone(),
            BookOutline {
                book_id: book_id.clone(),
                arabic_title: info.arabic_title.clone(),
                english_title: info.english_title.clone(),
                vol: info.vol,
                global_id: info.global_id,
                chapters,
            },
        );
    }

    Ok(structure)
}
