use super::*;

#[derive(Debug, Default)]
pub(super) struct DocumentOutcome {
    pub(super) stats: MatchStats,
    pub(super) verses_path: Option<PathBuf>,
    pub(super) matcher_error: Option<String>,
}

/// Extracts, saves and (when a detector is available) matches one document.
///
/// Conversion failures are returned as errors. Detector failures are reported
/// in the outcome so the raw text stays saved.
pub(super) fn ingest_document(
    source_path: &Path,
    document: &SourceDocument,
    processed_dir: &Path,
    matcher: Option<&dyn VerseMatcher>,
    pipeline: &MatchPipeline<'_>,
) -> Result<DocumentOutcome> {
    let text = extract_text(source_path)?;
    if text.trim().is_empty() {
        bail!("no text extracted from {}", source_path.display());
    }

    let raw_path = processed_dir.join(raw_text_file_name(document.vol, &document.filename));
    fs::write(&raw_path, &text)
        .with_context(|| format!("failed to write {}", raw_path.display()))?;
    info!(path = %raw_path.display(), "saved raw text");

    let Some(matcher) = matcher else {
        return Ok(DocumentOutcome::default());
    };

    let raw_matches = match matcher.find_matches(&text) {
        Ok(raw_matches) => raw_matches,
        Err(err) => {
            return Ok(DocumentOutcome {
                matcher_error: Some(format!("{err:#}")),
                ..DocumentOutcome::default()
            });
        }
    };

    let source = SourceProvenance {
        original_file: &document.filename,
        vol: document.vol,
    };
    let (accepted, stats) = pipeline.process(&raw_matches, source);

    let verses_path = processed_dir.join(verses_file_name(document.vol, &document.filename));
    if accepted.is_empty() {
        // A previous run may have left matches for this document behind.
        if verses_path.exists() {
            fs::remove_file(&verses_path)
                .with_context(|| format!("failed to remove stale {}", verses_path.display()))?;
        }
        info!(file = %document.filename, raw = stats.raw_matches, "no verses found");
        return Ok(DocumentOutcome {
            stats,
            ..DocumentOutcome::default()
        });
    }

    write_json_pretty(&verses_path, &accepted)?;
    info!(
        path = %verses_path.display(),
        verses = accepted.len(),
        rejected = stats.filter.rejected(),
        "saved verse matches"
    );

    Ok(DocumentOutcome {
        stats,
        verses_path: Some(verses_path),
        matcher_error: None,
    })
}

/// Rescans the source volumes and rewrites the inventory manifest, unless the
/// caller asked to reuse an existing manifest.
pub(super) fn load_or_refresh_inventory(
    source_root: &Path,
    inventory_manifest_path: &Path,
    reuse_inventory: bool,
) -> Result<SourceInventoryManifest> {
    if !reuse_inventory || !inventory_manifest_path.exists() {
        let manifest = inventory::build_manifest(source_root)?;
        write_json_pretty(inventory_manifest_path, &manifest)?;
        info!(
            path = %inventory_manifest_path.display(),
            document_count = manifest.document_count,
            "refreshed inventory manifest"
        );
        return Ok(manifest);
    }

    let manifest: SourceInventoryManifest = read_json(inventory_manifest_path)?;

    info!(
        path = %inventory_manifest_path.display(),
        document_count = manifest.document_count,
        "loaded existing inventory manifest"
    );

    Ok(manifest)
}

pub(super) fn render_ingest_command(args: &IngestArgs) -> String {
    let mut command = vec![
        "ihya-index".to_string(),
        "ingest".to_string(),
        "--data-root".to_string(),
        args.data_root.display().to_string(),
    ];

    let optional_paths = [
        ("--source-root", &args.source_root),
        ("--processed-dir", &args.processed_dir),
        ("--inventory-manifest-path", &args.inventory_manifest_path),
        ("--ingest-manifest-path", &args.ingest_manifest_path),
        ("--quran-index-path", &args.quran_index_path),
        ("--translation-path", &args.translation_path),
        ("--matcher-root", &args.matcher_root),
    ];
    for (flag, value) in optional_paths {
        if let Some(path) = value {
            command.push(flag.to_string());
            command.push(path.display().to_string());
        }
    }

    if args.reuse_inventory {
        command.push("--reuse-inventory".to_string());
    }
    if let Some(program) = &args.matcher_program {
        command.push("--matcher-program".to_string());
        command.push(program.clone());
    }
    for arg in &args.matcher_args {
        command.push("--matcher-arg".to_string());
        command.push(arg.clone());
    }
    command.push("--min-match-words".to_string());
    command.push(args.min_match_words.to_string());

    command.join(" ")
}
