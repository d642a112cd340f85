use super::*;

pub fn run(args: IngestArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    let data_root = args.data_root.clone();
    let manifest_dir = data_root.join(MANIFEST_DIR);
    let source_root = args
        .source_root
        .clone()
        .unwrap_or_else(|| data_root.join(SOURCE_DIR));
    let processed_dir = args
        .processed_dir
        .clone()
        .unwrap_or_else(|| data_root.join(PROCESSED_DIR));
    let inventory_manifest_path = args
        .inventory_manifest_path
        .clone()
        .unwrap_or_else(|| manifest_dir.join(INVENTORY_MANIFEST_FILE));
    let ingest_manifest_path = args.ingest_manifest_path.clone().unwrap_or_else(|| {
        manifest_dir.join(format!(
            "ingest_run_{}.json",
            utc_compact_string(started_ts)
        ))
    });
    let quran_index_path = args
        .quran_index_path
        .clone()
        .unwrap_or_else(|| data_root.join(QURAN_INDEX_FILE));
    let translation_path = args
        .translation_path
        .clone()
        .unwrap_or_else(|| data_root.join(TRANSLATION_FILE));
    let matcher_root = args
        .matcher_root
        .clone()
        .unwrap_or_else(|| data_root.join("detector"));

    info!(data_root = %data_root.display(), run_id = %run_id, "starting ingest");

    let units = load_units(&quran_index_path)?;
    let resolver = NameResolver::from_units(&units);
    let unnamed = units
        .iter()
        .filter(|unit| resolver.name_of(unit.index).is_none())
        .count();
    if unnamed > 0 {
        warn!(unnamed, "surahs without a name cannot be matched by the detector");
    }
    let translations = TranslationTable::load_optional(&translation_path)?;
    let policy = FilterPolicy::with_min_words(args.min_match_words);

    let matcher = match &args.matcher_program {
        Some(program) => Some(ExternalMatcher::initialize(
            &matcher_root,
            program,
            &args.matcher_args,
        )?),
        None => {
            warn!("no verse detector configured, verse extraction will be skipped");
            None
        }
    };

    ensure_directory(&manifest_dir)?;
    ensure_directory(&processed_dir)?;
    let inventory = load_or_refresh_inventory(
        &source_root,
        &inventory_manifest_path,
        args.reuse_inventory,
    )?;

    let pipeline = MatchPipeline {
        resolver: &resolver,
        translations: &translations,
        policy: &policy,
    };

    let (mut counts, warnings) = ingest_documents(
        &inventory,
        &source_root,
        &processed_dir,
        matcher.as_ref().map(|matcher| matcher as &dyn VerseMatcher),
        &pipeline,
    );
    counts.surah_mappings = resolver.len();
    counts.translations_loaded = translations.len();

    let manifest = IngestRunManifest {
        manifest_version: 1,
        run_id,
        status: "completed".to_string(),
        started_at,
        updated_at: now_utc_string(),
        command: render_ingest_command(&args),
        matcher: matcher.as_ref().map(ExternalMatcher::describe),
        paths: IngestPaths {
            data_root: data_root.display().to_string(),
            source_root: source_root.display().to_string(),
            processed_dir: processed_dir.display().to_string(),
            inventory_manifest_path: inventory_manifest_path.display().to_string(),
            quran_index_path: quran_index_path.display().to_string(),
            translation_path: translation_path.display().to_string(),
        },
        counts: counts.clone(),
        warnings,
    };

    write_json_pretty(&ingest_manifest_path, &manifest)?;

    info!(path = %ingest_manifest_path.display(), "wrote ingest run manifest");
    info!(
        documents = counts.documents_processed,
        failed = counts.documents_failed,
        raw_matches = counts.raw_matches,
        accepted = counts.accepted_matches,
        rejected_invocation = counts.rejected_invocation,
        rejected_too_short = counts.rejected_too_short,
        unresolved = counts.unresolved_surah_names,
        "ingest completed"
    );

    Ok(())
}

/// Ingests every inventoried document in inventory order. Per-document failures
/// are counted and returned as warnings; they never abort the run.
pub(super) fn ingest_documents(
    inventory: &SourceInventoryManifest,
    source_root: &Path,
    processed_dir: &Path,
    matcher: Option<&dyn VerseMatcher>,
    pipeline: &MatchPipeline<'_>,
) -> (IngestCounts, Vec<String>) {
    let mut counts = IngestCounts {
        document_count: inventory.document_count,
        ..IngestCounts::default()
    };
    let mut match_stats = MatchStats::default();
    let mut warnings = Vec::new();

    for document in &inventory.documents {
        let source_path = volume_dir(source_root, document.vol).join(&document.filename);
        info!(vol = document.vol, file = %document.filename, "processing document");

        let outcome =
            match ingest_document(&source_path, document, processed_dir, matcher, pipeline) {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!(path = %source_path.display(), error = %format!("{err:#}"), "document skipped");
                    counts.documents_failed += 1;
                    warnings.push(format!("{}: {err:#}", source_path.display()));
                    continue;
                }
            };

        counts.documents_processed += 1;
        if let Some(message) = outcome.matcher_error {
            warn!(path = %source_path.display(), error = %message, "verse detection failed");
            counts.matcher_failures += 1;
            warnings.push(format!("{}: {message}", source_path.display()));
        }
        if outcome.verses_path.is_some() {
            counts.verse_files_written += 1;
        }
        match_stats.absorb(&outcome.stats);
    }

    counts.raw_matches = match_stats.raw_matches;
    counts.accepted_matches = match_stats.filter.accepted;
    counts.rejected_invocation = match_stats.filter.rejected_invocation;
    counts.rejected_too_short = match_stats.filter.rejected_too_short;
    counts.unresolved_surah_names = match_stats.unresolved_names;

    (counts, warnings)
}
