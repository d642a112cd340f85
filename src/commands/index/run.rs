use super::*;

pub fn run(args: IndexArgs) -> Result<()> {
    let data_root = args.data_root.clone();
    let processed_dir = args
        .processed_dir
        .clone()
        .unwrap_or_else(|| data_root.join(PROCESSED_DIR));
    let quran_index_path = args
        .quran_index_path
        .clone()
        .unwrap_or_else(|| data_root.join(QURAN_INDEX_FILE));
    let quran_text_path = args
        .quran_text_path
        .clone()
        .unwrap_or_else(|| data_root.join(QURAN_TEXT_FILE));
    let output_path = args
        .output_path
        .clone()
        .unwrap_or_else(|| data_root.join(CROSS_INDEX_FILE));

    info!(processed_dir = %processed_dir.display(), "starting cross-index build");

    let corpus = Corpus::load(&quran_index_path, &quran_text_path)?;
    let policy = FilterPolicy::with_min_words(args.min_match_words);
    info!(
        surahs = corpus.unit_count(),
        verses = corpus.verse_count(),
        min_match_words = args.min_match_words,
        "reference corpus ready"
    );

    let (index, stats) = build_cross_index(&corpus, &policy, &processed_dir)?;

    write_json_pretty(&output_path, &index)?;

    info!(path = %output_path.display(), "wrote cross-index");
    info!(
        sources = stats.sources_merged,
        failed_sources = stats.sources_failed,
        indexed = stats.matches_indexed,
        rejected_invocation = stats.filter.rejected_invocation,
        rejected_too_short = stats.filter.rejected_too_short,
        unresolved = stats.unresolved_skipped,
        out_of_range = stats.out_of_range_skipped,
        "cross-index build completed"
    );

    Ok(())
}

/// Reads every `*_verses.json` under `processed_dir` in file-name order and
/// merges it. Unreadable files are logged and counted, never fatal.
pub(super) fn build_cross_index(
    corpus: &Corpus,
    policy: &FilterPolicy,
    processed_dir: &Path,
) -> Result<(CrossIndex, AggregateStats)> {
    if !processed_dir.is_dir() {
        bail!("processed directory not found: {}", processed_dir.display());
    }

    let verse_files = files_with_suffix(processed_dir, VERSES_SUFFIX)?;
    info!(files = verse_files.len(), "loading per-book verse files");

    let mut builder = CrossIndexBuilder::new(corpus, policy);
    for path in verse_files {
        match read_json::<Vec<VerseMatch>>(&path) {
            Ok(matches) => builder.add_source(&matches),
            Err(err) => {
                warn!(path = %path.display(), error = %format!("{err:#}"), "skipping unreadable verse file");
                builder.record_failed_source();
            }
        }
    }

    Ok(builder.finish())
}
