use std::fs;

use super::run::build_cross_index;
use super::*;
use crate::matching::BASMALA;
use crate::reference::Unit;

fn corpus() -> Corpus {
    let units = vec![
        Unit {
            index: 1,
            name: "الفاتحة".to_string(),
            tname: "Al-Faatiha".to_string(),
            ename: "The Opening".to_string(),
            ayah_count: 7,
        },
        Unit {
            index: 112,
            name: "الإخلاص".to_string(),
            tname: "Al-Ikhlaas".to_string(),
            ename: "Sincerity".to_string(),
            ayah_count: 4,
        },
    ];
    let text = "1|1|بسم الله الرحمن الرحيم\n\
                1|2|الحمد لله رب العالمين\n\
                112|1|قل هو الله أحد\n\
                112|2|الله الصمد\n";
    Corpus::from_parts(units, text).0
}

fn verse(file: &str, surah: Option<u32>, ayah: u32, text: &str, word_start: usize) -> VerseMatch {
    VerseMatch {
        original_file: file.to_string(),
        vol: 2,
        surah: "الفاتحة".to_string(),
        surah_idx: surah,
        ayah_start: Some(ayah),
        ayah_end: Some(ayah),
        word_start,
        word_end: word_start + text.split_whitespace().count(),
        text_matched: text.to_string(),
        translation: format!("translation of {ayah}"),
        key: format!("{}:{ayah}", surah.unwrap_or_default()),
    }
}

fn write_verses(dir: &Path, name: &str, matches: &[VerseMatch]) {
    write_json_pretty(&dir.join(name), &matches).expect("write verses");
}

#[test]
fn builder_seeds_every_canonical_verse() {
    let corpus = corpus();
    let policy = FilterPolicy::default();
    let (index, stats) = CrossIndexBuilder::new(&corpus, &policy).finish();

    assert_eq!(stats, AggregateStats::default());
    assert_eq!(index.len(), 2);
    assert_eq!(index[&1].tname, "Al-Faatiha");
    assert_eq!(index[&1].ayahs, 7);
    assert_eq!(index[&1].verses.len(), 2);
    assert!(index[&112].verses.values().all(|entry| entry.matches.is_empty()));
}

#[test]
fn builder_appends_in_discovery_order_without_deduplication() {
    let corpus = corpus();
    let policy = FilterPolicy::default();
    let mut builder = CrossIndexBuilder::new(&corpus, &policy);

    let quote = "الحمد لله رب العالمين";
    builder.add_source(&[verse("Vol2-book-1.doc", Some(1), 2, quote, 40)]);
    builder.add_source(&[
        verse("Vol2-book-2.doc", Some(1), 2, quote, 7),
        verse("Vol2-book-2.doc", Some(1), 2, quote, 7),
    ]);
    let (index, stats) = builder.finish();

    let matches = &index[&1].verses[&2].matches;
    assert_eq!(matches.len(), 3);
    assert_eq!(matches[0].book_id, "vol2_Vol2-book-1.doc");
    assert_eq!(matches[0].word_start, 40);
    assert_eq!(matches[1].book_id, "vol2_Vol2-book-2.doc");
    assert_eq!(matches[1].verse_in_text, quote);
    assert_eq!(matches[1].translation, "translation of 2");
    assert_eq!(stats.matches_indexed, 3);
    assert_eq!(stats.sources_merged, 2);
}

#[test]
fn builder_drops_and_counts_unresolved_out_of_range_and_filtered() {
    let corpus = corpus();
    let policy = FilterPolicy::default();
    let mut builder = CrossIndexBuilder::new(&corpus, &policy);

    let quote = "قل هو الله أحد الله الصمد";
    let mut missing_ayah = verse("b.doc", Some(112), 1, quote, 0);
    missing_ayah.ayah_start = None;

    builder.add_source(&[
        verse("b.doc", None, 1, quote, 0),
        verse("b.doc", Some(112), 9, quote, 0),
        verse("b.doc", Some(50), 1, quote, 0),
        missing_ayah,
        verse("b.doc", Some(1), 1, BASMALA, 0),
        verse("b.doc", Some(112), 2, "الله الصمد", 0),
        verse("b.doc", Some(112), 1, quote, 0),
    ]);
    let (index, stats) = builder.finish();

    assert_eq!(stats.unresolved_skipped, 2);
    assert_eq!(stats.out_of_range_skipped, 2);
    assert_eq!(stats.filter.rejected_invocation, 1);
    assert_eq!(stats.filter.rejected_too_short, 1);
    assert_eq!(stats.matches_indexed, 1);
    assert_eq!(index[&112].verses[&1].matches.len(), 1);
    assert!(index[&1].verses[&1].matches.is_empty());

    for surah in index.values() {
        for entry in surah.verses.values() {
            for record in &entry.matches {
                assert_ne!(record.verse_in_text, BASMALA);
                assert!(record.verse_in_text.split_whitespace().count() >= 4);
            }
        }
    }
}

#[test]
fn build_cross_index_skips_malformed_files_and_is_deterministic() {
    let dir = tempfile::tempdir().expect("tempdir");
    let processed = dir.path();
    let corpus = corpus();
    let policy = FilterPolicy::default();

    let quote = "قل هو الله أحد الله الصمد";
    write_verses(
        processed,
        "vol2_b.doc_verses.json",
        &[verse("b.doc", Some(112), 1, quote, 5)],
    );
    write_verses(
        processed,
        "vol2_a.doc_verses.json",
        &[verse("a.doc", Some(112), 1, quote, 9)],
    );
    fs::write(processed.join("vol2_c.doc_verses.json"), "{ not json").expect("write");
    fs::write(processed.join("vol2_a.doc.txt"), "raw text is ignored").expect("write");

    let (index, stats) = build_cross_index(&corpus, &policy, processed).expect("build");

    assert_eq!(stats.sources_merged, 2);
    assert_eq!(stats.sources_failed, 1);
    let books = index[&112].verses[&1]
        .matches
        .iter()
        .map(|record| record.book_id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(books, vec!["vol2_a.doc", "vol2_b.doc"]);

    let first = serde_json::to_vec_pretty(&index).expect("serialize");
    let (again, _) = build_cross_index(&corpus, &policy, processed).expect("rebuild");
    let second = serde_json::to_vec_pretty(&again).expect("serialize");
    assert_eq!(first, second);
}

#[test]
fn cross_index_serializes_with_string_keys_and_arabic_text() {
    let corpus = corpus();
    let policy = FilterPolicy::default();
    let (index, _) = CrossIndexBuilder::new(&corpus, &policy).finish();

    let json = serde_json::to_value(&index).expect("serialize");
    assert_eq!(json["112"]["ename"], "Sincerity");
    assert_eq!(json["112"]["verses"]["2"]["text"], "الله الصمد");
    assert!(json["1"]["verses"]["1"]["matches"].as_array().is_some());

    let rendered = serde_json::to_string(&index).expect("serialize");
    assert!(rendered.contains("الحمد لله رب العالمين"));
}

#[test]
fn build_cross_index_requires_processed_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let corpus = corpus();
    let policy = FilterPolicy::default();

    let err = build_cross_index(&corpus, &policy, &dir.path().join("missing"))
        .expect_err("missing processed dir");
    assert!(err.to_string().contains("processed directory not found"));
}
