use std::env;
use std::fs;
use std::sync::Mutex;

use super::adapter::WorkingDirGuard;
use super::normalize::normalize_match;
use super::*;
use crate::model::RawMatch;
use crate::reference::{NameResolver, TranslationTable, Unit};

// Tests that touch the process working directory must not interleave.
static CWD_LOCK: Mutex<()> = Mutex::new(());

fn units() -> Vec<Unit> {
    vec![
        Unit {
            index: 1,
            name: "الفاتحة".to_string(),
            tname: "Al-Faatiha".to_string(),
            ename: "The Opening".to_string(),
            ayah_count: 7,
        },
        Unit {
            index: 2,
            name: "البقرة".to_string(),
            tname: "Al-Baqara".to_string(),
            ename: "The Cow".to_string(),
            ayah_count: 286,
        },
    ]
}

fn raw(name: &str, start: u32, end: u32, text: &str) -> RawMatch {
    RawMatch {
        aya_name: name.to_string(),
        start_idx: start,
        end_idx: end,
        start_in_text: 10,
        end_in_text: 10 + text.split_whitespace().count(),
        matched_text: text.to_string(),
    }
}

fn source() -> SourceProvenance<'static> {
    SourceProvenance {
        original_file: "Vol1-book-3.doc",
        vol: 1,
    }
}

#[test]
fn filter_rejects_exact_invocation_only() {
    let policy = FilterPolicy::default();
    assert_eq!(policy.evaluate(BASMALA), FilterVerdict::Invocation);
    assert_eq!(
        policy.evaluate("قال بسم الله الرحمن الرحيم"),
        FilterVerdict::Accepted
    );
}

#[test]
fn filter_length_threshold_is_four_words() {
    let policy = FilterPolicy::default();
    assert_eq!(policy.evaluate("الحمد لله رب"), FilterVerdict::TooShort);
    assert_eq!(policy.evaluate("الحمد لله رب العالمين"), FilterVerdict::Accepted);
    assert_eq!(policy.evaluate("  "), FilterVerdict::TooShort);
    assert_eq!(policy.evaluate(""), FilterVerdict::TooShort);
}

#[test]
fn filter_threshold_is_configurable() {
    let policy = FilterPolicy::with_min_words(2);
    assert_eq!(policy.evaluate("الله الصمد"), FilterVerdict::Accepted);
    assert_eq!(policy.evaluate(BASMALA), FilterVerdict::Invocation);
}

#[test]
fn normalize_concatenates_translation_across_span() {
    let resolver = NameResolver::from_units(&units());
    let (translations, _) = TranslationTable::parse("2|2|A\n2|3|B\n2|4|C\n2|5|D\n");

    let record = normalize_match(
        &raw("البقرة", 2, 4, "ذلك الكتاب لا ريب فيه"),
        source(),
        &resolver,
        &translations,
    );

    assert_eq!(record.surah_idx, Some(2));
    assert_eq!(record.translation, "A B C");
    assert_eq!(record.key, "2:2-4");
    assert_eq!(record.ayah_start, Some(2));
    assert_eq!(record.ayah_end, Some(4));
    assert_eq!(record.original_file, "Vol1-book-3.doc");
    assert_eq!(record.vol, 1);
}

#[test]
fn normalize_skips_missing_translations_in_span() {
    let resolver = NameResolver::from_units(&units());
    let (translations, _) = TranslationTable::parse("2|3|B\n");

    let record = normalize_match(
        &raw("البقرة", 2, 4, "ذلك الكتاب لا ريب فيه"),
        source(),
        &resolver,
        &translations,
    );

    assert_eq!(record.translation, "B");
}

#[test]
fn normalize_missing_first_translation_leaves_no_leading_space() {
    let resolver = NameResolver::from_units(&units());
    let (translations, _) = TranslationTable::parse("2|3|B\n2|4|C\n");

    let record = normalize_match(
        &raw("البقرة", 2, 4, "ذلك الكتاب لا ريب فيه"),
        source(),
        &resolver,
        &translations,
    );

    assert_eq!(record.translation, "B C");
}

#[test]
fn normalize_falls_back_to_detector_name_when_unresolved() {
    let resolver = NameResolver::from_units(&units());
    let (translations, _) = TranslationTable::parse("1|1|In the name of God\n");

    let record = normalize_match(
        &raw("سورة مجهولة", 1, 1, "كلمات لا تنتمي لأي سورة"),
        source(),
        &resolver,
        &translations,
    );

    assert_eq!(record.surah_idx, None);
    assert_eq!(record.key, "سورة مجهولة:1");
    assert_eq!(record.translation, "");
    assert_eq!(record.surah, "سورة مجهولة");
}

#[test]
fn pipeline_filters_after_enrichment_and_counts_rejections() {
    let resolver = NameResolver::from_units(&units());
    let (translations, _) = TranslationTable::parse("1|1|In the name of God\n1|2|Praise be to God\n");
    let policy = FilterPolicy::default();
    let pipeline = MatchPipeline {
        resolver: &resolver,
        translations: &translations,
        policy: &policy,
    };

    let raw_matches = vec![
        raw("الفاتحة", 1, 1, BASMALA),
        raw("الفاتحة", 2, 2, "الحمد لله رب العالمين"),
        raw("الفاتحة", 5, 5, "إياك نعبد"),
        raw("مجهول", 3, 3, "كلمات كثيرة من غير سورة معروفة"),
    ];

    let (accepted, stats) = pipeline.process(&raw_matches, source());

    assert_eq!(stats.raw_matches, 4);
    assert_eq!(stats.filter.accepted, 2);
    assert_eq!(stats.filter.rejected_invocation, 1);
    assert_eq!(stats.filter.rejected_too_short, 1);
    assert_eq!(stats.filter.rejected(), 2);
    assert_eq!(stats.unresolved_names, 1);

    assert_eq!(accepted.len(), 2);
    assert_eq!(accepted[0].key, "1:2");
    assert_eq!(accepted[0].translation, "Praise be to God");
    assert_eq!(accepted[1].surah_idx, None);
    for record in &accepted {
        assert_ne!(record.text_matched, BASMALA);
        assert!(record.text_matched.split_whitespace().count() >= MIN_MATCH_WORDS);
    }
}

#[test]
fn working_dir_guard_restores_previous_directory() {
    let _lock = CWD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let original = env::current_dir().expect("cwd");
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().canonicalize().expect("canonical tempdir");

    {
        let _guard = WorkingDirGuard::enter(&target).expect("enter tempdir");
        assert_eq!(env::current_dir().expect("cwd"), target);
    }

    assert_eq!(env::current_dir().expect("cwd"), original);
}

#[test]
fn external_matcher_requires_reference_data_and_restores_cwd() {
    let _lock = CWD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let original = env::current_dir().expect("cwd");
    let dir = tempfile::tempdir().expect("tempdir");

    let err = ExternalMatcher::initialize(dir.path(), "cat", &[])
        .expect_err("missing dfiles must fail");
    assert!(err.to_string().contains("detector reference data missing"));
    assert_eq!(env::current_dir().expect("cwd"), original);

    fs::create_dir_all(dir.path().join("dfiles")).expect("mkdir dfiles");
    fs::write(dir.path().join("dfiles/quran-index.xml"), "<quran/>").expect("write index");

    let matcher = ExternalMatcher::initialize(dir.path(), "cat", &[]).expect("initialize");
    assert_eq!(matcher.describe(), "cat");
    assert_eq!(env::current_dir().expect("cwd"), original);
}

#[cfg(unix)]
#[test]
fn external_matcher_parses_detector_stdout() {
    let _lock = CWD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(dir.path().join("dfiles")).expect("mkdir dfiles");
    fs::write(dir.path().join("dfiles/quran-index.xml"), "<quran/>").expect("write index");

    // `cat` echoes stdin, so the "document" is already the detector's answer.
    let matcher = ExternalMatcher::initialize(dir.path(), "cat", &[]).expect("initialize");
    let expected = vec![raw("الفاتحة", 2, 3, "الحمد لله رب العالمين الرحمن الرحيم")];
    let payload = serde_json::to_string(&expected).expect("serialize");

    let matches = matcher.find_matches(&payload).expect("cat should succeed");
    assert_eq!(matches, expected);
}

#[cfg(unix)]
#[test]
fn external_matcher_reports_non_json_output() {
    let _lock = CWD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(dir.path().join("dfiles")).expect("mkdir dfiles");
    fs::write(dir.path().join("dfiles/quran-index.xml"), "<quran/>").expect("write index");

    let matcher = ExternalMatcher::initialize(dir.path(), "cat", &[]).expect("initialize");
    let err = matcher
        .find_matches("نص عربي ليس JSON")
        .expect_err("plain text is not a match list");
    assert!(err.to_string().contains("failed to parse output"));
}
