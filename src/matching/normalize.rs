use crate::model::{RawMatch, VerseMatch};
use crate::reference::{NameResolver, TranslationTable, VerseRef};

use super::filter::{FilterPolicy, FilterStats, FilterVerdict};

/// Where a batch of matches came from.
#[derive(Debug, Clone, Copy)]
pub struct SourceProvenance<'a> {
    pub original_file: &'a str,
    pub vol: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub raw_matches: usize,
    pub unresolved_names: usize,
    pub filter: FilterStats,
}

impl MatchStats {
    pub fn absorb(&mut self, other: &MatchStats) {
        self.raw_matches += other.raw_matches;
        self.unresolved_names += other.unresolved_names;
        self.filter.accepted += other.filter.accepted;
        self.filter.rejected_invocation += other.filter.rejected_invocation;
        self.filter.rejected_too_short += other.filter.rejected_too_short;
    }
}

/// Resolves the surah name, gathers translation text across the matched span
/// and formats the verse key. Lookup misses degrade to `None` / empty text.
pub fn normalize_match(
    raw: &RawMatch,
    source: SourceProvenance<'_>,
    resolver: &NameResolver,
    translations: &TranslationTable,
) -> VerseMatch {
    let surah_idx = resolver.resolve(&raw.aya_name);

    let translation = match surah_idx {
        Some(surah) => span_translation(surah, raw.start_idx, raw.end_idx, translations),
        None => String::new(),
    };

    let mut key = match surah_idx {
        Some(surah) => format!("{}:{}", surah, raw.start_idx),
        None => format!("{}:{}", raw.aya_name, raw.start_idx),
    };
    if raw.end_idx > raw.start_idx {
        key.push_str(&format!("-{}", raw.end_idx));
    }

    VerseMatch {
        original_file: source.original_file.to_string(),
        vol: source.vol,
        surah: raw.aya_name.clone(),
        surah_idx,
        ayah_start: Some(raw.start_idx),
        ayah_end: Some(raw.end_idx),
        word_start: raw.start_in_text,
        word_end: raw.end_in_text,
        text_matched: raw.matched_text.clone(),
        translation,
        key,
    }
}

/// Joins the translations of `start..=end` with single spaces. Verses without a
/// translation are left out instead of contributing an empty part, so a missing
/// first verse never leaves a leading space.
fn span_translation(surah: u32, start: u32, end: u32, translations: &TranslationTable) -> String {
    let last = end.max(start);
    (start..=last)
        .map(|ayah| translations.get(VerseRef::new(surah, ayah)))
        .filter(|text| !text.is_empty())
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Shared read-only tables plus the filter, applied to one source at a time.
#[derive(Debug, Clone, Copy)]
pub struct MatchPipeline<'a> {
    pub resolver: &'a NameResolver,
    pub translations: &'a TranslationTable,
    pub policy: &'a FilterPolicy,
}

impl MatchPipeline<'_> {
    /// Normalizes every raw match and keeps those the filter accepts, in
    /// detector order.
    pub fn process(
        &self,
        raw_matches: &[RawMatch],
        source: SourceProvenance<'_>,
    ) -> (Vec<VerseMatch>, MatchStats) {
        let mut stats = MatchStats {
            raw_matches: raw_matches.len(),
            ..MatchStats::default()
        };
        let mut accepted = Vec::new();

        for raw in raw_matches {
            let normalized = normalize_match(raw, source, self.resolver, self.translations);
            if normalized.surah_idx.is_none() {
                stats.unresolved_names += 1;
            }

            let verdict = self.policy.evaluate(&normalized.text_matched);
            stats.filter.record(verdict);
            if verdict == FilterVerdict::Accepted {
                accepted.push(normalized);
            }
        }

        (accepted, stats)
    }
}
