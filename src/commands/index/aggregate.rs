use super::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(super) struct AggregateStats {
    pub(super) sources_merged: usize,
    pub(super) sources_failed: usize,
    pub(super) matches_indexed: usize,
    pub(super) unresolved_skipped: usize,
    pub(super) out_of_range_skipped: usize,
    pub(super) filter: FilterStats,
}

/// Accumulates verse matches into a cross-index seeded with every canonical
/// verse, so verses nobody quotes still appear with an empty match list.
pub(super) struct CrossIndexBuilder<'a> {
    corpus: &'a Corpus,
    policy: &'a FilterPolicy,
    index: CrossIndex,
    stats: AggregateStats,
}

impl<'a> CrossIndexBuilder<'a> {
    pub(super) fn new(corpus: &'a Corpus, policy: &'a FilterPolicy) -> Self {
        let index = corpus
            .units()
            .map(|unit| {
                let verses = corpus
                    .verses_of(unit.index)
                    .map(|(ayah, text)| {
                        (
                            ayah,
                            VerseEntry {
                                text: text.to_string(),
                                matches: Vec::new(),
                            },
                        )
                    })
                    .collect::<BTreeMap<u32, VerseEntry>>();

                (
                    unit.index,
                    SurahEntry {
                        name: unit.name.clone(),
                        tname: unit.tname.clone(),
                        ename: unit.ename.clone(),
                        ayahs: unit.ayah_count,
                        verses,
                    },
                )
            })
            .collect::<CrossIndex>();

        Self {
            corpus,
            policy,
            index,
            stats: AggregateStats::default(),
        }
    }

    /// Appends one source's matches in their stored order.
    pub(super) fn add_source(&mut self, matches: &[VerseMatch]) {
        self.stats.sources_merged += 1;

        for record in matches {
            let verdict = self.policy.evaluate(&record.text_matched);
            self.stats.filter.record(verdict);
            if verdict != FilterVerdict::Accepted {
                continue;
            }

            let (Some(surah), Some(ayah)) = (record.surah_idx, record.ayah_start) else {
                self.stats.unresolved_skipped += 1;
                debug!(key = %record.key, file = %record.original_file, "skipping unresolved match");
                continue;
            };

            let entry = if self.corpus.contains(VerseRef::new(surah, ayah)) {
                self.index
                    .get_mut(&surah)
                    .and_then(|surah_entry| surah_entry.verses.get_mut(&ayah))
            } else {
                None
            };
            let Some(entry) = entry else {
                self.stats.out_of_range_skipped += 1;
                debug!(surah, ayah, file = %record.original_file, "skipping match outside canonical text");
                continue;
            };

            entry.matches.push(CrossIndexMatch {
                book_id: book_id_for(record.vol, &record.original_file),
                vol: record.vol,
                word_start: record.word_start,
                word_end: record.word_end,
                verse_in_text: record.text_matched.clone(),
                translation: record.translation.clone(),
            });
            self.stats.matches_indexed += 1;
        }
    }

    pub(super) fn record_failed_source(&mut self) {
        self.stats.sources_failed += 1;
    }

    pub(super) fn finish(self) -> (CrossIndex, AggregateStats) {
        (self.index, self.stats)
    }
}
