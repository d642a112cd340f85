use super::*;

/// Headings inside this many opening lines that contain a colon are treated as
/// table-of-contents entries. A tunable heuristic, not a property of the texts.
pub(super) const TOC_LINE_WINDOW: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum HeadingKind {
    /// الباب followed by an ordinal, e.g. "الباب الأول".
    Chapter,
    /// فصل
    Section,
    /// بيان, an explanatory discourse.
    Explanation,
    /// ذكر
    Mention,
}

impl HeadingKind {
    pub(super) fn as_str(self) -> &'static str {
        match self {
            HeadingKind::Chapter => "chapter",
            HeadingKind::Section => "section",
            HeadingKind::Explanation => "explanation",
            HeadingKind::Mention => "mention",
        }
    }
}

struct HeadingMarker {
    kind: HeadingKind,
    pattern: Regex,
}

/// Line-initial heading detection over a book's raw text.
pub(super) struct OutlineExtractor {
    markers: Vec<HeadingMarker>,
}

impl OutlineExtractor {
    /// Markers are tried in this order; the first that matches wins.
    pub(super) fn new() -> Result<Self> {
        let priority = [
            (HeadingKind::Chapter, r"^الباب\s+[\x{0621}-\x{064A}]+"),
            (HeadingKind::Section, r"^فصل"),
            (HeadingKind::Explanation, r"^بيان\s"),
            (HeadingKind::Mention, r"^ذكر\s"),
        ];

        let markers = priority
            .into_iter()
            .map(|(kind, pattern)| {
                Regex::new(pattern)
                    .with_context(|| format!("failed to compile {} marker regex", kind.as_str()))
                    .map(|pattern| HeadingMarker { kind, pattern })
            })
            .collect::<Result<Vec<HeadingMarker>>>()?;

        Ok(Self { markers })
    }

    pub(super) fn classify(&self, line: &str) -> Option<HeadingKind> {
        self.markers
            .iter()
            .find(|marker| marker.pattern.is_match(line))
            .map(|marker| marker.kind)
    }

    /// Headings in document order, each with the word offset of its line.
    pub(super) fn extract(&self, text: &str) -> Vec<ChapterHeading> {
        let lines = text.split('\n').collect::<Vec<&str>>();
        let offsets = line_word_offsets(&lines);

        let mut chapters = Vec::new();
        for (line_index, raw_line) in lines.iter().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            let Some(kind) = self.classify(line) else {
                continue;
            };

            if is_table_of_contents_entry(line_index, line) {
                debug!(line_index, kind = kind.as_str(), "skipping table-of-contents entry");
                continue;
            }

            chapters.push(ChapterHeading {
                title: line.to_string(),
                word_start: offsets[line_index],
            });
        }

        chapters
    }
}

/// Number of whitespace-delimited words before each line.
pub(super) fn line_word_offsets(lines: &[&str]) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(lines.len());
    let mut total = 0usize;
    for line in lines {
        offsets.push(total);
        total += line.split_whitespace().count();
    }
    offsets
}

pub(super) fn is_table_of_contents_entry(line_index: usize, line: &str) -> bool {
    line_index < TOC_LINE_WINDOW && line.contains(':')
}
