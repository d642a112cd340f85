use super::*;

/// Maps a processed book to its catalog entry, first by the title line found in
/// the text, then by the book number embedded in the file name.
pub(super) struct BookResolver {
    title_regex: Regex,
    volume_regex: Regex,
    book_number_regexes: [Regex; 2],
}

impl BookResolver {
    pub(super) fn new() -> Result<Self> {
        Ok(Self {
            title_regex: Regex::new(r"كتاب\s+[\x{0621}-\x{064A}\s]+")
                .context("failed to compile book title regex")?,
            volume_regex: Regex::new(r"vol(\d+)").context("failed to compile volume regex")?,
            book_number_regexes: [
                Regex::new(r"book-?(\d+)").context("failed to compile book number regex")?,
                Regex::new(r"k(\d+)").context("failed to compile short book number regex")?,
            ],
        })
    }

    pub(super) fn resolve(&self, filename: &str, text: &str) -> BookMetadata {
        let vol = self.volume_of(filename);
        let extracted = self.extract_title(text);

        let best_match = extracted
            .as_deref()
            .and_then(match_catalog_title)
            .or_else(|| self.book_from_filename(filename, vol));

        BookMetadata {
            id: filename.strip_suffix(".txt").unwrap_or(filename).to_string(),
            original_file: filename.to_string(),
            vol,
            arabic_title: extracted
                .or_else(|| best_match.map(|book| book.arabic_title.to_string()))
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            english_title: best_match
                .map(|book| book.english_title.to_string())
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            global_id: best_match.map(|book| book.id),
        }
    }

    /// Volume number from the `volN` prefix of processed file names; 0 if absent.
    pub(super) fn volume_of(&self, filename: &str) -> u32 {
        self.volume_regex
            .captures(filename)
            .and_then(|captures| captures.get(1))
            .and_then(|value| value.as_str().parse::<u32>().ok())
            .unwrap_or(0)
    }

    /// First `كتاب ...` run in the opening lines of the book.
    pub(super) fn extract_title(&self, text: &str) -> Option<String> {
        text.lines()
            .take(TITLE_SEARCH_LINES)
            .filter(|line| line.contains("كتاب"))
            .find_map(|line| self.title_regex.find(line))
            .map(|found| found.as_str().trim().to_string())
            .filter(|title| !title.is_empty())
    }

    pub(super) fn book_from_filename(
        &self,
        filename: &str,
        vol: u32,
    ) -> Option<&'static CatalogBook> {
        if vol == 0 {
            return None;
        }

        let number = self
            .book_number_regexes
            .iter()
            .find_map(|regex| regex.captures(filename))
            .and_then(|captures| captures.get(1))
            .and_then(|value| value.as_str().parse::<u32>().ok())
            .filter(|number| (1..=BOOKS_PER_VOLUME).contains(number))?;

        let global = vol
            .checked_sub(1)?
            .checked_mul(BOOKS_PER_VOLUME)?
            .checked_add(number)?;
        by_global_id(global)
    }
}

/// Containment match in either direction on letter-only forms.
pub(super) fn match_catalog_title(title: &str) -> Option<&'static CatalogBook> {
    let cleaned = clean_arabic(title);
    if cleaned.is_empty() {
        return None;
    }

    IHYA_BOOKS.iter().find(|book| {
        let target = clean_arabic(book.arabic_title);
        target.contains(&cleaned) || cleaned.contains(&target)
    })
}

/// Keeps Arabic letters and whitespace, then collapses whitespace runs.
pub(super) fn clean_arabic(text: &str) -> String {
    text.chars()
        .filter(|ch| ('\u{0621}'..='\u{064A}').contains(ch) || ch.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
}
