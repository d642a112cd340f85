/// The formulaic opening that heads nearly every section of the corpus.
pub const BASMALA: &str = "بسم الله الرحمن الرحيم";

/// Overlaps shorter than this many words are too generic to count as quotations.
pub const MIN_MATCH_WORDS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterVerdict {
    Accepted,
    Invocation,
    TooShort,
}

#[derive(Debug, Clone)]
pub struct FilterPolicy {
    invocation: String,
    min_words: usize,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self::new(BASMALA, MIN_MATCH_WORDS)
    }
}

impl FilterPolicy {
    pub fn new(invocation: &str, min_words: usize) -> Self {
        Self {
            invocation: invocation.to_string(),
            min_words,
        }
    }

    pub fn with_min_words(min_words: usize) -> Self {
        Self::new(BASMALA, min_words)
    }

    pub fn evaluate(&self, text: &str) -> FilterVerdict {
        if text == self.invocation {
            return FilterVerdict::Invocation;
        }
        if text.split_whitespace().count() < self.min_words {
            return FilterVerdict::TooShort;
        }
        FilterVerdict::Accepted
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub accepted: usize,
    pub rejected_invocation: usize,
    pub rejected_too_short: usize,
}

impl FilterStats {
    pub fn record(&mut self, verdict: FilterVerdict) {
        match verdict {
            FilterVerdict::Accepted => self.accepted += 1,
            FilterVerdict::Invocation => self.rejected_invocation += 1,
            FilterVerdict::TooShort => self.rejected_too_short += 1,
        }
    }

    pub fn rejected(&self) -> usize {
        self.rejected_invocation + self.rejected_too_short
    }
}
