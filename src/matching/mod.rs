//! Verse detection boundary and the per-match pipeline that turns detector
//! output into filtered, translated records.

mod adapter;
mod filter;
mod normalize;
#[cfg(test)]
mod tests;

pub use adapter::{ExternalMatcher, VerseMatcher};
#[cfg(test)]
pub use filter::BASMALA;
pub use filter::{FilterPolicy, FilterStats, FilterVerdict, MIN_MATCH_WORDS};
pub use normalize::{MatchPipeline, MatchStats, SourceProvenance};
