use super::CandidateMatch;

/// Exchange ranking used when a name matches listings on several venues.
pub const DEFAULT_PREFERRED_EXCHANGES: [&str; 7] =
    ["NASDAQ", "NYSE", "TSX", "TSXV", "LSE", "ASX", "PNK"];

/// Picks the candidate listed on the highest-ranked exchange in `preferred`.
///
/// Ties on one exchange go to the earliest candidate. When no candidate trades on a
/// preferred exchange, the first candidate is returned; `None` only for an empty slice.
pub fn find_best_match<'a, S: AsRef<str>>(
    candidates: &'a [CandidateMatch],
    preferred: &[S],
) -> Option<&'a CandidateMatch> {
    preferred
        .iter()
        .find_map(|ex| candidates.iter().find(|c| c.exchange == ex.as_ref()))
        .or_else(|| candidates.first())
}
