use std::cmp::Ordering;
use crate::models::{RecommendationResult, UniversityCatalogEntry};

/// Compare national rankings: ranked before unranked, lower rank first
#[inline]
fn compare_national_rank(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Total display order between two universities with the given scores
pub fn compare_candidates(
    a_score: u8,
    a: &UniversityCatalogEntry,
    b_score: u8,
    b: &UniversityCatalogEntry,
) -> Ordering {
    b_score
        .cmp(&a_score)
        .then_with(|| compare_national_rank(a.ranking_national, b.ranking_national))
        .then_with(|| a.short_name.cmp(&b.short_name))
}

/// Order scored candidates for display
///
/// Score descending, then national rank ascending, then `shortName`
/// ascending. Nothing is truncated here.
pub fn rank(mut results: Vec<RecommendationResult>) -> Vec<RecommendationResult> {
    results.sort_by(|a, b| {
        compare_candidates(a.match_score, &a.university, b.match_score, &b.university)
    });
    results
}
