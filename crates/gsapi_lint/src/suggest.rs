//! Fuzzy "did you mean" suggestions for unknown method names.

use std::cmp::Ordering;

use strsim::normalized_levenshtein;

/// Added to the similarity score when one name contains the other.
const CONTAINMENT_BONUS: f64 = 0.25;

/// A candidate method name and its similarity to the queried name.
#[derive(Clone, Debug, PartialEq)]
pub struct Suggestion {
    /// The documented method name.
    pub name: String,
    /// Similarity in `0.0..=1.0`; higher is closer.
    pub score: f64,
}

/// Ranks `candidates` by similarity to `query`.
///
/// Comparison is case-insensitive normalized Levenshtein similarity, raised by
/// a bonus (capped at 1.0) when either name contains the other. Candidates
/// scoring below `threshold` and the query itself are dropped. Results are
/// ordered by descending score, then by name, and truncated to `max_results`.
pub fn suggest<'a>(
    candidates: impl IntoIterator<Item = &'a str>,
    query: &str,
    max_results: usize,
    threshold: f64,
) -> Vec<Suggestion> {
    let lower_query = query.to_lowercase();
    let mut ranked: Vec<Suggestion> = candidates
        .into_iter()
        .filter(|name| *name != query)
        .map(|name| Suggestion {
            name: name.to_string(),
            score: similarity(&name.to_lowercase(), &lower_query),
        })
        .filter(|s| s.score >= threshold)
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked.dedup_by(|a, b| a.name == b.name);
    ranked.truncate(max_results);
    ranked
}

fn similarity(lower_name: &str, lower_query: &str) -> f64 {
    let base = normalized_levenshtein(lower_name, lower_query);
    let contains = !lower_query.is_empty()
        && !lower_name.is_empty()
        && (lower_name.contains(lower_query) || lower_query.contains(lower_name));
    if contains {
        (base + CONTAINMENT_BONUS).min(1.0)
    } else {
        base
    }
}
