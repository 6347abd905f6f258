//! Title-based near-duplicate removal.
//!
//! Every candidate is compared against every accepted record, so the pass is
//! quadratic in the number of publications.

use std::collections::HashSet;

use crate::models::Publication;

/// Similarity above which two normalized titles are the same publication.
pub const SIMILARITY_THRESHOLD: f64 = 0.9;

/// Matching-characters ratio `2 * M / T` of two titles, in `[0, 1]`.
///
/// `M` counts the characters covered by Ratcliff/Obershelp matching blocks
/// (longest common run first, then recursively on both sides of it) and `T`
/// is the combined length. The pair is put in a fixed order first, so the
/// score is symmetric. Two empty titles score 1.
#[must_use]
pub fn title_similarity(a: &str, b: &str) -> f64 {
    let (a, b) = if a <= b { (a, b) } else { (b, a) };
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let (i, j, size) = longest_match(a, b, a_lo..a_hi, b_lo..b_hi);
        if size == 0 {
            continue;
        }
        matched += size;
        pending.push((a_lo, i, b_lo, j));
        pending.push((i + size, a_hi, j + size, b_hi));
    }

    matched
}

/// Longest common run within the given windows as `(start_a, start_b, len)`.
/// Ties go to the run that ends first in `a`, then in `b`.
fn longest_match(
    a: &[char],
    b: &[char],
    a_range: std::ops::Range<usize>,
    b_range: std::ops::Range<usize>,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best) = (a_range.start, b_range.start, 0);
    let width = b_range.len() + 1;
    let mut prev = vec![0usize; width];
    let mut cur = vec![0usize; width];

    for i in a_range {
        for (k, j) in b_range.clone().enumerate() {
            cur[k + 1] = if a[i] == b[j] { prev[k] + 1 } else { 0 };
            if cur[k + 1] > best {
                best = cur[k + 1];
                best_i = i + 1 - best;
                best_j = j + 1 - best;
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    (best_i, best_j, best)
}

/// Whether `candidate` has any completeness signal (year, DOI, journal)
/// that `existing` lacks.
///
/// Each signal is checked on its own; this is not a score comparison.
#[must_use]
pub fn is_more_complete(candidate: &Publication, existing: &Publication) -> bool {
    (candidate.has_year() && !existing.has_year())
        || (candidate.has_doi() && !existing.has_doi())
        || (candidate.has_journal() && !existing.has_journal())
}

/// Removes near-duplicate publications, keeping the more complete version.
#[derive(Debug, Clone, Copy)]
pub struct Deduplicator {
    threshold: f64,
}

impl Deduplicator {
    /// Create a deduplicator with a custom similarity threshold.
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Whether two normalized titles name the same publication.
    #[must_use]
    pub fn is_near_duplicate(&self, a: &str, b: &str) -> bool {
        a.contains(b) || b.contains(a) || title_similarity(a, b) > self.threshold
    }

    /// Deduplicate in input order.
    ///
    /// An exact title repeat is dropped outright. Otherwise the candidate is
    /// compared with the accepted records in order; on the first near match
    /// it either evicts that record (when it is more complete) and is
    /// appended, or is dropped.
    #[must_use]
    pub fn dedupe(&self, records: Vec<Publication>) -> Vec<Publication> {
        let mut kept: Vec<(String, Publication)> = Vec::with_capacity(records.len());
        let mut seen: HashSet<String> = HashSet::new();

        for candidate in records {
            let title = candidate.normalized_title();
            if seen.contains(&title) {
                tracing::debug!(title = %candidate.title, "Dropping exact duplicate");
                continue;
            }

            // TODO: bucket by title length before this scan for corpora beyond one author.
            if let Some(idx) = kept.iter().position(|(t, _)| self.is_near_duplicate(&title, t)) {
                if !is_more_complete(&candidate, &kept[idx].1) {
                    tracing::debug!(
                        title = %candidate.title,
                        kept = %kept[idx].1.title,
                        "Dropping near duplicate"
                    );
                    continue;
                }
                let (evicted_title, evicted) = kept.remove(idx);
                tracing::debug!(
                    title = %candidate.title,
                    evicted = %evicted.title,
                    "Replacing near duplicate with more complete record"
                );
                seen.remove(&evicted_title);
            }

            seen.insert(title.clone());
            kept.push((title, candidate));
        }

        kept.into_iter().map(|(_, publication)| publication).collect()
    }
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new(SIMILARITY_THRESHOLD)
    }
}

/// Deduplicate with the default threshold.
#[must_use]
pub fn dedupe(records: Vec<Publication>) -> Vec<Publication> {
    Deduplicator::default().dedupe(records)
}
