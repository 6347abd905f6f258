//! Human-readable run summary.

use std::collections::HashMap;
use std::fmt;

use crate::models::Publication;

/// Number of journals listed in the summary.
const TOP_JOURNALS: usize = 5;

/// Number of publications shown as most recent.
const RECENT: usize = 5;

/// Aggregate statistics over a final publication list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublicationSummary {
    /// Number of publications.
    pub total: usize,

    /// Earliest and latest publication year, if any record has one.
    pub year_range: Option<(i32, i32)>,

    /// Records without a publication year.
    pub without_year: usize,

    /// Sum of citation counts.
    pub total_citations: u64,

    /// Mean citations per publication.
    pub average_citations: f64,

    /// Highest citation count.
    pub max_citations: u64,

    /// Most frequent journals with their counts; ties keep first appearance.
    pub top_journals: Vec<(String, usize)>,

    /// Up to five entries to show, dated ones first.
    pub recent: Vec<Publication>,
}

impl PublicationSummary {
    /// Compute statistics. `publications` is expected newest first.
    #[must_use]
    pub fn from_publications(publications: &[Publication]) -> Self {
        if publications.is_empty() {
            return Self::default();
        }

        let years: Vec<i32> = publications.iter().filter_map(|p| p.publication_year).collect();
        let year_range = years.iter().min().zip(years.iter().max()).map(|(lo, hi)| (*lo, *hi));

        let total_citations: u64 = publications.iter().map(|p| p.citation_count).sum();
        let max_citations = publications.iter().map(|p| p.citation_count).max().unwrap_or(0);

        let mut journal_order: Vec<&str> = Vec::new();
        let mut journal_counts: HashMap<&str, usize> = HashMap::new();
        for journal in publications.iter().map(|p| p.journal.as_str()).filter(|j| !j.is_empty()) {
            let count = journal_counts.entry(journal).or_insert(0);
            if *count == 0 {
                journal_order.push(journal);
            }
            *count += 1;
        }
        let mut top_journals: Vec<(String, usize)> =
            journal_order.into_iter().map(|j| (j.to_string(), journal_counts[j])).collect();
        top_journals.sort_by(|a, b| b.1.cmp(&a.1));
        top_journals.truncate(TOP_JOURNALS);

        let recent = publications
            .iter()
            .filter(|p| p.has_year())
            .chain(publications.iter().filter(|p| !p.has_year()))
            .take(RECENT)
            .cloned()
            .collect();

        Self {
            total: publications.len(),
            year_range,
            without_year: publications.len() - years.len(),
            total_citations,
            average_citations: total_citations as f64 / publications.len() as f64,
            max_citations,
            top_journals,
            recent,
        }
    }
}

impl fmt::Display for PublicationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total == 0 {
            return write!(f, "No publications found.");
        }

        writeln!(f, "=== PUBLICATION SUMMARY ===")?;
        writeln!(f, "Total publications: {}", self.total)?;

        if let Some((first, last)) = self.year_range {
            writeln!(f, "Year range: {first} - {last}")?;
        }
        if self.without_year > 0 {
            writeln!(f, "Papers without publication year: {}", self.without_year)?;
        }

        writeln!(f, "Total citations: {}", self.total_citations)?;
        writeln!(f, "Average citations per paper: {:.1}", self.average_citations)?;
        writeln!(f, "Most cited paper: {} citations", self.max_citations)?;

        if !self.top_journals.is_empty() {
            writeln!(f, "\nTop {} journals:", TOP_JOURNALS)?;
            for (journal, count) in &self.top_journals {
                writeln!(f, "  {journal}: {count} papers")?;
            }
        }

        writeln!(f, "\n{} Most recent papers:", RECENT)?;
        for (i, publication) in self.recent.iter().enumerate() {
            let year = publication
                .publication_year
                .map_or_else(|| "N/A".to_string(), |y| y.to_string());
            let journal = if publication.journal.is_empty() { "N/A" } else { &publication.journal };
            writeln!(f, "  {}. {} ({})", i + 1, publication.title, year)?;
            writeln!(f, "     Journal: {journal}")?;
            let citations = match publication.citation_count {
                0 => "N/A".to_string(),
                n => n.to_string(),
            };
            writeln!(f, "     Citations: {citations}")?;
        }

        Ok(())
    }
}

/// Format the summary of a publication list.
#[must_use]
pub fn format_summary(publications: &[Publication]) -> String {
    PublicationSummary::from_publications(publications).to_string()
}
