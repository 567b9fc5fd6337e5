//! Human-readable overview of a dataset, printed after it is saved.

use std::collections::BTreeMap;
use std::fmt;

use crate::record::NormalizedMovieRecord;

const RULE_WIDTH: usize = 60;
const TOP_TITLE_WIDTH: usize = 35;
const SAMPLE_TITLE_WIDTH: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub position: u32,
    pub title: String,
    pub rating: f64,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub total: usize,
    pub year_range: Option<(i32, i32)>,
    pub average_rating: Option<f64>,
    pub top: Vec<SummaryRow>,
    /// Category label to count, ordered by label.
    pub distribution: BTreeMap<&'static str, usize>,
    pub sample: Vec<SummaryRow>,
}

impl DatasetSummary {
    pub fn new(movies: &[NormalizedMovieRecord]) -> Self {
        let year_range = movies
            .iter()
            .map(|m| m.year)
            .min()
            .zip(movies.iter().map(|m| m.year).max());

        let average_rating = (!movies.is_empty())
            .then(|| movies.iter().map(|m| m.rating).sum::<f64>() / movies.len() as f64);

        let mut by_position: Vec<&NormalizedMovieRecord> = movies.iter().collect();
        by_position.sort_by_key(|m| m.position);
        let top = by_position
            .iter()
            .take(10)
            .map(|m| row(m, TOP_TITLE_WIDTH))
            .collect();

        let mut distribution = BTreeMap::new();
        for movie in movies {
            *distribution.entry(movie.rating_category.label()).or_insert(0) += 1;
        }

        let sample = movies.iter().take(5).map(|m| row(m, SAMPLE_TITLE_WIDTH)).collect();

        Self {
            total: movies.len(),
            year_range,
            average_rating,
            top,
            distribution,
            sample,
        }
    }
}

fn row(movie: &NormalizedMovieRecord, width: usize) -> SummaryRow {
    SummaryRow {
        position: movie.position,
        title: shorten(&movie.title, width),
        rating: movie.rating,
        year: movie.year,
    }
}

/// Cut `title` to `width` characters, marking the cut with "...".
pub fn shorten(title: &str, width: usize) -> String {
    if title.chars().count() > width {
        let cut: String = title.chars().take(width).collect();
        format!("{cut}...")
    } else {
        title.to_string()
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "{rule}")?;
        writeln!(f, " DATASET SUMMARY")?;
        writeln!(f, "{rule}")?;

        writeln!(f, "\n Basic Information:")?;
        writeln!(f, "   Total Movies: {}", self.total)?;
        match self.year_range {
            Some((min, max)) => writeln!(f, "   Year Range: {min} - {max}")?,
            None => writeln!(f, "   Year Range: No year data")?,
        }
        if let Some(avg) = self.average_rating {
            writeln!(f, "   Average Rating: {avg:.2}")?;
        }

        writeln!(f, "\n TOP 10 MOVIES:")?;
        writeln!(f, "{}", "-".repeat(50))?;
        for r in &self.top {
            writeln!(f, "#{:>3} {:<38} - {} ({})", r.position, r.title, r.rating, r.year)?;
        }

        writeln!(f, "\n Rating Distribution:")?;
        for (label, count) in &self.distribution {
            let pct = *count as f64 / self.total.max(1) as f64 * 100.0;
            writeln!(f, "   {label:<25}: {count:>3} movies ({pct:>5.1}%)")?;
        }

        writeln!(f, "\n{rule}")?;
        writeln!(f, "\n SAMPLE DATA (First 5 rows):")?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        for r in &self.sample {
            writeln!(f, "#{:>3} {:<33} | {} | {}", r.position, r.title, r.rating, r.year)?;
        }
        write!(f, "{}", "-".repeat(RULE_WIDTH))
    }
}
