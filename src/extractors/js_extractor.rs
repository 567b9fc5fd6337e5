//! Pattern-based extraction from raw <script> text
//!
//! Lower-confidence sweep over every script block on the page, used when
//! the JSON-LD list is missing or short. Each block is scanned with an
//! ordered list of regular expressions; the first one with any match wins.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use scraper::{Html, Selector};

use crate::config::Limits;
use crate::record::{placeholder_id, RawMovieRecord};

/// Script patterns in decreasing structural confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptPattern {
    /// `"position": N ... "title": "..." ... "year": YYYY`
    PositionTitleYear,
    /// `N. Title (YYYY)`
    NumberedListing,
    /// `"name": "..." ... "ratingValue": R`
    NameRating,
}

impl ScriptPattern {
    pub const ORDER: [ScriptPattern; 3] = [
        ScriptPattern::PositionTitleYear,
        ScriptPattern::NumberedListing,
        ScriptPattern::NameRating,
    ];

    fn regex(self) -> &'static Regex {
        match self {
            ScriptPattern::PositionTitleYear => &*POSITION_TITLE_YEAR,
            ScriptPattern::NumberedListing => &*NUMBERED_LISTING,
            ScriptPattern::NameRating => &*NAME_RATING,
        }
    }

    /// Scan one script block. `offset` is the number of records already
    /// recovered, used to number patterns that carry no position.
    fn scan(self, script: &str, offset: usize, cap: usize) -> Vec<RawMovieRecord> {
        let mut movies = Vec::new();
        for caps in self.regex().captures_iter(script).take(cap) {
            let next = (offset + movies.len() + 1) as u32;
            if let Some(movie) = self.record(&caps, next) {
                movies.push(movie);
            }
        }
        movies
    }

    fn record(self, caps: &Captures<'_>, next_position: u32) -> Option<RawMovieRecord> {
        match self {
            ScriptPattern::PositionTitleYear | ScriptPattern::NumberedListing => {
                let position: u32 = caps.get(1)?.as_str().parse().ok()?;
                if position == 0 {
                    return None;
                }
                let title = caps.get(2)?.as_str().trim();
                if title.is_empty() {
                    return None;
                }
                Some(
                    RawMovieRecord::new(position, title)
                        .with_year(caps.get(3)?.as_str())
                        .with_id(placeholder_id(position)),
                )
            }
            ScriptPattern::NameRating => {
                let title = caps.get(1)?.as_str().trim();
                if title.is_empty() {
                    return None;
                }
                Some(
                    RawMovieRecord::new(next_position, title)
                        .with_rating(caps.get(2)?.as_str())
                        .with_id(placeholder_id(next_position)),
                )
            }
        }
    }
}

static POSITION_TITLE_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)"position"\s*:\s*(\d+).*?"title"\s*:\s*"([^"]+)".*?"year"\s*:\s*(\d{4})"#)
        .expect("position/title/year pattern")
});
static NUMBERED_LISTING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\.\s*([^<]+?)\s*\((\d{4})\)").expect("numbered listing pattern")
});
static NAME_RATING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)"name"\s*:\s*"([^"]+)".*?"ratingValue"\s*:\s*([\d.]+)"#)
        .expect("name/rating pattern")
});

/// Sweep all script blocks with the fallback patterns
pub fn extract_script_movies(document: &Html, limits: &Limits) -> Vec<RawMovieRecord> {
    let selector = match Selector::parse("script") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut movies = Vec::new();

    for element in document.select(&selector) {
        if movies.len() >= limits.target_count {
            break;
        }

        let script = element.text().collect::<String>();
        if script.trim().is_empty() {
            continue;
        }

        movies.extend(scan_script(&script, movies.len(), limits.target_count));
    }

    movies.truncate(limits.target_count);
    movies
}

fn scan_script(script: &str, offset: usize, cap: usize) -> Vec<RawMovieRecord> {
    for pattern in ScriptPattern::ORDER {
        let found = pattern.scan(script, offset, cap);
        if !found.is_empty() {
            tracing::debug!(?pattern, count = found.len(), "script pattern matched");
            return found;
        }
    }
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> Vec<RawMovieRecord> {
        extract_script_movies(&Html::parse_document(html), &Limits::default())
    }

    #[test]
    fn test_position_title_year() {
        let html = r#"
        <script>
            window.__chart = [
                {"position": 1, "title": "The Shawshank Redemption", "year": 1994},
                {"position": 2, "title": "The Godfather", "year": 1972}
            ];
        </script>
        "#;

        let movies = extract(html);
        assert_eq!(movies.len(), 2);
        assert_eq!(
            movies[0],
            RawMovieRecord::new(1, "The Shawshank Redemption")
                .with_year("1994")
                .with_id("tt1000001")
        );
        assert_eq!(movies[1].title, "The Godfather");
        assert_eq!(movies[1].rating, None);
    }

    #[test]
    fn test_numbered_listing() {
        let html = r#"
        <script>
            var listing = "1. The Dark Knight (2008) 2. 12 Angry Men (1957)";
        </script>
        "#;

        let movies = extract(html);
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].position, 1);
        assert_eq!(movies[0].title, "The Dark Knight");
        assert_eq!(movies[0].year.as_deref(), Some("2008"));
        assert_eq!(movies[1].title, "12 Angry Men");
        assert_eq!(movies[1].imdb_external_id, "tt1000002");
    }

    #[test]
    fn test_name_rating_takes_running_positions() {
        let html = r#"
        <script>{"position": 1, "title": "Inception", "year": 2010}</script>
        <script>
            {"name": "Pulp Fiction", "ratingValue": 8.9}
            {"name": "Goodfellas", "ratingValue": 8.7}
        </script>
        "#;

        let movies = extract(html);
        assert_eq!(movies.len(), 3);
        assert_eq!(movies[1].position, 2);
        assert_eq!(movies[1].title, "Pulp Fiction");
        assert_eq!(movies[1].rating.as_deref(), Some("8.9"));
        assert_eq!(movies[1].year, None);
        assert_eq!(movies[2].position, 3);
        assert_eq!(movies[2].imdb_external_id, "tt1000003");
    }

    #[test]
    fn test_largest_positions_do_not_overflow() {
        let html = r#"
        <script>{"position": 4294967295, "title": "X", "year": 1999}</script>
        <script>{"position": 4294967296, "title": "Too Big", "year": 2000}</script>
        "#;

        let movies = extract(html);
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].position, u32::MAX);
        assert_eq!(movies[0].imdb_external_id, "tt4295967295");
    }

    #[test]
    fn test_first_matching_pattern_wins_per_block() {
        let script = r#"{"position": 4, "title": "Seven Samurai", "year": 1954} {"name": "Other", "ratingValue": 7.0}"#;

        let movies = scan_script(script, 0, 250);
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "Seven Samurai");
    }

    #[test]
    fn test_total_is_capped() {
        let listing: String = (1..=300).map(|i| format!("{i}. Film {i} (1999) ")).collect();
        let html = format!("<script>var x = \"{listing}\";</script>");
        let limits = Limits {
            min_movies: 5,
            target_count: 20,
        };

        let movies = extract_script_movies(&Html::parse_document(&html), &limits);
        assert_eq!(movies.len(), 20);
        assert_eq!(movies[19].position, 20);
    }
}
