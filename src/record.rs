//! Movie records before and after normalization.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A movie as recovered by one extractor. `year` and `rating` keep the
/// text they were scraped from; the normalizer coerces them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawMovieRecord {
    pub position: u32,
    pub title: String,
    pub year: Option<String>,
    pub rating: Option<String>,
    pub imdb_external_id: String,
}

impl RawMovieRecord {
    pub fn new(position: u32, title: impl Into<String>) -> Self {
        Self {
            position,
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn with_rating(mut self, rating: impl Into<String>) -> Self {
        self.rating = Some(rating.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.imdb_external_id = id.into();
        self
    }
}

/// Identifier used when a source gives no usable title id.
pub fn placeholder_id(position: u32) -> String {
    format!("tt{}", 1_000_000 + u64::from(position))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RatingCategory {
    #[serde(rename = "Outstanding (9.0+)")]
    Outstanding,
    #[serde(rename = "Excellent (8.5-8.9)")]
    Excellent,
    #[serde(rename = "Very Good (8.0-8.4)")]
    VeryGood,
    #[serde(rename = "Good (7.5-7.9)")]
    Good,
    #[serde(rename = "Average (<7.5)")]
    Average,
    Unknown,
}

impl RatingCategory {
    pub fn from_rating(rating: Option<f64>) -> Self {
        match rating {
            None => Self::Unknown,
            Some(r) if r.is_nan() => Self::Unknown,
            Some(r) if r >= 9.0 => Self::Outstanding,
            Some(r) if r >= 8.5 => Self::Excellent,
            Some(r) if r >= 8.0 => Self::VeryGood,
            Some(r) if r >= 7.5 => Self::Good,
            Some(_) => Self::Average,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Outstanding => "Outstanding (9.0+)",
            Self::Excellent => "Excellent (8.5-8.9)",
            Self::VeryGood => "Very Good (8.0-8.4)",
            Self::Good => "Good (7.5-7.9)",
            Self::Average => "Average (<7.5)",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for RatingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-run values stamped onto every normalized record.
#[derive(Debug, Clone, PartialEq)]
pub struct RunContext {
    pub reference_year: i32,
    pub scraped_at: NaiveDateTime,
}

impl RunContext {
    pub fn new(reference_year: i32, scraped_at: NaiveDateTime) -> Self {
        Self {
            reference_year,
            scraped_at,
        }
    }

    pub fn now(reference_year: i32) -> Self {
        Self::new(reference_year, chrono::Local::now().naive_local())
    }

    pub fn timestamp(&self) -> String {
        self.scraped_at.format(TIMESTAMP_FORMAT).to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMovieRecord {
    pub position: u32,
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub imdb_external_id: String,
    pub scraped_timestamp: String,
    pub movie_age: i32,
    pub rating_category: RatingCategory,
    pub decade: String,
    pub quality_score: f64,
}

impl NormalizedMovieRecord {
    /// Builds a record from complete fields and derives the computed columns.
    pub fn derive(
        position: u32,
        title: String,
        year: i32,
        rating: f64,
        imdb_external_id: String,
        ctx: &RunContext,
    ) -> Self {
        Self {
            position,
            title,
            year,
            rating,
            imdb_external_id,
            scraped_timestamp: ctx.timestamp(),
            movie_age: (ctx.reference_year - year).max(0),
            rating_category: RatingCategory::from_rating(Some(rating)),
            decade: decade_label(year),
            quality_score: quality_score(rating, year, ctx.reference_year),
        }
    }
}

pub fn decade_label(year: i32) -> String {
    format!("{}s", year.div_euclid(10) * 10)
}

pub fn quality_score(rating: f64, year: i32, reference_year: i32) -> f64 {
    rating * 10.0 + f64::from(reference_year - year) / 10.0
}
