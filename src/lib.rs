//! IMDb Top 250 scraper
//!
//! Fetches the chart page and recovers movies from it with an ordered chain
//! of extractors:
//! - JSON-LD `ItemList` blocks
//! - Regex patterns over raw script text
//! - The rendered chart table (CSS selectors)
//!
//! Results are normalized into exactly 250 complete records (falling back
//! to a synthetic dataset when scraping under-delivers) and written as two
//! CSV projections.

pub mod config;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod normalize;
pub mod persist;
pub mod pipeline;
pub mod record;
pub mod summary;
pub mod synthetic;

pub use config::{Limits, PipelineConfig};
pub use error::{Result, ScrapeError};
pub use extractors::{extract_movies, Extraction, Strategy, DEFAULT_STRATEGIES};
pub use fetch::{ChartSource, HttpFetcher};
pub use pipeline::{Pipeline, PipelineOutput};
pub use record::{NormalizedMovieRecord, RatingCategory, RawMovieRecord, RunContext};
pub use summary::DatasetSummary;
