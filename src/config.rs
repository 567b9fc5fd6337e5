//! Pipeline configuration and the named thresholds every stage receives.

use std::path::PathBuf;
use std::time::Duration;

use chrono::Datelike;

pub const CHART_URL: &str = "https://www.imdb.com/chart/top/";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
pub const FETCH_TIMEOUT_SECS: u64 = 10;

/// Minimum yield for an extraction strategy to be accepted.
pub const MIN_MOVIES: usize = 50;
/// Size of the chart and of every dataset the pipeline emits.
pub const TARGET_COUNT: usize = 250;

pub const BASIC_FILE_NAME: &str = "imdb_clean_basic.csv";
pub const CUSTOM_FILE_NAME: &str = "imdb_clean_custom.csv";

/// Yield thresholds shared by the extractors, normalizer and persister.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub min_movies: usize,
    pub target_count: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            min_movies: MIN_MOVIES,
            target_count: TARGET_COUNT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub chart_url: String,
    pub user_agent: String,
    pub accept_language: String,
    pub timeout: Duration,
    pub limits: Limits,
    /// Year that `movie_age` and `quality_score` are measured against.
    pub reference_year: i32,
    pub output_dir: PathBuf,
    pub basic_file_name: String,
    pub custom_file_name: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chart_url: CHART_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            accept_language: ACCEPT_LANGUAGE.to_string(),
            timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
            limits: Limits::default(),
            reference_year: chrono::Local::now().year(),
            output_dir: PathBuf::from("."),
            basic_file_name: BASIC_FILE_NAME.to_string(),
            custom_file_name: CUSTOM_FILE_NAME.to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = year;
        self
    }

    pub fn basic_path(&self) -> PathBuf {
        self.output_dir.join(&self.basic_file_name)
    }

    pub fn custom_path(&self) -> PathBuf {
        self.output_dir.join(&self.custom_file_name)
    }
}
