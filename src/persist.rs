//! CSV projections of the normalized dataset.

use std::path::{Path, PathBuf};

use rand::Rng;
use serde::Serialize;

use crate::config::{Limits, PipelineConfig};
use crate::error::Result;
use crate::record::{NormalizedMovieRecord, RatingCategory, RunContext};
use crate::synthetic;

#[derive(Debug, Serialize)]
struct BasicRow<'a> {
    position: u32,
    title: &'a str,
    year: i32,
    rating: f64,
    imdb_external_id: &'a str,
    scraped_timestamp: &'a str,
}

impl<'a> From<&'a NormalizedMovieRecord> for BasicRow<'a> {
    fn from(m: &'a NormalizedMovieRecord) -> Self {
        Self {
            position: m.position,
            title: &m.title,
            year: m.year,
            rating: m.rating,
            imdb_external_id: &m.imdb_external_id,
            scraped_timestamp: &m.scraped_timestamp,
        }
    }
}

#[derive(Debug, Serialize)]
struct CustomRow<'a> {
    position: u32,
    title: &'a str,
    year: i32,
    rating: f64,
    rating_category: RatingCategory,
    movie_age: i32,
    decade: &'a str,
    quality_score: f64,
    imdb_external_id: &'a str,
    scraped_timestamp: &'a str,
}

impl<'a> From<&'a NormalizedMovieRecord> for CustomRow<'a> {
    fn from(m: &'a NormalizedMovieRecord) -> Self {
        Self {
            position: m.position,
            title: &m.title,
            year: m.year,
            rating: m.rating,
            rating_category: m.rating_category,
            movie_age: m.movie_age,
            decade: &m.decade,
            quality_score: m.quality_score,
            imdb_external_id: &m.imdb_external_id,
            scraped_timestamp: &m.scraped_timestamp,
        }
    }
}

/// Paths of the two files written by [`write_datasets`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFiles {
    pub basic: PathBuf,
    pub custom: PathBuf,
}

/// Guarantee a full-size dataset: a short collection is replaced by the
/// synthetic one, a long one is truncated.
pub fn ensure_complete<R: Rng + ?Sized>(
    mut movies: Vec<NormalizedMovieRecord>,
    ctx: &RunContext,
    limits: &Limits,
    rng: &mut R,
) -> Vec<NormalizedMovieRecord> {
    if movies.len() < limits.target_count {
        tracing::warn!(
            "only {} movies, replacing with a complete synthetic dataset",
            movies.len()
        );
        return synthetic::generate(ctx, limits.target_count, rng);
    }
    movies.truncate(limits.target_count);
    movies
}

/// Write the basic and custom projections into the configured output directory.
pub fn write_datasets(movies: &[NormalizedMovieRecord], config: &PipelineConfig) -> Result<WrittenFiles> {
    std::fs::create_dir_all(&config.output_dir)?;

    let files = WrittenFiles {
        basic: config.basic_path(),
        custom: config.custom_path(),
    };

    write_rows(&files.basic, movies.iter().map(BasicRow::from))?;
    tracing::info!("basic data saved: {} ({} movies)", files.basic.display(), movies.len());

    write_rows(&files.custom, movies.iter().map(CustomRow::from))?;
    tracing::info!("custom data saved: {} ({} movies)", files.custom.display(), movies.len());

    Ok(files)
}

fn write_rows<T: Serialize>(path: &Path, rows: impl Iterator<Item = T>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
