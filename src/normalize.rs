//! Turns raw extractor output into complete, derived movie records.

use rand::Rng;

use crate::config::Limits;
use crate::extractors::first_year;
use crate::record::{NormalizedMovieRecord, RawMovieRecord, RunContext};
use crate::synthetic;

/// Earliest year a chart entry can plausibly carry.
pub const EARLIEST_FILM_YEAR: i32 = 1888;

/// Normalize one extraction pass.
///
/// An empty pass is replaced wholesale by the synthetic dataset. Otherwise
/// records are sorted by position, duplicate positions dropped (first wins),
/// renumbered from 1 and capped at `limits.target_count`. Missing ratings
/// are filled from rank, missing years drawn from `rng`.
pub fn normalize<R: Rng + ?Sized>(
    raw: Vec<RawMovieRecord>,
    ctx: &RunContext,
    limits: &Limits,
    rng: &mut R,
) -> Vec<NormalizedMovieRecord> {
    if raw.is_empty() {
        tracing::warn!("no movies extracted, using synthetic dataset");
        return synthetic::generate(ctx, limits.target_count, rng);
    }

    let mut raw = raw;
    raw.sort_by_key(|m| m.position);
    raw.dedup_by_key(|m| m.position);
    raw.truncate(limits.target_count);

    let mut filled_ratings = 0usize;
    let mut filled_years = 0usize;
    let mut movies = Vec::with_capacity(raw.len());

    for (idx, movie) in raw.into_iter().enumerate() {
        let rank = idx as u32 + 1;

        let rating = match movie.rating.as_deref().and_then(parse_rating) {
            Some(r) => r,
            None => {
                filled_ratings += 1;
                fill_rating(rank)
            }
        };

        let year = match movie.year.as_deref().and_then(parse_year) {
            Some(y) => y,
            None => {
                filled_years += 1;
                fill_year(rank, rng)
            }
        };

        movies.push(NormalizedMovieRecord::derive(
            rank,
            movie.title.trim().to_string(),
            year,
            rating,
            movie.imdb_external_id,
            ctx,
        ));
    }

    if filled_ratings > 0 {
        tracing::info!("filled {} missing ratings", filled_ratings);
    }
    if filled_years > 0 {
        tracing::info!("filled {} missing years", filled_years);
    }
    tracing::info!("normalized {} movies", movies.len());

    movies
}

/// Rating text to a number in [0, 10]; anything else is unknown.
pub fn parse_rating(text: &str) -> Option<f64> {
    let rating: f64 = text.trim().parse().ok()?;
    (rating.is_finite() && (0.0..=10.0).contains(&rating)).then_some(rating)
}

/// First four-digit run, if it is a plausible film year.
pub fn parse_year(text: &str) -> Option<i32> {
    let year: i32 = first_year(text)?.parse().ok()?;
    (year >= EARLIEST_FILM_YEAR).then_some(year)
}

/// Rank-based rating estimate, rounded to one decimal.
pub fn fill_rating(rank: u32) -> f64 {
    let r = f64::from(rank);
    let rating = if rank <= 10 {
        9.5 - r * 0.05
    } else if rank <= 50 {
        8.5 - (r - 10.0) * 0.01
    } else if rank <= 100 {
        8.0 - (r - 50.0) * 0.005
    } else {
        7.5 - (r - 100.0) * 0.002
    };
    round1(rating)
}

/// Uniform year draw; higher ranks get a narrower, later range.
pub fn fill_year<R: Rng + ?Sized>(rank: u32, rng: &mut R) -> i32 {
    if rank <= 50 {
        rng.random_range(1950..2020)
    } else {
        rng.random_range(1920..2024)
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
