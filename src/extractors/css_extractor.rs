//! CSS selector-based extraction of the rendered chart table
//!
//! Last resort when neither JSON-LD nor script text yields enough movies.

use scraper::{ElementRef, Html, Selector};

use super::title_id;
use crate::config::Limits;
use crate::record::RawMovieRecord;

const TABLE_SELECTOR: &str = r#"table[data-caller-name="chart-top250movie"]"#;
const ALT_TABLE_SELECTOR: &str = "tbody.lister-list";

struct TableSelectors {
    table: Selector,
    alt_table: Selector,
    row: Selector,
    title_cell: Selector,
    rating_cell: Selector,
    link: Selector,
    year: Selector,
    rating: Selector,
}

impl TableSelectors {
    fn new() -> Option<Self> {
        Some(Self {
            table: Selector::parse(TABLE_SELECTOR).ok()?,
            alt_table: Selector::parse(ALT_TABLE_SELECTOR).ok()?,
            row: Selector::parse("tr").ok()?,
            title_cell: Selector::parse("td.titleColumn").ok()?,
            rating_cell: Selector::parse("td.ratingColumn").ok()?,
            link: Selector::parse("a").ok()?,
            year: Selector::parse("span.secondaryInfo").ok()?,
            rating: Selector::parse("strong").ok()?,
        })
    }
}

/// Extract movies from the chart table rows
pub fn extract_table_movies(document: &Html, limits: &Limits) -> Vec<RawMovieRecord> {
    let Some(sel) = TableSelectors::new() else {
        return Vec::new();
    };

    let table = document
        .select(&sel.table)
        .next()
        .or_else(|| document.select(&sel.alt_table).next());

    let Some(table) = table else {
        tracing::debug!("no chart table found");
        return Vec::new();
    };

    let mut movies = Vec::new();

    for row in table.select(&sel.row) {
        if movies.len() >= limits.target_count {
            break;
        }
        if let Some(movie) = parse_row(&sel, row, movies.len() as u32 + 1) {
            movies.push(movie);
        }
    }

    movies
}

fn parse_row(sel: &TableSelectors, row: ElementRef<'_>, fallback_position: u32) -> Option<RawMovieRecord> {
    let title_cell = row.select(&sel.title_cell).next()?;
    let rating_cell = row.select(&sel.rating_cell).next()?;

    let link = title_cell.select(&sel.link).next();
    let title = link.map(|a| element_text(&a)).unwrap_or_default();
    if title.is_empty() {
        return None;
    }

    let mut movie = RawMovieRecord::new(leading_rank(&title_cell).unwrap_or(fallback_position), title);

    movie.year = title_cell
        .select(&sel.year)
        .next()
        .map(|span| element_text(&span).trim_matches(|c| c == '(' || c == ')').to_string());

    movie.rating = rating_cell.select(&sel.rating).next().map(|s| element_text(&s));

    if let Some(id) = link.and_then(|a| a.value().attr("href")).and_then(title_id) {
        movie.imdb_external_id = id;
    }

    Some(movie)
}

fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Numeral before the first period of the cell's whitespace-stripped text
fn leading_rank(cell: &ElementRef<'_>) -> Option<u32> {
    let stripped: String = cell.text().map(str::trim).collect();
    let head = stripped.split('.').next()?;
    if head.is_empty() || !head.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    head.parse().ok().filter(|&p| p > 0)
}
