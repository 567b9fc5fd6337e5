//! Chart extraction strategies
//!
//! Each module recovers movie records from one representation of the chart
//! page. The strategies run in priority order over a single parsed document
//! and the first one that reaches the minimum yield wins.

mod css_extractor;
mod js_extractor;
mod jsonld_extractor;

pub use css_extractor::*;
pub use js_extractor::*;
pub use jsonld_extractor::*;

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

use crate::config::Limits;
use crate::record::RawMovieRecord;

/// Pure extraction function over a parsed chart page.
pub type ExtractFn = fn(&Html, &Limits) -> Vec<RawMovieRecord>;

#[derive(Debug, Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    pub extract: ExtractFn,
}

/// Structured data first, then loose script patterns, then the rendered table.
pub const DEFAULT_STRATEGIES: [Strategy; 3] = [
    Strategy {
        name: "jsonld",
        extract: extract_jsonld_movies,
    },
    Strategy {
        name: "script-patterns",
        extract: extract_script_movies,
    },
    Strategy {
        name: "table",
        extract: extract_table_movies,
    },
];

/// Outcome of running the strategy chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Strategy whose records were kept, `None` when nothing was found.
    pub strategy: Option<&'static str>,
    pub records: Vec<RawMovieRecord>,
    /// Whether the kept yield reached `min_movies`.
    pub accepted: bool,
}

/// Parse `html` once and run the default strategy chain over it.
pub fn extract_movies(html: &str, limits: &Limits) -> Extraction {
    let document = Html::parse_document(html);
    run_strategies(&document, limits, &DEFAULT_STRATEGIES)
}

/// Try each strategy in order and keep the first whose yield meets
/// `limits.min_movies`. When none does, the largest yield is kept
/// (earliest strategy on ties) so partial data still reaches the normalizer.
pub fn run_strategies(document: &Html, limits: &Limits, strategies: &[Strategy]) -> Extraction {
    let mut best = Extraction::default();

    for strategy in strategies {
        let mut records = (strategy.extract)(document, limits);
        records.truncate(limits.target_count);
        tracing::debug!(strategy = strategy.name, count = records.len(), "strategy finished");

        if records.len() >= limits.min_movies {
            tracing::info!(strategy = strategy.name, count = records.len(), "extraction accepted");
            return Extraction {
                strategy: Some(strategy.name),
                records,
                accepted: true,
            };
        }

        if records.len() > best.records.len() {
            best = Extraction {
                strategy: Some(strategy.name),
                records,
                accepted: false,
            };
        }
    }

    tracing::warn!(
        strategy = best.strategy.unwrap_or("none"),
        count = best.records.len(),
        min = limits.min_movies,
        "no strategy reached the minimum yield"
    );
    best
}

static TITLE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/title/(tt\d+)/").expect("title id pattern"));
static YEAR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}").expect("year pattern"));

/// Pull the `tt…` identifier out of a `/title/<id>/` path.
pub fn title_id(url: &str) -> Option<String> {
    TITLE_ID
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// First run of four digits in `text`.
pub fn first_year(text: &str) -> Option<&str> {
    YEAR_RUN.find(text).map(|m| m.as_str())
}
