//! Fetch → extract → normalize → complete → persist.

use rand::Rng;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::extractors::{extract_movies, Extraction};
use crate::fetch::{fetch_or_none, ChartSource, HttpFetcher};
use crate::normalize::normalize;
use crate::persist::{ensure_complete, write_datasets, WrittenFiles};
use crate::record::{NormalizedMovieRecord, RunContext};

pub struct Pipeline<S = HttpFetcher> {
    config: PipelineConfig,
    source: S,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Strategy that produced the scraped records, `None` when the data is synthetic.
    pub strategy: Option<&'static str>,
    pub movies: Vec<NormalizedMovieRecord>,
    pub files: WrittenFiles,
}

impl Pipeline<HttpFetcher> {
    pub fn new(config: PipelineConfig) -> Self {
        let source = HttpFetcher::from_config(&config);
        Self { config, source }
    }
}

impl<S: ChartSource> Pipeline<S> {
    pub fn with_source(config: PipelineConfig, source: S) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fetch the chart and run the extraction strategies over it.
    /// A failed fetch is an empty extraction.
    pub fn acquire(&self) -> Extraction {
        tracing::info!("fetching chart from {}", self.config.chart_url);
        match fetch_or_none(&self.source, &self.config.chart_url) {
            Some(html) => extract_movies(&html, &self.config.limits),
            None => Extraction::default(),
        }
    }

    /// Acquire and normalize, always returning exactly `target_count` records.
    pub fn build_dataset<R: Rng + ?Sized>(
        &self,
        ctx: &RunContext,
        rng: &mut R,
    ) -> (Option<&'static str>, Vec<NormalizedMovieRecord>) {
        let limits = &self.config.limits;
        let extraction = self.acquire();

        let movies = normalize(extraction.records, ctx, limits, rng);
        // under-count is replaced wholesale, so scraped data survives only at full size
        let kept = movies.len() >= limits.target_count;
        let movies = ensure_complete(movies, ctx, limits, rng);

        let strategy = extraction.strategy.filter(|_| kept);
        (strategy, movies)
    }

    /// Run the whole pipeline and write both CSV files.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PipelineOutput> {
        let ctx = RunContext::now(self.config.reference_year);
        let (strategy, movies) = self.build_dataset(&ctx, rng);
        let files = write_datasets(&movies, &self.config)?;

        Ok(PipelineOutput {
            strategy,
            movies,
            files,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;
    use crate::synthetic;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Status(u16);

    impl ChartSource for Status {
        fn fetch(&self, _url: &str) -> Result<String> {
            Err(ScrapeError::HttpStatus(self.0))
        }
    }

    struct Page(String);

    impl ChartSource for Page {
        fn fetch(&self, _url: &str) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    fn ctx() -> RunContext {
        let at = NaiveDate::from_ymd_opt(2024, 7, 4)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        RunContext::new(2024, at)
    }

    fn config() -> PipelineConfig {
        PipelineConfig::default().with_reference_year(2024)
    }

    fn jsonld_chart(count: u32) -> String {
        jsonld_chart_at(1..=count)
    }

    fn jsonld_chart_at(positions: impl IntoIterator<Item = u32>) -> String {
        let items: Vec<String> = positions
            .into_iter()
            .map(|p| {
                format!(
                    r#"{{"@type":"ListItem","position":{p},"item":{{"@type":"Movie","url":"https://www.imdb.com/title/tt{:07}/","name":"Film {p}","datePublished":"{}-01-01","aggregateRating":{{"ratingValue":8.{}}}}}}}"#,
                    p,
                    1950 + p % 70,
                    p % 10
                )
            })
            .collect();
        format!(
            r#"<html><head><script type="application/ld+json">{{"@type":"ItemList","itemListElement":[{}]}}</script></head><body></body></html>"#,
            items.join(",")
        )
    }

    #[test]
    fn http_404_yields_synthetic_dataset() {
        let pipeline = Pipeline::with_source(config(), Status(404));

        let (strategy, movies) = pipeline.build_dataset(&ctx(), &mut StdRng::seed_from_u64(17));
        let expected = synthetic::generate(&ctx(), 250, &mut StdRng::seed_from_u64(17));

        assert_eq!(strategy, None);
        assert_eq!(movies, expected);
    }

    #[test]
    fn full_chart_is_kept() {
        let pipeline = Pipeline::with_source(config(), Page(jsonld_chart(250)));

        let (strategy, movies) = pipeline.build_dataset(&ctx(), &mut StdRng::seed_from_u64(1));

        assert_eq!(strategy, Some("jsonld"));
        assert_eq!(movies.len(), 250);
        assert_eq!(movies[0].title, "Film 1");
        assert_eq!(movies[0].imdb_external_id, "tt0000001");
        assert_eq!(movies[0].year, 1951);
        assert_eq!(movies[0].rating, 8.1);
        assert_eq!(movies[249].position, 250);
    }

    #[test]
    fn duplicate_positions_fall_back_to_synthetic() {
        // 250 items, but only 125 distinct positions survive deduplication
        let positions = (1..=250u32).map(|p| if p % 2 == 0 { p - 1 } else { p });
        let pipeline = Pipeline::with_source(config(), Page(jsonld_chart_at(positions)));

        let (strategy, movies) = pipeline.build_dataset(&ctx(), &mut StdRng::seed_from_u64(9));

        assert_eq!(strategy, None);
        assert_eq!(movies.len(), 250);
        assert_eq!(movies[0].title, "The Shawshank Redemption");
    }

    #[test]
    fn short_chart_is_replaced() {
        let pipeline = Pipeline::with_source(config(), Page(jsonld_chart(60)));

        let (strategy, movies) = pipeline.build_dataset(&ctx(), &mut StdRng::seed_from_u64(2));

        assert_eq!(strategy, None);
        assert_eq!(movies.len(), 250);
        assert_eq!(movies[0].title, "The Shawshank Redemption");
    }

    #[test]
    fn output_invariants_hold() {
        for source in [jsonld_chart(250), jsonld_chart(10), String::new()] {
            let pipeline = Pipeline::with_source(config(), Page(source));
            let (_, movies) = pipeline.build_dataset(&ctx(), &mut StdRng::seed_from_u64(5));

            assert_eq!(movies.len(), 250);
            for (idx, movie) in movies.iter().enumerate() {
                assert_eq!(movie.position, idx as u32 + 1);
                assert!((0.0..=10.0).contains(&movie.rating));
                assert!(movie.year >= 1888);
            }
        }
    }

    #[test]
    fn run_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::with_source(config().with_output_dir(dir.path()), Status(503));

        let output = pipeline.run(&mut StdRng::seed_from_u64(3)).unwrap();

        assert_eq!(output.movies.len(), 250);
        assert!(output.files.basic.exists());
        assert!(output.files.custom.exists());
    }
}
