//! JSON-LD extraction from the chart page
//!
//! Reads <script type="application/ld+json"> blocks and walks any
//! `ItemList` they declare. Supports @graph arrays and multiple blocks.

use scraper::{Html, Selector};
use serde_json::Value;

use super::{first_year, title_id};
use crate::config::Limits;
use crate::record::RawMovieRecord;

/// Extract movies from every JSON-LD `ItemList` on the page
pub fn extract_jsonld_movies(document: &Html, limits: &Limits) -> Vec<RawMovieRecord> {
    let selector = match Selector::parse(r#"script[type="application/ld+json"]"#) {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut movies = Vec::new();

    for element in document.select(&selector) {
        let content = element.text().collect::<String>();
        let trimmed = content.trim();

        if trimmed.is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(trimmed) {
            Ok(json) => collect_item_lists(&json, &mut movies),
            Err(e) => tracing::debug!("skipping unparseable JSON-LD block: {}", e),
        }
    }

    movies.truncate(limits.target_count);
    movies
}

fn collect_item_lists(value: &Value, movies: &mut Vec<RawMovieRecord>) {
    match value {
        Value::Array(arr) => {
            for item in arr {
                collect_item_lists(item, movies);
            }
        }
        Value::Object(obj) => {
            if let Some(Value::Array(graph)) = obj.get("@graph") {
                for item in graph {
                    collect_item_lists(item, movies);
                }
            }

            if !is_item_list(value) {
                return;
            }

            let Some(Value::Array(elements)) = obj.get("itemListElement") else {
                return;
            };

            for element in elements {
                let fallback = movies.len() as u32 + 1;
                if let Some(movie) = parse_list_element(element, fallback) {
                    movies.push(movie);
                }
            }
        }
        _ => {}
    }
}

fn is_item_list(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(s)) => s == "ItemList",
        Some(Value::Array(arr)) => arr.iter().any(|v| v.as_str() == Some("ItemList")),
        _ => false,
    }
}

/// One `ListItem` wrapping a movie in `item`
fn parse_list_element(element: &Value, fallback_position: u32) -> Option<RawMovieRecord> {
    let item = element.get("item")?;
    if !item.is_object() {
        return None;
    }

    let title = item.get("name")?.as_str()?;
    if title.trim().is_empty() {
        return None;
    }

    let position = element
        .get("position")
        .and_then(position_value)
        .unwrap_or(fallback_position);

    let mut movie = RawMovieRecord::new(position, title);

    if let Some(year) = item
        .get("datePublished")
        .and_then(Value::as_str)
        .and_then(first_year)
    {
        movie.year = Some(year.to_string());
    }

    movie.rating = item
        .get("aggregateRating")
        .and_then(|r| r.get("ratingValue"))
        .and_then(scalar_text);

    if let Some(id) = item.get("url").and_then(Value::as_str).and_then(title_id) {
        movie.imdb_external_id = id;
    }

    Some(movie)
}

fn position_value(value: &Value) -> Option<u32> {
    let position = match value {
        Value::Number(n) => u32::try_from(n.as_u64()?).ok()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    (position > 0).then_some(position)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> Vec<RawMovieRecord> {
        extract_jsonld_movies(&Html::parse_document(html), &Limits::default())
    }

    #[test]
    fn test_extract_shawshank() {
        let html = r#"
        <html>
        <head>
            <script type="application/ld+json">
            {
                "@context": "https://schema.org",
                "@type": "ItemList",
                "itemListElement": [
                    {
                        "@type": "ListItem",
                        "position": 1,
                        "item": {
                            "@type": "Movie",
                            "url": "https://www.imdb.com/title/tt0111161/",
                            "name": "The Shawshank Redemption",
                            "datePublished": "1994-09-23",
                            "aggregateRating": {"@type": "AggregateRating", "ratingValue": 9.3}
                        }
                    }
                ]
            }
            </script>
        </head>
        </html>
        "#;

        let movies = extract(html);
        assert_eq!(movies.len(), 1);
        assert_eq!(
            movies[0],
            RawMovieRecord::new(1, "The Shawshank Redemption")
                .with_year("1994")
                .with_rating("9.3")
                .with_id("tt0111161")
        );
    }

    #[test]
    fn test_missing_fields_and_positions() {
        let html = r#"
        <script type="application/ld+json">
        {
            "@type": "ItemList",
            "itemListElement": [
                {"item": {"name": "First"}},
                {"item": {"url": "/title/tt0000002/"}},
                {"position": "7", "item": {"name": "Seventh", "aggregateRating": {"ratingValue": "8.1"}}},
                "not an object",
                {"item": {"name": "Fourth", "datePublished": "unknown"}}
            ]
        }
        </script>
        "#;

        let movies = extract(html);
        assert_eq!(movies.len(), 3);
        assert_eq!(movies[0], RawMovieRecord::new(1, "First"));
        assert_eq!(movies[1], RawMovieRecord::new(7, "Seventh").with_rating("8.1"));
        assert_eq!(movies[2].position, 3);
        assert_eq!(movies[2].year, None);
    }

    #[test]
    fn test_graph_and_other_types() {
        let html = r#"
        <script type="application/ld+json">
        {"@type": "Organization", "name": "IMDb"}
        </script>
        <script type="application/ld+json">{ this is not json }</script>
        <script type="application/ld+json">
        {
            "@context": "https://schema.org",
            "@graph": [
                {"@type": "WebPage", "name": "Top 250"},
                {"@type": ["ItemList"], "itemListElement": [
                    {"position": 2, "item": {"name": "The Godfather", "datePublished": "1972-03-24"}}
                ]}
            ]
        }
        </script>
        "#;

        let movies = extract(html);
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "The Godfather");
        assert_eq!(movies[0].position, 2);
        assert_eq!(movies[0].year.as_deref(), Some("1972"));
    }
}
