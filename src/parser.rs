//! Search response parsing.
//!
//! Turns the raw body of a `/search/movie` response into [`Movie`] values.
//! Every schema assumption about the remote payload lives here.

use crate::errors::CatalogError;
use crate::movie::Movie;
use serde::{Deserialize, Deserializer};

/// Envelope of a search response. Paging keys are ignored.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<MovieEntry>,
}

/// One element of `results`, with the remote field names
#[derive(Debug, Deserialize)]
struct MovieEntry {
    id: i64,
    #[serde(default, deserialize_with = "deserialize_lenient_text")]
    title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_text")]
    original_language: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_text")]
    overview: Option<String>,
    popularity: f64,
    #[serde(default, deserialize_with = "deserialize_lenient_text")]
    poster_path: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_text")]
    release_date: Option<String>,
    vote_average: f64,
    vote_count: u64,
}

impl From<MovieEntry> for Movie {
    fn from(entry: MovieEntry) -> Self {
        Movie {
            id: entry.id,
            title: entry.title,
            original_language: entry.original_language,
            overview: entry.overview,
            popularity: entry.popularity,
            poster_path: entry.poster_path,
            release_date: entry.release_date,
            vote_average: entry.vote_average,
            vote_count: entry.vote_count,
        }
    }
}

/// Accepts any JSON value; only strings survive, everything else is `None`
fn deserialize_lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Parse a search response body into movies, preserving the order of `results`.
pub fn parse_movies(body: &str) -> Result<Vec<Movie>, CatalogError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.results.into_iter().map(Movie::from).collect())
}
