use serde::{Deserialize, Serialize};
use std::fmt;

/// One catalog entry.
///
/// Absent text fields stay `None`; an empty string means the source sent an
/// empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: Option<String>,
    pub original_language: Option<String>,
    pub overview: Option<String>,
    pub popularity: f64,
    /// Relative image path, e.g. `/ym7Kst6a4uodryxqbGOxmewF235.jpg`
    pub poster_path: Option<String>,
    /// Free-form date string, not validated
    pub release_date: Option<String>,
    pub vote_average: f64,
    pub vote_count: u64,
}

impl Movie {
    /// Full poster URL for the given image base, if the movie has a poster
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| format!("{}{}", image_base_url.trim_end_matches('/'), path))
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(untitled)")
    }

    pub fn share_subject(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Plain-text block handed to a share target
    pub fn share_message(&self) -> String {
        format!(
            "Title: {}\nLanguage: {}\nOverview: {}\nRelease Date: {}\nVote Average: {}\nVote Count: {}",
            or_null(&self.title),
            or_null(&self.original_language),
            or_null(&self.overview),
            or_null(&self.release_date),
            self.vote_average,
            self.vote_count
        )
    }
}

fn or_null(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("null")
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_title())?;
        if let Some(date) = &self.release_date {
            write!(f, " ({})", date)?;
        }
        write!(f, " ★ {:.1} [{} votes]", self.vote_average, self.vote_count)
    }
}
