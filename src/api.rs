use crate::config::AppConfig;
use crate::errors::CatalogError;
use async_trait::async_trait;
use std::time::Duration;

/// Remote text search against the movie catalog.
///
/// Implementations return the raw response body; an empty body is a valid
/// success and is left for the caller to interpret.
#[async_trait]
pub trait MovieSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<String, CatalogError>;
}

const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client, CatalogError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| CatalogError::Config(format!("HTTP client setup failed: {}", e)))
}

#[derive(Debug, Clone)]
pub struct TmdbClient {
    pub base_url: String,
    pub language: String,
    pub include_adult: bool,
    access_token: String,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(base_url: String, access_token: String) -> Result<Self, CatalogError> {
        let base_url = if base_url.ends_with('/') {
            base_url[..base_url.len() - 1].to_string()
        } else {
            base_url
        };

        let client = build_http_client(DEFAULT_TIMEOUT_SECS)?;

        Ok(Self {
            base_url,
            language: "en-US".to_string(),
            include_adult: true,
            access_token,
            client,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        let token = config.require_token()?.to_string();
        let client = build_http_client(config.request_timeout_secs)?;

        let mut tmdb = Self::new(config.api_base_url.clone(), token)?.with_http_client(client);
        tmdb.language = config.language.clone();
        tmdb.include_adult = config.include_adult;
        Ok(tmdb)
    }

    /// Swap in a preconfigured HTTP client (proxy, TLS or timeout settings)
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn search_url(&self) -> String {
        format!("{}/search/movie", self.base_url)
    }
}

#[async_trait]
impl MovieSearch for TmdbClient {
    async fn search(&self, query: &str) -> Result<String, CatalogError> {
        let include_adult = if self.include_adult { "true" } else { "false" };
        let resp = self
            .client
            .get(self.search_url())
            .query(&[
                ("query", query),
                ("include_adult", include_adult),
                ("language", self.language.as_str()),
                ("page", "1"),
            ])
            .header(reqwest::header::ACCEPT, "application/json")
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| CatalogError::Network {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Network {
                status: Some(status.as_u16()),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unsuccessful response")
                    .to_string(),
            });
        }

        resp.text().await.map_err(|e| CatalogError::Network {
            status: Some(status.as_u16()),
            message: format!("Failed to read body: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = TmdbClient::new("https://api.themoviedb.org/3/".to_string(), "t".to_string()).unwrap();
        assert_eq!(client.search_url(), "https://api.themoviedb.org/3/search/movie");
    }

    #[test]
    fn test_from_config_requires_token() {
        let err = TmdbClient::from_config(&AppConfig::default()).unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));
    }

    #[test]
    fn test_from_config_copies_query_settings() {
        let config = AppConfig {
            access_token: Some("token".to_string()),
            language: "fr-FR".to_string(),
            include_adult: false,
            ..Default::default()
        };
        let client = TmdbClient::from_config(&config).unwrap();
        assert_eq!(client.language, "fr-FR");
        assert!(!client.include_adult);
    }
}
