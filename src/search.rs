//! Search state controller.
//!
//! Owns the query text, the search-mode flag, the live result list and the
//! favorites list. Each non-blank query change spawns a fetch-and-parse task;
//! a task only commits its movies if its query is still the current one when
//! it finishes, so a slow response for an old query never replaces the
//! results of a newer one.
//!
//! All four fields are published through `tokio::sync::watch` channels.
//! Writes are grouped under one lock so observers never see a half-applied
//! update.

use crate::api::MovieSearch;
use crate::errors::CatalogError;
use crate::favorites::favorite_movies;
use crate::movie::Movie;
use crate::parser::parse_movies;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::runtime::Handle;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

const EVENT_CAPACITY: usize = 32;

/// Outcome of a fetch-and-parse cycle, published on the event channel
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// Results for `query` replaced the result set
    Committed { query: String, count: usize },
    /// Results for `query` arrived after the query changed and were dropped
    Discarded { query: String },
    /// The cycle for `query` ended without touching the result set
    Failed { query: String, error: CatalogError },
}

/// Consistent view of the controller's published state
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSnapshot {
    pub is_search_mode_active: bool,
    pub query_text: String,
    pub results: Vec<Movie>,
    pub favorites: Vec<Movie>,
}

struct Inner {
    client: Arc<dyn MovieSearch>,
    /// Runtime that fetch cycles are spawned on, whichever thread calls in
    runtime: Option<Handle>,
    search_mode: watch::Sender<bool>,
    query: watch::Sender<String>,
    results: watch::Sender<Vec<Movie>>,
    favorites: watch::Sender<Vec<Movie>>,
    events: broadcast::Sender<SearchEvent>,
    /// Serialises every state write and snapshot
    write_lock: Mutex<()>,
}

#[derive(Clone)]
pub struct SearchController {
    inner: Arc<Inner>,
}

/// Wait for a cycle started by [`SearchController::on_query_text_changed`].
///
/// A panicked or aborted cycle surfaces as [`CatalogError::Task`].
pub async fn wait_for_cycle(handle: Option<JoinHandle<()>>) -> Result<(), CatalogError> {
    if let Some(handle) = handle {
        handle.await?;
    }
    Ok(())
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

impl SearchController {
    /// Controller with the compiled-in favorites.
    ///
    /// Fetch cycles run on the runtime that is current at construction.
    pub fn new(client: Arc<dyn MovieSearch>) -> Self {
        Self::with_favorites(client, favorite_movies())
    }

    pub fn with_favorites(client: Arc<dyn MovieSearch>, favorites: Vec<Movie>) -> Self {
        Self::build(client, favorites, Handle::try_current().ok())
    }

    /// Controller whose fetch cycles run on `runtime`
    pub fn with_runtime(client: Arc<dyn MovieSearch>, runtime: Handle) -> Self {
        Self::build(client, favorite_movies(), Some(runtime))
    }

    fn build(client: Arc<dyn MovieSearch>, favorites: Vec<Movie>, runtime: Option<Handle>) -> Self {
        let (search_mode, _) = watch::channel(false);
        let (query, _) = watch::channel(String::new());
        let (results, _) = watch::channel(Vec::new());
        let (favorites, _) = watch::channel(favorites);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            inner: Arc::new(Inner {
                client,
                runtime,
                search_mode,
                query,
                results,
                favorites,
                events,
                write_lock: Mutex::new(()),
            }),
        }
    }

    /// Set the query text and, for non-blank text, start a fetch cycle.
    ///
    /// Blank text clears the results immediately and returns `None`. Safe to
    /// call from any thread; without a runtime to spawn on, the cycle is
    /// reported as failed and `None` is returned.
    pub fn on_query_text_changed(&self, text: impl Into<String>) -> Option<JoinHandle<()>> {
        let text = text.into();
        {
            let _guard = self.inner.lock();
            self.inner.set_query(text.clone());
            if is_blank(&text) {
                self.inner.clear_results();
                return None;
            }
        }

        let runtime = match self.inner.runtime.clone().or_else(|| Handle::try_current().ok()) {
            Some(runtime) => runtime,
            None => {
                self.inner.report_failure(
                    text,
                    CatalogError::Config("no async runtime available for search".to_string()),
                );
                return None;
            }
        };

        tracing::debug!(query = %text, "starting search");
        let inner = Arc::clone(&self.inner);
        Some(runtime.spawn(async move { inner.run_cycle(text).await }))
    }

    /// Flip search mode. Leaving search mode clears the query and results.
    pub fn toggle_search_mode(&self) -> bool {
        let _guard = self.inner.lock();
        let active = !*self.inner.search_mode.borrow();
        self.inner.search_mode.send_replace(active);
        if !active {
            self.inner.set_query(String::new());
            self.inner.clear_results();
        }
        tracing::debug!(active, "search mode toggled");
        active
    }

    pub fn is_search_mode_active(&self) -> bool {
        *self.inner.search_mode.borrow()
    }

    pub fn query_text(&self) -> String {
        self.inner.query.borrow().clone()
    }

    pub fn results(&self) -> Vec<Movie> {
        self.inner.results.borrow().clone()
    }

    pub fn favorites(&self) -> Vec<Movie> {
        self.inner.favorites.borrow().clone()
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        let _guard = self.inner.lock();
        SearchSnapshot {
            is_search_mode_active: *self.inner.search_mode.borrow(),
            query_text: self.inner.query.borrow().clone(),
            results: self.inner.results.borrow().clone(),
            favorites: self.inner.favorites.borrow().clone(),
        }
    }

    /// Look up a movie by id, results first, then favorites
    pub fn find_movie(&self, id: i64) -> Option<Movie> {
        let in_results = self.inner.results.borrow().iter().find(|m| m.id == id).cloned();
        in_results.or_else(|| self.inner.favorites.borrow().iter().find(|m| m.id == id).cloned())
    }

    pub fn subscribe_search_mode(&self) -> watch::Receiver<bool> {
        self.inner.search_mode.subscribe()
    }

    pub fn subscribe_query(&self) -> watch::Receiver<String> {
        self.inner.query.subscribe()
    }

    pub fn subscribe_results(&self) -> watch::Receiver<Vec<Movie>> {
        self.inner.results.subscribe()
    }

    pub fn subscribe_favorites(&self) -> watch::Receiver<Vec<Movie>> {
        self.inner.favorites.subscribe()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SearchEvent> {
        self.inner.events.subscribe()
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn set_query(&self, text: String) {
        self.query.send_if_modified(|current| {
            if *current == text {
                false
            } else {
                *current = text;
                true
            }
        });
    }

    fn clear_results(&self) {
        self.results.send_if_modified(|results| {
            if results.is_empty() {
                false
            } else {
                results.clear();
                true
            }
        });
    }

    async fn run_cycle(&self, query: String) {
        match self.fetch_and_parse(&query).await {
            Ok(movies) => self.commit(query, movies),
            Err(error) => self.report_failure(query, error),
        }
    }

    async fn fetch_and_parse(&self, query: &str) -> Result<Vec<Movie>, CatalogError> {
        let body = self.client.search(query).await?;
        if body.trim().is_empty() {
            return Err(CatalogError::EmptyResponse);
        }

        tokio::task::spawn_blocking(move || parse_movies(&body))
            .await
            .map_err(|e| CatalogError::Parse {
                reason: format!("parser task failed: {}", e),
            })?
    }

    /// Staleness guard: only the current query may replace the results
    fn commit(&self, query: String, movies: Vec<Movie>) {
        let event = {
            let _guard = self.lock();
            if *self.query.borrow() != query {
                tracing::debug!(query = %query, "discarding stale results");
                SearchEvent::Discarded { query }
            } else {
                let count = movies.len();
                self.results.send_replace(movies);
                tracing::debug!(query = %query, count, "results committed");
                SearchEvent::Committed { query, count }
            }
        };
        let _ = self.events.send(event);
    }

    fn report_failure(&self, query: String, error: CatalogError) {
        if error.is_fatal() {
            tracing::warn!(query = %query, "search failed: {}", error);
        } else {
            tracing::info!(query = %query, "search returned no data: {}", error);
        }
        let _ = self.events.send(SearchEvent::Failed { query, error });
    }
}
