pub mod api;
pub mod config;
pub mod errors;
pub mod favorites;
pub mod logging;
pub mod movie;
pub mod parser;
pub mod search;

pub use api::{MovieSearch, TmdbClient};
pub use errors::CatalogError;
pub use movie::Movie;
pub use search::{wait_for_cycle, SearchController, SearchEvent, SearchSnapshot};
