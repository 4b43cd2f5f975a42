use std::sync::Arc;

use anyhow::anyhow;
use tokio::io::{AsyncBufReadExt, BufReader};

use movie_catalog_lib::config::{AppConfig, TOKEN_ENV_VAR};
use movie_catalog_lib::favorites::favorite_movies;
use movie_catalog_lib::logging::init_tracing;
use movie_catalog_lib::search::wait_for_cycle;
use movie_catalog_lib::{Movie, SearchController, SearchEvent, TmdbClient};

#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Search the catalog once and print the results
    #[arg(short, long)]
    query: Option<String>,

    /// Print the favorites list
    #[arg(long)]
    favorites: bool,

    /// Print the share message for a movie id (favorites, or results of --query)
    #[arg(long)]
    share: Option<i64>,

    /// Read queries from stdin, one per line ("/toggle" flips search mode)
    #[arg(short, long)]
    interactive: bool,

    /// Check configuration and exit
    #[arg(long)]
    check: bool,

    /// Trace level, e.g. "debug" (RUST_LOG takes precedence)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    use clap::Parser;
    let args = Args::parse();

    let config = AppConfig::load()?;
    init_tracing(args.log_level.as_deref().or(config.trace_level.as_deref()));

    if args.check {
        match AppConfig::config_path() {
            Some(path) => println!("Config file: {}", path.display()),
            None => println!("Config file: (no config directory available)"),
        }
        println!("API base URL: {}", config.api_base_url);
        if config.has_token() {
            println!("Access token: configured");
        } else {
            println!("Access token: missing (set {} or access_token in config.json)", TOKEN_ENV_VAR);
        }
        return Ok(());
    }

    if args.favorites {
        println!("Favorites:");
        for movie in favorite_movies() {
            print_row(&movie, &config.image_base_url);
        }
    }

    if args.interactive {
        let controller = build_controller(&config)?;
        return run_interactive(controller, &config).await;
    }

    if let Some(query) = &args.query {
        let controller = build_controller(&config)?;
        run_query(&controller, query, &config).await?;

        if let Some(id) = args.share {
            print_share(controller.find_movie(id), id)?;
        }
        return Ok(());
    }

    if let Some(id) = args.share {
        let movie = favorite_movies().into_iter().find(|m| m.id == id);
        print_share(movie, id)?;
    }

    Ok(())
}

fn build_controller(config: &AppConfig) -> Result<SearchController, anyhow::Error> {
    let client = TmdbClient::from_config(config).map_err(|e| anyhow!(e.diagnostics()))?;
    Ok(SearchController::new(Arc::new(client)))
}

async fn run_query(
    controller: &SearchController,
    query: &str,
    config: &AppConfig,
) -> Result<(), anyhow::Error> {
    let mut events = controller.subscribe_events();
    controller.toggle_search_mode();

    wait_for_cycle(controller.on_query_text_changed(query))
        .await
        .map_err(|e| anyhow!(e.diagnostics()))?;

    while let Ok(event) = events.try_recv() {
        if let SearchEvent::Failed { error, .. } = event {
            eprintln!("{}", error.diagnostics());
        }
    }

    let results = controller.results();
    println!("{} result(s) for \"{}\":", results.len(), query);
    for movie in &results {
        print_row(movie, &config.image_base_url);
    }
    Ok(())
}

async fn run_interactive(controller: SearchController, config: &AppConfig) -> Result<(), anyhow::Error> {
    let mut results_rx = controller.subscribe_results();
    let mut events = controller.subscribe_events();
    let image_base_url = config.image_base_url.clone();

    let printer = tokio::spawn(async move {
        while results_rx.changed().await.is_ok() {
            let results = results_rx.borrow_and_update().clone();
            println!("-- {} result(s)", results.len());
            for movie in &results {
                print_row(movie, &image_base_url);
            }
        }
    });

    let reporter = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(SearchEvent::Failed { query, error }) => {
                    eprintln!("[{}] {}", query, error);
                }
                Ok(_) => {}
                Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    controller.toggle_search_mode();
    println!("Type to search, \"/toggle\" to leave or enter search mode, Ctrl-D to quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == "/toggle" {
            let active = controller.toggle_search_mode();
            println!("Search mode {}", if active { "on" } else { "off" });
            continue;
        }
        controller.on_query_text_changed(line);
    }

    drop(controller);
    printer.abort();
    reporter.abort();
    Ok(())
}

fn print_row(movie: &Movie, image_base_url: &str) {
    let poster = movie
        .poster_url(image_base_url)
        .unwrap_or_else(|| "-".to_string());
    println!("  [{}] {}  {}", movie.id, movie, poster);
}

fn print_share(movie: Option<Movie>, id: i64) -> Result<(), anyhow::Error> {
    let movie = movie.ok_or_else(|| anyhow!("No movie with id {} to share", id))?;
    println!("Subject: {}", movie.share_subject());
    println!("{}", movie.share_message());
    Ok(())
}
