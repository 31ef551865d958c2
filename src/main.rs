//! Search Aggregator: query several search providers and merge their answers
//!
//! This is the main entry point for the application.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use search_aggregator::{
    config::{self, Settings},
    engines::{EngineLoader, EngineRegistry},
    network::HttpClient,
    web::{create_router, AppState},
    AggregationResult, Search, SearchQuery,
};
use std::io::{self, BufRead, Write};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Search aggregator over Google and Wikipedia
#[derive(Parser, Debug)]
#[command(name = "search-aggregator")]
#[command(about = "Query several search providers and merge the results", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to settings.yml
    #[arg(short, long, global = true, env = "AGGREGATOR_SETTINGS_PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Port to listen on (overrides settings)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run one search and print the merged results
    Search(SearchArgs),

    /// List the configured engines
    Engines,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Search query; prompted for when omitted
    query: Option<String>,

    /// Comma-separated sources, e.g. google,wikipedia
    #[arg(short, long)]
    sources: Option<String>,

    /// Records requested from each provider
    #[arg(short = 'n', long)]
    max_results: Option<u32>,

    /// Print the records as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = config::load_settings(cli.config.as_deref())?;
    init_logging(&settings);

    let client = HttpClient::with_settings(&settings.outgoing)?;
    let registry = EngineLoader::load(&settings)?;

    match cli.command {
        Commands::Serve { port } => serve(settings, registry, client, port).await,
        Commands::Search(args) => search(&settings, registry, client, args).await,
        Commands::Engines => {
            for name in registry.known() {
                println!("{}", name);
            }
            Ok(())
        }
    }
}

/// Log to stderr so search output on stdout stays clean
fn init_logging(settings: &Settings) {
    let default_level = if settings.general.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

async fn serve(
    mut settings: Settings,
    registry: EngineRegistry,
    client: HttpClient,
    port: Option<u16>,
) -> Result<()> {
    if let Some(port) = port {
        settings.server.port = port;
    }

    info!("Starting search-aggregator v{}", search_aggregator::VERSION);

    let addr = SocketAddr::new(
        settings
            .server
            .bind_address
            .parse()
            .with_context(|| format!("invalid bind address {}", settings.server.bind_address))?,
        settings.server.port,
    );

    let state = AppState::new(settings, registry, client);
    let app = create_router(state);

    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn search(
    settings: &Settings,
    registry: EngineRegistry,
    client: HttpClient,
    args: SearchArgs,
) -> Result<()> {
    let known = registry.known().join(", ");
    let search = Search::from_settings(client, Arc::new(registry), settings);

    let query = match args.query {
        Some(query) => query,
        None => {
            println!("Welcome to the CLI Search Aggregator!");
            prompt("Enter your search query: ")?
        }
    };

    // a blank answer is passed through and rejected as NoSourceSelected
    let sources = requested_sources(args.sources, || {
        prompt(&format!("Choose sources, comma-separated ({}): ", known))
    })?;

    let query = SearchQuery::new(query, sources)
        .with_max_results(args.max_results.unwrap_or(settings.search.max_results));
    let result = search.execute(&query).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.records)?);
    } else {
        display_results(result);
    }

    Ok(())
}

fn requested_sources<F>(flag: Option<String>, ask: F) -> Result<Vec<String>>
where
    F: FnOnce() -> Result<String>,
{
    Ok(vec![match flag {
        Some(sources) => sources,
        None => ask()?,
    }])
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn display_results(result: AggregationResult) {
    for engine in &result.unresponsive {
        eprintln!("warning: {} failed: {}", engine.name, engine.error);
    }

    let records = match result.require_results() {
        Ok(result) => result.into_records(),
        Err(e) => {
            println!("{}.", e);
            return;
        }
    };

    for (i, record) in records.iter().enumerate() {
        println!("{}. {}", i + 1, record.title);
        println!("   Link: {}", record.link);
        if let Some(ref snippet) = record.snippet {
            println!("   {}", snippet);
        }
        println!("   Source: {}\n", record.source);
    }
}
