use clap::Parser;
use nl_core::{Error, Result, SearchParams};
use nl_search::{fetch_trending, run_comparison, PerplexityProvider};
use nl_web::{create_app, AppState};
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(
    name = "newslens",
    author,
    version,
    about = "Compare news coverage across progressive and conservative outlets",
    long_about = None
)]
struct Cli {
    /// Perplexity API key; falls back to PERPLEXITY_API_KEY
    #[arg(long, global = true)]
    api_key: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run a two-sided comparison for a keyword
    Analyze {
        keyword: String,
        /// Start of the date range (opaque, e.g. 2026-08-01)
        #[arg(long)]
        from: String,
        /// End of the date range
        #[arg(long)]
        to: String,
    },
    /// Fetch the keywords currently dominating the news cycle
    Trending,
    /// Serve the web API
    Serve {
        #[arg(long, default_value = "0.0.0.0:3000")]
        addr: String,
    },
}

fn resolve_api_key(flag: Option<String>) -> Result<String> {
    flag.or_else(|| std::env::var("PERPLEXITY_API_KEY").ok())
        .ok_or_else(|| {
            Error::Config("no API key: pass --api-key or set PERPLEXITY_API_KEY".to_string())
        })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze { keyword, from, to } => {
            let provider = PerplexityProvider::new(resolve_api_key(cli.api_key)?);
            let params = SearchParams {
                keyword,
                start_date: from,
                end_date: to,
            };
            let result = run_comparison(&provider, &params).await?;
            info!(
                "found {} progressive and {} conservative article(s)",
                result.progressive.articles.len(),
                result.conservative.articles.len()
            );
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Trending => {
            let provider = PerplexityProvider::new(resolve_api_key(cli.api_key)?);
            let trending = fetch_trending(&provider).await?;
            println!("{}", serde_json::to_string_pretty(&trending)?);
        }
        Commands::Serve { addr } => {
            let state = AppState::from_env();
            let app = create_app(state).await;
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            info!("🌐 listening on {}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
