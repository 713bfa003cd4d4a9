//! Entry point: parse CLI, set up logging and run the requested fetch.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use yahoo_ffl::{
    cli::{extract_game_id, Commands, YahooCli},
    yahoo::game_url,
    Result, Session, SessionConfig,
};

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    let app = YahooCli::parse();

    let default_level = if app.command.session_args().verbose {
        "debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = app
        .command
        .session_args()
        .apply(SessionConfig::from_env()?)?;
    let mut session = Session::new(config).await?;

    match app.command {
        Commands::Get { url, meta, .. } => {
            let response = session.get_response(&url).await?;
            if meta {
                println!("url: {}", response.url);
                println!("status: {}", response.status);
                println!("from_cache: {}", response.from_cache);
                println!();
            }
            println!("{}", response.body);
        }

        Commands::Game { code, .. } => {
            let response = session.get_response(&game_url(&code)).await?;
            println!("from_cache={}", response.from_cache);
            match extract_game_id(&response.body) {
                Some(game_id) => println!("game_id={game_id}"),
                None => println!("game_id not found in response"),
            }
        }
    }

    Ok(())
}
