use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use trailbuddy::{
    Conversation, ConversationSettings, GeminiClient, OpenMeteoClient, OverpassClient, Services,
    TrailBuddyConfig, TrailCatalog, telemetry,
};

/// Chat with an AI trail buddy to find your next hike
#[derive(Debug, Parser)]
#[command(name = "trailbuddy", version, about)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the trails CSV file (overrides catalog.path)
    #[arg(long)]
    trails: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    dotenv::dotenv().ok();

    let mut config = TrailBuddyConfig::load_from_path(args.config.clone())?;
    if let Some(trails) = &args.trails {
        config.catalog.path = trails.display().to_string();
    }
    if args.verbose {
        config.logging.level = "debug".to_string();
    }

    telemetry::init(&config.logging)?;
    debug!("Configuration: {:?}", config);

    let catalog =
        Arc::new(TrailCatalog::load(&config.catalog.path).with_max_results(config.catalog.max_results));

    let completion = match GeminiClient::from_config(&config.llm) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    };
    info!("Using model {}", completion.model());

    let services = Services {
        completion: Arc::new(completion),
        weather: Arc::new(OpenMeteoClient::new(&config.weather)?),
        places: Arc::new(OverpassClient::new(&config.places)?),
    };

    let mut conversation =
        Conversation::new(catalog, services, ConversationSettings::from(&config));

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(format!("{}\n", conversation.greeting()).as_bytes())
        .await?;

    loop {
        stdout.write_all(b"You: ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.eq_ignore_ascii_case("exit") {
            break;
        }

        let reply = conversation.handle_message(input).await;
        stdout.write_all(format!("{reply}\n").as_bytes()).await?;
    }

    Ok(())
}
