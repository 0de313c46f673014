use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use murmur_gateway::api::ApiServer;
use murmur_gateway::{Config, ContextBuilder, DateTimeInfo, GeminiClient};

/// Murmur - Voice chat gateway for AI assistants
#[derive(Parser)]
#[command(name = "murmur", version, about)]
struct Cli {
    /// Port to listen on
    #[arg(long, env = "MURMUR_PORT")]
    port: Option<u16>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Send a one-shot message to the completion backend and print the reply
    Ask {
        /// Message text
        text: String,
    },
    /// Send a message through a running gateway's chat endpoint
    Chat {
        /// Message text
        text: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,murmur_gateway=info",
        1 => "info,murmur_gateway=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load();
    if let Some(port) = cli.port {
        config.api_server.port = port;
    }

    if let Some(cmd) = cli.command {
        return match cmd {
            Command::Ask { text } => ask(&config, &text).await,
            Command::Chat { text } => chat(&config, &text).await,
        };
    }

    tracing::info!(
        port = config.api_server.port,
        model = %config.llm.model,
        "starting murmur gateway"
    );

    let completion = match &config.llm.api_key {
        Some(key) => {
            let client = GeminiClient::new(key.clone(), config.llm.model.clone())?;
            Some(Arc::new(client) as Arc<dyn murmur_gateway::CompletionBackend>)
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set - chat requests will fail");
            None
        }
    };

    let context_builder = match &config.llm.preamble {
        Some(preamble) => ContextBuilder::with_preamble(preamble.clone()),
        None => ContextBuilder::new(),
    };

    ApiServer::new(completion, context_builder, config.api_server.port)
        .run()
        .await?;

    Ok(())
}

/// One-shot exchange with the completion backend, bypassing the server
async fn ask(config: &Config, text: &str) -> anyhow::Result<()> {
    let key = config
        .llm
        .api_key
        .clone()
        .ok_or_else(|| anyhow::anyhow!("GEMINI_API_KEY not set"))?;
    let client = GeminiClient::new(key, config.llm.model.clone())?;

    let builder = match &config.llm.preamble {
        Some(preamble) => ContextBuilder::with_preamble(preamble.clone()),
        None => ContextBuilder::new(),
    };
    let now = DateTimeInfo::now(config.timezone.as_deref());
    let prompt = builder.build(&now, &[], text);

    use murmur_gateway::CompletionBackend;
    let reply = client.complete(&prompt).await?;
    println!("{reply}");

    Ok(())
}

/// Send a message to a running gateway over HTTP
async fn chat(config: &Config, text: &str) -> anyhow::Result<()> {
    use murmur_gateway::{ChatService, HttpChatClient};

    let client = HttpChatClient::new(config.chat_endpoint.clone());
    let reply = client.send(text, &[], config.timezone.as_deref()).await?;
    println!("{reply}");

    Ok(())
}
