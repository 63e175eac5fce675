use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chatgto_client::config::ConfigOverrides;
use chatgto_client::pages::LandingPage;
use chatgto_client::stub;
use chatgto_client::{App, AuthContext, ClientConfig, HttpPracticeApi, LocalAuthProvider};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "chatgto",
    version,
    about = "Terminal client for the ChatGTO practice backend",
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Backend base URL
    #[arg(long, env = "CHATGTO_API_URL", global = true)]
    api_url: Option<String>,

    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable ANSI colors in output
    #[arg(long = "no-color", default_value_t = false, global = true)]
    no_color: bool,

    /// Sign in as this email at startup
    #[arg(long, env = "CHATGTO_USER", global = true)]
    user: Option<String>,

    /// RNG seed for scenario selection (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the backend health status and exit
    Status,
    /// Run the development stub backend
    ServeStub {
        /// Address to bind (HOST:PORT)
        #[arg(long, default_value = "127.0.0.1:8000")]
        addr: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = color_eyre::install();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::load(
        cli.config.as_deref(),
        ConfigOverrides {
            api_url: cli.api_url.clone(),
            no_color: cli.no_color,
            user: cli.user.clone(),
        },
    )?;

    match cli.command {
        Some(Commands::Status) => run_status(config).await?,
        Some(Commands::ServeStub { addr }) => run_stub(addr).await?,
        None => run_app(config, cli.seed).await?,
    }

    Ok(())
}

async fn run_status(config: ClientConfig) -> Result<()> {
    let api = HttpPracticeApi::new(config.api_url.clone())?;
    let mut page = LandingPage::new();
    page.load(&api).await;
    for line in page.render(config.color()) {
        println!("{line}");
    }
    Ok(())
}

async fn run_stub(addr: String) -> Result<()> {
    let addr: SocketAddr = addr.parse()?;
    stub::serve(addr).await
}

async fn run_app(config: ClientConfig, seed: Option<u64>) -> Result<()> {
    let api = HttpPracticeApi::new(config.api_url.clone())?;
    let provider = match config.user.as_deref() {
        Some(email) => LocalAuthProvider::signed_in(email)?,
        None => LocalAuthProvider::new(),
    };
    let auth = AuthContext::new(Arc::new(provider));

    let mut app = App::new(api, auth, config);
    if let Some(seed) = seed {
        app = app.with_seed(seed);
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    app.run(&mut input, &mut output).await
}
