use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

use clash_control::api::{ApiClient, ApiResponse};
use clash_control::config::{load_config, ControlConfig};
use clash_control::observability::logging;
use clash_control::platform::{PlatformRegistry, DEFAULT_PLATFORM};
use clash_control::transport::LineStream;

#[derive(Parser)]
#[command(name = "clash-cli")]
#[command(about = "Management CLI for a Clash-compatible proxy daemon", long_about = None)]
struct Cli {
    /// Daemon API base URL; overrides the config file.
    #[arg(short, long)]
    url: Option<String>,

    /// Bearer secret; overrides the config file.
    #[arg(short, long)]
    secret: Option<String>,

    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream live traffic counters
    Traffic {
        /// Stop after this many lines instead of streaming forever.
        #[arg(long)]
        count: Option<usize>,
    },
    /// Stream daemon log lines
    Logs {
        /// Stop after this many lines instead of streaming forever.
        #[arg(long)]
        count: Option<usize>,
    },
    /// List proxies and proxy groups
    Proxies,
    /// Show a single proxy
    Proxy { name: String },
    /// Select the active proxy inside a group
    Use { name: String },
    /// Probe latency results for a proxy
    Delay { name: String },
    /// Show the daemon's running configuration
    Config,
    /// Ask the daemon to reload its configuration from disk
    Reload,
    /// Show the active rule set
    Rules,
    /// Print where this platform keeps the daemon's config files
    Paths,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("clash_control=info");

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ControlConfig::default(),
    };
    if let Some(url) = cli.url {
        config.api.base_url = url;
    }
    if let Some(secret) = cli.secret {
        config.api.secret = Some(secret);
    }

    let client = ApiClient::from_config(&config)?;

    match cli.command {
        Commands::Traffic { count } => stream_lines(client.traffic().await?, count).await?,
        Commands::Logs { count } => stream_lines(client.logs().await?, count).await?,
        Commands::Proxies => print_response(client.proxies().await?)?,
        Commands::Proxy { name } => print_response(client.proxy(&name).await?)?,
        Commands::Use { name } => print_response(client.select_proxy(&name).await?)?,
        Commands::Delay { name } => print_response(client.proxy_delay(&name).await?)?,
        Commands::Config => print_response(client.configs().await?)?,
        Commands::Reload => print_response(client.reload_configs().await?)?,
        Commands::Rules => print_response(client.rules().await?)?,
        Commands::Paths => {
            let registry = daemon_config_dirs(config.platform.effective_id());
            let dir = registry.resolve("configDir")?;
            println!("{}", dir().display());
        }
    }

    Ok(())
}

/// Print each arriving line until the stream closes or `count` is
/// reached.
async fn stream_lines(
    mut lines: LineStream,
    count: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut seen = 0usize;
    while let Some(line) = lines.next_line().await? {
        println!("{line}");
        seen += 1;
        if count.is_some_and(|max| seen >= max) {
            break;
        }
    }
    Ok(())
}

fn print_response(res: ApiResponse) -> Result<(), Box<dyn std::error::Error>> {
    if !res.is_success() {
        eprintln!("Error: daemon returned status {}", res.status);
        if !res.body.is_empty() {
            eprintln!("Response: {}", res.body);
        }
        std::process::exit(1);
    }

    match serde_json::from_str::<Value>(&res.body) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", res.body),
    }
    Ok(())
}

/// Where each platform keeps the daemon's configuration.
fn daemon_config_dirs(platform_id: &str) -> PlatformRegistry<fn() -> PathBuf> {
    let mut registry: PlatformRegistry<fn() -> PathBuf> =
        PlatformRegistry::with_platform(platform_id);
    registry.register("configDir", "linux", linux_config_dir);
    registry.register("configDir", "macos", macos_config_dir);
    registry.register("configDir", "windows", windows_config_dir);
    registry.register("configDir", DEFAULT_PLATFORM, fallback_config_dir);
    registry
}

fn linux_config_dir() -> PathBuf {
    match std::env::var_os("XDG_CONFIG_HOME") {
        Some(base) => PathBuf::from(base).join("clash"),
        None => home_dir().join(".config").join("clash"),
    }
}

fn macos_config_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("clash")
}

fn windows_config_dir() -> PathBuf {
    match std::env::var_os("APPDATA") {
        Some(base) => PathBuf::from(base).join("clash"),
        None => home_dir().join("clash"),
    }
}

fn fallback_config_dir() -> PathBuf {
    home_dir().join(".config").join("clash")
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}
