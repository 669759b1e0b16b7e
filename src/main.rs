use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use video_resolution_selector::config::ServerConfig;
use video_resolution_selector::registry::registry;
use video_resolution_selector::{server, table};

#[derive(Debug, Parser)]
#[command(
    name = "video-resolution-selector",
    version,
    about = "Preset video frame sizes for generation pipelines"
)]
struct Cli {
    /// Log at INFO level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log at DEBUG level
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the registered nodes as MCP tools over stdio
    Serve,
    /// Print the object info of every registered node as JSON
    Describe,
    /// Print the frame size for a mode, aspect ratio and quality
    Resolve {
        mode: String,
        aspect_ratio: String,
        quality: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = ServerConfig::from_env()?;
    if cli.debug {
        config = config.with_log_level("debug");
    } else if cli.verbose {
        config = config.with_log_level("info");
    }

    // stdout carries the transport and command output, so logs go to stderr
    let level = config.level()?;
    let filter = EnvFilter::from_default_env().add_directive(level.into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.log_ansi)
        .init();

    tracing::debug!("Configuration: {:?}", config);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            tracing::info!(
                "Starting video-resolution-selector version {}",
                env!("CARGO_PKG_VERSION")
            );
            server::start_server().await
        }
        Command::Describe => {
            let info = registry().object_info();
            println!("{}", serde_json::to_string_pretty(&info)?);
            Ok(())
        }
        Command::Resolve {
            mode,
            aspect_ratio,
            quality,
        } => {
            println!("{}", table::resolve(&mode, &aspect_ratio, &quality));
            Ok(())
        }
    }
}
