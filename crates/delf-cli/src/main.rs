//! delf CLI: evaluate DELF B2 exercises from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod output;

use output::OutputFormat;

#[derive(Parser)]
#[command(name = "delf", version, about = "DELF B2 exercise evaluation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a submission described by a JSON request file
    Evaluate {
        /// Path to the evaluation request (.json)
        #[arg(long)]
        request: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Deadline for the backend call, overriding the config
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout_secs: Option<u64>,
    },

    /// Translate French text to Ukrainian
    Translate {
        /// Text to translate
        #[arg(long)]
        text: String,

        /// Optional context to guide the translation
        #[arg(long)]
        context: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate study recommendations from stats and progress files
    Recommend {
        /// User statistics (.json)
        #[arg(long)]
        stats: PathBuf,

        /// Per-skill progress (.json)
        #[arg(long)]
        progress: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Load the configuration and print it with the API key masked
    CheckConfig {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example request
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("delf=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Evaluate {
            request,
            format,
            config,
            timeout_secs,
        } => commands::evaluate::execute(request, format, config, timeout_secs).await,
        Commands::Translate {
            text,
            context,
            config,
        } => commands::translate::execute(text, context, config).await,
        Commands::Recommend {
            stats,
            progress,
            format,
            config,
        } => commands::recommend::execute(stats, progress, format, config).await,
        Commands::CheckConfig { config } => commands::check_config::execute(config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
