//! dagcheck CLI - validate pipeline graphs.

mod check;
mod colors;
mod serve;

use clap::{Parser, Subcommand};
use dagcheck_core::AnalyzeOptions;
use dagcheck_server::{DEFAULT_ORIGINS, ServerConfig};

/// Exit status of `check` when the pipeline contains a cycle.
const EXIT_NOT_A_DAG: i32 = 2;

#[derive(Parser)]
#[command(name = "dagcheck")]
#[command(about = "Validate that pipeline graphs are acyclic")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP validation server
    Serve {
        /// Host address to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Allowed CORS origin (repeatable; defaults to localhost dev servers)
        #[arg(long = "origin")]
        origins: Vec<String>,

        /// Reject pipelines with repeated node ids or edges
        #[arg(long)]
        reject_duplicates: bool,
    },

    /// Analyze a pipeline JSON file
    Check {
        /// Path to the pipeline (.json file), or - for stdin
        pipeline: String,

        /// Reject pipelines with repeated node ids or edges
        #[arg(long)]
        reject_duplicates: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn analyze_options(reject_duplicates: bool) -> AnalyzeOptions {
    if reject_duplicates {
        AnalyzeOptions::strict()
    } else {
        AnalyzeOptions::default()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve {
            host,
            port,
            origins,
            reject_duplicates,
        } => {
            let allowed_origins = if origins.is_empty() {
                DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect()
            } else {
                origins
            };

            let config = ServerConfig {
                host,
                port,
                allowed_origins,
                options: analyze_options(reject_duplicates),
            };
            serve::execute(config).await?;
        }

        Commands::Check {
            pipeline,
            reject_duplicates,
            json,
        } => {
            let analysis = check::execute(&pipeline, &analyze_options(reject_duplicates), json)?;
            if !analysis.is_dag {
                std::io::Write::flush(&mut std::io::stdout()).ok();
                std::process::exit(EXIT_NOT_A_DAG);
            }
        }
    }

    Ok(())
}
