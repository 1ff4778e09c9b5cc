//! Serve command implementation for dagcheck CLI.
//!
//! Starts the HTTP validation server.

use dagcheck_server::ServerConfig;

use crate::colors;

/// Start the pipeline validation server.
pub async fn execute(config: ServerConfig) -> anyhow::Result<()> {
    println!(
        "\n{}dagcheck Server{} - Pipeline Validation",
        colors::BOLD,
        colors::RESET
    );
    println!("{}", "─".repeat(50));

    println!(
        "{}  ◆ Endpoint:{} http://{}:{}/pipelines/parse",
        colors::CYAN,
        colors::RESET,
        config.host,
        config.port
    );
    println!(
        "{}  ◆ Origins:{} {}",
        colors::CYAN,
        colors::RESET,
        config.allowed_origins.join(", ")
    );
    println!("{}", "─".repeat(50));
    println!("{}Press Ctrl+C to stop{}", colors::GREEN, colors::RESET);
    println!();

    dagcheck_server::serve(config).await?;

    Ok(())
}
