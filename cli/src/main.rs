//! modelhub: drive the asynchronous model job service from the command line

use clap::Parser;
use modelhub_cli::cli::Cli;
use modelhub_cli::domain::{ClientError, ConfigError};
use modelhub_cli::output::json;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = cli.run().await {
        report(&e, json_mode);
        std::process::exit(1);
    }
}

fn report(err: &anyhow::Error, json_mode: bool) {
    if json_mode {
        let code = if let Some(e) = err.downcast_ref::<ClientError>() {
            e.kind().code()
        } else if err.downcast_ref::<ConfigError>().is_some() {
            "config_error"
        } else {
            "error"
        };
        match json::format_error(&format!("{err:#}"), code) {
            Ok(doc) => println!("{doc}"),
            Err(_) => eprintln!("Error: {err:#}"),
        }
    } else {
        eprintln!("Error: {err:#}");
    }
}
