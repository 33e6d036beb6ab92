use portfolio_recommender::{config::InvokeConfig, create_default_dispatcher, Result};
use serde_json::Value;
use std::io::Read;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn read_event(path: Option<String>) -> Result<String> {
    match path {
        Some(path) => {
            info!(path = %path, "Reading event from file");
            Ok(std::fs::read_to_string(path)?)
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn main() -> Result<()> {
    let config = InvokeConfig::from_env()?;

    // Logs go to stderr so stdout carries only the response
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(std::io::stderr)
        .init();

    let raw = read_event(std::env::args().nth(1))?;
    let event: Value = serde_json::from_str(&raw)?;
    let dispatcher = create_default_dispatcher();

    match dispatcher.handle_event(event) {
        Ok(response) => {
            let out = if config.pretty {
                serde_json::to_string_pretty(&response)?
            } else {
                serde_json::to_string(&response)?
            };
            println!("{}", out);
            Ok(())
        }
        Err(e) => {
            eprintln!("Invocation failed: {}", e);
            Err(e)
        }
    }
}
