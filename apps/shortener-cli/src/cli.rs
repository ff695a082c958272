//! Command-line surface: each subcommand is one "click" on the widget.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "shortener", version, about = "Shorten links through the shortening service")]
pub struct Cli {
    /// Base URL for composed links (overrides NGINX_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Origin the /api/ requests are sent to (overrides SHORTENER_API_ORIGIN)
    #[arg(long, global = true, value_name = "URL")]
    pub api_origin: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a URL and ask the service for a short link
    Shorten {
        /// Candidate URL, taken verbatim
        url: String,
    },
    /// Check the backend status endpoint
    Status,
    /// Only run the local URL validator; no network access
    Validate {
        url: String,
    },
    /// Read one candidate per line from stdin and shorten each
    Interactive,
}

impl Cli {
    /// Configuration lookup: command-line flags first, then the environment.
    pub fn lookup(&self, key: &str) -> Option<String> {
        let flag = match key {
            "NGINX_URL" => self.base_url.clone(),
            "SHORTENER_API_ORIGIN" => self.api_origin.clone(),
            _ => None,
        };
        flag.or_else(|| std::env::var(key).ok())
    }
}
