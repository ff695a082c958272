//! shortener — command-line client for the URL shortening service.
//!
//! Validates candidate URLs locally, submits valid ones to `POST /api/` and
//! prints the composed `<NGINX_URL>/s/<short>` link. Also probes
//! `GET /api/status`.
//!
//! Run:
//! ```bash
//! NGINX_URL=https://short.example shortener shorten https://example.com
//!
//! # API on a different origin than the displayed links, JSON logs
//! NGINX_URL=https://short.example SHORTENER_API_ORIGIN=http://localhost:8080 \
//! LOG_FORMAT=json shortener status
//! ```
//!
//! Configuration: See `config.rs` for all environment variables.

mod cli;
mod config;
mod display;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use domain::service::ShortenClient;
use domain::status::StatusChecker;
use domain::validate::is_valid_url;
use domain::{ClientConfig, DisplaySink, Transport, VALIDATION_ERROR_MESSAGE};
use http_client::ReqwestTransport;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::{Cli, Command};
use crate::display::TerminalDisplay;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load and validate config first (fail fast on misconfiguration)
    let cfg = match config::Config::from_lookup(|key| cli.lookup(key)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&cfg);

    match run(cli.command, &cfg).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Execute one command. `Ok(false)` means an error state was rendered.
async fn run(command: Command, cfg: &config::Config) -> anyhow::Result<bool> {
    match command {
        Command::Validate { url } => {
            let ok = is_valid_url(&url);
            TerminalDisplay.show(if ok { "valid" } else { VALIDATION_ERROR_MESSAGE });
            Ok(ok)
        }
        Command::Shorten { url } => {
            let client = shorten_client(cfg)?;
            Ok(!client.submit(&url).await.is_error())
        }
        Command::Status => {
            let transport = transport(cfg)?;
            let state = StatusChecker::new(transport, TerminalDisplay).check().await;
            Ok(!state.is_failed())
        }
        Command::Interactive => {
            let client = shorten_client(cfg)?;
            shorten_lines(BufReader::new(tokio::io::stdin()), &client, &TerminalDisplay).await?;
            Ok(true)
        }
    }
}

/// Submit each input line as a fresh candidate until EOF. A line that is not
/// UTF-8 is rendered as a validation error and does not end the session.
async fn shorten_lines<R, T, D>(
    mut reader: R,
    client: &ShortenClient<T, D>,
    display: &impl DisplaySink,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    T: Transport,
    D: DisplaySink,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await.context("reading stdin")? == 0 {
            return Ok(());
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        match std::str::from_utf8(&buf) {
            Ok(line) => {
                client.submit(line).await;
            }
            Err(e) => {
                warn!(line = %String::from_utf8_lossy(&buf), error = %e, "input line is not valid UTF-8");
                display.show(VALIDATION_ERROR_MESSAGE);
            }
        }
    }
}

fn transport(cfg: &config::Config) -> anyhow::Result<ReqwestTransport> {
    let transport = ReqwestTransport::new(cfg.require_api_origin()?)?;
    info!(origin = transport.origin(), "using shortening service");
    Ok(transport)
}

fn shorten_client(
    cfg: &config::Config,
) -> anyhow::Result<ShortenClient<ReqwestTransport, TerminalDisplay>> {
    let base_url = cfg.require_base_url()?;
    Ok(ShortenClient::new(
        transport(cfg)?,
        TerminalDisplay,
        ClientConfig::new(base_url),
    ))
}

fn init_tracing(cfg: &config::Config) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    match cfg.log_format {
        config::LogFormat::Json => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(fmt::time::SystemTime)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        config::LogFormat::Pretty => {
            registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
}
