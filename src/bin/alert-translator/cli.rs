use std::net::IpAddr;
use std::path::PathBuf;

use alert_translator::types::LogFormat;
use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Translates Alertmanager webhooks into chat messages",
    long_about = None
)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Address to listen on (overrides `server.bind`).
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<IpAddr>,

    /// Port to listen on (overrides `server.port` and `PORT`).
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,

    /// Accept a plain HTTP chat base URL.
    #[arg(long, action = ArgAction::SetTrue)]
    pub insecure: bool,

    /// Log output format: `text` or `json` (needs `--features json-logs`).
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub log_format: LogFormat,

    /// Explicit log filter (e.g. "alert_translator=debug").
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
