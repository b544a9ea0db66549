use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::db::postgres::DEFAULT_PORT;

/// Command-line flags. Anything left unset falls back to the environment and
/// then to the built-in defaults.
#[derive(Debug, Default, Parser)]
#[command(name = "dbdesk", version, about = "Terminal SQL client for SQLite and PostgreSQL")]
pub struct Cli {
    /// Row limit used when previewing a table
    #[arg(long, env = "DBDESK_PREVIEW_LIMIT")]
    pub preview_limit: Option<usize>,

    /// Directory for CSV exports without an explicit path
    #[arg(long, env = "DBDESK_EXPORT_DIR")]
    pub export_dir: Option<PathBuf>,

    /// Write logs to this file (the terminal is owned by the UI)
    #[arg(long, env = "DBDESK_LOG")]
    pub log_file: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub preview_limit: usize,
    pub default_postgres_host: String,
    pub default_postgres_port: u16,
    pub export_dir: PathBuf,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preview_limit: 100,
            default_postgres_host: "localhost".to_string(),
            default_postgres_port: DEFAULT_PORT,
            export_dir: Self::default_export_dir(),
            log_file: None,
        }
    }
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        let mut config = Self::default();
        if let Some(limit) = cli.preview_limit {
            config.preview_limit = limit.max(1);
        }
        if let Some(dir) = &cli.export_dir {
            config.export_dir = dir.clone();
        }
        config.log_file = cli.log_file.clone();
        config
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize configuration")
    }

    fn default_export_dir() -> PathBuf {
        dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// `SELECT * FROM <table> LIMIT <preview_limit>`
    pub fn preview_query(&self, table: &str) -> String {
        format!("SELECT * FROM {} LIMIT {}", table, self.preview_limit)
    }
}
