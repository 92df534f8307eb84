use crate::config::toml_config::ExplorerConfig;
use crate::core::Storage;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "swiss-vote-explorer")]
#[command(about = "Explore Swiss federal votes published on opendata.swiss")]
#[command(version)]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the CKAN base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Language for descriptions and titles (de, fr, it, rm, en)
    #[arg(long, global = true)]
    pub language: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Log elapsed time and memory per phase
    #[arg(long, global = true)]
    pub monitor: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List all available federal votes
    List {
        /// Show at most N votes
        #[arg(long)]
        limit: Option<usize>,

        /// Only votes on or after this date (YYYY-MM-DD)
        #[arg(long)]
        since: Option<NaiveDate>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the national result of one proposal
    Summary {
        /// Proposal name, e.g. "Federal proposals: 1. Popular Initiative 'Name'" or just "Name"
        proposal: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Export the vote catalogue as a ZIP of CSV/TSV/JSON files
    Export {
        /// Output directory (overrides the configuration file)
        #[arg(long)]
        output_path: Option<String>,

        /// Comma separated formats: csv,tsv,json
        #[arg(long, value_delimiter = ',')]
        formats: Vec<String>,
    },

    /// Validate the Space manifest in README.md front matter
    Manifest {
        #[arg(default_value = "README.md")]
        path: String,
    },
}

impl CliConfig {
    /// 合併配置檔與命令列參數
    pub fn resolve(&self) -> Result<ExplorerConfig> {
        let mut config = match &self.config {
            Some(path) => ExplorerConfig::from_file(path)?,
            None => ExplorerConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.source.base_url = base_url.clone();
        }
        if let Some(language) = &self.language {
            config.display.language = language.clone();
        }
        if let Command::Export {
            output_path,
            formats,
        } = &self.command
        {
            if let Some(path) = output_path {
                config.export.output_path = path.clone();
            }
            if !formats.is_empty() {
                config.export.output_formats = formats.clone();
            }
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }

    fn location(&self, path: &str) -> String {
        Path::new(&self.base_path).join(path).display().to_string()
    }
}
