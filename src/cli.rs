use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use dg_base::config::DEFAULT_THEME;
use dg_base::constants::{EXPORT_FILE_NAME, LOG_FILE, STORE_DIR};

#[derive(Parser, Debug)]
#[command(name = "deckgen")]
#[command(about = "Deck Config Generator - lay out a button grid and export config.json", long_about = None)]
pub struct Cli {
    /// Where "Generate Config" writes the document
    #[arg(long, default_value = EXPORT_FILE_NAME)]
    pub output: PathBuf,

    /// Initial row count (same coercion as the Rows input)
    #[arg(long)]
    pub rows: Option<String>,

    /// Initial column count (same coercion as the Columns input)
    #[arg(long)]
    pub cols: Option<String>,

    /// Color theme: slate, ember or paper
    #[arg(long, default_value = DEFAULT_THEME)]
    pub theme: String,

    /// Log file (default .deckgen/deckgen.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// off, error, warn, info, debug or trace
    #[arg(long, env = "DECKGEN_LOG", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge every image under a directory into a config document's icons
    Icons {
        /// Directory to walk; keys are file paths relative to it, minus extension
        #[arg(long)]
        icons_dir: PathBuf,

        /// Document to update
        #[arg(long, default_value = EXPORT_FILE_NAME)]
        config: PathBuf,
    },
}

impl Cli {
    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| PathBuf::from(STORE_DIR).join(LOG_FILE))
    }

    /// Parsed log level; unknown names fall back to `info`.
    pub fn level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}
