use std::path::PathBuf;

use clap::{Parser, Subcommand};
use life_engine::parse_cell;

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "conway-coro")]
#[command(about = "Sparse Conway's Game of Life")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config file (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Start-up pattern name
    #[arg(long)]
    pub pattern: Option<String>,

    /// Live cell as `row,col`; repeat for more cells
    #[arg(long = "cell", value_parser = parse_cell)]
    pub cells: Vec<(i64, i64)>,

    /// Milliseconds between generations
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Run without a window, logging each generation
    #[arg(long)]
    pub headless: bool,

    /// Headless run length
    #[arg(long)]
    pub generations: Option<u64>,

    /// Headless viewport width
    #[arg(long)]
    pub width: Option<u32>,

    /// Headless viewport height
    #[arg(long)]
    pub height: Option<u32>,

    /// Compute generations on one thread instead of per-row tasks
    #[arg(long)]
    pub sequential: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Dump the default configuration to stdout
    DumpDefaultConfig,
}

impl Cli {
    /// Command-line values take precedence over the config file.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(pattern) = &self.pattern {
            config.pattern = pattern.clone();
            config.cells.clear();
        }
        if !self.cells.is_empty() {
            config.cells = self.cells.clone();
        }
        if let Some(ms) = self.interval_ms {
            config.tick_interval_ms = ms;
        }
        if let Some(generations) = self.generations {
            config.generations = Some(generations);
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.sequential {
            config.parallel = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_and_overrides_apply() {
        let cli = Cli::try_parse_from([
            "conway-coro", "--cell", "1,2", "--cell", "3,4", "--interval-ms", "20", "--sequential", "--width", "9",
        ])
        .unwrap();
        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert_eq!(config.cells, vec![(1, 2), (3, 4)]);
        assert_eq!(config.tick_interval_ms, 20);
        assert_eq!(config.width, 9);
        assert!(!config.parallel);
    }

    #[test]
    fn pattern_flag_replaces_config_cells() {
        let cli = Cli::try_parse_from(["conway-coro", "--pattern", "Glider"]).unwrap();
        let mut config = AppConfig { cells: vec![(0, 0)], ..AppConfig::default() };
        cli.apply(&mut config);
        assert!(config.cells.is_empty());
        assert_eq!(config.pattern, "Glider");
    }

    #[test]
    fn malformed_cell_is_rejected() {
        assert!(Cli::try_parse_from(["conway-coro", "--cell", "12"]).is_err());
    }

    #[test]
    fn dump_subcommand_parses() {
        let cli = Cli::try_parse_from(["conway-coro", "dump-default-config"]).unwrap();
        assert_eq!(cli.command, Some(Commands::DumpDefaultConfig));
    }
}
