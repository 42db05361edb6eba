use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info"
    )]
    pub log_level: LevelFilter,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Solve a bin packing instance file
    Solve {
        #[arg(short, long, value_name = "FILE")]
        input_file: PathBuf,
        #[arg(short, long, value_name = "FOLDER")]
        solution_folder: PathBuf,
        #[arg(short, long, value_name = "FILE")]
        config_file: Option<PathBuf>,
    },
    /// Generate a random instance file
    Gen {
        /// Total number of items to generate
        #[arg(short, long)]
        n_items: usize,
        /// Truck type selecting the bin dimensions (1..=4)
        #[arg(short, long, default_value_t = 1)]
        truck_type: usize,
        #[arg(short, long, value_name = "FILE")]
        output_file: PathBuf,
        #[arg(short, long, value_name = "FILE")]
        config_file: Option<PathBuf>,
    },
}
