//! OxiHuff CLI
//!
//! Character-level Huffman compression: frequency analysis, weight files,
//! encoding, decoding and code table inspection.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::{cmd_codes, cmd_decode, cmd_encode, cmd_weights};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxihuff")]
#[command(author, version, about = "Pure Rust character-level Huffman compressor")]
#[command(long_about = "
OxiHuff compresses text with a Huffman code built from per-character
frequency weights. The weight file is needed again to decode, together
with the same --optimize setting used to encode.

Examples:
  oxihuff weights book.txt -o book.weights
  oxihuff encode book.txt book.huf -w book.weights
  oxihuff decode book.huf book.out -w book.weights
  oxihuff codes -w book.weights --tree
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Suppress reports, progress bars and logging below error
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Count character frequencies of a file
    #[command(alias = "w")]
    Weights {
        /// File to analyze
        input: PathBuf,

        /// Save the weights to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,

        /// Overwrite the output file without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Compress a file
    #[command(alias = "e")]
    Encode {
        /// File to compress
        input: PathBuf,

        /// Compressed output file
        output: PathBuf,

        /// Weight file (generated from the input if missing or empty)
        #[arg(short, long)]
        weights: PathBuf,

        /// Break weight ties towards the shallowest tree
        #[arg(long)]
        optimize: bool,

        /// Overwrite the output file without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Decompress a file
    #[command(alias = "d")]
    Decode {
        /// Compressed file
        input: PathBuf,

        /// Decompressed output file
        output: PathBuf,

        /// Weight file used to compress
        #[arg(short, long)]
        weights: PathBuf,

        /// Must match the setting used to compress
        #[arg(long)]
        optimize: bool,

        /// Overwrite the output file without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Show the code table derived from a weight file
    #[command(alias = "c")]
    Codes {
        /// Weight file
        #[arg(short, long)]
        weights: PathBuf,

        /// Break weight ties towards the shallowest tree
        #[arg(long)]
        optimize: bool,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,

        /// Also print the tree structure
        #[arg(short, long)]
        tree: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    utils::init_logging(&cli.log_level, cli.quiet);

    let result = match cli.command {
        Commands::Weights {
            input,
            output,
            json,
            force,
        } => cmd_weights(&input, output.as_deref(), json, force, cli.quiet),
        Commands::Encode {
            input,
            output,
            weights,
            optimize,
            force,
        } => cmd_encode(&input, &output, &weights, optimize, force, cli.quiet),
        Commands::Decode {
            input,
            output,
            weights,
            optimize,
            force,
        } => cmd_decode(&input, &output, &weights, optimize, force, cli.quiet),
        Commands::Codes {
            weights,
            optimize,
            json,
            tree,
        } => cmd_codes(&weights, optimize, json, tree),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
