use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use rlp_rust::{client_version, encode_json, is_canonical, render_tree, to_json, Config};
use rlp_types::Bytes;

#[derive(Parser)]
#[command(name = "rlp-rust")]
#[command(version, about = "Encode and inspect Recursive-Length-Prefix data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the configured log level
    #[arg(short, long)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode hex-encoded RLP and print every top-level item
    Decode {
        /// Hex input, with or without 0x
        input: String,

        /// Print JSON instead of a tree
        #[arg(long)]
        json: bool,

        /// Also report whether the input is canonical
        #[arg(long)]
        check: bool,
    },

    /// Encode a JSON value as RLP and print it as hex
    Encode {
        /// JSON input: integers, strings, arrays and null
        input: String,
    },

    /// Write the default configuration file
    Config {
        /// Destination path
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(level) = cli.log_level {
        config.log.level = level;
    }

    init_logging(&config)?;
    debug!("{}", client_version());

    match cli.command {
        Commands::Decode { input, json, check } => {
            let bytes = Bytes::from_hex(input.trim()).context("Invalid hex input")?;
            info!("Decoding {} bytes", bytes.len());

            if json {
                let value = to_json(&bytes, &config)?;
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                print!("{}", render_tree(&bytes, &config)?);
            }

            if check {
                if is_canonical(&bytes, config.decode.max_depth)? {
                    println!("canonical");
                } else {
                    warn!("Input is valid RLP but not in canonical form");
                    println!("not canonical");
                }
            }
        }

        Commands::Encode { input } => {
            let json: serde_json::Value =
                serde_json::from_str(&input).context("Invalid JSON input")?;
            let encoded = encode_json(&json)?;
            info!("Encoded {} bytes", encoded.len());
            println!("{}", config.output.hex(&encoded));
        }

        Commands::Config { path } => {
            Config::default().to_file(&path)?;
            info!("Wrote default configuration to {}", path.display());
        }
    }

    Ok(())
}

fn init_logging(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.level))
        .context("Invalid log level")?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log.json {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(())
}
