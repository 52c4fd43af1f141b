//! # ethkit-cli
//!
//! Command-line interface for the ethkit ABI codec, address checksums and
//! message signatures.
//!
//! ## Usage
//!
//! ```bash
//! # ABI commands
//! ethkit abi encode --types uint256,string '[42, "hi"]'
//! ethkit abi decode --types uint256,string 0x...
//!
//! # Address commands
//! ethkit address checksum 0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed
//! ethkit address validate 0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed
//!
//! # Hashing and signatures
//! ethkit keccak --text "hello, world"
//! ethkit sign --key 0x... "message"
//! ethkit verify "message" 0x...
//! ```

use clap::{Parser, Subcommand};
use ethkit_abi::EmptyBytesPadding;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use config::Config;
pub use error::CliError;
pub use output::Output;

/// ethkit CLI
#[derive(Parser, Debug)]
#[command(name = "ethkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Config file path (default: ~/.ethkit/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// ABI encoding and decoding
    #[command(subcommand)]
    Abi(commands::abi::AbiCommand),
    /// Address checksums
    #[command(subcommand)]
    Address(commands::address::AddressCommand),
    /// Keccak-256 hash of hex data or text
    Keccak {
        /// Input (0x hex, or text with --text)
        input: String,
        /// Treat input as UTF-8 text
        #[arg(long)]
        text: bool,
    },
    /// Sign a personal message
    Sign {
        /// Private key (0x hex)
        #[arg(short, long)]
        key: String,
        /// Message to sign
        message: String,
    },
    /// Recover the signer of a personal message
    Verify {
        /// Signed message
        message: String,
        /// Signature (0x hex, 65 bytes)
        signature: String,
    },
    /// Show or edit configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set padding of empty bytes (full-word or canonical)
        #[arg(long)]
        set_empty_bytes_padding: Option<EmptyBytesPadding>,
        /// Set default JSON output
        #[arg(long)]
        set_json_output: Option<bool>,
        /// Set default log level
        #[arg(long)]
        set_log_level: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with_error(&e, cli.json),
    };
    let json = cli.json || config.json_output;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(cli.log_level.as_deref().unwrap_or(config.log_level.as_str()))
    });
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let result = match cli.command {
        Commands::Abi(cmd) => cmd.execute(&config, json),
        Commands::Address(cmd) => cmd.execute(json),
        Commands::Keccak { input, text } => commands::keccak::execute(&input, text, json),
        Commands::Sign { key, message } => commands::sign::sign(&key, &message, json),
        Commands::Verify { message, signature } => {
            commands::sign::verify(&message, &signature, json)
        }
        Commands::Config {
            show,
            set_empty_bytes_padding,
            set_json_output,
            set_log_level,
        } => handle_config(
            &mut config,
            cli.config.as_deref(),
            ConfigUpdate {
                empty_bytes_padding: set_empty_bytes_padding,
                json_output: set_json_output,
                log_level: set_log_level,
            },
            show,
            json,
        ),
    };

    if let Err(e) = result {
        exit_with_error(&e, json);
    }
}

fn exit_with_error(e: &CliError, json: bool) -> ! {
    if json {
        println!(
            "{}",
            serde_json::json!({
                "error": e.to_string(),
                "success": false
            })
        );
    } else {
        eprintln!("Error: {}", e);
    }
    std::process::exit(1);
}

struct ConfigUpdate {
    empty_bytes_padding: Option<EmptyBytesPadding>,
    json_output: Option<bool>,
    log_level: Option<String>,
}

fn handle_config(
    config: &mut Config,
    path: Option<&Path>,
    update: ConfigUpdate,
    show: bool,
    json: bool,
) -> Result<(), CliError> {
    let mut modified = false;

    if let Some(padding) = update.empty_bytes_padding {
        config.empty_bytes_padding = padding;
        modified = true;
    }

    if let Some(json_output) = update.json_output {
        config.json_output = json_output;
        modified = true;
    }

    if let Some(level) = update.log_level {
        config.log_level = level;
        modified = true;
    }

    if modified {
        let saved = config.save(path)?;
        tracing::info!(path = %saved.display(), "configuration saved");
        Output::new(json)
            .field("status", "saved")
            .field("path", &saved.display().to_string())
            .message("Configuration saved")
            .print();
    } else if show {
        let padding = config.empty_bytes_padding.to_string();
        Output::new(json)
            .field("empty_bytes_padding", &padding)
            .field_bool("json_output", config.json_output)
            .field("log_level", &config.log_level)
            .message(&format!(
                "Empty bytes padding: {}\nJSON output: {}\nLog level: {}",
                padding, config.json_output, config.log_level
            ))
            .print();
    } else {
        Output::new(json)
            .message("Use --show to display config, or --set-empty-bytes-padding/--set-json-output/--set-log-level to modify")
            .print();
    }

    Ok(())
}
