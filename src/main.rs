//! Naqb - DNS Tunneling Query Encoder
//!
//! Command-line front end for the encoding core: turns a message into the
//! sequence of query names a tunnel client would send, and inspects existing
//! names against the DNS length limits.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

use naqb::{alphabet, Domain, PackagedMessage, TunnelConfig};

/// Longest sequence label the encoder prepends: "q" plus a u64 in decimal
const SEQ_LABEL_MAX: usize = 21;

#[derive(Parser)]
#[command(name = "naqb")]
#[command(version)]
#[command(about = "DNS Tunneling Query Encoder", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a message into a sequence of query names
    Encode {
        /// Carrier domain (overrides the configured one)
        #[arg(short, long)]
        domain: Option<String>,

        /// Package the message as-is instead of base64-encoding it first
        #[arg(long)]
        raw: bool,

        /// Message to encode
        message: String,
    },

    /// Inspect a query name against the DNS length limits
    Inspect {
        /// Domain name to inspect
        name: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let config = match &cli.config {
        Some(path) => TunnelConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => TunnelConfig::default(),
    };

    match cli.command {
        Commands::Encode {
            domain,
            raw,
            message,
        } => encode(config, domain, raw, &message),
        Commands::Inspect { name } => inspect(&name),
    }
}

fn encode(config: TunnelConfig, domain: Option<String>, raw: bool, message: &str) -> Result<()> {
    let carrier_name = domain.unwrap_or(config.carrier);
    let base = Domain::parse(&carrier_name)
        .with_context(|| format!("Invalid carrier domain: {carrier_name}"))?;

    if base.max_next_label_length() < SEQ_LABEL_MAX {
        bail!("Carrier domain {carrier_name} leaves no room for a sequence label");
    }

    let payload = if raw || !config.encode_base64 {
        message.as_bytes().to_vec()
    } else {
        alphabet::encode_payload(message.as_bytes()).into_bytes()
    };

    info!(
        "Packaging {} payload bytes under {}",
        payload.len(),
        base
    );

    // Pure function of the sequence number: the carrier with a q<seq> label.
    // The room check above guarantees the label always fits.
    let format = move |seq: u64| {
        let label = format!("q{seq}");
        base.prepended(label).unwrap_or_else(|_| base.clone())
    };

    let packager = PackagedMessage::new(payload, format)
        .context("Message cannot be packaged")?;

    let mut queries = 0usize;
    for domain in packager {
        println!("{domain}");
        queries += 1;
    }

    info!("Emitted {queries} query names");
    Ok(())
}

fn inspect(name: &str) -> Result<()> {
    let domain = Domain::parse(name)
        .with_context(|| format!("Not a legal query name: {name}"))?;

    println!("name:           {domain}");
    println!("level:          {}", domain.level());
    println!("textual length: {} bytes", domain.textual_length());
    println!("label room:     {} bytes", domain.max_next_label_length());
    for (index, label) in domain.labels().iter().enumerate() {
        println!("  label {index}: {} bytes ({label})", label.len());
    }
    Ok(())
}
