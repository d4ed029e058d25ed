//! # Stego Binary Entry Point
//!
//! Thin wrapper that loads images, runs the LSB codec and writes the results.
//!
//! ## Usage
//!
//! ```bash
//! stego capacity photo.png
//! stego encode photo.png --output hidden.png --message "meet at noon"
//! stego encode photo.png --output hidden.png --input secret.bin --report run.json
//! stego decode hidden.png
//! stego decode hidden.png --output secret.bin
//! stego --config config/stego.toml decode hidden.png --base64 --lenient
//! ```

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose, Engine as _};
use clap::{Parser, Subcommand};
use log::{info, warn, LevelFilter};
use std::path::{Path, PathBuf};
use std::time::Instant;

use lsb_stego::common::config::StegoConfig;
use lsb_stego::common::container;
use lsb_stego::common::report::{Operation, RunReport};
use lsb_stego::processing::steganography::{self, DecodePolicy};
use lsb_stego::processing::TextEncoding;
use lsb_stego::utils::logging::init_logger;

/// Command-line arguments for the stego binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a configuration file (TOML format)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level regardless of the configured level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show how many bytes an image can hold
    Capacity {
        /// Image to inspect
        image: PathBuf,
    },

    /// Hide a message or file inside an image
    Encode {
        /// Carrier image
        image: PathBuf,

        /// Where to write the encoded image (png, bmp or tiff)
        #[arg(short, long)]
        output: PathBuf,

        /// Text message to hide
        #[arg(short, long, required_unless_present = "input", conflicts_with = "input")]
        message: Option<String>,

        /// File whose raw bytes are hidden
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Text encoding for --message (utf-8, utf-16le, utf-16be, ascii)
        #[arg(long)]
        encoding: Option<TextEncoding>,

        /// Write a JSON run report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Recover a hidden payload from an image
    Decode {
        /// Encoded image
        image: PathBuf,

        /// Write the raw payload bytes to this file instead of printing
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Text encoding used to print the payload
        #[arg(long)]
        encoding: Option<TextEncoding>,

        /// Print the payload as base64 instead of text
        #[arg(long, conflicts_with = "output")]
        base64: bool,

        /// Return a partial payload when no end marker is found
        #[arg(long)]
        lenient: bool,

        /// Write a JSON run report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = StegoConfig::load_or_default(args.config.as_deref())?;
    init_logger(resolve_level(args.verbose, &config)?);

    match args.command {
        Command::Capacity { image } => run_capacity(&image),
        Command::Encode {
            image,
            output,
            message,
            input,
            encoding,
            report,
        } => {
            let payload = match (message, input) {
                (Some(message), _) => resolve_encoding(encoding, &config).encode(&message)?,
                (None, Some(input)) => std::fs::read(&input)
                    .with_context(|| format!("Failed to read payload file {}", input.display()))?,
                (None, None) => bail!("Either --message or --input is required"),
            };
            run_encode(&config, &image, &output, &payload, report.as_deref())
        }
        Command::Decode {
            image,
            output,
            encoding,
            base64,
            lenient,
            report,
        } => {
            let policy = resolve_policy(lenient, &config);
            let payload = run_decode(&image, policy, report.as_deref())?;

            if let Some(output) = output {
                std::fs::write(&output, &payload)
                    .with_context(|| format!("Failed to write payload to {}", output.display()))?;
                info!("✅ Wrote {} bytes to {}", payload.len(), output.display());
            } else if base64 {
                println!("{}", general_purpose::STANDARD.encode(&payload));
            } else {
                println!("{}", resolve_encoding(encoding, &config).decode(&payload)?);
            }
            Ok(())
        }
    }
}

/// `--verbose` forces debug logging; otherwise the configured level applies.
fn resolve_level(verbose: bool, config: &StegoConfig) -> Result<LevelFilter> {
    if verbose {
        Ok(LevelFilter::Debug)
    } else {
        config.logging.level_filter()
    }
}

fn resolve_encoding(flag: Option<TextEncoding>, config: &StegoConfig) -> TextEncoding {
    flag.unwrap_or(config.codec.text_encoding)
}

fn resolve_policy(lenient: bool, config: &StegoConfig) -> DecodePolicy {
    if lenient {
        DecodePolicy::Lenient
    } else {
        config.codec.unterminated
    }
}

fn run_capacity(image: &Path) -> Result<()> {
    let buffer = container::load_from_path(image)
        .with_context(|| format!("Failed to load image {}", image.display()))?;

    println!("Image:           {}", image.display());
    println!("Dimensions:      {}x{}", buffer.width(), buffer.height());
    println!("Store size:      {} bytes", steganography::data_store_size(&buffer));
    println!("Max payload:     {} bytes", steganography::max_payload_len(&buffer));
    Ok(())
}

fn run_encode(
    config: &StegoConfig,
    image: &Path,
    output: &Path,
    payload: &[u8],
    report: Option<&Path>,
) -> Result<()> {
    let started = Instant::now();
    let mut buffer = container::load_from_path(image)
        .with_context(|| format!("Failed to load image {}", image.display()))?;

    // Check the payload fits before touching any pixels
    if let Err(e) = steganography::check_fits(&buffer, payload) {
        warn!(
            "⚠️  Payload cannot be encoded into {}: {}",
            image.display(),
            e
        );
        return Err(e.into());
    }

    info!(
        "📤 Encoding {} bytes ({} bytes left in store)",
        payload.len(),
        steganography::bytes_left(&buffer, payload)
    );
    steganography::encode(&mut buffer, payload)?;

    container::save_to_path(&buffer, output, config.output.format)
        .with_context(|| format!("Failed to save encoded image {}", output.display()))?;
    info!("✅ Payload encoded to {}", output.display());

    if let Some(path) = report {
        RunReport::new(Operation::Encode, image, &buffer, payload.len(), started.elapsed())
            .export_to_json(path)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
    }

    Ok(())
}

fn run_decode(image: &Path, policy: DecodePolicy, report: Option<&Path>) -> Result<Vec<u8>> {
    let started = Instant::now();
    let buffer = container::load_from_path(image)
        .with_context(|| format!("Failed to load image {}", image.display()))?;

    let payload = steganography::decode(&buffer, policy)
        .with_context(|| format!("Failed to decode payload from {}", image.display()))?;
    info!("📥 Decoded {} bytes from {}", payload.len(), image.display());

    if let Some(path) = report {
        RunReport::new(Operation::Decode, image, &buffer, payload.len(), started.elapsed())
            .export_to_json(path)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
    }

    Ok(payload)
}
