//! didcard - Portable encrypted identity records
//!
//! A CLI tool that encrypts an identifier + signing-key record into a
//! token, renders it as a QR code, and recovers records from tokens, QR
//! images, or imported files.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{
    ClearCommand, CommandExecutor, DecodeCommand, EncodeCommand, ImportCommand, ShowCommand,
};

/// didcard - Portable encrypted identity records
///
/// Encode an identifier and signing key into an encrypted token carried as
/// a QR code or a flat text file, and recover the record again later.
#[derive(Parser)]
#[command(name = "didcard")]
#[command(version = "0.1.0")]
#[command(about = "Encrypted identity-record tokens carried as QR codes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a record into a token and optionally render its QR code
    Encode(EncodeCommand),

    /// Decrypt a token (text, file, or QR image) back into its record
    Decode(DecodeCommand),

    /// Import a QR image or token text file and recover its record
    Import(ImportCommand),

    /// Print the record stored in the local slot
    Show(ShowCommand),

    /// Clear the local record slot
    Clear(ClearCommand),
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Encode(cmd) => cmd.execute(),
        Commands::Decode(cmd) => cmd.execute(),
        Commands::Import(cmd) => cmd.execute(),
        Commands::Show(cmd) => cmd.execute(),
        Commands::Clear(cmd) => cmd.execute(),
    }
}
