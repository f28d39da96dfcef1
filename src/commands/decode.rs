//! Token decoding command.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use didcard::store::RecordStore;
use didcard::{decode_still_from_file, decode_token, FileRecordStore};

use super::CommandExecutor;

/// Decrypt a token back into its identity record.
#[derive(Args, Debug)]
pub struct DecodeCommand {
    /// The token text - reads from stdin if no source is given
    #[arg(long, conflicts_with_all = ["token_file", "qr"])]
    pub token: Option<String>,

    /// Read the token from a text file
    #[arg(long, conflicts_with_all = ["token", "qr"])]
    pub token_file: Option<PathBuf>,

    /// Read the token from a QR image file
    #[arg(long, conflicts_with_all = ["token", "token_file"])]
    pub qr: Option<PathBuf>,

    /// Do not persist the record to the local slot
    #[arg(long)]
    pub no_save: bool,
}

impl CommandExecutor for DecodeCommand {
    fn execute(&self) -> Result<()> {
        let token = if let Some(token) = &self.token {
            token.trim().to_string()
        } else if let Some(path) = &self.token_file {
            std::fs::read_to_string(path)
                .context("Failed to read token file")?
                .trim()
                .to_string()
        } else if let Some(path) = &self.qr {
            decode_still_from_file(path).context("Failed to read QR image")?
        } else {
            eprintln!("Reading token from stdin (Ctrl+D to finish):");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read token from stdin")?;
            buffer.trim().to_string()
        };

        if token.is_empty() {
            anyhow::bail!("Token cannot be empty");
        }

        let record = decode_token(&token).context("Failed to decode token")?;

        println!("identifier:  {}", record.identifier);
        println!("signing key: {}", record.signing_key);

        if !self.no_save {
            let mut store =
                FileRecordStore::open_default().context("Failed to open record slot")?;
            store.write(&record).context("Failed to persist record")?;
        }

        Ok(())
    }
}
