//! Record encoding command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use didcard::store::RecordStore;
use didcard::{encode_record, render_optical_code_to_file, FileRecordStore, QrConfig, Record};

use super::{parse_qr_format, CommandExecutor};

/// Encrypt an identity record into a token and optionally render its QR code.
#[derive(Args, Debug)]
pub struct EncodeCommand {
    /// Identifier (e.g. a DID)
    #[arg(short, long)]
    pub identifier: String,

    /// Signing key associated with the identifier
    #[arg(short, long)]
    pub signing_key: String,

    /// Write the QR code to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// QR format: png (default), svg, or ascii
    #[arg(short, long, default_value = "png")]
    pub format: String,

    /// Also write the raw token text to this file
    #[arg(long)]
    pub token_out: Option<PathBuf>,

    /// Do not persist the record to the local slot
    #[arg(long)]
    pub no_save: bool,
}

impl CommandExecutor for EncodeCommand {
    fn execute(&self) -> Result<()> {
        let record = Record::new(&self.identifier, &self.signing_key);
        let token = encode_record(&record).context("Failed to encode record")?;

        println!("{}", token);

        if let Some(output) = &self.output {
            let config = QrConfig {
                format: parse_qr_format(&self.format)?,
                ..Default::default()
            };
            render_optical_code_to_file(&token, output, &config)
                .context("Failed to render QR code")?;
            eprintln!("QR code written to {}", output.display());
        }

        if let Some(token_out) = &self.token_out {
            std::fs::write(token_out, &token).context("Failed to write token file")?;
            eprintln!("Token written to {}", token_out.display());
        }

        if !self.no_save {
            let mut store =
                FileRecordStore::open_default().context("Failed to open record slot")?;
            store.write(&record).context("Failed to persist record")?;
        }

        Ok(())
    }
}
