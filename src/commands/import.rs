//! File import command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use didcard::{import, FileRecordStore, ImportedFile, QrConfig, QrOutput};

use super::{parse_qr_format, CommandExecutor};

/// Import a QR image or a token text file and recover its record.
#[derive(Args, Debug)]
pub struct ImportCommand {
    /// Path to the file to import
    pub path: PathBuf,

    /// Override the declared content type (inferred from the extension
    /// otherwise)
    #[arg(long)]
    pub declared_type: Option<String>,

    /// Re-render the imported token's QR code to this path
    #[arg(long)]
    pub qr_out: Option<PathBuf>,

    /// QR format for --qr-out: png (default), svg, or ascii
    #[arg(short, long, default_value = "png")]
    pub format: String,
}

impl CommandExecutor for ImportCommand {
    fn execute(&self) -> Result<()> {
        let mut file = ImportedFile::from_path(&self.path).context("Failed to read file")?;
        if let Some(declared_type) = &self.declared_type {
            file.declared_type = declared_type.clone();
        }

        let config = QrConfig {
            format: parse_qr_format(&self.format)?,
            ..Default::default()
        };

        let mut store = FileRecordStore::open_default().context("Failed to open record slot")?;
        let outcome = import(&file, &mut store, &config).context("Import failed")?;

        println!("identifier:  {}", outcome.record.identifier);
        println!("signing key: {}", outcome.record.signing_key);
        println!("token:       {}", outcome.token);

        if let Some(qr_out) = &self.qr_out {
            match outcome.optical {
                QrOutput::Image(img) => img
                    .save(qr_out)
                    .context("Failed to write re-rendered QR code")?,
                QrOutput::Svg(s) | QrOutput::Ascii(s) => {
                    std::fs::write(qr_out, s).context("Failed to write re-rendered QR code")?
                }
            }
            eprintln!("QR code written to {}", qr_out.display());
        }

        Ok(())
    }
}
