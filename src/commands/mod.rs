//! Command module - Strategy pattern for CLI commands.
//!
//! Each command is a separate module implementing the `CommandExecutor`
//! trait.

mod clear;
mod decode;
mod encode;
mod import;
mod show;

pub use clear::ClearCommand;
pub use decode::DecodeCommand;
pub use encode::EncodeCommand;
pub use import::ImportCommand;
pub use show::ShowCommand;

use anyhow::Result;

/// Trait for command execution - Strategy pattern.
///
/// Each command struct holds its parsed arguments and implements this
/// trait to define its execution logic.
pub trait CommandExecutor {
    /// Executes the command with its parsed arguments.
    fn execute(&self) -> Result<()>;
}

/// Parse a QR output format flag.
pub(crate) fn parse_qr_format(format: &str) -> Result<didcard::QrFormat> {
    match format.to_lowercase().as_str() {
        "png" => Ok(didcard::QrFormat::Png),
        "svg" => Ok(didcard::QrFormat::Svg),
        "ascii" | "txt" => Ok(didcard::QrFormat::Ascii),
        _ => anyhow::bail!("Unknown format: {}. Use: png, svg, or ascii", format),
    }
}
