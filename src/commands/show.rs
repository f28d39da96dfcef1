//! Show the persisted record slot.

use anyhow::{Context, Result};
use clap::Args;

use didcard::store::RecordStore;
use didcard::FileRecordStore;

use super::CommandExecutor;

/// Print the record currently stored in the local slot.
#[derive(Args, Debug)]
pub struct ShowCommand {}

impl CommandExecutor for ShowCommand {
    fn execute(&self) -> Result<()> {
        let store = FileRecordStore::open_default().context("Failed to open record slot")?;
        match store.read().context("Failed to read record slot")? {
            Some(record) => {
                println!("identifier:  {}", record.identifier);
                println!("signing key: {}", record.signing_key);
            }
            None => println!("No record stored."),
        }
        Ok(())
    }
}
