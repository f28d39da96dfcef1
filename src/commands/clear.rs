//! Clear the persisted record slot.

use anyhow::{Context, Result};
use clap::Args;

use didcard::store::RecordStore;
use didcard::FileRecordStore;

use super::CommandExecutor;

/// Clear the record stored in the local slot.
#[derive(Args, Debug)]
pub struct ClearCommand {}

impl CommandExecutor for ClearCommand {
    fn execute(&self) -> Result<()> {
        let mut store = FileRecordStore::open_default().context("Failed to open record slot")?;
        store.clear().context("Failed to clear record slot")?;
        println!("Record slot cleared.");
        Ok(())
    }
}
