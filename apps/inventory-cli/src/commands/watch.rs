//! # Watch Command
//!
//! Prints the full list now and again after every change to the store,
//! until interrupted or until `--updates` lists have been printed.

use futures::StreamExt;
use std::future::Future;
use std::io::Write;
use tracing::{debug, info};

use inventory_db::ItemsRepository;

use super::Printer;
use crate::error::{CliError, CliResult};

pub async fn watch<W: Write>(
    repo: &dyn ItemsRepository,
    printer: &mut Printer<W>,
    updates: Option<usize>,
    shutdown: impl Future<Output = ()>,
) -> CliResult<()> {
    let mut stream = repo.get_all_items_stream();
    tokio::pin!(shutdown);

    let mut printed = 0usize;
    loop {
        if updates.is_some_and(|limit| printed >= limit) {
            break;
        }

        tokio::select! {
            _ = &mut shutdown => {
                info!("Watch interrupted");
                break;
            }
            next = stream.next() => {
                let items = next.ok_or(CliError::StreamClosed)??;
                debug!(count = items.len(), "Item list changed");

                if printed > 0 {
                    printer.separator()?;
                }
                printer.items(&items)?;
                printer.flush()?;
                printed += 1;
            }
        }
    }

    // Dropping the stream unsubscribes.
    Ok(())
}
