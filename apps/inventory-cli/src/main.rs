//! Inventory CLI entry point.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    inventory_cli::run().await
}
