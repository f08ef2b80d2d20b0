//! # Warehouse Master CLI
//!
//! Line-oriented front end for the warehouse store.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load warehouse.toml (path from the first argument, else platform dir)
//! 3. Start a tokio runtime for the expiration monitor
//! 4. Open the store and load the data file
//! 5. Read commands from stdin until `quit` or EOF
//! 6. Shut the store down

pub mod commands;
pub mod error;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use warehouse_store::{Warehouse, WarehouseConfig};

use crate::commands::{execute, Command, Reply};
use crate::error::CliError;

/// Runs the CLI until `quit` or end of input.
pub fn run() -> Result<(), CliError> {
    init_tracing();

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => WarehouseConfig::load(Some(path))?,
        None => WarehouseConfig::load_or_default(None),
    };
    debug!(?config, "Configuration loaded");

    // The stdin loop blocks this thread; the monitor runs on the worker
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("warehouse-monitor")
        .enable_time()
        .build()?;
    let _guard = runtime.enter();

    let warehouse = Warehouse::open(config)?;
    warehouse.load_data();
    info!(count = warehouse.len(), "Warehouse ready");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let result = repl(&warehouse, stdin.lock(), stdout.lock());

    warehouse.shutdown();
    result
}

/// Reads commands from `input` and writes replies to `output`.
///
/// Command errors are printed and the loop continues.
pub fn repl<R, W>(warehouse: &Warehouse, input: R, mut output: W) -> Result<(), CliError>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "Warehouse Master. Type 'help' for commands.")?;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;

        let reply = Command::parse(&line).and_then(|command| match command {
            Some(command) => execute(warehouse, command).map(Some),
            None => Ok(None),
        });

        match reply {
            Ok(Some(Reply::Quit)) => return Ok(()),
            Ok(Some(Reply::Text(text))) => writeln!(output, "{text}")?,
            Ok(None) => {}
            Err(e) => writeln!(output, "{e}")?,
        }

        write!(output, "> ")?;
        output.flush()?;
    }

    writeln!(output)?;
    Ok(())
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// Set via `RUST_LOG` environment variable:
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=warehouse_store=trace` - Trace the store only
/// - Default: INFO level, DEBUG for the warehouse crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,warehouse=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
