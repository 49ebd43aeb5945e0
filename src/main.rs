use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use imagr_repl::input::{cancel_on_interrupt, spawn_stdin_reader};
use imagr_repl::Session;
use imagr_store::PlistStore;

/// Imagr - interactive editor for imaging workflow configuration
#[derive(Parser)]
#[command(name = "imagr")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to the configuration plist. Created on exit if it doesn't exist.
  plist: PathBuf,

  /// Log at debug level unless RUST_LOG says otherwise
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let session = Session::open(PlistStore::new(&cli.plist))
    .with_context(|| format!("failed to open {}", cli.plist.display()))?;

  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()?;
  // Exit, end of input and Ctrl-C all save the same way, and so does a
  // broken stdout.
  let termination = rt
    .block_on(async {
      let cancel = CancellationToken::new();
      cancel_on_interrupt(cancel.clone()).context("failed to listen for Ctrl-C")?;
      let termination = session
        .run_and_close(spawn_stdin_reader(), &mut io::stdout(), cancel)
        .await?;
      anyhow::Ok(termination)
    })
    .with_context(|| format!("session on {} failed", cli.plist.display()))?;

  info!(?termination, "saved");
  println!("Saved {}", cli.plist.display());
  Ok(())
}

fn init_tracing(verbose: bool) {
  let default = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .try_init();
}
