//! Sources of operator input for the session loop.

use std::io::{self, BufRead};
use std::thread;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Read stdin on a dedicated thread and forward each line.
///
/// The channel closes at end of input. The thread is not joined; it is left
/// blocked on stdin when the session ends first.
pub fn spawn_stdin_reader() -> mpsc::Receiver<String> {
  let (sender, receiver) = mpsc::channel(16);

  thread::spawn(move || {
    let stdin = io::stdin();
    forward_lines(stdin.lock(), &sender);
    debug!("stdin reader finished");
  });

  receiver
}

/// Send every line of `reader` to `sender`, blocking while the channel is full.
///
/// Bytes that are not UTF-8 are replaced rather than ending the input, so a
/// stray byte costs one rejected command. Stops at end of input, on a read
/// error, or when the receiver is gone.
pub fn forward_lines<R: BufRead>(mut reader: R, sender: &mpsc::Sender<String>) {
  let mut buf = Vec::new();
  loop {
    buf.clear();
    match reader.read_until(b'\n', &mut buf) {
      Ok(0) => break,
      Ok(_) => {}
      Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
      Err(e) => {
        warn!(error = %e, "failed to read input");
        break;
      }
    }

    if buf.last() == Some(&b'\n') {
      buf.pop();
      if buf.last() == Some(&b'\r') {
        buf.pop();
      }
    }
    let line = String::from_utf8_lossy(&buf).into_owned();
    if sender.blocking_send(line).is_err() {
      break;
    }
  }
}

/// Cancel `cancel` when the process receives Ctrl-C.
///
/// The listener is installed before this returns, so an interrupt that
/// arrives right after is not lost. Must be called inside a tokio runtime.
pub fn cancel_on_interrupt(cancel: CancellationToken) -> io::Result<()> {
  #[cfg(unix)]
  let mut interrupt = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?;
  #[cfg(windows)]
  let mut interrupt = tokio::signal::windows::ctrl_c()?;

  tokio::spawn(async move {
    if interrupt.recv().await.is_some() {
      debug!("interrupt received");
      cancel.cancel();
    }
  });
  Ok(())
}
