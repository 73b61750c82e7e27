pub mod check_config;
pub mod evaluate;
pub mod init;
pub mod recommend;
pub mod translate;

use delf_core::cancel::{cancellation, CancelSignal};
use tokio::task::JoinHandle;

/// A signal that fires on Ctrl-C. Abort the returned task once the call is done.
pub(crate) fn cancel_on_ctrl_c(what: &'static str) -> (CancelSignal, JoinHandle<()>) {
    let (handle, signal) = cancellation();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("Interrupted, cancelling {what}...");
            handle.cancel();
        }
    });
    (signal, interrupt)
}
