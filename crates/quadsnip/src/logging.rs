// Author: Dustin Pilgrim
// License: MIT
//
// eventline setup for the quadsnip binary. One file log, always; the
// console only mirrors it under --verbose, which also lowers the level
// to Debug. A short-lived CLI needs nothing fancier.

use std::future::Future;
use std::path::Path;
use std::task::{Context, Poll, Waker};

use eventline::runtime::{self, LogLevel};

pub fn init_logging(log_path: &Path, verbose: bool) -> Result<(), String> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| format!("create log dir: {e}"))?;
    }

    // runtime::init is async but quadsnip carries no executor; poll it
    // inline until it settles.
    run_to_completion(runtime::init());

    runtime::enable_file_output(log_path).map_err(|e| format!("enable file output: {e}"))?;
    runtime::enable_console_output(verbose);
    runtime::set_log_level(if verbose { LogLevel::Debug } else { LogLevel::Info });

    Ok(())
}

/// Drive one future to completion on the current thread. A no-op waker is
/// enough here: the init future is short-lived and poll-driven.
fn run_to_completion<F: Future>(fut: F) -> F::Output {
    let mut fut = std::pin::pin!(fut);
    let mut cx = Context::from_waker(Waker::noop());

    loop {
        match fut.as_mut().poll(&mut cx) {
            Poll::Ready(v) => return v,
            Poll::Pending => std::thread::yield_now(),
        }
    }
}
