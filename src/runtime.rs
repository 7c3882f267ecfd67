//! Global tokio runtime management.
//!
//! Provides a shared multi-threaded runtime for callers without one of their
//! own. [`BlockingClient`](crate::blocking::BlockingClient) and any transport
//! tasks it needs run on this runtime's thread pool.

use std::future::Future;
use std::sync::OnceLock;

use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::{GlideError, Result};

/// Environment variable overriding the worker thread count.
pub const THREADS_ENV: &str = "GLIDE_RUNTIME_THREADS";

/// Global tokio runtime, initialized once on first use. A build failure is
/// kept so every later caller sees the same error.
static RUNTIME: OnceLock<std::result::Result<Runtime, String>> = OnceLock::new();

/// Get (or initialize) the global tokio runtime.
///
/// The runtime is multi-threaded with the default number of worker threads
/// (typically equal to the number of CPU cores). Override with the
/// `GLIDE_RUNTIME_THREADS` environment variable.
pub fn get_runtime() -> Result<&'static Runtime> {
    RUNTIME
        .get_or_init(build)
        .as_ref()
        .map_err(|e| GlideError::Config(format!("failed to create tokio runtime: {e}")))
}

fn build() -> std::result::Result<Runtime, String> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();

    let threads = worker_threads(std::env::var(THREADS_ENV).ok().as_deref());
    if let Some(n) = threads {
        builder.worker_threads(n);
    }
    debug!(?threads, "starting shared runtime");

    builder
        .thread_name("glide-rt")
        .build()
        .map_err(|e| e.to_string())
}

/// Parse a thread-count override; zero and garbage are ignored.
fn worker_threads(raw: Option<&str>) -> Option<usize> {
    raw?.trim().parse::<usize>().ok().filter(|&n| n > 0)
}

/// Block on a future using the global runtime.
///
/// Note: This must NOT be called from within an async context (will panic).
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    Ok(get_runtime()?.block_on(future))
}

/// Spawn a future on the global runtime.
pub fn spawn<F>(future: F) -> Result<JoinHandle<F::Output>>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    Ok(get_runtime()?.spawn(future))
}

// ── Tests ──────────────────────────────────────────────────────────
