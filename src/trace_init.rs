//! Optional file logging for hosts.
//!
//! Every key event runs inside a `process_key_event` span (`skk_session`),
//! and the conversion steps under it log at debug level: candidate lookups
//! and completions in `skk_core`, commits, learning and registration in
//! `skk_session`. Built with the `trace` feature, [`init_tracing`] writes
//! those events as JSON lines so a misconversion reported by a user can be
//! replayed key by key. Without the feature it does nothing.

use std::path::Path;

/// Log file created in the directory handed to [`init_tracing`].
pub const TRACE_FILE: &str = "skk-trace.jsonl";

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "skk_engine=debug,skk_session=debug,skk_core=debug";

/// Install the JSON subscriber writing to `log_dir/`[`TRACE_FILE`].
///
/// Returns `true` only for the call that installed it. Later calls, and
/// calls made after the host set up its own subscriber, leave logging as
/// it is.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) -> bool {
    use std::sync::atomic::{AtomicBool, Ordering};

    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    static INSTALLED: AtomicBool = AtomicBool::new(false);
    if INSTALLED.swap(true, Ordering::SeqCst) {
        return false;
    }

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(log_dir, TRACE_FILE));
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let installed = tracing_subscriber::fmt()
        .json()
        .with_writer(writer)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(filter)
        .try_init()
        .is_ok();
    if installed {
        // The writer thread flushes until the process exits.
        std::mem::forget(guard);
    }
    installed
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &Path) -> bool {
    false
}
