//! Injected progress reporting for import runs.
//!
//! The importer and the store upsert loop report per-entity notices and skip
//! warnings through a capability passed to the call rather than through
//! global logging state, so callers decide where operator-facing output goes.

/// Receiver for operator-facing notices emitted during an import run.
///
/// Messages are informational only and not part of the import contract.
pub trait Progress {
    /// Report a routine notice, such as an entity being created or updated.
    fn info(&mut self, message: &str);
    /// Report a non-fatal problem, such as a skipped listing element.
    fn warn(&mut self, message: &str);
}

/// [`Progress`] implementation forwarding to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl Progress for LogProgress {
    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn warn(&mut self, message: &str) {
        log::warn!("{message}");
    }
}

/// [`Progress`] implementation that discards all messages.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl Progress for NullProgress {
    fn info(&mut self, _message: &str) {}

    fn warn(&mut self, _message: &str) {}
}
