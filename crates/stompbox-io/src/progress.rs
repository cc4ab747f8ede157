//! Progress reports and cooperative cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Reported after each chunk has been written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Chunks written so far (1-based).
    pub chunk: usize,
    /// Total number of chunks.
    pub chunks: usize,
    /// Fraction of frames written, in `[0, 1]`. Exactly 1.0 after the last chunk.
    pub fraction: f64,
}

impl Progress {
    /// Whether this is the report for the final chunk.
    pub fn is_done(&self) -> bool {
        self.chunk == self.chunks
    }
}

/// Shared flag checked between chunks.
///
/// Clones share the same flag, so one clone can be handed to a signal handler
/// while the pipeline polls another.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// A token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
