/// Edge Decoder Configuration
///
/// Process-wide defaults live in atomics so hosts can flip them once at
/// startup; every decoding entry point snapshots them into a
/// `DecoderOptions` value and never rereads them mid-call.

use std::sync::atomic::{AtomicBool, Ordering};

static DEBUG: AtomicBool = AtomicBool::new(false);
static IMPLICIT_MOVE_AFTER_CLOSE: AtomicBool = AtomicBool::new(false);
static SPLIT_ON_STYLE_CHANGE: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecoderOptions {
    /// Log a per-call summary of decoded command kinds.
    pub debug: bool,
    /// After `/`, start the next non-move drawing command with a synthesized
    /// `MoveTo` at the closed subpath's start.
    pub implicit_move_after_close: bool,
    /// Split edges at inline `S<n>` style changes.
    pub split_on_style_change: bool,
}

impl DecoderOptions {
    /// Snapshot of the process-wide defaults.
    pub fn global() -> Self {
        Self {
            debug: DEBUG.load(Ordering::Relaxed),
            implicit_move_after_close: IMPLICIT_MOVE_AFTER_CLOSE.load(Ordering::Relaxed),
            split_on_style_change: SPLIT_ON_STYLE_CHANGE.load(Ordering::Relaxed),
        }
    }

    pub fn with_debug_override(mut self, debug: Option<bool>) -> Self {
        if let Some(debug) = debug {
            self.debug = debug;
        }
        self
    }
}

pub fn set_debug(enabled: bool) {
    DEBUG.store(enabled, Ordering::Relaxed);
}

pub fn is_debug() -> bool {
    DEBUG.load(Ordering::Relaxed)
}

pub fn set_implicit_move_after_close(enabled: bool) {
    IMPLICIT_MOVE_AFTER_CLOSE.store(enabled, Ordering::Relaxed);
}

pub fn is_implicit_move_after_close() -> bool {
    IMPLICIT_MOVE_AFTER_CLOSE.load(Ordering::Relaxed)
}

pub fn set_split_on_style_change(enabled: bool) {
    SPLIT_ON_STYLE_CHANGE.store(enabled, Ordering::Relaxed);
}

pub fn is_split_on_style_change() -> bool {
    SPLIT_ON_STYLE_CHANGE.load(Ordering::Relaxed)
}
