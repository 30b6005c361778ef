use std::sync::{Mutex, PoisonError};

use tokio_util::sync::CancellationToken;

/// Owns the cancellation token of the active unit selection.
///
/// Beginning a new selection cancels the previous token, so fetches started
/// for a superseded selection resolve to `GridError::Cancelled`.
pub(crate) struct SelectionScope {
    current: Mutex<CancellationToken>,
}

impl SelectionScope {
    pub(crate) fn new() -> Self {
        Self {
            current: Mutex::new(CancellationToken::new()),
        }
    }

    pub(crate) fn begin(&self) -> CancellationToken {
        let mut guard = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        guard.cancel();
        *guard = CancellationToken::new();
        guard.clone()
    }

    pub(crate) fn current(&self) -> CancellationToken {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
