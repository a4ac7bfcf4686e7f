//! Scoped loading flag.

use tokio::sync::watch;

use crate::state::StoreState;

/// Clears [`StoreState::loading`] when dropped.
///
/// Created at the start of every store action. Because the reset lives in
/// `Drop`, it runs when the action returns `Ok`, when it returns `Err`, and
/// when the caller drops the action future before it completes.
pub(crate) struct LoadingGuard<'a> {
    state: &'a watch::Sender<StoreState>,
}

impl<'a> LoadingGuard<'a> {
    /// Set `loading`, clear `error`, and arm the guard.
    pub(crate) fn begin(state: &'a watch::Sender<StoreState>) -> Self {
        state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.loading = false);
    }
}
