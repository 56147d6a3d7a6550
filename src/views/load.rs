//! Asynchronous load lifecycle of a screen
//!
//! A [`Loader`] runs one fetch on the tokio runtime and publishes its
//! outcome as a [`LoadState`]. Dropping the loader aborts the fetch, so a
//! torn-down screen never receives a late update. Cancelling settles a
//! pending load as failed with [`CANCELLED`].

use std::{future::Future, sync::Arc};

use tokio::{sync::watch, task::JoinHandle};

use crate::error::AppResult;

pub const CANCELLED: &str = "Loading was cancelled.";

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Pending,
    Ready(T),
    /// User-facing message
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

pub struct Loader<T> {
    state: Arc<watch::Sender<LoadState<T>>>,
    task: Option<JoinHandle<()>>,
}

impl<T> Loader<T>
where
    T: Send + Sync + 'static,
{
    /// Start `fetch`; a failure is published as `failure_message`
    pub fn spawn<F>(fetch: F, failure_message: &str) -> Self
    where
        F: Future<Output = AppResult<T>> + Send + 'static,
    {
        let (tx, _) = watch::channel(LoadState::Pending);
        let state = Arc::new(tx);
        let writer = state.clone();
        let failure_message = failure_message.to_string();

        let task = tokio::spawn(async move {
            let next = match fetch.await {
                Ok(value) => LoadState::Ready(value),
                Err(e) => {
                    tracing::warn!("Load failed: {}", e);
                    LoadState::Failed(failure_message)
                }
            };
            writer.send_replace(next);
        });

        Self {
            state,
            task: Some(task),
        }
    }

    /// A loader with a fixed state and no fetch
    pub fn from_state(state: LoadState<T>) -> Self {
        let (tx, _) = watch::channel(state);
        Self {
            state: Arc::new(tx),
            task: None,
        }
    }

    /// Borrow the current state. Do not hold across an `.await`.
    pub fn state(&self) -> watch::Ref<'_, LoadState<T>> {
        self.state.borrow()
    }

    /// Wait until the load has settled
    pub async fn wait(&self) {
        let mut rx = self.state.subscribe();
        // The sender lives as long as `self`, so this cannot fail.
        let _ = rx.wait_for(|state| !state.is_pending()).await;
    }

    /// Modify the loaded value in place; no-op unless ready
    pub fn modify(&self, f: impl FnOnce(&mut T)) -> bool {
        self.state.send_if_modified(|state| match state {
            LoadState::Ready(value) => {
                f(value);
                true
            }
            _ => false,
        })
    }

    /// Abort the fetch if it is still running.
    ///
    /// A load that had not settled becomes `Failed(CANCELLED)`, so waiters
    /// wake up. A settled state is left as is.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.state.send_if_modified(|state| {
            if !state.is_pending() {
                return false;
            }
            *state = LoadState::Failed(CANCELLED.to_string());
            true
        });
    }
}

impl<T> Drop for Loader<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
