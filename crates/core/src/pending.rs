use crate::{error::RobotError, services::RemoteValue};
use std::{collections::VecDeque, future::Future};
use tokio::task::JoinHandle;
use tracing::debug;

/// Handle to a remote call that was issued without waiting for it.
pub type CallHandle = JoinHandle<Result<RemoteValue, RobotError>>;

/// Outstanding asynchronous calls, joined in the order they were issued.
///
/// Dropping a handle never cancels the call; the remote side runs it to completion
/// either way. Joining only decides when control returns to the caller.
#[derive(Debug, Default)]
pub struct PendingCalls {
    queue: VecDeque<CallHandle>,
}

impl PendingCalls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts `call` on the runtime and queues its handle.
    pub fn spawn<F>(&mut self, call: F)
    where
        F: Future<Output = Result<RemoteValue, RobotError>> + Send + 'static,
    {
        self.push(tokio::spawn(call));
    }

    pub fn push(&mut self, handle: CallHandle) {
        self.queue.push_back(handle);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Joins every queued call first-in first-out and empties the queue.
    ///
    /// Returns the result of the last call, or `None` when nothing was queued. The first
    /// failure is returned immediately and the rest of the queue is discarded; those
    /// calls keep running detached. Dropping the returned future part way leaves the
    /// calls not yet joined in the queue.
    pub async fn join_all(&mut self) -> Result<Option<RemoteValue>, RobotError> {
        debug!(count = self.queue.len(), "Joining pending calls");

        let mut last = None;
        while let Some(handle) = self.queue.front_mut() {
            let joined = handle.await;
            self.queue.pop_front();
            match joined {
                Ok(Ok(value)) => last = Some(value),
                Ok(Err(err)) => {
                    self.queue.clear();
                    return Err(err);
                }
                Err(err) => {
                    self.queue.clear();
                    return Err(err.into());
                }
            }
        }
        Ok(last)
    }
}
