use std::time::Duration;

use tokio::spawn;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::sleep;
use tracing::debug;

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Collapses bursts of search keystrokes into a single settled value.
///
/// Each pushed value restarts the quiet period; only the last value of a burst is
/// handed to the callback. A value still pending when the debouncer is finished is
/// flushed rather than dropped.
pub struct SearchDebouncer {
    sender: mpsc::UnboundedSender<String>,
    handle: JoinHandle<()>
}

impl SearchDebouncer {
    pub fn spawn<F>(quiet_period: Duration, mut on_settled: F) -> Self
    where
        F: FnMut(String) + Send + 'static,
    {
        let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

        let handle = spawn(async move {
            let mut pending: Option<String> = None;

            loop {
                let Some(current) = pending.take() else {
                    match receiver.recv().await {
                        Some(search) => {
                            pending = Some(search);
                            continue;
                        }
                        None => break
                    }
                };

                tokio::select! {
                    next = receiver.recv() => match next {
                        Some(search) => pending = Some(search),
                        None => {
                            on_settled(current);
                            break;
                        }
                    },
                    _ = sleep(quiet_period) => {
                        debug!("Search settled on '{current}'");
                        on_settled(current);
                    }
                }
            }
        });

        Self { sender, handle }
    }

    /// Queues a new search value. Returns `false` once the debouncer has stopped.
    pub fn push(&self, search: impl Into<String>) -> bool {
        self.sender.send(search.into()).is_ok()
    }

    /// Stops accepting input and waits for any pending value to be delivered.
    pub async fn finish(self) -> Result<(), JoinError> {
        drop(self.sender);
        self.handle.await
    }
}
