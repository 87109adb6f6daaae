use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Owns a spawned timer task and aborts it when dropped, so a timer never
/// outlives the state that armed it.
#[derive(Debug)]
pub struct TimerGuard {
    handle: JoinHandle<()>,
}

impl TimerGuard {
    pub fn spawn<F>(task: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(task),
        }
    }

    /// Deliver `message` on `tx` once `delay` has passed.
    pub fn after<T>(delay: Duration, tx: UnboundedSender<T>, message: T) -> Self
    where
        T: Send + 'static,
    {
        Self::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(message);
        })
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
