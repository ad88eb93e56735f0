//! Ownership of background tasks.
//!
//! A [`TaskSet`] aborts everything it spawned when dropped, so a page that
//! goes away takes its timers and in-flight requests with it.

use std::future::Future;

use tokio::task::JoinHandle;

#[derive(Debug, Default)]
pub struct TaskSet {
    handles: Vec<JoinHandle<()>>,
}

impl TaskSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F>(&mut self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.handles.retain(|h| !h.is_finished());
        self.handles.push(tokio::spawn(future));
    }

    /// Number of tasks still running.
    #[must_use]
    pub fn live(&self) -> usize {
        self.handles.iter().filter(|h| !h.is_finished()).count()
    }

    /// Abort every task. Safe to call more than once.
    pub fn abort_all(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}

impl Drop for TaskSet {
    fn drop(&mut self) {
        self.abort_all();
    }
}

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tasks_test;
