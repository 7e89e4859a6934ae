//! The serialized mutation pipeline.

use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;

type Task = Box<dyn FnOnce() + Send + 'static>;

/// A strictly ordered single-consumer task queue on a dedicated worker
/// thread.
///
/// All mutations against one shared structure go through one pipe, so
/// concurrent submitters never interleave arbitrarily: tasks run to
/// completion in submission order. Submission never blocks; callers that
/// need a result continue via a callback captured in the task rather
/// than waiting on the queue.
///
/// Dropping the pipe closes the channel, lets the worker drain every
/// task already submitted, and joins it, so in-flight tasks never touch
/// state that outlives the pipe's owner.
pub struct TaskPipe {
    tx: Option<Sender<Task>>,
    worker: Option<JoinHandle<()>>,
}

impl TaskPipe {
    /// Start the worker thread with an empty queue.
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded::<Task>();
        let worker = thread::spawn(move || {
            for task in rx {
                task();
            }
        });
        Self {
            tx: Some(tx),
            worker: Some(worker),
        }
    }

    /// Enqueue a task behind everything already submitted. Never blocks.
    pub fn submit(&self, task: impl FnOnce() + Send + 'static) {
        if let Some(tx) = &self.tx {
            // Fails only if the worker panicked; the task is dropped.
            let _ = tx.send(Box::new(task));
        }
    }

    /// Block until every task submitted before this call has finished.
    ///
    /// Implemented as a fence task: since the queue is FIFO, its ack
    /// proves everything ahead of it ran.
    pub fn wait_until_empty(&self) {
        let (ack_tx, ack_rx) = crossbeam_channel::bounded(1);
        self.submit(move || {
            let _ = ack_tx.send(());
        });
        let _ = ack_rx.recv();
    }
}

impl Default for TaskPipe {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TaskPipe {
    fn drop(&mut self) {
        // Closing the channel ends the worker's loop once it has drained
        // the remaining tasks.
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
