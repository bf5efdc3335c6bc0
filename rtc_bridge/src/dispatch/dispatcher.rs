// rtc_bridge/src/dispatch/dispatcher.rs
use crate::dispatch::policy::{EnqueueOutcome, QueuePolicy, RejectReason};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::mem::take;

/// Counters describing the queue's life so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub enqueued: u64,
    pub executed: u64,
    pub evicted: u64,
    pub rejected: u64,
    /// Tasks waiting right now.
    pub depth: usize,
}

struct QueueState<T> {
    tasks: VecDeque<T>,
    closed: bool,
    stats: DispatchStats,
}

struct Shared<T> {
    state: Mutex<QueueState<T>>,
    /// Signalled when a task arrives or the queue closes.
    ready: Condvar,
    /// Signalled when the consumer takes tasks out.
    space: Condvar,
    policy: QueuePolicy,
}

impl<T> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn close(&self) {
        self.lock().closed = true;
        self.ready.notify_all();
        self.space.notify_all();
    }

    fn stats(&self) -> DispatchStats {
        let state = self.lock();
        DispatchStats { depth: state.tasks.len(), ..state.stats }
    }
}

/// Creates a queue. The handle goes to producers, the drain side stays with
/// the consumer thread.
pub fn dispatch_queue<T: Send>(policy: QueuePolicy) -> (DispatchHandle<T>, DrainQueue<T>) {
    let shared = Arc::new(Shared {
        state: Mutex::new(QueueState {
            tasks: VecDeque::new(),
            closed: false,
            stats: DispatchStats::default(),
        }),
        ready: Condvar::new(),
        space: Condvar::new(),
        policy,
    });
    (DispatchHandle { shared: Arc::clone(&shared) }, DrainQueue { shared })
}

/// Producer side. Cheap to clone and usable from any thread.
pub struct DispatchHandle<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for DispatchHandle<T> {
    fn clone(&self) -> Self {
        Self { shared: Arc::clone(&self.shared) }
    }
}

impl<T: Send> DispatchHandle<T> {
    /// Appends a task. Never waits for the task to run; only the
    /// `BlockWithTimeout` policy may wait, and only for room in the queue.
    pub fn enqueue(&self, task: T) -> EnqueueOutcome {
        let mut state = self.shared.lock();
        if state.closed {
            state.stats.rejected += 1;
            return EnqueueOutcome::Rejected(RejectReason::Closed);
        }

        let mut evicted = None;
        if let Some(capacity) = self.shared.policy.capacity() {
            match self.shared.policy.timeout() {
                None => {
                    if state.tasks.len() >= capacity {
                        evicted = state.tasks.pop_front();
                        state.stats.evicted += 1;
                    }
                }
                Some(timeout) => {
                    let deadline = Instant::now() + timeout;
                    while state.tasks.len() >= capacity && !state.closed {
                        let now = Instant::now();
                        if now >= deadline {
                            state.stats.rejected += 1;
                            return EnqueueOutcome::Rejected(RejectReason::TimedOut);
                        }
                        state = self
                            .shared
                            .space
                            .wait_timeout(state, deadline - now)
                            .map(|(guard, _)| guard)
                            .unwrap_or_else(|e| e.into_inner().0);
                    }
                    if state.closed {
                        state.stats.rejected += 1;
                        return EnqueueOutcome::Rejected(RejectReason::Closed);
                    }
                }
            }
        }

        state.tasks.push_back(task);
        state.stats.enqueued += 1;
        drop(state);
        self.shared.ready.notify_one();

        // The evicted task is released here, outside the lock. Nobody else can
        // reach it any more.
        match evicted {
            Some(old) => {
                drop(old);
                EnqueueOutcome::QueuedEvictedOldest
            }
            None => EnqueueOutcome::Queued,
        }
    }

    /// Stops accepting tasks. Tasks already queued are still drained.
    pub fn close(&self) {
        self.shared.close();
    }

    pub fn is_closed(&self) -> bool {
        self.shared.lock().closed
    }

    pub fn stats(&self) -> DispatchStats {
        self.shared.stats()
    }
}

/// Tasks taken out of the queue for one drain. Counts what ran and, if
/// `execute` unwinds, puts the tasks that never started back at the head.
struct BatchGuard<'a, T> {
    shared: &'a Shared<T>,
    pending: VecDeque<T>,
    executed: usize,
}

impl<T> Drop for BatchGuard<'_, T> {
    fn drop(&mut self) {
        if self.executed == 0 && self.pending.is_empty() {
            return;
        }
        let mut state = self.shared.lock();
        state.stats.executed += self.executed as u64;
        while let Some(task) = self.pending.pop_back() {
            state.tasks.push_front(task);
        }
    }
}

/// Consumer side of the queue.
pub struct DrainQueue<T> {
    shared: Arc<Shared<T>>,
}

impl<T: Send> DrainQueue<T> {
    /// Runs every task queued at the time of the call, in arrival order.
    /// Returns how many ran.
    pub fn drain_pending<F: FnMut(T)>(&self, mut execute: F) -> usize {
        let batch = take(&mut self.shared.lock().tasks);
        self.shared.space.notify_all();
        self.execute_batch(batch, &mut execute)
    }

    /// Drains until the queue is closed and empty. Blocks while idle.
    pub fn run<F: FnMut(T)>(&self, mut execute: F) -> usize {
        let mut total = 0;
        loop {
            let batch = {
                let mut state = self.shared.lock();
                while state.tasks.is_empty() && !state.closed {
                    state = self.shared.ready.wait(state).unwrap_or_else(|e| e.into_inner());
                }
                if state.tasks.is_empty() {
                    return total;
                }
                take(&mut state.tasks)
            };
            self.shared.space.notify_all();
            total += self.execute_batch(batch, &mut execute);
        }
    }

    /// Like `run`, but returns once `timeout` has elapsed.
    pub fn run_for<F: FnMut(T)>(&self, timeout: Duration, mut execute: F) -> usize {
        let deadline = Instant::now() + timeout;
        let mut total = 0;
        loop {
            let batch = {
                let mut state = self.shared.lock();
                while state.tasks.is_empty() && !state.closed {
                    let now = Instant::now();
                    if now >= deadline {
                        return total;
                    }
                    state = self
                        .shared
                        .ready
                        .wait_timeout(state, deadline - now)
                        .map(|(guard, _)| guard)
                        .unwrap_or_else(|e| e.into_inner().0);
                }
                if state.tasks.is_empty() {
                    return total;
                }
                take(&mut state.tasks)
            };
            self.shared.space.notify_all();
            total += self.execute_batch(batch, &mut execute);
            if Instant::now() >= deadline {
                return total;
            }
        }
    }

    fn execute_batch<F: FnMut(T)>(&self, batch: VecDeque<T>, execute: &mut F) -> usize {
        let mut guard = BatchGuard { shared: &self.shared, pending: batch, executed: 0 };
        while let Some(task) = guard.pending.pop_front() {
            guard.executed += 1;
            execute(task);
        }
        guard.executed
    }

    pub fn close(&self) {
        self.shared.close();
    }

    pub fn is_closed(&self) -> bool {
        self.shared.lock().closed
    }

    pub fn stats(&self) -> DispatchStats {
        self.shared.stats()
    }
}
