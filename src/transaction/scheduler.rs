use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Sender};
use parking_lot::{Condvar, Mutex};

/// A unit of deferred work dispatched to the worker pool once its
/// deadline elapses. Never invoked while the scheduler holds its own
/// lock.
type Job = Box<dyn FnOnce() + Send>;

struct ScheduledItem {
    deadline: Instant,
    seq: u64,
    job: Job,
}

impl PartialEq for ScheduledItem {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}
impl Eq for ScheduledItem {}
impl PartialOrd for ScheduledItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for ScheduledItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.deadline, self.seq).cmp(&(other.deadline, other.seq))
    }
}

struct SharedState {
    heap: Mutex<BinaryHeap<Reverse<ScheduledItem>>>,
    cancelled: Mutex<HashSet<u64>>,
    condvar: Condvar,
    shutdown: AtomicBool,
    next_seq: AtomicU64,
}

/// A handle to a scheduled (and possibly already-fired) timer task.
/// Cancelling a handle after the task has started running has no
/// effect: a callback already running to completion is allowed to
/// finish, matching the transaction manager's cancellation semantics.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct TimerHandle(u64);

/// Single timer thread owning a min-heap by next-deadline, with fired
/// jobs dispatched onto a fixed worker pool rather than run inline — the
/// timer thread never executes user-facing callbacks itself.
pub struct Scheduler {
    state: Arc<SharedState>,
    worker_tx: Sender<Job>,
    _timer_thread: thread::JoinHandle<()>,
    _worker_threads: Vec<thread::JoinHandle<()>>,
}

impl Scheduler {
    pub fn new(worker_threads: usize) -> Self {
        let state = Arc::new(SharedState {
            heap: Mutex::new(BinaryHeap::new()),
            cancelled: Mutex::new(HashSet::new()),
            condvar: Condvar::new(),
            shutdown: AtomicBool::new(false),
            next_seq: AtomicU64::new(0),
        });

        let (worker_tx, worker_rx) = bounded::<Job>(1024);

        let workers: Vec<_> = (0..worker_threads.max(1))
            .map(|idx| {
                let worker_rx = worker_rx.clone();
                thread::Builder::new()
                    .name(format!("stun-core-worker-{}", idx))
                    .spawn(move || {
                        for job in worker_rx.iter() {
                            job();
                        }
                    })
                    .expect("failed to spawn worker thread")
            })
            .collect();

        let timer_state = Arc::clone(&state);
        let timer_worker_tx = worker_tx.clone();
        let timer_thread = thread::Builder::new()
            .name("stun-core-timer".to_string())
            .spawn(move || Self::run_timer_loop(timer_state, timer_worker_tx))
            .expect("failed to spawn timer thread");

        Self {
            state,
            worker_tx,
            _timer_thread: timer_thread,
            _worker_threads: workers,
        }
    }

    fn run_timer_loop(state: Arc<SharedState>, worker_tx: Sender<Job>) {
        loop {
            let mut heap = state.heap.lock();

            if state.shutdown.load(Ordering::Acquire) {
                return;
            }

            match heap.peek() {
                None => {
                    state.condvar.wait(&mut heap);
                }
                Some(Reverse(item)) => {
                    let now = Instant::now();
                    if item.deadline <= now {
                        let Reverse(item) = heap.pop().unwrap();
                        drop(heap);

                        if state.cancelled.lock().remove(&item.seq) {
                            continue;
                        }

                        // Dispatch onto the worker pool; the timer
                        // thread never runs the job itself.
                        let _ = worker_tx.send(item.job);
                    } else {
                        let wait_for = item.deadline - now;
                        state.condvar.wait_for(&mut heap, wait_for);
                    }
                }
            }

            if state.shutdown.load(Ordering::Acquire) {
                return;
            }
        }
    }

    /// Schedules `job` to run after `delay`. Returns a handle that can
    /// be used to cancel it before it fires.
    pub fn schedule(&self, delay: Duration, job: Job) -> TimerHandle {
        let seq = self.state.next_seq.fetch_add(1, Ordering::Relaxed);
        let deadline = Instant::now() + delay;

        self.state.heap.lock().push(Reverse(ScheduledItem {
            deadline,
            seq,
            job,
        }));
        self.state.condvar.notify_one();

        TimerHandle(seq)
    }

    /// Best-effort cancellation: if the job hasn't fired yet, it's
    /// marked cancelled and skipped when its deadline is reached instead
    /// of being removed from the heap immediately (cheaper than a heap
    /// search, and race-free since jobs are referenced by id).
    pub fn cancel(&self, handle: TimerHandle) {
        self.state.cancelled.lock().insert(handle.0);
    }

    /// Submits `job` to the worker pool immediately, without going
    /// through the timer heap.
    pub fn dispatch(&self, job: Job) {
        let _ = self.worker_tx.send(job);
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.state.shutdown.store(true, Ordering::Release);
        self.state.condvar.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn fires_after_delay() {
        let scheduler = Scheduler::new(2);
        let (tx, rx) = mpsc::channel();

        scheduler.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                let _ = tx.send(());
            }),
        );

        rx.recv_timeout(Duration::from_secs(1)).unwrap();
    }

    #[test]
    fn cancelled_job_never_runs() {
        let scheduler = Scheduler::new(2);
        let (tx, rx) = mpsc::channel::<()>();

        let handle = scheduler.schedule(
            Duration::from_millis(50),
            Box::new(move || {
                let _ = tx.send(());
            }),
        );
        scheduler.cancel(handle);

        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }
}
