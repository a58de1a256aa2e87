use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::{Condvar, Mutex};

use crate::transport::TransportAddress;

use super::DemuxError;

/// A received datagram paired with the address it arrived from.
pub type Datagram = (Vec<u8>, TransportAddress);

/// Per-socket FIFO queue plus its own close flag, guarded by a dedicated
/// lock/condition as called for by the concurrency model.
pub(super) struct VirtualSocketInner {
    queue: Mutex<VecDeque<Datagram>>,
    condvar: Condvar,
    closed: AtomicBool,
}

impl VirtualSocketInner {
    pub(super) fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            condvar: Condvar::new(),
            closed: AtomicBool::new(false),
        }
    }

    pub(super) fn push(&self, datagram: Datagram) {
        self.queue.lock().push_back(datagram);
        self.condvar.notify_one();
    }

    pub(super) fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.condvar.notify_all();
    }

    fn pop(&self) -> Option<Datagram> {
        self.queue.lock().pop_front()
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Blocks until this socket's own queue has a datagram or the socket
    /// closes. Does not perform a physical read itself; the caller
    /// drives that through the owning [`super::MultiplexingSocket`].
    fn wait_for_own_queue(&self) {
        let mut queue = self.queue.lock();
        while queue.is_empty() && !self.is_closed() {
            self.condvar.wait(&mut queue);
        }
    }
}

/// A filter-keyed view onto a shared underlying datagram endpoint.
/// Multiple virtual sockets, plus one implicit default socket for
/// unmatched datagrams, can be attached to the same
/// [`super::MultiplexingSocket`].
pub struct VirtualSocket {
    pub(super) inner: Arc<VirtualSocketInner>,
    pub(super) demux: Arc<super::socket::SharedDemux>,
}

impl VirtualSocket {
    /// Blocks until a matching datagram is available or the socket is
    /// closed. If this socket's private queue already has an entry,
    /// returns it without touching the underlying endpoint.
    pub fn receive(&self) -> Result<Datagram, DemuxError> {
        loop {
            if let Some(datagram) = self.inner.pop() {
                return Ok(datagram);
            }
            if self.inner.is_closed() {
                return Err(DemuxError::Closed);
            }

            if self.demux.try_become_reader() {
                let result = self.demux.read_and_fan_out();
                self.demux.release_reader();
                result?;
            } else {
                self.inner.wait_for_own_queue();
            }
        }
    }
}
