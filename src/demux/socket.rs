use std::net::UdpSocket;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};

use crate::filter::{Filter, FilterId};
use crate::transport::{TransportAddress, TransportKind};

use super::virtual_socket::{VirtualSocket, VirtualSocketInner};
use super::DemuxError;

/// The poll interval used so a blocked physical read notices a
/// concurrent `close()` promptly instead of holding the reader slot
/// forever.
const CLOSE_POLL_INTERVAL: Duration = Duration::from_millis(200);

struct FilterEntry {
    id: FilterId,
    filter: Arc<dyn Filter>,
    socket: Arc<VirtualSocketInner>,
}

pub(super) struct SharedDemux {
    socket: UdpSocket,
    filters: Mutex<Arc<Vec<FilterEntry>>>,
    default_socket: Arc<VirtualSocketInner>,
    in_receive: Mutex<bool>,
    reader_gate: Condvar,
    readers_in_flight: AtomicUsize,
    closed: AtomicBool,
}

impl SharedDemux {
    /// Attempts to become the single physical reader. Non-blocking: if
    /// someone else already holds the slot, returns `false` so the
    /// caller falls back to waiting on its own queue instead.
    pub(super) fn try_become_reader(&self) -> bool {
        let mut in_receive = self.in_receive.lock();
        if *in_receive || self.closed.load(Ordering::Acquire) {
            return false;
        }
        *in_receive = true;
        self.readers_in_flight.fetch_add(1, Ordering::AcqRel);
        true
    }

    pub(super) fn release_reader(&self) {
        *self.in_receive.lock() = false;
        self.readers_in_flight.fetch_sub(1, Ordering::AcqRel);
        self.reader_gate.notify_all();
    }

    /// Performs one physical `recv_from`, then fans the datagram out to
    /// every filter that accepts it (each gets a cloned copy), falling
    /// back to the default queue when nothing matched.
    pub(super) fn read_and_fan_out(&self) -> Result<(), DemuxError> {
        let mut buf = [0u8; 65536];

        loop {
            if self.closed.load(Ordering::Acquire) {
                return Err(DemuxError::Closed);
            }

            match self.socket.recv_from(&mut buf) {
                Ok((len, from)) => {
                    let datagram = buf[..len].to_vec();
                    let from_addr = TransportAddress::from_socket_addr(from, TransportKind::Udp);
                    self.fan_out(datagram, from_addr);
                    return Ok(());
                }
                Err(err)
                    if matches!(
                        err.kind(),
                        std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                    ) =>
                {
                    continue;
                }
                Err(err) => return Err(DemuxError::Io(err)),
            }
        }
    }

    fn fan_out(&self, datagram: Vec<u8>, from: TransportAddress) {
        let filters = self.filters.lock().clone();

        let mut matched = false;
        for entry in filters.iter() {
            if entry.filter.accepts(&datagram, from) {
                matched = true;
                entry.socket.push((datagram.clone(), from));
            }
        }

        if !matched {
            self.default_socket.push((datagram, from));
        }
    }

    fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.reader_gate.notify_all();

        // Wait for any in-flight physical read to notice the flag and
        // return, so the endpoint isn't reused while a reader still
        // references it. Reads wake up at most every CLOSE_POLL_INTERVAL.
        while self.readers_in_flight.load(Ordering::Acquire) > 0 {
            std::thread::sleep(CLOSE_POLL_INTERVAL);
        }

        self.default_socket.close();
        for entry in self.filters.lock().iter() {
            entry.socket.close();
        }
    }
}

/// A single UDP endpoint shared between STUN traffic and application
/// payload, fanned out to filter-keyed virtual sockets.
pub struct MultiplexingSocket {
    shared: Arc<SharedDemux>,
}

impl MultiplexingSocket {
    pub fn bind(socket: UdpSocket) -> std::io::Result<Self> {
        socket.set_read_timeout(Some(CLOSE_POLL_INTERVAL))?;
        Ok(Self {
            shared: Arc::new(SharedDemux {
                socket,
                filters: Mutex::new(Arc::new(Vec::new())),
                default_socket: Arc::new(VirtualSocketInner::new()),
                in_receive: Mutex::new(false),
                reader_gate: Condvar::new(),
                readers_in_flight: AtomicUsize::new(0),
                closed: AtomicBool::new(false),
            }),
        })
    }

    /// Attaches a filter under `id`, returning its virtual socket.
    /// Idempotent: a second call with the same `id` returns the
    /// existing socket rather than creating a new queue.
    pub fn attach_filter(&self, id: FilterId, filter: impl Filter + 'static) -> VirtualSocket {
        let mut filters = self.shared.filters.lock();

        if let Some(entry) = filters.iter().find(|entry| entry.id == id) {
            return VirtualSocket {
                inner: Arc::clone(&entry.socket),
                demux: Arc::clone(&self.shared),
            };
        }

        let socket = Arc::new(VirtualSocketInner::new());
        let mut next = (**filters).clone();
        next.push(FilterEntry {
            id,
            filter: Arc::new(filter),
            socket: Arc::clone(&socket),
        });
        *filters = Arc::new(next);

        VirtualSocket {
            inner: socket,
            demux: Arc::clone(&self.shared),
        }
    }

    /// The implicit virtual socket receiving every datagram no attached
    /// filter accepted.
    pub fn default_socket(&self) -> VirtualSocket {
        VirtualSocket {
            inner: Arc::clone(&self.shared.default_socket),
            demux: Arc::clone(&self.shared),
        }
    }

    pub fn send_to(&self, bytes: &[u8], to: TransportAddress) -> std::io::Result<()> {
        self.shared.socket.send_to(bytes, to.to_socket_addr())?;
        Ok(())
    }

    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.shared.socket.local_addr()
    }

    /// Wakes every blocked receiver and stops delivering further
    /// datagrams. Blocks until any in-flight physical read has
    /// returned.
    pub fn close(&self) {
        self.shared.close();
    }
}

impl crate::transaction::DatagramSender for MultiplexingSocket {
    fn send_to(&self, bytes: &[u8], to: TransportAddress) -> std::io::Result<()> {
        MultiplexingSocket::send_to(self, bytes, to)
    }
}
