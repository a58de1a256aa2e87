mod socket;
mod virtual_socket;

pub use socket::MultiplexingSocket;
pub use virtual_socket::{Datagram, VirtualSocket};

use thiserror::Error;

/// Failures surfaced by [`MultiplexingSocket`] and the virtual sockets
/// it backs.
#[derive(Error, Debug)]
pub enum DemuxError {
    #[error("I/O failure on the underlying endpoint.")]
    Io(#[from] std::io::Error),
    #[error("The socket was closed.")]
    Closed,
}
