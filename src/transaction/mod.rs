mod client;
mod manager;
mod scheduler;
mod server;

pub use client::{ClientTransaction, ClientTransactionEvent, ClientTransactionState};
pub use manager::{DatagramSender, RequestEvent, StunListener, StunStack};
pub use scheduler::{Scheduler, TimerHandle};
pub use server::{ServerTransaction, ServerTransactionState};

use thiserror::Error;

use crate::definitions::StunTransactionId;

/// Transaction-manager level failures.
#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("No live client transaction for id {0:?}.")]
    UnknownClientTransaction(StunTransactionId),
    #[error("I/O failure sending a transaction's bytes.")]
    Io(#[from] std::io::Error),
    #[error("The transaction was cancelled before it could be sent.")]
    Cancelled,
}

/// Why a client transaction failed to reach a normal Response
/// conclusion.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FailureReason {
    /// All retransmissions were exhausted without a matching response.
    Timeout,
    /// The underlying transport reported the destination unreachable.
    Unreachable,
    /// The response datagram failed to decode. Carries
    /// [`crate::message::MessageDecodeError::code`].
    DecodeFailed(u16),
    /// The application cancelled the transaction.
    Cancelled,
}
