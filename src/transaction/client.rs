use std::time::Instant;

use crate::definitions::StunTransactionId;
use crate::transport::TransportAddress;

use super::scheduler::TimerHandle;
use super::FailureReason;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ClientTransactionState {
    Waiting,
    Terminated,
}

/// A client transaction: created when the application sends a Request,
/// lives until a matching response arrives, retransmissions are
/// exhausted, or the caller cancels it.
pub struct ClientTransaction {
    pub transaction_id: StunTransactionId,
    pub request_bytes: Vec<u8>,
    pub destination: TransportAddress,
    pub source: TransportAddress,
    pub state: ClientTransactionState,
    pub retransmission_count: u32,
    pub created_at: Instant,
    /// Handle for whichever timer (next retransmission or final
    /// deadline) is currently pending for this transaction, so it can
    /// be cancelled on termination.
    pub pending_timer: Option<TimerHandle>,
    collector: Box<dyn Fn(ClientTransactionEvent) + Send + Sync>,
}

/// Terminal event delivered to a client transaction's collector exactly
/// once.
pub enum ClientTransactionEvent {
    Response(crate::StunMessage),
    Failure(FailureReason),
}

impl ClientTransaction {
    pub fn new(
        transaction_id: StunTransactionId,
        request_bytes: Vec<u8>,
        destination: TransportAddress,
        source: TransportAddress,
        collector: Box<dyn Fn(ClientTransactionEvent) + Send + Sync>,
    ) -> Self {
        Self {
            transaction_id,
            request_bytes,
            destination,
            source,
            state: ClientTransactionState::Waiting,
            retransmission_count: 0,
            created_at: Instant::now(),
            pending_timer: None,
            collector,
        }
    }

    /// Delivers a terminal event and moves the transaction to
    /// Terminated. A no-op if already terminated, so a response racing a
    /// timeout can't double-deliver.
    pub fn terminate(&mut self, event: ClientTransactionEvent) {
        if self.state == ClientTransactionState::Terminated {
            return;
        }
        self.state = ClientTransactionState::Terminated;
        (self.collector)(event);
    }

    pub fn is_terminated(&self) -> bool {
        self.state == ClientTransactionState::Terminated
    }
}
