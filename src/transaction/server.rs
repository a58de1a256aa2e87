use std::time::Instant;

use crate::definitions::StunTransactionId;
use crate::transport::TransportAddress;

use super::scheduler::TimerHandle;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ServerTransactionState {
    AwaitingResponse,
    Responded,
    Expired,
}

/// A server transaction: created when a request is delivered to the
/// registered listener, caches the eventual response so retransmitted
/// requests from the same peer can be answered without waking the
/// listener again.
pub struct ServerTransaction {
    pub transaction_id: StunTransactionId,
    pub remote: TransportAddress,
    pub state: ServerTransactionState,
    pub last_response: Option<Vec<u8>>,
    pub created_at: Instant,
    pub expiry_timer: Option<TimerHandle>,
}

impl ServerTransaction {
    pub fn new(transaction_id: StunTransactionId, remote: TransportAddress) -> Self {
        Self {
            transaction_id,
            remote,
            state: ServerTransactionState::AwaitingResponse,
            last_response: None,
            created_at: Instant::now(),
            expiry_timer: None,
        }
    }

    pub fn mark_responded(&mut self, response_bytes: Vec<u8>) {
        self.state = ServerTransactionState::Responded;
        self.last_response = Some(response_bytes);
    }
}
