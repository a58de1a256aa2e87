use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::StunStackConfig;
use crate::definitions::{StunTransactionId, STUN_HEADER_SIZE, STUN_TRANSACTION_ID_SIZE};
use crate::message::{MessageDecodeError, StunMessage};
use crate::transport::TransportAddress;
use crate::StunAttribute;

use super::client::{ClientTransaction, ClientTransactionEvent};
use super::scheduler::Scheduler;
use super::server::{ServerTransaction, ServerTransactionState};
use super::{FailureReason, TransactionError};

/// Abstracts the physical send so the manager doesn't depend on a
/// concrete socket type; [`crate::demux::MultiplexingSocket`] implements
/// this for the production path, tests can supply an in-memory fake.
pub trait DatagramSender: Send + Sync {
    fn send_to(&self, bytes: &[u8], to: TransportAddress) -> std::io::Result<()>;
}

/// A request delivered to the application's listener: either fresh
/// (cache miss) or, when `propagate_received_retransmissions` is set, a
/// redelivered retransmission.
pub struct RequestEvent {
    pub message: StunMessage,
    pub source_address: TransportAddress,
    pub local_address: TransportAddress,
}

/// Callback surface for inbound requests the stack has no open client
/// transaction for.
pub trait StunListener: Send + Sync {
    fn on_request(&self, event: RequestEvent);
}

/// Correlates client requests with responses and caches server-side
/// responses for retransmission absorption. Owns the retransmission
/// scheduler and worker pool; never runs a collector/listener callback
/// while holding `client_transactions` or `server_transactions`.
pub struct StunStack {
    config: StunStackConfig,
    sender: Arc<dyn DatagramSender>,
    listener: Arc<dyn StunListener>,
    scheduler: Scheduler,
    client_transactions: Mutex<HashMap<StunTransactionId, ClientTransaction>>,
    server_transactions: Mutex<HashMap<(StunTransactionId, TransportAddress), ServerTransaction>>,
}

impl StunStack {
    pub fn new(
        config: StunStackConfig,
        sender: Arc<dyn DatagramSender>,
        listener: Arc<dyn StunListener>,
    ) -> Arc<Self> {
        let worker_threads = config.worker_threads;
        Arc::new(Self {
            config,
            sender,
            listener,
            scheduler: Scheduler::new(worker_threads),
            client_transactions: Mutex::new(HashMap::new()),
            server_transactions: Mutex::new(HashMap::new()),
        })
    }

    /// Sends `message` as a client request, registering a retransmission
    /// schedule. `collector` is invoked exactly once, off the scheduler's
    /// worker pool, with the terminal outcome.
    pub fn send_request(
        self: &Arc<Self>,
        mut message: StunMessage,
        destination: TransportAddress,
        source: TransportAddress,
        collector: impl Fn(ClientTransactionEvent) + Send + Sync + 'static,
    ) -> Result<(), TransactionError> {
        if !self.config.software.is_empty() {
            message = message.add_attribute(StunAttribute::Software {
                description: String::from_utf8_lossy(&self.config.software).into_owned(),
            });
        }

        let transaction_id = message.get_header().transaction_id;

        let request_bytes = if self.config.always_sign {
            let credentials = self
                .config
                .credentials
                .as_ref()
                .ok_or(TransactionError::Cancelled)?;
            let username = self
                .config
                .signing_username
                .as_ref()
                .ok_or(TransactionError::Cancelled)?;

            message = message
                .add_attribute(StunAttribute::Username {
                    value: username.clone(),
                })
                .add_message_integrity();

            message
                .encode_with_credentials(credentials.as_ref())
                .map_err(|_| TransactionError::Cancelled)?
        } else {
            message.encode(None).map_err(|_| TransactionError::Cancelled)?
        };

        self.sender.send_to(&request_bytes, destination)?;

        let transaction = ClientTransaction::new(
            transaction_id,
            request_bytes,
            destination,
            source,
            Box::new(collector),
        );

        self.client_transactions
            .lock()
            .insert(transaction_id, transaction);

        self.schedule_next_retransmission(transaction_id, 0);

        Ok(())
    }

    /// RFC 5389 interval sequence: `min(first * 2^i, cap)` for the i-th
    /// retransmission, then one final wait of `cap` before giving up.
    fn retransmission_interval(&self, attempt: u32) -> std::time::Duration {
        let scaled = self.config.first_retrans_after * 2u32.pow(attempt);
        scaled.min(self.config.max_retrans_timer)
    }

    fn schedule_next_retransmission(self: &Arc<Self>, transaction_id: StunTransactionId, attempt: u32) {
        let delay = if attempt < self.config.max_retrans_count {
            self.retransmission_interval(attempt)
        } else {
            // Final wait after the last retransmission before timing out.
            self.config.max_retrans_timer
        };

        let stack = Arc::clone(self);
        let handle = self.scheduler.schedule(
            delay,
            Box::new(move || stack.on_retransmission_timer(transaction_id, attempt)),
        );

        if let Some(transaction) = self.client_transactions.lock().get_mut(&transaction_id) {
            transaction.pending_timer = Some(handle);
        }
    }

    fn on_retransmission_timer(self: Arc<Self>, transaction_id: StunTransactionId, attempt: u32) {
        let mut transactions = self.client_transactions.lock();
        match transactions.get(&transaction_id) {
            Some(t) if !t.is_terminated() => {}
            _ => return,
        };

        if attempt >= self.config.max_retrans_count {
            // Final wait elapsed with no response: time out. Remove the
            // entry and drop the guard before invoking the collector so
            // it never runs while the map is locked.
            let mut transaction = transactions
                .remove(&transaction_id)
                .expect("presence just checked above");
            drop(transactions);
            transaction.terminate(ClientTransactionEvent::Failure(FailureReason::Timeout));
            return;
        }

        let transaction = transactions
            .get_mut(&transaction_id)
            .expect("presence just checked above");
        transaction.retransmission_count += 1;
        let bytes = transaction.request_bytes.clone();
        let destination = transaction.destination;
        drop(transactions);

        if let Err(_err) = self.sender.send_to(&bytes, destination) {
            let transaction = self.client_transactions.lock().remove(&transaction_id);
            if let Some(mut transaction) = transaction {
                transaction.terminate(ClientTransactionEvent::Failure(FailureReason::Unreachable));
            }
            return;
        }

        log::trace!(
            "client transaction {:?} retransmission {} sent",
            transaction_id,
            attempt + 1
        );

        self.schedule_next_retransmission(transaction_id, attempt + 1);
    }

    /// Cancels a client transaction: removes it from the correlation
    /// map and cancels its pending timer. No event is delivered.
    pub fn cancel_request(&self, transaction_id: StunTransactionId) {
        if let Some(transaction) = self.client_transactions.lock().remove(&transaction_id) {
            if let Some(handle) = transaction.pending_timer {
                self.scheduler.cancel(handle);
            }
        }
    }

    /// Feeds a decoded inbound message to the manager: a response is
    /// correlated against an open client transaction, a request against
    /// the server-side cache.
    pub fn handle_message(
        self: &Arc<Self>,
        message: StunMessage,
        source_address: TransportAddress,
        local_address: TransportAddress,
    ) {
        if message.get_header().message_class.is_response() {
            self.handle_response(message, source_address);
        } else {
            self.handle_request(message, source_address, local_address);
        }
    }

    fn handle_response(self: &Arc<Self>, message: StunMessage, source_address: TransportAddress) {
        let transaction_id = message.get_header().transaction_id;
        let mut transactions = self.client_transactions.lock();

        match transactions.get(&transaction_id) {
            // Responses whose transaction id matches no open transaction
            // (or one already Terminated) are dropped silently.
            Some(t) if !t.is_terminated() => {}
            _ => return,
        };

        let mut transaction = transactions
            .remove(&transaction_id)
            .expect("presence just checked above");
        drop(transactions);

        if let Some(handle) = transaction.pending_timer.take() {
            self.scheduler.cancel(handle);
        }
        transaction.terminate(ClientTransactionEvent::Response(message));
        let _ = source_address;
    }

    /// Decodes a raw inbound datagram and dispatches it, applying the
    /// configured credentials store to MESSAGE-INTEGRITY verification
    /// when one is set. A datagram that fails to decode terminates the
    /// matching client transaction (if its transaction id is
    /// recoverable from the raw bytes) with
    /// [`FailureReason::DecodeFailed`] instead of being silently dropped.
    pub fn receive_datagram(
        self: &Arc<Self>,
        bytes: &[u8],
        source_address: TransportAddress,
        local_address: TransportAddress,
    ) {
        let decoded = match &self.config.credentials {
            Some(credentials) => {
                StunMessage::decode_with_credentials(bytes, credentials.as_ref(), true)
                    .map(|(message, _status)| message)
            }
            None => StunMessage::decode(bytes, None, true),
        };

        match decoded {
            Ok(message) => self.handle_message(message, source_address, local_address),
            Err(err) => self.handle_decode_failure(bytes, err),
        }
    }

    /// Best-effort recovery of the transaction id from a datagram that
    /// failed to decode: the id lives at a fixed offset regardless of
    /// what went wrong further into the message, as long as the buffer
    /// is at least header-sized.
    fn handle_decode_failure(self: &Arc<Self>, bytes: &[u8], err: MessageDecodeError) {
        if bytes.len() < STUN_HEADER_SIZE {
            return;
        }

        let mut transaction_id: StunTransactionId = [0; STUN_TRANSACTION_ID_SIZE];
        transaction_id.copy_from_slice(&bytes[8..STUN_HEADER_SIZE]);

        let transaction = self.client_transactions.lock().remove(&transaction_id);
        if let Some(mut transaction) = transaction {
            if let Some(handle) = transaction.pending_timer.take() {
                self.scheduler.cancel(handle);
            }
            transaction.terminate(ClientTransactionEvent::Failure(FailureReason::DecodeFailed(
                err.code(),
            )));
        }
    }

    fn handle_request(
        self: &Arc<Self>,
        message: StunMessage,
        source_address: TransportAddress,
        local_address: TransportAddress,
    ) {
        let transaction_id = message.get_header().transaction_id;
        let key = (transaction_id, source_address);

        let mut servers = self.server_transactions.lock();
        match servers.get(&key) {
            None => {
                servers.insert(
                    key,
                    ServerTransaction::new(transaction_id, source_address),
                );
                drop(servers);
                self.listener.on_request(RequestEvent {
                    message,
                    source_address,
                    local_address,
                });
            }
            Some(existing) if existing.state == ServerTransactionState::AwaitingResponse => {
                drop(servers);
                if self.config.propagate_received_retransmissions {
                    self.listener.on_request(RequestEvent {
                        message,
                        source_address,
                        local_address,
                    });
                }
            }
            Some(existing) if existing.state == ServerTransactionState::Responded => {
                let response = existing.last_response.clone();
                drop(servers);
                if let Some(response) = response {
                    let _ = self.sender.send_to(&response, source_address);
                }
            }
            Some(_) => {}
        }
    }

    /// Sends `response_bytes` for a request previously delivered to the
    /// listener, transitioning the server transaction to Responded and
    /// starting its expiry timer.
    pub fn send_response(
        self: &Arc<Self>,
        transaction_id: StunTransactionId,
        remote: TransportAddress,
        response_bytes: Vec<u8>,
    ) -> Result<(), TransactionError> {
        self.sender.send_to(&response_bytes, remote)?;

        let key = (transaction_id, remote);
        let keep_cached = self.config.keep_cached_after_response;

        let mut servers = self.server_transactions.lock();
        if keep_cached {
            let entry = servers
                .entry(key)
                .or_insert_with(|| ServerTransaction::new(transaction_id, remote));
            entry.mark_responded(response_bytes);
            drop(servers);

            let stack = Arc::clone(self);
            let handle = self.scheduler.schedule(
                self.config.server_transaction_expiry,
                Box::new(move || stack.expire_server_transaction(key)),
            );
            if let Some(entry) = self.server_transactions.lock().get_mut(&key) {
                entry.expiry_timer = Some(handle);
            }
        } else {
            // Discard immediately: a later retransmission falls through
            // to the cache-miss path and is redelivered, which is the
            // source-parameterized behavior this flag controls.
            servers.remove(&key);
        }

        Ok(())
    }

    fn expire_server_transaction(self: Arc<Self>, key: (StunTransactionId, TransportAddress)) {
        self.server_transactions.lock().remove(&key);
        log::trace!("server transaction {:?} expired", key.0);
    }
}
