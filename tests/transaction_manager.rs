use std::net::{IpAddr, Ipv4Addr};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use stun_core::config::ConfigBuilder;
use stun_core::credentials::StaticCredentials;
use stun_core::transaction::{ClientTransactionEvent, DatagramSender, FailureReason, RequestEvent, StunListener, StunStack};
use stun_core::transport::TransportAddress;
use stun_core::{StunAttribute, StunMessage, StunMessageClass, StunMessageMethod};

struct RecordingSender {
    sent: Mutex<Vec<(Vec<u8>, TransportAddress)>>,
}

impl RecordingSender {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
        })
    }

    fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl DatagramSender for RecordingSender {
    fn send_to(&self, bytes: &[u8], to: TransportAddress) -> std::io::Result<()> {
        self.sent.lock().unwrap().push((bytes.to_vec(), to));
        Ok(())
    }
}

struct RecordingListener {
    requests: Mutex<Vec<RequestEvent>>,
}

impl RecordingListener {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
        })
    }
}

impl StunListener for RecordingListener {
    fn on_request(&self, event: RequestEvent) {
        self.requests.lock().unwrap().push(event);
    }
}

fn addr(port: u16) -> TransportAddress {
    TransportAddress::udp(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), port)
}

#[test]
fn client_transaction_times_out_without_a_response() {
    let config = ConfigBuilder::new()
        .first_retrans_after(Duration::from_millis(20))
        .max_retrans_timer(Duration::from_millis(40))
        .max_retrans_count(2)
        .build();

    let sender = RecordingSender::new();
    let listener = RecordingListener::new();
    let stack = StunStack::new(config, sender.clone(), listener);

    let (tx, rx) = mpsc::channel();
    let request = StunMessage::create_request().set_transaction_id([1; 12]);

    stack
        .send_request(request, addr(3478), addr(0), move |event| {
            let _ = tx.send(event);
        })
        .unwrap();

    let event = rx.recv_timeout(Duration::from_secs(2)).expect("terminal event");
    match event {
        ClientTransactionEvent::Failure(FailureReason::Timeout) => {}
        _ => panic!("expected a timeout"),
    }

    // Initial send plus two retransmissions.
    assert_eq!(sender.count(), 3);
}

#[test]
fn client_transaction_delivers_the_matching_response_once() {
    let config = ConfigBuilder::new()
        .first_retrans_after(Duration::from_millis(500))
        .build();

    let sender = RecordingSender::new();
    let listener = RecordingListener::new();
    let stack = StunStack::new(config, sender, listener);

    let (tx, rx) = mpsc::channel();
    let transaction_id = [2u8; 12];
    let request = StunMessage::create_request().set_transaction_id(transaction_id);

    stack
        .send_request(request, addr(3478), addr(0), move |event| {
            let _ = tx.send(event);
        })
        .unwrap();

    let response = StunMessage::create_success_response().set_transaction_id(transaction_id);
    stack.handle_message(response, addr(3478), addr(0));

    let event = rx.recv_timeout(Duration::from_secs(1)).expect("terminal event");
    match event {
        ClientTransactionEvent::Response(message) => {
            assert_eq!(message.get_header().transaction_id, transaction_id);
            assert_eq!(message.get_header().message_class, StunMessageClass::SuccessResponse);
        }
        _ => panic!("expected a response"),
    }

    // A second, stale response for the same (already terminated) transaction
    // must not be delivered again.
    assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
}

#[test]
fn server_absorbs_retransmitted_requests_by_default() {
    let config = ConfigBuilder::new().build();
    let sender = RecordingSender::new();
    let listener = RecordingListener::new();
    let stack = StunStack::new(config, sender, listener.clone());

    let transaction_id = [3u8; 12];
    let remote = addr(5000);

    for _ in 0..3 {
        let request = StunMessage::create_request()
            .set_message_method(StunMessageMethod::Binding)
            .set_transaction_id(transaction_id);
        stack.handle_message(request, remote, addr(3478));
    }

    assert_eq!(listener.requests.lock().unwrap().len(), 1);
}

#[test]
fn always_sign_attaches_credentials_and_software_to_outbound_requests() {
    let credentials = Arc::new(StaticCredentials::new("alice", "hunter2"));
    let config = ConfigBuilder::new()
        .always_sign(true)
        .credentials(credentials.clone())
        .signing_username("alice")
        .software(b"stun-core-test".to_vec())
        .build();

    let sender = RecordingSender::new();
    let listener = RecordingListener::new();
    let stack = StunStack::new(config, sender.clone(), listener);

    let request = StunMessage::create_request().set_transaction_id([20; 12]);
    stack
        .send_request(request, addr(3478), addr(0), |_event| {})
        .unwrap();

    let (sent_bytes, _) = sender.sent.lock().unwrap()[0].clone();
    let (decoded, status) =
        StunMessage::decode_with_credentials(&sent_bytes, credentials.as_ref(), true).unwrap();

    assert_eq!(status, stun_core::IntegrityStatus::Verified);
    assert!(decoded
        .get_attributes()
        .iter()
        .any(|attr| matches!(attr, StunAttribute::Software { description } if description == "stun-core-test")));
}

#[test]
fn receive_datagram_surfaces_a_decode_failure_for_the_matching_transaction() {
    let config = ConfigBuilder::new()
        .first_retrans_after(Duration::from_secs(30))
        .build();

    let sender = RecordingSender::new();
    let listener = RecordingListener::new();
    let stack = StunStack::new(config, sender, listener);

    let (tx, rx) = mpsc::channel();
    let transaction_id = [21u8; 12];
    let request = StunMessage::create_request().set_transaction_id(transaction_id);

    stack
        .send_request(request, addr(3478), addr(0), move |event| {
            let _ = tx.send(event);
        })
        .unwrap();

    // A header that parses (so the transaction id is recoverable) but
    // carries a bogus attribute TLV length, making the attribute section
    // undecodable.
    let mut bytes = vec![0x01, 0x01, 0x00, 0x04, 0x21, 0x12, 0xA4, 0x42];
    bytes.extend_from_slice(&transaction_id);
    bytes.extend_from_slice(&[0xFF, 0xFF, 0xFF, 0xFF]);

    stack.receive_datagram(&bytes, addr(3478), addr(0));

    let event = rx.recv_timeout(Duration::from_secs(1)).expect("terminal event");
    match event {
        ClientTransactionEvent::Failure(FailureReason::DecodeFailed(_code)) => {}
        _ => panic!("expected a decode failure"),
    }
}

#[test]
fn server_redelivers_retransmissions_when_configured() {
    let config = ConfigBuilder::new()
        .propagate_received_retransmissions(true)
        .build();
    let sender = RecordingSender::new();
    let listener = RecordingListener::new();
    let stack = StunStack::new(config, sender, listener.clone());

    let transaction_id = [4u8; 12];
    let remote = addr(5001);

    for _ in 0..3 {
        let request = StunMessage::create_request().set_transaction_id(transaction_id);
        stack.handle_message(request, remote, addr(3478));
    }

    assert_eq!(listener.requests.lock().unwrap().len(), 3);
}
