use std::net::UdpSocket;
use std::thread;
use std::time::Duration;

use stun_core::demux::MultiplexingSocket;
use stun_core::filter::{stun_accept, FilterId};

fn bound_socket() -> UdpSocket {
    UdpSocket::bind("127.0.0.1:0").expect("bind loopback socket")
}

#[test]
fn stun_shaped_datagrams_go_to_the_filtered_socket_and_others_to_default() {
    let server_socket = bound_socket();
    let server_addr = server_socket.local_addr().unwrap();
    let demux = MultiplexingSocket::bind(server_socket).unwrap();

    let stun_socket = demux.attach_filter(FilterId(1), stun_accept);
    let default_socket = demux.default_socket();

    let client = bound_socket();

    let mut binding_request = vec![0u8; 20];
    binding_request[1] = 0x01; // Binding method
    client
        .send_to(&binding_request, server_addr)
        .expect("send binding-shaped datagram");

    let (datagram, _from) = stun_socket.receive().expect("receive on filtered socket");
    assert_eq!(datagram, binding_request);

    let other = vec![0xFFu8; 16];
    client.send_to(&other, server_addr).expect("send non-stun datagram");

    let (datagram, _from) = default_socket.receive().expect("receive on default socket");
    assert_eq!(datagram, other);
}

#[test]
fn attach_filter_is_idempotent_by_id() {
    let server_socket = bound_socket();
    let demux_addr = server_socket.local_addr().unwrap();
    let demux = MultiplexingSocket::bind(server_socket).unwrap();

    let first = demux.attach_filter(FilterId(42), stun_accept);
    let _second = demux.attach_filter(FilterId(42), stun_accept);

    // Both handles share the same underlying queue: a datagram delivered
    // through one is visible to the other.
    let client = bound_socket();
    let mut request = vec![0u8; 20];
    request[1] = 0x01;
    client.send_to(&request, demux_addr).unwrap();

    let (datagram, _) = first.receive().unwrap();
    assert_eq!(datagram, request);
}

#[test]
fn close_unblocks_a_receiver_blocked_on_an_empty_queue() {
    let server_socket = bound_socket();
    let demux = std::sync::Arc::new(MultiplexingSocket::bind(server_socket).unwrap());
    let socket = demux.attach_filter(FilterId(7), stun_accept);

    let closer = demux.clone();
    let handle = thread::spawn(move || {
        thread::sleep(Duration::from_millis(100));
        closer.close();
    });

    let result = socket.receive();
    assert!(result.is_err());

    handle.join().unwrap();
}
