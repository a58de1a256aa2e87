use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use criterion::{criterion_group, criterion_main, Criterion};

use stun_core::{StunAttribute, StunMessage};

fn sample_addr() -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(198, 51, 100, 7)), 4096)
}

fn benchmark_encode_minimal_request(c: &mut Criterion) {
    let message = StunMessage::create_request().set_transaction_id([1; 12]);
    c.bench_function("encode_minimal_request", |b| {
        b.iter(|| message.encode(None).unwrap())
    });
}

fn benchmark_encode_decode_with_attributes(c: &mut Criterion) {
    let message = StunMessage::create_success_response()
        .set_transaction_id([2; 12])
        .add_attribute(StunAttribute::XorMappedAddress {
            socket_addr: sample_addr(),
        })
        .add_attribute(StunAttribute::Software {
            description: "stun-core-bench".to_string(),
        })
        .add_attribute(StunAttribute::Lifetime { seconds: 600 });

    c.bench_function("encode_message_with_attributes", |b| {
        b.iter(|| message.encode(None).unwrap())
    });

    let encoded = message.encode(None).unwrap();
    c.bench_function("decode_message_with_attributes", |b| {
        b.iter(|| StunMessage::decode(&encoded, None, true).unwrap())
    });
}

fn benchmark_message_integrity(c: &mut Criterion) {
    let message = StunMessage::create_request()
        .set_transaction_id([3; 12])
        .add_long_term_credential_message_integrity("alice", "example.org")
        .unwrap();

    c.bench_function("encode_long_term_message_integrity", |b| {
        b.iter(|| message.encode(Some("hunter2")).unwrap())
    });

    let encoded = message.encode(Some("hunter2")).unwrap();
    c.bench_function("decode_long_term_message_integrity", |b| {
        b.iter(|| StunMessage::decode(&encoded, Some("hunter2"), true).unwrap())
    });
}

fn benchmark_fingerprint(c: &mut Criterion) {
    let message = StunMessage::create_request()
        .set_transaction_id([4; 12])
        .add_fingerprint();

    c.bench_function("encode_fingerprint", |b| {
        b.iter(|| message.encode(None).unwrap())
    });

    let encoded = message.encode(None).unwrap();
    c.bench_function("decode_fingerprint", |b| {
        b.iter(|| StunMessage::decode(&encoded, None, true).unwrap())
    });
}

criterion_group!(
    benches,
    benchmark_encode_minimal_request,
    benchmark_encode_decode_with_attributes,
    benchmark_message_integrity,
    benchmark_fingerprint,
);
criterion_main!(benches);
