use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use stun_core::{StunAttribute, StunMessage};

fn sample_addr() -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 5)), 54321)
}

#[test]
fn attribute_padding_is_always_a_multiple_of_four() {
    let cases = vec![
        StunAttribute::Username {
            value: "alice".to_string(),
        },
        StunAttribute::Realm {
            value: "example.org".to_string(),
        },
        StunAttribute::Software {
            description: "stun-core".to_string(),
        },
        StunAttribute::Data {
            value: vec![1, 2, 3],
        },
    ];

    for attr in cases {
        let message = StunMessage::create_request()
            .add_attribute(attr)
            .set_transaction_id([1; 12]);
        let encoded = message.encode(None).unwrap();
        assert_eq!(encoded.len() % 4, 0);
    }
}

#[test]
fn xor_mapped_address_round_trips_through_a_message() {
    let addr = sample_addr();
    let message = StunMessage::create_success_response()
        .set_transaction_id([7; 12])
        .add_attribute(StunAttribute::XorMappedAddress { socket_addr: addr });

    let encoded = message.encode(None).unwrap();
    let decoded = StunMessage::decode(&encoded, None, true).unwrap();

    match &decoded.get_attributes()[0] {
        StunAttribute::XorMappedAddress { socket_addr } => assert_eq!(*socket_addr, addr),
        other => panic!("unexpected attribute {:?}", other),
    }
}

#[test]
fn fingerprint_self_validates_and_detects_tampering() {
    let message = StunMessage::create_request()
        .set_transaction_id([9; 12])
        .add_fingerprint();

    let mut encoded = message.encode(None).unwrap();
    StunMessage::decode(&encoded, None, true).expect("untampered message decodes cleanly");

    // Byte 4 is the start of the transaction id, well before FINGERPRINT.
    encoded[4] ^= 0xFF;
    let result = StunMessage::decode(&encoded, None, true);
    assert!(matches!(
        result,
        Err(stun_core::MessageDecodeError::FingerprintMismatch { .. })
    ));
}

#[test]
fn unrecognized_attribute_round_trips_byte_for_byte() {
    let message = StunMessage::create_indication()
        .set_transaction_id([3; 12])
        .add_attribute(StunAttribute::Unrecognized {
            attr_type: 0xFF00,
            value: vec![0xAA, 0xBB, 0xCC],
        });

    let encoded = message.encode(None).unwrap();
    let decoded = StunMessage::decode(&encoded, None, true).unwrap();
    let re_encoded = decoded.encode(None).unwrap();

    assert_eq!(encoded, re_encoded);
}

#[test]
fn comprehension_required_unknown_attribute_fails_decode() {
    let message = StunMessage::create_request()
        .set_transaction_id([4; 12])
        .add_attribute(StunAttribute::Unrecognized {
            attr_type: 0x7F00,
            value: vec![0x01, 0x02, 0x03, 0x04],
        });

    let encoded = message.encode(None).unwrap();
    let result = StunMessage::decode(&encoded, None, true);
    assert!(matches!(
        result,
        Err(stun_core::MessageDecodeError::UnrecognizedComprehensionRequiredAttribute {
            attr_type: 0x7F00
        })
    ));
}

#[test]
fn add_attribute_replaces_an_existing_attribute_of_the_same_type() {
    let message = StunMessage::create_request()
        .set_transaction_id([10; 12])
        .add_attribute(StunAttribute::Username {
            value: "alice".to_string(),
        })
        .add_attribute(StunAttribute::Username {
            value: "bob".to_string(),
        });

    assert_eq!(message.get_attributes().len(), 1);
    match &message.get_attributes()[0] {
        StunAttribute::Username { value } => assert_eq!(value, "bob"),
        other => panic!("unexpected attribute {:?}", other),
    }
}

#[test]
fn add_attribute_preserves_position_of_replaced_attribute() {
    let message = StunMessage::create_request()
        .set_transaction_id([12; 12])
        .add_attribute(StunAttribute::Username {
            value: "alice".to_string(),
        })
        .add_attribute(StunAttribute::Realm {
            value: "example.org".to_string(),
        })
        .add_attribute(StunAttribute::Username {
            value: "carol".to_string(),
        });

    assert_eq!(message.get_attributes().len(), 2);
    match &message.get_attributes()[0] {
        StunAttribute::Username { value } => assert_eq!(value, "carol"),
        other => panic!("unexpected attribute {:?}", other),
    }
}

#[test]
fn decode_rejects_a_buffer_with_the_top_two_message_type_bits_set() {
    // 0x40 falls in the ChannelData range; a STUN header never has
    // either of the top two bits set.
    let mut bytes = vec![0x40, 0x00, 0x00, 0x00, 0x21, 0x12, 0xA4, 0x42];
    bytes.extend_from_slice(&[0; 12]);

    let result = StunMessage::decode(&bytes, None, true);
    assert!(matches!(result, Err(stun_core::MessageDecodeError::NotStun)));
}

#[test]
fn decode_rejects_a_buffer_shorter_than_a_header() {
    let bytes = vec![0x00, 0x01, 0x00, 0x00];
    let result = StunMessage::decode(&bytes, None, true);
    assert!(matches!(result, Err(stun_core::MessageDecodeError::NotStun)));
}

#[test]
fn username_trailing_zeroes_are_stripped() {
    // Hand-encode a Binding Request header followed by a USERNAME
    // attribute carrying "alice\0\0\0" as its declared 8-byte value, the
    // shape described by the trailing-zero quirk.
    let mut bytes = vec![0x00, 0x01, 0x00, 0x00, 0x21, 0x12, 0xA4, 0x42];
    bytes.extend_from_slice(&[5; 12]);

    let mut attr_bytes = vec![0x00, 0x06, 0x00, 0x08];
    attr_bytes.extend_from_slice(b"alice\0\0\0");
    bytes.extend_from_slice(&attr_bytes);

    let msg_len = (bytes.len() - 20) as u16;
    bytes[2] = (msg_len >> 8) as u8;
    bytes[3] = (msg_len & 0xFF) as u8;

    let decoded = StunMessage::decode(&bytes, None, true).unwrap();
    match &decoded.get_attributes()[0] {
        StunAttribute::Username { value } => assert_eq!(value, "alice"),
        other => panic!("unexpected attribute {:?}", other),
    }
}
