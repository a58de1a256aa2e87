use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use stun_core::credentials::StaticCredentials;
use stun_core::{IntegrityStatus, StunAttribute, StunMessage, StunMessageClass, StunMessageMethod};

#[test]
fn binding_request_round_trip_matches_the_rfc_example() {
    // The concrete S1 literal: a Binding Request with transaction id
    // 0x0506070809101112131415 16 and no attributes.
    let transaction_id: [u8; 12] = [
        0x05, 0x06, 0x07, 0x08, 0x09, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16,
    ];
    let message = StunMessage::create_request().set_transaction_id(transaction_id);

    let encoded = message.encode(None).unwrap();
    let expected = [
        0x00, 0x01, 0x00, 0x00, 0x21, 0x12, 0xA4, 0x42, 0x05, 0x06, 0x07, 0x08, 0x09, 0x10, 0x11,
        0x12, 0x13, 0x14, 0x15, 0x16,
    ];
    assert_eq!(encoded, expected);

    let decoded = StunMessage::decode(&encoded, None, true).unwrap();
    assert_eq!(decoded.get_header().transaction_id, transaction_id);
    assert_eq!(decoded.get_header().message_method, StunMessageMethod::Binding);
    assert_eq!(decoded.get_header().message_class, StunMessageClass::Request);
    assert!(decoded.get_attributes().is_empty());
}

#[test]
fn message_with_multiple_attributes_round_trips() {
    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(198, 51, 100, 7)), 4096);

    let message = StunMessage::create_success_response()
        .set_transaction_id([11; 12])
        .add_attribute(StunAttribute::XorMappedAddress { socket_addr: addr })
        .add_attribute(StunAttribute::Software {
            description: "stun-core-test".to_string(),
        })
        .add_attribute(StunAttribute::Lifetime { seconds: 600 });

    let encoded = message.encode(None).unwrap();
    let decoded = StunMessage::decode(&encoded, None, true).unwrap();

    assert_eq!(decoded.get_attributes().len(), 3);
    assert_eq!(decoded.get_attributes(), message.get_attributes());
}

#[test]
fn long_term_credential_message_integrity_validates() {
    let message = StunMessage::create_request()
        .set_transaction_id([2; 12])
        .add_long_term_credential_message_integrity("alice", "example.org")
        .unwrap();

    let encoded = message.encode(Some("hunter2")).unwrap();
    let decoded = StunMessage::decode(&encoded, Some("hunter2"), true).unwrap();

    assert_eq!(decoded.get_attributes().len(), 3);
}

#[test]
fn wrong_password_fails_message_integrity_check() {
    let message = StunMessage::create_request()
        .set_transaction_id([6; 12])
        .add_long_term_credential_message_integrity("bob", "example.org")
        .unwrap();

    let encoded = message.encode(Some("correct-password")).unwrap();
    let result = StunMessage::decode(&encoded, Some("wrong-password"), true);

    assert!(matches!(
        result,
        Err(stun_core::MessageDecodeError::MessageIntegrityFail { .. })
    ));
}

#[test]
fn credentials_store_signs_and_verifies_message_integrity() {
    let credentials = StaticCredentials::new("alice", "hunter2");

    let message = StunMessage::create_request()
        .set_transaction_id([13; 12])
        .add_attribute(StunAttribute::Username {
            value: "alice".to_string(),
        })
        .add_message_integrity();

    let encoded = message.encode_with_credentials(&credentials).unwrap();
    let (decoded, status) =
        StunMessage::decode_with_credentials(&encoded, &credentials, true).unwrap();

    assert_eq!(status, IntegrityStatus::Verified);
    assert_eq!(decoded.get_header().transaction_id, [13; 12]);
}

#[test]
fn credentials_store_flags_rather_than_fails_an_unknown_username() {
    let credentials = StaticCredentials::new("alice", "hunter2");

    // Signed with a password the store doesn't hold, as if "mallory"
    // generated this message itself; the store only recognizes "alice".
    let message = StunMessage::create_request()
        .set_transaction_id([14; 12])
        .add_attribute(StunAttribute::Username {
            value: "mallory".to_string(),
        })
        .add_message_integrity();

    let encoded = message.encode(Some("whatever")).unwrap();
    let (_decoded, status) =
        StunMessage::decode_with_credentials(&encoded, &credentials, true).unwrap();

    assert_eq!(status, IntegrityStatus::UnknownCredentials);
}

#[test]
fn unpadded_data_attribute_round_trips_when_configured() {
    let message = StunMessage::create_indication()
        .set_message_method(StunMessageMethod::Data)
        .set_transaction_id([8; 12])
        .set_data_padding(false)
        .add_attribute(StunAttribute::Data {
            value: vec![1, 2, 3],
        });

    let encoded = message.encode(None).unwrap();
    // 20-byte header + 4-byte TLV prefix + 3 unpadded data bytes.
    assert_eq!(encoded.len(), 27);

    let decoded = StunMessage::decode(&encoded, None, false).unwrap();
    assert_eq!(decoded.get_attributes(), message.get_attributes());
}
