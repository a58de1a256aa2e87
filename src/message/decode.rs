use std::io::Cursor;

use crate::channel_data::is_stun_message;
use crate::credentials::{CredentialsStore, KeyLookup};
use crate::definitions::{STUN_FINGERPRINT_ATTR_SIZE, STUN_HEADER_SIZE, STUN_INTEGRITY_ATTR_SIZE};
use crate::StunHeader;
use crate::StunAttribute;

pub use super::errors::{IntegrityKeyGenerationError, MessageDecodeError, MessageEncodeError};
use super::message::StunMessage;
use super::IntegritySource;

/// Outcome of MESSAGE-INTEGRITY handling during a credentials-aware
/// decode. Decode never fails just because credentials are unknown; it
/// flags the message instead, matching the collaborator's "not-known"
/// contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityStatus {
    /// No MESSAGE-INTEGRITY attribute was present.
    NotPresent,
    /// MESSAGE-INTEGRITY was present and the HMAC matched the derived key.
    Verified,
    /// MESSAGE-INTEGRITY was present but the credentials store doesn't
    /// recognize the USERNAME (or none was sent), so verification was
    /// skipped.
    UnknownCredentials,
}

impl StunMessage {
    /// Decodes and returns the STUN message
    ///
    /// Arguments:
    ///
    /// * `bytes`: binary encoded message to decode from
    /// * `integrity_password`: Optionally set key that will be used for message integrity verification
    /// * `pad_data`: whether a DATA attribute is expected to carry TLV padding
    pub fn decode(
        bytes: &[u8],
        integrity_password: Option<&str>,
        pad_data: bool,
    ) -> Result<Self, MessageDecodeError> {
        Self::decode_inner(bytes, IntegritySource::Password(integrity_password), pad_data)
            .map(|(message, _)| message)
    }

    /// Decodes a message, deriving the MESSAGE-INTEGRITY key from
    /// `credentials` instead of a fixed password. Returns the decoded
    /// message alongside how the integrity check went; an unrecognized
    /// username flags the message via [`IntegrityStatus::UnknownCredentials`]
    /// rather than failing the decode.
    pub fn decode_with_credentials(
        bytes: &[u8],
        credentials: &dyn CredentialsStore,
        pad_data: bool,
    ) -> Result<(Self, IntegrityStatus), MessageDecodeError> {
        Self::decode_inner(bytes, IntegritySource::Store(credentials), pad_data)
    }

    fn decode_inner(
        bytes: &[u8],
        integrity_source: IntegritySource,
        pad_data: bool,
    ) -> Result<(Self, IntegrityStatus), MessageDecodeError> {
        let data_len = bytes.len();

        // The two most significant bits of byte 0 MUST be zero; this is
        // what lets a STUN message be distinguished from ChannelData
        // (0x40-0x7F) and other protocols sharing the same port.
        if data_len < STUN_HEADER_SIZE || !is_stun_message(bytes[0]) {
            return Err(MessageDecodeError::NotStun);
        }

        let mut cursor = Cursor::new(bytes);

        // Decode header
        let header = StunHeader::decode(&mut cursor)?;

        // Decode attributes
        let mut attributes = Vec::new();

        let mut integrity_attr_passed = false;
        let mut integrity_status = IntegrityStatus::NotPresent;

        // Track for username/realm occurrences
        let mut username = None;
        let mut realm = None;

        while cursor.position() < data_len as u64 {
            let decoded = StunAttribute::decode(&mut cursor, header.transaction_id, pad_data);

            match decoded {
                Ok(decoded) => {
                    // A comprehension-required attribute type (below
                    // 0x8000) this codec doesn't recognize makes the rest
                    // of the message unprocessable.
                    if let StunAttribute::Unrecognized { attr_type, .. } = &decoded {
                        if *attr_type < 0x8000 {
                            return Err(MessageDecodeError::UnrecognizedComprehensionRequiredAttribute {
                                attr_type: *attr_type,
                            });
                        }
                    }

                    // Ignore all attributes after the MESSAGE-INTEGRITY attribute.
                    // As per [RFC5389 Section 15.4](https://tools.ietf.org/html/rfc5389#section-15.4)
                    if !integrity_attr_passed {
                        attributes.push(decoded.clone());
                    }

                    // Handle Fingerprint and MessageIntegrity attributes
                    match decoded {
                        StunAttribute::Username { value } => {
                            username = Some(value);
                        }
                        StunAttribute::Realm { value } => {
                            realm = Some(value);
                        }
                        StunAttribute::Fingerprint { value } => {
                            let attr_pos = cursor.position() as usize - STUN_FINGERPRINT_ATTR_SIZE;

                            // Make sure the Fingerprint attribute is the last one
                            if cursor.position() != bytes.len() as u64 {
                                return Err(
                                    MessageDecodeError::IncorrectFingerprintAttributePosition {
                                        msg_len: bytes.len(),
                                        attr_pos: attr_pos as usize,
                                    },
                                );
                            }

                            // Compute fingerprint for verification
                            let computed_fingerprint =
                                Self::calculate_fingerprint(&cursor.get_ref()[0..attr_pos]);

                            // Make sure the fingerprint matches
                            if computed_fingerprint != value {
                                return Err(MessageDecodeError::FingerprintMismatch {
                                    attr_value: value,
                                    computed_value: computed_fingerprint,
                                });
                            }

                            if integrity_attr_passed {
                                // Push the attribute to the list explicitly since it's after the MessageIntegrity attribute
                                attributes.push(decoded);
                            }
                        }
                        StunAttribute::MessageIntegrity { key } => {
                            // Mark MessageIntegrity attribute as passed so we can ignore attributes that happen after it
                            // With the exception of the Fingerprint attribute
                            integrity_attr_passed = true;

                            let integrity_buffer = &cursor.get_ref()[0..(cursor.position() as usize
                                - STUN_INTEGRITY_ATTR_SIZE)];

                            match &integrity_source {
                                IntegritySource::Password(Some(integrity_password)) => {
                                    let integrity_key = Self::calculate_integrity_key(
                                        integrity_password,
                                        realm.clone(),
                                        username.clone(),
                                    )?;

                                    let hmac =
                                        Self::calculate_integrity_hash(&integrity_key, integrity_buffer);

                                    if hmac != key {
                                        return Err(MessageDecodeError::MessageIntegrityFail {
                                            attr_value: key,
                                            computed_value: hmac,
                                        });
                                    }

                                    integrity_status = IntegrityStatus::Verified;
                                }
                                // No password supplied: leave MI unverified, same as before.
                                IntegritySource::Password(None) => {}
                                IntegritySource::Store(store) => match &username {
                                    Some(user) => match store.get_key(user) {
                                        KeyLookup::NotKnown => {
                                            integrity_status = IntegrityStatus::UnknownCredentials;
                                        }
                                        KeyLookup::Key(integrity_key) => {
                                            let hmac = Self::calculate_integrity_hash(
                                                &integrity_key,
                                                integrity_buffer,
                                            );

                                            if hmac != key {
                                                return Err(MessageDecodeError::MessageIntegrityFail {
                                                    attr_value: key,
                                                    computed_value: hmac,
                                                });
                                            }

                                            integrity_status = IntegrityStatus::Verified;
                                        }
                                    },
                                    // No USERNAME to look a key up by: nothing to verify against.
                                    None => {
                                        integrity_status = IntegrityStatus::UnknownCredentials;
                                    }
                                },
                            }
                        }
                        _ => {}
                    };
                }
                Err(err) => return Err(MessageDecodeError::from(err)),
            }
        }

        Ok((
            Self {
                header,
                attributes,
                pad_data,
            },
            integrity_status,
        ))
    }
}
