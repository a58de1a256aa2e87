use byteorder::{ByteOrder, NetworkEndian, ReadBytesExt};
use num_traits::FromPrimitive;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use super::errors::AttributeDecodeError;
use super::types::StunAttributeType;
use super::utils::xor_byte_range;
use super::StunAttribute;

use crate::definitions::{StunTransactionId, STUN_MAGIC_COOKIE};

impl StunAttribute {
    #[allow(clippy::many_single_char_names)]
    // Decodes MappedAddress/XorMappedAddress/AlternateServer-shaped attributes.
    fn decode_address(
        bytes: &[u8],
        is_xored: bool,
        transaction_id: StunTransactionId,
    ) -> Result<SocketAddr, AttributeDecodeError> {
        if bytes.len() < 4 {
            return Err(AttributeDecodeError::InsufficientData());
        }

        // Separate IP address family
        let ip_family = (&bytes[1..2]).read_u8()?;

        if bytes.len() < 8 {
            return Err(AttributeDecodeError::InsufficientData());
        }

        let mut port_bytes = bytes[2..4].to_vec();
        let mut addr_bytes = bytes[4..].to_vec();

        // XOR the port number bytes if the attribute type is XorMappedAddress
        if is_xored {
            xor_byte_range(&mut port_bytes, &STUN_MAGIC_COOKIE);
        }

        // Read port number
        let port = NetworkEndian::read_u16(&port_bytes);

        let address = match ip_family {
            0x01 => {
                if addr_bytes.len() < 4 {
                    return Err(AttributeDecodeError::InsufficientData());
                }

                // XOR the ip address bytes if the attribute type is XorMappedAddress
                if is_xored {
                    xor_byte_range(&mut addr_bytes, &STUN_MAGIC_COOKIE);
                }

                let mut cursor = Cursor::new(addr_bytes);

                let a = cursor.read_u8()?;
                let b = cursor.read_u8()?;
                let c = cursor.read_u8()?;
                let d = cursor.read_u8()?;

                Ok(IpAddr::V4(Ipv4Addr::new(a, b, c, d)))
            }
            0x02 => {
                if addr_bytes.len() < 16 {
                    return Err(AttributeDecodeError::InsufficientData());
                }

                // XOR the ip address bytes if the attribute type is XorMappedAddress
                if is_xored {
                    xor_byte_range(&mut addr_bytes[0..4], &STUN_MAGIC_COOKIE);
                    xor_byte_range(&mut addr_bytes[4..16], &transaction_id);
                }

                let mut cursor = Cursor::new(addr_bytes);

                let a = cursor.read_u16::<NetworkEndian>()?;
                let b = cursor.read_u16::<NetworkEndian>()?;
                let c = cursor.read_u16::<NetworkEndian>()?;
                let d = cursor.read_u16::<NetworkEndian>()?;
                let e = cursor.read_u16::<NetworkEndian>()?;
                let f = cursor.read_u16::<NetworkEndian>()?;
                let g = cursor.read_u16::<NetworkEndian>()?;
                let h = cursor.read_u16::<NetworkEndian>()?;

                Ok(IpAddr::V6(Ipv6Addr::new(a, b, c, d, e, f, g, h)))
            }
            _ => Err(AttributeDecodeError::InvalidValue(ip_family as u128)),
        };

        Ok(SocketAddr::new(address?, port))
    }

    // Decodes attributes containing Unicode values.
    fn decode_utf8_val(bytes: &[u8]) -> Result<String, AttributeDecodeError> {
        Ok(String::from_utf8(bytes.to_vec())?)
    }

    /// Decodes the USERNAME value. Some peers pad the username with
    /// trailing NUL bytes rather than relying on the TLV's own 4-byte
    /// padding; a bare `from_utf8` either chokes on the interior nulls or
    /// keeps them as part of the logical value, so they're trimmed here
    /// while present.
    fn decode_username_val(bytes: &[u8]) -> Result<String, AttributeDecodeError> {
        let mut end = bytes.len();
        while end > 0 && bytes[end - 1] == 0 {
            end -= 1;
        }
        Self::decode_utf8_val(&bytes[..end])
    }

    // Decodes attributes containing DWORD values.
    fn decode_u32_val(bytes: &[u8]) -> Result<u32, AttributeDecodeError> {
        if bytes.len() < 4 {
            return Err(AttributeDecodeError::InsufficientData());
        }

        Ok(NetworkEndian::read_u32(bytes))
    }

    // Decodes attributes containing QWORD values.
    fn decode_u64_val(bytes: &[u8]) -> Result<u64, AttributeDecodeError> {
        if bytes.len() < 8 {
            return Err(AttributeDecodeError::InsufficientData());
        }

        Ok(NetworkEndian::read_u64(bytes))
    }

    // Decodes attributes containing WORD values.
    fn decode_u16_val(bytes: &[u8]) -> Result<u16, AttributeDecodeError> {
        if bytes.len() < 2 {
            return Err(AttributeDecodeError::InsufficientData());
        }

        Ok(NetworkEndian::read_u16(bytes))
    }

    // Decodes the ErrorCode attribute.
    fn decode_error_code(bytes: &[u8]) -> Result<Self, AttributeDecodeError> {
        if bytes.len() < 4 {
            return Err(AttributeDecodeError::InsufficientData());
        }

        let class = bytes[2];
        let number = bytes[3];
        let reason = String::from_utf8(bytes[4..].to_vec())?;

        Ok(Self::ErrorCode {
            class,
            number,
            reason,
        })
    }

    // Decodes the UnknownAttributes attribute.
    fn decode_unknown_attributes(bytes: &[u8]) -> Result<Self, AttributeDecodeError> {
        let mut types = Vec::new();

        let mut cursor = Cursor::new(bytes);

        while cursor.position() < bytes.len() as u64 {
            types.push(cursor.read_u16::<NetworkEndian>()?);
        }

        Ok(Self::UnknownAttributes { types })
    }

    // Decodes the ChangeRequest attribute: a 32-bit field with the
    // change-IP and change-port flags at bits 2 and 1 respectively.
    fn decode_change_request(bytes: &[u8]) -> Result<Self, AttributeDecodeError> {
        let flags = Self::decode_u32_val(bytes)?;

        Ok(Self::ChangeRequest {
            change_ip: flags & 0x0000_0004 != 0,
            change_port: flags & 0x0000_0002 != 0,
        })
    }

    // Decodes the EvenPort attribute: one byte, top bit is the R flag.
    fn decode_even_port(bytes: &[u8]) -> Result<Self, AttributeDecodeError> {
        if bytes.is_empty() {
            return Err(AttributeDecodeError::InsufficientData());
        }

        Ok(Self::EvenPort {
            reserve_next: bytes[0] & 0x80 != 0,
        })
    }

    // Decodes the RequestedTransport attribute: protocol number plus 3
    // reserved bytes.
    fn decode_requested_transport(bytes: &[u8]) -> Result<Self, AttributeDecodeError> {
        if bytes.is_empty() {
            return Err(AttributeDecodeError::InsufficientData());
        }

        Ok(Self::RequestedTransport { protocol: bytes[0] })
    }

    // Decodes the ReservationToken attribute: 8 opaque bytes.
    fn decode_reservation_token(bytes: &[u8]) -> Result<Self, AttributeDecodeError> {
        if bytes.len() < 8 {
            return Err(AttributeDecodeError::InsufficientData());
        }

        let mut token = [0u8; 8];
        token.copy_from_slice(&bytes[..8]);

        Ok(Self::ReservationToken { token })
    }

    /// Decodes bytes passed via cursor into a STUN attribute.
    /// On each invocation only one attribute is decoded and the cursor position is advanced.
    ///
    /// `pad_data` controls whether a trailing TLV-padding skip is applied
    /// to the raw bytes before interpreting them; it only affects the
    /// DATA attribute, some TURN peers transmit it unpadded even when
    /// other attributes in the same message are padded normally.
    pub(crate) fn decode(
        cursor: &mut Cursor<&[u8]>,
        transaction_id: StunTransactionId,
        pad_data: bool,
    ) -> Result<Self, AttributeDecodeError> {
        // Read attribute type
        let encoded_attr_type = cursor.read_u16::<NetworkEndian>()?;
        // Read attribute data length
        let attr_len = cursor.read_u16::<NetworkEndian>()?;

        // Read attribute data
        let mut attr_data = vec![0u8; attr_len as usize];
        cursor.read_exact(&mut attr_data)?;

        let attr_type = FromPrimitive::from_u16(encoded_attr_type);

        let skip_padding = match attr_type {
            Some(StunAttributeType::Data) => pad_data,
            _ => true,
        };

        if skip_padding {
            let padding = (4 - attr_len % 4) % 4;
            if padding != 0 {
                cursor.seek(SeekFrom::Current(padding as i64))?;
            }
        }

        let attr_type = match attr_type {
            Some(attr_type) => attr_type,
            None => {
                return Ok(Self::Unrecognized {
                    attr_type: encoded_attr_type,
                    value: attr_data,
                })
            }
        };

        // Decode and return the appropriate variant based on the attribute type.
        match attr_type {
            StunAttributeType::XorMappedAddress => {
                let socket_addr = Self::decode_address(&attr_data, true, transaction_id)?;
                Ok(Self::XorMappedAddress { socket_addr })
            }
            StunAttributeType::XorPeerAddress => {
                let socket_addr = Self::decode_address(&attr_data, true, transaction_id)?;
                Ok(Self::XorPeerAddress { socket_addr })
            }
            StunAttributeType::XorRelayedAddress => {
                let socket_addr = Self::decode_address(&attr_data, true, transaction_id)?;
                Ok(Self::XorRelayedAddress { socket_addr })
            }
            StunAttributeType::MappedAddress => {
                let socket_addr = Self::decode_address(&attr_data, false, transaction_id)?;
                Ok(Self::MappedAddress { socket_addr })
            }
            StunAttributeType::ResponseAddress => {
                let socket_addr = Self::decode_address(&attr_data, false, transaction_id)?;
                Ok(Self::ResponseAddress { socket_addr })
            }
            StunAttributeType::SourceAddress => {
                let socket_addr = Self::decode_address(&attr_data, false, transaction_id)?;
                Ok(Self::SourceAddress { socket_addr })
            }
            StunAttributeType::ChangedAddress => {
                let socket_addr = Self::decode_address(&attr_data, false, transaction_id)?;
                Ok(Self::ChangedAddress { socket_addr })
            }
            StunAttributeType::ReflectedFrom => {
                let socket_addr = Self::decode_address(&attr_data, false, transaction_id)?;
                Ok(Self::ReflectedFrom { socket_addr })
            }
            StunAttributeType::DestinationAddress => {
                let socket_addr = Self::decode_address(&attr_data, false, transaction_id)?;
                Ok(Self::DestinationAddress { socket_addr })
            }
            StunAttributeType::AlternateServer => {
                let socket_addr = Self::decode_address(&attr_data, false, transaction_id)?;
                Ok(Self::AlternateServer { socket_addr })
            }
            StunAttributeType::Username => Ok(Self::Username {
                value: Self::decode_username_val(&attr_data)?,
            }),
            StunAttributeType::MessageIntegrity => Ok(Self::MessageIntegrity { key: attr_data }),
            StunAttributeType::Software => Ok(Self::Software {
                description: Self::decode_utf8_val(&attr_data)?,
            }),
            StunAttributeType::Realm => Ok(Self::Realm {
                value: Self::decode_utf8_val(&attr_data)?,
            }),
            StunAttributeType::Nonce => Ok(Self::Nonce {
                value: Self::decode_utf8_val(&attr_data)?,
            }),
            StunAttributeType::Fingerprint => Ok(Self::Fingerprint {
                value: Self::decode_u32_val(&attr_data)?,
            }),
            StunAttributeType::IceControlled => Ok(Self::IceControlled {
                tie_breaker: Self::decode_u64_val(&attr_data)?,
            }),
            StunAttributeType::IceControlling => Ok(Self::IceControlling {
                tie_breaker: Self::decode_u64_val(&attr_data)?,
            }),
            StunAttributeType::Priority => Ok(Self::Priority {
                value: Self::decode_u32_val(&attr_data)?,
            }),
            StunAttributeType::ErrorCode => Self::decode_error_code(&attr_data),
            StunAttributeType::UnknownAttributes => Self::decode_unknown_attributes(&attr_data),
            StunAttributeType::UseCandidate => Ok(Self::UseCandidate),
            StunAttributeType::ChangeRequest => Self::decode_change_request(&attr_data),
            StunAttributeType::MagicCookie => Ok(Self::MagicCookie {
                value: Self::decode_u32_val(&attr_data)?,
            }),
            StunAttributeType::XorOnly => Ok(Self::XorOnly),
            StunAttributeType::DontFragment => Ok(Self::DontFragment),
            StunAttributeType::ChannelNumber => Ok(Self::ChannelNumber {
                number: Self::decode_u16_val(&attr_data)?,
            }),
            StunAttributeType::Lifetime => Ok(Self::Lifetime {
                seconds: Self::decode_u32_val(&attr_data)?,
            }),
            StunAttributeType::RequestedTransport => Self::decode_requested_transport(&attr_data),
            StunAttributeType::EvenPort => Self::decode_even_port(&attr_data),
            StunAttributeType::ReservationToken => Self::decode_reservation_token(&attr_data),
            StunAttributeType::Data => Ok(Self::Data { value: attr_data }),
        }
    }
}
