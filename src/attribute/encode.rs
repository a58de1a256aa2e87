use byteorder::{ByteOrder, NetworkEndian, WriteBytesExt};
use std::io::{Cursor, Write};
use std::net::SocketAddr;

use super::errors::AttributeEncodeError;
use super::types::StunAttributeType;
use super::utils::xor_byte_range;
use super::StunAttribute;

use crate::definitions::{StunTransactionId, STUN_MAGIC_COOKIE};

impl StunAttribute {
    // Wraps the encoded attribute data into TLV. `pad` is false only for
    // the unpadded DATA dialect; every other attribute always pads.
    fn wrap_in_tlv(
        attr_type: u16,
        attr_bytes: &[u8],
        pad: bool,
    ) -> Result<Vec<u8>, AttributeEncodeError> {
        let mut cursor = Cursor::new(Vec::new());

        let data_len = attr_bytes.len();

        // Write the attribute type
        cursor.write_u16::<NetworkEndian>(attr_type)?;
        // Write the attribute data length
        cursor.write_u16::<NetworkEndian>(data_len as u16)?;
        // Write attribute data
        cursor.write_all(attr_bytes)?;

        if pad {
            // Calculate and add attribute padding.
            // As per RFC5389 section 15, padding bytes may take any
            // value; NUL bytes are used here.
            let padding = (4 - data_len % 4) % 4;
            if padding != 0 {
                cursor.write_all(&vec![0u8; padding])?;
            }
        }

        Ok(cursor.get_ref().to_vec())
    }

    // Encodes MappedAddress/XorMappedAddress-shaped attributes.
    fn encode_address(
        addr: &SocketAddr,
        is_xored: bool,
        transaction_id: StunTransactionId,
    ) -> Result<Vec<u8>, AttributeEncodeError> {
        let family = match addr {
            SocketAddr::V4(_) => 0x01,
            SocketAddr::V6(_) => 0x02,
        };

        // Process the port number
        let port = addr.port();
        let mut port_bytes = [0u8; 2];
        NetworkEndian::write_u16(&mut port_bytes, port);
        // XOR the port number bytes if the attribute type is XorMappedAddress
        if is_xored {
            xor_byte_range(&mut port_bytes, &STUN_MAGIC_COOKIE);
        }

        let ip_addr_bytes = match addr {
            SocketAddr::V4(addr_v4) => {
                let mut ip_data = addr_v4.ip().octets();

                if is_xored {
                    xor_byte_range(&mut ip_data, &STUN_MAGIC_COOKIE)
                }

                ip_data.to_vec()
            }
            SocketAddr::V6(addr_v6) => {
                let segments = addr_v6.ip().segments();

                let mut ip_cursor = Cursor::new(Vec::new());
                for segment in segments.iter() {
                    ip_cursor.write_u16::<NetworkEndian>(*segment)?;
                }

                let ip_addr_bytes = ip_cursor.get_mut();

                if is_xored {
                    xor_byte_range(&mut ip_addr_bytes[0..4], &STUN_MAGIC_COOKIE);
                    xor_byte_range(&mut ip_addr_bytes[4..16], &transaction_id);
                }

                ip_addr_bytes.to_vec()
            }
        };

        let mut cursor = Cursor::new(Vec::new());

        // Write leading zeroes
        cursor.write_u8(0)?;
        // Write ip address family
        cursor.write_u8(family)?;
        // Write socket port number
        cursor.write_all(&port_bytes)?;
        // Write (XORed) ip address bytes
        cursor.write_all(&ip_addr_bytes)?;

        Ok(cursor.get_ref().to_vec())
    }

    // Encodes attributes containing Unicode values
    fn encode_utf8_val(data: &str, limit: Option<usize>) -> Result<Vec<u8>, AttributeEncodeError> {
        let encoded_val = data.as_bytes().to_vec();

        match limit {
            None => Ok(encoded_val),
            Some(size_limit) => {
                if encoded_val.len() > size_limit {
                    Err(AttributeEncodeError::Utf8ValueTooBig {
                        limit: size_limit,
                        length: encoded_val.len(),
                    })
                } else {
                    Ok(encoded_val)
                }
            }
        }
    }

    // Encodes attributes containing DWORD values.
    fn encode_u32_val(value: u32) -> Result<Vec<u8>, AttributeEncodeError> {
        let mut buf: Vec<u8> = vec![0u8; 4];
        NetworkEndian::write_u32(&mut buf, value);

        Ok(buf)
    }

    // Encodes attributes containing QWORD values.
    fn encode_u64_val(value: u64) -> Result<Vec<u8>, AttributeEncodeError> {
        let mut buf: Vec<u8> = vec![0u8; 8];
        NetworkEndian::write_u64(&mut buf, value);

        Ok(buf)
    }

    // Encodes attributes containing WORD values, zero-padded to a 4-byte
    // TLV value (2 reserved bytes) where the caller needs that shape.
    fn encode_u16_val(value: u16) -> Result<Vec<u8>, AttributeEncodeError> {
        let mut buf: Vec<u8> = vec![0u8; 2];
        NetworkEndian::write_u16(&mut buf, value);

        Ok(buf)
    }

    // Encodes the ErrorCode attribute.
    fn encode_error_code(
        class: u8,
        number: u8,
        reason: &str,
    ) -> Result<Vec<u8>, AttributeEncodeError> {
        let mut cursor = Cursor::new(Vec::new());
        cursor.write_u16::<NetworkEndian>(0)?;
        cursor.write_u8(class)?;
        cursor.write_u8(number)?;
        cursor.write_all(&Self::encode_utf8_val(reason, Some(763))?)?;

        Ok(cursor.get_ref().to_vec())
    }

    // Encodes the UnknownAttributes attribute.
    fn encode_unknown_attributes(unknown_attrs: &[u16]) -> Result<Vec<u8>, AttributeEncodeError> {
        let mut cursor = Cursor::new(Vec::new());

        for attr in unknown_attrs.iter() {
            cursor.write_u16::<NetworkEndian>(*attr)?;
        }

        Ok(cursor.get_ref().to_vec())
    }

    // Encodes the ChangeRequest attribute.
    fn encode_change_request(
        change_ip: bool,
        change_port: bool,
    ) -> Result<Vec<u8>, AttributeEncodeError> {
        let mut flags: u32 = 0;
        if change_ip {
            flags |= 0x0000_0004;
        }
        if change_port {
            flags |= 0x0000_0002;
        }

        Self::encode_u32_val(flags)
    }

    // Encodes the EvenPort attribute. The R flag is the top bit (0x80) of
    // the single value byte; the source this codec was adapted from
    // packed it as `1 << 8`, which truncates to zero when narrowed to a
    // byte and silently drops the flag.
    fn encode_even_port(reserve_next: bool) -> Result<Vec<u8>, AttributeEncodeError> {
        let flag = if reserve_next { 0x80 } else { 0x00 };
        Ok(vec![flag])
    }

    // Encodes the RequestedTransport attribute: protocol byte + 3
    // reserved bytes.
    fn encode_requested_transport(protocol: u8) -> Result<Vec<u8>, AttributeEncodeError> {
        Ok(vec![protocol, 0, 0, 0])
    }

    /// Encodes StunAttribute into bytes.
    ///
    /// `pad_data` governs the trailing TLV padding applied to the DATA
    /// attribute only; every other attribute is always padded per
    /// RFC5389 section 15.
    pub(crate) fn encode(
        &self,
        transaction_id: StunTransactionId,
        pad_data: bool,
    ) -> Result<Vec<u8>, AttributeEncodeError> {
        let (attr_type, encoded_attr, pad) = match self {
            StunAttribute::XorMappedAddress { socket_addr } => (
                StunAttributeType::XorMappedAddress as u16,
                Self::encode_address(socket_addr, true, transaction_id),
                true,
            ),
            StunAttribute::XorPeerAddress { socket_addr } => (
                StunAttributeType::XorPeerAddress as u16,
                Self::encode_address(socket_addr, true, transaction_id),
                true,
            ),
            StunAttribute::XorRelayedAddress { socket_addr } => (
                StunAttributeType::XorRelayedAddress as u16,
                Self::encode_address(socket_addr, true, transaction_id),
                true,
            ),
            StunAttribute::MappedAddress { socket_addr } => (
                StunAttributeType::MappedAddress as u16,
                Self::encode_address(socket_addr, false, transaction_id),
                true,
            ),
            StunAttribute::ResponseAddress { socket_addr } => (
                StunAttributeType::ResponseAddress as u16,
                Self::encode_address(socket_addr, false, transaction_id),
                true,
            ),
            StunAttribute::SourceAddress { socket_addr } => (
                StunAttributeType::SourceAddress as u16,
                Self::encode_address(socket_addr, false, transaction_id),
                true,
            ),
            StunAttribute::ChangedAddress { socket_addr } => (
                StunAttributeType::ChangedAddress as u16,
                Self::encode_address(socket_addr, false, transaction_id),
                true,
            ),
            StunAttribute::ReflectedFrom { socket_addr } => (
                StunAttributeType::ReflectedFrom as u16,
                Self::encode_address(socket_addr, false, transaction_id),
                true,
            ),
            StunAttribute::DestinationAddress { socket_addr } => (
                StunAttributeType::DestinationAddress as u16,
                Self::encode_address(socket_addr, false, transaction_id),
                true,
            ),
            StunAttribute::AlternateServer { socket_addr } => (
                StunAttributeType::AlternateServer as u16,
                Self::encode_address(socket_addr, false, transaction_id),
                true,
            ),
            StunAttribute::Username { value } => (
                StunAttributeType::Username as u16,
                Self::encode_utf8_val(value, Some(513)),
                true,
            ),
            StunAttribute::MessageIntegrity { key } => {
                (StunAttributeType::MessageIntegrity as u16, Ok(key.clone()), true)
            }
            StunAttribute::Software { description } => (
                StunAttributeType::Software as u16,
                Self::encode_utf8_val(description, Some(763)),
                true,
            ),
            StunAttribute::Realm { value } => (
                StunAttributeType::Realm as u16,
                Self::encode_utf8_val(value, Some(763)),
                true,
            ),
            StunAttribute::Nonce { value } => (
                StunAttributeType::Nonce as u16,
                Self::encode_utf8_val(value, Some(763)),
                true,
            ),
            StunAttribute::Fingerprint { value } => (
                StunAttributeType::Fingerprint as u16,
                Self::encode_u32_val(*value),
                true,
            ),
            StunAttribute::IceControlled { tie_breaker } => (
                StunAttributeType::IceControlled as u16,
                Self::encode_u64_val(*tie_breaker),
                true,
            ),
            StunAttribute::IceControlling { tie_breaker } => (
                StunAttributeType::IceControlling as u16,
                Self::encode_u64_val(*tie_breaker),
                true,
            ),
            StunAttribute::Priority { value } => (
                StunAttributeType::Priority as u16,
                Self::encode_u32_val(*value),
                true,
            ),
            StunAttribute::ErrorCode {
                class,
                number,
                reason,
            } => (
                StunAttributeType::ErrorCode as u16,
                Self::encode_error_code(*class, *number, reason),
                true,
            ),
            StunAttribute::UnknownAttributes { types } => (
                StunAttributeType::UnknownAttributes as u16,
                Self::encode_unknown_attributes(types),
                true,
            ),
            StunAttribute::UseCandidate => {
                (StunAttributeType::UseCandidate as u16, Ok(Vec::new()), true)
            }
            StunAttribute::ChangeRequest {
                change_ip,
                change_port,
            } => (
                StunAttributeType::ChangeRequest as u16,
                Self::encode_change_request(*change_ip, *change_port),
                true,
            ),
            StunAttribute::MagicCookie { value } => (
                StunAttributeType::MagicCookie as u16,
                Self::encode_u32_val(*value),
                true,
            ),
            StunAttribute::XorOnly => (StunAttributeType::XorOnly as u16, Ok(Vec::new()), true),
            StunAttribute::DontFragment => {
                (StunAttributeType::DontFragment as u16, Ok(Vec::new()), true)
            }
            StunAttribute::ChannelNumber { number } => (
                StunAttributeType::ChannelNumber as u16,
                Self::encode_u16_val(*number).map(|mut v| {
                    v.extend_from_slice(&[0u8, 0u8]);
                    v
                }),
                true,
            ),
            StunAttribute::Lifetime { seconds } => (
                StunAttributeType::Lifetime as u16,
                Self::encode_u32_val(*seconds),
                true,
            ),
            StunAttribute::RequestedTransport { protocol } => (
                StunAttributeType::RequestedTransport as u16,
                Self::encode_requested_transport(*protocol),
                true,
            ),
            StunAttribute::EvenPort { reserve_next } => (
                StunAttributeType::EvenPort as u16,
                Self::encode_even_port(*reserve_next),
                true,
            ),
            StunAttribute::ReservationToken { token } => (
                StunAttributeType::ReservationToken as u16,
                Ok(token.to_vec()),
                true,
            ),
            StunAttribute::Data { value } => {
                (StunAttributeType::Data as u16, Ok(value.clone()), pad_data)
            }
            StunAttribute::Unrecognized { attr_type, value } => {
                (*attr_type, Ok(value.clone()), true)
            }
        };

        Self::wrap_in_tlv(attr_type, &encoded_attr?, pad)
    }
}
