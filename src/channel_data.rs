use byteorder::{NetworkEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Read, Write};
use thiserror::Error;

use crate::definitions::{CHANNEL_DATA_HEADER_SIZE, CHANNEL_DATA_MAX, CHANNEL_DATA_MIN};

/// TURN ChannelData framing errors.
#[derive(Error, Debug)]
pub enum ChannelDataDecodeError {
    #[error("Error reading field value.")]
    ReadFailure(#[from] std::io::Error),
    #[error("ChannelData frame shorter than its declared length: declared {declared}, available {available}.")]
    Truncated { declared: usize, available: usize },
    #[error("First byte {0:#04X} is not in the ChannelData range 0x40..0x7F.")]
    NotChannelData(u8),
}

/// A TURN ChannelData frame: 2-byte channel number, 2-byte data length,
/// then that many bytes of payload. Not a STUN message; recognized (and
/// routed) by a separate byte-pattern classifier so it can share a
/// multiplexed endpoint with STUN traffic.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelData {
    pub channel_number: u16,
    pub data: Vec<u8>,
}

impl ChannelData {
    pub fn new(channel_number: u16, data: Vec<u8>) -> Self {
        Self {
            channel_number,
            data,
        }
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ChannelDataDecodeError> {
        if bytes.is_empty() || !is_channel_data(bytes[0]) {
            return Err(ChannelDataDecodeError::NotChannelData(
                bytes.first().copied().unwrap_or(0),
            ));
        }

        let mut cursor = Cursor::new(bytes);
        let channel_number = cursor.read_u16::<NetworkEndian>()?;
        let data_len = cursor.read_u16::<NetworkEndian>()? as usize;

        let available = bytes.len() - CHANNEL_DATA_HEADER_SIZE;
        if available < data_len {
            return Err(ChannelDataDecodeError::Truncated {
                declared: data_len,
                available,
            });
        }

        let mut data = vec![0u8; data_len];
        cursor.read_exact(&mut data)?;

        Ok(Self {
            channel_number,
            data,
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>, std::io::Error> {
        let mut cursor = Cursor::new(Vec::new());
        cursor.write_u16::<NetworkEndian>(self.channel_number)?;
        cursor.write_u16::<NetworkEndian>(self.data.len() as u16)?;
        cursor.write_all(&self.data)?;

        Ok(cursor.get_ref().to_vec())
    }
}

/// True if `first_byte` falls in the ChannelData range (0x40..0x7F): the
/// complement of the STUN discriminant, whose top two bits are always
/// zero.
pub fn is_channel_data(first_byte: u8) -> bool {
    (CHANNEL_DATA_MIN..=CHANNEL_DATA_MAX).contains(&first_byte)
}

/// True if `first_byte`'s top two bits are clear, the STUN-message
/// discriminant used to multiplex STUN and ChannelData on one endpoint.
pub fn is_stun_message(first_byte: u8) -> bool {
    first_byte & 0xC0 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let frame = ChannelData::new(0x4001, vec![1, 2, 3, 4, 5]);
        let encoded = frame.encode().unwrap();
        let decoded = ChannelData::decode(&encoded).unwrap();
        assert_eq!(frame, decoded);
    }

    #[test]
    fn classifies_by_first_byte() {
        assert!(is_channel_data(0x40));
        assert!(is_channel_data(0x7F));
        assert!(!is_channel_data(0x3F));
        assert!(!is_channel_data(0x80));

        assert!(is_stun_message(0x00));
        assert!(is_stun_message(0x3F));
        assert!(!is_stun_message(0x40));
    }
}
