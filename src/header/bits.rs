//! Scatter/gather of the STUN message-type field (RFC 5389 section 6).
//!
//! ```text
//!                      0                 1
//!                      2  3  4 5 6 7 8 9 0 1 2 3 4 5
//!                     +--+--+-+-+-+-+-+-+-+-+-+-+-+-+
//!                     |M |M |M|M|M|C|M|M|M|C|M|M|M|M|
//!                     |11|10|9|8|7|1|6|5|4|0|3|2|1|0|
//!                     +--+--+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! The 12-bit method and 2-bit class are not contiguous in the wire
//! field; the class bits are interleaved between method bit groups.
//! This module is the only place that performs the interleaving so the
//! rest of the codec can work with plain `method: u16` / `class: u8`
//! values.

const METHOD_A_BITS: u16 = 0x000f; // M3-M0
const METHOD_B_BITS: u16 = 0x0070; // M6-M4, pre-shift
const METHOD_D_BITS: u16 = 0x0f80; // M11-M7, pre-shift

const CLASS_C0_SHIFT: u16 = 4;
const CLASS_C1_SHIFT: u16 = 7;

/// Packs a 12-bit method and 2-bit class into the 14-bit message-type
/// field (top 2 bits of the 16-bit value are always zero).
pub fn pack(method: u16, class: u8) -> u16 {
    let a = method & METHOD_A_BITS;
    let b = (method << 1) & METHOD_B_BITS;
    let d = (method << 2) & METHOD_D_BITS;
    let m = a | b | d;

    let c0 = (class as u16) & 0b01;
    let c1 = ((class as u16) >> 1) & 0b01;
    let class_bits = (c0 << CLASS_C0_SHIFT) | (c1 << CLASS_C1_SHIFT);

    m | class_bits
}

/// Inverse of [`pack`]: splits a 14-bit message-type field back into its
/// method and class.
pub fn unpack(raw: u16) -> (u16, u8) {
    let a = raw & METHOD_A_BITS;
    let b = (raw & METHOD_B_BITS) >> 1;
    let d = (raw & METHOD_D_BITS) >> 2;
    let method = a | b | d;

    let c0 = (raw >> CLASS_C0_SHIFT) & 0b01;
    let c1 = (raw >> CLASS_C1_SHIFT) & 0b01;
    let class = (c0 | (c1 << 1)) as u8;

    (method, class)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_request_is_0x0001() {
        assert_eq!(pack(0x001, 0b00), 0x0001);
    }

    #[test]
    fn binding_success_response_is_0x0101() {
        assert_eq!(pack(0x001, 0b10), 0x0101);
    }

    #[test]
    fn round_trips_every_method_and_class() {
        for method in [0x001u16, 0x003, 0x004, 0x006, 0x007, 0x008, 0x009] {
            for class in 0u8..4 {
                let raw = pack(method, class);
                assert_eq!(unpack(raw), (method, class));
            }
        }
    }
}
