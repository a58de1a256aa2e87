pub const STUN_MAGIC_COOKIE: [u8; 4] = [0x21, 0x12, 0xa4, 0x42];
pub const STUN_MAGIC_COOKIE_U32: u32 = 0x2112a442;
pub const STUN_FINGERPRINT_ATTR_SIZE: usize = 8;
pub const STUN_INTEGRITY_ATTR_SIZE: usize = 24;
pub const STUN_HEADER_SIZE: usize = 20;
pub const STUN_TRANSACTION_ID_SIZE: usize = 12;
pub type StunTransactionId = [u8; STUN_TRANSACTION_ID_SIZE];

/// XOR mask applied to the FINGERPRINT CRC-32, so fingerprinted STUN
/// packets don't collide with applications that also CRC their payload.
pub const STUN_FINGERPRINT_XOR: u32 = 0x5354_554e;

/// Channel-Data frames occupy the first byte range 0x40..0x7F; STUN
/// messages always have the top two bits of the first byte clear.
pub const CHANNEL_DATA_MIN: u8 = 0x40;
pub const CHANNEL_DATA_MAX: u8 = 0x7F;
pub const CHANNEL_DATA_HEADER_SIZE: usize = 4;

/// Default client retransmission schedule: RTO doubles on each retry
/// starting from `DEFAULT_FIRST_RETRANS_AFTER_MS` up to
/// `DEFAULT_MAX_RETRANS_TIMER_MS`, giving up after
/// `DEFAULT_MAX_RETRANS_COUNT` sends.
pub const DEFAULT_FIRST_RETRANS_AFTER_MS: u64 = 100;
pub const DEFAULT_MAX_RETRANS_TIMER_MS: u64 = 1600;
pub const DEFAULT_MAX_RETRANS_COUNT: u32 = 6;

/// How long a server keeps a finished transaction's cached response around
/// to answer retransmitted requests before evicting it.
pub const DEFAULT_SERVER_TRANSACTION_EXPIRY_MS: u64 = 16_000;
