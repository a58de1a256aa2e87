/// Readable representation of STUN attribute type codes.
///
/// Values between 0x0000 and 0x7FFF are comprehension-required; values
/// between 0x8000 and 0xFFFF are comprehension-optional. Any type code
/// not listed here decodes to [`super::StunAttribute::Unrecognized`]
/// rather than failing.
#[derive(Copy, Clone, FromPrimitive)]
pub enum StunAttributeType {
    MappedAddress = 0x0001,
    ResponseAddress = 0x0002,
    ChangeRequest = 0x0003,
    SourceAddress = 0x0004,
    ChangedAddress = 0x0005,
    Username = 0x0006,
    MessageIntegrity = 0x0008,
    ErrorCode = 0x0009,
    UnknownAttributes = 0x000a,
    ReflectedFrom = 0x000b,
    ChannelNumber = 0x000c,
    Lifetime = 0x000d,
    XorPeerAddress = 0x0012,
    Data = 0x0013,
    Realm = 0x0014,
    Nonce = 0x0015,
    XorRelayedAddress = 0x0016,
    EvenPort = 0x0018,
    RequestedTransport = 0x0019,
    DontFragment = 0x001a,
    XorMappedAddress = 0x0020,
    XorOnly = 0x0021,
    ReservationToken = 0x0022,
    Priority = 0x0024,
    UseCandidate = 0x0025,
    Software = 0x8022,
    AlternateServer = 0x8023,
    DestinationAddress = 0x8026,
    MagicCookie = 0x8027,
    Fingerprint = 0x8028,
    IceControlled = 0x8029,
    IceControlling = 0x802a,
}
