#[derive(Debug, Copy, Clone, PartialEq, Eq, FromPrimitive)]
/// [STUN message method](https://tools.ietf.org/html/rfc5389#section-18.1)
///
/// A STUN method is a hex number in the range 0x000 - 0xFFF.  The
/// encoding of STUN method into a STUN message is described in
/// Section 6.
///
/// The initial STUN methods are:
///
/// 0x000: (Reserved)
/// 0x001: Binding
/// 0x002: (Reserved; was SharedSecret)
///
/// STUN methods in the range 0x000 - 0x7FF are assigned by IETF Review
/// [RFC5226](https://tools.ietf.org/html/rfc5226).  STUN methods in the range 0x800 - 0xFFF are assigned by
/// Designated Expert [RFC5226](https://tools.ietf.org/html/rfc5226).  The responsibility of the expert is to
/// verify that the selected codepoint(s) are not in use and that the
/// request is not for an abnormally large number of codepoints.
/// Technical review of the extension itself is outside the scope of the
/// designated expert responsibility.
///
/// Allocate, Refresh, Send, Data, CreatePermission and ChannelBind are
/// the TURN methods defined by [RFC5766](https://tools.ietf.org/html/rfc5766#section-13).
pub enum StunMessageMethod {
    /// STUN binding method
    Binding = 0x001,
    /// TURN Allocate method
    Allocate = 0x003,
    /// TURN Refresh method
    Refresh = 0x004,
    /// TURN Send method. Indication-only.
    Send = 0x006,
    /// TURN Data method. Indication-only.
    Data = 0x007,
    /// TURN CreatePermission method
    CreatePermission = 0x008,
    /// TURN ChannelBind method
    ChannelBind = 0x009,
}
