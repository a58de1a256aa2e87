#[derive(Debug, Copy, Clone, FromPrimitive, Ord, PartialOrd, Eq, PartialEq)]
/// [STUN message class](https://tools.ietf.org/html/rfc5389#section-6)
///
/// The message type defines the message class (request, success
/// response, failure response, or indication). Encoded as the 2-bit
/// `C1 C0` field scattered across the message-type field (section 6);
/// `class as u16` here is the plain 2-bit value, not yet scattered —
/// scattering/gathering happens in [`super::bits`].
pub enum StunMessageClass {
    /// STUN request
    Request = 0b00,
    /// STUN indication
    Indication = 0b01,
    /// STUN success response
    SuccessResponse = 0b10,
    /// STUN error response
    ErrorResponse = 0b11,
}

impl StunMessageClass {
    /// True for Request and Indication — the two transaction-initiating
    /// classes that are not a reply to anything.
    pub fn is_request_or_indication(self) -> bool {
        matches!(self, Self::Request | Self::Indication)
    }

    /// True for SuccessResponse and ErrorResponse.
    pub fn is_response(self) -> bool {
        matches!(self, Self::SuccessResponse | Self::ErrorResponse)
    }
}
