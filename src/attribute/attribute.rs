use std::net::SocketAddr;

/// [STUN message attribute](https://tools.ietf.org/html/rfc5389#section-15)
///
///   After the STUN header are zero or more attributes.  Each attribute
///   MUST be TLV encoded, with a 16-bit type, 16-bit length, and value.
///   Each STUN attribute MUST end on a 32-bit boundary.  As mentioned
///   above, all fields in an attribute are transmitted most significant
///   bit first.
///   The value in the length field MUST contain the length of the Value
///   part of the attribute, prior to padding, measured in bytes.  Since
///   STUN aligns attributes on 32-bit boundaries, attributes whose content
///   is not a multiple of 4 bytes are padded with 1, 2, or 3 bytes of
///   padding so that its value contains a multiple of 4 bytes.  The
///   padding bits are ignored, and may be any value.
///
///   Any attribute type MAY appear more than once in a STUN message.
///   Unless specified otherwise, the order of appearance is significant:
///   only the first occurrence needs to be processed by a receiver, and
///   any duplicates MAY be ignored by a receiver.
///
///   To allow future revisions of this specification to add new attributes
///   if needed, the attribute space is divided into two ranges.
///   Attributes with type values between 0x0000 and 0x7FFF are
///   comprehension-required attributes, which means that the STUN agent
///   cannot successfully process the message unless it understands the
///   attribute. Attributes with type values between 0x8000 and 0xFFFF are
///   comprehension-optional attributes, which means that those attributes
///   can be ignored by the STUN agent if it does not understand them.
///
///   The set of STUN attribute types is maintained by IANA. The initial
///   set defined by this specification is found in [Section 18.2](https://tools.ietf.org/html/rfc5389#section-18.2).
///
///   The rest of this section describes the format of the various
///   attributes defined in this specification.
#[derive(Debug, Clone, PartialEq)]
pub enum StunAttribute {
    /// [RFC5389: MAPPED-ADDRESS](https://tools.ietf.org/html/rfc5389#section-15.1)
    ///
    /// The MAPPED-ADDRESS attribute indicates a reflexive transport address
    /// of the client.  It consists of an 8-bit address family and a 16-bit
    /// port, followed by a fixed-length value representing the IP address.
    /// If the address family is IPv4, the address MUST be 32 bits.  If the
    /// address family is IPv6, the address MUST be 128 bits.  All fields
    /// must be in network byte order.
    ///
    /// This attribute is used only by servers for achieving backwards
    /// compatibility with [RFC3489](https://tools.ietf.org/html/rfc3489) clients.
    MappedAddress {
        /// Reflexive transport address of the client.
        socket_addr: SocketAddr,
    },
    /// RFC3489 SOURCE-ADDRESS: the address the server received the
    /// request from. Same layout as MAPPED-ADDRESS.
    SourceAddress { socket_addr: SocketAddr },
    /// RFC3489 CHANGED-ADDRESS: the address/port the server would use to
    /// respond from if asked to change IP and port. Same layout as
    /// MAPPED-ADDRESS.
    ChangedAddress { socket_addr: SocketAddr },
    /// RFC3489 RESPONSE-ADDRESS: where the client would like the response
    /// sent. Same layout as MAPPED-ADDRESS. Deprecated by RFC5389.
    ResponseAddress { socket_addr: SocketAddr },
    /// RFC3489 REFLECTED-FROM: present in a response to a request that
    /// carried RESPONSE-ADDRESS, echoing the original requester's address.
    ReflectedFrom { socket_addr: SocketAddr },
    /// [RFC5389: XOR-MAPPED-ADDRESS](https://tools.ietf.org/html/rfc5389#section-15.2)
    ///
    /// The XOR-MAPPED-ADDRESS attribute is identical to the MAPPED-ADDRESS
    /// attribute, except that the reflexive transport address is obfuscated
    /// through the XOR function.
    ///
    /// Note: XOR-MAPPED-ADDRESS and MAPPED-ADDRESS differ only in their
    /// encoding of the transport address. The former encodes the transport
    /// address by exclusive-or'ing it with the magic cookie. The latter
    /// encodes it directly in binary. [RFC 3489](https://tools.ietf.org/html/rfc3489) originally specified only
    /// MAPPED-ADDRESS. However, deployment experience found that some NATs
    /// rewrite the 32-bit binary payloads containing the NAT's public IP
    /// address, such as STUN's MAPPED-ADDRESS attribute, in the well-meaning
    /// but misguided attempt at providing a generic ALG function. Such
    /// behavior interferes with the operation of STUN and also causes
    /// failure of STUN's message-integrity checking.
    XorMappedAddress {
        /// Reflexive transport address of the client.
        socket_addr: SocketAddr,
    },
    /// TURN XOR-PEER-ADDRESS: the transport address of a peer, XOR-encoded
    /// like XOR-MAPPED-ADDRESS.
    XorPeerAddress { socket_addr: SocketAddr },
    /// TURN XOR-RELAYED-ADDRESS: the relayed transport address allocated
    /// by the server, XOR-encoded like XOR-MAPPED-ADDRESS.
    XorRelayedAddress { socket_addr: SocketAddr },
    /// [RFC5389: USERNAME](https://tools.ietf.org/html/rfc5389#section-15.3)
    ///
    /// The USERNAME attribute is used for message integrity. It identifies
    /// the username and password combination used in the message-integrity
    /// check.
    ///
    /// The value of USERNAME is a variable-length value. It MUST contain a
    /// UTF-8 [RFC3629](https://tools.ietf.org/html/rfc3629) encoded sequence of less than 513 bytes, and MUST
    /// have been processed using SASLprep [RFC4013](https://tools.ietf.org/html/rfc4013).
    ///
    /// Some peers pad the value with trailing zero bytes; the decoder
    /// tolerates this by stripping any trailing zero bytes before
    /// decoding as UTF-8.
    Username {
        /// The username and password combination used in the message-integrity check.
        value: String,
    },
    /// [RFC5389: MESSAGE-INTEGRITY](https://tools.ietf.org/html/rfc5389#section-15.4)
    ///
    /// The MESSAGE-INTEGRITY attribute contains an HMAC-SHA1 [RFC2104](https://datatracker.ietf.org/doc/html/rfc2104) of
    /// the STUN message.  The MESSAGE-INTEGRITY attribute can be present in
    /// any STUN message type.  Since it uses the SHA1 hash, the HMAC will be
    /// 20 bytes.  The text used as input to HMAC is the STUN message,
    /// including the header, up to and including the attribute preceding the
    /// MESSAGE-INTEGRITY attribute.  With the exception of the FINGERPRINT
    /// attribute, which appears after MESSAGE-INTEGRITY, agents MUST ignore
    /// all other attributes that follow MESSAGE-INTEGRITY.
    ///
    /// This is a content-dependent attribute: its value is a function of
    /// every byte preceding it in the message, so it cannot be produced by
    /// the ordinary per-attribute encoder. See [`crate::message`] for the
    /// two-phase encode/validate path.
    MessageIntegrity {
        /// HMAC-SHA1 ([RFC2104](https://tools.ietf.org/html/rfc2104)) of the STUN message, or empty as a
        /// placeholder pending computation by the message encoder.
        key: Vec<u8>,
    },
    /// [RFC5389: FINGERPRINT](https://tools.ietf.org/html/rfc5389#section-15.5)
    ///
    /// CRC-32 (ITU V.42) of the message up to (but excluding) this
    /// attribute, XOR'ed with `0x5354554E`. Always the last attribute when
    /// present. Content-dependent, same caveat as MESSAGE-INTEGRITY.
    Fingerprint {
        /// CRC-32 of the STUN message up to (but excluding) the FINGERPRINT attribute itself, XOR'ed with the 32-bit value 0x5354554e
        value: u32,
    },
    /// [RFC5389: ERROR-CODE](https://tools.ietf.org/html/rfc5389#section-15.6)
    ///
    /// The ERROR-CODE attribute is used in error response messages.  It
    /// contains a numeric error code value in the range of 300 to 699 plus a
    /// textual reason phrase encoded in UTF-8 [RFC3629](https://tools.ietf.org/html/rfc3629), and is consistent
    /// in its code assignments and semantics with SIP [RFC3261](https://tools.ietf.org/html/rfc3261) and HTTP
    /// [RFC2616](https://tools.ietf.org/html/rfc2616).  The reason phrase is meant for user consumption, and can
    /// be anything appropriate for the error code.
    ErrorCode {
        /// Error class, 3..6.
        class: u8,
        /// Residual error number, 0..99.
        number: u8,
        /// Reason phrase
        reason: String,
    },
    /// [RFC5389: REALM](https://tools.ietf.org/html/rfc5389#section-15.7)
    ///
    /// Present in requests and responses using long-term credentials,
    /// identifying the realm the USERNAME/password are valid in.
    Realm {
        /// Text that meets the grammar for "realm-value" as described in [RFC 3261](https://tools.ietf.org/html/rfc3261) but without the double quotes and their surrounding whitespace.
        value: String,
    },
    /// [RFC5389: NONCE](https://tools.ietf.org/html/rfc5389#section-15.8)
    /// Server-chosen nonce for long-term credential authentication.
    Nonce {
        /// Sequence of qdtext or quoted-pair, which are defined in [RFC 3261](https://tools.ietf.org/html/rfc3261).
        value: String,
    },
    /// [RFC5389: UNKNOWN-ATTRIBUTES](https://tools.ietf.org/html/rfc5389#section-15.9)
    ///
    /// Present only in a 420 error response, enumerating the
    /// comprehension-required attribute types the server did not
    /// recognize.
    UnknownAttributes {
        /// List of 16-bit values, each of which represents an attribute type that was not understood by the server.
        types: Vec<u16>,
    },
    /// [RFC5389: SOFTWARE](https://tools.ietf.org/html/rfc5389#section-15.10)
    /// Free-form description of the sending agent's software, for
    /// diagnostics only.
    Software {
        /// Textual description of the software being used by the agent sending the message.
        description: String,
    },
    /// [RFC5389: ALTERNATE-SERVER](https://tools.ietf.org/html/rfc5389#section-15.11)
    /// Points the client at a different STUN server to retry against.
    AlternateServer {
        /// Alternate transport address identifying a different STUN server that the STUN client should try.
        socket_addr: SocketAddr,
    },
    /// TURN DESTINATION-ADDRESS: same layout as MAPPED-ADDRESS.
    DestinationAddress { socket_addr: SocketAddr },
    /// [RFC8445: PRIORITY](https://tools.ietf.org/html/rfc8445#section-7.1.1)
    /// ICE candidate-pair priority carried in Binding requests.
    Priority {
        /// Value computed by the algorithm in [Section 5.1.2 of RFC8445](https://tools.ietf.org/html/rfc8445#section-5.1.2) for the local candidate, but with the candidate type preference of peer-reflexive candidates.
        value: u32,
    },
    /// [RFC8445: USE-CANDIDATE](https://tools.ietf.org/html/rfc8445#section-7.1.2)
    /// Zero-length marker; nominates a candidate pair.
    UseCandidate,
    /// [RFC8445: ICE-CONTROLLED](https://tools.ietf.org/html/rfc8445#section-7.1.3)
    IceControlled {
        /// Tiebreaker value used for ICE role conflict resolution defined in [Section 7.3.1.1 of RFC8445](https://tools.ietf.org/html/rfc8445#section-7.3.1.1)
        tie_breaker: u64,
    },
    /// [RFC8445: ICE-CONTROLLING](https://tools.ietf.org/html/rfc8445#section-7.1.3)
    IceControlling {
        /// Tiebreaker value used for ICE role conflict resolution defined in [Section 7.3.1.1 of RFC8445](https://tools.ietf.org/html/rfc8445#section-7.3.1.1)
        tie_breaker: u64,
    },
    /// RFC3489 CHANGE-REQUEST, used by NAT-behavior-discovery clients to
    /// ask the server to respond from a different IP and/or port.
    ChangeRequest {
        change_ip: bool,
        change_port: bool,
    },
    /// Vendor MAGIC-COOKIE marker attribute, 4-byte fixed value.
    MagicCookie { value: u32 },
    /// Zero-byte marker predating XOR-MAPPED-ADDRESS; some old peers send
    /// it alongside a plain MAPPED-ADDRESS to request XOR encoding.
    XorOnly,
    /// TURN DONT-FRAGMENT, zero-length marker.
    DontFragment,
    /// TURN CHANNEL-NUMBER.
    ChannelNumber { number: u16 },
    /// TURN LIFETIME, in seconds.
    Lifetime { seconds: u32 },
    /// TURN REQUESTED-TRANSPORT. `protocol` is the IANA protocol number
    /// (17 for UDP).
    RequestedTransport { protocol: u8 },
    /// TURN EVEN-PORT. `reserve_next` requests the server also reserve the
    /// next higher port. Encoded as the `0x80` bit of the first value
    /// byte (a prior implementation of this attribute packed the flag as
    /// `1 << 8`, which truncates to zero once narrowed to a byte; `0x80`
    /// is the intended bit).
    EvenPort { reserve_next: bool },
    /// TURN RESERVATION-TOKEN: an 8-byte opaque token from a previous
    /// EVEN-PORT allocation.
    ReservationToken { token: [u8; 8] },
    /// TURN DATA: payload being relayed. Normally padded like any other
    /// attribute; some peers expect no padding at all, which the
    /// message-level `pad_data` setting controls.
    Data { value: Vec<u8> },
    /// Any attribute type this codec does not recognize. Preserved
    /// verbatim (including original padding) so re-encoding reproduces
    /// the exact input bytes.
    Unrecognized { attr_type: u16, value: Vec<u8> },
}
