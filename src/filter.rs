use crate::channel_data::is_stun_message;
use crate::transport::TransportAddress;

/// A demultiplexing predicate: given a received datagram and the address
/// it arrived from, decide whether it belongs to this filter's virtual
/// socket. Filters never mutate the datagram; multiple filters may
/// accept the same datagram, in which case each gets its own clone.
pub trait Filter: Send + Sync {
    fn accepts(&self, datagram: &[u8], from: TransportAddress) -> bool;
}

impl<F> Filter for F
where
    F: Fn(&[u8], TransportAddress) -> bool + Send + Sync,
{
    fn accepts(&self, datagram: &[u8], from: TransportAddress) -> bool {
        self(datagram, from)
    }
}

/// Identifies a registered filter for the purposes of idempotent
/// `attach_filter` calls. Rust closures have no useful `Eq`, so identity
/// here is whatever the caller supplies rather than structural equality
/// of the predicate itself — see `DESIGN.md` for the rationale.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FilterId(pub u64);

/// The first byte of a STUN method field, reconstructed from the wire
/// bytes the way the filter contract describes it (top six bits of byte
/// 0 plus the low seven bits of byte 1), restricted to Binding and the
/// two RFC3489 reserved methods.
fn stun_method(datagram: &[u8]) -> u16 {
    ((datagram[0] & 0xFE) as u16) << 8 | (datagram[1] & 0xEF) as u16
}

/// Accepts any datagram that looks like a STUN message addressed to
/// Binding or one of the two legacy reserved methods.
pub fn stun_accept(datagram: &[u8], _from: TransportAddress) -> bool {
    if datagram.len() < 20 || !is_stun_message(datagram[0]) {
        return false;
    }

    matches!(stun_method(datagram), 0x000 | 0x001 | 0x002)
}

/// Like [`stun_accept`], further restricted to datagrams arriving from a
/// specific configured server address.
pub fn stun_from_server(
    server: TransportAddress,
) -> impl Fn(&[u8], TransportAddress) -> bool + Send + Sync {
    move |datagram, from| stun_accept(datagram, from) && from == server
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportKind;
    use std::net::{IpAddr, Ipv4Addr};

    fn addr() -> TransportAddress {
        TransportAddress::udp(IpAddr::V4(Ipv4Addr::LOCALHOST), 3478)
    }

    #[test]
    fn rejects_short_datagrams() {
        assert!(!stun_accept(&[0u8; 10], addr()));
    }

    #[test]
    fn accepts_binding_request_shape() {
        let mut datagram = vec![0u8; 20];
        datagram[0] = 0x00;
        datagram[1] = 0x01;
        assert!(stun_accept(&datagram, addr()));
    }

    #[test]
    fn from_server_rejects_other_senders() {
        let server = addr();
        let other = TransportAddress::udp(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)), 1);
        let mut datagram = vec![0u8; 20];
        datagram[1] = 0x01;

        let filter = stun_from_server(server);
        assert!(filter(&datagram, server));
        assert!(!filter(&datagram, other));
    }

    #[test]
    fn kind_is_part_of_filter_identity() {
        let udp = TransportAddress::udp(IpAddr::V4(Ipv4Addr::LOCALHOST), 1);
        let tcp = TransportAddress::tcp(IpAddr::V4(Ipv4Addr::LOCALHOST), 1);
        assert_ne!(udp, tcp);
        let _ = TransportKind::Udp;
    }
}
