//! Request origin classification for the local-only restriction.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Check if IP is on the local network: loopback, RFC 1918, link-local or
/// IPv6 unique-local. IPv4-mapped IPv6 addresses are judged by the IPv4
/// address they carry.
pub fn is_private(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => is_private_v4(ipv4),
        IpAddr::V6(ipv6) => match ipv6.to_ipv4_mapped() {
            Some(ipv4) => is_private_v4(ipv4),
            None => is_private_v6(ipv6),
        },
    }
}

fn is_private_v4(ip: Ipv4Addr) -> bool {
    ip.is_loopback() || ip.is_private() || ip.is_link_local()
}

fn is_private_v6(ip: Ipv6Addr) -> bool {
    let segments = ip.segments();
    // fc00::/7 unique local, fe80::/10 link local
    ip.is_loopback() || (segments[0] & 0xfe00) == 0xfc00 || (segments[0] & 0xffc0) == 0xfe80
}
