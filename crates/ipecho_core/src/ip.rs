//! Client IP resolution.

use std::net::{IpAddr, SocketAddr};

/// Resolve the address to report for a request.
///
/// `forwarded_for` is the first `X-Forwarded-For` header occurrence, if any.
/// Its first comma-separated element wins; when it is missing or blank the
/// transport peer address is used instead.
pub fn resolve_client_ip(forwarded_for: Option<&str>, remote: SocketAddr) -> String {
    forwarded_for
        .and_then(first_forwarded)
        .map(str::to_string)
        .unwrap_or_else(|| normalize_ip(remote.ip()).to_string())
}

fn first_forwarded(value: &str) -> Option<&str> {
    let first = value.split(',').next()?.trim();
    (!first.is_empty()).then_some(first)
}

/// Collapse IPv4-mapped IPv6 (`::ffff:a.b.c.d`) to plain IPv4.
pub fn normalize_ip(addr: IpAddr) -> IpAddr {
    match addr {
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(v6),
        },
        v4 => v4,
    }
}
