use axum::http::HeaderMap;
use std::net::SocketAddr;

const IPV4_MAPPED_PREFIX: &str = "::ffff:";

// First hop wins; the result is not validated.
pub fn resolve_client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    let raw = header_value(headers, "x-forwarded-for")
        .or_else(|| header_value(headers, "x-real-ip"))
        .or_else(|| peer.map(|addr| addr.ip().to_string()))?;

    Some(normalize(&raw))
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .filter(|value| !value.is_empty())
}

fn normalize(raw: &str) -> String {
    let first_hop = match raw.split_once(',') {
        Some((first, _)) => first.trim(),
        None => raw,
    };

    first_hop
        .strip_prefix(IPV4_MAPPED_PREFIX)
        .unwrap_or(first_hop)
        .to_string()
}
