use std::net::SocketAddr;

use axum::http::{header, HeaderMap};

const UNKNOWN: &str = "unknown";

/// Who is buying, as far as the purchase endpoint needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientMetadata {
    pub ip_address: String,
    pub device_info: String,
    pub browser_info: String,
}

impl ClientMetadata {
    pub fn from_request(headers: &HeaderMap, peer: Option<SocketAddr>) -> Self {
        let ip_address = headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .or_else(|| peer.map(|addr| addr.ip().to_string()))
            .unwrap_or_else(|| UNKNOWN.to_string());

        let user_agent = headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        Self {
            ip_address,
            device_info: device_of(user_agent).to_string(),
            browser_info: browser_of(user_agent).to_string(),
        }
    }
}

fn device_of(user_agent: &str) -> &'static str {
    // iOS agents also mention "Mac OS X", so they go first
    const DEVICES: [(&str, &str); 6] = [
        ("iPhone", "iOS"),
        ("iPad", "iOS"),
        ("Android", "Android"),
        ("Windows", "Windows"),
        ("Mac OS X", "macOS"),
        ("Linux", "Linux"),
    ];
    DEVICES
        .iter()
        .find(|(marker, _)| user_agent.contains(*marker))
        .map_or(UNKNOWN, |&(_, device)| device)
}

fn browser_of(user_agent: &str) -> &'static str {
    // Edge and Opera carry a Chrome token, Chrome carries a Safari token
    const BROWSERS: [(&str, &str); 6] = [
        ("Edg/", "Edge"),
        ("OPR/", "Opera"),
        ("Firefox/", "Firefox"),
        ("Chrome/", "Chrome"),
        ("CriOS/", "Chrome"),
        ("Safari/", "Safari"),
    ];
    BROWSERS
        .iter()
        .find(|(marker, _)| user_agent.contains(*marker))
        .map_or(UNKNOWN, |&(_, browser)| browser)
}
