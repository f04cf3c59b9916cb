//! Small helpers shared across handlers.

use std::net::SocketAddr;

use axum::http::HeaderMap;

/// Client metadata captured alongside submissions and analytics events.
#[derive(Clone, Debug, Default)]
pub struct ClientMeta {
  pub user_agent: String,
  pub ip_address: String,
}

/// Extract user agent and client IP from the request. A reverse proxy's
/// `x-forwarded-for` (first hop) wins over the raw peer address.
pub fn client_meta(headers: &HeaderMap, peer: &SocketAddr) -> ClientMeta {
  let user_agent = headers
    .get("user-agent")
    .and_then(|v| v.to_str().ok())
    .unwrap_or_default()
    .to_string();
  let ip_address = headers
    .get("x-forwarded-for")
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.split(',').next())
    .map(|v| v.trim().to_string())
    .unwrap_or_else(|| peer.ip().to_string());
  ClientMeta { user_agent, ip_address }
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    s.to_string()
  } else {
    let mut cut = max;
    while !s.is_char_boundary(cut) {
      cut -= 1;
    }
    format!("{}… ({} bytes total)", &s[..cut], s.len())
  }
}
