//! Validators and conditional request evaluation for delivered media

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Utc};
use keepsake_infra::parse_http_date;
use sha2::{Digest, Sha256};

const ETAG_HEX_LEN: usize = 32;

/// Strong ETag for one representation of a stored file: a SHA-256 over the stored
/// bytes and the representation tag (format and bounds), truncated to 32 hex chars.
pub fn representation_etag(data: &[u8], representation: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.update(b"\0");
    hasher.update(representation.as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("\"{}\"", &digest[..ETAG_HEX_LEN])
}

fn opaque_tag(tag: &str) -> &str {
    tag.trim().trim_start_matches("W/")
}

/// Whether the client's cached copy is still current.
///
/// `If-None-Match` takes precedence; `If-Modified-Since` is only consulted when it is
/// absent.
pub fn is_not_modified(headers: &HeaderMap, etag: &str, last_modified: DateTime<Utc>) -> bool {
    if let Some(if_none_match) = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
    {
        return if_none_match
            .split(',')
            .map(str::trim)
            .any(|candidate| candidate == "*" || opaque_tag(candidate) == opaque_tag(etag));
    }

    headers
        .get(header::IF_MODIFIED_SINCE)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_http_date)
        .map(|since| last_modified.timestamp() <= since.timestamp())
        .unwrap_or(false)
}
