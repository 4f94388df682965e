//! Declared length extraction from HTTP headers.

use reqwest::header::{HeaderMap, CONTENT_LENGTH, CONTENT_RANGE};

/// Reads the `Content-Length` header.
///
/// Returns `None` if the header is missing or is not a `u64`. The header is
/// read directly because a HEAD response has no body to size.
pub fn header_content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
}

/// Parse Content-Range header to extract total size.
///
/// Content-Range header format: "bytes start-end/total". An unknown total
/// (`*`) yields `None`.
///
/// ```rust
/// use stashget::utils::parse_content_range_total;
///
/// assert_eq!(parse_content_range_total("bytes 0-1023/2048"), Some(2048));
/// assert_eq!(parse_content_range_total("bytes 0-1023/*"), None);
/// ```
pub fn parse_content_range_total(content_range: &str) -> Option<u64> {
    content_range
        .split('/')
        .next_back()
        .and_then(|size| size.trim().parse::<u64>().ok())
}

/// Parse Content-Range header to extract the first byte position.
///
/// ```rust
/// use stashget::utils::parse_content_range_start;
///
/// assert_eq!(parse_content_range_start("bytes 512-1023/1024"), Some(512));
/// assert_eq!(parse_content_range_start("bytes */1024"), None);
/// ```
pub fn parse_content_range_start(content_range: &str) -> Option<u64> {
    content_range
        .trim()
        .strip_prefix("bytes")?
        .trim_start()
        .split('-')
        .next()
        .and_then(|start| start.trim().parse::<u64>().ok())
}

/// Total size of the resource as declared by a response that starts writing
/// at `offset`.
///
/// A partial response declares its total in `Content-Range`, falling back to
/// `offset + Content-Length`. `None` means the size is unknown, e.g. a chunked
/// response.
pub fn declared_total(headers: &HeaderMap, body_length: Option<u64>, offset: u64) -> Option<u64> {
    if offset > 0 {
        if let Some(total) = headers
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
        {
            return Some(total);
        }
    }
    body_length.map(|len| len.saturating_add(offset))
}
