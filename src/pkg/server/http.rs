use serde_json::json;

use crate::{pkg::conf::settings, prelude::Result};

pub const ALLOW_ORIGIN: &str = "*";
pub const CACHE_CONTROL: &str = "no-store, no-cache, must-revalidate";

/// Pulls method and target out of the request line. Everything else in the
/// head is ignored.
pub fn extract_request_line(head: &[u8]) -> Option<(String, String)> {
    let mut lines = head.split(|&b| b == b'\r' || b == b'\n');
    let request_line = lines.next()?;
    let mut parts = request_line.splitn(3, |&b| b == b' ');
    let method = std::str::from_utf8(parts.next()?).ok()?;
    let target = std::str::from_utf8(parts.next()?).ok()?;
    if method.is_empty() || target.is_empty() {
        return None;
    }
    Some((method.to_string(), target.to_string()))
}

/// Every response head goes through here, so the CORS and cache-control
/// headers end up on every reply the server writes.
pub fn response_head(status: &str, content_type: &str, content_length: usize) -> String {
    format!(
        "HTTP/1.1 {}\r\n\
        Content-Type: {}\r\n\
        Content-Length: {}\r\n\
        Access-Control-Allow-Origin: {}\r\n\
        Cache-Control: {}\r\n\
        Connection: close\r\n\
        \r\n",
        status, content_type, content_length, ALLOW_ORIGIN, CACHE_CONTROL
    )
}

pub fn not_found_response() -> Result<String> {
    let body = serde_json::to_string(&json!({
        "detail": &settings.not_found_message.clone().unwrap_or("not found".into())
    }))?;
    Ok(format!(
        "{}{}",
        response_head("404 Not Found", "application/json", body.len()),
        body
    ))
}

pub fn bad_request_response() -> String {
    response_head("400 Bad Request", "text/plain", 0)
}

pub fn not_implemented_response() -> String {
    response_head("501 Not Implemented", "text/plain", 0)
}

pub fn server_error_response() -> String {
    response_head("500 Internal Server Error", "text/plain", 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_request_line() {
        let head = b"GET /words.json HTTP/1.1\r\nHost: localhost:8006\r\n\r\n";
        let (method, target) = extract_request_line(head).unwrap();
        assert_eq!(method, "GET");
        assert_eq!(target, "/words.json");
    }

    #[test]
    fn test_extract_request_line_rejects_garbage() {
        assert!(extract_request_line(b"\r\n\r\n").is_none());
        assert!(extract_request_line(b"nonsense").is_none());
    }

    #[test]
    fn test_response_head_carries_injected_headers() {
        let head = response_head("200 OK", "text/html", 5);
        assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(head.contains("Access-Control-Allow-Origin: *\r\n"));
        assert!(head.contains("Cache-Control: no-store, no-cache, must-revalidate\r\n"));
        assert!(head.contains("Content-Length: 5\r\n"));
        assert!(head.ends_with("\r\n\r\n"));
    }

    #[test]
    fn test_not_found_response() -> Result<()> {
        let response = not_found_response()?;
        assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(response.contains("Content-Type: application/json\r\n"));
        assert!(response.contains("Access-Control-Allow-Origin: *\r\n"));
        assert!(response.ends_with(r#"{"detail":"not found"}"#));
        Ok(())
    }
}
