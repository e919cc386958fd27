//! Minimal HTTP/1.1 exchange over a tokio TCP stream.
//!
//! One request per connection (`Connection: close`). Responses are framed by
//! `Content-Length`, chunked transfer encoding, or end of stream. Timeouts are
//! applied by the caller around [`send`].

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::config::Endpoint;
use crate::error::TransportError;

const USER_AGENT: &str = concat!("snake-client/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Serialize a request. `body` of `None` sends no entity headers at all.
pub fn encode_request(endpoint: &Endpoint, method: Method, path: &str, body: Option<&str>) -> Vec<u8> {
    let mut out = String::with_capacity(256);
    out.push_str(method.as_str());
    out.push(' ');
    out.push_str(&endpoint.path(path));
    out.push_str(" HTTP/1.1\r\n");
    out.push_str(&format!("Host: {}\r\n", endpoint.authority()));
    out.push_str(&format!("User-Agent: {USER_AGENT}\r\n"));
    out.push_str("Accept: application/json\r\n");
    out.push_str("Connection: close\r\n");
    if let Some(body) = body {
        out.push_str("Content-Type: application/json\r\n");
        out.push_str(&format!("Content-Length: {}\r\n", body.len()));
        out.push_str("\r\n");
        out.push_str(body);
    } else {
        out.push_str("\r\n");
    }
    out.into_bytes()
}

/// Perform one request/response exchange.
pub async fn send(
    endpoint: &Endpoint,
    method: Method,
    path: &str,
    body: Option<&str>,
) -> Result<HttpResponse, TransportError> {
    let address = endpoint.authority();

    let mut stream = TcpStream::connect((endpoint.host(), endpoint.port()))
        .await
        .map_err(|e| connection(&address, e))?;

    let request = encode_request(endpoint, method, path, body);
    stream
        .write_all(&request)
        .await
        .map_err(|e| connection(&address, e))?;
    stream.flush().await.map_err(|e| connection(&address, e))?;

    let raw = read_response(&mut stream)
        .await
        .map_err(|e| connection(&address, e))?;
    parse_response(&raw)
}

fn connection(address: &str, source: std::io::Error) -> TransportError {
    TransportError::Connection {
        address: address.to_string(),
        source,
    }
}

async fn read_response(stream: &mut TcpStream) -> std::io::Result<Vec<u8>> {
    let mut raw = Vec::with_capacity(4096);
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&chunk[..n]);
        if is_complete(&raw) {
            break;
        }
    }
    Ok(raw)
}

/// True once `raw` holds a full response per its framing headers.
/// Unframed responses are only complete at end of stream.
fn is_complete(raw: &[u8]) -> bool {
    let Some(head_end) = find(raw, b"\r\n\r\n") else {
        return false;
    };
    let head = String::from_utf8_lossy(&raw[..head_end]);
    let body = &raw[head_end + 4..];

    // Broken chunk framing stops the read; parse_response reports it.
    if is_chunked(head.lines()) {
        return scan_chunked(body) != ChunkScan::Partial;
    }
    match content_length(head.lines()) {
        Some(len) => body.len() >= len,
        None => false,
    }
}

fn is_chunked<'a>(mut lines: impl Iterator<Item = &'a str>) -> bool {
    lines.any(|line| match line.split_once(':') {
        Some((k, v)) => {
            k.trim().eq_ignore_ascii_case("transfer-encoding")
                && v.to_ascii_lowercase().contains("chunked")
        }
        None => false,
    })
}

fn content_length<'a>(lines: impl Iterator<Item = &'a str>) -> Option<usize> {
    lines
        .filter_map(|line| line.split_once(':'))
        .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.trim().parse().ok())
}

/// Parse a complete raw response.
pub fn parse_response(raw: &[u8]) -> Result<HttpResponse, TransportError> {
    if raw.is_empty() {
        return Err(TransportError::malformed("empty response"));
    }
    let head_end =
        find(raw, b"\r\n\r\n").ok_or_else(|| TransportError::malformed("truncated response headers"))?;
    let head = String::from_utf8_lossy(&raw[..head_end]);
    let mut lines = head.split("\r\n");

    let status_line = lines.next().unwrap_or_default();
    let mut parts = status_line.splitn(3, ' ');
    let version = parts.next().unwrap_or_default();
    if !version.starts_with("HTTP/") {
        return Err(TransportError::malformed(format!(
            "bad status line {status_line:?}"
        )));
    }
    let status = parts
        .next()
        .and_then(|s| s.parse::<u16>().ok())
        .ok_or_else(|| TransportError::malformed(format!("bad status line {status_line:?}")))?;
    let reason = parts.next().unwrap_or_default().to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect();

    let rest = &raw[head_end + 4..];
    let header_lines = || headers.iter().map(|(k, v)| (k.as_str(), v.as_str()));
    let chunked = header_lines().any(|(k, v)| {
        k.eq_ignore_ascii_case("transfer-encoding") && v.to_ascii_lowercase().contains("chunked")
    });

    let body = if chunked {
        match scan_chunked(rest) {
            ChunkScan::Done(body) => body,
            ChunkScan::Partial => return Err(TransportError::malformed("truncated chunked body")),
            ChunkScan::Invalid => return Err(TransportError::malformed("invalid chunk framing")),
        }
    } else {
        let declared = header_lines()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, v)| v.parse::<usize>().ok());
        match declared {
            Some(len) if rest.len() < len => {
                return Err(TransportError::malformed(format!(
                    "body truncated at {} of {len} bytes",
                    rest.len()
                )))
            }
            Some(len) => rest[..len].to_vec(),
            None => rest.to_vec(),
        }
    };

    Ok(HttpResponse {
        status,
        reason,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

/// Largest chunk size accepted from the server.
const MAX_CHUNK: usize = 16 * 1024 * 1024;

/// State of a chunked body scanned so far.
#[derive(Debug, PartialEq, Eq)]
enum ChunkScan {
    Done(Vec<u8>),
    Partial,
    Invalid,
}

fn scan_chunked(mut data: &[u8]) -> ChunkScan {
    let mut out = Vec::new();
    loop {
        let Some(line_end) = find(data, b"\r\n") else {
            return ChunkScan::Partial;
        };
        let size = std::str::from_utf8(&data[..line_end])
            .ok()
            .and_then(|line| line.split(';').next())
            .and_then(|hex| usize::from_str_radix(hex.trim(), 16).ok());
        let Some(size) = size.filter(|&n| n <= MAX_CHUNK) else {
            return ChunkScan::Invalid;
        };
        data = &data[line_end + 2..];

        if size == 0 {
            return ChunkScan::Done(out);
        }
        let Some(framed) = size.checked_add(2) else {
            return ChunkScan::Invalid;
        };
        if data.len() < framed {
            return ChunkScan::Partial;
        }
        if &data[size..framed] != b"\r\n" {
            return ChunkScan::Invalid;
        }
        out.extend_from_slice(&data[..size]);
        data = &data[framed..];
    }
}

/// Decode a chunked body. `None` until the terminating zero-size chunk, or
/// when the framing is broken.
pub fn decode_chunked(data: &[u8]) -> Option<Vec<u8>> {
    match scan_chunked(data) {
        ChunkScan::Done(body) => Some(body),
        ChunkScan::Partial | ChunkScan::Invalid => None,
    }
}

fn find(hay: &[u8], needle: &[u8]) -> Option<usize> {
    hay.windows(needle.len()).position(|w| w == needle)
}
