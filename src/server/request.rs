use may_minihttp::Request;
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, info};

/// Outcome of reading and decoding a request body.
///
/// The distinction matters to the POST handler: an absent body is treated as
/// an empty object and fails field validation, while a present-but-malformed
/// body is rejected up front with 400 "Invalid JSON".
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No bytes, or only whitespace.
    Empty,
    /// Well-formed JSON.
    Json(serde_json::Value),
    /// Non-empty but not valid JSON, not valid UTF-8, or a transport error
    /// while accumulating the stream.
    Invalid,
}

impl RequestBody {
    /// Classify accumulated, UTF-8-decoded body text.
    fn classify(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return RequestBody::Empty;
        }
        match serde_json::from_str(trimmed) {
            Ok(value) => RequestBody::Json(value),
            Err(e) => {
                debug!(error = %e, "JSON body parse failed");
                RequestBody::Invalid
            }
        }
    }
}

/// Parsed HTTP request data used by `AppService`.
#[derive(Debug, PartialEq)]
pub struct ParsedRequest {
    /// HTTP method (GET, POST, ...).
    pub method: String,
    /// Request path with the query string stripped.
    pub path: String,
    /// Parsed query string parameters.
    pub query_params: HashMap<String, String>,
    /// Request body, accumulated to end-of-stream and decoded.
    pub body: RequestBody,
}

/// Parse query string parameters from a URL path.
///
/// Extracts everything after `?` and URL-decodes names and values.
pub fn parse_query_params(path: &str) -> HashMap<String, String> {
    if let Some(pos) = path.find('?') {
        let query_str = &path[pos + 1..];
        url::form_urlencoded::parse(query_str.as_bytes())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    } else {
        HashMap::new()
    }
}

/// Extract method, path, query parameters, and body from a raw HTTP request.
pub fn parse_request(req: Request) -> ParsedRequest {
    let method = req.method().to_string();
    let raw_path = req.path().to_string();
    let path = raw_path.split('?').next().unwrap_or("/").to_string();

    let query_params = parse_query_params(&raw_path);
    debug!(
        param_count = query_params.len(),
        query_params = ?query_params,
        "Query params parsed"
    );

    let body = {
        let mut body_str = String::new();
        // read_to_string also rejects invalid UTF-8, which counts as an
        // unparseable body.
        match req.body().read_to_string(&mut body_str) {
            Ok(_) => RequestBody::classify(&body_str),
            Err(_) => RequestBody::Invalid,
        }
    };

    info!(method = %method, path = %path, "HTTP request parsed");

    ParsedRequest {
        method,
        path,
        query_params,
        body,
    }
}
