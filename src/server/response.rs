use may_minihttp::Response;
use serde_json::Value;

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

/// Serialize `body` and write it as a fully-buffered JSON response.
///
/// may_minihttp derives Content-Length from the buffered body, so the byte
/// length is always exact.
pub fn write_json(res: &mut Response, status: u16, body: &Value) {
    res.status_code(status as usize, status_reason(status));
    res.header("Content-Type: application/json; charset=utf-8");
    res.body_vec(serde_json::to_vec(body).unwrap_or_else(|_| b"null".to_vec()));
}

/// Write the shared `{"error": "Not Found"}` payload.
pub fn write_not_found(res: &mut Response) {
    write_json(res, 404, &serde_json::json!({ "error": "Not Found" }));
}

/// Write a static asset body with its extension-derived content type.
pub fn write_asset(res: &mut Response, content_type: &'static str, bytes: Vec<u8>) {
    res.status_code(200, "OK");
    res.header(content_type_header(content_type));
    res.body_vec(bytes);
}

/// Plain-text 500 for static-asset I/O failures that are not missing files.
pub fn write_internal_error(res: &mut Response) {
    res.status_code(500, "Internal Server Error");
    res.header("Content-Type: text/plain; charset=utf-8");
    res.body_vec(b"Internal Server Error".to_vec());
}

/// Map a content type to its full header line.
///
/// may_minihttp takes header lines as `&'static str`; the asset content types
/// form a closed set, so every line can be spelled out here.
fn content_type_header(content_type: &'static str) -> &'static str {
    match content_type {
        "text/html; charset=utf-8" => "Content-Type: text/html; charset=utf-8",
        "text/css; charset=utf-8" => "Content-Type: text/css; charset=utf-8",
        "application/javascript; charset=utf-8" => {
            "Content-Type: application/javascript; charset=utf-8"
        }
        "image/png" => "Content-Type: image/png",
        "image/jpeg" => "Content-Type: image/jpeg",
        _ => "Content-Type: text/plain; charset=utf-8",
    }
}
