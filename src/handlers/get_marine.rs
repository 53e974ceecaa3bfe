use crate::dispatcher::{HandlerRequest, HandlerResponse};
use crate::store::MarineStore;
use serde_json::Value;

/// `GET /api/marines/{id}` — single record lookup.
///
/// The router only matches digit ids, so a parse failure here means the
/// value overflowed `u64`; that id cannot exist either way.
pub fn handler(store: &MarineStore, req: &HandlerRequest) -> HandlerResponse {
    let id = match req.get_path_param("id").and_then(|v| v.parse::<u64>().ok()) {
        Some(id) => id,
        None => return HandlerResponse::not_found(),
    };
    match store.find(id) {
        Some(marine) => {
            HandlerResponse::json(200, serde_json::to_value(marine).unwrap_or(Value::Null))
        }
        None => HandlerResponse::not_found(),
    }
}
