use crate::dispatcher::{HandlerRequest, HandlerResponse};
use crate::store::MarineStore;
use serde_json::Value;

/// `GET /api/marines` — full roster, or the subset whose chapter exactly
/// matches the `chapter` query parameter.
pub fn handler(store: &MarineStore, req: &HandlerRequest) -> HandlerResponse {
    let marines = match req.get_query_param("chapter") {
        Some(chapter) => store.by_chapter(chapter),
        None => store.all(),
    };
    HandlerResponse::json(200, serde_json::to_value(marines).unwrap_or(Value::Null))
}
