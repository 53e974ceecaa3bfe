use crate::dispatcher::{HandlerRequest, HandlerResponse};
use serde_json::json;

/// `GET /api` — static welcome payload.
pub fn handler(_req: &HandlerRequest) -> HandlerResponse {
    HandlerResponse::json(
        200,
        json!({ "ok": true, "message": "Warhammer 40K marine roster API" }),
    )
}
