use crate::dispatcher::{HandlerRequest, HandlerResponse};
use crate::store::{MarineStore, NewMarine};
use serde_json::Value;
use tracing::info;

/// `POST /api/marines` — validate the body, append, return the new record.
///
/// Field presence is the only validation; rank and chapter labels are not
/// checked against the known sets.
pub fn handler(store: &MarineStore, req: &HandlerRequest) -> HandlerResponse {
    let body = req.body.clone().unwrap_or(Value::Null);
    match NewMarine::from_body(&body) {
        Ok(new) => {
            let created = store.create(new);
            info!(id = created.id, name = %created.name, "Marine created");
            HandlerResponse::json(201, serde_json::to_value(created).unwrap_or(Value::Null))
        }
        Err(e) => HandlerResponse::error(400, &e.to_string()),
    }
}
