use super::request::{parse_request, ParsedRequest, RequestBody};
use super::response::{write_asset, write_internal_error, write_json, write_not_found};
use crate::dispatcher::Dispatcher;
use crate::router::Router;
use crate::static_files::StaticFiles;
use http::Method;
use may_minihttp::{HttpService, Request, Response};
use serde_json::json;
use std::io;
use std::sync::Arc;
use tracing::{error, warn};

/// The HTTP service: static pages first, then the API route table, then the
/// 404 fallthrough.
#[derive(Clone)]
pub struct AppService {
    pub router: Arc<Router>,
    pub dispatcher: Arc<Dispatcher>,
    pub static_files: StaticFiles,
}

impl AppService {
    pub fn new(router: Arc<Router>, dispatcher: Arc<Dispatcher>, static_files: StaticFiles) -> Self {
        Self {
            router,
            dispatcher,
            static_files,
        }
    }
}

/// Map a page route to the logical file it serves.
///
/// Only these hardcoded names ever reach the static loader; arbitrary
/// request paths never do.
fn page_for(path: &str) -> Option<&'static str> {
    match path {
        "/" | "/index.html" => Some("index.html"),
        "/about" | "/about.html" => Some("about.html"),
        "/styles.css" => Some("styles.css"),
        "/main.js" => Some("main.js"),
        _ => None,
    }
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let ParsedRequest {
            method,
            path,
            query_params,
            body,
        } = parse_request(req);

        // Page routes are fixed and GET-only; everything else goes through
        // the router.
        if method == "GET" {
            if let Some(name) = page_for(&path) {
                match self.static_files.load(name) {
                    Ok((bytes, content_type)) => write_asset(res, content_type, bytes),
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {
                        warn!(asset = name, "Static asset missing");
                        write_not_found(res);
                    }
                    Err(e) => {
                        error!(asset = name, error = %e, "Static asset read failed");
                        write_internal_error(res);
                    }
                }
                return Ok(());
            }
        }

        let Ok(method) = method.parse::<Method>() else {
            write_not_found(res);
            return Ok(());
        };

        let Some(mut route_match) = self.router.route(method.clone(), &path) else {
            write_not_found(res);
            return Ok(());
        };

        for (k, v) in &query_params {
            route_match.query_params.push((Arc::from(k.as_str()), v.clone()));
        }

        // Bodies only matter to POST routes. Empty resolves to an empty
        // object (which then fails field validation); malformed JSON is
        // rejected before dispatch.
        let body = match body {
            RequestBody::Invalid if method == Method::POST => {
                write_json(res, 400, &json!({ "error": "Invalid JSON" }));
                return Ok(());
            }
            RequestBody::Json(value) => Some(value),
            RequestBody::Empty if method == Method::POST => Some(json!({})),
            RequestBody::Empty | RequestBody::Invalid => None,
        };

        match self.dispatcher.dispatch(route_match, body) {
            Some(handler_response) => {
                write_json(res, handler_response.status, &handler_response.body);
            }
            None => {
                error!(path = %path, "Handler failed or not registered");
                write_json(
                    res,
                    500,
                    &json!({ "error": "Handler failed or not registered" }),
                );
            }
        }
        Ok(())
    }
}
