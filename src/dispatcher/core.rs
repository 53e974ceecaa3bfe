use crate::router::{ParamVec, RouteMatch};
use crate::runtime_config::RuntimeConfig;
use http::Method;
use may::coroutine;
use may::sync::mpsc;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, error, info, warn};

/// Request data passed to a handler coroutine.
///
/// Carries everything the handler needs plus a reply channel for the
/// response.
#[derive(Debug)]
pub struct HandlerRequest {
    pub method: Method,
    /// Matched route pattern, e.g. `/api/marines/{id}`.
    pub path: String,
    pub handler_name: String,
    /// Path parameters extracted from the URL.
    pub path_params: ParamVec,
    /// Query string parameters.
    pub query_params: ParamVec,
    /// Request body parsed as JSON, `{}` for an empty POST body.
    pub body: Option<Value>,
    /// Channel the dispatcher is waiting on for the response.
    pub reply_tx: mpsc::Sender<HandlerResponse>,
}

impl HandlerRequest {
    /// Get a path parameter by name. Last write wins for duplicate names.
    #[inline]
    #[must_use]
    pub fn get_path_param(&self, name: &str) -> Option<&str> {
        self.path_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a query parameter by name. Last write wins for duplicate names.
    #[inline]
    #[must_use]
    pub fn get_query_param(&self, name: &str) -> Option<&str> {
        self.query_params
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Response sent back from a handler coroutine.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    pub status: u16,
    pub body: Value,
}

impl HandlerResponse {
    /// A JSON response with the given status.
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// An error response with an `{"error": ...}` body.
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, serde_json::json!({ "error": message }))
    }

    /// The generic 404 body shared by unknown ids and unmatched routes.
    #[must_use]
    pub fn not_found() -> Self {
        Self::error(404, "Not Found")
    }
}

/// Channel sender that feeds requests to a handler coroutine.
pub type HandlerSender = mpsc::Sender<HandlerRequest>;

/// Serve one request: run the handler, catching a panic, and send the
/// response (or a 500) down the request's reply channel.
fn serve_one<F>(handler_fn: &F, req: HandlerRequest)
where
    F: Fn(HandlerRequest) -> HandlerResponse,
{
    let reply_tx = req.reply_tx.clone();
    let handler_name = req.handler_name.clone();
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| handler_fn(req)));
    match outcome {
        Ok(resp) => {
            let _ = reply_tx.send(resp);
        }
        Err(panic) => {
            error!(
                handler_name = %handler_name,
                panic_message = ?panic,
                "Handler panicked"
            );
            let _ = reply_tx.send(HandlerResponse::error(500, "Internal Server Error"));
        }
    }
}

/// Dispatcher that routes matched requests to registered handler coroutines.
#[derive(Clone, Default)]
pub struct Dispatcher {
    handlers: HashMap<String, HandlerSender>,
}

impl Dispatcher {
    /// Create an empty dispatcher. Handlers are registered at startup via
    /// [`Dispatcher::register_handler`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a coroutine that serves `handler_fn` and register it under
    /// `name`.
    ///
    /// The coroutine drains its channel for the lifetime of the process; a
    /// panicking handler is caught and answered with a 500 so the coroutine
    /// keeps serving subsequent requests.
    ///
    /// # Safety
    ///
    /// `may::coroutine::Builder::spawn` is unsafe in the `may` runtime. The
    /// caller must ensure the runtime is initialized before registering
    /// handlers, which `main` does by configuring the stack size first.
    pub unsafe fn register_handler<F>(&mut self, name: &str, handler_fn: F)
    where
        F: Fn(HandlerRequest) -> HandlerResponse + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<HandlerRequest>();
        let name = name.to_string();
        let coroutine_name = name.clone();
        let stack_size = RuntimeConfig::from_env().stack_size;

        // SAFETY: spawn is unsafe in the may runtime; the runtime is
        // initialized before handlers are registered and the closure is
        // Send + 'static with no borrowed state.
        let spawn_result = unsafe {
            coroutine::Builder::new().stack_size(stack_size).spawn(move || {
                debug!(
                    handler_name = %coroutine_name,
                    stack_size = stack_size,
                    "Handler coroutine start"
                );
                for req in rx.iter() {
                    serve_one(&handler_fn, req);
                }
            })
        };

        match spawn_result {
            Ok(_) => {
                if self.handlers.insert(name.clone(), tx).is_some() {
                    warn!(handler_name = %name, "Replaced existing handler");
                } else {
                    info!(handler_name = %name, "Handler registered");
                }
            }
            Err(e) => {
                error!(handler_name = %name, error = %e, "Failed to spawn handler coroutine");
            }
        }
    }

    /// Dispatch a matched request to its handler and wait for the response.
    ///
    /// Returns `None` when no handler is registered under the matched name;
    /// a closed reply channel (crashed coroutine) yields a 500 response
    /// instead of dropping the connection.
    #[must_use]
    pub fn dispatch(&self, route_match: RouteMatch, body: Option<Value>) -> Option<HandlerResponse> {
        let tx = match self.handlers.get(&route_match.handler_name) {
            Some(tx) => tx,
            None => {
                error!(
                    handler_name = %route_match.handler_name,
                    "Handler not found"
                );
                return None;
            }
        };

        let (reply_tx, reply_rx) = mpsc::channel();
        let request = HandlerRequest {
            method: route_match.route.method.clone(),
            path: route_match.route.path_pattern.clone(),
            handler_name: route_match.handler_name,
            path_params: route_match.path_params,
            query_params: route_match.query_params,
            body,
            reply_tx,
        };

        info!(
            handler_name = %request.handler_name,
            method = %request.method,
            path = %request.path,
            "Request dispatched to handler"
        );

        if let Err(e) = tx.send(request) {
            error!(error = %e, "Failed to send request to handler");
            return None;
        }

        match reply_rx.recv() {
            Ok(resp) => Some(resp),
            Err(e) => {
                error!(error = %e, "Handler channel closed before replying");
                Some(HandlerResponse::error(500, "Internal Server Error"))
            }
        }
    }

    /// Names of all registered handlers, for startup diagnostics.
    #[must_use]
    pub fn handler_names(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }
}
