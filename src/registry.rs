//! Route table and handler registration.
//!
//! The table is the single source of truth for API routing: declaration
//! order is match priority, and the handler names here must line up with the
//! names registered in [`register_all`]. Static page routes are not listed;
//! the server resolves those before consulting the router.

use crate::dispatcher::Dispatcher;
use crate::handlers;
use crate::router::RouteMeta;
use crate::store::MarineStore;
use http::Method;
use std::sync::Arc;

/// The fixed, ordered API route table.
#[must_use]
pub fn route_table() -> Vec<RouteMeta> {
    vec![
        RouteMeta::new(Method::GET, "/api", "api_root"),
        RouteMeta::new(Method::GET, "/api/marines", "list_marines"),
        RouteMeta::new(Method::GET, "/api/marines/{id}", "get_marine"),
        RouteMeta::new(Method::POST, "/api/marines", "create_marine"),
    ]
}

/// Register every API handler with the dispatcher, sharing one store.
///
/// # Safety
///
/// Spawns handler coroutines; the `may` runtime must be initialized first.
/// See [`Dispatcher::register_handler`].
pub unsafe fn register_all(dispatcher: &mut Dispatcher, store: Arc<MarineStore>) {
    dispatcher.register_handler("api_root", |req| handlers::api_root::handler(&req));

    let s = store.clone();
    dispatcher.register_handler("list_marines", move |req| {
        handlers::list_marines::handler(&s, &req)
    });

    let s = store.clone();
    dispatcher.register_handler("get_marine", move |req| {
        handlers::get_marine::handler(&s, &req)
    });

    let s = store;
    dispatcher.register_handler("create_marine", move |req| {
        handlers::create_marine::handler(&s, &req)
    });
}
