//! # marine-roster
//!
//! A small coroutine-powered HTTP service exposing an in-memory roster of
//! fictional "marine" records as a JSON API, plus a handful of static pages.
//!
//! ## Architecture
//!
//! - **[`store`]** — the append-only in-memory roster, seeded at startup
//! - **[`router`]** — ordered route table compiled to regexes, first match wins
//! - **[`dispatcher`]** — `may` coroutine per handler, channel dispatch,
//!   panic recovery
//! - **[`server`]** — HTTP service on `may_minihttp`: request parsing, JSON
//!   and static-asset responses
//! - **[`handlers`]** — the four API handlers (welcome, list, lookup, create)
//! - **[`registry`]** — route table plus handler registration
//! - **[`static_files`]** — fixed-directory asset loader
//!
//! ## Request flow
//!
//! Request → parse (method, path, query, body) → fixed page routes →
//! router match → dispatcher → handler reads/appends the store → JSON
//! response. Unmatched requests fall through to a 404 JSON body.
//!
//! ## Runtime
//!
//! Handlers run on the `may` coroutine runtime, not tokio. Stack size is
//! configurable via the `ROSTER_STACK_SIZE` environment variable (see
//! [`runtime_config`]). The roster itself sits behind one exclusive lock;
//! id assignment and append happen under a single acquisition, so ids are
//! strictly increasing and never reused.

pub mod dispatcher;
pub mod handlers;
pub mod registry;
pub mod router;
pub mod runtime_config;
pub mod server;
pub mod static_files;
pub mod store;

pub use dispatcher::{Dispatcher, HandlerRequest, HandlerResponse};
pub use router::{RouteMatch, RouteMeta, Router};
pub use server::{AppService, HttpServer, ServerHandle};
pub use store::{Marine, MarineStore, NewMarine};
