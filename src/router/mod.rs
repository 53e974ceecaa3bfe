//! # Router Module
//!
//! Path matching and route resolution for the roster service. Route patterns
//! are compiled into regexes at startup; incoming requests are tested against
//! the table in declaration order and the first match wins. Parameter
//! segments such as `{id}` capture one or more digits, so
//! `GET /api/marines/12` matches the record route while
//! `GET /api/marines/12abc` falls through to the 404 handler.

mod core;

pub use core::{ParamVec, RouteMatch, RouteMeta, Router, MAX_INLINE_PARAMS};
