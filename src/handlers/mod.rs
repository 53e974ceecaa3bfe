//! Request handlers for the roster API, one module per route.

pub mod api_root;
pub mod create_marine;
pub mod get_marine;
pub mod list_marines;
