//! # Dispatcher Module
//!
//! Coroutine-based request dispatch. Each handler runs in a long-lived `may`
//! coroutine fed by an mpsc channel; the dispatcher sends a
//! [`HandlerRequest`] carrying a per-request reply channel and waits for the
//! [`HandlerResponse`]. Handler panics are caught and converted into 500
//! responses so one bad request cannot take the server down.

mod core;

pub use core::{Dispatcher, HandlerRequest, HandlerResponse, HandlerSender};
