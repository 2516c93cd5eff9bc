//! # Route Modules
//!
//! HTTP route handlers, grouped by domain.

pub mod tickets;
