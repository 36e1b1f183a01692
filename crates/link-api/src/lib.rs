//! HTTP layer for the post-link graph service.

pub mod server;
