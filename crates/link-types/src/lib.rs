//! Core types and traits for the post-link graph service.
//!
//! Edge/NodeStats rows are produced by an upstream build step; everything in
//! this workspace is a read path over them.

mod dto;
mod edge;
mod ident;
mod stats;
mod traits;

pub use dto::*;
pub use edge::*;
pub use ident::*;
pub use stats::*;
pub use traits::*;
