//! Request inspection and JSON field helpers.

pub mod http;
pub mod json;
pub mod route;

pub use http::*;
pub use route::*;
