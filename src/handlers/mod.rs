//! HTTP request handlers.
//!
//! Ambient routes (health, version, metrics, OpenAPI) plus the gateway's
//! proxy routes for content, contact and portfolio PDFs.

pub mod contact;
pub mod content;
pub mod health;
pub mod metrics;
pub mod openapi;
pub mod portfolio;
pub(crate) mod response;
pub mod version;

pub use contact::*;
pub use content::*;
pub use health::*;
pub use metrics::*;
pub use openapi::*;
pub use portfolio::*;
pub use version::*;
