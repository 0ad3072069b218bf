//! Data models for the site's content and API envelopes.
//!
//! Content types carry a `from_json` constructor that validates one untyped
//! backend row; serialization uses the camelCase names the pages expect.

pub mod announcement;
pub mod api;
pub mod blog;
pub mod contact;
pub mod member;
pub mod monitoring;

pub use announcement::*;
pub use api::*;
pub use blog::*;
pub use contact::*;
pub use member::*;
pub use monitoring::*;
