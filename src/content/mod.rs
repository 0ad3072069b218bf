//! Built-in site content.

pub mod fallback;

pub use fallback::*;
