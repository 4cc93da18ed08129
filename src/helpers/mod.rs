//! Helper functions for HTML generation

mod html;

pub use html::*;
