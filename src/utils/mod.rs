//! Shared utility functions.
//!
//! - `mime`: media type parsing for accepted document formats

mod mime;

pub use mime::{dotted_extension, MediaType};
