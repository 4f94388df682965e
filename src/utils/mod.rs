//! Shared utility functions.
//!
//! - [`content_length`] - Declared size extraction from response headers

pub mod content_length;

pub use content_length::{
    declared_total, header_content_length, parse_content_range_start, parse_content_range_total,
};
