//! Progress reporting.
//!
//! Progress is an optional observer of transfers: it receives the bytes
//! written, a label derived from the link and the declared size when known.
//! It is hidden unless the downloader is built verbose.
//!
//! - `style` - Progress bar styling options and templates
//! - `display` - Coordination of the batch bar and the transfer bars
//!
//! # Examples
//!
//! ```rust
//! use stashget::progress::{ProgressBarOpts, StyleOptions};
//!
//! let style_options = StyleOptions::new(
//!     ProgressBarOpts::hidden(),
//!     ProgressBarOpts::with_transfer_style(),
//! );
//! assert!(style_options.is_enabled());
//! ```

pub(crate) mod display;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use style::{ProgressBarOpts, StyleOptions};
