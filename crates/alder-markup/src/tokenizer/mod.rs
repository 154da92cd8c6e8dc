//! Markup tokenizer module.
//!
//! A single left-to-right pass over the input producing an ordered
//! [`Marker`] sequence that covers the input contiguously. The scan cursor
//! is owned by the [`Tokenizer`] instance, never shared, so concurrent
//! parses of different inputs cannot interfere.

/// Marker types produced by the tokenizer.
pub mod marker;
/// The scanning grammar and the tokenizer iterator.
pub mod scan;

pub use marker::{Marker, MarkerKind, TagName};
pub use scan::Tokenizer;
