//! Permissive HTML/XML-ish markup parsing for the alder DOM.
//!
//! # Scope
//!
//! This crate implements:
//! - **Fragments** — immutable zero-copy views into the source text, plus
//!   the covering match iterator the tokenizer is built on
//! - **Entity Decoder** — `&name;` / `&#NNN;` expansion with a fixed named
//!   table and verbatim fallback for everything unrecognized
//! - **Attribute Parser** — the never-failing micro-parser for raw in-tag
//!   attribute text
//! - **Tokenizer** — a single-pass scanner producing an ordered marker
//!   sequence that covers the input contiguously
//! - **Tree Builder** — marker consumption into an [`alder_dom::Document`]
//!   via its factories, with a permissive-HTML recovery policy
//!
//! The grammar is non-validating by design. Malformed input never fails;
//! it degrades to the most reasonable partial structure. Strict XML
//! well-formedness checking, DTD processing, and streaming input are out
//! of scope.
//!
//! # Entry points
//!
//! ```
//! use alder_markup::parse;
//!
//! let document = parse("<p class=\"note\">Hello &amp; welcome</p>");
//! let p = document.query_selector(document.root(), ".note").unwrap();
//! assert_eq!(document.text_content(p), "Hello & welcome");
//! ```
//!
//! Each call to [`parse`] builds a fresh [`Document`] with its own
//! tokenizer instance; there is no shared scan state, so parses of
//! different inputs can run concurrently on separate threads.

/// Attribute micro-parser.
pub mod attributes;
/// Marker-to-tree construction.
pub mod builder;
/// Character reference expansion.
pub mod entities;
/// Source fragments and the covering match iterator.
pub mod fragment;
/// The scanning tokenizer.
pub mod tokenizer;

pub use alder_dom::Document;
pub use attributes::{RawAttribute, parse_attributes};
pub use builder::TreeBuilder;
pub use entities::{expand, expand_chunks};
pub use fragment::{Fragment, iter_matches};
pub use tokenizer::{Marker, MarkerKind, TagName, Tokenizer};

/// Parse markup into a fresh [`Document`].
///
/// The primary entry point: tokenizes `text` in one pass and feeds the
/// marker sequence to a [`TreeBuilder`]. Never fails — malformed markup
/// degrades permissively (unmatched closers ignored, unclosed elements
/// implicitly closed at end of input).
#[must_use]
pub fn parse(text: &str) -> Document {
    let mut builder = TreeBuilder::new(Document::new());
    for marker in Tokenizer::new(text) {
        builder.process(marker);
    }
    builder.finish()
}
