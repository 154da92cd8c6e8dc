//! Tree construction from the marker sequence.
//!
//! The builder keeps a stack of open container nodes seeded with the
//! document root and consumes markers in order. The policy is permissive
//! HTML, not strict XML: excess closing tags are ignored, and elements
//! still open at the end of input are treated as implicitly closed with no
//! re-parenting pass.
//!
//! DOCTYPE, comment, and CDATA constructs all collapse into Comment nodes
//! holding the construct's raw interior — a deliberate lossy
//! normalization. Processing instructions are dropped entirely, so a
//! serialized XML prolog does not accumulate nodes across re-parses.

use alder_common::warning::warn_once;
use alder_dom::{Document, NodeId};

use crate::attributes::RawAttribute;
use crate::entities::expand;
use crate::tokenizer::{Marker, TagName};

/// Special construct currently being captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    None,
    /// A `!` construct: the next Content marker's raw text becomes this
    /// comment's data.
    Comment(NodeId),
    /// A `?` construct: interior content is discarded.
    Skip,
}

/// Consumes markers and builds a [`Document`] through its factories.
#[derive(Debug)]
pub struct TreeBuilder {
    document: Document,
    /// The stack of open containers; index 0 is always the document root.
    stack: Vec<NodeId>,
    pending: Pending,
}

impl TreeBuilder {
    /// Create a builder around a fresh document.
    #[must_use]
    pub fn new(document: Document) -> Self {
        let root = document.root();
        Self {
            document,
            stack: vec![root],
            pending: Pending::None,
        }
    }

    fn current(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(NodeId::ROOT)
    }

    /// Process one marker.
    pub fn process(&mut self, marker: Marker<'_>) {
        match marker {
            Marker::Content { fragment } => match self.pending {
                Pending::Comment(comment) => {
                    // Raw interior text, no entity expansion.
                    self.document.set_data(comment, fragment.text());
                }
                Pending::Skip => {}
                Pending::None => {
                    let decoded = expand(fragment.text());
                    if !decoded.trim().is_empty() {
                        let text = self.document.create_text(&decoded);
                        self.append(text);
                    }
                }
            },
            Marker::Start {
                name, attributes, ..
            } => {
                if name.local.starts_with('!') {
                    let comment = self.document.create_comment("");
                    self.append(comment);
                    self.pending = Pending::Comment(comment);
                } else if name.local.starts_with('?') {
                    self.pending = Pending::Skip;
                } else {
                    let element = self.create_element(name, &attributes, false);
                    self.append(element);
                    self.stack.push(element);
                }
            }
            Marker::End { name, .. } => {
                if name.local.starts_with('!') || name.local.starts_with('?') {
                    self.pending = Pending::None;
                } else if self.stack.len() > 1 {
                    let _ = self.stack.pop();
                } else {
                    // Unbalanced excess closer; silently ignored apart from
                    // the deduplicated diagnostic.
                    warn_once(
                        "TreeBuilder",
                        &format!("ignored unmatched closing tag </{}>", name.qualified()),
                    );
                }
            }
            Marker::Inline {
                name, attributes, ..
            } => {
                let element = self.create_element(name, &attributes, true);
                self.append(element);
            }
        }
    }

    fn create_element(
        &mut self,
        name: TagName<'_>,
        attributes: &[RawAttribute<'_>],
        self_closing: bool,
    ) -> NodeId {
        let element = self.document.create_element_ns(name.prefix, name.local);
        for attribute in attributes {
            // A boolean attribute's missing value becomes an empty string.
            self.document
                .set_attribute(element, attribute.name, attribute.value.unwrap_or(""));
        }
        if self_closing && let Some(data) = self.document.as_element_mut(element) {
            data.self_closing = true;
        }
        element
    }

    fn append(&mut self, node: NodeId) {
        let current = self.current();
        if let Err(error) = self.document.append_child(current, node) {
            warn_once("TreeBuilder", &error.to_string());
        }
    }

    /// Finish building: elements still open are implicitly closed.
    #[must_use]
    pub fn finish(self) -> Document {
        self.document
    }
}
