//! Tree serialization: XML, HTML, and plain text.
//!
//! A recursive depth-first emitter with two markup modes. XML mode emits
//! every element literally and self-closes empty ones. HTML mode
//! additionally consults a fixed table of void element names (serialized
//! without a closing tag, children skipped) and a small override table of
//! names that must keep an explicit closing tag even when empty. Plain-text
//! mode strips markup, maps `br` to a newline, and escapes only `&`, `<`,
//! `>`.

use crate::class_style::parse_declarations;
use crate::{Document, NodeData, NodeId};

/// Recognized serialization options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Include comment nodes in the output.
    pub comments: bool,
    /// Emit the XML prolog line before a document root.
    pub doctype: bool,
    /// Switch void-element and closing rules to HTML mode.
    pub html: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            comments: true,
            doctype: true,
            html: false,
        }
    }
}

/// HTML void elements: may not hold children and serialize without a
/// closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Names that keep an explicit closing tag even with zero children in HTML
/// mode; browsers do not recognize the self-closed form of these.
const NEVER_VOID_ELEMENTS: &[&str] = &["script", "style", "template", "textarea", "title"];

/// Reverse map from known namespace URIs to their conventional prefixes.
/// Attributes in namespaces outside this map are dropped from output.
const NAMESPACE_PREFIXES: &[(&str, &str)] = &[
    ("http://www.w3.org/1999/xlink", "xlink"),
    ("http://www.w3.org/XML/1998/namespace", "xml"),
    ("http://www.w3.org/2000/svg", "svg"),
];

const XML_PROLOG: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(name))
}

fn is_never_void(name: &str) -> bool {
    NEVER_VOID_ELEMENTS
        .iter()
        .any(|never| never.eq_ignore_ascii_case(name))
}

/// Escape text content: only `&`, `<`, `>`.
fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

/// Escape an attribute value: text escapes plus the double quote.
fn escape_attr(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

/// Rewrite a camelCase property name to kebab-case (`backgroundColor` →
/// `background-color`). Already-kebab names pass through unchanged.
fn camel_to_kebab(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

impl Document {
    /// Serialize a subtree as XML.
    ///
    /// Non-empty elements always close with `</name>`; empty elements
    /// self-close. With `options.doctype`, a document root is prefixed by
    /// the XML prolog line.
    #[must_use]
    pub fn to_xml(&self, id: NodeId, options: &SerializeOptions) -> String {
        let mut out = String::new();
        if options.doctype
            && !options.html
            && matches!(self.get(id).map(|node| &node.data), Some(NodeData::Document))
        {
            out.push_str(XML_PROLOG);
            out.push('\n');
        }
        self.write_node(id, options, &mut out);
        out
    }

    /// Serialize a subtree as HTML: [`Document::to_xml`] with the `html`
    /// option forced on.
    #[must_use]
    pub fn to_html(&self, id: NodeId, options: &SerializeOptions) -> String {
        let options = SerializeOptions {
            html: true,
            ..*options
        };
        let mut out = String::new();
        self.write_node(id, &options, &mut out);
        out
    }

    /// Serialize a subtree as plain text: markup stripped, `br` mapped to a
    /// newline, comments dropped, and only `&`, `<`, `>` escaped.
    #[must_use]
    pub fn to_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_text(id, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, options: &SerializeOptions, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        match &node.data {
            NodeData::Document | NodeData::DocumentFragment => {
                for &child in &node.children {
                    self.write_node(child, options, out);
                }
            }
            NodeData::Text(data) => escape_text(data, out),
            NodeData::Comment(data) => {
                if options.comments {
                    out.push_str("<!--");
                    out.push_str(data);
                    out.push_str("-->");
                }
            }
            NodeData::Element(_) => self.write_element(id, options, out),
        }
    }

    fn write_element(&self, id: NodeId, options: &SerializeOptions, out: &mut String) {
        let Some(data) = self.as_element(id) else {
            return;
        };
        let name = data.qualified_name();
        out.push('<');
        out.push_str(&name);
        self.write_attributes(id, out);

        let children = self.children(id);
        let void = options.html && is_void(&data.tag_name);
        if void || children.is_empty() {
            if options.html && !void && is_never_void(&data.tag_name) {
                out.push_str("></");
                out.push_str(&name);
                out.push('>');
            } else {
                // Void elements never emit children, even if mutation
                // attached some through a non-void past name.
                out.push_str(" />");
            }
            return;
        }

        out.push('>');
        for &child in children {
            self.write_node(child, options, out);
        }
        out.push_str("</");
        out.push_str(&name);
        out.push('>');
    }

    fn write_attributes(&self, id: NodeId, out: &mut String) {
        let Some(data) = self.as_element(id) else {
            return;
        };
        let merge_style = !data.style.is_empty();
        let mut style_written = false;

        for &attr_id in &data.attributes {
            let attr = &self.attrs[attr_id.0];
            if attr.name == "style" && merge_style {
                self.write_merged_style(id, Some(&attr.value), out);
                style_written = true;
                continue;
            }
            out.push(' ');
            out.push_str(&attr.name);
            out.push_str("=\"");
            escape_attr(&attr.value, out);
            out.push('"');
        }

        for (namespace, attr_ids) in &data.ns_attributes {
            // Unrecognized namespaces are dropped from output.
            let Some((_, prefix)) = NAMESPACE_PREFIXES
                .iter()
                .find(|(uri, _)| uri == namespace)
            else {
                continue;
            };
            for &attr_id in attr_ids {
                let attr = &self.attrs[attr_id.0];
                out.push(' ');
                out.push_str(prefix);
                out.push(':');
                out.push_str(&attr.name);
                out.push_str("=\"");
                escape_attr(&attr.value, out);
                out.push('"');
            }
        }

        if merge_style && !style_written {
            self.write_merged_style(id, None, out);
        }
    }

    /// Emit the merged `style` attribute: the explicit attribute string
    /// overlaid with the inline dictionary (dictionary entries win;
    /// camelCase names rewritten to kebab-case).
    fn write_merged_style(&self, id: NodeId, explicit: Option<&str>, out: &mut String) {
        let Some(data) = self.as_element(id) else {
            return;
        };
        let mut merged = explicit.map(parse_declarations).unwrap_or_default();
        for (property, value) in &data.style {
            let property = camel_to_kebab(property);
            if let Some(entry) = merged.iter_mut().find(|(name, _)| *name == property) {
                entry.1 = value.clone();
            } else {
                merged.push((property, value.clone()));
            }
        }
        if merged.is_empty() {
            return;
        }
        let rendered = merged
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("; ");
        out.push_str(" style=\"");
        escape_attr(&rendered, out);
        out.push('"');
    }

    fn write_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        match &node.data {
            NodeData::Text(data) => escape_text(data, out),
            NodeData::Comment(_) => {}
            NodeData::Element(data) if data.tag_name.eq_ignore_ascii_case("br") => {
                out.push('\n');
            }
            _ => {
                for &child in &node.children {
                    self.write_text(child, out);
                }
            }
        }
    }
}
