//! Class-token and inline-style views over element attributes.
//!
//! The class list is a token view over the `class` attribute: mutations
//! rewrite the attribute string, so the attribute stays the single source
//! of truth. The inline style dictionary is element state merged over the
//! `style` attribute at serialization time (dictionary wins). Elements
//! named `style` additionally expose a parsed, read-only sheet view of
//! their text content.

use crate::{Document, NodeId};

impl Document {
    /// Class tokens of the element's `class` attribute, in order.
    #[must_use]
    pub fn classes(&self, element: NodeId) -> Vec<&str> {
        self.get_attribute(element, "class")
            .map(|value| value.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Whether the element carries the given class token.
    #[must_use]
    pub fn has_class(&self, element: NodeId, class: &str) -> bool {
        self.classes(element).contains(&class)
    }

    /// Add a class token (no-op if already present).
    pub fn add_class(&mut self, element: NodeId, class: &str) {
        if self.has_class(element, class) {
            return;
        }
        let value = match self.get_attribute(element, "class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
            _ => class.to_string(),
        };
        self.set_attribute(element, "class", &value);
    }

    /// Remove a class token (no-op if absent).
    pub fn remove_class(&mut self, element: NodeId, class: &str) {
        let Some(existing) = self.get_attribute(element, "class") else {
            return;
        };
        let value = existing
            .split_whitespace()
            .filter(|token| *token != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute(element, "class", &value);
    }

    /// Toggle a class token; returns true when the token is now present.
    pub fn toggle_class(&mut self, element: NodeId, class: &str) -> bool {
        if self.has_class(element, class) {
            self.remove_class(element, class);
            false
        } else {
            self.add_class(element, class);
            true
        }
    }

    /// Look up an inline style property by the exact name it was set with.
    #[must_use]
    pub fn style_get(&self, element: NodeId, property: &str) -> Option<&str> {
        self.as_element(element)?
            .style
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Set an inline style property, updating in place or appending.
    ///
    /// camelCase property names are accepted here and rewritten to
    /// kebab-case when the style is serialized.
    pub fn style_set(&mut self, element: NodeId, property: &str, value: &str) {
        let Some(data) = self.as_element_mut(element) else {
            return;
        };
        if let Some(entry) = data.style.iter_mut().find(|(name, _)| name == property) {
            entry.1 = value.to_string();
        } else {
            data.style.push((property.to_string(), value.to_string()));
        }
    }

    /// Remove an inline style property (no-op if absent).
    pub fn style_remove(&mut self, element: NodeId, property: &str) {
        if let Some(data) = self.as_element_mut(element) {
            data.style.retain(|(name, _)| name != property);
        }
    }

    /// Parsed sheet view of a `style` element's text content.
    ///
    /// Only available on elements whose name is `style`; every other node
    /// returns `None`. The view is re-parsed on each call and is not a CSS
    /// engine: rules are selector text plus raw declaration pairs.
    #[must_use]
    pub fn style_sheet(&self, element: NodeId) -> Option<StyleSheet> {
        let data = self.as_element(element)?;
        if data.tag_name != "style" {
            return None;
        }
        Some(StyleSheet::parse(&self.text_content(element)))
    }
}

/// A parsed `style` element body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    /// The sheet's rules, in source order.
    pub rules: Vec<StyleRule>,
}

/// One `selector { declarations }` rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleRule {
    /// The rule's selector text, trimmed.
    pub selector: String,
    /// `property: value` pairs, in source order.
    pub declarations: Vec<(String, String)>,
}

impl StyleSheet {
    /// Parse rule text permissively; malformed pieces are skipped.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut rules = Vec::new();
        for block in text.split('}') {
            let Some((selector, body)) = block.split_once('{') else {
                continue;
            };
            let selector = selector.trim();
            if selector.is_empty() {
                continue;
            }
            rules.push(StyleRule {
                selector: selector.to_string(),
                declarations: parse_declarations(body),
            });
        }
        Self { rules }
    }
}

/// Split `a: b; c: d` into trimmed pairs, skipping malformed entries.
pub(crate) fn parse_declarations(body: &str) -> Vec<(String, String)> {
    body.split(';')
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            let property = property.trim();
            let value = value.trim();
            if property.is_empty() {
                return None;
            }
            Some((property.to_string(), value.to_string()))
        })
        .collect()
}
