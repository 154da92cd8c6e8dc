//! Lightweight selector parsing and matching.
//!
//! This is deliberately not a CSS engine. A selector string splits on
//! whitespace into *descendant steps*; each step is a conjunction of simple
//! selectors (`tag`, `.class`, `#id`, `[attr]`). The query engine in the
//! crate root matches steps sequentially, using each step's match set as
//! the next step's search scope.
//!
//! Attribute value operators (`~=`, `|=`, `^=`, `$=`, `*=`, `=`) are
//! recognized by the grammar and kept on the parsed step, but matching is
//! presence-only.

use crate::{Document, NodeId};

/// [Selectors Level 4 § 5/6](https://www.w3.org/TR/selectors-4/#elemental-selectors)
///
/// A simple selector is a single condition on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// Type selector: `div`, `p`. Matched ASCII case-insensitively.
    Type(String),
    /// Class selector: `.highlight`. One token of the `class` attribute.
    Class(String),
    /// ID selector: `#main`. Matches the `id` attribute exactly.
    Id(String),
    /// Universal selector: `*`.
    Universal,
    /// Attribute selector: `[href]`, `[type=text]`, `[class~=active]`.
    /// Operator and value are parsed but matching is presence-only.
    Attribute {
        /// The attribute name to test for.
        name: String,
        /// Parsed value operator, if the selector carried one.
        operator: Option<AttrOperator>,
        /// Parsed comparison value, quotes stripped.
        value: Option<String>,
    },
}

/// Attribute selector value operators, grammar-recognized only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrOperator {
    /// `=`
    Equals,
    /// `~=`
    Includes,
    /// `|=`
    DashMatch,
    /// `^=`
    Prefix,
    /// `$=`
    Suffix,
    /// `*=`
    Substring,
}

/// One whitespace-delimited descendant step: a conjunction of simple
/// selectors that must all hold on the same element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectorStep {
    /// The step's conditions, in source order.
    pub selectors: Vec<SimpleSelector>,
}

impl SelectorStep {
    /// Whether every simple selector in this step matches the element.
    #[must_use]
    pub fn matches(&self, document: &Document, id: NodeId) -> bool {
        self.selectors
            .iter()
            .all(|simple| simple.matches(document, id))
    }
}

impl SimpleSelector {
    /// Match one condition against an element node.
    #[must_use]
    pub fn matches(&self, document: &Document, id: NodeId) -> bool {
        let Some(data) = document.as_element(id) else {
            return false;
        };
        match self {
            Self::Universal => true,
            Self::Type(tag) => data.tag_name.eq_ignore_ascii_case(tag),
            Self::Class(class) => document.has_class(id, class),
            Self::Id(id_value) => document.get_attribute(id, "id") == Some(id_value),
            // Presence-only: the parsed operator/value are not evaluated.
            Self::Attribute { name, .. } => document.has_attribute(id, name),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Parse a selector string into descendant steps.
///
/// Unsupported syntax degrades permissively: unrecognized characters are
/// skipped, an unterminated `[...]` runs to the end of its step, and an
/// empty input produces no steps.
#[must_use]
pub fn parse_selector(raw: &str) -> Vec<SelectorStep> {
    raw.split_whitespace()
        .filter_map(|token| {
            let step = parse_step(token);
            if step.selectors.is_empty() {
                None
            } else {
                Some(step)
            }
        })
        .collect()
}

/// Parse one whitespace-free compound like `div.a#b[href]`.
fn parse_step(token: &str) -> SelectorStep {
    let mut selectors = Vec::new();
    let mut chars = token.chars().peekable();

    /// Collect a run of identifier characters.
    fn collect_ident(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
        let mut ident = String::new();
        while let Some(&c) = chars.peek() {
            if is_ident_char(c) {
                ident.push(c);
                let _ = chars.next();
            } else {
                break;
            }
        }
        ident
    }

    while let Some(&c) = chars.peek() {
        match c {
            '*' => {
                let _ = chars.next();
                selectors.push(SimpleSelector::Universal);
            }
            '.' => {
                let _ = chars.next();
                let ident = collect_ident(&mut chars);
                if !ident.is_empty() {
                    selectors.push(SimpleSelector::Class(ident));
                }
            }
            '#' => {
                let _ = chars.next();
                let ident = collect_ident(&mut chars);
                if !ident.is_empty() {
                    selectors.push(SimpleSelector::Id(ident));
                }
            }
            '[' => {
                let _ = chars.next();
                // An unterminated bracket still yields its partial body.
                let mut body = String::new();
                for inner in chars.by_ref() {
                    if inner == ']' {
                        break;
                    }
                    body.push(inner);
                }
                if let Some(selector) = parse_attribute_selector(&body) {
                    selectors.push(selector);
                }
            }
            _ if is_ident_char(c) => {
                let ident = collect_ident(&mut chars);
                selectors.push(SimpleSelector::Type(ident));
            }
            _ => {
                // Unsupported syntax (pseudo-classes, combinator characters
                // inside a step): skip the character.
                let _ = chars.next();
            }
        }
    }

    SelectorStep { selectors }
}

/// Parse the interior of `[...]`: a name, optionally followed by an
/// operator and a (possibly quoted) value.
fn parse_attribute_selector(body: &str) -> Option<SimpleSelector> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    let operator_at = body.find('=');
    let Some(eq) = operator_at else {
        return Some(SimpleSelector::Attribute {
            name: body.to_string(),
            operator: None,
            value: None,
        });
    };
    let (raw_name, operator) = match body[..eq].chars().next_back() {
        Some('~') => (&body[..eq - 1], AttrOperator::Includes),
        Some('|') => (&body[..eq - 1], AttrOperator::DashMatch),
        Some('^') => (&body[..eq - 1], AttrOperator::Prefix),
        Some('$') => (&body[..eq - 1], AttrOperator::Suffix),
        Some('*') => (&body[..eq - 1], AttrOperator::Substring),
        _ => (&body[..eq], AttrOperator::Equals),
    };
    let name = raw_name.trim();
    if name.is_empty() {
        return None;
    }
    let value = body[eq + 1..].trim();
    let value = value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .or_else(|| {
            value
                .strip_prefix('\'')
                .and_then(|rest| rest.strip_suffix('\''))
        })
        .unwrap_or(value);
    Some(SimpleSelector::Attribute {
        name: name.to_string(),
        operator: Some(operator),
        value: Some(value.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compound_step() {
        let steps = parse_selector("div.note#main[href]");
        assert_eq!(steps.len(), 1);
        assert_eq!(
            steps[0].selectors,
            vec![
                SimpleSelector::Type("div".to_string()),
                SimpleSelector::Class("note".to_string()),
                SimpleSelector::Id("main".to_string()),
                SimpleSelector::Attribute {
                    name: "href".to_string(),
                    operator: None,
                    value: None,
                },
            ]
        );
    }

    #[test]
    fn parses_descendant_steps() {
        let steps = parse_selector("div span.a");
        assert_eq!(steps.len(), 2);
    }

    #[test]
    fn recognizes_value_operators_without_evaluating() {
        let steps = parse_selector("[class~=active]");
        assert_eq!(
            steps[0].selectors,
            vec![SimpleSelector::Attribute {
                name: "class".to_string(),
                operator: Some(AttrOperator::Includes),
                value: Some("active".to_string()),
            }]
        );
    }

    #[test]
    fn quoted_attribute_values_are_stripped() {
        let steps = parse_selector("[data-kind=\"note\"]");
        assert_eq!(
            steps[0].selectors,
            vec![SimpleSelector::Attribute {
                name: "data-kind".to_string(),
                operator: Some(AttrOperator::Equals),
                value: Some("note".to_string()),
            }]
        );
    }

    #[test]
    fn empty_selector_yields_no_steps() {
        assert!(parse_selector("   ").is_empty());
    }
}
