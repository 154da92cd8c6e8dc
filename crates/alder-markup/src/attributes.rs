//! The attribute micro-parser.
//!
//! Turns the raw text between a tag's name and its closing `/` or `>` into
//! an ordered list of name/value pairs. The scan is a single left-to-right
//! pass and never fails: malformed input degrades to the best partial
//! reading. A name with no `=` before the next whitespace boundary is a
//! boolean attribute (`None` value). No entity expansion happens here.

/// One parsed attribute, borrowing the raw tag text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawAttribute<'src> {
    /// The attribute name.
    pub name: &'src str,
    /// The attribute value; `None` marks a boolean attribute.
    pub value: Option<&'src str>,
}

/// Parse raw in-tag attribute text into an ordered list.
///
/// Value rules, in scan order:
/// - quoted values run to the matching quote, quotes stripped;
/// - a missing closing quote takes the rest of the input, trimmed;
/// - unquoted values run to the next whitespace, trimmed;
/// - a trailing `=` yields an empty-string value.
#[must_use]
pub fn parse_attributes(text: &str) -> Vec<RawAttribute<'_>> {
    let bytes = text.as_bytes();
    let len = text.len();
    let mut out = Vec::new();
    let mut pos = 0;

    while pos < len {
        while pos < len && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        if pos >= len {
            break;
        }

        let name_start = pos;
        while pos < len && bytes[pos] != b'=' && !bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        let name = &text[name_start..pos];

        if pos >= len || bytes[pos] != b'=' {
            // No `=` before the boundary: boolean attribute.
            if !name.is_empty() {
                out.push(RawAttribute { name, value: None });
            }
            continue;
        }
        pos += 1;
        if name.is_empty() {
            // Stray `=` with no name; drop the token and keep scanning.
            continue;
        }
        if pos >= len {
            out.push(RawAttribute {
                name,
                value: Some(""),
            });
            break;
        }

        let quote = bytes[pos];
        if quote == b'"' || quote == b'\'' {
            pos += 1;
            let value_start = pos;
            if let Some(i) = text[pos..].find(quote as char) {
                out.push(RawAttribute {
                    name,
                    value: Some(&text[value_start..pos + i]),
                });
                pos += i + 1;
            } else {
                // Missing closing quote: rest of the input, trimmed.
                out.push(RawAttribute {
                    name,
                    value: Some(text[value_start..].trim()),
                });
                pos = len;
            }
        } else {
            let value_start = pos;
            while pos < len && !bytes[pos].is_ascii_whitespace() {
                pos += 1;
            }
            out.push(RawAttribute {
                name,
                value: Some(text[value_start..pos].trim()),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(text: &str) -> Vec<(&str, Option<&str>)> {
        parse_attributes(text)
            .into_iter()
            .map(|attr| (attr.name, attr.value))
            .collect()
    }

    #[test]
    fn mixed_forms_in_order() {
        assert_eq!(
            pairs("a=\"1\" b c=\"x y\" d="),
            vec![
                ("a", Some("1")),
                ("b", None),
                ("c", Some("x y")),
                ("d", Some("")),
            ]
        );
    }

    #[test]
    fn single_quoted_and_unquoted_values() {
        assert_eq!(
            pairs("src='x.png' width=10"),
            vec![("src", Some("x.png")), ("width", Some("10"))]
        );
    }

    #[test]
    fn boolean_attributes() {
        assert_eq!(
            pairs("disabled checked"),
            vec![("disabled", None), ("checked", None)]
        );
    }

    #[test]
    fn missing_closing_quote_takes_rest_trimmed() {
        assert_eq!(pairs("a=\"un terminated  "), vec![("a", Some("un terminated"))]);
    }

    #[test]
    fn quoted_values_are_not_entity_expanded() {
        assert_eq!(pairs("title=\"a &amp; b\""), vec![("title", Some("a &amp; b"))]);
    }

    #[test]
    fn empty_and_whitespace_input() {
        assert!(pairs("").is_empty());
        assert!(pairs("   \t\n ").is_empty());
    }

    #[test]
    fn stray_equals_is_dropped() {
        assert_eq!(pairs("= b"), vec![("b", None)]);
    }
}
