//! The scanning grammar.
//!
//! One combined pass recognizes, in priority order at each `<`: a DOCTYPE
//! declaration, a comment, a CDATA section, a processing instruction, then
//! a generic tag. Anything else — including a `<` that opens no construct —
//! is content. The grammar is permissive and non-validating: unterminated
//! special constructs run to the end of the input with an empty closing
//! delimiter.
//!
//! DOCTYPE/comment/CDATA/instruction constructs synthesize a
//! Start/Content/End marker triple whose Start and End fragments carve out
//! exactly the delimiter text and whose Content fragment is the strict
//! interior.

use std::collections::VecDeque;

use crate::attributes::parse_attributes;
use crate::fragment::{Fragment, Matches, iter_matches};

use super::marker::{Marker, TagName};

/// How a generic tag closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Start,
    End,
    Inline,
}

/// One recognized construct, produced by the matcher.
#[derive(Debug, Clone)]
enum Construct<'src> {
    /// DOCTYPE, comment, CDATA, or processing instruction: expands to a
    /// Start/Content/End triple.
    Declaration {
        name: TagName<'src>,
        open: Fragment<'src>,
        interior: Fragment<'src>,
        close: Fragment<'src>,
    },
    /// A generic open/close/self-closing tag.
    Tag {
        kind: TagKind,
        name: TagName<'src>,
        attr_text: &'src str,
    },
}

fn starts_with_ci(text: &str, at: usize, target: &str) -> bool {
    text.as_bytes()
        .get(at..at + target.len())
        .is_some_and(|window| window.eq_ignore_ascii_case(target.as_bytes()))
}

const fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b':')
}

fn split_name(raw: &str) -> TagName<'_> {
    match raw.split_once(':') {
        Some((prefix, local)) if !prefix.is_empty() && !local.is_empty() => TagName {
            prefix: Some(prefix),
            local,
        },
        _ => TagName {
            prefix: None,
            local: raw,
        },
    }
}

/// Interior and close-delimiter bounds of a delimited construct starting
/// at `p` with an `open_len`-byte opening delimiter. A missing closing
/// delimiter takes the interior to the end of the input and leaves the
/// close fragment empty there.
fn delimited_bounds(text: &str, p: usize, open_len: usize, close: &str) -> (usize, usize, usize) {
    let interior_start = p + open_len;
    match text.get(interior_start..).and_then(|rest| rest.find(close)) {
        Some(rel) => {
            let close_start = interior_start + rel;
            (interior_start, close_start, close_start + close.len())
        }
        None => (interior_start, text.len(), text.len()),
    }
}

fn declaration<'src>(
    text: &'src str,
    p: usize,
    name_end: usize,
    open_len: usize,
    close: &str,
) -> (usize, usize, Construct<'src>) {
    let (interior_start, close_start, end) = delimited_bounds(text, p, open_len, close);
    let construct = Construct::Declaration {
        name: TagName {
            prefix: None,
            local: &text[p + 1..name_end],
        },
        open: Fragment::new(text, p, interior_start),
        interior: Fragment::new(text, interior_start, close_start),
        close: Fragment::new(text, close_start, end),
    };
    (p, end, construct)
}

fn match_declaration(text: &str, p: usize) -> Option<(usize, usize, Construct<'_>)> {
    let rest = &text[p..];
    if starts_with_ci(text, p, "<!doctype") {
        return Some(declaration(text, p, p + 9, 9, ">"));
    }
    if rest.starts_with("<!--") {
        return Some(declaration(text, p, p + 4, 4, "-->"));
    }
    if rest.starts_with("<![CDATA[") {
        return Some(declaration(text, p, p + 9, 9, "]]>"));
    }
    if rest.starts_with("<?") {
        // Processing instruction; the tree builder skips these entirely.
        let bytes = text.as_bytes();
        let mut name_end = p + 2;
        while name_end < text.len() && is_name_byte(bytes[name_end]) {
            name_end += 1;
        }
        let (interior_start, close_start, end) =
            match text[p + 2..].find("?>") {
                Some(rel) => (p + 2, p + 2 + rel, p + 2 + rel + 2),
                None => delimited_bounds(text, p, 2, ">"),
            };
        let construct = Construct::Declaration {
            name: TagName {
                prefix: None,
                local: &text[p + 1..name_end],
            },
            open: Fragment::new(text, p, interior_start),
            interior: Fragment::new(text, interior_start, close_start),
            close: Fragment::new(text, close_start, end),
        };
        return Some((p, end, construct));
    }
    None
}

fn match_tag(text: &str, p: usize) -> Option<(usize, usize, Construct<'_>)> {
    let bytes = text.as_bytes();
    let mut i = p + 1;
    let closing = bytes.get(i) == Some(&b'/');
    if closing {
        i += 1;
    }
    let first = *bytes.get(i)?;
    if !(first.is_ascii_alphabetic() || first == b'_') {
        return None;
    }
    let name_start = i;
    while i < text.len() && is_name_byte(bytes[i]) {
        i += 1;
    }
    let name = split_name(&text[name_start..i]);

    // The raw attribute text runs to the first `>`; a quoted `>` is not
    // respected by this scanning grammar. A tag with no `>` at all is not
    // a tag.
    let gt = i + text[i..].find('>')?;
    let mut attr_end = gt;
    let kind = if closing {
        TagKind::End
    } else if gt > i && bytes[gt - 1] == b'/' {
        attr_end = gt - 1;
        TagKind::Inline
    } else {
        TagKind::Start
    };
    let construct = Construct::Tag {
        kind,
        name,
        attr_text: &text[i..attr_end],
    };
    Some((p, gt + 1, construct))
}

/// The combined matcher: next construct at or after `from`.
fn find_construct(text: &str, from: usize) -> Option<(usize, usize, Construct<'_>)> {
    let mut search = from;
    while search < text.len() {
        let p = search + text[search..].find('<')?;
        if let Some(found) = match_declaration(text, p).or_else(|| match_tag(text, p)) {
            return Some(found);
        }
        // Not a construct; this `<` is content. Keep scanning.
        search = p + 1;
    }
    None
}

type ConstructMatcher<'src> = fn(&'src str, usize) -> Option<(usize, usize, Construct<'src>)>;

/// The tokenizer: a pure function of its input with an instance-local scan
/// cursor. Iterate it to drain the marker sequence; the sequence covers the
/// input contiguously and is not restartable.
#[derive(Debug)]
pub struct Tokenizer<'src> {
    matches: Matches<'src, Construct<'src>, ConstructMatcher<'src>>,
    queue: VecDeque<Marker<'src>>,
}

impl<'src> Tokenizer<'src> {
    /// Create a tokenizer over `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let matcher: ConstructMatcher<'src> = find_construct;
        Self {
            matches: iter_matches(matcher, source),
            queue: VecDeque::new(),
        }
    }
}

impl<'src> Iterator for Tokenizer<'src> {
    type Item = Marker<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(marker) = self.queue.pop_front() {
            return Some(marker);
        }
        let (matched, fragment) = self.matches.next()?;
        let Some(construct) = matched else {
            return Some(Marker::Content { fragment });
        };
        match construct {
            Construct::Declaration {
                name,
                open,
                interior,
                close,
            } => {
                self.queue.push_back(Marker::Content { fragment: interior });
                self.queue.push_back(Marker::End {
                    fragment: close,
                    name,
                });
                Some(Marker::Start {
                    fragment: open,
                    name,
                    attributes: Vec::new(),
                })
            }
            Construct::Tag {
                kind,
                name,
                attr_text,
            } => Some(match kind {
                TagKind::Start => Marker::Start {
                    fragment,
                    name,
                    attributes: parse_attributes(attr_text),
                },
                TagKind::End => Marker::End { fragment, name },
                TagKind::Inline => Marker::Inline {
                    fragment,
                    name,
                    attributes: parse_attributes(attr_text),
                },
            }),
        }
    }
}
