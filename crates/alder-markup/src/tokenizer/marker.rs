//! Parse markers.
//!
//! Each marker is a discrete parse event paired with the source fragment it
//! covers. The full marker sequence of a document covers the input
//! contiguously; consumers can reconstruct the exact source from the
//! fragments alone.

use strum_macros::Display;

use crate::attributes::RawAttribute;
use crate::fragment::Fragment;

/// The marker kinds, used for dispatch and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MarkerKind {
    /// A run of text between markup constructs.
    Content,
    /// An opening tag, or the opening delimiter of a special construct.
    Start,
    /// A closing tag, or the closing delimiter of a special construct.
    End,
    /// A self-closing tag; never receives children.
    Inline,
}

/// A qualified tag name split at the first `:`.
///
/// Special constructs reuse this with a `!`- or `?`-prefixed local name
/// (`!DOCTYPE`, `!--`, `![CDATA[`, `?xml`) so the tree builder can dispatch
/// on the first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagName<'src> {
    /// Namespace prefix, when the source name was `prefix:local`.
    pub prefix: Option<&'src str>,
    /// Local name.
    pub local: &'src str,
}

impl TagName<'_> {
    /// The name as written, `prefix:local` or just the local name.
    #[must_use]
    pub fn qualified(&self) -> String {
        match self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local),
            None => self.local.to_string(),
        }
    }
}

/// A discrete parse event paired with its source fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Marker<'src> {
    /// Unmatched text between constructs, or the interior of a special
    /// construct.
    Content {
        /// The covered source span.
        fragment: Fragment<'src>,
    },
    /// An opening tag with its parsed attributes, or a special-construct
    /// opening delimiter (empty attribute list).
    Start {
        /// The covered source span (`<name ...>` or the open delimiter).
        fragment: Fragment<'src>,
        /// The qualified tag name.
        name: TagName<'src>,
        /// Ordered attributes; a `None` value marks a boolean attribute.
        attributes: Vec<RawAttribute<'src>>,
    },
    /// A closing tag or special-construct closing delimiter.
    End {
        /// The covered source span (`</name>` or the close delimiter).
        fragment: Fragment<'src>,
        /// The qualified tag name.
        name: TagName<'src>,
    },
    /// A self-closing tag with its parsed attributes.
    Inline {
        /// The covered source span (`<name ... />`).
        fragment: Fragment<'src>,
        /// The qualified tag name.
        name: TagName<'src>,
        /// Ordered attributes; a `None` value marks a boolean attribute.
        attributes: Vec<RawAttribute<'src>>,
    },
}

impl<'src> Marker<'src> {
    /// The marker's kind.
    #[must_use]
    pub const fn kind(&self) -> MarkerKind {
        match self {
            Self::Content { .. } => MarkerKind::Content,
            Self::Start { .. } => MarkerKind::Start,
            Self::End { .. } => MarkerKind::End,
            Self::Inline { .. } => MarkerKind::Inline,
        }
    }

    /// The source fragment this marker covers.
    #[must_use]
    pub const fn fragment(&self) -> Fragment<'src> {
        match self {
            Self::Content { fragment }
            | Self::Start { fragment, .. }
            | Self::End { fragment, .. }
            | Self::Inline { fragment, .. } => *fragment,
        }
    }
}
