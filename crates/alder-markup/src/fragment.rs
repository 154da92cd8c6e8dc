//! Zero-copy source fragments and the covering match iterator.
//!
//! A [`Fragment`] is an immutable `(source, start, end)` view into the
//! original input — never a copy. Offsets are byte offsets into the source
//! and are expected to lie on character boundaries; every fragment the
//! tokenizer produces satisfies that.

/// An immutable span of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'src> {
    source: &'src str,
    start: usize,
    end: usize,
}

impl<'src> Fragment<'src> {
    /// Create a fragment over `source[start..end]`. Out-of-range or
    /// inverted bounds are clamped rather than rejected.
    #[must_use]
    pub fn new(source: &'src str, start: usize, end: usize) -> Self {
        let end = end.min(source.len());
        let start = start.min(end);
        Self { source, start, end }
    }

    /// A fragment covering the whole source.
    #[must_use]
    pub const fn of(source: &'src str) -> Self {
        Self {
            source,
            start: 0,
            end: source.len(),
        }
    }

    /// The full source string this fragment views into.
    #[must_use]
    pub const fn source(&self) -> &'src str {
        self.source
    }

    /// Start byte offset into the source.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// End byte offset into the source.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Length of the viewed span, in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the fragment views an empty span.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The viewed text.
    #[must_use]
    pub fn text(&self) -> &'src str {
        &self.source[self.start..self.end]
    }

    /// Sub-fragment by offsets relative to this fragment. Negative offsets
    /// count back from the fragment's own end; everything clamps into
    /// bounds, so `slice` never fails.
    #[must_use]
    pub fn slice(&self, from: isize, to: isize) -> Self {
        let resolve = |offset: isize| -> usize {
            if offset < 0 {
                self.len().saturating_sub(offset.unsigned_abs())
            } else {
                offset.unsigned_abs().min(self.len())
            }
        };
        let from = resolve(from);
        let to = resolve(to).max(from);
        Self::new(self.source, self.start + from, self.start + to)
    }
}

/// Lazy iterator covering `text` contiguously with matched and unmatched
/// runs. See [`iter_matches`].
#[derive(Debug)]
pub struct Matches<'src, M, F> {
    source: &'src str,
    /// Everything before this offset has been yielded.
    covered: usize,
    /// Where the next matcher call starts searching. Diverges from
    /// `covered` only after a zero-length match, to force progress.
    scan: usize,
    pending: Option<(usize, usize, M)>,
    done: bool,
    matcher: F,
}

/// Produce a lazy, finite sequence of `(Option<M>, Fragment)` pairs that
/// together cover `text` contiguously: unmatched runs yield `(None, _)`,
/// matched runs `(Some(m), _)`.
///
/// The matcher receives the source and a scan offset and returns the next
/// match at or after that offset as `(start, end, m)`. The scan offset
/// advances by at least one character per step even on a zero-length
/// match, so iteration always terminates.
pub fn iter_matches<'src, M, F>(matcher: F, text: &'src str) -> Matches<'src, M, F>
where
    F: FnMut(&'src str, usize) -> Option<(usize, usize, M)>,
{
    Matches {
        source: text,
        covered: 0,
        scan: 0,
        pending: None,
        done: false,
        matcher,
    }
}

fn next_char_boundary(text: &str, offset: usize) -> usize {
    if offset >= text.len() {
        return text.len();
    }
    offset
        + text[offset..]
            .chars()
            .next()
            .map_or(1, char::len_utf8)
}

impl<'src, M, F> Matches<'src, M, F>
where
    F: FnMut(&'src str, usize) -> Option<(usize, usize, M)>,
{
    fn emit_match(&mut self, start: usize, end: usize, matched: M) -> (Option<M>, Fragment<'src>) {
        self.covered = end;
        if end == start {
            // Force at least one character of progress; a zero-length match
            // at the very end of the input ends the iteration instead.
            let advanced = next_char_boundary(self.source, end);
            if advanced == end {
                self.done = true;
            }
            self.scan = advanced;
        } else {
            self.scan = end;
        }
        (Some(matched), Fragment::new(self.source, start, end))
    }
}

impl<'src, M, F> Iterator for Matches<'src, M, F>
where
    F: FnMut(&'src str, usize) -> Option<(usize, usize, M)>,
{
    type Item = (Option<M>, Fragment<'src>);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((start, end, matched)) = self.pending.take() {
            return Some(self.emit_match(start, end, matched));
        }
        if self.done {
            return None;
        }
        match (self.matcher)(self.source, self.scan) {
            Some((start, end, matched)) => {
                if start > self.covered {
                    // Yield the unmatched run first; hold the match back.
                    let fragment = Fragment::new(self.source, self.covered, start);
                    self.covered = start;
                    self.pending = Some((start, end, matched));
                    Some((None, fragment))
                } else {
                    Some(self.emit_match(start, end, matched))
                }
            }
            None => {
                self.done = true;
                if self.covered < self.source.len() {
                    let fragment = Fragment::new(self.source, self.covered, self.source.len());
                    self.covered = self.source.len();
                    Some((None, fragment))
                } else {
                    None
                }
            }
        }
    }
}
