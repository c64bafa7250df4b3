use std::{any, fmt, iter::FusedIterator};

use crate::sequence::{RawCursor, Sequence};

/// A read-through view of the elements of `S` that satisfy a predicate.
///
/// The adapter borrows its source and owns a copy of the predicate. Nothing
/// is scanned up front: matching happens while a [`FilterCursor`] is walked,
/// and every traversal evaluates the predicate afresh.
#[must_use]
pub struct FilterAdapter<'s, S: ?Sized, P> {
    source: &'s S,
    predicate: P,
}

impl<'s, S, P> FilterAdapter<'s, S, P>
where
    S: Sequence + ?Sized,
    P: FnMut(&S::Elem) -> bool + Clone,
{
    pub fn new(source: &'s S, predicate: P) -> Self {
        trace_construction::<S, S::Cursor<'s>>("shared");
        Self { source, predicate }
    }

    /// Cursor on the first matching element, or equal to [`end`](Self::end)
    /// when nothing matches.
    pub fn begin(&self) -> FilterCursor<'s, S, P> {
        FilterCursor::new(
            self.source.raw_begin(),
            self.source.raw_end(),
            self.predicate.clone(),
        )
    }

    /// Past-the-end sentinel. Never yields an element.
    pub fn end(&self) -> FilterCursor<'s, S, P> {
        let end = self.source.raw_end();
        FilterCursor::new(end.clone(), end, self.predicate.clone())
    }

    /// Same as [`begin`](Self::begin), named for `Iterator` consumers.
    pub fn iter(&self) -> FilterCursor<'s, S, P> {
        self.begin()
    }
}

impl<'s, S: ?Sized, P> FilterAdapter<'s, S, P> {
    #[must_use]
    pub fn source(&self) -> &'s S {
        self.source
    }

    pub fn predicate(&self) -> &P {
        &self.predicate
    }
}

impl<S: ?Sized, P: Clone> Clone for FilterAdapter<'_, S, P> {
    fn clone(&self) -> Self {
        Self {
            source: self.source,
            predicate: self.predicate.clone(),
        }
    }
}

impl<S: ?Sized + fmt::Debug, P> fmt::Debug for FilterAdapter<'_, S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterAdapter")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl<'s, S, P> IntoIterator for FilterAdapter<'s, S, P>
where
    S: Sequence + ?Sized,
    P: FnMut(&S::Elem) -> bool,
{
    type Item = &'s S::Elem;
    type IntoIter = FilterCursor<'s, S, P>;

    fn into_iter(self) -> Self::IntoIter {
        FilterCursor::new(
            self.source.raw_begin(),
            self.source.raw_end(),
            self.predicate,
        )
    }
}

impl<'s, S, P> IntoIterator for &FilterAdapter<'s, S, P>
where
    S: Sequence + ?Sized,
    P: FnMut(&S::Elem) -> bool + Clone,
{
    type Item = &'s S::Elem;
    type IntoIter = FilterCursor<'s, S, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.begin()
    }
}

/// A position in a filtered traversal.
///
/// Outside of [`advance`](Self::advance), a cursor either sits on an element
/// that satisfies its predicate or is past the end. Cursors compare by raw
/// position only; the predicate plays no part.
///
/// A cursor borrows its source immutably, so it may be sent to another thread
/// when its pieces allow it. There is no synchronisation of any kind.
#[must_use]
pub struct FilterCursor<'s, S, P>
where
    S: Sequence + ?Sized + 's,
{
    current: S::Cursor<'s>,
    end: S::Cursor<'s>,
    predicate: P,
}

impl<'s, S, P> FilterCursor<'s, S, P>
where
    S: Sequence + ?Sized + 's,
    P: FnMut(&S::Elem) -> bool,
{
    fn new(current: S::Cursor<'s>, end: S::Cursor<'s>, predicate: P) -> Self {
        let mut cursor = Self {
            current,
            end,
            predicate,
        };
        cursor.skip_rejected();
        cursor
    }

    /// The matching element under the cursor, borrowed from the source.
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<&'s S::Elem> {
        if self.at_end() {
            return None;
        }

        // SAFETY: not past the end, checked above.
        Some(unsafe { self.current.get() })
    }

    /// Steps to the next matching element. Does nothing once exhausted.
    #[inline]
    pub fn advance(&mut self) {
        if self.at_end() {
            return;
        }

        self.current.step();
        self.skip_rejected();
    }

    #[inline]
    fn skip_rejected(&mut self) {
        while self.current != self.end {
            // SAFETY: loop condition.
            let element = unsafe { self.current.get() };
            if (self.predicate)(element) {
                break;
            }
            self.current.step();
        }
    }
}

impl<'s, S, P> FilterCursor<'s, S, P>
where
    S: Sequence + ?Sized + 's,
{
    #[inline]
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.current == self.end
    }

    /// The raw position in the source.
    pub fn position(&self) -> &S::Cursor<'s> {
        &self.current
    }
}

impl<'s, S, P> PartialEq for FilterCursor<'s, S, P>
where
    S: Sequence + ?Sized + 's,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current
    }
}

impl<'s, S, P> Clone for FilterCursor<'s, S, P>
where
    S: Sequence + ?Sized + 's,
    P: Clone,
{
    fn clone(&self) -> Self {
        Self {
            current: self.current.clone(),
            end: self.end.clone(),
            predicate: self.predicate.clone(),
        }
    }
}

impl<'s, S, P> fmt::Debug for FilterCursor<'s, S, P>
where
    S: Sequence + ?Sized + 's,
    S::Cursor<'s>: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterCursor")
            .field("current", &self.current)
            .field("end", &self.end)
            .finish_non_exhaustive()
    }
}

impl<'s, S, P> Iterator for FilterCursor<'s, S, P>
where
    S: Sequence + ?Sized + 's,
    P: FnMut(&S::Elem) -> bool,
{
    type Item = &'s S::Elem;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let element = self.current()?;
        self.advance();
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // a cursor short of the end sits on a match
        let lower = usize::from(!self.at_end());
        (lower, self.current.distance(&self.end))
    }
}

impl<'s, S, P> FusedIterator for FilterCursor<'s, S, P>
where
    S: Sequence + ?Sized + 's,
    P: FnMut(&S::Elem) -> bool,
{
}

pub(crate) fn trace_construction<S: ?Sized, C: ?Sized>(adapter: &'static str) {
    if cfg!(feature = "trace-types") {
        tracing::trace!(
            adapter,
            iterable = any::type_name::<S>(),
            cursor = any::type_name::<C>(),
            "constructed filter adapter"
        );
    } else {
        tracing::trace!(adapter, "constructed filter adapter");
    }
}
