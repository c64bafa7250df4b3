use std::{fmt, iter::FusedIterator};

use crate::{adapter::trace_construction, sequence::SequenceMut};

/// Write-through counterpart of [`FilterAdapter`](crate::FilterAdapter).
///
/// Holding the source mutably rules out a begin/end cursor pair, so traversal
/// goes through a single [`FilterCursorMut`] that knows when it is exhausted.
#[must_use]
pub struct FilterAdapterMut<'s, S: ?Sized, P> {
    source: &'s mut S,
    predicate: P,
}

impl<'s, S, P> FilterAdapterMut<'s, S, P>
where
    S: SequenceMut + ?Sized,
    P: FnMut(&S::Elem) -> bool + Clone,
{
    pub fn new(source: &'s mut S, predicate: P) -> Self {
        trace_construction::<S, S::IterMut<'s>>("mutable");
        Self { source, predicate }
    }

    /// Cursor on the first matching element.
    pub fn cursor(&mut self) -> FilterCursorMut<'_, S, P> {
        FilterCursorMut::new(self.source.elements_mut(), self.predicate.clone())
    }

    pub fn iter_mut(&mut self) -> FilterCursorMut<'_, S, P> {
        self.cursor()
    }
}

impl<S: ?Sized + fmt::Debug, P> fmt::Debug for FilterAdapterMut<'_, S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterAdapterMut")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl<'s, S, P> IntoIterator for FilterAdapterMut<'s, S, P>
where
    S: SequenceMut + ?Sized,
    P: FnMut(&S::Elem) -> bool,
{
    type Item = &'s mut S::Elem;
    type IntoIter = FilterCursorMut<'s, S, P>;

    fn into_iter(self) -> Self::IntoIter {
        let Self { source, predicate } = self;
        FilterCursorMut::new(source.elements_mut(), predicate)
    }
}

impl<'a, S, P> IntoIterator for &'a mut FilterAdapterMut<'_, S, P>
where
    S: SequenceMut + ?Sized,
    P: FnMut(&S::Elem) -> bool + Clone,
{
    type Item = &'a mut S::Elem;
    type IntoIter = FilterCursorMut<'a, S, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.cursor()
    }
}

/// A position in a filtered, write-through traversal.
///
/// The element under the cursor is uniquely borrowed from the source; writes
/// through [`current_mut`](Self::current_mut) land in the source directly.
#[must_use]
pub struct FilterCursorMut<'s, S, P>
where
    S: SequenceMut + ?Sized + 's,
{
    rest: S::IterMut<'s>,
    current: Option<&'s mut S::Elem>,
    predicate: P,
}

impl<'s, S, P> FilterCursorMut<'s, S, P>
where
    S: SequenceMut + ?Sized + 's,
    P: FnMut(&S::Elem) -> bool,
{
    fn new(mut rest: S::IterMut<'s>, predicate: P) -> Self {
        let current = rest.next();
        let mut cursor = Self {
            rest,
            current,
            predicate,
        };
        cursor.skip_rejected();
        cursor
    }

    #[must_use]
    pub fn current(&self) -> Option<&S::Elem> {
        self.current.as_deref()
    }

    pub fn current_mut(&mut self) -> Option<&mut S::Elem> {
        self.current.as_deref_mut()
    }

    /// Steps to the next matching element. Does nothing once exhausted.
    pub fn advance(&mut self) {
        if self.current.is_some() {
            self.current = self.rest.next();
            self.skip_rejected();
        }
    }

    #[must_use]
    pub fn at_end(&self) -> bool {
        self.current.is_none()
    }

    fn skip_rejected(&mut self) {
        while let Some(element) = self.current.as_deref() {
            if (self.predicate)(element) {
                break;
            }
            self.current = self.rest.next();
        }
    }
}

impl<'s, S, P> fmt::Debug for FilterCursorMut<'s, S, P>
where
    S: SequenceMut + ?Sized + 's,
    S::Elem: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterCursorMut")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl<'s, S, P> Iterator for FilterCursorMut<'s, S, P>
where
    S: SequenceMut + ?Sized + 's,
    P: FnMut(&S::Elem) -> bool,
{
    type Item = &'s mut S::Elem;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.current.take()?;
        self.current = self.rest.next();
        self.skip_rejected();
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.rest.size_hint();
        let lower = usize::from(self.current.is_some());
        (lower, upper.map(|rest| rest + lower))
    }
}

impl<'s, S, P> FusedIterator for FilterCursorMut<'s, S, P>
where
    S: SequenceMut + ?Sized + 's,
    P: FnMut(&S::Elem) -> bool,
{
}
