use crate::{
    adapter::FilterCursor,
    adapter_mut::FilterCursorMut,
    sequence::{Sequence, SequenceMut},
};

/// Explicit traversal protocol shared by the filter cursors.
///
/// `Item` borrows from the cursor itself, so a write-through cursor can lend
/// out the element it sits on while a read-only one hands out references
/// that outlive it.
pub trait Cursor {
    type Item<'a>
    where
        Self: 'a;

    fn current(&mut self) -> Option<Self::Item<'_>>;

    fn advance(&mut self);

    fn at_end(&self) -> bool;

    /// Walks to the end, returning how many elements were left.
    fn count_remaining(mut self) -> usize
    where
        Self: Sized,
    {
        let mut remaining = 0;
        while !self.at_end() {
            remaining += 1;
            self.advance();
        }
        remaining
    }
}

impl<'s, S, P> Cursor for FilterCursor<'s, S, P>
where
    S: Sequence + ?Sized + 's,
    P: FnMut(&S::Elem) -> bool,
{
    type Item<'a> = &'s S::Elem
    where
        Self: 'a;

    #[inline]
    fn current(&mut self) -> Option<&'s S::Elem> {
        FilterCursor::current(self)
    }

    #[inline]
    fn advance(&mut self) {
        FilterCursor::advance(self);
    }

    #[inline]
    fn at_end(&self) -> bool {
        FilterCursor::at_end(self)
    }
}

impl<'s, S, P> Cursor for FilterCursorMut<'s, S, P>
where
    S: SequenceMut + ?Sized + 's,
    P: FnMut(&S::Elem) -> bool,
{
    type Item<'a> = &'a mut S::Elem
    where
        Self: 'a;

    #[inline]
    fn current(&mut self) -> Option<&mut S::Elem> {
        self.current_mut()
    }

    #[inline]
    fn advance(&mut self) {
        FilterCursorMut::advance(self);
    }

    #[inline]
    fn at_end(&self) -> bool {
        FilterCursorMut::at_end(self)
    }
}
