//! Lazy, read-through filtering over borrowed sequences.
//!
//! [`filter`] wraps a borrowed source and a predicate. Walking the result
//! yields references into the source for exactly the elements the predicate
//! accepts, in source order. Nothing is copied or collected along the way.
//!
//! ```
//! use filter_iterable::filter;
//!
//! let values = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
//! let odd: Vec<_> = filter(&values, |v: &i32| v % 2 == 1).into_iter().copied().collect();
//! assert_eq!(odd, [1, 3, 5, 7, 9]);
//! ```
//!
//! Sources are resolved statically through [`Sequence`]: arrays and slices,
//! pointer ranges ([`RawRange`]) and anything implementing [`Container`].
//! Everything is single-threaded and synchronous; sharing a source between
//! threads is sound for read-only predicates, but nothing here synchronises.

pub mod adapter;
pub mod adapter_mut;
pub mod cursor;
pub mod error;
pub mod raw;
pub mod sequence;

use std::ptr;

pub use adapter::{FilterAdapter, FilterCursor};
pub use adapter_mut::{FilterAdapterMut, FilterCursorMut};
pub use cursor::Cursor;
pub use error::RangeError;
pub use raw::{PtrCursor, RawRange};
pub use sequence::{
    Container, ContainerMut, IterCursor, RawCursor, Sequence, SequenceMut, SliceCursor,
};

/// Filters `source` by `predicate`, inferring both types.
pub fn filter<S, P>(source: &S, predicate: P) -> FilterAdapter<'_, S, P>
where
    S: Sequence + ?Sized,
    P: FnMut(&S::Elem) -> bool + Clone,
{
    FilterAdapter::new(source, predicate)
}

/// Filters `source` by `predicate`, handing out matching elements mutably.
pub fn filter_mut<S, P>(source: &mut S, predicate: P) -> FilterAdapterMut<'_, S, P>
where
    S: SequenceMut + ?Sized,
    P: FnMut(&S::Elem) -> bool + Clone,
{
    FilterAdapterMut::new(source, predicate)
}

/// Predicate accepting everything except `excluded` itself.
///
/// Identity, not equality, decides: an equal value stored elsewhere is still
/// accepted. Zero-sized types share addresses, so identity means nothing for
/// them.
pub fn excluder<T>(excluded: &T) -> impl Fn(&T) -> bool + Clone + '_ {
    move |candidate: &T| !ptr::eq(candidate, excluded)
}

pub trait FilterExt: Sequence {
    fn filtered<P>(&self, predicate: P) -> FilterAdapter<'_, Self, P>
    where
        P: FnMut(&Self::Elem) -> bool + Clone;
}

impl<S> FilterExt for S
where
    S: Sequence + ?Sized,
{
    fn filtered<P>(&self, predicate: P) -> FilterAdapter<'_, Self, P>
    where
        P: FnMut(&Self::Elem) -> bool + Clone,
    {
        FilterAdapter::new(self, predicate)
    }
}

pub trait FilterMutExt: SequenceMut {
    fn filtered_mut<P>(&mut self, predicate: P) -> FilterAdapterMut<'_, Self, P>
    where
        P: FnMut(&Self::Elem) -> bool + Clone;
}

impl<S> FilterMutExt for S
where
    S: SequenceMut + ?Sized,
{
    fn filtered_mut<P>(&mut self, predicate: P) -> FilterAdapterMut<'_, Self, P>
    where
        P: FnMut(&Self::Elem) -> bool + Clone,
    {
        FilterAdapterMut::new(self, predicate)
    }
}
