//! Static resolution of the cursor and element types of a source sequence.
//!
//! A source is usable by the adapters when it implements [`Sequence`]. There
//! are three mutually exclusive ways to get there:
//!
//! 1. fixed-size arrays and slices, which walk with a [`SliceCursor`];
//! 2. caller-bounded pointer runs, see [`RawRange`](crate::RawRange) and
//!    [`PtrCursor`](crate::PtrCursor);
//! 3. any type implementing [`Container`], which walks with an
//!    [`IterCursor`] over its own borrowing iterator.
//!
//! A type outside all three is rejected when the adapter is instantiated,
//! unless it writes its own `unsafe impl Sequence`.

use std::{
    collections::{btree_set, linked_list, vec_deque, BTreeSet, LinkedList, VecDeque},
    fmt, ptr, slice,
};

/// A raw position inside a source sequence.
///
/// Equality is positional: two cursors of the same sequence are equal when
/// they refer to the same slot, and every past-the-end cursor equals every
/// other past-the-end cursor of that sequence.
pub trait RawCursor<'s>: Clone + PartialEq {
    type Item: 's;

    /// Returns the element at this position.
    ///
    /// # Safety
    ///
    /// `self` must not be at the past-the-end position of its sequence.
    unsafe fn get(&self) -> &'s Self::Item;

    /// Moves one slot forward.
    fn step(&mut self);

    /// Upper bound on the number of slots between `self` and `end`, when the
    /// cursor can tell without walking.
    #[inline]
    fn distance(&self, _end: &Self) -> Option<usize> {
        None
    }
}

/// A sequence whose cursor and element types are known statically.
///
/// # Safety
///
/// The adapters dereference cursors without bounds checks, trusting this
/// contract:
///
/// * stepping [`raw_begin`](Self::raw_begin) a finite number of times yields
///   a cursor equal to [`raw_end`](Self::raw_end);
/// * every cursor reached on the way, other than the last one, may be passed
///   to [`RawCursor::get`] for as long as `self` is borrowed.
///
/// Handing out begin and end cursors of two different slices breaks the first
/// point, so it needs `unsafe`:
///
/// ```compile_fail
/// use filter_iterable::{Sequence, SliceCursor};
///
/// struct Mismatched([i32; 3]);
///
/// impl Sequence for Mismatched {
///     type Elem = i32;
///
///     type Cursor<'s> = SliceCursor<'s, i32>
///     where
///         Self: 's;
///
///     fn raw_begin(&self) -> SliceCursor<'_, i32> {
///         self.0[..].raw_begin()
///     }
///
///     fn raw_end(&self) -> SliceCursor<'_, i32> {
///         self.0[..2].raw_end()
///     }
/// }
/// ```
///
/// Most collections should implement [`Container`] instead, which is safe.
pub unsafe trait Sequence {
    type Elem;

    type Cursor<'s>: RawCursor<'s, Item = Self::Elem>
    where
        Self: 's;

    fn raw_begin(&self) -> Self::Cursor<'_>;

    fn raw_end(&self) -> Self::Cursor<'_>;
}

/// A [`Sequence`] whose elements can be handed out mutably, one at a time.
pub trait SequenceMut: Sequence {
    type IterMut<'s>: Iterator<Item = &'s mut Self::Elem>
    where
        Self: 's;

    fn elements_mut(&mut self) -> Self::IterMut<'_>;
}

/// A collection that exposes its own begin/end protocol through a cloneable
/// borrowing iterator.
///
/// Implementing this is how a user-defined collection becomes filterable.
pub trait Container {
    type Elem;

    type Iter<'s>: Iterator<Item = &'s Self::Elem> + Clone
    where
        Self: 's;

    fn elements(&self) -> Self::Iter<'_>;
}

/// Mutable counterpart of [`Container`].
pub trait ContainerMut: Container {
    type IterMut<'s>: Iterator<Item = &'s mut Self::Elem>
    where
        Self: 's;

    fn elements_mut(&mut self) -> Self::IterMut<'_>;
}

/// Index position inside a contiguous run of elements.
pub struct SliceCursor<'s, T> {
    slice: &'s [T],
    index: usize,
}

impl<'s, T> SliceCursor<'s, T> {
    #[inline]
    pub(crate) fn new(slice: &'s [T], index: usize) -> Self {
        Self { slice, index }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T> Clone for SliceCursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SliceCursor<'_, T> {}

impl<T> PartialEq for SliceCursor<'_, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && ptr::eq(self.slice, other.slice)
    }
}

impl<T> fmt::Debug for SliceCursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliceCursor")
            .field("index", &self.index)
            .field("len", &self.slice.len())
            .finish()
    }
}

impl<'s, T: 's> RawCursor<'s> for SliceCursor<'s, T> {
    type Item = T;

    #[inline]
    unsafe fn get(&self) -> &'s T {
        debug_assert!(
            self.index < self.slice.len(),
            "dereferenced a past-the-end cursor"
        );
        // SAFETY: the caller guarantees we are not past the end, so `index`
        // is in bounds.
        unsafe { self.slice.get_unchecked(self.index) }
    }

    #[inline]
    fn step(&mut self) {
        self.index += 1;
    }

    #[inline]
    fn distance(&self, end: &Self) -> Option<usize> {
        Some(end.index.saturating_sub(self.index))
    }
}

/// Position inside a forward-only traversal driven by a borrowing iterator.
///
/// The element under the cursor is pulled eagerly, so being past the end is
/// simply "no current element".
pub struct IterCursor<I: Iterator> {
    rest: I,
    current: Option<I::Item>,
    offset: usize,
}

impl<I: Iterator> IterCursor<I> {
    pub fn begin(mut iter: I) -> Self {
        let current = iter.next();
        Self {
            rest: iter,
            current,
            offset: 0,
        }
    }

    pub fn past_end(iter: I) -> Self {
        Self {
            rest: iter,
            current: None,
            offset: 0,
        }
    }

    /// Number of slots stepped over since `begin`.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl<I> Clone for IterCursor<I>
where
    I: Iterator + Clone,
    I::Item: Clone,
{
    fn clone(&self) -> Self {
        Self {
            rest: self.rest.clone(),
            current: self.current.clone(),
            offset: self.offset,
        }
    }
}

impl<I: Iterator> PartialEq for IterCursor<I> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        match (&self.current, &other.current) {
            (None, None) => true,
            (Some(_), Some(_)) => self.offset == other.offset,
            _ => false,
        }
    }
}

impl<I: Iterator> fmt::Debug for IterCursor<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterCursor")
            .field("offset", &self.offset)
            .field("past_end", &self.current.is_none())
            .finish_non_exhaustive()
    }
}

impl<'s, I, T> RawCursor<'s> for IterCursor<I>
where
    I: Iterator<Item = &'s T> + Clone,
    T: 's,
{
    type Item = T;

    #[inline]
    unsafe fn get(&self) -> &'s T {
        debug_assert!(self.current.is_some(), "dereferenced a past-the-end cursor");
        // SAFETY: the caller guarantees we are not past the end, and only the
        // past-the-end state has no current element.
        unsafe { self.current.unwrap_unchecked() }
    }

    #[inline]
    fn step(&mut self) {
        if self.current.is_some() {
            self.current = self.rest.next();
            self.offset += 1;
        }
    }

    fn distance(&self, _end: &Self) -> Option<usize> {
        let (_, upper) = self.rest.size_hint();
        upper.map(|rest| rest + usize::from(self.current.is_some()))
    }
}

// SAFETY: both cursors index the same array, and every index below `N` is
// in bounds.
unsafe impl<T, const N: usize> Sequence for [T; N] {
    type Elem = T;

    type Cursor<'s> = SliceCursor<'s, T>
    where
        Self: 's;

    #[inline]
    fn raw_begin(&self) -> SliceCursor<'_, T> {
        SliceCursor::new(self, 0)
    }

    #[inline]
    fn raw_end(&self) -> SliceCursor<'_, T> {
        SliceCursor::new(self, N)
    }
}

// SAFETY: as for arrays, with the slice length as the bound.
unsafe impl<T> Sequence for [T] {
    type Elem = T;

    type Cursor<'s> = SliceCursor<'s, T>
    where
        Self: 's;

    #[inline]
    fn raw_begin(&self) -> SliceCursor<'_, T> {
        SliceCursor::new(self, 0)
    }

    #[inline]
    fn raw_end(&self) -> SliceCursor<'_, T> {
        SliceCursor::new(self, self.len())
    }
}

impl<T, const N: usize> SequenceMut for [T; N] {
    type IterMut<'s> = slice::IterMut<'s, T>
    where
        Self: 's;

    fn elements_mut(&mut self) -> slice::IterMut<'_, T> {
        self.iter_mut()
    }
}

impl<T> SequenceMut for [T] {
    type IterMut<'s> = slice::IterMut<'s, T>
    where
        Self: 's;

    fn elements_mut(&mut self) -> slice::IterMut<'_, T> {
        self.iter_mut()
    }
}

// SAFETY: the end cursor has no current element and equals only other
// exhausted cursors, so any cursor that differs from it holds an element.
// Stepping the begin cursor exhausts it once the iterator runs dry.
unsafe impl<C: Container> Sequence for C {
    type Elem = C::Elem;

    type Cursor<'s> = IterCursor<C::Iter<'s>>
    where
        Self: 's;

    #[inline]
    fn raw_begin(&self) -> Self::Cursor<'_> {
        IterCursor::begin(self.elements())
    }

    #[inline]
    fn raw_end(&self) -> Self::Cursor<'_> {
        IterCursor::past_end(self.elements())
    }
}

impl<C: ContainerMut> SequenceMut for C {
    type IterMut<'s> = <C as ContainerMut>::IterMut<'s>
    where
        Self: 's;

    fn elements_mut(&mut self) -> Self::IterMut<'_> {
        ContainerMut::elements_mut(self)
    }
}

impl<T> Container for Vec<T> {
    type Elem = T;

    type Iter<'s> = slice::Iter<'s, T>
    where
        Self: 's;

    fn elements(&self) -> slice::Iter<'_, T> {
        self.iter()
    }
}

impl<T> ContainerMut for Vec<T> {
    type IterMut<'s> = slice::IterMut<'s, T>
    where
        Self: 's;

    fn elements_mut(&mut self) -> slice::IterMut<'_, T> {
        self.iter_mut()
    }
}

impl<T> Container for VecDeque<T> {
    type Elem = T;

    type Iter<'s> = vec_deque::Iter<'s, T>
    where
        Self: 's;

    fn elements(&self) -> vec_deque::Iter<'_, T> {
        self.iter()
    }
}

impl<T> ContainerMut for VecDeque<T> {
    type IterMut<'s> = vec_deque::IterMut<'s, T>
    where
        Self: 's;

    fn elements_mut(&mut self) -> vec_deque::IterMut<'_, T> {
        self.iter_mut()
    }
}

impl<T> Container for LinkedList<T> {
    type Elem = T;

    type Iter<'s> = linked_list::Iter<'s, T>
    where
        Self: 's;

    fn elements(&self) -> linked_list::Iter<'_, T> {
        self.iter()
    }
}

impl<T> ContainerMut for LinkedList<T> {
    type IterMut<'s> = linked_list::IterMut<'s, T>
    where
        Self: 's;

    fn elements_mut(&mut self) -> linked_list::IterMut<'_, T> {
        self.iter_mut()
    }
}

impl<T> Container for BTreeSet<T> {
    type Elem = T;

    type Iter<'s> = btree_set::Iter<'s, T>
    where
        Self: 's;

    fn elements(&self) -> btree_set::Iter<'_, T> {
        self.iter()
    }
}
