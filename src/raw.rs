//! Pointer-bounded sequences.
//!
//! The pointer carries no length of its own: the caller hands over the
//! matching end pointer, and the pair is trusted from then on.

use std::{fmt, marker::PhantomData, mem, ops::Range, ptr};

use crate::{
    error::RangeError,
    sequence::{RawCursor, Sequence},
};

/// A run of `T` delimited by a begin and a past-the-end pointer.
pub struct RawRange<'a, T> {
    begin: *const T,
    end: *const T,
    _marker: PhantomData<&'a [T]>,
}

// SAFETY: a `RawRange` only ever hands out shared references, exactly like
// the `&'a [T]` it stands in for.
unsafe impl<T: Sync> Send for RawRange<'_, T> {}
// SAFETY: see above.
unsafe impl<T: Sync> Sync for RawRange<'_, T> {}

impl<'a, T> RawRange<'a, T> {
    /// Borrows the pointer range of `slice`.
    ///
    /// For zero-sized `T` both bounds coincide, so the range is empty.
    #[must_use]
    pub fn from_slice(slice: &'a [T]) -> Self {
        let Range { start, end } = slice.as_ptr_range();
        Self {
            begin: start,
            end,
            _marker: PhantomData,
        }
    }

    /// Builds a range from caller-supplied bounds without checking them.
    ///
    /// # Safety
    ///
    /// `begin..end` must cover initialised values of `T`, laid out
    /// contiguously, that stay alive and unmutated for `'a`, and `end` must
    /// be reachable from `begin` in whole elements.
    #[must_use]
    pub unsafe fn from_raw_parts(begin: *const T, end: *const T) -> Self {
        debug_assert_eq!(Self::validate(begin, end), Ok(()));
        Self {
            begin,
            end,
            _marker: PhantomData,
        }
    }

    /// Builds a range from caller-supplied bounds, rejecting pointer pairs
    /// that cannot bound a run of `T`.
    ///
    /// # Errors
    ///
    /// See [`RangeError`] for the shapes that are refused.
    ///
    /// # Safety
    ///
    /// The checks cover the pointers only. The memory between them must still
    /// hold initialised values of `T` that stay alive and unmutated for `'a`.
    pub unsafe fn from_ptr_range(begin: *const T, end: *const T) -> Result<Self, RangeError> {
        Self::validate(begin, end)?;
        Ok(Self {
            begin,
            end,
            _marker: PhantomData,
        })
    }

    fn validate(begin: *const T, end: *const T) -> Result<(), RangeError> {
        if begin.is_null() || end.is_null() {
            return Err(RangeError::Null);
        }

        let size = mem::size_of::<T>();
        if size == 0 {
            return Err(RangeError::ZeroSized);
        }

        let align = mem::align_of::<T>();
        let (begin, end) = (begin as usize, end as usize);
        for addr in [begin, end] {
            if addr % align != 0 {
                return Err(RangeError::Misaligned { addr, align });
            }
        }

        if end < begin {
            return Err(RangeError::Reversed { begin, end });
        }

        let span = end - begin;
        if span % size != 0 {
            return Err(RangeError::Ragged { span, size });
        }

        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match mem::size_of::<T>() {
            0 => 0,
            size => (self.end as usize - self.begin as usize) / size,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    #[must_use]
    pub fn as_ptr_range(&self) -> Range<*const T> {
        self.begin..self.end
    }
}

impl<T> Clone for RawRange<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RawRange<'_, T> {}

impl<T> fmt::Debug for RawRange<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawRange")
            .field("begin", &self.begin)
            .field("end", &self.end)
            .finish()
    }
}

impl<'a, T> From<&'a [T]> for RawRange<'a, T> {
    fn from(slice: &'a [T]) -> Self {
        Self::from_slice(slice)
    }
}

// SAFETY: every constructor either derives the bounds from a slice or makes
// its caller vouch that `end` is reachable from `begin` over live elements.
unsafe impl<T> Sequence for RawRange<'_, T> {
    type Elem = T;

    type Cursor<'s> = PtrCursor<'s, T>
    where
        Self: 's;

    #[inline]
    fn raw_begin(&self) -> PtrCursor<'_, T> {
        PtrCursor::new(self.begin)
    }

    #[inline]
    fn raw_end(&self) -> PtrCursor<'_, T> {
        PtrCursor::new(self.end)
    }
}

/// A bare element pointer used as a position.
pub struct PtrCursor<'s, T> {
    ptr: *const T,
    _marker: PhantomData<&'s T>,
}

// SAFETY: behaves as a `&'s T`.
unsafe impl<T: Sync> Send for PtrCursor<'_, T> {}
// SAFETY: behaves as a `&'s T`.
unsafe impl<T: Sync> Sync for PtrCursor<'_, T> {}

impl<T> PtrCursor<'_, T> {
    #[inline]
    fn new(ptr: *const T) -> Self {
        Self {
            ptr,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.ptr
    }
}

impl<T> Clone for PtrCursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PtrCursor<'_, T> {}

impl<T> PartialEq for PtrCursor<'_, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.ptr, other.ptr)
    }
}

impl<T> fmt::Debug for PtrCursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PtrCursor").field(&self.ptr).finish()
    }
}

impl<'s, T: 's> RawCursor<'s> for PtrCursor<'s, T> {
    type Item = T;

    #[inline]
    unsafe fn get(&self) -> &'s T {
        // SAFETY: the range this cursor came from vouches for every pointer
        // before its end, and the caller guarantees we are before the end.
        unsafe { &*self.ptr }
    }

    #[inline]
    fn step(&mut self) {
        self.ptr = self.ptr.wrapping_add(1);
    }

    #[inline]
    fn distance(&self, end: &Self) -> Option<usize> {
        let span = (end.ptr as usize).saturating_sub(self.ptr as usize);
        Some(span / mem::size_of::<T>().max(1))
    }
}

#[cfg(test)]
mod tests {
    use std::ptr;

    use super::RawRange;
    use crate::{
        error::RangeError,
        sequence::{RawCursor, Sequence},
    };

    #[test]
    fn slice_bounds_round_trip() {
        let values = [10u64, 20, 30];
        let range = RawRange::from_slice(&values);

        assert_eq!(range.len(), 3);
        assert!(!range.is_empty());
        assert_eq!(range.as_ptr_range(), values.as_ptr_range());

        let mut cursor = range.raw_begin();
        let end = range.raw_end();
        assert_eq!(cursor.distance(&end), Some(3));
        assert!(ptr::eq(cursor.as_ptr(), values.as_ptr()));
        assert!(ptr::eq(end.as_ptr(), values.as_ptr_range().end));

        let mut seen = Vec::new();
        while cursor != end {
            // SAFETY: loop condition.
            seen.push(*unsafe { cursor.get() });
            cursor.step();
        }
        assert_eq!(seen, [10, 20, 30]);
    }

    #[test]
    fn checked_bounds_accept_a_valid_run() {
        let values = [1i32, 2, 3, 4];
        let bounds = values.as_ptr_range();

        // SAFETY: the bounds come from a live array.
        let range = unsafe { RawRange::from_ptr_range(bounds.start, bounds.end) }
            .expect("bounds of an array are valid");
        assert_eq!(range.len(), 4);
    }

    #[test]
    fn checked_bounds_reject_reversed() {
        let values = [1i32, 2, 3, 4];
        let bounds = values.as_ptr_range();

        // SAFETY: rejected before anything is read.
        let err = unsafe { RawRange::from_ptr_range(bounds.end, bounds.start) }.unwrap_err();
        assert!(matches!(err, RangeError::Reversed { begin, end } if begin > end));
    }

    #[test]
    fn checked_bounds_reject_misaligned() {
        let values = [1u32, 2, 3, 4];
        let start = values.as_ptr();
        let skewed = start.cast::<u8>().wrapping_add(1).cast::<u32>();

        // SAFETY: rejected before anything is read.
        let err = unsafe { RawRange::from_ptr_range(skewed, start.wrapping_add(4)) }.unwrap_err();
        assert_eq!(
            err,
            RangeError::Misaligned {
                addr: skewed as usize,
                align: 4
            }
        );
    }

    #[test]
    fn checked_bounds_reject_ragged_span() {
        let values = [[0u8; 3]; 4];
        let start = values.as_ptr();
        let end = start.cast::<u8>().wrapping_add(4).cast::<[u8; 3]>();

        // SAFETY: rejected before anything is read.
        let err = unsafe { RawRange::from_ptr_range(start, end) }.unwrap_err();
        assert_eq!(err, RangeError::Ragged { span: 4, size: 3 });
    }

    #[test]
    fn checked_bounds_reject_null_and_zero_sized() {
        let values = [1u8];

        // SAFETY: rejected before anything is read.
        let err = unsafe { RawRange::from_ptr_range(ptr::null(), values.as_ptr()) }.unwrap_err();
        assert_eq!(err, RangeError::Null);

        let units = [(), ()];
        let bounds = units.as_ptr_range();
        // SAFETY: rejected before anything is read.
        let err = unsafe { RawRange::from_ptr_range(bounds.start, bounds.end) }.unwrap_err();
        assert_eq!(err, RangeError::ZeroSized);
        assert_eq!(err.to_string(), "zero-sized element types cannot be walked by pointer");
    }

    #[test]
    fn zero_sized_slices_are_empty() {
        let units = [(), (), ()];
        let range = RawRange::from_slice(&units);

        assert!(range.is_empty());
        assert_eq!(range.len(), 0);
        assert_eq!(range.raw_begin(), range.raw_end());
    }
}
