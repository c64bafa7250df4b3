#![allow(dead_code)]

use filter_iterable::FilterAdapter;
use filter_iterable::Sequence;

pub const SOURCE: [i32; 11] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

pub fn is_odd(v: &i32) -> bool {
    (v & 1) == 1
}

pub fn is_even(v: &i32) -> bool {
    (v & 1) == 0
}

/// An element type that can be neither copied nor cloned.
#[derive(Debug, PartialEq, Eq)]
pub struct Pinned(pub u32);

pub fn pinned_source() -> [Pinned; 11] {
    std::array::from_fn(|i| Pinned(u32::try_from(i).expect("small index")))
}

/// Walks an adapter with the begin/end protocol and copies out the matches.
pub fn walk<S, P>(adapter: &FilterAdapter<'_, S, P>) -> Vec<S::Elem>
where
    S: Sequence + ?Sized,
    S::Elem: Copy,
    P: FnMut(&S::Elem) -> bool + Clone,
{
    let mut out = Vec::new();
    let end = adapter.end();
    let mut cursor = adapter.begin();
    while cursor != end {
        out.push(*cursor.current().expect("cursor before end has an element"));
        cursor.advance();
    }
    out
}
