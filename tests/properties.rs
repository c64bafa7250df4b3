mod common;

use std::collections::LinkedList;

use filter_iterable::{filter, filter_mut};
use proptest::prelude::*;
use rand::{thread_rng, Rng};

proptest! {
    #[test]
    fn matches_iterator_filter(
        values in proptest::collection::vec(-1000i32..1000, 0..64),
        modulus in 1i32..7,
        residue in 0i32..7,
    ) {
        let predicate = move |v: &i32| v.rem_euclid(modulus) == residue % modulus;
        let expected: Vec<i32> = values.iter().copied().filter(|v| predicate(v)).collect();

        let from_vec: Vec<i32> = filter(&values, predicate).into_iter().copied().collect();
        prop_assert_eq!(&from_vec, &expected);

        let list: LinkedList<i32> = values.iter().copied().collect();
        prop_assert_eq!(common::walk(&filter(&list, predicate)), expected);
    }

    #[test]
    fn yields_are_ordered_source_slots(
        mask in proptest::collection::vec(any::<bool>(), 0..64),
    ) {
        let slots: Vec<usize> = (0..mask.len()).collect();
        let picked: Vec<usize> = filter(&slots, |i: &usize| mask[*i])
            .into_iter()
            .map(|slot| {
                let offset = std::ptr::from_ref(slot) as usize - slots.as_ptr() as usize;
                offset / std::mem::size_of::<usize>()
            })
            .collect();

        prop_assert!(picked.windows(2).all(|w| w[0] < w[1]), "no duplicates, source order");
        prop_assert_eq!(picked.len(), mask.iter().filter(|m| **m).count());
        for slot in picked {
            prop_assert!(mask[slot]);
        }
    }
}

#[test]
fn random_write_through() {
    let mut rng = thread_rng();

    for _ in 0..32 {
        let len = rng.gen_range(0..128);
        let mut values: Vec<i64> = (0..len).map(|_| rng.gen_range(-50..50)).collect();
        let original = values.clone();

        for v in filter_mut(&mut values, |v: &i64| *v < 0) {
            *v = -*v;
        }

        let expected: Vec<i64> = original.iter().map(|v| v.abs()).collect();
        assert_eq!(values, expected);
    }
}

#[test]
fn random_sources_begin_equals_end_without_matches() {
    let mut rng = thread_rng();

    for _ in 0..32 {
        let len = rng.gen_range(0..64);
        let values: Vec<u8> = (0..len).map(|_| rng.gen_range(0..200)).collect();
        let adapter = filter(&values, |v: &u8| *v >= 200);

        assert!(adapter.begin() == adapter.end());
    }
}
