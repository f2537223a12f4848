//! Sorted-sequence set kernels: unique/distinct/intersect/minus, plus linear
//! and binary search and a seeded uniform-random filler.
//!
//! Every function here that takes a "sorted" slice trusts the caller: none of
//! them re-sort their input, and passing unsorted data produces an unspecified
//! (but not unsafe) result, matching the source contract these are grounded
//! on (`ArrayKernels.h`).

use crate::error::ArrayError;
use rand::{Rng, SeedableRng};
use rand::distributions::uniform::SampleUniform;
use rand_chacha::ChaCha8Rng;

/// Count of elements in a sorted slice that appear exactly once.
pub fn unique_count<T: PartialEq>(source: &[T]) -> usize {
    count_runs(source).into_iter().filter(|&(_, n)| n == 1).count()
}

/// The elements of a sorted slice that appear exactly once, in order.
pub fn unique_array<T: Clone + PartialEq>(source: &[T]) -> Vec<T> {
    let mut out = Vec::new();
    for (start, len) in count_runs(source) {
        if len == 1 {
            out.push(source[start].clone());
        }
    }
    out
}

/// Count of distinct equivalence classes (i.e. the first instance of every
/// run, ignoring duplicates) in a sorted slice.
pub fn distinct_count<T: PartialEq>(source: &[T]) -> usize {
    count_runs(source).len()
}

/// One representative per equivalence class, preserving sorted order.
pub fn distinct_array<T: Clone + PartialEq>(source: &[T]) -> Vec<T> {
    count_runs(source)
        .into_iter()
        .map(|(start, _)| source[start].clone())
        .collect()
}

/// [`distinct_array`], plus the multiplicity of each returned representative
/// in `source`.
pub fn distinct_array_with_counts<T: Clone + PartialEq>(source: &[T]) -> (Vec<T>, Vec<usize>) {
    let runs = count_runs(source);
    let values = runs.iter().map(|&(start, _)| source[start].clone()).collect();
    let counts = runs.into_iter().map(|(_, len)| len).collect();
    (values, counts)
}

/// Run-length encode a sorted slice into `(start_index, run_length)` pairs.
fn count_runs<T: PartialEq>(source: &[T]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut i = 0;
    while i < source.len() {
        let start = i;
        while i + 1 < source.len() && source[i + 1] == source[start] {
            i += 1;
        }
        runs.push((start, i - start + 1));
        i += 1;
    }
    runs
}

/// Multiset intersection count of two sorted slices (duplicates counted):
/// `min(count_in_a(x), count_in_b(x))` summed over all `x`.
pub fn intersect_count<T: Ord>(a: &[T], b: &[T]) -> usize {
    intersect_indices(a, b).len()
}

/// Multiset intersection of two sorted slices, with duplicates: for every
/// value `x`, `min(count_in_a(x), count_in_b(x))` copies appear in the
/// result, in sorted order. `intersect_array(a, b)` and `intersect_array(b,
/// a)` are equal as multisets.
pub fn intersect_array<T: Ord + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    intersect_indices(a, b)
        .into_iter()
        .map(|i| a[i].clone())
        .collect()
}

fn intersect_indices<T: Ord>(a: &[T], b: &[T]) -> Vec<usize> {
    let mut out = Vec::new();
    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(i);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// Multiset-minus count: number of elements of `a` with no matching element
/// left in `b` once shared occurrences are cancelled out.
pub fn minus_count<T: Ord>(a: &[T], b: &[T]) -> usize {
    minus_array_impl(a, b).len()
}

/// `a` minus `b` as sorted multisets: every element of `a` survives unless
/// cancelled by a not-yet-cancelled equal element of `b`.
pub fn minus_array<T: Ord + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    minus_array_impl(a, b).into_iter().map(|i| a[i].clone()).collect()
}

fn minus_array_impl<T: Ord>(a: &[T], b: &[T]) -> Vec<usize> {
    let mut out = Vec::new();
    let (mut i, mut j) = (0usize, 0usize);
    while i < a.len() {
        if j < b.len() && a[i] == b[j] {
            i += 1;
            j += 1;
        } else if j < b.len() && b[j] < a[i] {
            j += 1;
        } else {
            out.push(i);
            i += 1;
        }
    }
    out
}

/// Binary search a sorted slice for `target`, returning its index.
pub fn binary_search<T: Ord>(source: &[T], target: &T) -> Result<usize, ArrayError> {
    source.binary_search(target).map_err(|_| ArrayError::NotFound)
}

/// Unsorted fallback: scan `source` front to back for `target`.
pub fn linear_search<T: PartialEq>(source: &[T], target: &T) -> Result<usize, ArrayError> {
    source
        .iter()
        .position(|x| x == target)
        .ok_or(ArrayError::NotFound)
}

/// Fill `dest` with values drawn from `U[lo, hi]` using a PRNG seeded
/// deterministically from `seed`, so the same seed always reproduces the
/// same sequence (used by the benchmark harness and by tests needing
/// reproducible "random" meshes).
pub fn random_uniform<T>(dest: &mut [T], lo: T, hi: T, seed: u64)
where
    T: SampleUniform + PartialOrd + Copy,
{
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for slot in dest.iter_mut() {
        *slot = rng.gen_range(lo..=hi);
    }
}

/// Element-wise `dest[i] = a[i] + b[i]`. Fails if the three slices' lengths
/// differ.
pub fn add<T: std::ops::Add<Output = T> + Copy>(
    a: &[T],
    b: &[T],
    dest: &mut [T],
) -> Result<(), ArrayError> {
    if a.len() != b.len() || a.len() != dest.len() {
        return Err(ArrayError::SizeMismatch {
            source: a.len(),
            dest: dest.len(),
        });
    }
    for i in 0..a.len() {
        dest[i] = a[i] + b[i];
    }
    Ok(())
}

/// Sum of all elements, starting from `T::default()`.
pub fn sum<T: std::ops::Add<Output = T> + Default + Copy>(source: &[T]) -> T {
    source.iter().fold(T::default(), |acc, &x| acc + x)
}

/// Fill `dest` entirely with `T::default()`.
pub fn zero<T: Default + Copy>(dest: &mut [T]) {
    dest.fill(T::default());
}

/// Copy `source` into `dest`, failing if their lengths differ.
pub fn copy<T: Copy>(source: &[T], dest: &mut [T]) -> Result<(), ArrayError> {
    if source.len() != dest.len() {
        return Err(ArrayError::SizeMismatch {
            source: source.len(),
            dest: dest.len(),
        });
    }
    dest.copy_from_slice(source);
    Ok(())
}

/// Owned copy of `source`.
pub fn duplicate<T: Clone>(source: &[T]) -> Vec<T> {
    source.to_vec()
}

/// Fallibly narrow a `usize` count down to an `i64` index, for the label
/// types that are signed in the source contract (a negative base index is
/// legal; an over-wide `usize` is not representable).
pub fn size_to_index(size: usize) -> Result<i64, ArrayError> {
    i64::try_from(size).map_err(|_| ArrayError::IndexOutOfRange {
        index: size,
        len: usize::MAX,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_and_distinct() {
        let xs = [1, 1, 2, 3, 3, 3, 4];
        assert_eq!(unique_count(&xs), 2); // 2 and 4
        assert_eq!(unique_array(&xs), vec![2, 4]);
        assert_eq!(distinct_count(&xs), 4);
        assert_eq!(distinct_array(&xs), vec![1, 2, 3, 4]);
        let (vals, counts) = distinct_array_with_counts(&xs);
        assert_eq!(vals, vec![1, 2, 3, 4]);
        assert_eq!(counts, vec![2, 1, 3, 1]);
    }

    #[test]
    fn intersect_is_commutative_as_multiset() {
        let a = [1, 1, 2, 4];
        let b = [1, 2, 2, 5];
        let mut ab = intersect_array(&a, &b);
        let mut ba = intersect_array(&b, &a);
        ab.sort();
        ba.sort();
        assert_eq!(ab, ba);
        assert_eq!(ab, vec![1, 2]);
    }

    #[test]
    fn minus_cancels_shared_occurrences() {
        let a = [1, 1, 2, 3];
        let b = [1, 3];
        assert_eq!(minus_array(&a, &b), vec![1, 2]);
        assert_eq!(minus_count(&a, &b), 2);
    }

    #[test]
    fn distinct_is_idempotent() {
        let xs = [1, 1, 2, 3, 3];
        let once = distinct_array(&xs);
        let twice = distinct_array(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn binary_search_finds_and_misses() {
        let xs = [1, 3, 5, 7];
        assert_eq!(binary_search(&xs, &5), Ok(2));
        assert_eq!(binary_search(&xs, &6), Err(ArrayError::NotFound));
    }

    #[test]
    fn linear_search_on_unsorted() {
        let xs = [5, 1, 9, 3];
        assert_eq!(linear_search(&xs, &9), Ok(2));
        assert_eq!(linear_search(&xs, &2), Err(ArrayError::NotFound));
    }

    #[test]
    fn random_uniform_is_seed_deterministic() {
        let mut a = [0i32; 16];
        let mut b = [0i32; 16];
        random_uniform(&mut a, 0, 100, 42);
        random_uniform(&mut b, 0, 100, 42);
        assert_eq!(a, b);
        assert!(a.iter().all(|&v| (0..=100).contains(&v)));
    }

    #[test]
    fn add_rejects_size_mismatch() {
        let a = [1, 2, 3];
        let b = [1, 2];
        let mut dest = [0; 3];
        assert!(matches!(add(&a, &b, &mut dest), Err(ArrayError::SizeMismatch { .. })));
    }
}
