//! Fork-join parallelization of the top-down merge sort.

use crate::{
	Cutoffs,
	insertion_sort::insertion_sort,
	merge_sort::{self, copy_back, merge, split_point, working_copy},
};
use ndarray::{ArrayViewMut1, Axis};
use tracing::trace;

/// Sorts `v` using merge sort in parallel on the current Rayon pool.
///
/// The algorithm is stable, allocates memory, and *O*(*n* \* log(*n*)) worst-case. The allocated
/// working copy and auxiliary buffer are each of the same length as is `v`, which is only written
/// once the working copy is completely sorted. If `is_less` panics, the panic is propagated to the
/// caller and `v` is left untouched.
///
/// The output is identical to the one of the sequential [`merge_sort`](merge_sort::merge_sort).
pub fn par_merge_sort<T, F>(v: ArrayViewMut1<'_, T>, is_less: F, cutoffs: Cutoffs)
where
	T: Clone + Send,
	F: Fn(&T, &T) -> bool + Sync,
{
	if v.len() < 2 {
		return;
	}

	let (mut work, mut buf) = working_copy(&v);
	recurse(
		ArrayViewMut1::from(&mut work[..]),
		ArrayViewMut1::from(&mut buf[..]),
		&is_less,
		cutoffs,
	);
	copy_back(v, work);
}

/// Sorts `v` recursively using `buf` of the same length as scratch memory.
///
/// Ranges of at least `cutoffs.parallel()` elements sort both halves as independent tasks via
/// [`rayon::join`], shorter ranges sort them sequentially within the current task.
fn recurse<T, F>(
	mut v: ArrayViewMut1<'_, T>,
	mut buf: ArrayViewMut1<'_, T>,
	is_less: &F,
	cutoffs: Cutoffs,
) where
	T: Send,
	F: Fn(&T, &T) -> bool + Sync,
{
	let len = v.len();
	debug_assert_eq!(len, buf.len());

	if len <= cutoffs.insertion() || len < 2 {
		insertion_sort(v, &mut &*is_less);
		return;
	}

	let mid = split_point(len);
	{
		// The halves are disjoint subviews, tasks never address overlapping elements.
		let (left, right) = v.view_mut().split_at(Axis(0), mid);
		let (buf_left, buf_right) = buf.view_mut().split_at(Axis(0), mid);
		if len >= cutoffs.parallel() {
			trace!(len, mid, "fork");
			rayon::join(
				move || recurse(left, buf_left, is_less, cutoffs),
				move || recurse(right, buf_right, is_less, cutoffs),
			);
		} else {
			let max_insertion = cutoffs.insertion();
			merge_sort::recurse(left, buf_left, &mut &*is_less, max_insertion);
			merge_sort::recurse(right, buf_right, &mut &*is_less, max_insertion);
		}
	}

	// Both halves are already in order.
	if !is_less(&v[mid], &v[mid - 1]) {
		return;
	}
	merge(v, buf, mid, &mut &*is_less);
}

#[cfg(test)]
mod test {
	use super::par_merge_sort;
	use crate::{Cutoffs, merge_sort::merge_sort};
	use core::sync::atomic::{AtomicUsize, Ordering};
	use ndarray::{Array1, arr2};
	use quickcheck_macros::quickcheck;
	use rand::{Rng, SeedableRng, rngs::StdRng};
	use std::panic::{AssertUnwindSafe, catch_unwind};

	#[derive(Debug, Clone, Copy)]
	struct Item {
		index: usize,
		value: u32,
	}

	impl From<(usize, u32)> for Item {
		fn from((index, value): (usize, u32)) -> Self {
			Self { index, value }
		}
	}

	fn tiny() -> Cutoffs {
		Cutoffs::new(2, 3).unwrap()
	}

	#[cfg_attr(miri, ignore)]
	#[quickcheck]
	fn stably_sorted(xs: Vec<u32>) {
		let xs = xs
			.into_iter()
			.map(|x| x % 16)
			.enumerate()
			.map(Item::from)
			.collect::<Vec<Item>>();
		let mut sorted = xs.clone();
		sorted.sort_by_key(|item| item.value);
		let mut array = Array1::from_vec(xs);
		// Fork down to ranges of three elements.
		par_merge_sort(array.view_mut(), |a: &Item, b: &Item| a.value < b.value, tiny());
		for (a, s) in array.iter().zip(&sorted) {
			assert_eq!(a.index, s.index);
			assert_eq!(a.value, s.value);
		}
	}

	#[cfg_attr(miri, ignore)]
	#[quickcheck]
	fn equivalent_to_sequential(xs: Vec<i16>, insertion: u8, extra: u16) {
		let insertion = usize::from(insertion) + 1;
		let cutoffs = Cutoffs::new(insertion, insertion + usize::from(extra) + 1).unwrap();
		let by_abs = |a: &i16, b: &i16| a.unsigned_abs() < b.unsigned_abs();
		let mut sequential = Array1::from_vec(xs.clone());
		let mut parallel = Array1::from_vec(xs);
		merge_sort(sequential.view_mut(), &mut { by_abs }, cutoffs.insertion());
		par_merge_sort(parallel.view_mut(), by_abs, cutoffs);
		assert_eq!(sequential, parallel);
	}

	#[cfg_attr(miri, ignore)]
	#[test]
	fn forks_above_cutoff() {
		let mut rng = StdRng::seed_from_u64(7);
		let xs = (0..200_000).map(|_| rng.random::<u64>()).collect::<Vec<_>>();
		let mut expected = xs.clone();
		expected.sort();
		let mut array = Array1::from_vec(xs);
		par_merge_sort(array.view_mut(), u64::lt, Cutoffs::DEFAULT);
		assert_eq!(array.to_vec(), expected);
	}

	#[test]
	fn non_contiguous() {
		let mut v = arr2(&[[9, 1], [7, 2], [8, 3], [1, 4], [3, 5], [2, 6]]);
		par_merge_sort(v.column_mut(0), i32::lt, tiny());
		assert_eq!(v, arr2(&[[1, 1], [2, 2], [3, 3], [7, 4], [8, 5], [9, 6]]));
	}

	#[cfg_attr(miri, ignore)]
	#[test]
	fn untouched_on_panic() {
		let xs = (0..10_000).rev().collect::<Vec<u32>>();
		let mut array = Array1::from_vec(xs.clone());
		let calls = AtomicUsize::new(0);
		let result = catch_unwind(AssertUnwindSafe(|| {
			par_merge_sort(
				array.view_mut(),
				|a: &u32, b: &u32| {
					let calls = calls.fetch_add(1, Ordering::Relaxed);
					assert!(calls < 1_000, "comparator gave up");
					a < b
				},
				tiny(),
			);
		}));
		assert!(result.is_err());
		assert_eq!(array.to_vec(), xs);
	}
}
