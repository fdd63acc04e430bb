//! Stable [merge sort], sequential or in parallel, for non-contiguous (sub)views into
//! *n*-dimensional arrays. Both variants share one comparator-based engine and produce identical
//! output for any total order.
//!
//! # Example
//!
//! ```
//! use ndarray_mergesort::{MergeSort1Ext, ndarray::arr2};
//!
//! // 2-dimensional array of 4 rows and 5 columns.
//! let mut v = arr2(&[[-5, 4, 1, -3,  2],   // row 0, axis 0
//!                    [ 8, 3, 2,  4,  8],   // row 1, axis 0
//!                    [38, 9, 3,  0,  3],   // row 2, axis 0
//!                    [ 4, 9, 0,  8, -1]]); // row 3, axis 0
//!
//! // Due to row-major memory layout, columns are non-contiguous.
//! let mut column = v.column_mut(4);
//! assert_eq!(column.as_slice_mut(), None);
//!
//! column.sort_sequential();
//! v.column_mut(0).sort_parallel();
//!
//! assert!(v == arr2(&[[-5, 4, 1, -3, -1],
//!                     [ 4, 3, 2,  4,  2],
//!                     [ 8, 9, 3,  0,  3],
//!                     [38, 9, 0,  8,  8]]));
//! ```
//!
//! Vectors and slices are sorted via a mutable view.
//!
//! ```
//! use ndarray_mergesort::{MergeSort1Ext, ndarray::ArrayViewMut1};
//!
//! let mut v = vec![5, 1, 9, 2, 9, 3];
//! ArrayViewMut1::from(&mut v[..]).sort_sequential();
//! assert_eq!(v, [1, 2, 3, 5, 9, 9]);
//! ```
//!
//! # Current Implementation
//!
//! The array is cloned into a working copy which is sorted by top-down merge sort using an
//! auxiliary buffer of the same length. Ranges of up to [`Cutoffs::insertion`] elements are sorted
//! via insertion sort, and merging two sorted halves is skipped if they are already in order. Only
//! once the working copy is completely sorted, it is moved back into the array. Hence, if the
//! comparator panics, the array is left untouched.
//!
//! In parallel, ranges of at least [`Cutoffs::parallel`] elements sort both halves as independent
//! tasks on a work-stealing pool, shorter ranges continue sequentially within the current task.
//!
//! | Resource | Complexity | Sequential       | Parallel (span)  |
//! |----------|------------|------------------|------------------|
//! | Time     | Best       | *O*(*n*)         | *O*(*n*)         |
//! | Time     | Worst      | *O*(*n* log *n*) | *O*(*n*)         |
//! | Space    | Worst      | *O*(*n*)         | *O*(*n*)         |
//!
//! [merge sort]: https://en.wikipedia.org/wiki/Merge_sort
//!
//! # Features
//!
//!   * `std` for [`std::error::Error`]-aware dependencies. Enabled by `default` or `rayon`.
//!   * `rayon` for parallel `sort_parallel*` and [`SortPool`]. Enabled by `default`.

#![deny(
	missing_docs,
	rustdoc::broken_intra_doc_links,
	rustdoc::missing_crate_level_docs
)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

mod cutoffs;
mod error;
mod insertion_sort;
mod merge_sort;

#[cfg(feature = "rayon")]
mod par;
#[cfg(feature = "rayon")]
use par::merge_sort::par_merge_sort;
#[cfg(feature = "rayon")]
pub use par::pool::SortPool;

pub use crate::{cutoffs::Cutoffs, error::Error};

use crate::merge_sort::merge_sort;
use core::cmp::Ordering::{self, Less};
use ndarray::{ArrayBase, Data, DataMut, Ix1};
use tracing::debug;

pub use ndarray;

/// Extension trait for 1-dimensional [`ArrayBase<S, Ix1>`](`ArrayBase`) array or (sub)view with
/// arbitrary memory layout (e.g., non-contiguous) providing stable merge sort, sequentially and in
/// parallel.
pub trait MergeSort1Ext<A, S>
where
	S: Data<Elem = A>,
{
	/// Sorts the array sequentially.
	///
	/// This sort is stable (i.e., does not reorder equal elements) and *O*(*n* log *n*) worst-case.
	/// It allocates a working copy and an auxiliary buffer, each of the same length as `self`.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_mergesort::{MergeSort1Ext, ndarray::arr1};
	///
	/// let mut v = arr1(&[-5, 4, 1, -3, 2]);
	///
	/// v.sort_sequential();
	/// assert!(v == arr1(&[-5, -3, 1, 2, 4]));
	/// ```
	fn sort_sequential(&mut self)
	where
		A: Ord + Clone,
		S: DataMut;
	/// Sorts the array sequentially with a comparator function.
	///
	/// This sort is stable (i.e., does not reorder equal elements) and *O*(*n* log *n*) worst-case.
	///
	/// The comparator function must define a total ordering for the elements in the array. If
	/// the ordering is not total, the order of the elements is unspecified but the array remains a
	/// permutation of its elements. An order is a total order if it is (for all `a`, `b` and `c`):
	///
	/// * total and antisymmetric: exactly one of `a < b`, `a == b` or `a > b` is true, and
	/// * transitive, `a < b` and `b < c` implies `a < c`. The same must hold for both `==` and `>`.
	///
	/// For example, while [`f64`] doesn't implement [`Ord`] because `NaN != NaN`, we can use
	/// `partial_cmp` as our sort function when we know the array doesn't contain a `NaN`.
	///
	/// ```
	/// use ndarray_mergesort::{MergeSort1Ext, ndarray::arr1};
	///
	/// let mut floats = arr1(&[5f64, 4.0, 1.0, 3.0, 2.0]);
	/// floats.sort_sequential_by(|a, b| a.partial_cmp(b).unwrap());
	/// assert_eq!(floats, arr1(&[1.0, 2.0, 3.0, 4.0, 5.0]));
	/// ```
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_mergesort::{MergeSort1Ext, ndarray::arr1};
	///
	/// let mut v = arr1(&[5, 4, 1, 3, 2]);
	/// v.sort_sequential_by(|a, b| a.cmp(b));
	/// assert!(v == arr1(&[1, 2, 3, 4, 5]));
	///
	/// // reverse sorting
	/// v.sort_sequential_by(|a, b| b.cmp(a));
	/// assert!(v == arr1(&[5, 4, 3, 2, 1]));
	/// ```
	fn sort_sequential_by<F>(&mut self, compare: F)
	where
		A: Clone,
		F: FnMut(&A, &A) -> Ordering,
		S: DataMut;
	/// Sorts the array sequentially with a key extraction function.
	///
	/// This sort is stable (i.e., does not reorder equal elements) and *O*(*mn* log *n*)
	/// worst-case, where the key function is *O*(*m*).
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_mergesort::{MergeSort1Ext, ndarray::arr1};
	///
	/// let mut v = arr1(&[-5i32, 4, 1, -3, 2]);
	///
	/// v.sort_sequential_by_key(|k| k.abs());
	/// assert!(v == arr1(&[1, 2, -3, 4, -5]));
	/// ```
	fn sort_sequential_by_key<K, F>(&mut self, f: F)
	where
		A: Clone,
		K: Ord,
		F: FnMut(&A) -> K,
		S: DataMut;

	/// Sorts the array in parallel.
	///
	/// This sort is stable (i.e., does not reorder equal elements) and *O*(*n* log *n*) worst-case.
	/// The output is identical to the one of [`sort_sequential`](MergeSort1Ext::sort_sequential).
	///
	/// It runs on the current Rayon pool, which is the global one sized to the number of logical
	/// cores unless called from within [`SortPool::install`]. See [`SortPool`] for sorting on an
	/// explicit pool with custom [`Cutoffs`].
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_mergesort::{MergeSort1Ext, ndarray::arr1};
	///
	/// let mut v = arr1(&[-5, 4, 1, -3, 2]);
	///
	/// v.sort_parallel();
	/// assert!(v == arr1(&[-5, -3, 1, 2, 4]));
	/// ```
	#[cfg(feature = "rayon")]
	fn sort_parallel(&mut self)
	where
		A: Ord + Clone + Send,
		S: DataMut;
	/// Sorts the array in parallel with a comparator function.
	///
	/// This sort is stable (i.e., does not reorder equal elements) and *O*(*n* log *n*) worst-case.
	///
	/// The comparator function must define a total ordering for the elements in the array. If
	/// the ordering is not total, the order of the elements is unspecified but the array remains a
	/// permutation of its elements.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_mergesort::{MergeSort1Ext, ndarray::arr1};
	///
	/// let mut v = arr1(&[5, 4, 1, 3, 2]);
	/// v.sort_parallel_by(|a, b| a.cmp(b));
	/// assert!(v == arr1(&[1, 2, 3, 4, 5]));
	///
	/// // reverse sorting
	/// v.sort_parallel_by(|a, b| b.cmp(a));
	/// assert!(v == arr1(&[5, 4, 3, 2, 1]));
	/// ```
	#[cfg(feature = "rayon")]
	fn sort_parallel_by<F>(&mut self, compare: F)
	where
		A: Clone + Send,
		F: Fn(&A, &A) -> Ordering + Sync,
		S: DataMut;
	/// Sorts the array in parallel with a key extraction function.
	///
	/// This sort is stable (i.e., does not reorder equal elements) and *O*(*mn* log *n*)
	/// worst-case, where the key function is *O*(*m*).
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_mergesort::{MergeSort1Ext, ndarray::arr1};
	///
	/// let mut v = arr1(&[-5i32, 4, 1, -3, 2]);
	///
	/// v.sort_parallel_by_key(|k| k.abs());
	/// assert!(v == arr1(&[1, 2, -3, 4, -5]));
	/// ```
	#[cfg(feature = "rayon")]
	fn sort_parallel_by_key<K, F>(&mut self, f: F)
	where
		A: Clone + Send,
		K: Ord,
		F: Fn(&A) -> K + Sync,
		S: DataMut;
}

impl<A, S> MergeSort1Ext<A, S> for ArrayBase<S, Ix1>
where
	S: Data<Elem = A>,
{
	#[inline]
	fn sort_sequential(&mut self)
	where
		A: Ord + Clone,
		S: DataMut,
	{
		debug!(len = self.len(), "sequential merge sort");
		merge_sort(self.view_mut(), &mut A::lt, Cutoffs::DEFAULT.insertion());
	}
	#[inline]
	fn sort_sequential_by<F>(&mut self, mut compare: F)
	where
		A: Clone,
		F: FnMut(&A, &A) -> Ordering,
		S: DataMut,
	{
		debug!(len = self.len(), "sequential merge sort");
		merge_sort(
			self.view_mut(),
			&mut |a: &A, b: &A| compare(a, b) == Less,
			Cutoffs::DEFAULT.insertion(),
		);
	}
	#[inline]
	fn sort_sequential_by_key<K, F>(&mut self, mut f: F)
	where
		A: Clone,
		K: Ord,
		F: FnMut(&A) -> K,
		S: DataMut,
	{
		debug!(len = self.len(), "sequential merge sort");
		merge_sort(
			self.view_mut(),
			&mut |a: &A, b: &A| f(a).lt(&f(b)),
			Cutoffs::DEFAULT.insertion(),
		);
	}

	#[cfg(feature = "rayon")]
	#[inline]
	fn sort_parallel(&mut self)
	where
		A: Ord + Clone + Send,
		S: DataMut,
	{
		debug!(len = self.len(), "parallel merge sort");
		par_merge_sort(self.view_mut(), A::lt, Cutoffs::DEFAULT);
	}
	#[cfg(feature = "rayon")]
	#[inline]
	fn sort_parallel_by<F>(&mut self, compare: F)
	where
		A: Clone + Send,
		F: Fn(&A, &A) -> Ordering + Sync,
		S: DataMut,
	{
		debug!(len = self.len(), "parallel merge sort");
		par_merge_sort(
			self.view_mut(),
			|a: &A, b: &A| compare(a, b) == Less,
			Cutoffs::DEFAULT,
		);
	}
	#[cfg(feature = "rayon")]
	#[inline]
	fn sort_parallel_by_key<K, F>(&mut self, f: F)
	where
		A: Clone + Send,
		K: Ord,
		F: Fn(&A) -> K + Sync,
		S: DataMut,
	{
		debug!(len = self.len(), "parallel merge sort");
		par_merge_sort(
			self.view_mut(),
			|a: &A, b: &A| f(a).lt(&f(b)),
			Cutoffs::DEFAULT,
		);
	}
}

#[cfg(feature = "rayon")]
#[cfg(test)]
mod test {
	use super::{Cutoffs, MergeSort1Ext, SortPool};
	use ndarray::{Array1, arr1};
	use quickcheck_macros::quickcheck;
	use rand::{Rng, SeedableRng, rngs::StdRng};
	use std::time::Instant;

	#[derive(Debug, Clone, PartialEq, Eq)]
	struct Tagged {
		word: String,
		tag: usize,
	}

	#[derive(Debug, Clone, PartialEq, Eq)]
	struct Record {
		name: &'static str,
		count: i32,
	}

	fn records(items: &[(&'static str, i32)]) -> Array1<Record> {
		items
			.iter()
			.map(|&(name, count)| Record { name, count })
			.collect()
	}

	fn random(len: usize, seed: u64) -> Vec<i32> {
		let mut rng = StdRng::seed_from_u64(seed);
		(0..len).map(|_| rng.random()).collect()
	}

	fn both(xs: Vec<i32>) -> (Array1<i32>, Array1<i32>) {
		let mut sequential = Array1::from_vec(xs.clone());
		let mut parallel = Array1::from_vec(xs);
		sequential.sort_sequential();
		parallel.sort_parallel();
		(sequential, parallel)
	}

	#[test]
	fn integers() {
		let (sequential, parallel) = both(vec![5, 1, 9, 2, 9, 3]);
		assert_eq!(sequential, arr1(&[1, 2, 3, 5, 9, 9]));
		assert_eq!(parallel, arr1(&[1, 2, 3, 5, 9, 9]));
	}

	#[test]
	fn strings() {
		let input = ["z", "aa", "b", "aa", "m"]
			.into_iter()
			.enumerate()
			.map(|(tag, word)| Tagged {
				word: word.to_owned(),
				tag,
			})
			.collect::<Array1<_>>();
		let mut sequential = input.clone();
		let mut parallel = input;
		sequential.sort_sequential_by(|a, b| a.word.cmp(&b.word));
		parallel.sort_parallel_by(|a, b| a.word.cmp(&b.word));
		let sorted = sequential
			.iter()
			.map(|item| (item.word.as_str(), item.tag))
			.collect::<Vec<_>>();
		assert_eq!(sorted, [("aa", 1), ("aa", 3), ("b", 2), ("m", 4), ("z", 0)]);
		assert_eq!(sequential, parallel);
	}

	#[test]
	fn records_by_count() {
		let input = records(&[("A", 2), ("B", 1), ("C", 2), ("D", 1), ("E", 3)]);
		let expected = records(&[("B", 1), ("D", 1), ("A", 2), ("C", 2), ("E", 3)]);
		let mut sequential = input.clone();
		let mut parallel = input;
		sequential.sort_sequential_by_key(|record| record.count);
		parallel.sort_parallel_by_key(|record| record.count);
		assert_eq!(sequential, expected);
		assert_eq!(parallel, expected);
	}

	#[test]
	fn empty_and_single() {
		let mut empty = Array1::<i32>::from_vec(Vec::new());
		empty.sort_sequential();
		empty.sort_parallel();
		assert!(empty.is_empty());
		let mut single = arr1(&[42]);
		single.sort_sequential();
		single.sort_parallel();
		assert_eq!(single, arr1(&[42]));
	}

	#[cfg_attr(miri, ignore)]
	#[test]
	fn cutoff_boundaries() {
		let (insertion, parallel) = (Cutoffs::DEFAULT.insertion(), Cutoffs::DEFAULT.parallel());
		for len in [insertion - 1, insertion, insertion + 1, parallel - 1, parallel, parallel + 1] {
			let xs = random(len, len as u64);
			let mut expected = xs.clone();
			expected.sort();
			let (sequential, parallel) = both(xs);
			assert_eq!(sequential.to_vec(), expected, "len {len}");
			assert_eq!(parallel.to_vec(), expected, "len {len}");
		}
	}

	#[cfg_attr(miri, ignore)]
	#[test]
	fn idempotent() {
		let (sequential, parallel) = both(random(60_000, 3));
		let (again, _) = both(sequential.to_vec());
		let (_, par_again) = both(parallel.to_vec());
		assert_eq!(again, sequential);
		assert_eq!(par_again, parallel);
	}

	#[cfg_attr(miri, ignore)]
	#[quickcheck]
	fn equivalent(xs: Vec<(u8, u32)>) -> bool {
		let mut sequential = Array1::from_vec(xs.clone());
		let mut parallel = Array1::from_vec(xs.clone());
		let pool = SortPool::new(2)
			.unwrap()
			.with_cutoffs(Cutoffs::new(1, 2).unwrap());
		let mut pooled = Array1::from_vec(xs.clone());
		sequential.sort_sequential_by_key(|&(key, _)| key);
		parallel.sort_parallel_by_key(|&(key, _)| key);
		pool.sort_by_key(&mut pooled, |&(key, _)| key);
		let mut expected = xs;
		expected.sort_by_key(|&(key, _)| key);
		sequential.to_vec() == expected && parallel == sequential && pooled == sequential
	}

	#[cfg_attr(miri, ignore)]
	#[test]
	fn million_random() {
		let xs = random(1_000_000, 42);
		let mut expected = xs.clone();
		expected.sort();
		let (sequential, parallel) = both(xs);
		assert_eq!(sequential, parallel);
		assert_eq!(parallel.to_vec(), expected);
	}

	#[test]
	#[ignore = "timing-sensitive, run on an idle multi-core host"]
	fn parallel_not_slower() {
		let mut sequential = Array1::from_vec(random(1_000_000, 42));
		let mut parallel = sequential.clone();
		let start = Instant::now();
		sequential.sort_sequential();
		let sequential_time = start.elapsed();
		let start = Instant::now();
		parallel.sort_parallel();
		let parallel_time = start.elapsed();
		assert_eq!(sequential, parallel);
		if rayon::current_num_threads() > 1 {
			assert!(
				parallel_time <= sequential_time * 3 / 2,
				"parallel {parallel_time:?} vs sequential {sequential_time:?}"
			);
		}
	}
}
