//! Explicit worker pool for parallel sorting.

use crate::{Cutoffs, Error, par::merge_sort::par_merge_sort};
use core::cmp::Ordering::{self, Less};
use ndarray::{ArrayBase, DataMut, Ix1};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

/// Pool of worker threads sorting arrays in parallel with its own [`Cutoffs`].
///
/// The parallel methods of [`MergeSort1Ext`](crate::MergeSort1Ext) run on the current Rayon pool,
/// which is the lazily initialized global one unless called from within [`install`]. A `SortPool`
/// is an explicitly created alternative whose workers are released once it is dropped.
///
/// [`install`]: Self::install
///
/// # Examples
///
/// ```
/// use ndarray_mergesort::{Cutoffs, SortPool, ndarray::arr1};
///
/// let pool = SortPool::new(2)?.with_cutoffs(Cutoffs::new(4, 16)?);
/// assert_eq!(pool.current_num_threads(), 2);
///
/// let mut v = arr1(&[5, 1, 9, 2, 9, 3]);
/// pool.sort(&mut v);
/// assert_eq!(v, arr1(&[1, 2, 3, 5, 9, 9]));
/// # Ok::<(), ndarray_mergesort::Error>(())
/// ```
#[derive(Debug)]
pub struct SortPool {
	pool: ThreadPool,
	cutoffs: Cutoffs,
}

impl SortPool {
	/// Builds a pool of `num_threads` workers with [`Cutoffs::DEFAULT`].
	///
	/// If `num_threads` is zero, the number of workers is chosen by Rayon, which defaults to the
	/// number of logical cores unless overridden by the `RAYON_NUM_THREADS` environment variable.
	///
	/// # Errors
	///
	/// Returns [`Error::PoolBuild`] if the worker threads cannot be spawned.
	pub fn new(num_threads: usize) -> Result<Self, Error> {
		let pool = ThreadPoolBuilder::new()
			.num_threads(num_threads)
			.thread_name(|index| format!("mergesort-{index}"))
			.build()?;
		debug!(threads = pool.current_num_threads(), "built sort pool");
		Ok(Self {
			pool,
			cutoffs: Cutoffs::DEFAULT,
		})
	}

	/// Replaces the cutoffs used by the sorting methods of this pool.
	#[must_use]
	pub fn with_cutoffs(mut self, cutoffs: Cutoffs) -> Self {
		self.cutoffs = cutoffs;
		self
	}

	/// Cutoffs used by the sorting methods of this pool.
	#[must_use]
	#[inline]
	pub fn cutoffs(&self) -> Cutoffs {
		self.cutoffs
	}

	/// Number of worker threads.
	#[must_use]
	#[inline]
	pub fn current_num_threads(&self) -> usize {
		self.pool.current_num_threads()
	}

	/// Executes `op` within this pool, so any parallel sort it invokes runs on these workers.
	pub fn install<OP, R>(&self, op: OP) -> R
	where
		OP: FnOnce() -> R + Send,
		R: Send,
	{
		self.pool.install(op)
	}

	/// Sorts the array in parallel on this pool.
	///
	/// This sort is stable (i.e., does not reorder equal elements) and *O*(*n* log *n*) worst-case.
	/// It blocks until the array is sorted.
	pub fn sort<A, S>(&self, v: &mut ArrayBase<S, Ix1>)
	where
		A: Ord + Clone + Send,
		S: DataMut<Elem = A>,
	{
		self.par_sort_by(v, A::lt);
	}

	/// Sorts the array in parallel on this pool with a comparator function.
	///
	/// The comparator function must define a total ordering for the elements in the array. If the
	/// ordering is not total, the order of the elements is unspecified.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_mergesort::{SortPool, ndarray::arr1};
	///
	/// let pool = SortPool::new(0)?;
	/// let mut v = arr1(&["z", "aa", "b", "aa", "m"]);
	/// pool.sort_by(&mut v, |a, b| b.cmp(a));
	/// assert_eq!(v, arr1(&["z", "m", "b", "aa", "aa"]));
	/// # Ok::<(), ndarray_mergesort::Error>(())
	/// ```
	pub fn sort_by<A, S, F>(&self, v: &mut ArrayBase<S, Ix1>, compare: F)
	where
		A: Clone + Send,
		S: DataMut<Elem = A>,
		F: Fn(&A, &A) -> Ordering + Sync,
	{
		self.par_sort_by(v, |a: &A, b: &A| compare(a, b) == Less);
	}

	/// Sorts the array in parallel on this pool with a key extraction function.
	///
	/// # Examples
	///
	/// ```
	/// use ndarray_mergesort::{SortPool, ndarray::arr1};
	///
	/// let pool = SortPool::new(0)?;
	/// let mut v = arr1(&[("A", 2), ("B", 1), ("C", 2), ("D", 1), ("E", 3)]);
	/// pool.sort_by_key(&mut v, |&(_, count)| count);
	/// assert_eq!(v, arr1(&[("B", 1), ("D", 1), ("A", 2), ("C", 2), ("E", 3)]));
	/// # Ok::<(), ndarray_mergesort::Error>(())
	/// ```
	pub fn sort_by_key<A, S, K, F>(&self, v: &mut ArrayBase<S, Ix1>, f: F)
	where
		A: Clone + Send,
		S: DataMut<Elem = A>,
		K: Ord,
		F: Fn(&A) -> K + Sync,
	{
		self.par_sort_by(v, |a: &A, b: &A| f(a).lt(&f(b)));
	}

	fn par_sort_by<A, S, F>(&self, v: &mut ArrayBase<S, Ix1>, is_less: F)
	where
		A: Clone + Send,
		S: DataMut<Elem = A>,
		F: Fn(&A, &A) -> bool + Sync,
	{
		let cutoffs = self.cutoffs;
		debug!(len = v.len(), ?cutoffs, "parallel merge sort");
		let view = v.view_mut();
		let is_less = &is_less;
		self.pool
			.install(move || par_merge_sort(view, is_less, cutoffs));
	}
}
