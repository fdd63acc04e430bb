//! Top-down merge sort shared by the sequential and the parallel entry points.

use crate::insertion_sort::insertion_sort;
use alloc::vec::Vec;
use core::mem;
use ndarray::{ArrayViewMut1, Axis, Zip};

/// Sorts `v` using top-down merge sort.
///
/// The algorithm is stable, allocates memory, and *O*(*n* \* log(*n*)) worst-case. Two temporary
/// buffers of the same length as `v` are allocated: a working copy of `v` and an auxiliary buffer
/// used while merging. Elements are cloned into the working copy and moved back into `v` only once
/// the working copy is completely sorted. Hence, if `is_less` panics, `v` is left untouched.
///
/// Ranges of up to `max_insertion` elements get sorted using insertion sort.
pub fn merge_sort<T, F>(v: ArrayViewMut1<'_, T>, is_less: &mut F, max_insertion: usize)
where
	T: Clone,
	F: FnMut(&T, &T) -> bool,
{
	if v.len() < 2 {
		return;
	}

	let (mut work, mut buf) = working_copy(&v);
	recurse(
		ArrayViewMut1::from(&mut work[..]),
		ArrayViewMut1::from(&mut buf[..]),
		is_less,
		max_insertion,
	);
	copy_back(v, work);
}

/// Clones `v` into a working copy and the working copy into an auxiliary buffer.
pub(crate) fn working_copy<T: Clone>(v: &ArrayViewMut1<'_, T>) -> (Vec<T>, Vec<T>) {
	let work = v.iter().cloned().collect::<Vec<T>>();
	let buf = work.clone();
	(work, buf)
}

/// Moves the sorted working copy into `v`.
pub(crate) fn copy_back<T>(mut v: ArrayViewMut1<'_, T>, work: Vec<T>) {
	debug_assert_eq!(v.len(), work.len());
	for (dst, src) in v.iter_mut().zip(work) {
		*dst = src;
	}
}

/// Returns the length of the left half when splitting a range of length `len`.
///
/// The left half receives the middle element of an odd range.
#[inline]
pub(crate) const fn split_point(len: usize) -> usize {
	len - len / 2
}

/// Sorts `v` recursively using `buf` of the same length as scratch memory.
pub(crate) fn recurse<T, F>(
	mut v: ArrayViewMut1<'_, T>,
	mut buf: ArrayViewMut1<'_, T>,
	is_less: &mut F,
	max_insertion: usize,
) where
	F: FnMut(&T, &T) -> bool,
{
	let len = v.len();
	debug_assert_eq!(len, buf.len());

	if len <= max_insertion || len < 2 {
		insertion_sort(v, is_less);
		return;
	}

	let mid = split_point(len);
	{
		let (left, right) = v.view_mut().split_at(Axis(0), mid);
		let (buf_left, buf_right) = buf.view_mut().split_at(Axis(0), mid);
		recurse(left, buf_left, is_less, max_insertion);
		recurse(right, buf_right, is_less, max_insertion);
	}

	// Both halves are already in order.
	if !is_less(&v[mid], &v[mid - 1]) {
		return;
	}
	merge(v, buf, mid, is_less);
}

/// Merges non-decreasing runs `v[..mid]` and `v[mid..]` using `buf` as temporary storage, and
/// stores the result into `v[..]`.
///
/// Both runs are first moved into `buf` by swapping them with its stale contents. Then two cursors
/// trace the runs forwards, moving the lesser of their next unconsumed elements back into `v`. If
/// equal, the left run is preferred to maintain stability. No element is cloned.
pub(crate) fn merge<T, F>(
	mut v: ArrayViewMut1<'_, T>,
	mut buf: ArrayViewMut1<'_, T>,
	mid: usize,
	is_less: &mut F,
) where
	F: FnMut(&T, &T) -> bool,
{
	let len = v.len();
	debug_assert!(0 < mid && mid < len && len == buf.len());

	Zip::from(v.view_mut())
		.and(buf.view_mut())
		.for_each(|a, b| mem::swap(a, b));

	let mut left = 0;
	let mut right = mid;
	for out in 0..len {
		let src = if left == mid {
			&mut right
		} else if right == len || !is_less(&buf[right], &buf[left]) {
			&mut left
		} else {
			&mut right
		};
		// The slot in `buf` is consumed, so it may receive the stale element of `v`.
		mem::swap(&mut v[out], &mut buf[*src]);
		*src += 1;
	}
}
