//! Derivative work of [`core::slice::sort`] licensed under `MIT OR Apache-2.0`.
//!
//! [`core::slice::sort`]: https://doc.rust-lang.org/src/core/slice/sort.rs.html

use ndarray::{ArrayViewMut1, s};

/// Sorts a slice using insertion sort, which is *O*(*n*^2) worst-case.
///
/// This sort is stable as elements are only shifted past strictly greater ones.
pub fn insertion_sort<T, F>(mut v: ArrayViewMut1<'_, T>, is_less: &mut F)
where
	F: FnMut(&T, &T) -> bool,
{
	for i in 1..v.len() {
		shift_tail(v.slice_mut(s![..i + 1]), is_less);
	}
}

/// Shifts the last element to the left until it encounters a smaller or equal element.
fn shift_tail<T, F>(mut v: ArrayViewMut1<'_, T>, is_less: &mut F)
where
	F: FnMut(&T, &T) -> bool,
{
	let mut i = v.len();
	// Move the hole one place to the left as long as the element preceding it is greater.
	while i >= 2 && is_less(&v[i - 1], &v[i - 2]) {
		v.swap(i - 1, i - 2);
		i -= 1;
	}
}
