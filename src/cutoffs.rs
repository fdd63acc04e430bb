use crate::Error;

/// Size thresholds steering the merge sort recursion.
///
/// Ranges of up to [`insertion`](Self::insertion) elements get sorted using insertion sort. In
/// parallel, ranges of at least [`parallel`](Self::parallel) elements fork both halves as
/// independent tasks whereas shorter ranges continue sequentially within the current task.
///
/// # Examples
///
/// ```
/// use ndarray_mergesort::Cutoffs;
///
/// let cutoffs = Cutoffs::default();
/// assert_eq!(cutoffs.insertion(), 24);
/// assert_eq!(cutoffs.parallel(), 50_000);
///
/// assert!(Cutoffs::new(0, 100).is_err());
/// assert!(Cutoffs::new(32, 32).is_err());
/// assert!(Cutoffs::new(8, 1_000).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cutoffs {
	insertion: usize,
	parallel: usize,
}

impl Cutoffs {
	/// Default cutoffs of `24` for insertion sort and `50_000` for forking.
	pub const DEFAULT: Self = Self {
		insertion: 24,
		parallel: 50_000,
	};

	/// Creates cutoffs.
	///
	/// # Errors
	///
	/// Returns [`Error::InvalidCutoffs`] if `insertion` is zero or `parallel` is not greater than
	/// `insertion`.
	pub fn new(insertion: usize, parallel: usize) -> Result<Self, Error> {
		if insertion == 0 || parallel <= insertion {
			return Err(Error::InvalidCutoffs {
				insertion,
				parallel,
			});
		}
		Ok(Self {
			insertion,
			parallel,
		})
	}

	/// Maximum range length sorted via insertion sort.
	#[must_use]
	#[inline]
	pub const fn insertion(&self) -> usize {
		self.insertion
	}

	/// Minimum range length whose halves are sorted as independent tasks.
	#[must_use]
	#[inline]
	pub const fn parallel(&self) -> usize {
		self.parallel
	}
}

impl Default for Cutoffs {
	#[inline]
	fn default() -> Self {
		Self::DEFAULT
	}
}

#[cfg(test)]
mod test {
	use super::Cutoffs;
	use crate::Error;

	#[test]
	fn rejected() {
		for (insertion, parallel) in [(0, 0), (0, 10), (10, 10), (10, 9)] {
			match Cutoffs::new(insertion, parallel) {
				Err(Error::InvalidCutoffs {
					insertion: i,
					parallel: p,
				}) => assert_eq!((i, p), (insertion, parallel)),
				other => panic!("unexpected {other:?}"),
			}
		}
	}

	#[test]
	fn accepted() {
		let cutoffs = Cutoffs::new(1, 2).unwrap();
		assert_eq!((cutoffs.insertion(), cutoffs.parallel()), (1, 2));
		assert_eq!(Cutoffs::default(), Cutoffs::DEFAULT);
	}
}
