use thiserror::Error;

/// Errors of fallible construction, the sorting methods themselves are infallible.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
	/// The insertion cutoff is zero or the parallel cutoff does not exceed it.
	#[error(
		"invalid cutoffs: insertion cutoff {insertion} must be positive and less than parallel cutoff {parallel}"
	)]
	InvalidCutoffs {
		/// Rejected insertion cutoff.
		insertion: usize,
		/// Rejected parallel cutoff.
		parallel: usize,
	},
	/// The worker pool could not be built.
	#[cfg(feature = "rayon")]
	#[error("failed to build worker pool: {0}")]
	PoolBuild(#[from] rayon::ThreadPoolBuildError),
}
