//! Parallel merge sort on Rayon's work-stealing pools.

pub mod merge_sort;
pub mod pool;
