//! Sorts a few small arrays with both engines, then times them on a large random array.
//!
//! ```sh
//! RUST_LOG=debug cargo run --release --example speedup -- 2000000
//! ```

use ndarray::{Array1, ArrayView1, s};
use ndarray_mergesort::MergeSort1Ext;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::{fmt, time::Instant};

/// Example record sorted by its count.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Item {
	name: &'static str,
	count: i32,
}

impl fmt::Display for Item {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}({})", self.name, self.count)
	}
}

fn main() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
		)
		.try_init();

	let len = std::env::args()
		.nth(1)
		.and_then(|arg| arg.replace('_', "").parse().ok())
		.unwrap_or(2_000_000);

	integers();
	strings();
	items();
	large(len);
}

fn integers() {
	let mut sequential = Array1::from_vec(vec![5, 1, 9, 2, 9, 3]);
	let mut parallel = sequential.clone();
	sequential.sort_sequential();
	parallel.sort_parallel();
	println!("Integer seq : {sequential}");
	println!("Integer par : {parallel}");
	println!();
}

fn strings() {
	let mut sequential = Array1::from_vec(vec!["z", "aa", "b", "aa", "m"]);
	let mut parallel = sequential.clone();
	sequential.sort_sequential();
	parallel.sort_parallel();
	println!("String  seq : {sequential}");
	println!("String  par : {parallel}");
	println!();
}

fn items() {
	let mut sequential = Array1::from_vec(vec![
		Item { name: "A", count: 2 },
		Item { name: "B", count: 1 },
		Item { name: "C", count: 2 },
		Item { name: "D", count: 1 },
		Item { name: "E", count: 3 },
	]);
	let mut parallel = sequential.clone();
	sequential.sort_sequential_by_key(|item| item.count);
	parallel.sort_parallel_by_key(|item| item.count);
	println!("Items   seq : {}", join(sequential.view()));
	println!("Items   par : {}", join(parallel.view()));
	println!();
}

fn large(len: usize) {
	println!("=== Random integers, N = {len} ===");
	let mut rng = StdRng::seed_from_u64(42);
	let mut sequential = (0..len).map(|_| rng.random::<i32>()).collect::<Array1<_>>();
	let mut parallel = sequential.clone();

	let start = Instant::now();
	sequential.sort_sequential();
	let sequential_time = start.elapsed();

	let start = Instant::now();
	parallel.sort_parallel();
	let parallel_time = start.elapsed();

	println!("Time seq    : {} ms", sequential_time.as_millis());
	println!("Time par    : {} ms", parallel_time.as_millis());
	let speedup = if parallel_time.is_zero() {
		0.0
	} else {
		sequential_time.as_secs_f64() / parallel_time.as_secs_f64()
	};
	println!("Speedup     : {speedup:.2}x");
	println!(
		"Parallel sort ran on {} worker threads.",
		rayon::current_num_threads()
	);
	println!("Seq first/last: {}", head_tail(sequential.view(), 10));
	println!("Par first/last: {}", head_tail(parallel.view(), 10));
	println!("Equal       : {}", sequential == parallel);
	println!();
}

fn join<T: fmt::Display>(v: ArrayView1<'_, T>) -> String {
	let items = v.iter().map(ToString::to_string).collect::<Vec<_>>();
	format!("[{}]", items.join(", "))
}

fn head_tail(v: ArrayView1<'_, i32>, k: usize) -> String {
	let len = v.len();
	let head = v.slice(s![..k.min(len)]);
	let tail = v.slice(s![len.saturating_sub(k)..]);
	format!("{} ... {}", join(head), join(tail))
}
