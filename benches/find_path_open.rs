//! Measure finding a route across an obstacle free subsection
//!
//! Subsection is 64 tiles by 64 tiles
//!

use bevy_subsection_tiles_plugin::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Path from the top left corner to the bottom right corner
fn calc(subsection: &Subsection, pathfinder: &mut Pathfinder) {
	let dest = subsection.get_tiles().len() - 1;
	pathfinder.find_path(subsection, 0, dest);
}

pub fn criterion_benchmark(c: &mut Criterion) {
	let mut group = c.benchmark_group("algorithm_use");
	group.significance_level(0.05).sample_size(100);
	let subsection = Subsection::new(GridDimensions::new(16, 64, 64));
	let mut pathfinder = Pathfinder::new(&subsection);
	group.bench_function("find_path_open", |b| {
		b.iter(|| calc(black_box(&subsection), black_box(&mut pathfinder)))
	});
	group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
