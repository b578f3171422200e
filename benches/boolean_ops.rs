use criterion::{criterion_group, criterion_main, Criterion};
use num_rational::BigRational;
use rand::SeedableRng;

use polybool::algorithms::{intersect, symmetric_subtract, unite};
use polybool::data::Multipolygon;
use polybool::random_rectangles;

fn rational_operand(count: usize, cells: i64, seed: u64) -> Multipolygon<BigRational> {
  let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
  random_rectangles(count, cells, &mut rng)
    .map(|value| BigRational::from_integer(value.into()))
}

pub fn criterion_benchmark(c: &mut Criterion) {
  let small_left = rational_operand(10, 6, 1);
  let small_right = rational_operand(10, 6, 2);
  let large_left = rational_operand(100, 20, 3);
  let large_right = rational_operand(100, 20, 4);

  c.bench_function("intersect(1e1)", |b| {
    b.iter(|| intersect(&small_left, &small_right, true))
  });
  c.bench_function("unite(1e1)", |b| {
    b.iter(|| unite(&small_left, &small_right, true))
  });
  c.bench_function("intersect(1e2)", |b| {
    b.iter(|| intersect(&large_left, &large_right, true))
  });
  c.bench_function("unite(1e2)", |b| {
    b.iter(|| unite(&large_left, &large_right, true))
  });
  c.bench_function("symmetric_subtract(1e2)", |b| {
    b.iter(|| symmetric_subtract(&large_left, &large_right, true))
  });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
