//! Benchmarks for noise evaluation, region discovery, meshing and the full
//! parallel stage.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::IVec2;
use worley_sectors::{
  build_mesh, discover_region, CellSampler, FloodFillConfig, MeshConfig, Neighborhood,
  NoiseConfig, SectorStage, SectorWorld, TopologyConfig, TopologyUtil, WorldConfig, WorleyNoise,
};

fn noise() -> WorleyNoise {
  WorleyNoise::new(NoiseConfig::new(42).with_frequency(0.01))
}

/// Evaluate a 64x64 patch of the field.
fn bench_noise(c: &mut Criterion) {
  let noise = noise();

  c.bench_function("noise::evaluate (64x64)", |b| {
    b.iter(|| {
      let mut acc = 0.0f32;
      for x in 0..64 {
        for z in 0..64 {
          acc += noise.evaluate(x as f64, z as f64).edge_factor;
        }
      }
      black_box(acc)
    })
  });
}

fn bench_flood_fill(c: &mut Criterion) {
  let noise = noise();
  let topology = TopologyUtil::new(noise, TopologyConfig::default());
  let mut group = c.benchmark_group("flood_fill::discover_region");

  for neighborhood in [Neighborhood::Skewed, Neighborhood::Moore] {
    let config = FloodFillConfig::new().with_neighborhood(neighborhood);
    group.bench_with_input(
      BenchmarkId::from_parameter(format!("{:?}", neighborhood)),
      &config,
      |b, config| b.iter(|| black_box(discover_region(&noise, &topology, IVec2::ZERO, config))),
    );
  }

  group.finish();
}

fn bench_mesh(c: &mut Criterion) {
  let world = SectorWorld::new(WorldConfig::new().with_noise(*noise().config()));
  let region = world
    .discover_region(IVec2::ZERO)
    .expect("default grouping closes the region");
  let heights = world.region_heights(&region.matrix);
  let config = MeshConfig::default();

  c.bench_function("mesh::build_mesh", |b| {
    b.iter(|| black_box(build_mesh(&region.matrix, &heights, &config)))
  });
}

/// Full chain for 16 spread-out seeds; a fresh world per iteration so cell
/// claims never conflict across iterations.
fn bench_stage(c: &mut Criterion) {
  let seeds: Vec<IVec2> = (0..16)
    .map(|i| IVec2::new((i % 4) * 400, (i / 4) * 400))
    .collect();

  c.bench_function("task_queue::tick (16 seeds)", |b| {
    b.iter(|| {
      let world = SectorWorld::new(WorldConfig::new().with_noise(*noise().config()));
      let mut stage = SectorStage::new();
      for &seed in &seeds {
        stage.enqueue(seed);
      }
      stage.tick(&world);
      black_box(stage.drain_completions())
    })
  });
}

criterion_group!(benches, bench_noise, bench_flood_fill, bench_mesh, bench_stage);
criterion_main!(benches);
