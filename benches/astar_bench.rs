use criterion::{criterion_group, criterion_main, Criterion};
use grid_astar::generate::{random_endpoints, random_grid, GenerateConfig};
use grid_astar::AStar;
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

fn random_bench(c: &mut Criterion) {
    for (size, density) in [(64, 0.2), (128, 0.3), (256, 0.25)] {
        let mut rng = StdRng::seed_from_u64(0);
        let config = GenerateConfig {
            width: size,
            height: size,
            obstacle_density: density,
            min_distance: size as u32 / 2,
            ..GenerateConfig::default()
        };
        let grid = random_grid(&config, &mut rng).unwrap();
        let scenarios = (0..100)
            .map(|_| random_endpoints(&grid, &config, &mut rng).unwrap())
            .collect::<Vec<_>>();
        let mut astar = AStar::new();
        c.bench_function(format!("random {size}x{size}, density {density}").as_str(), |b| {
            b.iter(|| {
                for (start, end) in &scenarios {
                    let _ = black_box(astar.find_path(&grid, *start, *end));
                }
            })
        });
    }
}

criterion_group!(benches, random_bench);
criterion_main!(benches);
