use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glimmer_core::world::World;
use glimmer_data::Mutability;

fn classic_world(seed: u64) -> World {
    let mut world = World::with_seed(seed);
    world.set_size(51, 51).unwrap();
    world.set_mutability(Mutability::all());
    world.assign_food(10);
    world.assign_agents(200, 0.5, 0.5, 1.0, 0.5).unwrap();
    world
}

fn bench_sweep(c: &mut Criterion) {
    let mut world = classic_world(1);

    c.bench_function("sweep_200_agents", |b| {
        b.iter(|| {
            world.sweep();
            black_box(world.agents().len())
        })
    });
}

fn bench_sweep_all_lit(c: &mut Criterion) {
    let mut world = World::with_seed(2);
    world.set_size(51, 51).unwrap();
    world.assign_food(10);
    world.assign_agents(200, 1.0, 0.0, 1.0, 1.0).unwrap();
    for _ in 0..10 {
        world.sweep();
    }

    c.bench_function("sweep_200_agents_bright", |b| {
        b.iter(|| {
            world.sweep();
            black_box(world.agents().len())
        })
    });
}

fn bench_regenerate(c: &mut Criterion) {
    let mut world = classic_world(3);
    for _ in 0..100 {
        world.sweep();
    }

    c.bench_function("regenerate_200_agents", |b| {
        b.iter(|| {
            world.regenerate_agents(0.01).unwrap();
            black_box(world.generations())
        })
    });
}

fn bench_site_snapshot(c: &mut Criterion) {
    let world = classic_world(4);

    c.bench_function("site_snapshot_51x51", |b| {
        b.iter(|| black_box(world.site_snapshot().len()))
    });
}

criterion_group!(
    benches,
    bench_sweep,
    bench_sweep_all_lit,
    bench_regenerate,
    bench_site_snapshot
);
criterion_main!(benches);
