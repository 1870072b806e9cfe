use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sweeper_core::*;

fn bench_first_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_reveal");
    for (name, config) in [
        ("beginner", GameConfig::beginner()),
        ("intermediate", GameConfig::intermediate()),
        ("expert", GameConfig::expert()),
    ] {
        let center = (config.size.0 / 2, config.size.1 / 2);
        let mut seed = 0;
        group.bench_function(name, |b| {
            b.iter_batched(
                || {
                    seed += 1;
                    GameSession::new(config, seed).unwrap()
                },
                |mut session| black_box(session.reveal(center).unwrap()),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_flood_reveal(c: &mut Criterion) {
    // a single mine in the corner makes the whole board one region
    c.bench_function("flood_reveal_max_board", |b| {
        b.iter_batched(
            || GameSession::with_mine_layout((Coord::MAX, Coord::MAX), &[(0, 0)]).unwrap(),
            |mut session| black_box(session.reveal((Coord::MAX - 1, Coord::MAX - 1)).unwrap()),
            BatchSize::LargeInput,
        )
    });
}

fn bench_mine_placement(c: &mut Criterion) {
    c.bench_function("place_dense_expert", |b| {
        let mut seed = 0;
        b.iter_batched(
            || Board::new(30, 16).unwrap(),
            |mut board| {
                seed += 1;
                let mut placer = RandomMinePlacer::from_seed(seed);
                black_box(placer.place(&mut board, 471, Some((15, 8))))
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_first_reveal,
    bench_flood_reveal,
    bench_mine_placement
);
criterion_main!(benches);
