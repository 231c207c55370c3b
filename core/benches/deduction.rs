use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use deminer_core::*;

/// Plays proven moves only, from a zero start in the middle of the board.
fn solve_certain(board: BoardConfig, seed: u64) -> CellCount {
    let start = (board.size.0 / 2, board.size.1 / 2);
    let layout = RandomMinefieldGenerator::new(seed, start, StartTile::AlwaysZero).generate(board);
    let mut deducer = Deducer::new(board, EngineConfig::default()).unwrap();
    deducer
        .observe(start, layout.uncover(start).unwrap().unwrap())
        .unwrap();

    loop {
        deducer.deduce();
        if let Some(pos) = deducer.pop_safe() {
            let Some(percept) = layout.uncover(pos).unwrap() else {
                break;
            };
            deducer.observe(pos, percept).unwrap();
        } else if let Some(pos) = deducer.pop_mine() {
            deducer.observe(pos, Percept::Flagged).unwrap();
        } else {
            break;
        }
    }
    deducer.remaining_safe()
}

fn deduction_tiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("deduction");
    for (name, board) in [
        ("beginner", BoardConfig::beginner()),
        ("intermediate", BoardConfig::intermediate()),
        ("expert", BoardConfig::expert()),
    ] {
        group.bench_function(name, |b| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                solve_certain(black_box(board), seed)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, deduction_tiers);
criterion_main!(benches);
