use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use wordnook_core::{Crossword, catalog};

fn bench_index(c: &mut Criterion) {
    let puzzle = catalog::crossword().expect("bundled crossword must load");
    let coords: Vec<_> = puzzle.grid().iter_coords().collect();

    c.bench_function("crossword_build", |b| {
        b.iter(|| black_box(catalog::crossword()))
    });

    c.bench_function("clues_at_table", |b| {
        b.iter(|| {
            for &pos in &coords {
                black_box(puzzle.clues_at(black_box(pos)));
            }
        })
    });

    c.bench_function("find_clues_scan", |b| {
        b.iter(|| {
            for &pos in &coords {
                black_box(Crossword::find_clues(&puzzle, black_box(pos)));
            }
        })
    });
}

criterion_group!(benches, bench_index);
criterion_main!(benches);
