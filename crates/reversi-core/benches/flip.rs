use criterion::{Criterion, criterion_group, criterion_main};
use reversi_core::flip;
use reversi_core::square::Square;
use std::hint::black_box;

fn bench_flip_opening(c: &mut Criterion) {
    let p = Square::D5.bitboard() | Square::E4.bitboard();
    let o = Square::D4.bitboard() | Square::E5.bitboard();

    c.bench_function("flip_opening", |b| {
        b.iter(|| flip::flip(black_box(Square::C4), black_box(p.into()), black_box(o.into())))
    });
}

fn bench_count_flips(c: &mut Criterion) {
    let p = Square::D5.bitboard() | Square::E4.bitboard();
    let o = Square::D4.bitboard() | Square::E5.bitboard();

    c.bench_function("flip_count_flips", |b| {
        b.iter(|| {
            flip::count_flips(black_box(Square::C4), black_box(p.into()), black_box(o.into()))
        })
    });
}

criterion_group!(benches, bench_flip_opening, bench_count_flips);
criterion_main!(benches);
