use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use gridgames_core::*;

fn bench_reversi_legal_moves(c: &mut Criterion) {
    let engine = PlayEngine::new(Reversi, (8, 8), Player::Black).unwrap();
    c.bench_function("reversi_legal_moves_opening", |b| {
        b.iter(|| black_box(&engine).legal_moves())
    });
}

fn bench_gomoku_game(c: &mut Criterion) {
    let moves: Vec<Coord2> = (0..5).flat_map(|col| [(7, col), (8, col)]).collect();
    c.bench_function("gomoku_nine_moves", |b| {
        b.iter(|| {
            let mut engine = PlayEngine::new(ConnectN::new(5), (15, 15), Player::Black).unwrap();
            for &coords in &moves {
                if engine.submit_move(black_box(coords)).is_err() {
                    break;
                }
            }
            engine.state()
        })
    });
}

fn bench_puzzle_shuffle(c: &mut Criterion) {
    let mut group = c.benchmark_group("puzzle_shuffle");
    for side in [3, 4, 6] {
        let mut shuffler = PuzzleShuffler::new(0xBAD5EED);
        group.bench_function(format!("{side}x{side}"), |b| {
            b.iter(|| shuffler.shuffle(black_box((side, side))))
        });
    }
    group.finish();
}

fn bench_minesweeper_first_reveal(c: &mut Criterion) {
    let mut seed = 0;
    c.bench_function("minesweeper_hard_first_reveal", |b| {
        b.iter(|| {
            seed += 1;
            let difficulty = Difficulty::Hard;
            let mut engine =
                PlayEngine::new(Minesweeper::new(difficulty.mines(), seed), difficulty.size(), Player::Black).unwrap();
            engine.submit_move(black_box((8, 15)))
        })
    });
}

criterion_group!(
    benches,
    bench_reversi_legal_moves,
    bench_gomoku_game,
    bench_puzzle_shuffle,
    bench_minesweeper_first_reveal
);
criterion_main!(benches);
