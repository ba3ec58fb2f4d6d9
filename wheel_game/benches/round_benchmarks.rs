use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::time::Duration;
use wheel_game::{
    GameConfig, Intent, RoundState,
    entities::{GuessedLetters, Letter, WheelSector},
    functional::{is_fully_revealed, mask_phrase},
    reduce,
    session::Match,
    wheel::RandomWheel,
};

const LONG_PHRASE: &str = "QUEM RI POR ULTIMO RI MELHOR E QUEM CANTA SEUS MALES ESPANTA";

/// Benchmark one spin-and-guess turn through the in-place state machine
fn bench_guess_turn(c: &mut Criterion) {
    let config = GameConfig::default();
    let letter = Letter::new('A').unwrap();

    c.bench_function("guess_turn", |b| {
        b.iter(|| {
            let mut state = RoundState::from(&config);
            state.apply(Intent::RequestSpin);
            state.apply(Intent::ResolveSpin(WheelSector::points(500)));
            state.apply(Intent::GuessLetter(letter));
            state
        });
    });
}

/// Benchmark the pure reducer, which clones the state per transition
fn bench_reduce(c: &mut Criterion) {
    let state = RoundState::from(&GameConfig::default());

    c.bench_function("reduce_request_spin", |b| {
        b.iter(|| reduce(&state, Intent::RequestSpin));
    });
}

/// Benchmark board rendering and solve detection at different reveal levels
fn bench_board(c: &mut Criterion) {
    let mut group = c.benchmark_group("board");
    for revealed in [0usize, 8, 26] {
        let guessed: GuessedLetters = ('A'..='Z').take(revealed).filter_map(Letter::new).collect();
        group.bench_with_input(BenchmarkId::new("mask", revealed), &guessed, |b, guessed| {
            b.iter(|| mask_phrase(LONG_PHRASE, guessed));
        });
        group.bench_with_input(BenchmarkId::new("solved", revealed), &guessed, |b, guessed| {
            b.iter(|| is_fully_revealed(LONG_PHRASE, guessed));
        });
    }
    group.finish();
}

/// Benchmark a full match with random spins until its timers go idle
fn bench_match_rounds(c: &mut Criterion) {
    let config = GameConfig::default();
    let letters: Vec<Letter> = "AEIOULMRS".chars().filter_map(Letter::new).collect();

    c.bench_function("match_ten_spins", |b| {
        b.iter(|| {
            let mut game = Match::new(&config, RandomWheel::seeded(11));
            for letter in letters.iter().cycle().take(10) {
                game.dispatch(Intent::RequestSpin);
                game.advance_time(Duration::from_secs(4));
                game.dispatch(Intent::GuessLetter(*letter));
                game.run_until_idle();
            }
            game
        });
    });
}

criterion_group!(
    benches,
    bench_guess_turn,
    bench_reduce,
    bench_board,
    bench_match_rounds
);
criterion_main!(benches);
