//! Benchmarks for the typewriter engine.
//!
//! Measures one full run to the loop limit, which exercises every transition
//! and the unit-slicing helpers for both character and word units.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use typewriter_core::engine::{advance, Advance};
use typewriter_core::types::{Progress, Speed, TypewriterOptions, Unit};

fn sample_phrases() -> Vec<String> {
    vec![
        "Welcome aboard".to_string(),
        "Type, pause, erase, repeat".to_string(),
        "Multi-byte text: añadir 日本語 🦀".to_string(),
    ]
}

fn run_to_halt(phrases: &[String], options: &TypewriterOptions) -> usize {
    let mut progress = Progress::default();
    let mut steps = 0;
    while let Advance::Schedule { next, .. } = advance(phrases, options, &progress) {
        progress = next;
        steps += 1;
    }
    steps
}

fn bench_full_run(c: &mut Criterion) {
    let phrases = sample_phrases();

    let by_char = TypewriterOptions::new(Speed::new(1, 100, 10), Speed::new(1, 50, 5))
        .with_loop_limit(3);
    c.bench_function("engine_full_run_characters", |b| {
        b.iter(|| run_to_halt(black_box(&phrases), black_box(&by_char)))
    });

    let by_word = TypewriterOptions::new(
        Speed::new(1, 100, 10).with_unit(Unit::Word),
        Speed::new(1, 50, 5).with_unit(Unit::Word),
    )
    .with_loop_limit(3);
    c.bench_function("engine_full_run_words", |b| {
        b.iter(|| run_to_halt(black_box(&phrases), black_box(&by_word)))
    });
}

criterion_group!(benches, bench_full_run);
criterion_main!(benches);
