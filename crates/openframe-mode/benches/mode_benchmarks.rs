//! Benchmarks for the per-frame mode update.
//!
//! Run with: cargo bench --bench mode_benchmarks

use criterion::{Criterion, criterion_group, criterion_main};
use openframe_mode::{ControllerMode, ModeKind};
use openframe_socd::SocdPolicy;
use openframe_state::{InputState, LogicalButton::*};

const EXAMPLE: &str = include_str!("../../openframe-profile/tests/fixtures/remapper_example.json");

fn scripted_frames() -> Vec<InputState> {
    vec![
        InputState::new(),
        InputState::from_buttons(&[Left]),
        InputState::from_buttons(&[Left, ModX]),
        InputState::from_buttons(&[Left, Right, ModX, L]),
        InputState::from_buttons(&[Up, Right, ModX, B, CDown]),
        InputState::from_buttons(&[ModX, ModY, CUp, Midshield]),
        InputState::from_buttons(&[Down, ModY, A]),
    ]
}

fn bench_ultimate_builtin(c: &mut Criterion) {
    let frames = scripted_frames();
    let mut mode = ControllerMode::builtin_default();

    c.bench_function("ultimate_r4_builtin_update", |b| {
        b.iter(|| {
            for raw in &frames {
                std::hint::black_box(mode.update_outputs(std::hint::black_box(raw)));
            }
        });
    });
}

fn bench_ultimate_with_rules(c: &mut Criterion) {
    let frames = scripted_frames();
    let mut mode = ControllerMode::from_document_or_default(
        ModeKind::UltimateR4,
        SocdPolicy::SecondInputPriority,
        EXAMPLE,
    );

    c.bench_function("ultimate_r4_example_profile_update", |b| {
        b.iter(|| {
            for raw in &frames {
                std::hint::black_box(mode.update_outputs(std::hint::black_box(raw)));
            }
        });
    });
}

fn bench_profile_only(c: &mut Criterion) {
    let frames = scripted_frames();
    let mut mode = ControllerMode::from_document_or_default(
        ModeKind::ProfileOnly,
        SocdPolicy::SecondInputPriority,
        EXAMPLE,
    );

    c.bench_function("profile_only_update", |b| {
        b.iter(|| {
            for raw in &frames {
                std::hint::black_box(mode.update_outputs(std::hint::black_box(raw)));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_ultimate_builtin,
    bench_ultimate_with_rules,
    bench_profile_only
);
criterion_main!(benches);
