use criterion::{criterion_group, criterion_main, Criterion};

use fmrt_core::{reset_state, step, StructEvent};

fn bench_update_sequence(c: &mut Criterion) {
    c.bench_function("step/update", |b| {
        b.iter(|| {
            let mut state = reset_state();
            for i in 0..64 {
                let v = 1.0 + (i % 5) as f64;
                let event = StructEvent::Update { stimulus: [v, v, v, v], dt: 1.0 };
                let env = step(state, event);
                state = env.state;
            }
            state
        })
    });
}

fn bench_gap_heartbeat_sequence(c: &mut Criterion) {
    c.bench_function("step/gap_heartbeat", |b| {
        b.iter(|| {
            let mut state = reset_state();
            for i in 0..64 {
                let event = if i % 2 == 0 { StructEvent::Gap { dt: 1.0 } } else { StructEvent::Heartbeat { dt: 1.0 } };
                let env = step(state, event);
                state = env.state;
            }
            state
        })
    });
}

fn bench_reset(c: &mut Criterion) {
    let mut state = reset_state();
    state = step(state, StructEvent::Update { stimulus: [5.0, 5.0, 5.0, 5.0], dt: 1.0 }).state;
    c.bench_function("step/reset", |b| b.iter(|| step(state, StructEvent::Reset { dt: 0.0 })));
}

fn bench_post_collapse(c: &mut Criterion) {
    let mut state = reset_state();
    loop {
        let env = step(state, StructEvent::Update { stimulus: [10.0, 10.0, 10.0, 10.0], dt: 1.0 });
        state = env.state;
        if state.kappa == 0.0 {
            break;
        }
    }
    c.bench_function("step/post_collapse", |b| b.iter(|| step(state, StructEvent::Heartbeat { dt: 1.0 })));
}

criterion_group!(benches, bench_update_sequence, bench_gap_heartbeat_sequence, bench_reset, bench_post_collapse);
criterion_main!(benches);
