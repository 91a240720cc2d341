//! # Velocity Control Benchmark

use criterion::{criterion_group, criterion_main, Criterion};

use metro_lib::{
    sim_client::{SimParams, SimVehicle},
    velo_ctrl::{InputData, Params, VeloCtrl},
};
use util::module::State;

fn velo_ctrl_benchmark(c: &mut Criterion) {
    // ---- Build the bench vehicle and controller ----

    let mut sim = SimVehicle::new(SimParams {
        num_suspensions: 32,
        ..Default::default()
    })
    .unwrap();
    let eqpt = sim.equipment();

    let mut velo_ctrl = VeloCtrl::new(
        Params::default(),
        eqpt.thrusters,
        eqpt.suspensions,
        eqpt.cockpits,
    )
    .unwrap();

    let none = InputData::default();
    let cmds = [
        InputData { target_velocity_ms: Some(100) },
        InputData { target_velocity_ms: Some(55) },
        InputData { target_velocity_ms: Some(10) },
    ];

    // Bench the cycle on which a command arrives
    c.bench_function("VeloCtrl::proc::command", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % cmds.len();
            velo_ctrl.proc(&cmds[i]).unwrap()
        })
    });

    // Bench a ten cycle window, one tick and nine idle polls, with the vehicle moving
    velo_ctrl.proc(&cmds[0]).unwrap();
    c.bench_function("VeloCtrl::proc::tick_window", |b| {
        b.iter(|| {
            for _ in 0..10 {
                velo_ctrl.proc(&none).unwrap();
                sim.step(1.0 / 60.0);
            }
        })
    });
}

criterion_group!(benches, velo_ctrl_benchmark);
criterion_main!(benches);
