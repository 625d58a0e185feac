//! Benchmarks for qsyc unitary dispatch
//!
//! Run with: cargo bench -p qsyc-compile

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

use qsyc_compile::UnitaryCompiler;
use qsyc_ir::{Circuit, GridQubit, StandardGate, Unitary};

/// Seeded random two-qubit unitary from Euler layers and CZ entanglers.
fn random_two_qubit(seed: u64) -> Unitary {
    let mut rng = StdRng::seed_from_u64(seed);
    let (a, b) = (GridQubit::new(0, 0), GridQubit::new(0, 1));
    let mut circuit = Circuit::new();
    for _ in 0..3 {
        for q in [a, b] {
            circuit
                .rz(rng.gen_range(-PI..PI), q)
                .unwrap()
                .gate(StandardGate::Ry(rng.gen_range(0.0..PI)), [q])
                .unwrap()
                .rz(rng.gen_range(-PI..PI), q)
                .unwrap();
        }
        circuit.cz(a, b).unwrap();
    }
    circuit.unitary(&[a, b]).unwrap()
}

/// Benchmark the special-case branches
fn bench_special_cases(c: &mut Criterion) {
    let mut group = c.benchmark_group("special_cases");
    let compiler = UnitaryCompiler::new();

    let one = GridQubit::line(1);
    let three = GridQubit::line(3);
    let cases = [
        ("identity", one.clone(), Unitary::identity(1)),
        ("t", one, StandardGate::T.matrix()),
        ("toffoli", three.clone(), StandardGate::CCX.matrix()),
        ("fredkin", three, StandardGate::CSwap.matrix()),
    ];

    for (name, qubits, matrix) in &cases {
        group.bench_with_input(BenchmarkId::new("compile", name), matrix, |b, m| {
            b.iter(|| compiler.compile(black_box(qubits), black_box(m)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark the generic path on random matrices
fn bench_generic(c: &mut Criterion) {
    let mut group = c.benchmark_group("generic");
    let compiler = UnitaryCompiler::new();

    let h = StandardGate::H.matrix();
    let one = GridQubit::line(1);
    group.bench_function("single_qubit", |b| {
        b.iter(|| compiler.compile(black_box(&one), black_box(&h)).unwrap());
    });

    let two = GridQubit::line(2);
    for seed in [1u64, 2, 3] {
        let u = random_two_qubit(seed);
        group.bench_with_input(BenchmarkId::new("two_qubit", seed), &u, |b, u| {
            b.iter(|| compiler.compile(black_box(&two), black_box(u)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_special_cases, bench_generic);
criterion_main!(benches);
