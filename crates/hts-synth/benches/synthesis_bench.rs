//! Benchmarks for stabilizer synthesis
//!
//! Run with: cargo bench -p hts-synth

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use hts_ir::GateSequence;
use hts_synth::{
    Connectivity, Stabilizer, Strategy, Synthesizer, Topology, catalog, compress, get_mub_circuits,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn random_states(n: usize, count: usize) -> Vec<Stabilizer> {
    let mut rng = StdRng::seed_from_u64(n as u64);
    (0..count).map(|_| Stabilizer::random(n, &mut rng)).collect()
}

/// Benchmark exact readout on catalog topologies (tables built beforehand)
fn bench_exact(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact_readout");
    let synth = Synthesizer::new();

    for (n, name) in [(4, "linear"), (5, "T"), (6, "full"), (6, "H")] {
        if let Ok(entry) = catalog().lookup(name, n) {
            entry.distances().unwrap();
        }
        let states = random_states(n as usize, 16);
        let conn = Connectivity::from(name);
        group.bench_with_input(
            BenchmarkId::new(name, n),
            &states,
            |b, states| {
                b.iter(|| {
                    for s in states {
                        black_box(synth.readout(black_box(s), &conn).unwrap());
                    }
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the elimination engine on lines of growing length
fn bench_elimination(c: &mut Criterion) {
    let mut group = c.benchmark_group("elimination_readout");
    let synth = Synthesizer::new().with_strategy(Strategy::Elimination);

    for n in [4_u32, 6, 8, 10, 12] {
        let states = random_states(n as usize, 8);
        let conn = Connectivity::from(Topology::linear(n));
        group.bench_with_input(BenchmarkId::new("linear", n), &states, |b, states| {
            b.iter(|| {
                for s in states {
                    black_box(synth.readout(black_box(s), &conn).unwrap());
                }
            });
        });
    }

    group.finish();
}

/// Benchmark compression of a redundant circuit
fn bench_compress(c: &mut Criterion) {
    let seq = GateSequence::parse(
        5,
        "h0 cx0,1 cx1,2 cx2,3 cx3,4 s1 cx4,0 cz1,3 swap0,2 cx2,1 h3 cx3,0 cx1,4",
    )
    .unwrap();
    c.bench_function("compress_5q", |b| {
        b.iter(|| compress(black_box(&seq), "cx").unwrap());
    });
}

/// Benchmark MUB circuit generation
fn bench_mubs(c: &mut Criterion) {
    let mut group = c.benchmark_group("mub_circuits");

    for n in [3_usize, 4, 5] {
        group.bench_with_input(BenchmarkId::new("linear", n), &n, |b, &n| {
            b.iter(|| get_mub_circuits(black_box(n), "linear").unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_exact, bench_elimination, bench_compress, bench_mubs);
criterion_main!(benches);
