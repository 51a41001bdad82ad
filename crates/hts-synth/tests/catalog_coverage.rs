//! Every catalog topology, with both engines, on random stabilizer states.

use hts_synth::{catalog, Connectivity, Stabilizer, Strategy, Synthesizer, TwoQubitBasis};
use rand::rngs::StdRng;
use rand::SeedableRng;

const SAMPLES_PER_ENTRY: usize = 4;

#[test]
fn catalog_has_all_entries() {
    assert_eq!(catalog().entries().len(), 21);
}

#[test]
fn preparations_respect_every_catalog_topology() {
    let mut rng = StdRng::seed_from_u64(2024);
    for entry in catalog().entries() {
        let n = entry.num_qubits() as usize;
        let conn = Connectivity::from(entry.name());
        for strategy in [Strategy::Exact, Strategy::Elimination] {
            let synth = Synthesizer::new().with_strategy(strategy);
            for _ in 0..SAMPLES_PER_ENTRY {
                let s = Stabilizer::random(n, &mut rng);
                let prep = synth.preparation(&s, &conn).unwrap();
                assert!(
                    Stabilizer::from_circuit(&prep).is_equivalent(&s),
                    "{} ({n} qubits, {strategy}): wrong state for {s}",
                    entry.name()
                );
                for (a, b) in prep.two_qubit_pairs() {
                    assert!(
                        entry.topology().has_edge(a, b),
                        "{} ({n} qubits, {strategy}): ({a}, {b}) is not an edge",
                        entry.name()
                    );
                }
            }
        }
    }
}

#[test]
fn exact_engine_never_loses_to_elimination() {
    let mut rng = StdRng::seed_from_u64(99);
    let exact = Synthesizer::new().with_strategy(Strategy::Exact);
    let elimination = Synthesizer::new().with_strategy(Strategy::Elimination);
    for entry in catalog().entries() {
        let n = entry.num_qubits() as usize;
        let conn = Connectivity::from(entry.name());
        for _ in 0..SAMPLES_PER_ENTRY {
            let s = Stabilizer::random(n, &mut rng);
            let a = exact.readout(&s, &conn).unwrap();
            let b = elimination.readout(&s, &conn).unwrap();
            assert!(
                a.two_qubit_count() <= b.two_qubit_count(),
                "{} ({n} qubits): exact {a} vs elimination {b}",
                entry.name()
            );
        }
    }
}

#[test]
fn cz_basis_uses_only_cz() {
    let mut rng = StdRng::seed_from_u64(5);
    let synth = Synthesizer::new().with_basis(TwoQubitBasis::Cz);
    for entry in catalog().entries_for(5) {
        let s = Stabilizer::random(5, &mut rng);
        let prep = synth.preparation(&s, &Connectivity::from(entry.name())).unwrap();
        assert!(prep.iter().filter(|i| i.is_two_qubit()).all(|i| i.gate.name() == "cz"));
        assert!(Stabilizer::from_circuit(&prep).is_equivalent(&s));
    }
}
