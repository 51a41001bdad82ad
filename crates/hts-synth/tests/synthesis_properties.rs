//! End-to-end checks of preparation, readout, compression and MUB generation.

use hts_ir::GateSequence;
use hts_synth::{
    available_connectivities, compress, get_preparation_circuit,
    get_readout_circuit, CliffordTableau, Connectivity, Stabilizer, Strategy, SynthError,
    Synthesizer, Topology,
};
use hts_synth::mub::get_mub_strings;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn stab(rows: &[&str]) -> Stabilizer {
    Stabilizer::from_strings(rows).unwrap()
}

fn assert_respects(seq: &GateSequence, topology: &Topology) {
    for (a, b) in seq.two_qubit_pairs() {
        assert!(
            topology.has_edge(a, b),
            "({a}, {b}) is not an edge of {}",
            topology.name()
        );
    }
}

// ---------------------------------------------------------------------------
// Reference cases
// ---------------------------------------------------------------------------

#[test]
fn star_state_on_linear_avoids_outer_pair() {
    let s = stab(&["XZZ", "ZXI", "ZIX"]);
    let prep = get_preparation_circuit(&s, "linear").unwrap();
    assert!(prep.two_qubit_count() <= 2, "got {prep}");
    assert!(prep.two_qubit_pairs().all(|(a, b)| (a.min(b), a.max(b)) != (0, 2)));
    assert!(Stabilizer::from_circuit(&prep).is_equivalent(&s));
}

#[test]
fn full_never_worse_than_linear() {
    let s = stab(&["XZZ", "ZXI", "ZIX"]);
    let full = get_preparation_circuit(&s, "full").unwrap();
    let linear = get_preparation_circuit(&s, "linear").unwrap();
    assert!(full.two_qubit_count() <= linear.two_qubit_count());
}

#[test]
fn dependent_generators_rejected() {
    assert!(matches!(
        Stabilizer::from_strings(&["XX", "XX"]),
        Err(SynthError::InvalidStabilizer { .. })
    ));
}

#[test]
fn unknown_connectivity_rejected() {
    let s = stab(&["XZZ", "ZXI", "ZIX"]);
    assert!(matches!(
        get_preparation_circuit(&s, "hexagon-7"),
        Err(SynthError::UnsupportedConnectivity { .. })
    ));
}

#[test]
fn single_qubit_mubs_are_z_x_y() {
    let bases = get_mub_strings(1).unwrap();
    assert_eq!(bases, vec![vec!["Z"], vec!["X"], vec!["Y"]]);
}

// ---------------------------------------------------------------------------
// Round trips
// ---------------------------------------------------------------------------

#[test]
fn preparation_and_readout_compose_to_identity() {
    let mut rng = StdRng::seed_from_u64(7);
    for n in 1..=5 {
        for _ in 0..5 {
            let s = Stabilizer::random(n, &mut rng);
            let prep = get_preparation_circuit(&s, "full").unwrap();
            let read = get_readout_circuit(&s, "full").unwrap();

            let mut forward = prep.clone();
            forward.compose(&read).unwrap();
            assert!(CliffordTableau::from_sequence(&forward).is_identity());

            let mut backward = read.clone();
            backward.compose(&prep).unwrap();
            assert!(CliffordTableau::from_sequence(&backward).is_identity());
        }
    }
}

#[test]
fn signs_are_prepared_exactly() {
    let s = stab(&["-XX", "-ZZ"]);
    let prep = get_preparation_circuit(&s, "full").unwrap();
    let prepared = Stabilizer::from_circuit(&prep);
    assert!(prepared.is_equivalent(&s));
    assert!(!prepared.is_equivalent(&stab(&["XX", "ZZ"])));
}

#[test]
fn elimination_handles_graphs_outside_catalog() {
    let mut rng = StdRng::seed_from_u64(11);
    let topology = Topology::linear(9);
    let synth = Synthesizer::new().with_strategy(Strategy::Elimination);
    let conn = Connectivity::from(topology.clone());
    for _ in 0..5 {
        let s = Stabilizer::random(9, &mut rng);
        let prep = synth.preparation(&s, &conn).unwrap();
        assert_respects(&prep, &topology);
        assert!(Stabilizer::from_circuit(&prep).is_equivalent(&s));
    }
}

#[test]
fn disconnected_custom_topology_rejected() {
    let topology = Topology::from_edges("split", 4, [(0, 1), (2, 3)]).unwrap();
    let s = stab(&["XXXX", "ZZII", "IZZI", "IIZZ"]);
    assert!(matches!(
        get_preparation_circuit(&s, topology),
        Err(SynthError::DisconnectedTopology { .. })
    ));
}

#[test]
fn deserialized_topology_synthesizes() {
    let s = stab(&["XZZ", "ZXI", "ZIX"]);
    let json = serde_json::to_string(&Topology::linear(3)).unwrap();
    let topology: Topology = serde_json::from_str(&json).unwrap();
    let prep = get_preparation_circuit(&s, topology.clone()).unwrap();
    assert_respects(&prep, &topology);
    assert!(Stabilizer::from_circuit(&prep).is_equivalent(&s));

    let mut rng = StdRng::seed_from_u64(3);
    let json = serde_json::to_string(&Topology::linear(7)).unwrap();
    let topology: Topology = serde_json::from_str(&json).unwrap();
    let s = Stabilizer::random(7, &mut rng);
    let prep = get_preparation_circuit(&s, topology.clone()).unwrap();
    assert_respects(&prep, &topology);
    assert!(Stabilizer::from_circuit(&prep).is_equivalent(&s));
}

// ---------------------------------------------------------------------------
// Compression
// ---------------------------------------------------------------------------

#[test]
fn compression_is_idempotent_and_non_increasing() {
    let seq = GateSequence::parse(
        4,
        "h0 cx0,1 cx1,2 cx2,3 s2 cx0,3 cz1,3 swap0,2 cx2,1 h3 cx3,0",
    )
    .unwrap();
    let once = compress(&seq, "cx").unwrap();
    let twice = compress(&once, "cx").unwrap();
    assert!(once.two_qubit_count() <= seq.two_qubit_count());
    assert_eq!(twice.two_qubit_count(), once.two_qubit_count());
    assert!(Stabilizer::from_circuit(&once).is_equivalent(&Stabilizer::from_circuit(&seq)));
}

#[test]
fn every_catalog_name_is_listed() {
    let listed = available_connectivities();
    assert_eq!(listed.len(), 21);
    assert!(listed.contains(&(5, "T")));
    assert!(listed.contains(&(6, "H")));
    assert!(listed.windows(2).all(|w| w[0].0 <= w[1].0));
}
