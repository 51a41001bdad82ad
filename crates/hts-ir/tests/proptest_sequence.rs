//! Property-based tests for gate sequences.
//!
//! Checks that the text form, inversion and cost metrics agree with each other
//! on arbitrary Clifford sequences.

use hts_ir::{CliffordGate, GateSequence, Instruction, QubitId};
use proptest::prelude::*;

/// Generate a random Clifford sequence on 1-6 qubits with up to 20 gates.
fn arb_sequence() -> impl Strategy<Value = GateSequence> {
    (1_u32..=6).prop_flat_map(|num_qubits| {
        prop::collection::vec(arb_instruction(num_qubits), 0..=20).prop_map(move |insts| {
            GateSequence::from_instructions(num_qubits, insts).expect("operands are in range")
        })
    })
}

fn arb_instruction(num_qubits: u32) -> impl Strategy<Value = Instruction> {
    let single = (0..7_usize, 0..num_qubits).prop_map(|(g, q)| {
        Instruction::single_qubit_gate(CliffordGate::ALL[g], QubitId(q))
    });
    if num_qubits < 2 {
        single.boxed()
    } else {
        let pair = (7..10_usize, 0..num_qubits, 1..num_qubits).prop_map(move |(g, a, off)| {
            let b = (a + off) % num_qubits;
            Instruction::two_qubit_gate(CliffordGate::ALL[g], QubitId(a), QubitId(b))
        });
        prop_oneof![2 => single, 1 => pair].boxed()
    }
}

proptest! {
    #[test]
    fn text_form_parses_back(seq in arb_sequence()) {
        let text = seq.to_string();
        let parsed = GateSequence::parse(seq.num_qubits(), &text).unwrap();
        prop_assert_eq!(parsed, seq);
    }

    #[test]
    fn inverse_preserves_costs(seq in arb_sequence()) {
        let inv = seq.inverse();
        prop_assert_eq!(inv.len(), seq.len());
        prop_assert_eq!(inv.two_qubit_count(), seq.two_qubit_count());
        prop_assert_eq!(inv.two_qubit_depth(), seq.two_qubit_depth());
        prop_assert_eq!(inv.inverse(), seq);
    }

    #[test]
    fn depth_is_bounded(seq in arb_sequence()) {
        prop_assert!(seq.depth() <= seq.len());
        prop_assert!(seq.two_qubit_depth() <= seq.native_two_qubit_count());
        prop_assert!(seq.two_qubit_count() <= seq.native_two_qubit_count());
    }
}
