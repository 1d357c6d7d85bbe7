//! End-to-end tests: gates and constraints compiled into quadratic models and
//! minimized with the exact solver.

use qubo_logic::compile::CompileConfig;
use qubo_logic::constraint::{and_constraint, or_constraint, xor_constraint};
use qubo_logic::expr::Expr;
use qubo_logic::gate::{and, not, or, xor, GateKind};
use qubo_logic::solver::{ExactSolver, Sampler};
use qubo_logic::types::{all_samples, sample, Var, Vartype};

#[test_log::test]
fn compiled_gates_match_truth_tables() {
    let a = Expr::binary("a");
    let b = Expr::binary("b");
    for kind in GateKind::ALL {
        let inputs = [a.clone(), b.clone()];
        let f = kind.build(&inputs[..kind.arity()]);
        let model = f.compile().unwrap();
        let vars: Vec<Var> = model.variables().iter().cloned().collect();
        for s in all_samples(&vars) {
            let bits: Vec<bool> = s.values().copied().collect();
            let expected = if kind.truth(&bits) { 1.0 } else { 0.0 };
            assert_eq!(model.energy(&s).unwrap(), expected, "{} {:?}", kind.name(), bits);
        }
    }
}

#[test_log::test]
fn solve_for_xor_without_and() {
    // Want a XOR b = 1 and a AND b = 0.
    let a = Expr::binary("a");
    let b = Expr::binary("b");
    let h = 1.0 - xor(&a, &b) + and(&a, &b);
    let model = h.compile().unwrap();
    let set = ExactSolver::default().sample(model.bqm()).unwrap();

    let ground = set.lowest();
    assert_eq!(ground.len(), 2);
    for record in ground {
        assert_eq!(record.energy, 0.0);
        assert_ne!(record.sample[&Var::new("a")], record.sample[&Var::new("b")]);
    }
}

#[test_log::test]
fn half_adder_from_constraints() {
    let a = Expr::binary("a");
    let b = Expr::binary("b");
    let sum = Expr::binary("sum");
    let carry = Expr::binary("carry");
    let anc = Expr::binary("anc");
    let h = xor_constraint(&a, &b, &sum, &anc) + and_constraint(&a, &b, &carry);

    let model = h.compile().unwrap();
    assert!(model.aux_variables().is_empty());

    for (x, y) in [(false, false), (false, true), (true, false), (true, true)] {
        let mut bqm = model.bqm().clone();
        bqm.fix_variable(&Var::new("a"), x);
        bqm.fix_variable(&Var::new("b"), y);
        let set = ExactSolver::default().sample(&bqm).unwrap();
        let ground = set.lowest();
        assert_eq!(ground.len(), 1);
        let best = &ground[0];
        assert_eq!(best.energy, 0.0);
        assert_eq!(best.sample[&Var::new("sum")], x ^ y);
        assert_eq!(best.sample[&Var::new("carry")], x && y);
    }
}

#[test_log::test]
fn or_constraint_ground_states() {
    let a = Expr::binary("a");
    let b = Expr::binary("b");
    let out = Expr::binary("out");
    let model = or_constraint(&a, &b, &out).compile().unwrap();
    let set = ExactSolver::default().sample(model.bqm()).unwrap();
    let ground = set.lowest();
    assert_eq!(ground.len(), 4);
    for record in ground {
        let s = &record.sample;
        assert_eq!(s[&Var::new("out")], s[&Var::new("a")] || s[&Var::new("b")]);
    }
}

#[test_log::test]
fn cubic_circuit_ground_state_is_consistent() {
    let a = Expr::binary("a");
    let b = Expr::binary("b");
    let c = Expr::binary("c");
    // Maximize AND(AND(a, b), c): a cubic objective.
    let f = -and(&and(&a, &b), &c);
    let model = f.compile_with(&CompileConfig { strength: 2.0 }).unwrap();
    assert_eq!(model.aux_variables().len(), 1);

    let set = ExactSolver::default().sample(model.bqm()).unwrap();
    let best = set.first().unwrap();
    assert_eq!(best.energy, -1.0);
    assert_eq!(set.lowest().len(), 1);

    let decoded = model.decode_sample(&best.sample).unwrap();
    assert!(decoded.is_consistent());
    assert_eq!(decoded.energy, -1.0);
    assert_eq!(decoded.sample, sample([("a", true), ("b", true), ("c", true)]));
}

#[test_log::test]
fn reduced_model_matches_expression_on_sources() {
    let x: Vec<Expr> = (0..4).map(|i| Expr::binary(format!("x{}", i))).collect();
    let f = or(&and(&x[0], &x[1]), &xor(&and(&x[2], &x[3]), &not(&x[0])));
    let model = f.compile().unwrap();
    let vars: Vec<Var> = f.variables().into_iter().collect();
    for s in all_samples(&vars) {
        assert_eq!(model.energy(&s).unwrap(), f.eval(&s).unwrap());
    }
}

#[test_log::test]
fn spin_model_has_same_ground_states() {
    let a = Expr::binary("a");
    let b = Expr::binary("b");
    let c = Expr::binary("c");
    let h = and_constraint(&a, &b, &c) + (1.0 - &c);
    let bqm = h.compile().unwrap().into_bqm();
    let spin = bqm.to_spin();
    assert_eq!(spin.vartype(), Vartype::Spin);

    let solver = ExactSolver::default();
    let bin_set = solver.sample(&bqm).unwrap();
    let spin_set = solver.sample(&spin).unwrap();
    assert_eq!(bin_set.first().unwrap().sample, spin_set.first().unwrap().sample);
    assert!((bin_set.first().unwrap().energy - spin_set.first().unwrap().energy).abs() < 1e-9);
    assert_eq!(
        bin_set.first().unwrap().sample,
        sample([("a", true), ("b", true), ("c", true)])
    );
}
