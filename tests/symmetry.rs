//! End-to-end tests of the symmetry subsystem: generators, symmetrical
//! learnt clauses and clause injection.
use symsat::{
    solver::{SatSolverIF, Solver},
    state::Stat,
    symmetry::{InjectKind, OrderMode, SymGenerator, SymmetryOracle, ValueMode},
    Certificate, Lit,
};

fn build(clauses: &[Vec<i32>]) -> Solver {
    match Solver::try_from(clauses.to_vec()) {
        Ok(s) => s,
        Err(r) => panic!("problem decided while loading: {r:?}"),
    }
}

fn num_vars(clauses: &[Vec<i32>]) -> usize {
    clauses
        .iter()
        .flat_map(|c| c.iter().map(|l| l.unsigned_abs() as usize))
        .max()
        .unwrap_or(0)
}

/// the pigeonhole principle with 3 pigeons and 2 holes;
/// `var(pigeon, hole) = 2 * (pigeon - 1) + hole`.
fn pigeonhole_3_2() -> Vec<Vec<i32>> {
    let var = |p: i32, h: i32| 2 * (p - 1) + h;
    let mut clauses: Vec<Vec<i32>> = Vec::new();
    for p in 1..=3 {
        clauses.push(vec![var(p, 1), var(p, 2)]);
    }
    for h in 1..=2 {
        for p in 1..=3i32 {
            for q in p + 1..=3 {
                clauses.push(vec![-var(p, h), -var(q, h)]);
            }
        }
    }
    clauses
}

#[test]
fn pigeonhole_with_hole_swap_saves_conflicts() {
    let clauses = pigeonhole_3_2();
    let mut plain = build(&clauses);
    assert_eq!(plain.solve().expect("solver failed"), Certificate::UNSAT);
    let baseline = plain.state[Stat::Conflict];

    let mut symmetric = build(&clauses);
    // swapping the two holes maps the formula to itself
    symmetric.add_generator(SymGenerator::from_cycles(
        num_vars(&clauses),
        &[vec![1, 2], vec![3, 4], vec![5, 6]],
    ));
    assert_eq!(symmetric.solve().expect("solver failed"), Certificate::UNSAT);
    assert!(
        symmetric.state[Stat::Conflict] <= baseline,
        "symmetry must not increase the conflict count: {} > {baseline}",
        symmetric.state[Stat::Conflict],
    );
}

#[test]
fn identity_generator_leaves_the_trace_unchanged() {
    let clauses = pigeonhole_3_2();
    let mut plain = build(&clauses);
    assert_eq!(plain.solve().expect("solver failed"), Certificate::UNSAT);

    let mut with_identity = build(&clauses);
    with_identity.add_generator(SymGenerator::from_cycles(num_vars(&clauses), &[]));
    assert_eq!(
        with_identity.solve().expect("solver failed"),
        Certificate::UNSAT
    );
    for key in [Stat::Conflict, Stat::Decision, Stat::Propagation, Stat::Restart] {
        assert_eq!(plain.state[key], with_identity.state[key]);
    }
    assert_eq!(with_identity.state[Stat::SymGenConfl], 0);
    assert_eq!(with_identity.state[Stat::SymSelConfl], 0);
}

/// coloring K4 with three colors; `var(vertex, color) = 3 * (vertex - 1) + color`.
fn k4_three_coloring() -> Vec<Vec<i32>> {
    let var = |v: i32, c: i32| 3 * (v - 1) + c;
    let mut clauses: Vec<Vec<i32>> = Vec::new();
    for v in 1..=4 {
        clauses.push((1..=3).map(|c| var(v, c)).collect());
    }
    for u in 1..=4i32 {
        for v in u + 1..=4 {
            for c in 1..=3 {
                clauses.push(vec![-var(u, c), -var(v, c)]);
            }
        }
    }
    clauses
}

#[test]
fn k4_coloring_exercises_symmetrical_learning() {
    let clauses = k4_three_coloring();
    let nv = num_vars(&clauses);
    let mut s = build(&clauses);
    // the two color swaps (1 2) and (2 3) generate the color group
    s.add_generator(SymGenerator::from_cycles(
        nv,
        &[vec![1, 2], vec![4, 5], vec![7, 8], vec![10, 11]],
    ));
    s.add_generator(SymGenerator::from_cycles(
        nv,
        &[vec![2, 3], vec![5, 6], vec![8, 9], vec![11, 12]],
    ));
    assert_eq!(s.solve().expect("solver failed"), Certificate::UNSAT);
    assert!(
        1 <= s.state[Stat::SymGenConfl] + s.state[Stat::SymSelConfl],
        "no conflict came out of the symmetry subsystem",
    );
}

/// applying a generator to the whole formula must not change satisfiability.
#[test]
fn satisfiability_is_invariant_under_generator_images() {
    let problems: Vec<(Vec<Vec<i32>>, Vec<Vec<i32>>)> = vec![
        (k4_three_coloring(), vec![vec![1, 2], vec![4, 5], vec![7, 8], vec![10, 11]]),
        (
            vec![vec![1, 2], vec![-1, -2], vec![2, 3], vec![-3, 4]],
            vec![vec![1, 2]],
        ),
        (pigeonhole_3_2(), vec![vec![1, 3], vec![2, 4]]),
    ];
    for (clauses, cycles) in problems {
        let nv = num_vars(&clauses);
        let g = SymGenerator::from_cycles(nv, &cycles);
        let mapped = clauses
            .iter()
            .map(|c| {
                c.iter()
                    .map(|l| i32::from(g.image(Lit::from(*l))))
                    .collect::<Vec<i32>>()
            })
            .collect::<Vec<_>>();
        let a = matches!(
            build(&clauses).solve().expect("solver failed"),
            Certificate::SAT(_)
        );
        let b = matches!(
            build(&mapped).solve().expect("solver failed"),
            Certificate::SAT(_)
        );
        assert_eq!(a, b, "satisfiability changed under {cycles:?}");
    }
}

/// loading a DIMACS file plus a BreakID generator file through the same
/// entry point the command line uses.
#[test]
fn build_from_files_with_breakid_generators() {
    use symsat::Config;
    let dir = std::env::temp_dir();
    let cnf_path = dir.join("symsat_k4.cnf");
    let sym_path = dir.join("symsat_k4.sym");
    let clauses = k4_three_coloring();
    let mut cnf = format!("p cnf {} {}\n", num_vars(&clauses), clauses.len());
    for c in &clauses {
        for l in c {
            cnf.push_str(&format!("{l} "));
        }
        cnf.push_str("0\n");
    }
    std::fs::write(&cnf_path, cnf).expect("cannot write the CNF file");
    std::fs::write(
        &sym_path,
        "( ( 1 2 ) ( 4 5 ) ( 7 8 ) ( 10 11 ) )\n( ( 2 3 ) ( 5 6 ) ( 8 9 ) ( 11 12 ) )\nrows done\n",
    )
    .expect("cannot write the symmetry file");
    let mut config = Config::from(cnf_path);
    config.sym_file = Some(sym_path);
    let mut s = Solver::build(&config).expect("build failure");
    assert_eq!(s.sym.num_generators(), 2);
    assert_eq!(s.solve().expect("solver failed"), Certificate::UNSAT);
}

/// a toy oracle for the swap symmetry of `(1 v 2) & (-1 v -2)`: it injects
/// the lex-leader clause `(1 v -2)` once, keyed on either negated literal.
struct LexLeaderOracle {
    injected: bool,
}

impl SymmetryOracle for LexLeaderOracle {
    fn enable(&mut self, _order: OrderMode, _value: ValueMode) {}
    fn update_notify(&mut self, _l: Lit) {}
    fn update_cancel(&mut self, _l: Lit) {}
    fn has_clause_to_inject(&self, kind: InjectKind, l: Option<Lit>) -> bool {
        kind == InjectKind::Esbp
            && !self.injected
            && matches!(l.map(i32::from), Some(-1) | Some(-2))
    }
    fn clause_to_inject(&mut self, kind: InjectKind, _l: Option<Lit>) -> Vec<Lit> {
        debug_assert_eq!(kind, InjectKind::Esbp);
        self.injected = true;
        vec![Lit::from(1), Lit::from(-2)]
    }
}

#[test]
fn esbp_injection_keeps_the_lex_leader_model() {
    let clauses = vec![vec![1, 2], vec![-1, -2]];
    let mut s = build(&clauses);
    s.add_generator(SymGenerator::from_cycles(2, &[vec![1, 2]]));
    s.set_oracle(Box::new(LexLeaderOracle { injected: false }));
    match s.solve().expect("solver failed") {
        Certificate::SAT(model) => assert_eq!(model, vec![1, -2]),
        c => panic!("expected SAT, got {c:?}"),
    }
}

/// a units-kind oracle pinning the representative of the orbit {1, 2}.
struct UnitOracle {
    served: bool,
}

impl SymmetryOracle for UnitOracle {
    fn enable(&mut self, _order: OrderMode, _value: ValueMode) {}
    fn update_notify(&mut self, _l: Lit) {}
    fn update_cancel(&mut self, _l: Lit) {}
    fn has_clause_to_inject(&self, kind: InjectKind, _l: Option<Lit>) -> bool {
        kind == InjectKind::Units && !self.served
    }
    fn clause_to_inject(&mut self, kind: InjectKind, _l: Option<Lit>) -> Vec<Lit> {
        debug_assert_eq!(kind, InjectKind::Units);
        self.served = true;
        vec![Lit::from(1)]
    }
}

#[test]
fn injected_units_are_asserted_before_searching() {
    let clauses = vec![vec![1, 2], vec![-1, -2], vec![-1, 3]];
    let mut s = build(&clauses);
    s.add_generator(SymGenerator::from_cycles(3, &[vec![1, 2]]));
    s.set_oracle(Box::new(UnitOracle { served: false }));
    match s.solve().expect("solver failed") {
        Certificate::SAT(model) => {
            assert!(model.contains(&1));
            assert!(model.contains(&-2));
            assert!(model.contains(&3));
        }
        c => panic!("expected SAT, got {c:?}"),
    }
}
