//! End-to-end tests over embedded clause vectors.
use symsat::{
    solver::{SatSolverIF, Solver, ValidateIF},
    state::Stat,
    Certificate,
};

/// build a solver, tolerating problems decided while loading.
fn build(clauses: &[Vec<i32>]) -> Result<Solver, Certificate> {
    match Solver::try_from(clauses.to_vec()) {
        Ok(s) => Ok(s),
        Err(Ok(c)) => Err(c),
        Err(Err(e)) => panic!("build failed: {e}"),
    }
}

fn solve(clauses: &[Vec<i32>]) -> Certificate {
    match build(clauses) {
        Ok(mut s) => s.solve().expect("solver failed"),
        Err(c) => c,
    }
}

/// brute-force satisfiability over all assignments; usable for small vars.
fn brute_force_sat(clauses: &[Vec<i32>], num_vars: usize) -> bool {
    assert!(num_vars < 24);
    'next: for bits in 0u32..(1 << num_vars) {
        for c in clauses {
            if !c.iter().any(|l| {
                let v = (l.unsigned_abs() - 1) as u32;
                (bits & (1 << v) != 0) == (0 < *l)
            }) {
                continue 'next;
            }
        }
        return true;
    }
    false
}

fn assert_model_satisfies(clauses: &[Vec<i32>], model: &[i32]) {
    for c in clauses {
        assert!(
            c.iter().any(|l| model.contains(l)),
            "clause {c:?} is falsified by {model:?}",
        );
    }
}

#[test]
fn single_positive_unit() {
    // p cnf 1 1 / 1 0
    match solve(&[vec![1]]) {
        Certificate::SAT(model) => assert_eq!(model, vec![1]),
        c => panic!("expected SAT, got {c:?}"),
    }
}

#[test]
fn contradicting_units() {
    // p cnf 1 2 / 1 0 / -1 0
    assert_eq!(solve(&[vec![1], vec![-1]]), Certificate::UNSAT);
}

#[test]
fn small_formulas_against_brute_force() {
    let problems: Vec<Vec<Vec<i32>>> = vec![
        vec![vec![1, 2], vec![-1, -2]],
        vec![vec![1, 2, 3], vec![-1, -2], vec![-2, -3], vec![-1, -3]],
        vec![
            vec![1, 2],
            vec![2, 3],
            vec![3, 4],
            vec![-1, -3],
            vec![-2, -4],
            vec![-1, -4],
        ],
        vec![
            vec![1, -2],
            vec![2, -3],
            vec![3, -1],
            vec![1, 2, 3],
            vec![-1, -2, -3],
        ],
        vec![vec![-1], vec![1, 2], vec![-2, 3], vec![-3, -2]],
    ];
    for clauses in problems {
        let nv = clauses
            .iter()
            .flat_map(|c| c.iter().map(|l| l.unsigned_abs() as usize))
            .max()
            .unwrap_or(0);
        let expected = brute_force_sat(&clauses, nv);
        match solve(&clauses) {
            Certificate::SAT(model) => {
                assert!(expected, "solver said SAT on an UNSAT problem {clauses:?}");
                assert_model_satisfies(&clauses, &model);
            }
            Certificate::UNSAT => {
                assert!(!expected, "solver said UNSAT on a SAT problem {clauses:?}");
            }
        }
    }
}

/// the XOR ring x1^x2, x2^x3, ..., xN^x1, all forced to one, over an odd
/// number of vars; unsatisfiable, and learning must converge quickly.
#[test]
fn odd_xor_ring_is_unsat() {
    let n = 7i32;
    let mut clauses: Vec<Vec<i32>> = Vec::new();
    for i in 1..=n {
        let j = i % n + 1;
        clauses.push(vec![i, j]);
        clauses.push(vec![-i, -j]);
    }
    let mut s = build(&clauses).expect("decided while loading");
    assert_eq!(s.solve().expect("solver failed"), Certificate::UNSAT);
    assert!(
        s.state[Stat::Conflict] <= (n * n) as usize,
        "too many conflicts: {}",
        s.state[Stat::Conflict],
    );
}

#[test]
fn assumptions_report_a_conflicting_subset() {
    // 1 and 2 cannot hold together
    let clauses = vec![vec![-1, -2], vec![1, 2], vec![3, 4]];
    let mut s = build(&clauses).expect("decided while loading");
    assert!(matches!(
        s.solve_limited(&[1, 2]),
        Ok(Certificate::UNSAT)
    ));
    let confl = s.conflict();
    assert!(!confl.is_empty());
    assert!(confl.iter().all(|l| *l == -1 || *l == -2));
    // the solver must stay usable for a further call
    assert!(matches!(s.solve_limited(&[1]), Ok(Certificate::SAT(_))));
    assert!(matches!(s.solve(), Ok(Certificate::SAT(_))));
}

#[test]
fn model_validation_round_trip() {
    let clauses = vec![
        vec![1, 2, 3],
        vec![-1, 4],
        vec![-2, 4],
        vec![-4, 5],
        vec![-3, -5, 6],
    ];
    let mut s = build(&clauses).expect("decided while loading");
    let Ok(Certificate::SAT(model)) = s.solve() else {
        panic!("expected SAT");
    };
    let mut validator = build(&clauses).expect("decided while loading");
    validator.inject_assignment(&model).expect("broken model");
    assert_eq!(validator.validate(), None);
}

#[test]
fn conflict_budget_yields_indeterminate() {
    // a formula that takes at least one conflict to decide
    let mut clauses: Vec<Vec<i32>> = Vec::new();
    let n = 9i32;
    for i in 1..=n {
        let j = i % n + 1;
        clauses.push(vec![i, j]);
        clauses.push(vec![-i, -j]);
    }
    let mut s = build(&clauses).expect("decided while loading");
    s.set_conflict_budget(0);
    assert!(s.solve().is_err());
    // lifting the budget makes the solver decide the problem
    s.set_conflict_budget(-1);
    assert_eq!(s.solve().expect("solver failed"), Certificate::UNSAT);
}
