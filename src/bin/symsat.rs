// SAT solver with symmetry propagation, drivable from DIMACS files.
use {
    structopt::StructOpt,
    symsat::{
        solver::{SatSolverIF, Solver},
        symmetry::SymmetryOracle,
        Certificate, Config, SolverError,
    },
};

fn main() {
    let config = Config::from_args();
    let mut solver = match Solver::build(&config) {
        Ok(s) => s,
        Err(e) => {
            println!("c cannot load {}: {e}", config.cnf_file.display());
            println!("s INDETERMINATE");
            std::process::exit(0);
        }
    };
    if !config.quiet_mode {
        println!("c {}", solver.state.target);
        println!("c symmetry generators: {}", solver.sym.num_generators());
    }
    let res = solver.solve();
    solver.state.report_stats();
    if let Some(oracle) = solver.sym.oracle.as_ref() {
        if !config.quiet_mode {
            oracle.print_stats();
        }
    }
    match res {
        Ok(Certificate::SAT(model)) => {
            println!("s SATISFIABLE");
            let mut line = String::from("v");
            for x in model.iter() {
                line.push(' ');
                line.push_str(&x.to_string());
            }
            line.push_str(" 0");
            println!("{line}");
            std::process::exit(10);
        }
        Ok(Certificate::UNSAT) => {
            println!("s UNSATISFIABLE");
            std::process::exit(20);
        }
        Err(SolverError::OutOfBudget) => {
            println!(
                "c time or conflict budget exceeded near {:.4} % of the search space",
                solver.state.progress_estimate * 100.0
            );
            println!("s INDETERMINATE");
            std::process::exit(0);
        }
        Err(e) => {
            println!("c solver failed: {e}");
            println!("s INDETERMINATE");
            std::process::exit(0);
        }
    }
}
