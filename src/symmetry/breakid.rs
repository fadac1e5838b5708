//! Reader for symmetry generators in the BreakID format: one generator
//! per line, written as parenthesized cycles of signed literals, e.g.
//! `( ( 1 3 ) ( 2 4 ) )`, terminated by a line beginning with `r`.
use {
    super::SymGenerator,
    crate::types::SolverError,
    std::{
        fs::File,
        io::{BufRead, BufReader},
        path::Path,
    },
};

pub fn load_generators(path: &Path, num_vars: usize) -> Result<Vec<SymGenerator>, SolverError> {
    let fs = File::open(path).map_err(|_| SolverError::IOError)?;
    let mut generators = Vec::new();
    for line in BufReader::new(fs).lines() {
        let line = line.map_err(|_| SolverError::IOError)?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('r') {
            break;
        }
        generators.push(parse_generator(line, num_vars)?);
    }
    Ok(generators)
}

fn parse_generator(line: &str, num_vars: usize) -> Result<SymGenerator, SolverError> {
    let spaced = line.replace('(', " ( ").replace(')', " ) ");
    let mut cycles: Vec<Vec<i32>> = Vec::new();
    let mut current: Option<Vec<i32>> = None;
    let mut depth = 0;
    for token in spaced.split_whitespace() {
        match token {
            "(" => {
                depth += 1;
                if depth == 2 {
                    current = Some(Vec::new());
                }
            }
            ")" => {
                if depth == 2 {
                    cycles.push(current.take().unwrap_or_default());
                }
                depth -= 1;
            }
            t => {
                let l = t.parse::<i32>().map_err(|_| SolverError::InvalidLiteral)?;
                if l == 0 || (num_vars as i32) < l.abs() {
                    return Err(SolverError::InvalidLiteral);
                }
                match current.as_mut() {
                    Some(c) => c.push(l),
                    // a one-cycle line without the outer parentheses
                    None => return Err(SolverError::InvalidLiteral),
                }
            }
        }
    }
    if depth != 0 {
        return Err(SolverError::InvalidLiteral);
    }
    Ok(SymGenerator::from_cycles(num_vars, &cycles))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Lit;

    #[test]
    fn test_parse_generator() {
        let g = parse_generator("( ( 1 3 ) ( 2 4 ) )", 4).expect("parse error");
        assert_eq!(g.image(Lit::from(1)), Lit::from(3));
        assert_eq!(g.image(Lit::from(-2)), Lit::from(-4));
        assert_eq!(g.support(), &[1, 2, 3, 4]);
    }
    #[test]
    fn test_parse_signed_cycle() {
        let g = parse_generator("( ( 1 -2 ) )", 2).expect("parse error");
        assert_eq!(g.image(Lit::from(1)), Lit::from(-2));
        assert_eq!(g.image(Lit::from(2)), Lit::from(-1));
    }
    #[test]
    fn test_reject_out_of_range() {
        assert!(parse_generator("( ( 1 9 ) )", 4).is_err());
        assert!(parse_generator("( ( 1 0 ) )", 4).is_err());
    }
}
