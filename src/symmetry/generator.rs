/// A permutation of literals mapping the formula to itself.
use {crate::types::*, std::fmt};

/// One symmetry generator, stored as the image of every literal.
/// Literals outside its support map to themselves.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SymGenerator {
    image: Vec<Lit>,
    /// vars moved by this generator, ascending
    support: Vec<VarId>,
}

impl fmt::Display for SymGenerator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SymGenerator(support: {:?})", self.support)
    }
}

impl SymGenerator {
    /// build a generator over `num_vars` vars from cycles of signed
    /// literals: the cycle `(a b c)` maps a to b, b to c and c to a,
    /// and their negations accordingly.
    pub fn from_cycles(num_vars: usize, cycles: &[Vec<i32>]) -> SymGenerator {
        let mut image = (0..2 * (num_vars + 1))
            .map(Lit::from)
            .collect::<Vec<Lit>>();
        for cycle in cycles.iter().filter(|c| 1 < c.len()) {
            for (i, a) in cycle.iter().enumerate() {
                let b = cycle[(i + 1) % cycle.len()];
                let la = Lit::from(*a);
                let lb = Lit::from(b);
                image[usize::from(la)] = lb;
                image[usize::from(!la)] = !lb;
            }
        }
        let support = (1..=num_vars)
            .filter(|vi| {
                let l = Lit::from((*vi, true));
                image[usize::from(l)] != l
            })
            .collect::<Vec<_>>();
        SymGenerator { image, support }
    }
    /// the image of a literal; vars created after the generator are
    /// outside its support and map to themselves.
    #[inline]
    pub fn image(&self, l: Lit) -> Lit {
        self.image.get(usize::from(l)).copied().unwrap_or(l)
    }
    /// return `true` if the generator moves the literal.
    #[inline]
    pub fn permutes(&self, l: Lit) -> bool {
        self.image(l) != l
    }
    /// vars moved by this generator.
    pub fn support(&self) -> &[VarId] {
        &self.support
    }
    pub fn is_identity(&self) -> bool {
        self.support.is_empty()
    }
    /// return `true` if the clause, taken as a set of literals, is mapped
    /// onto itself.
    pub fn stabilize(&self, lits: &[Lit]) -> bool {
        lits.iter().all(|l| lits.contains(&self.image(*l)))
    }
    /// the image of a whole clause.
    pub fn symmetrical_clause(&self, lits: &[Lit]) -> Vec<Lit> {
        lits.iter().map(|l| self.image(*l)).collect::<Vec<_>>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lits(v: &[i32]) -> Vec<Lit> {
        v.iter().map(|i| Lit::from(*i)).collect::<Vec<_>>()
    }
    #[test]
    fn test_cycle_images() {
        // (1 2)(−1 −2) as a single signed cycle
        let g = SymGenerator::from_cycles(3, &[vec![1, 2]]);
        assert_eq!(g.image(Lit::from(1)), Lit::from(2));
        assert_eq!(g.image(Lit::from(2)), Lit::from(1));
        assert_eq!(g.image(Lit::from(-1)), Lit::from(-2));
        assert_eq!(g.image(Lit::from(3)), Lit::from(3));
        assert!(g.permutes(Lit::from(-2)));
        assert!(!g.permutes(Lit::from(3)));
        assert_eq!(g.support(), &[1, 2]);
    }
    #[test]
    fn test_phase_shifting_cycle() {
        // (1 -2): 1 maps to -2 and 2 maps to -1
        let g = SymGenerator::from_cycles(2, &[vec![1, -2]]);
        assert_eq!(g.image(Lit::from(1)), Lit::from(-2));
        assert_eq!(g.image(Lit::from(-1)), Lit::from(2));
        assert_eq!(g.image(Lit::from(-2)), Lit::from(1));
    }
    #[test]
    fn test_identity() {
        let g = SymGenerator::from_cycles(4, &[]);
        assert!(g.is_identity());
        assert!(g.stabilize(&lits(&[1, -3])));
    }
    #[test]
    fn test_stabilize_and_clause_image() {
        let g = SymGenerator::from_cycles(4, &[vec![1, 2]]);
        assert!(g.stabilize(&lits(&[1, 2, -4])));
        assert!(!g.stabilize(&lits(&[1, -4])));
        assert_eq!(g.symmetrical_clause(&lits(&[1, 3, -2])), lits(&[2, 3, -1]));
    }
}
