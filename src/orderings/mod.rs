use crate::{Cnf, VarSet};
use anyhow::{anyhow, Result};
use rand::{seq::SliceRandom, Rng};
use std::fmt::Display;
use std::str::FromStr;

mod label;

mod lex;
mod mcs;
mod min_fill;

/// The heuristics used to compute variable elimination orderings over the Gaifman graph of a [`Cnf`].
///
/// Every heuristic returns a permutation of the apparent variables of the formula.
///
/// Heuristic tags can be parsed with the [`FromStr`] trait;
/// an unknown tag is an error.
///
/// # Example
///
/// ```
/// use wcnf_rs::{Cnf, Literal, VarOrderingHeuristic};
///
/// let cnf = Cnf::from_clauses(vec![
///     vec![Literal::from(1), Literal::from(-2)],
///     vec![Literal::from(2), Literal::from(3)],
/// ]);
/// let heuristic = "minfill".parse::<VarOrderingHeuristic>().unwrap();
/// let ordering = heuristic.var_ordering(&cnf, false, &mut rand::thread_rng());
/// assert_eq!(3, ordering.len());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VarOrderingHeuristic {
    /// The apparent variables in first-appearance order.
    Appearance,
    /// The apparent variables in ascending index order.
    Declaration,
    /// A uniform random shuffle of the apparent variables.
    Random,
    /// Maximum cardinality search.
    Mcs,
    /// Lexicographic breadth-first search.
    Lexp,
    /// Lexicographic search with reachability through lesser-labeled vertices.
    Lexm,
    /// Repeated elimination of the vertex adding the fewest fill-in edges.
    Minfill,
}

impl VarOrderingHeuristic {
    /// Computes a variable ordering for the given formula.
    ///
    /// The result is a permutation of the apparent variables of the formula,
    /// reversed if `inverse` is set.
    /// The given random generator is drawn from by the [`Random`](Self::Random) heuristic
    /// and left untouched by the other ones.
    #[must_use]
    pub fn var_ordering<R>(self, cnf: &Cnf, inverse: bool, rng: &mut R) -> Vec<usize>
    where
        R: Rng + ?Sized,
    {
        let mut ordering = match self {
            VarOrderingHeuristic::Appearance => cnf.apparent_vars().to_vec(),
            VarOrderingHeuristic::Declaration => {
                let mut ordering = cnf.apparent_vars().to_vec();
                ordering.sort_unstable();
                ordering
            }
            VarOrderingHeuristic::Random => {
                let mut ordering = cnf.apparent_vars().to_vec();
                ordering.shuffle(rng);
                ordering
            }
            VarOrderingHeuristic::Mcs => mcs::var_ordering(cnf),
            VarOrderingHeuristic::Lexp => lex::lexp_var_ordering(cnf),
            VarOrderingHeuristic::Lexm => lex::lexm_var_ordering(cnf),
            VarOrderingHeuristic::Minfill => min_fill::var_ordering(cnf),
        };
        if inverse {
            ordering.reverse();
        }
        ordering
    }

    /// Computes a variable ordering restricted to the given variable set.
    ///
    /// The result is the ordering computed by [`var_ordering`](Self::var_ordering)
    /// in which the variables outside the restriction set are filtered out.
    #[must_use]
    pub fn restricted_var_ordering<R>(
        self,
        cnf: &Cnf,
        inverse: bool,
        rng: &mut R,
        restriction: &VarSet,
    ) -> Vec<usize>
    where
        R: Rng + ?Sized,
    {
        self.var_ordering(cnf, inverse, rng)
            .into_iter()
            .filter(|&v| restriction.contains(v))
            .collect()
    }
}

impl Display for VarOrderingHeuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            VarOrderingHeuristic::Appearance => "appearance",
            VarOrderingHeuristic::Declaration => "declaration",
            VarOrderingHeuristic::Random => "random",
            VarOrderingHeuristic::Mcs => "mcs",
            VarOrderingHeuristic::Lexp => "lexp",
            VarOrderingHeuristic::Lexm => "lexm",
            VarOrderingHeuristic::Minfill => "minfill",
        })
    }
}

impl FromStr for VarOrderingHeuristic {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "appearance" => Ok(VarOrderingHeuristic::Appearance),
            "declaration" => Ok(VarOrderingHeuristic::Declaration),
            "random" => Ok(VarOrderingHeuristic::Random),
            "mcs" => Ok(VarOrderingHeuristic::Mcs),
            "lexp" => Ok(VarOrderingHeuristic::Lexp),
            "lexm" => Ok(VarOrderingHeuristic::Lexm),
            "minfill" => Ok(VarOrderingHeuristic::Minfill),
            _ => Err(anyhow!(
                r#"cannot build a variable ordering heuristic from "{s}""#
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Literal;
    use rand::{rngs::StdRng, SeedableRng};

    const ALL_HEURISTICS: [VarOrderingHeuristic; 7] = [
        VarOrderingHeuristic::Appearance,
        VarOrderingHeuristic::Declaration,
        VarOrderingHeuristic::Random,
        VarOrderingHeuristic::Mcs,
        VarOrderingHeuristic::Lexp,
        VarOrderingHeuristic::Lexm,
        VarOrderingHeuristic::Minfill,
    ];

    fn cnf() -> Cnf {
        Cnf::from_clauses(
            [
                vec![3, -2],
                vec![2, 1],
                vec![-3, 4],
                vec![2, -4, 5],
            ]
            .into_iter()
            .map(|c| c.into_iter().map(Literal::from).collect())
            .collect(),
        )
    }

    #[test]
    fn test_orderings_are_permutations() {
        let cnf = cnf();
        let mut expected = cnf.apparent_vars().to_vec();
        expected.sort_unstable();
        for heuristic in ALL_HEURISTICS {
            let mut rng = StdRng::seed_from_u64(0);
            let mut ordering = heuristic.var_ordering(&cnf, false, &mut rng);
            ordering.sort_unstable();
            assert_eq!(expected, ordering, "heuristic {heuristic}");
        }
    }

    #[test]
    fn test_inverse_reverses() {
        let cnf = cnf();
        for heuristic in ALL_HEURISTICS {
            let mut rng = StdRng::seed_from_u64(0);
            let ordering = heuristic.var_ordering(&cnf, false, &mut rng);
            let mut rng = StdRng::seed_from_u64(0);
            let mut inverse = heuristic.var_ordering(&cnf, true, &mut rng);
            inverse.reverse();
            assert_eq!(ordering, inverse, "heuristic {heuristic}");
        }
    }

    #[test]
    fn test_restriction_preserves_order() {
        let cnf = cnf();
        let restriction = [1, 3, 4].into_iter().collect::<VarSet>();
        for heuristic in ALL_HEURISTICS {
            let mut rng = StdRng::seed_from_u64(0);
            let ordering = heuristic.var_ordering(&cnf, false, &mut rng);
            let mut rng = StdRng::seed_from_u64(0);
            let restricted = heuristic.restricted_var_ordering(&cnf, false, &mut rng, &restriction);
            let expected = ordering
                .into_iter()
                .filter(|&v| restriction.contains(v))
                .collect::<Vec<_>>();
            assert_eq!(expected, restricted, "heuristic {heuristic}");
        }
    }

    #[test]
    fn test_appearance() {
        assert_eq!(
            vec![2, 1, 0, 3, 4],
            VarOrderingHeuristic::Appearance.var_ordering(&cnf(), false, &mut rand::thread_rng())
        );
    }

    #[test]
    fn test_declaration() {
        assert_eq!(
            vec![0, 1, 2, 3, 4],
            VarOrderingHeuristic::Declaration.var_ordering(&cnf(), false, &mut rand::thread_rng())
        );
    }

    #[test]
    fn test_empty_formula() {
        let cnf = Cnf::from_clauses(Vec::new());
        for heuristic in ALL_HEURISTICS {
            let mut rng = StdRng::seed_from_u64(0);
            assert!(heuristic.var_ordering(&cnf, false, &mut rng).is_empty());
        }
    }

    #[test]
    fn test_tag_round_trip() {
        for heuristic in ALL_HEURISTICS {
            assert_eq!(heuristic, heuristic.to_string().parse().unwrap());
        }
    }

    #[test]
    fn test_unknown_tag() {
        match "min-fill".parse::<VarOrderingHeuristic>() {
            Ok(_) => panic!(),
            Err(e) => assert_eq!(
                r#"cannot build a variable ordering heuristic from "min-fill""#,
                format!("{e}")
            ),
        }
    }
}
