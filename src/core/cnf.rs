use super::{Graph, Literal, VarSet};
use anyhow::{anyhow, Result};
use rustc_hash::FxHashMap;
use std::fmt::Display;
use std::str::FromStr;

/// The weight dialects a CNF instance can be written in.
///
/// The dialect tells the reader where literal weights come from
/// and whether the instance declares a projection scope.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WeightFormat {
    /// Plain DIMACS CNF; every literal weight is set to 1.
    Unweighted,
    /// DIMACS CNF with a single `c weights` comment line giving both weights of each variable.
    Minic2d,
    /// DIMACS CNF with Cachet-style `w var weight` lines giving the positive weight of a variable.
    Cachet,
    /// Weighted CNF with `w literal weight` lines.
    Wcnf,
    /// Weighted projected CNF with `w literal weight` lines and `vp` projection lines.
    Wpcnf,
}

impl WeightFormat {
    /// Returns the keyword expected on the problem line for this dialect.
    pub(crate) fn problem_word(self) -> &'static str {
        match self {
            WeightFormat::Wcnf => "wcnf",
            WeightFormat::Wpcnf => "wpcnf",
            _ => "cnf",
        }
    }
}

impl Display for WeightFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            WeightFormat::Unweighted => "unweighted",
            WeightFormat::Minic2d => "minic2d",
            WeightFormat::Cachet => "cachet",
            WeightFormat::Wcnf => "wcnf",
            WeightFormat::Wpcnf => "wpcnf",
        })
    }
}

impl FromStr for WeightFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unweighted" => Ok(WeightFormat::Unweighted),
            "minic2d" => Ok(WeightFormat::Minic2d),
            "cachet" => Ok(WeightFormat::Cachet),
            "wcnf" => Ok(WeightFormat::Wcnf),
            "wpcnf" => Ok(WeightFormat::Wpcnf),
            _ => Err(anyhow!(r#"cannot build a weight format from "{s}""#)),
        }
    }
}

/// A weighted, possibly projected, CNF formula.
///
/// A formula holds its clauses in input order, the variable count declared on the problem line,
/// the variables that actually appear in the clauses (in first-appearance order),
/// a weight for each literal and the additive (projection) variable set.
///
/// Formulas are built by readers (see [`CnfReader`](crate::CnfReader))
/// or directly from a clause list with [`from_clauses`](Self::from_clauses).
#[derive(Debug)]
pub struct Cnf {
    weight_format: WeightFormat,
    declared_var_count: usize,
    clauses: Vec<Vec<Literal>>,
    apparent_vars: Vec<usize>,
    apparent_var_set: VarSet,
    literal_weights: FxHashMap<Literal, f64>,
    additive_vars: VarSet,
}

impl Cnf {
    /// Builds a formula directly from a clause list.
    ///
    /// The declared variable count is set to the number of apparent variables
    /// and every apparent variable is additive.
    /// Literal weights are left empty; this constructor supports callers that set weights separately.
    #[must_use]
    pub fn from_clauses(clauses: Vec<Vec<Literal>>) -> Self {
        let mut cnf = Cnf::new(WeightFormat::Unweighted);
        for clause in clauses {
            cnf.add_clause(clause);
        }
        cnf.additive_vars = cnf.apparent_var_set.clone();
        cnf.declared_var_count = cnf.apparent_vars.len();
        cnf
    }

    pub(crate) fn from_raw_data(
        weight_format: WeightFormat,
        declared_var_count: usize,
        clauses: Vec<Vec<Literal>>,
        literal_weights: FxHashMap<Literal, f64>,
        additive_vars: VarSet,
    ) -> Self {
        let mut cnf = Cnf::new(weight_format);
        for clause in clauses {
            cnf.add_clause(clause);
        }
        cnf.declared_var_count = declared_var_count;
        cnf.literal_weights = literal_weights;
        cnf.additive_vars = additive_vars;
        cnf
    }

    fn new(weight_format: WeightFormat) -> Self {
        Self {
            weight_format,
            declared_var_count: 0,
            clauses: Vec::new(),
            apparent_vars: Vec::new(),
            apparent_var_set: VarSet::empty(),
            literal_weights: FxHashMap::default(),
            additive_vars: VarSet::empty(),
        }
    }

    fn add_clause(&mut self, clause: Vec<Literal>) {
        for l in &clause {
            let var_index = l.var_index();
            if !self.apparent_var_set.contains(var_index) {
                self.apparent_var_set.insert(var_index);
                self.apparent_vars.push(var_index);
            }
        }
        self.clauses.push(clause);
    }

    /// Returns the weight dialect this formula was built with.
    #[must_use]
    pub fn weight_format(&self) -> WeightFormat {
        self.weight_format
    }

    /// Returns the variable count declared on the problem line.
    #[must_use]
    pub fn declared_var_count(&self) -> usize {
        self.declared_var_count
    }

    /// Returns the clauses of the formula, in input order.
    #[must_use]
    pub fn clauses(&self) -> &[Vec<Literal>] {
        &self.clauses
    }

    /// Returns the variables appearing in at least one clause,
    /// in first-appearance order and without duplicates.
    #[must_use]
    pub fn apparent_vars(&self) -> &[usize] {
        &self.apparent_vars
    }

    /// Returns the mapping from literals to weights.
    ///
    /// After parsing, the mapping is total over the literals of the declared variables.
    #[must_use]
    pub fn literal_weights(&self) -> &FxHashMap<Literal, f64> {
        &self.literal_weights
    }

    /// Returns the additive (projection) variable set.
    #[must_use]
    pub fn additive_vars(&self) -> &VarSet {
        &self.additive_vars
    }

    /// Returns the declared variables that are not additive.
    #[must_use]
    pub fn disjunctive_vars(&self) -> VarSet {
        (0..self.declared_var_count)
            .filter(|&v| !self.additive_vars.contains(v))
            .collect()
    }

    /// Returns the index of the first empty clause, or [`None`] if there is none.
    #[must_use]
    pub fn empty_clause_index(&self) -> Option<usize> {
        self.clauses.iter().position(Vec::is_empty)
    }

    /// Builds the Gaifman graph of the formula.
    ///
    /// Its vertices are the apparent variables
    /// and its edges link every pair of variables appearing together in some clause.
    #[must_use]
    pub fn gaifman_graph(&self) -> Graph {
        let mut graph = Graph::from_vertices(self.apparent_vars.iter().copied());
        for clause in &self.clauses {
            for (i, l1) in clause.iter().enumerate() {
                for l2 in &clause[i + 1..] {
                    graph.add_edge(l1.var_index(), l2.var_index());
                }
            }
        }
        graph
    }
}
