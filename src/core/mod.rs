mod cnf;
pub use cnf::Cnf;
pub use cnf::WeightFormat;

mod graph;
pub use graph::Graph;

mod literal;
pub use literal::Literal;

mod var_set;
pub use var_set::VarSet;
