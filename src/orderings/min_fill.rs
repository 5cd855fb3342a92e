use crate::Cnf;

/// Computes a minimum fill-in elimination ordering.
///
/// The Gaifman graph is eliminated one vertex at a time:
/// the vertex whose elimination adds the fewest fill-in edges is appended to the ordering,
/// its neighborhood is completed into a clique and the vertex is removed.
pub(super) fn var_ordering(cnf: &Cnf) -> Vec<usize> {
    let mut graph = cnf.gaifman_graph();
    let mut ordering = Vec::with_capacity(graph.n_vertices());
    while let Some(vertex) = graph.min_fill_vertex() {
        graph.fill_in_edges(vertex);
        graph.remove_vertex(vertex);
        ordering.push(vertex);
    }
    ordering
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Literal;

    fn cnf(clauses: &[&[isize]]) -> Cnf {
        Cnf::from_clauses(
            clauses
                .iter()
                .map(|c| c.iter().map(|&l| Literal::from(l)).collect())
                .collect(),
        )
    }

    #[test]
    fn test_eliminates_endpoints_first() {
        // path 1-2-3: the middle vertex costs one fill-in edge until an endpoint is gone
        let cnf = cnf(&[&[1, 2], &[2, 3]]);
        assert_eq!(vec![0, 1, 2], var_ordering(&cnf));
    }

    #[test]
    fn test_fill_in_edges_count_against_later_picks() {
        // star centered on 2: the center is never picked while it has two leaves left
        let cnf = cnf(&[&[2, 1], &[2, 3], &[2, 4]]);
        let ordering = var_ordering(&cnf);
        assert_eq!(vec![0, 2, 1, 3], ordering);
    }

    #[test]
    fn test_empty() {
        assert!(var_ordering(&cnf(&[])).is_empty());
    }
}
