use crate::Cnf;
use std::collections::BTreeMap;

/// Computes a maximum cardinality search ordering.
///
/// The first vertex of the Gaifman graph in iteration order opens the ordering;
/// the next vertex is always the unordered one with the most ordered neighbors,
/// ties broken by ascending vertex order.
/// Vertices disconnected from every ordered vertex stay at count zero
/// and remain eligible until the working map is empty.
pub(super) fn var_ordering(cnf: &Cnf) -> Vec<usize> {
    let graph = cnf.gaifman_graph();
    let mut vertices = graph.vertices();
    let Some(start) = vertices.next() else {
        return Vec::new();
    };
    // unordered vertex -> number of ordered neighbors
    let mut ordered_neighbor_counts = vertices.map(|v| (v, 0usize)).collect::<BTreeMap<_, _>>();
    let mut ordering = Vec::with_capacity(graph.n_vertices());
    let mut best = start;
    loop {
        ordering.push(best);
        ordered_neighbor_counts.remove(&best);
        for neighbor in graph.neighbors(best) {
            if let Some(count) = ordered_neighbor_counts.get_mut(&neighbor) {
                *count += 1;
            }
        }
        let mut next: Option<(usize, usize)> = None;
        for (&vertex, &count) in &ordered_neighbor_counts {
            if next.map_or(true, |(_, best_count)| count > best_count) {
                next = Some((vertex, count));
            }
        }
        match next {
            Some((vertex, _)) => best = vertex,
            None => break,
        }
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
    fn test_follows_ordered_neighbors() {
        // path 1-2-3: 3 is picked last although it precedes 2 in no order
        let cnf = cnf(&[&[1, 2], &[2, 3]]);
        assert_eq!(vec![0, 1, 2], var_ordering(&cnf));
    }

    #[test]
    fn test_prefers_most_connected() {
        // triangle 1-2-4 plus pendant 3 on 1: after 1 and 2,
        // vertex 4 has two ordered neighbors while 3 has one
        let cnf = cnf(&[&[1, 2], &[2, 4], &[4, 1], &[1, 3]]);
        assert_eq!(vec![0, 1, 3, 2], var_ordering(&cnf));
    }

    #[test]
    fn test_includes_disconnected_components() {
        let cnf = cnf(&[&[1, 2], &[3, 4]]);
        let mut ordering = var_ordering(&cnf);
        assert_eq!(4, ordering.len());
        ordering.sort_unstable();
        assert_eq!(vec![0, 1, 2, 3], ordering);
    }

    #[test]
    fn test_empty() {
        assert!(var_ordering(&cnf(&[])).is_empty());
    }
}
