use super::label::Label;
use crate::{Cnf, Graph};
use std::collections::BTreeMap;

/// Computes a lexicographic breadth-first search ordering.
///
/// Vertices are numbered from the highest number down to 1.
/// Each time a vertex is numbered, the current number is inserted
/// into the label of its unnumbered neighbors,
/// and the next vertex is the unnumbered one with the greatest label.
pub(super) fn lexp_var_ordering(cnf: &Cnf) -> Vec<usize> {
    let graph = cnf.gaifman_graph();
    let mut unnumbered = empty_labels(cnf);
    let mut numbered = Vec::with_capacity(unnumbered.len());
    while let Some(vertex) = max_labeled_vertex(&unnumbered) {
        let number = unnumbered.len();
        numbered.push(vertex);
        unnumbered.remove(&vertex);
        for neighbor in graph.neighbors(vertex) {
            if let Some(label) = unnumbered.get_mut(&neighbor) {
                label.add_number(number);
            }
        }
    }
    numbered
}

/// Computes a LEX-M ordering.
///
/// As [`lexp_var_ordering`], except that the label of an unnumbered vertex `w` is updated
/// when the vertex just numbered reaches `w` through vertices with labels less than `w`'s,
/// instead of requiring adjacency.
/// The restricted subgraph is rebuilt from the Gaifman graph for each `w`;
/// label updates are applied as soon as each `w` is decided,
/// so the vertices considered after it observe its new label.
pub(super) fn lexm_var_ordering(cnf: &Cnf) -> Vec<usize> {
    let graph = cnf.gaifman_graph();
    let mut unnumbered = empty_labels(cnf);
    let mut numbered = Vec::with_capacity(unnumbered.len());
    while let Some(vertex) = max_labeled_vertex(&unnumbered) {
        let number = unnumbered.len();
        numbered.push(vertex);
        unnumbered.remove(&vertex);
        let candidates = unnumbered.keys().copied().collect::<Vec<_>>();
        for w in candidates {
            if reaches_through_lesser_labels(&graph, &unnumbered, &numbered, vertex, w) {
                unnumbered.get_mut(&w).unwrap().add_number(number);
            }
        }
    }
    numbered
}

fn empty_labels(cnf: &Cnf) -> BTreeMap<usize, Label> {
    cnf.apparent_vars()
        .iter()
        .map(|&v| (v, Label::default()))
        .collect()
}

// The first vertex with the greatest label, in ascending vertex order.
fn max_labeled_vertex(unnumbered: &BTreeMap<usize, Label>) -> Option<usize> {
    let mut best: Option<(usize, &Label)> = None;
    for (&vertex, label) in unnumbered {
        if best.map_or(true, |(_, best_label)| label > best_label) {
            best = Some((vertex, label));
        }
    }
    best.map(|(vertex, _)| vertex)
}

// Restricts the graph to `from`, `to` and the unnumbered vertices
// whose label is strictly less than `to`'s, then queries reachability.
fn reaches_through_lesser_labels(
    graph: &Graph,
    unnumbered: &BTreeMap<usize, Label>,
    numbered: &[usize],
    from: usize,
    to: usize,
) -> bool {
    let mut subgraph = graph.clone();
    for &vertex in numbered {
        if vertex != from {
            subgraph.remove_vertex(vertex);
        }
    }
    let to_label = &unnumbered[&to];
    for (&vertex, label) in unnumbered {
        if vertex != to && label >= to_label {
            subgraph.remove_vertex(vertex);
        }
    }
    subgraph.has_path(from, to)
}
