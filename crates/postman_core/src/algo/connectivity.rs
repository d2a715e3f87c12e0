use std::collections::BTreeSet;

use crate::graph::{StreetGraph, VertexId};

/// True when every vertex is reachable from the first one.
///
/// An empty graph is trivially connected; callers reject it separately.
pub fn is_connected(graph: &StreetGraph) -> bool {
    let Some(root) = graph.vertices().next() else {
        return true;
    };
    reachable_from(graph, root).len() == graph.vertex_count()
}

/// Depth-first reachability with an explicit stack.
pub fn reachable_from(graph: &StreetGraph, root: VertexId) -> BTreeSet<VertexId> {
    let mut visited = BTreeSet::new();
    if !graph.contains_vertex(root) {
        return visited;
    }

    let mut stack = vec![root];
    visited.insert(root);
    while let Some(vertex) = stack.pop() {
        for adj in graph.neighbors(vertex) {
            if visited.insert(adj.neighbor) {
                stack.push(adj.neighbor);
            }
        }
    }
    visited
}

/// Connected components, each listed in ascending vertex order.
pub fn components(graph: &StreetGraph) -> Vec<Vec<VertexId>> {
    let mut seen: BTreeSet<VertexId> = BTreeSet::new();
    let mut out = Vec::new();
    for vertex in graph.vertices() {
        if seen.contains(&vertex) {
            continue;
        }
        let component = reachable_from(graph, vertex);
        seen.extend(component.iter().copied());
        out.push(component.into_iter().collect());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{components, is_connected, reachable_from};
    use crate::graph::StreetGraph;

    fn two_triangles() -> StreetGraph {
        let mut graph = StreetGraph::new();
        graph.add_street(1, 2, 1.0, "A");
        graph.add_street(2, 3, 1.0, "B");
        graph.add_street(3, 1, 1.0, "C");
        graph.add_street(4, 5, 1.0, "D");
        graph.add_street(5, 6, 1.0, "E");
        graph.add_street(6, 4, 1.0, "F");
        graph
    }

    #[test]
    fn triangle_is_connected() {
        let mut graph = StreetGraph::new();
        graph.add_street(1, 2, 1.0, "A");
        graph.add_street(2, 3, 1.0, "B");
        graph.add_street(3, 1, 1.0, "C");
        assert!(is_connected(&graph));
    }

    #[test]
    fn two_triangles_are_not_connected() {
        let graph = two_triangles();
        assert!(!is_connected(&graph));
        assert_eq!(components(&graph), vec![vec![1, 2, 3], vec![4, 5, 6]]);
    }

    #[test]
    fn bridging_street_connects_components() {
        let mut graph = two_triangles();
        graph.add_street(3, 4, 2.0, "Bridge");
        assert!(is_connected(&graph));
        assert_eq!(components(&graph).len(), 1);
    }

    #[test]
    fn empty_graph_is_trivially_connected() {
        assert!(is_connected(&StreetGraph::new()));
        assert!(components(&StreetGraph::new()).is_empty());
    }

    #[test]
    fn reachable_from_unknown_root_is_empty() {
        assert!(reachable_from(&two_triangles(), 42).is_empty());
    }

    #[test]
    fn long_chain_does_not_recurse() {
        let mut graph = StreetGraph::new();
        for v in 0..100_000_i64 {
            graph.add_street(v, v + 1, 1.0, "chain");
        }
        assert!(is_connected(&graph));
    }
}
