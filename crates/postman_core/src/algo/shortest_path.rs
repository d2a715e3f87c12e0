//! Single-source shortest distances (Dijkstra) and predecessor-free path tracing.

use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet},
};

use crate::{
    Error, Result,
    graph::{Adjacent, StreetGraph, StreetId, VertexId},
};

/// Slack allowed when checking that a traced step lies on a shortest path.
const PATH_EPSILON: f64 = 1e-9;

/// Shortest known distance from one source to every vertex.
///
/// Vertices the search never reached read as `f64::INFINITY`.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMap {
    source: VertexId,
    distances: BTreeMap<VertexId, f64>,
}

impl DistanceMap {
    pub fn source(&self) -> VertexId {
        self.source
    }

    pub fn get(&self, vertex: VertexId) -> f64 {
        self.distances
            .get(&vertex)
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    pub fn is_reachable(&self, vertex: VertexId) -> bool {
        self.get(vertex).is_finite()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.distances.iter().map(|(v, d)| (*v, *d))
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

/// Frontier key ordered by `(distance, vertex)`.
#[derive(Clone, Copy, Debug)]
struct FrontierEntry {
    distance: f64,
    vertex: VertexId,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.vertex.cmp(&other.vertex))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

/// Dijkstra over live streets. Lengths must be non-negative.
///
/// The frontier is an ordered set; an improved vertex has its stale entry
/// removed and a fresh one inserted.
pub fn shortest_distances(graph: &StreetGraph, source: VertexId) -> DistanceMap {
    let mut distances: BTreeMap<VertexId, f64> =
        graph.vertices().map(|v| (v, f64::INFINITY)).collect();
    if !graph.contains_vertex(source) {
        return DistanceMap { source, distances };
    }

    distances.insert(source, 0.0);
    let mut frontier = BTreeSet::new();
    frontier.insert(FrontierEntry {
        distance: 0.0,
        vertex: source,
    });

    while let Some(FrontierEntry {
        distance: current_distance,
        vertex: current,
    }) = frontier.pop_first()
    {
        for adj in graph.neighbors(current) {
            let candidate = current_distance + adj.length();
            let known = distances
                .get(&adj.neighbor)
                .copied()
                .unwrap_or(f64::INFINITY);
            if candidate < known {
                frontier.remove(&FrontierEntry {
                    distance: known,
                    vertex: adj.neighbor,
                });
                distances.insert(adj.neighbor, candidate);
                frontier.insert(FrontierEntry {
                    distance: candidate,
                    vertex: adj.neighbor,
                });
            }
        }
    }

    DistanceMap { source, distances }
}

/// A path traced from a target back to the source of a [`DistanceMap`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShortestPath {
    /// Target first, source last.
    pub vertices: Vec<VertexId>,
    /// `streets[i]` joins `vertices[i]` and `vertices[i + 1]`.
    pub streets: Vec<StreetId>,
    pub length: f64,
}

/// Walks from `target` to the map's source without stored predecessors.
///
/// Only tight streets are followed, those with `distance[neighbor] + length`
/// equal to `distance[current]`. Candidates are tried cheapest first, ties in
/// adjacency order, so the first minimal neighbor wins whenever it leads
/// somewhere. Zero-length streets can make that neighbor a dead end; the walk
/// then backs up and tries the next candidate.
pub fn trace_back(
    graph: &StreetGraph,
    distances: &DistanceMap,
    target: VertexId,
) -> Result<ShortestPath> {
    let source = distances.source();
    if !distances.is_reachable(target) {
        return Err(Error::invalid_data(format!(
            "intersection {target} is unreachable from {source}"
        )));
    }

    let mut visited = BTreeSet::from([target]);
    let mut stack = vec![TraceFrame {
        vertex: target,
        reached_by: None,
        candidates: tight_steps(graph, distances, target),
    }];

    while let Some(frame) = stack.last_mut() {
        if frame.vertex == source {
            break;
        }
        match frame
            .candidates
            .find(|adj| !visited.contains(&adj.neighbor))
        {
            Some(adj) => {
                visited.insert(adj.neighbor);
                stack.push(TraceFrame {
                    vertex: adj.neighbor,
                    reached_by: Some(adj),
                    candidates: tight_steps(graph, distances, adj.neighbor),
                });
            }
            None => {
                stack.pop();
            }
        }
    }

    if stack.is_empty() {
        return Err(Error::invalid_data(format!(
            "no shortest-path walk from {target} toward {source}"
        )));
    }

    let mut path = ShortestPath::default();
    for frame in &stack {
        path.vertices.push(frame.vertex);
        if let Some(adj) = frame.reached_by {
            path.streets.push(adj.street_id);
            path.length += adj.length();
        }
    }
    Ok(path)
}

struct TraceFrame<'a> {
    vertex: VertexId,
    reached_by: Option<Adjacent<'a>>,
    candidates: std::vec::IntoIter<Adjacent<'a>>,
}

/// Tight streets out of `vertex`, cheapest first with adjacency order kept on ties.
fn tight_steps<'a>(
    graph: &'a StreetGraph,
    distances: &DistanceMap,
    vertex: VertexId,
) -> std::vec::IntoIter<Adjacent<'a>> {
    let current = distances.get(vertex);
    let bound = current + PATH_EPSILON * current.max(1.0);
    let mut steps: Vec<(f64, Adjacent<'a>)> = graph
        .neighbors(vertex)
        .map(|adj| (distances.get(adj.neighbor) + adj.length(), adj))
        .filter(|(via, _)| *via <= bound)
        .collect();
    steps.sort_by(|a, b| a.0.total_cmp(&b.0));
    steps
        .into_iter()
        .map(|(_, adj)| adj)
        .collect::<Vec<_>>()
        .into_iter()
}

#[cfg(test)]
mod tests {
    use super::{shortest_distances, trace_back};
    use crate::graph::StreetGraph;

    fn weighted_square() -> StreetGraph {
        let mut graph = StreetGraph::new();
        graph.add_street(1, 2, 1.0, "AB");
        graph.add_street(2, 3, 2.0, "BC");
        graph.add_street(3, 4, 3.0, "CD");
        graph.add_street(4, 1, 4.0, "DA");
        graph
    }

    #[test]
    fn cycle_distances_match_hand_computed_values() {
        let distances = shortest_distances(&weighted_square(), 1);
        assert_eq!(distances.source(), 1);
        assert_eq!(distances.get(1), 0.0);
        assert_eq!(distances.get(2), 1.0);
        assert_eq!(distances.get(3), 3.0);
        assert_eq!(distances.get(4), 4.0);
        assert_eq!(distances.len(), 4);
    }

    #[test]
    fn shorter_parallel_street_wins() {
        let mut graph = StreetGraph::new();
        graph.add_street(1, 2, 5.0, "Slow");
        graph.add_street(1, 2, 2.0, "Fast");
        let distances = shortest_distances(&graph, 2);
        assert_eq!(distances.get(1), 2.0);
    }

    #[test]
    fn unreachable_vertices_stay_infinite() {
        let mut graph = StreetGraph::new();
        graph.add_street(1, 2, 1.0, "A");
        graph.add_street(3, 4, 1.0, "B");
        let distances = shortest_distances(&graph, 1);
        assert!(distances.is_reachable(2));
        assert!(!distances.is_reachable(3));
        assert_eq!(distances.get(4), f64::INFINITY);
    }

    #[test]
    fn unknown_source_reaches_nothing() {
        let distances = shortest_distances(&weighted_square(), 99);
        assert!(distances.iter().all(|(_, d)| d.is_infinite()));
    }

    #[test]
    fn trace_back_follows_the_cheaper_side_of_the_cycle() {
        let graph = weighted_square();
        let distances = shortest_distances(&graph, 1);
        let path = trace_back(&graph, &distances, 3).expect("3 is reachable");
        assert_eq!(path.vertices, vec![3, 2, 1]);
        assert_eq!(path.length, 3.0);
        let labels: Vec<&str> = path
            .streets
            .iter()
            .map(|id| graph.street(*id).expect("street").label.as_str())
            .collect();
        assert_eq!(labels, vec!["BC", "AB"]);
    }

    #[test]
    fn trace_back_breaks_ties_by_first_neighbor() {
        // 1 -> 4 has two equal routes, via 2 and via 3.
        let mut graph = StreetGraph::new();
        graph.add_street(1, 3, 1.0, "West");
        graph.add_street(3, 4, 1.0, "North");
        graph.add_street(1, 2, 1.0, "East");
        graph.add_street(2, 4, 1.0, "South");
        let distances = shortest_distances(&graph, 1);
        let path = trace_back(&graph, &distances, 4).expect("4 is reachable");
        assert_eq!(path.vertices, vec![4, 2, 1]);
    }

    #[test]
    fn trace_back_uses_the_minimizing_parallel_street() {
        let mut graph = StreetGraph::new();
        graph.add_street(1, 2, 5.0, "Slow");
        let fast = graph.add_street(1, 2, 2.0, "Fast");
        let distances = shortest_distances(&graph, 1);
        let path = trace_back(&graph, &distances, 2).expect("reachable");
        assert_eq!(path.streets, vec![fast]);
    }

    #[test]
    fn trace_back_survives_zero_length_streets() {
        let mut graph = StreetGraph::new();
        graph.add_street(5, 2, 1.0, "In");
        graph.add_street(2, 3, 0.0, "Plaza");
        let distances = shortest_distances(&graph, 5);
        let path = trace_back(&graph, &distances, 3).expect("reachable");
        assert_eq!(path.vertices, vec![3, 2, 5]);
        assert_eq!(path.length, 1.0);
    }

    #[test]
    fn trace_back_backs_out_of_zero_length_dead_end() {
        // From 2, the stub to 1 ties with the street to 3 but 1 leads nowhere.
        let mut graph = StreetGraph::new();
        graph.add_street(10, 2, 1.0, "In");
        graph.add_street(2, 1, 0.0, "Stub");
        let long = graph.add_street(2, 3, 5.0, "Long");
        let distances = shortest_distances(&graph, 3);
        assert_eq!(distances.get(1), 5.0);
        let path = trace_back(&graph, &distances, 10).expect("10 is reachable");
        assert_eq!(path.vertices, vec![10, 2, 3]);
        assert_eq!(path.streets.last(), Some(&long));
        assert_eq!(path.length, 6.0);
    }

    #[test]
    fn trace_back_crosses_zero_length_cycle() {
        let mut graph = StreetGraph::new();
        graph.add_street(1, 2, 2.0, "Avenue");
        graph.add_street(2, 3, 0.0, "Square North");
        graph.add_street(3, 4, 0.0, "Square East");
        graph.add_street(4, 2, 0.0, "Square South");
        graph.add_street(4, 5, 1.0, "Exit");
        let distances = shortest_distances(&graph, 1);
        let path = trace_back(&graph, &distances, 5).expect("5 is reachable");
        assert_eq!(path.vertices.first(), Some(&5));
        assert_eq!(path.vertices.last(), Some(&1));
        assert_eq!(path.length, 3.0);
    }

    #[test]
    fn trace_back_to_source_is_empty() {
        let graph = weighted_square();
        let distances = shortest_distances(&graph, 2);
        let path = trace_back(&graph, &distances, 2).expect("source is reachable");
        assert_eq!(path.vertices, vec![2]);
        assert!(path.streets.is_empty());
    }

    #[test]
    fn trace_back_rejects_unreachable_target() {
        let mut graph = StreetGraph::new();
        graph.add_street(1, 2, 1.0, "A");
        graph.add_street(3, 4, 1.0, "B");
        let distances = shortest_distances(&graph, 1);
        let err = trace_back(&graph, &distances, 4).expect_err("4 is unreachable");
        assert!(err.to_string().contains("unreachable"));
    }
}
