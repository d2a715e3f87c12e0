//! Hierholzer circuit extraction over an even-degree, connected street graph.

use crate::graph::{StreetGraph, StreetId, VertexId};

/// A closed walk. `streets[i]` is the street consumed between `vertices[i]` and
/// `vertices[i + 1]`; ids refer to the graph the circuit was extracted from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Circuit {
    vertices: Vec<VertexId>,
    streets: Vec<StreetId>,
}

impl Circuit {
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    pub fn streets(&self) -> &[StreetId] {
        &self.streets
    }

    pub fn start(&self) -> Option<VertexId> {
        self.vertices.first().copied()
    }

    /// Number of street traversals in the walk.
    pub fn transitions(&self) -> usize {
        self.streets.len()
    }

    pub fn is_closed(&self) -> bool {
        self.vertices.first() == self.vertices.last()
    }

    /// Consecutive vertex pairs, wrapping the last vertex back to the first
    /// when the walk does not already end where it started.
    pub fn pairs(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        let wrap = match (self.vertices.first(), self.vertices.last()) {
            (Some(first), Some(last)) if first != last => Some((*last, *first)),
            _ => None,
        };
        self.vertices
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .chain(wrap)
    }
}

/// Consumes `graph` and walks every live street exactly once, starting and
/// ending at `start`.
///
/// The graph must be connected and every vertex must have even degree; this is
/// not re-checked, and a violation yields a short or open walk instead of an error.
pub fn eulerian_circuit(mut graph: StreetGraph, start: VertexId) -> Circuit {
    let mut stack: Vec<(VertexId, Option<StreetId>)> = vec![(start, None)];
    let mut vertices = Vec::with_capacity(graph.street_count() + 1);
    let mut streets = Vec::with_capacity(graph.street_count());

    while let Some(&(top, _)) = stack.last() {
        let step = graph
            .first_neighbor(top)
            .map(|adj| adj.neighbor)
            .and_then(|next| graph.remove_street(top, next).map(|street| (next, street)));
        match step {
            Some((next, street)) => stack.push((next, Some(street))),
            None => {
                if let Some((vertex, via)) = stack.pop() {
                    vertices.push(vertex);
                    streets.extend(via);
                }
            }
        }
    }

    vertices.reverse();
    streets.reverse();
    log::debug!(
        "circuit: start={start} vertices={} streets={} leftover={}",
        vertices.len(),
        streets.len(),
        graph.street_count()
    );
    Circuit { vertices, streets }
}
