//! Odd-degree augmentation: makes every vertex even by duplicating the streets
//! of a shortest path between paired odd vertices.

use crate::{
    Error, Result,
    algo::shortest_path::{shortest_distances, trace_back},
    graph::{StreetGraph, VertexId},
};

/// The augmented copy plus a record of what was added to it.
#[derive(Clone, Debug)]
pub struct Augmentation {
    pub graph: StreetGraph,
    pub odd_vertices: Vec<VertexId>,
    pub pairs: Vec<(VertexId, VertexId)>,
    pub added_streets: usize,
    pub added_length: f64,
}

/// Odd-degree vertices in ascending id order.
pub fn odd_degree_vertices(graph: &StreetGraph) -> Vec<VertexId> {
    graph
        .vertices()
        .filter(|vertex| graph.degree(*vertex) % 2 == 1)
        .collect()
}

/// Pairs odd vertices in discovery order, `(odd[0], odd[1])`, `(odd[2], odd[3])`, ...
///
/// This is not a minimum-weight matching; the result is Eulerian but not
/// necessarily the shortest possible inspection route.
pub fn pair_sequentially(odd_vertices: &[VertexId]) -> Result<Vec<(VertexId, VertexId)>> {
    if odd_vertices.len() % 2 != 0 {
        return Err(Error::invalid_data(format!(
            "odd-degree vertex count must be even, got {}",
            odd_vertices.len()
        )));
    }
    Ok(odd_vertices
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect())
}

/// Builds an augmented copy of `original` where every vertex has even degree.
///
/// Paths are searched on `original` only, so earlier duplicates never shorten
/// later paths. `original` is left untouched.
pub fn augment_odd_vertices(original: &StreetGraph) -> Result<Augmentation> {
    let odd_vertices = odd_degree_vertices(original);
    let pairs = pair_sequentially(&odd_vertices)?;
    let mut graph = original.clone();
    let mut added_streets = 0;
    let mut added_length = 0.0;

    for &(source, target) in &pairs {
        let distances = shortest_distances(original, source);
        let path = trace_back(original, &distances, target)?;
        for &street in &path.streets {
            let copy = graph.duplicate_street(street).ok_or_else(|| {
                Error::invalid_data(format!("street {street} missing from augmented copy"))
            })?;
            if let Some(added) = graph.street(copy) {
                log::trace!("augment: duplicated {added}");
            }
        }

        log::debug!(
            "augment: pair source={source} target={target} streets={} length={:.3}",
            path.streets.len(),
            path.length
        );
        added_streets += path.streets.len();
        added_length += path.length;
    }

    Ok(Augmentation {
        graph,
        odd_vertices,
        pairs,
        added_streets,
        added_length,
    })
}
