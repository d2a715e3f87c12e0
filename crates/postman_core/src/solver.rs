use crate::{
    Error, Result,
    algo::{
        augment::augment_odd_vertices,
        circuit::eulerian_circuit,
        connectivity::{components, is_connected},
    },
    graph::{StreetGraph, VertexId},
    route::{Route, emit_route},
};

/// Computes a closed route from `start` covering every street of `graph`.
///
/// Preconditions checked here: the network is non-empty, contains `start`, and
/// is connected. `graph` is never modified; augmentation and circuit
/// extraction each run on their own copy.
#[postman_derive::timer("solver")]
pub fn solve_route(graph: &StreetGraph, start: VertexId) -> Result<Route> {
    if graph.is_empty() {
        return Err(Error::EmptyGraph);
    }
    if !graph.contains_vertex(start) {
        return Err(Error::UnknownStartVertex(start));
    }

    log::info!(
        "solver: start vertices={} streets={} start={start}",
        graph.vertex_count(),
        graph.street_count()
    );

    if !is_connected(graph) {
        log::warn!("solver: disconnected components={}", components(graph).len());
        return Err(Error::DisconnectedGraph);
    }

    let augmentation = augment_odd_vertices(graph)?;
    log::info!(
        "solver: augmented odd_vertices={} pairs={} added_streets={} added_length={:.3}",
        augmentation.odd_vertices.len(),
        augmentation.pairs.len(),
        augmentation.added_streets,
        augmentation.added_length
    );

    let expected = augmentation.graph.street_count();
    let circuit = eulerian_circuit(augmentation.graph.clone(), start);
    if circuit.transitions() != expected
        || !circuit.is_closed()
        || circuit.start() != Some(start)
    {
        return Err(Error::invalid_data(format!(
            "circuit covers {} of {expected} streets",
            circuit.transitions()
        )));
    }

    let route = emit_route(graph, &augmentation.graph, &circuit)?;
    log::info!("solver: complete steps={}", route.len());
    Ok(route)
}
