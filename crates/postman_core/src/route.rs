use std::fmt;

use postman_derive::KvDisplay;

use crate::{
    Error, Result,
    algo::circuit::Circuit,
    graph::{StreetGraph, VertexId},
};

/// One traversed street, labelled from the original network.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteStep {
    pub from: VertexId,
    pub to: VertexId,
    pub length: f64,
    pub label: String,
}

/// Formats as an output line: `<from> <to> <label>`.
impl fmt::Display for RouteStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.from, self.to, self.label)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Route {
    steps: Vec<RouteStep>,
}

impl Route {
    pub fn new(steps: Vec<RouteStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[RouteStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn walked_length(&self) -> f64 {
        self.steps.iter().map(|step| step.length).sum()
    }

    /// Summarizes the route against the network it covers and logs the result.
    pub fn metrics(&self, original: &StreetGraph) -> RouteMetrics {
        let walked_length = self.walked_length();
        let street_length = original.total_length();
        let metrics = RouteMetrics {
            steps: self.len(),
            streets: original.street_count(),
            walked_length,
            street_length,
            deadhead_length: walked_length - street_length,
        };
        log::info!("metrics: {metrics}");
        metrics
    }
}

#[derive(Clone, Debug, Default, PartialEq, KvDisplay)]
pub struct RouteMetrics {
    pub steps: usize,
    pub streets: usize,
    #[kv(fmt = "fixed2")]
    pub walked_length: f64,
    #[kv(fmt = "fixed2")]
    pub street_length: f64,
    /// Length walked a second time or more.
    #[kv(fmt = "fixed2")]
    pub deadhead_length: f64,
}

/// Resolves each circuit transition to a street of the original network.
///
/// `traversed` is the graph the circuit was extracted from; the street it
/// consumed supplies the step length. The label comes from the first street in
/// `from`'s original adjacency reaching `to`, so with parallel streets a
/// traversal may report a sibling's name.
pub fn emit_route(
    original: &StreetGraph,
    traversed: &StreetGraph,
    circuit: &Circuit,
) -> Result<Route> {
    let mut steps = Vec::with_capacity(circuit.transitions());
    for (index, (from, to)) in circuit.pairs().enumerate() {
        let adj = original
            .neighbors(from)
            .find(|adj| adj.neighbor == to)
            .ok_or_else(|| {
                Error::invalid_data(format!("circuit step {from} -> {to} has no street"))
            })?;
        let length = match circuit.streets().get(index) {
            Some(&id) => traversed
                .street(id)
                .filter(|street| street.joins(from, to))
                .map(|street| street.length)
                .ok_or_else(|| {
                    Error::invalid_data(format!(
                        "circuit step {from} -> {to} does not match street {id}"
                    ))
                })?,
            None => adj.length(),
        };
        steps.push(RouteStep {
            from,
            to,
            length,
            label: adj.label().to_string(),
        });
    }
    Ok(Route::new(steps))
}
