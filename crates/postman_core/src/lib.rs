//! Route inspection (Chinese Postman) over street networks.
//!
//! The pipeline loads an undirected street multigraph, checks it is connected,
//! duplicates shortest paths between paired odd-degree intersections, extracts
//! an Eulerian circuit from the augmented copy with Hierholzer's method, and
//! labels every step from the original network.

pub mod algo;
mod error;
pub mod graph;
mod io;
pub mod logging;
pub mod route;
mod runner;
mod solver;

pub(crate) use io::{input, options, output};

pub use error::{Error, Result};
pub use io::input::{load_graph, parse_graph, parse_street_line, read_graph};
pub use io::options::{LogFormat, LogLevel, RouteOptions};
pub use io::output::{write_route, write_route_to};
pub use route::{Route, RouteMetrics, RouteStep};
pub use runner::run;
pub use solver::solve_route;
pub use graph::{StreetGraph, VertexId};
