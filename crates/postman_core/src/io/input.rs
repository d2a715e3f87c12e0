use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{
    Error, Result,
    graph::{Street, StreetGraph},
};

/// Loads a street list from disk.
///
/// Fails with [`Error::InputUnavailable`] when the file cannot be opened.
pub fn load_graph(path: &Path) -> Result<StreetGraph> {
    let file = File::open(path).map_err(|source| Error::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    read_graph(BufReader::new(file))
}

/// Reads one street per line: `<a:int> <b:int> <length:float> <name...>`.
///
/// Lines that do not parse are skipped without error.
pub fn read_graph(reader: impl BufRead) -> Result<StreetGraph> {
    let mut graph = StreetGraph::new();
    let mut skipped = 0usize;
    for line in reader.lines() {
        match parse_street_line(&line?) {
            Some(street) => {
                graph.add_street(street.from, street.to, street.length, street.label);
            }
            None => skipped += 1,
        }
    }

    log::debug!(
        "input: vertices={} streets={} skipped_lines={skipped}",
        graph.vertex_count(),
        graph.street_count()
    );
    Ok(graph)
}

pub fn parse_graph(text: &str) -> StreetGraph {
    let mut graph = StreetGraph::new();
    for street in text.lines().filter_map(parse_street_line) {
        graph.add_street(street.from, street.to, street.length, street.label);
    }
    graph
}

/// Parses a single street line, `None` when it is malformed.
///
/// The name is the rest of the line with surrounding whitespace trimmed and
/// must not be empty. Lengths must be finite and non-negative.
pub fn parse_street_line(line: &str) -> Option<Street> {
    let (from, rest) = next_token(line)?;
    let (to, rest) = next_token(rest)?;
    let (length, rest) = next_token(rest)?;

    let from = from.parse().ok()?;
    let to = to.parse().ok()?;
    let length: f64 = length.parse().ok()?;
    if !length.is_finite() || length < 0.0 {
        return None;
    }

    let label = rest.trim();
    if label.is_empty() {
        return None;
    }
    Some(Street::new(from, to, length, label))
}

fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    Some(s.split_at(s.find(char::is_whitespace).unwrap_or(s.len())))
}
