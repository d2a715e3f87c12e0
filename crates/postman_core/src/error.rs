use std::path::PathBuf;

use thiserror::Error as ThisError;

use crate::graph::VertexId;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("cannot open input file {}: {source}", path.display())]
    InputUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot open output file {}: {source}", path.display())]
    OutputUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("street network is not connected")]
    DisconnectedGraph,
    #[error("street network is empty: no valid street lines in input")]
    EmptyGraph,
    #[error("start intersection {0} is not part of the street network")]
    UnknownStartVertex(VertexId),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

#[cfg(test)]
mod tests {
    use std::{io, path::PathBuf};

    use super::Error;

    #[test]
    fn input_unavailable_names_the_path() {
        let err = Error::InputUnavailable {
            path: PathBuf::from("streets.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("input file streets.txt"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn unknown_start_vertex_reports_the_id() {
        assert_eq!(
            Error::UnknownStartVertex(-4).to_string(),
            "start intersection -4 is not part of the street network"
        );
    }

    #[test]
    fn helpers_wrap_messages() {
        assert_eq!(Error::invalid_input("x").to_string(), "invalid input: x");
        assert_eq!(Error::invalid_data("y").to_string(), "invalid data: y");
        assert_eq!(Error::other("z").to_string(), "z");
    }
}
