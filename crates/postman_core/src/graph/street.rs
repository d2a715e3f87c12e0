use std::fmt;

use crate::graph::VertexId;

/// An undirected street between two intersections.
#[derive(Clone, Debug, PartialEq)]
pub struct Street {
    pub from: VertexId,
    pub to: VertexId,
    pub length: f64,
    pub label: String,
}

impl Street {
    pub fn new(from: VertexId, to: VertexId, length: f64, label: impl Into<String>) -> Self {
        Self {
            from,
            to,
            length,
            label: label.into(),
        }
    }

    /// True when the street joins `a` and `b` in either direction.
    pub fn joins(&self, a: VertexId, b: VertexId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

/// Formats in the input line layout: `<from> <to> <length> <label>`.
impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut length = ryu::Buffer::new();
        write!(
            f,
            "{} {} {} {}",
            self.from,
            self.to,
            length.format(self.length),
            self.label
        )
    }
}
