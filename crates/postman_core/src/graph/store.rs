use std::collections::BTreeMap;

use crate::graph::{Street, StreetId, VertexId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Slot {
    neighbor: VertexId,
    street: StreetId,
}

/// One live adjacency entry as seen from a vertex.
#[derive(Clone, Copy, Debug)]
pub struct Adjacent<'a> {
    pub street_id: StreetId,
    pub neighbor: VertexId,
    pub street: &'a Street,
}

impl<'a> Adjacent<'a> {
    pub fn length(&self) -> f64 {
        self.street.length
    }

    pub fn label(&self) -> &'a str {
        &self.street.label
    }
}

/// Slots of one vertex. Every slot before `cursor` is consumed, so scans start
/// there; `live` is the number of live slots.
#[derive(Clone, Debug, Default)]
struct Incidence {
    slots: Vec<Slot>,
    cursor: usize,
    live: usize,
}

/// Undirected street multigraph.
///
/// Vertices iterate in ascending id order and each adjacency list is ordered by
/// neighbor id, ties kept in insertion order. Traversals that pick "the first
/// neighbor" therefore behave the same run to run.
///
/// `Clone` is a deep copy; the augmenter and the circuit builder each work on
/// their own copy so the loaded network stays intact for label lookup.
#[derive(Clone, Debug, Default)]
pub struct StreetGraph {
    streets: Vec<Street>,
    consumed: Vec<bool>,
    adjacency: BTreeMap<VertexId, Incidence>,
    live_streets: usize,
}

impl StreetGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts one street; both endpoints get a matching adjacency entry.
    ///
    /// Repeated calls for the same pair create parallel streets. Lengths are
    /// not validated here.
    pub fn add_street(
        &mut self,
        from: VertexId,
        to: VertexId,
        length: f64,
        label: impl Into<String>,
    ) -> StreetId {
        self.push_street(Street::new(from, to, length, label))
    }

    /// Adds a parallel copy of an existing street (same endpoints, length and label).
    pub fn duplicate_street(&mut self, id: StreetId) -> Option<StreetId> {
        let street = self.streets.get(id)?.clone();
        Some(self.push_street(street))
    }

    fn push_street(&mut self, street: Street) -> StreetId {
        let id = self.streets.len();
        let (from, to) = (street.from, street.to);
        self.streets.push(street);
        self.consumed.push(false);
        self.live_streets += 1;
        self.insert_slot(from, to, id);
        self.insert_slot(to, from, id);
        id
    }

    fn insert_slot(&mut self, vertex: VertexId, neighbor: VertexId, street: StreetId) {
        let incidence = self.adjacency.entry(vertex).or_default();
        let at = incidence.cursor
            + incidence.slots[incidence.cursor..].partition_point(|slot| slot.neighbor <= neighbor);
        incidence.slots.insert(at, Slot { neighbor, street });
        incidence.live += 1;
    }

    /// Removes exactly one street between `u` and `v`: the first live entry for
    /// `v` in `u`'s list. With parallel streets any one of them may go.
    ///
    /// Returns the consumed street id, or `None` if no live street joins the pair.
    pub fn remove_street(&mut self, u: VertexId, v: VertexId) -> Option<StreetId> {
        let id = self.neighbors(u).find(|adj| adj.neighbor == v)?.street_id;
        self.consume(id).then_some(id)
    }

    /// Marks a street as consumed; both of its adjacency entries disappear.
    pub fn consume(&mut self, id: StreetId) -> bool {
        match self.consumed.get_mut(id) {
            Some(flag) if !*flag => *flag = true,
            _ => return false,
        }
        self.live_streets -= 1;

        let (from, to) = (self.streets[id].from, self.streets[id].to);
        for vertex in [from, to] {
            if let Some(incidence) = self.adjacency.get_mut(&vertex) {
                incidence.live -= 1;
                while incidence
                    .slots
                    .get(incidence.cursor)
                    .is_some_and(|slot| self.consumed[slot.street])
                {
                    incidence.cursor += 1;
                }
            }
        }
        true
    }

    /// Live adjacency entries of `vertex`. A loop street shows up twice.
    pub fn neighbors(&self, vertex: VertexId) -> impl Iterator<Item = Adjacent<'_>> + '_ {
        self.adjacency
            .get(&vertex)
            .into_iter()
            .flat_map(|incidence| &incidence.slots[incidence.cursor..])
            .filter(|slot| !self.consumed[slot.street])
            .map(|slot| Adjacent {
                street_id: slot.street,
                neighbor: slot.neighbor,
                street: &self.streets[slot.street],
            })
    }

    pub fn first_neighbor(&self, vertex: VertexId) -> Option<Adjacent<'_>> {
        self.neighbors(vertex).next()
    }

    pub fn degree(&self, vertex: VertexId) -> usize {
        self.adjacency
            .get(&vertex)
            .map_or(0, |incidence| incidence.live)
    }

    /// All intersections ever touched by a street, ascending.
    ///
    /// Consuming streets never shrinks the vertex set.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.adjacency.contains_key(&vertex)
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of live (not consumed) streets.
    pub fn street_count(&self) -> usize {
        self.live_streets
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn street(&self, id: StreetId) -> Option<&Street> {
        self.streets.get(id)
    }

    /// Live streets in insertion order.
    pub fn streets(&self) -> impl Iterator<Item = (StreetId, &Street)> + '_ {
        self.streets
            .iter()
            .enumerate()
            .filter(|(id, _)| !self.consumed[*id])
    }

    pub fn total_length(&self) -> f64 {
        self.streets().map(|(_, street)| street.length).sum()
    }
}
