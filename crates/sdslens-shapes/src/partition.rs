//! Splitting an input quad stream by graph name.

use crate::graph::QuadSet;
use sdslens_model::{Quad, Term, Vocabulary};

/// Graph names that route quads into the description partitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionMarkers {
    pub addition: Term,
    pub removal: Term,
}

impl PartitionMarkers {
    pub fn from_vocabulary(vocab: &Vocabulary) -> Self {
        Self {
            addition: vocab.addition_graph(),
            removal: vocab.removal_graph(),
        }
    }
}

impl Default for PartitionMarkers {
    fn default() -> Self {
        Self::from_vocabulary(&Vocabulary::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartitionKind {
    Data,
    Addition,
    Removal,
}

/// Exactly one kind per quad; anything that is not a marker graph is data.
pub fn classify(quad: &Quad, markers: &PartitionMarkers) -> PartitionKind {
    match &quad.graph {
        Some(g) if *g == markers.addition => PartitionKind::Addition,
        Some(g) if *g == markers.removal => PartitionKind::Removal,
        _ => PartitionKind::Data,
    }
}

#[derive(Debug, Clone, Default)]
pub struct Partitions {
    pub data: QuadSet,
    pub addition: QuadSet,
    pub removal: QuadSet,
}

impl Partitions {
    pub fn get(&self, kind: PartitionKind) -> &QuadSet {
        match kind {
            PartitionKind::Data => &self.data,
            PartitionKind::Addition => &self.addition,
            PartitionKind::Removal => &self.removal,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len() + self.addition.len() + self.removal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Single pass over `quads`; input order is kept within each partition.
pub fn partition<I>(quads: I, markers: &PartitionMarkers) -> Partitions
where
    I: IntoIterator<Item = Quad>,
{
    let mut out = Partitions::default();
    for quad in quads {
        match classify(&quad, markers) {
            PartitionKind::Data => out.data.push(quad),
            PartitionKind::Addition => out.addition.push(quad),
            PartitionKind::Removal => out.removal.push(quad),
        }
    }
    tracing::debug!(
        data = out.data.len(),
        addition = out.addition.len(),
        removal = out.removal.len(),
        "partitioned quads"
    );
    out
}
