//! Slot-indexed node table
//!
//! Every distinct id seen in the left-sorted file gets a stable slot `0..n`
//! in first-encounter order. Per-node state lives in plain vectors indexed by
//! that slot, so the iterators touch contiguous memory instead of hashing.

use super::types::{IdKind, NodeId};
use crate::error::{DankerError, DankerResult};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

pub(crate) type SlotIndex = IndexSet<NodeId, FxBuildHasher>;

/// Predecessor lists in Compressed Sparse Row form.
///
/// `sources[offsets[i]..offsets[i + 1]]` are the slots of every node linking
/// to slot `i`, one entry per edge (parallel edges repeat), in the order the
/// edges appeared in the left-sorted file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Adjacency {
    /// Offsets into `sources`. Size = node_count + 1
    offsets: Vec<usize>,
    /// Contiguous array of predecessor slots
    sources: Vec<u32>,
}

impl Adjacency {
    /// Flatten per-target predecessor lists into CSR.
    pub fn from_lists(lists: Vec<Vec<u32>>) -> Self {
        let mut offsets = Vec::with_capacity(lists.len() + 1);
        let mut sources = Vec::with_capacity(lists.iter().map(Vec::len).sum());

        offsets.push(0);
        for predecessors in lists {
            sources.extend(predecessors);
            offsets.push(sources.len());
        }

        Self { offsets, sources }
    }

    /// Predecessor slots of `slot`
    pub fn predecessors(&self, slot: usize) -> &[u32] {
        let start = self.offsets[slot];
        let end = self.offsets[slot + 1];
        &self.sources[start..end]
    }

    /// Predecessor slices for every slot, in slot order
    pub fn predecessors_by_node(&self) -> impl Iterator<Item = &[u32]> + '_ {
        self.offsets
            .windows(2)
            .map(move |bounds| &self.sources[bounds[0]..bounds[1]])
    }

    /// Number of nodes covered
    pub fn node_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Total number of stored edges
    pub fn edge_count(&self) -> usize {
        self.sources.len()
    }
}

/// Mode-dependent per-node state
#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    /// Full predecessor lists for the in-memory iterator
    InMemory(Adjacency),
    /// One flag per node, raised once the node has a settled rank after the
    /// first streaming scan
    Streaming(Vec<bool>),
}

/// Two rank arrays used as an alternating double buffer.
///
/// Iteration `i` reads slot `i % 2` and writes slot `1 - i % 2`; after `n`
/// iterations the result lives in slot `n % 2`.
#[derive(Debug, Clone, PartialEq)]
pub struct RankBuffers {
    slots: [Vec<f64>; 2],
}

impl RankBuffers {
    pub fn new() -> Self {
        Self {
            slots: [Vec::new(), Vec::new()],
        }
    }

    pub const fn read_slot(iteration: usize) -> usize {
        iteration % 2
    }

    pub const fn write_slot(iteration: usize) -> usize {
        1 - iteration % 2
    }

    pub const fn final_slot(iterations: usize) -> usize {
        iterations % 2
    }

    fn push(&mut self, value: f64) {
        self.slots[0].push(value);
        self.slots[1].push(value);
    }

    pub fn slot(&self, index: usize) -> &[f64] {
        &self.slots[index]
    }

    /// Borrow the read slot immutably and the other slot mutably.
    pub fn split(&mut self, read: usize) -> (&[f64], &mut [f64]) {
        let [first, second] = &mut self.slots;
        if read == 0 {
            (first.as_slice(), second.as_mut_slice())
        } else {
            (second.as_slice(), first.as_mut_slice())
        }
    }

    /// Set both buffers of one node
    pub fn settle(&mut self, node: usize, value: f64) {
        self.slots[0][node] = value;
        self.slots[1][node] = value;
    }

    pub fn len(&self) -> usize {
        self.slots[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots[0].is_empty()
    }

    /// Give up the buffer holding the final ranks.
    pub fn into_slot(self, index: usize) -> Vec<f64> {
        let [first, second] = self.slots;
        if index == 0 {
            first
        } else {
            second
        }
    }
}

impl Default for RankBuffers {
    fn default() -> Self {
        Self::new()
    }
}

/// Disjoint borrows of a [`NodeTable`]: ids and degrees are read-only once
/// indexing is done, ranks and layout are what a round mutates.
pub(crate) struct TableParts<'a> {
    pub ids: &'a SlotIndex,
    pub out_degree: &'a [u32],
    pub ranks: &'a mut RankBuffers,
    pub layout: &'a mut Layout,
}

/// The node table threaded from the indexer into one iterator.
#[derive(Debug, Clone)]
pub struct NodeTable {
    kind: IdKind,
    start_value: f64,
    ids: SlotIndex,
    out_degree: Vec<u32>,
    ranks: RankBuffers,
    layout: Layout,
}

impl NodeTable {
    /// Create an empty in-memory table (adjacency attached after indexing)
    pub fn in_memory(kind: IdKind, start_value: f64) -> Self {
        Self::with_layout(kind, start_value, Layout::InMemory(Adjacency::default()))
    }

    /// Create an empty streaming table
    pub fn streaming(kind: IdKind, start_value: f64) -> Self {
        Self::with_layout(kind, start_value, Layout::Streaming(Vec::new()))
    }

    fn with_layout(kind: IdKind, start_value: f64, layout: Layout) -> Self {
        Self {
            kind,
            start_value,
            ids: SlotIndex::default(),
            out_degree: Vec::new(),
            ranks: RankBuffers::new(),
            layout,
        }
    }

    pub fn kind(&self) -> IdKind {
        self.kind
    }

    pub fn start_value(&self) -> f64 {
        self.start_value
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Slot of an id, if it has been seen
    pub fn slot(&self, id: &NodeId) -> Option<usize> {
        self.ids.get_index_of(id)
    }

    /// Id stored at a slot
    pub fn id(&self, slot: usize) -> Option<&NodeId> {
        self.ids.get_index(slot)
    }

    /// Ids in slot order
    pub fn ids(&self) -> impl Iterator<Item = &NodeId> {
        self.ids.iter()
    }

    /// Return the slot of `id`, creating a record seeded with the start value
    /// when it is new.
    pub fn insert(&mut self, id: NodeId) -> DankerResult<usize> {
        if let Some(slot) = self.ids.get_index_of(&id) {
            return Ok(slot);
        }
        if self.ids.len() >= u32::MAX as usize {
            return Err(DankerError::InvalidArgument(format!(
                "node table is full ({} nodes)",
                self.ids.len()
            )));
        }

        let (slot, _) = self.ids.insert_full(id);
        self.out_degree.push(0);
        self.ranks.push(self.start_value);
        if let Layout::Streaming(touched) = &mut self.layout {
            touched.push(false);
        }
        Ok(slot)
    }

    pub fn out_degree(&self, slot: usize) -> u32 {
        self.out_degree[slot]
    }

    pub fn out_degrees(&self) -> &[u32] {
        &self.out_degree
    }

    /// Out-degrees are committed once by the indexer.
    pub(crate) fn set_out_degree(&mut self, slot: usize, count: u32) {
        self.out_degree[slot] = count;
    }

    pub(crate) fn attach_adjacency(&mut self, adjacency: Adjacency) {
        self.layout = Layout::InMemory(adjacency);
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn adjacency(&self) -> Option<&Adjacency> {
        match &self.layout {
            Layout::InMemory(adjacency) => Some(adjacency),
            Layout::Streaming(_) => None,
        }
    }

    pub fn ranks(&self) -> &RankBuffers {
        &self.ranks
    }

    /// Split-borrow the pieces an iterator round needs at once.
    pub(crate) fn parts_mut(&mut self) -> TableParts<'_> {
        TableParts {
            ids: &self.ids,
            out_degree: &self.out_degree,
            ranks: &mut self.ranks,
            layout: &mut self.layout,
        }
    }

    /// Consume the table, keeping ids and the chosen rank buffer.
    pub(crate) fn into_ranks(self, final_slot: usize) -> (SlotIndex, Vec<f64>) {
        (self.ids, self.ranks.into_slot(final_slot))
    }
}
