//! Label ⇄ id bimap
//!
//! The set position of a label *is* its node id, so the id range stays dense
//! as long as removals only ever pop the last entry.

use super::types::NodeId;
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

#[derive(Debug, Clone, Default)]
pub(crate) struct LabelMap {
    labels: IndexSet<String, FxBuildHasher>,
}

impl LabelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a label, returning its id and whether it was newly added.
    /// An existing label keeps its id.
    pub fn insert(&mut self, label: &str) -> (NodeId, bool) {
        if let Some(idx) = self.labels.get_index_of(label) {
            return (NodeId(idx), false);
        }
        let (idx, _) = self.labels.insert_full(label.to_owned());
        (NodeId(idx), true)
    }

    pub fn id_of(&self, label: &str) -> Option<NodeId> {
        self.labels.get_index_of(label).map(NodeId)
    }

    pub fn label_of(&self, id: NodeId) -> Option<&str> {
        self.labels.get_index(id.index()).map(String::as_str)
    }

    /// Exchange the labels held by two ids. Fails if either is out of range.
    pub fn swap(&mut self, a: NodeId, b: NodeId) -> bool {
        let len = self.labels.len();
        if a.index() >= len || b.index() >= len {
            return false;
        }
        self.labels.swap_indices(a.index(), b.index());
        true
    }

    /// Drop the entry at `id`, which must be the highest id.
    pub fn erase(&mut self, id: NodeId) -> bool {
        if self.labels.is_empty() || id.index() != self.labels.len() - 1 {
            return false;
        }
        self.labels.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &str)> + '_ {
        self.labels
            .iter()
            .enumerate()
            .map(|(idx, label)| (NodeId(idx), label.as_str()))
    }
}
