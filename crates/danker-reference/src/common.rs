//! Link graph for the reference ranking
//!
//! Only what the power iteration reads is kept: each node's incoming links
//! in one flat array, and each node's number of outgoing links.

use std::collections::HashMap;

/// Node key type: the id token exactly as written in the edge file
pub type NodeKey = String;

/// Incoming links grouped by target, keyed by dense node index.
pub struct GraphView {
    keys: Vec<NodeKey>,
    index: HashMap<NodeKey, usize>,
    /// `sources[starts[v]..starts[v + 1]]` link to `v`
    starts: Vec<usize>,
    sources: Vec<usize>,
    out_degree: Vec<usize>,
}

impl GraphView {
    /// Build a view from `(source, target)` pairs in any order.
    ///
    /// Parallel edges are kept, so a node linking twice to the same target
    /// passes it twice the share.
    pub fn from_edges<S: AsRef<str>>(edges: &[(S, S)]) -> Self {
        let mut keys: Vec<NodeKey> = Vec::new();
        let mut index: HashMap<NodeKey, usize> = HashMap::new();
        let mut links = Vec::with_capacity(edges.len());
        for (source, target) in edges {
            let s = intern(&mut keys, &mut index, source.as_ref());
            let t = intern(&mut keys, &mut index, target.as_ref());
            links.push((s, t));
        }

        let n = keys.len();
        let mut out_degree = vec![0usize; n];
        let mut starts = vec![0usize; n + 1];
        for &(s, t) in &links {
            out_degree[s] += 1;
            starts[t + 1] += 1;
        }
        for v in 0..n {
            starts[v + 1] += starts[v];
        }

        // Fill each target's range front to back, keeping edge order
        let mut cursor = starts[..n].to_vec();
        let mut sources = vec![0usize; links.len()];
        for (s, t) in links {
            sources[cursor[t]] = s;
            cursor[t] += 1;
        }

        Self {
            keys,
            index,
            starts,
            sources,
            out_degree,
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn key(&self, idx: usize) -> &str {
        &self.keys[idx]
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_degree[idx]
    }

    /// Sources of the links into `idx`, one entry per link
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        &self.sources[self.starts[idx]..self.starts[idx + 1]]
    }

    /// True if some node has no outgoing edges
    pub fn has_dangling(&self) -> bool {
        self.out_degree.contains(&0)
    }
}

fn intern(keys: &mut Vec<NodeKey>, index: &mut HashMap<NodeKey, usize>, key: &str) -> usize {
    if let Some(&idx) = index.get(key) {
        return idx;
    }
    keys.push(key.to_string());
    index.insert(key.to_string(), keys.len() - 1);
    keys.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_edges() {
        let view = GraphView::from_edges(&[("a", "b"), ("c", "b"), ("a", "b"), ("b", "c")]);
        assert_eq!(view.len(), 3);
        let a = view.index_of("a").unwrap();
        let b = view.index_of("b").unwrap();
        let c = view.index_of("c").unwrap();
        assert_eq!(view.key(b), "b");
        assert_eq!(view.out_degree(a), 2);
        assert_eq!(view.predecessors(b), &[a, c, a]);
        assert_eq!(view.predecessors(c), &[b]);
        assert!(view.predecessors(a).is_empty());
        assert!(view.has_dangling());
    }
}
