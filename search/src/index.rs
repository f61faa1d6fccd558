//! Minimality index.
//!
//! Antichain of sets under inclusion, answering "is there a stored subset
//! of this set" without scanning every stored set.
//!
//! Sets are stored as sorted keys in a trie. Each node keeps the bitwise
//! AND and OR of the signatures of the keys stored below it, so that whole
//! branches can be skipped when they cannot contain a subset (resp.
//! superset) of the queried key.
use hashbrown::HashMap;
use pinpoint_core::Id;
use slab::Slab;

/// Sorted key element.
pub type Key = u64;

struct Node {
	children: HashMap<Key, usize>,
	parent: Option<(usize, Key)>,

	/// This node ends a stored key.
	terminal: bool,

	/// Number of stored keys in this subtree.
	count: usize,

	/// AND of the signatures of the keys stored below.
	///
	/// Only grows stale (smaller) when keys are removed.
	all: u64,

	/// OR of the signatures of the keys stored below.
	///
	/// Only grows stale (larger) when keys are removed.
	any: u64,
}

impl Node {
	fn new(parent: Option<(usize, Key)>) -> Self {
		Self {
			children: HashMap::new(),
			parent,
			terminal: false,
			count: 0,
			all: u64::MAX,
			any: 0,
		}
	}
}

fn signature(key: &[Key]) -> u64 {
	key.iter().fold(0, |sig, e| {
		sig | 1 << (e.wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 58)
	})
}

/// Encodes the given identifier sets into a single sorted key.
///
/// Each set is tagged with its position, so that the inclusion of two
/// encoded keys is the component-wise inclusion of the sets.
pub fn encode(parts: &[&[Id]]) -> Vec<Key> {
	let n = parts.len() as Key;
	let mut key: Vec<Key> = parts
		.iter()
		.enumerate()
		.flat_map(|(tag, ids)| {
			ids.iter()
				.map(move |id| id.0 as Key * n + tag as Key)
		})
		.collect();
	key.sort_unstable();
	key.dedup();
	key
}

/// Set of keys where no key is a subset of another.
pub struct MinimalityIndex {
	nodes: Slab<Node>,
	root: usize,
}

impl Default for MinimalityIndex {
	fn default() -> Self {
		Self::new()
	}
}

impl MinimalityIndex {
	pub fn new() -> Self {
		let mut nodes = Slab::new();
		let root = nodes.insert(Node::new(None));
		Self { nodes, root }
	}

	/// Number of stored keys.
	pub fn len(&self) -> usize {
		self.nodes[self.root].count
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Number of trie nodes, including the root.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn clear(&mut self) {
		*self = Self::new()
	}

	/// Checks that no stored key is a subset of `key`.
	///
	/// The key must be sorted, without duplicates.
	pub fn is_minimal(&self, key: &[Key]) -> bool {
		let sig = signature(key);
		let mut stack = vec![(self.root, 0)];

		while let Some((n, pos)) = stack.pop() {
			let node = &self.nodes[n];
			if node.terminal {
				return false;
			}

			for (i, e) in key.iter().enumerate().skip(pos) {
				if let Some(&c) = node.children.get(e) {
					let child = &self.nodes[c];
					if child.count > 0 && child.all & !sig == 0 {
						stack.push((c, i + 1))
					}
				}
			}
		}

		true
	}

	/// Adds the given key, removing every stored superset of it.
	///
	/// Returns the number of removed keys.
	pub fn add(&mut self, key: &[Key]) -> usize {
		let removed = self.remove_supersets(key);

		let sig = signature(key);
		let mut n = self.root;
		self.visit(n, sig);
		for &e in key {
			n = match self.nodes[n].children.get(&e) {
				Some(&c) => c,
				None => {
					let c = self.nodes.insert(Node::new(Some((n, e))));
					self.nodes[n].children.insert(e, c);
					c
				}
			};

			self.visit(n, sig)
		}

		self.nodes[n].terminal = true;
		removed
	}

	fn visit(&mut self, n: usize, sig: u64) {
		let node = &mut self.nodes[n];
		node.count += 1;
		node.all &= sig;
		node.any |= sig;
	}

	fn remove_supersets(&mut self, key: &[Key]) -> usize {
		let sig = signature(key);
		let mut found = Vec::new();
		let mut stack = vec![(self.root, 0)];

		while let Some((n, matched)) = stack.pop() {
			let node = &self.nodes[n];
			if node.terminal && matched == key.len() {
				found.push(n)
			}

			for (&e, &c) in &node.children {
				let child = &self.nodes[c];
				if child.count == 0 || sig & !child.any != 0 {
					continue;
				}

				match key.get(matched) {
					None => stack.push((c, matched)),
					Some(&next) if e < next => stack.push((c, matched)),
					Some(&next) if e == next => stack.push((c, matched + 1)),
					Some(_) => (),
				}
			}
		}

		for &n in &found {
			self.unmark(n)
		}

		found.len()
	}

	/// Removes the key ending at the given terminal node, and the nodes
	/// left without keys.
	fn unmark(&mut self, n: usize) {
		self.nodes[n].terminal = false;

		let mut current = Some(n);
		while let Some(n) = current {
			let node = &mut self.nodes[n];
			node.count -= 1;
			let (parent, empty) = (node.parent, node.count == 0);
			current = parent.map(|(p, _)| p);

			if let Some((p, e)) = parent.filter(|_| empty) {
				self.nodes[p].children.remove(&e);
				self.nodes.remove(n);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn subsets_are_detected() {
		let mut index = MinimalityIndex::new();
		assert!(index.is_minimal(&[]));
		assert!(index.is_minimal(&[1, 2]));

		index.add(&[1, 3]);
		assert!(!index.is_minimal(&[1, 3]));
		assert!(!index.is_minimal(&[1, 2, 3]));
		assert!(index.is_minimal(&[1, 2]));
		assert!(index.is_minimal(&[3]));

		index.add(&[]);
		assert!(!index.is_minimal(&[3]));
		assert_eq!(index.len(), 1);
	}

	#[test]
	fn supersets_are_removed() {
		let mut index = MinimalityIndex::new();
		assert_eq!(index.add(&[1, 2, 3]), 0);
		assert_eq!(index.add(&[2, 4]), 0);
		assert_eq!(index.add(&[1, 5]), 0);
		assert_eq!(index.len(), 3);

		assert_eq!(index.add(&[2]), 2);
		assert_eq!(index.len(), 2);
		assert!(index.is_minimal(&[1, 3]));
		assert!(!index.is_minimal(&[2, 7]));
		assert!(!index.is_minimal(&[1, 5, 6]));
	}

	#[test]
	fn empty_nodes_are_reclaimed() {
		let mut index = MinimalityIndex::new();
		index.add(&[1, 2, 3]);
		index.add(&[1, 2, 4]);
		assert_eq!(index.node_count(), 5);
		index.add(&[1]);
		assert_eq!(index.node_count(), 2);
		index.clear();
		assert!(index.is_empty());
	}

	#[test]
	fn encoding_preserves_inclusion() {
		let a = encode(&[&[Id(1), Id(2)][..], &[Id(1)][..]]);
		let b = encode(&[&[Id(1), Id(2), Id(5)][..], &[Id(1), Id(3)][..]]);
		let c = encode(&[&[Id(1)][..], &[Id(1), Id(2)][..]]);

		let mut index = MinimalityIndex::new();
		index.add(&a);
		assert!(!index.is_minimal(&b));
		assert!(index.is_minimal(&c));
	}

	fn sets() -> impl Strategy<Value = Vec<Vec<Key>>> {
		proptest::collection::vec(proptest::collection::btree_set(0..12 as Key, 0..5), 0..24)
			.prop_map(|sets| sets.into_iter().map(|s| s.into_iter().collect()).collect())
	}

	fn is_subset(a: &[Key], b: &[Key]) -> bool {
		a.iter().all(|e| b.contains(e))
	}

	proptest! {
		#[test]
		fn behaves_like_an_antichain(sets in sets(), queries in sets()) {
			let mut index = MinimalityIndex::new();
			let mut antichain: Vec<Vec<Key>> = Vec::new();

			for set in &sets {
				let minimal = !antichain.iter().any(|s| is_subset(s, set));
				prop_assert_eq!(index.is_minimal(set), minimal);

				if minimal {
					let before = antichain.len();
					antichain.retain(|s| !is_subset(set, s));
					antichain.push(set.clone());
					prop_assert_eq!(index.add(set), before + 1 - antichain.len());
				}

				prop_assert_eq!(index.len(), antichain.len());
			}

			for query in &queries {
				let minimal = !antichain.iter().any(|s| is_subset(s, query));
				prop_assert_eq!(index.is_minimal(query), minimal);
			}
		}
	}
}
