//! Set algebra over sorted identifier arrays.
//!
//! Every function here expects its inputs sorted in increasing order without
//! duplicates, and preserves this invariant on its outputs.
use std::{cmp::Ordering, fmt, hash::Hash};

use hashbrown::HashSet;
use smallvec::SmallVec;

use crate::{Id, IdMap};

/// Sorted array of unique identifiers.
pub type SortedIds = SmallVec<[Id; 4]>;

/// Collects the given identifiers into a sorted array, removing duplicates.
pub fn sorted_ids(ids: impl IntoIterator<Item = Id>) -> SortedIds {
	let mut result: SortedIds = ids.into_iter().collect();
	result.sort_unstable();
	result.dedup();
	result
}

pub fn contains(ids: &[Id], id: Id) -> bool {
	ids.binary_search(&id).is_ok()
}

/// Checks that `sub` is a subset of `sup`.
pub fn contains_all(sup: &[Id], sub: &[Id]) -> bool {
	if sub.len() > sup.len() {
		return false;
	}

	let mut i = 0;
	for &id in sub {
		loop {
			match sup.get(i) {
				Some(other) => match other.cmp(&id) {
					Ordering::Less => i += 1,
					Ordering::Equal => {
						i += 1;
						break;
					}
					Ordering::Greater => return false,
				},
				None => return false,
			}
		}
	}

	true
}

pub fn union(a: &[Id], b: &[Id]) -> SortedIds {
	let mut result = SortedIds::with_capacity(a.len() + b.len());
	let (mut i, mut j) = (0, 0);

	while i < a.len() && j < b.len() {
		match a[i].cmp(&b[j]) {
			Ordering::Less => {
				result.push(a[i]);
				i += 1
			}
			Ordering::Greater => {
				result.push(b[j]);
				j += 1
			}
			Ordering::Equal => {
				result.push(a[i]);
				i += 1;
				j += 1
			}
		}
	}

	result.extend_from_slice(&a[i..]);
	result.extend_from_slice(&b[j..]);
	result
}

/// Number of elements in the union of `a` and `b`, without building it.
pub fn union_len(a: &[Id], b: &[Id]) -> usize {
	let (mut i, mut j, mut len) = (0, 0, 0);

	while i < a.len() && j < b.len() {
		match a[i].cmp(&b[j]) {
			Ordering::Less => i += 1,
			Ordering::Greater => j += 1,
			Ordering::Equal => {
				i += 1;
				j += 1
			}
		}

		len += 1
	}

	len + (a.len() - i) + (b.len() - j)
}

pub fn with(ids: &[Id], id: Id) -> SortedIds {
	let mut result = SortedIds::from_slice(ids);
	if let Err(i) = result.binary_search(&id) {
		result.insert(i, id)
	}

	result
}

pub fn without(ids: &[Id], id: Id) -> SortedIds {
	ids.iter().copied().filter(|other| *other != id).collect()
}

/// Borrowed view of a sorted identifier array as a set of elements.
///
/// This is how engines expose their internal sets (justifications,
/// repairs) to callers without materializing them.
pub struct IdSet<'a, T> {
	ids: &'a [Id],
	table: &'a IdMap<T>,
}

impl<'a, T> IdSet<'a, T> {
	pub fn new(ids: &'a [Id], table: &'a IdMap<T>) -> Self {
		Self { ids, table }
	}

	pub fn len(&self) -> usize {
		self.ids.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}

	pub fn ids(&self) -> &'a [Id] {
		self.ids
	}

	pub fn iter(&self) -> impl 'a + Iterator<Item = &'a T> {
		let table = self.table;
		self.ids.iter().map(move |id| &table[*id])
	}
}

impl<'a, T: Eq + Hash> IdSet<'a, T> {
	pub fn contains(&self, t: &T) -> bool {
		match self.table.get(t) {
			Some(id) => contains(self.ids, id),
			None => false,
		}
	}

	pub fn to_set(&self) -> HashSet<T>
	where
		T: Clone,
	{
		self.iter().cloned().collect()
	}
}

impl<'a, T> Clone for IdSet<'a, T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<'a, T> Copy for IdSet<'a, T> {}

impl<'a, T: fmt::Debug> fmt::Debug for IdSet<'a, T> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_set().entries(self.iter()).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ids(values: &[u32]) -> SortedIds {
		sorted_ids(values.iter().copied().map(Id))
	}

	#[test]
	fn sorting_removes_duplicates() {
		assert_eq!(ids(&[3, 1, 3, 2, 1]).as_slice(), ids(&[1, 2, 3]).as_slice())
	}

	#[test]
	fn merge_union() {
		let u = union(&ids(&[1, 3, 5]), &ids(&[2, 3, 6]));
		assert_eq!(u.as_slice(), ids(&[1, 2, 3, 5, 6]).as_slice());
		assert_eq!(union_len(&ids(&[1, 3, 5]), &ids(&[2, 3, 6])), 5);
		assert_eq!(union_len(&ids(&[]), &ids(&[2])), 1);
	}

	#[test]
	fn subset_check() {
		assert!(contains_all(&ids(&[1, 2, 3, 4]), &ids(&[2, 4])));
		assert!(contains_all(&ids(&[1, 2]), &ids(&[])));
		assert!(!contains_all(&ids(&[1, 2, 3]), &ids(&[0, 2])));
		assert!(!contains_all(&ids(&[1, 2, 3]), &ids(&[3, 4])));
		assert!(!contains_all(&ids(&[1]), &ids(&[1, 2])));
	}

	#[test]
	fn insertion_and_removal() {
		assert_eq!(with(&ids(&[1, 4]), Id(2)).as_slice(), ids(&[1, 2, 4]).as_slice());
		assert_eq!(with(&ids(&[1, 4]), Id(4)).as_slice(), ids(&[1, 4]).as_slice());
		assert_eq!(without(&ids(&[1, 2, 4]), Id(2)).as_slice(), ids(&[1, 4]).as_slice());
	}

	#[test]
	fn id_set_view() {
		let mut table = IdMap::new();
		let a = table.insert('a');
		let _b = table.insert('b');
		let c = table.insert('c');
		let set_ids = sorted_ids([c, a]);
		let set = IdSet::new(&set_ids, &table);
		assert_eq!(set.len(), 2);
		assert!(set.contains(&'a'));
		assert!(!set.contains(&'b'));
		assert!(!set.contains(&'z'));
		assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec!['a', 'c']);
	}
}
