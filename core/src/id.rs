use std::{borrow::Borrow, fmt, hash::Hash};

use educe::Educe;
use indexmap::IndexSet;

/// Dense identifier.
///
/// Identifiers are handed out by an [`IdMap`] in order of first sight,
/// starting from `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(pub u32);

impl Id {
	pub fn index(&self) -> usize {
		self.0 as usize
	}
}

impl From<u32> for Id {
	fn from(value: u32) -> Self {
		Self(value)
	}
}

impl From<Id> for u32 {
	fn from(value: Id) -> Self {
		value.0
	}
}

impl fmt::Display for Id {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.0.fmt(f)
	}
}

/// Bidirectional identifier table.
///
/// Assigns a stable [`Id`] to each element the first time it is inserted.
/// Identifiers are never reused nor removed: a table lives as long as the
/// computation owning it.
#[derive(Educe, Clone)]
#[educe(Default)]
pub struct IdMap<T> {
	elements: IndexSet<T>,
}

impl<T> IdMap<T> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.elements.len()
	}

	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	/// Returns the element with the given identifier, if any.
	pub fn element(&self, id: Id) -> Option<&T> {
		self.elements.get_index(id.index())
	}

	pub fn iter(&self) -> impl Iterator<Item = (Id, &T)> {
		self.elements
			.iter()
			.enumerate()
			.map(|(i, t)| (Id(i as u32), t))
	}
}

impl<T: Eq + Hash> IdMap<T> {
	/// Returns the identifier of the given element, assigning a fresh one if
	/// the element was never seen before.
	pub fn insert(&mut self, t: T) -> Id {
		let (i, _) = self.elements.insert_full(t);
		Id(i as u32)
	}

	pub fn get<Q>(&self, t: &Q) -> Option<Id>
	where
		T: Borrow<Q>,
		Q: ?Sized + Eq + Hash,
	{
		self.elements.get_index_of(t).map(|i| Id(i as u32))
	}

	/// Same as [`Self::insert`], but only clones the element when it is not
	/// already in the table.
	pub fn insert_ref(&mut self, t: &T) -> Id
	where
		T: Clone,
	{
		match self.get(t) {
			Some(id) => id,
			None => self.insert(t.clone()),
		}
	}
}

impl<T> std::ops::Index<Id> for IdMap<T> {
	type Output = T;

	fn index(&self, id: Id) -> &Self::Output {
		self.element(id).unwrap()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ids_are_dense_and_stable() {
		let mut ids = IdMap::new();
		assert_eq!(ids.insert("a"), Id(0));
		assert_eq!(ids.insert("b"), Id(1));
		assert_eq!(ids.insert("a"), Id(0));
		assert_eq!(ids.len(), 2);
		assert_eq!(ids[Id(1)], "b");
		assert_eq!(ids.get("c"), None);
	}

	#[test]
	fn insert_ref_reuses_existing_ids() {
		let mut ids: IdMap<String> = IdMap::new();
		let a = ids.insert_ref(&"a".to_owned());
		let b = ids.insert_ref(&"b".to_owned());
		assert_eq!(ids.insert_ref(&"a".to_owned()), a);
		assert_ne!(a, b);
		assert_eq!(ids.get("b"), Some(b));
	}
}
