//! Minimal hitting sets.
//!
//! A hitting set of a family of sets is a set sharing at least one element
//! with every set of the family. Minimal hitting sets are the repairs of a
//! single conclusion derived by one premise-less inference per set of the
//! family, justified by this set.
use std::{hash::Hash, marker::PhantomData};

use hashbrown::HashSet;
use pinpoint_core::{Inference, Justifier, Proof};

use crate::{
	Error, InterruptMonitor, Listener, MinimalSubsetEnumerator, NoInterruption,
	PriorityComparator, Stats, TopDownRepairComputation,
};

/// Premise-less inference of the unit conclusion, justified by a set of
/// the family.
#[derive(Debug, Clone, Copy)]
pub struct SetInference<'a, E> {
	set: &'a [E],
}

impl<'a, E> SetInference<'a, E> {
	pub fn set(&self) -> &'a [E] {
		self.set
	}
}

impl<'a, E> Inference for SetInference<'a, E> {
	type Conclusion = ();

	fn conclusion(&self) -> &() {
		&()
	}

	fn premises(&self) -> &[()] {
		&[]
	}
}

/// Proof of the unit conclusion with one inference per set of a family.
pub struct SetFamilyProof<'a, E> {
	inferences: Vec<SetInference<'a, E>>,
}

impl<'a, E> SetFamilyProof<'a, E> {
	pub fn new(family: &'a [Vec<E>]) -> Self {
		Self {
			inferences: family.iter().map(|set| SetInference { set }).collect(),
		}
	}
}

impl<'a, E> Proof for SetFamilyProof<'a, E> {
	type Conclusion = ();
	type Inference = SetInference<'a, E>;

	fn inferences(&self, _conclusion: &()) -> &[SetInference<'a, E>] {
		&self.inferences
	}
}

/// Justifies set inferences by their set.
#[derive(Debug, Default, Clone, Copy)]
pub struct SetJustifier;

impl<'a, E: Clone + Eq + Hash> Justifier<SetInference<'a, E>> for SetJustifier {
	type Axiom = E;

	fn justification<'b>(&'b self, inference: &'b SetInference<'a, E>) -> &'b [E] {
		inference.set
	}
}

/// Minimal hitting set enumerator.
///
/// Enumerates the minimal hitting sets of the queried family. The empty
/// family has the empty set as unique minimal hitting set, while a family
/// containing the empty set has none.
pub struct MinimalHittingSetEnumerator<E, M = NoInterruption> {
	monitor: M,
	stats: Stats,
	element: PhantomData<E>,
}

impl<E> MinimalHittingSetEnumerator<E> {
	pub fn new() -> Self {
		Self::with_monitor(NoInterruption)
	}
}

impl<E> Default for MinimalHittingSetEnumerator<E> {
	fn default() -> Self {
		Self::new()
	}
}

impl<E, M> MinimalHittingSetEnumerator<E, M> {
	pub fn with_monitor(monitor: M) -> Self {
		Self {
			monitor,
			stats: Stats::default(),
			element: PhantomData,
		}
	}
}

impl<E: Clone + Eq + Hash, M: InterruptMonitor> MinimalSubsetEnumerator<[Vec<E>]>
	for MinimalHittingSetEnumerator<E, M>
{
	type Element = E;

	fn enumerate_by<L, C>(&mut self, family: &[Vec<E>], listener: &mut L, comparator: &C) -> Result<(), Error>
	where
		L: Listener<E>,
		C: PriorityComparator<E>,
	{
		let proof = SetFamilyProof::new(family);
		let mut repairs = TopDownRepairComputation::with_monitor(&proof, SetJustifier, &self.monitor);
		let result = repairs.enumerate_by(&(), listener, comparator);

		let stats = repairs.stats();
		self.stats.produced += stats.produced;
		self.stats.minimal += stats.minimal;
		self.stats.reported += stats.reported;

		result
	}

	fn stats(&self) -> Stats {
		self.stats
	}
}

/// Computes the minimal hitting sets of the given family, smallest first.
pub fn minimal_hitting_sets<E: Clone + Eq + Hash>(
	family: &[Vec<E>],
) -> Result<Vec<HashSet<E>>, Error> {
	MinimalHittingSetEnumerator::new().collect(family)
}
