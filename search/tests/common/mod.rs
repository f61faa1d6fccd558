#![allow(dead_code)]
use std::{fmt::Debug, hash::Hash};

use hashbrown::HashSet;
use pinpoint_core::{is_derivable, BaseProof, JustifiedInference};
use proptest::prelude::*;

pub type TestInference = JustifiedInference<u8, u8>;
pub type TestProof = BaseProof<TestInference>;

/// Sorts the given sets and their elements, for comparison.
pub fn normalize<T: Ord>(sets: impl IntoIterator<Item = HashSet<T>>) -> Vec<Vec<T>> {
	let mut result: Vec<Vec<T>> = sets
		.into_iter()
		.map(|set| {
			let mut set: Vec<T> = set.into_iter().collect();
			set.sort();
			set
		})
		.collect();
	result.sort();
	result
}

/// Keeps the sets that have no strict subset in the list.
fn minimal<T: Eq + Hash>(sets: Vec<HashSet<T>>) -> Vec<HashSet<T>> {
	let mut result: Vec<HashSet<T>> = Vec::new();
	for set in sets {
		if !result.iter().any(|other| other.is_subset(&set)) {
			result.retain(|other| !set.is_subset(other));
			result.push(set)
		}
	}

	result
}

/// Every subset of the given elements.
fn subsets<T: Clone + Eq + Hash>(elements: &[T]) -> impl '_ + Iterator<Item = HashSet<T>> {
	(0..(1u32 << elements.len())).map(move |mask| {
		elements
			.iter()
			.enumerate()
			.filter(|(i, _)| mask & (1 << i) != 0)
			.map(|(_, e)| e.clone())
			.collect()
	})
}

fn axioms(proof: &TestProof) -> Vec<u8> {
	let mut result: Vec<u8> = proof
		.iter()
		.flat_map(|i| i.justification().iter().copied())
		.collect();
	result.sort_unstable();
	result.dedup();
	result
}

fn restricted(proof: &TestProof, keep: impl Fn(&TestInference) -> bool) -> TestProof {
	proof.iter().filter(|i| keep(i)).cloned().collect()
}

/// Justifications computed by checking every subset of axioms.
pub fn brute_force_justifications(proof: &TestProof, goal: u8) -> Vec<HashSet<u8>> {
	let axioms = axioms(proof);
	minimal(
		subsets(&axioms)
			.filter(|set| {
				let p = restricted(proof, |i| i.justification().iter().all(|a| set.contains(a)));
				is_derivable(&p, &goal)
			})
			.collect(),
	)
}

/// Repairs computed by checking every subset of axioms.
pub fn brute_force_repairs(proof: &TestProof, goal: u8) -> Vec<HashSet<u8>> {
	let axioms = axioms(proof);
	minimal(
		subsets(&axioms)
			.filter(|set| {
				let p = restricted(proof, |i| !i.justification().iter().any(|a| set.contains(a)));
				!is_derivable(&p, &goal)
			})
			.collect(),
	)
}

/// Minimal hitting sets computed by checking every subset of elements.
pub fn brute_force_hitting_sets<T: Clone + Ord + Hash + Debug>(family: &[Vec<T>]) -> Vec<HashSet<T>> {
	let mut elements: Vec<T> = family.iter().flatten().cloned().collect();
	elements.sort();
	elements.dedup();
	minimal(
		subsets(&elements)
			.filter(|set| family.iter().all(|s| s.iter().any(|e| set.contains(e))))
			.collect(),
	)
}

/// Small random proofs over conclusions `0..5` and axioms `0..6`, possibly
/// cyclic.
pub fn arb_proof() -> impl Strategy<Value = TestProof> {
	proptest::collection::vec(
		(
			0..5u8,
			proptest::collection::vec(0..5u8, 0..3),
			proptest::collection::btree_set(0..6u8, 0..3),
		),
		0..10,
	)
	.prop_map(|inferences| {
		inferences
			.into_iter()
			.map(|(conclusion, premises, justification)| {
				JustifiedInference::new(conclusion, premises, justification.into_iter().collect())
			})
			.collect()
	})
}
