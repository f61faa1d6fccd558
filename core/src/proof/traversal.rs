use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};

use super::{Inference, Proof};
use crate::DerivabilityChecker;

/// Recursively enumerates the inferences of the given proof starting from
/// the goal conclusion and proceeding to their premises.
///
/// The inferences of each conclusion are reported exactly once, even if the
/// conclusion appears as premise of several inferences.
///
/// Returns the set of conclusions whose inferences were enumerated.
pub fn unfold_recursively<'p, P: ?Sized + Proof>(
	proof: &'p P,
	goal: &P::Conclusion,
	mut producer: impl FnMut(&'p P::Inference),
) -> HashSet<P::Conclusion> {
	let mut result = HashSet::new();
	let mut queue = VecDeque::new();
	result.insert(goal.clone());
	queue.push_back(goal.clone());

	while let Some(next) = queue.pop_front() {
		for inference in proof.inferences(&next) {
			producer(inference);
			for premise in inference.premises() {
				if !result.contains(premise) {
					result.insert(premise.clone());
					queue.push_back(premise.clone());
				}
			}
		}
	}

	result
}

/// Number of inferences used to derive the given goal.
pub fn count_inferences<P: ?Sized + Proof>(proof: &P, goal: &P::Conclusion) -> usize {
	let mut count = 0;
	unfold_recursively(proof, goal, |_| count += 1);
	count
}

/// Checks if the given conclusion is derivable in the given proof.
pub fn is_derivable<P: ?Sized + Proof>(proof: &P, conclusion: &P::Conclusion) -> bool {
	DerivabilityChecker::new(proof).is_derivable(conclusion)
}

/// Computes the conclusions without which the goal would not be derivable
/// using the given inferences.
///
/// Every derivation of the goal uses every essential conclusion. The goal is
/// essential to itself.
pub fn essential_conclusions<P: ?Sized + Proof>(
	proof: &P,
	goal: &P::Conclusion,
) -> HashSet<P::Conclusion> {
	let mut result = HashSet::new();
	let mut checker = DerivabilityChecker::new(proof);

	for candidate in unfold_recursively(proof, goal, |_| ()) {
		checker.block(candidate.clone());
		if !checker.is_derivable(goal) {
			result.insert(candidate.clone());
		}
		checker.unblock(&candidate);
	}

	log::debug!("{} essential conclusion(s)", result.len());
	result
}

/// Essential conclusions that are asserted by some inference of the proof.
pub fn essential_axioms<P: ?Sized + Proof>(
	proof: &P,
	goal: &P::Conclusion,
) -> HashSet<P::Conclusion> {
	let mut result = essential_conclusions(proof, goal);
	result.retain(|c| proof.inferences(c).iter().any(Inference::is_asserted));
	result
}

/// Adds to the `derivable` set every conclusion derived from it using the
/// inferences of the proof that can be used to derive the goal.
///
/// Only the inferences accepted by `filter` are considered. Every applied
/// inference (all premises derivable) is reported to the producer, once.
pub fn expand<'p, P: ?Sized + Proof>(
	derivable: &mut HashSet<P::Conclusion>,
	proof: &'p P,
	goal: &P::Conclusion,
	filter: impl Fn(&P::Inference) -> bool,
	mut producer: impl FnMut(&'p P::Inference),
) {
	let relevant = relevant_inferences(proof, goal, &filter);

	// Number of distinct premises not yet derivable, for each inference.
	let mut missing = Vec::with_capacity(relevant.len());
	let mut watchers: HashMap<&P::Conclusion, Vec<usize>> = HashMap::new();
	let mut fired = Vec::new();

	for (i, inference) in relevant.iter().enumerate() {
		let mut premises = HashSet::new();
		for premise in inference.premises() {
			if !derivable.contains(premise) && premises.insert(premise) {
				watchers.entry(premise).or_default().push(i);
			}
		}

		if premises.is_empty() {
			fired.push(i)
		}

		missing.push(premises.len());
	}

	while let Some(i) = fired.pop() {
		let inference = relevant[i];
		producer(inference);

		let conclusion = inference.conclusion();
		if !derivable.contains(conclusion) {
			derivable.insert(conclusion.clone());

			if let Some(watching) = watchers.remove(conclusion) {
				for j in watching {
					missing[j] -= 1;
					if missing[j] == 0 {
						fired.push(j)
					}
				}
			}
		}
	}
}

/// Inferences reachable from the goal, going only through the inferences
/// accepted by the filter.
fn relevant_inferences<'p, P: ?Sized + Proof>(
	proof: &'p P,
	goal: &P::Conclusion,
	filter: impl Fn(&P::Inference) -> bool,
) -> Vec<&'p P::Inference> {
	let mut visited = HashSet::new();
	let mut queue = VecDeque::new();
	let mut result = Vec::new();
	visited.insert(goal.clone());
	queue.push_back(goal.clone());

	while let Some(next) = queue.pop_front() {
		for inference in proof.inferences(&next) {
			if filter(inference) {
				result.push(inference);
				for premise in inference.premises() {
					if !visited.contains(premise) {
						visited.insert(premise.clone());
						queue.push_back(premise.clone());
					}
				}
			}
		}
	}

	result
}
