use std::hash::Hash;

use hashbrown::{HashMap, HashSet};

use super::filtered;
use crate::{unfold_recursively, DerivabilityChecker, Inference, Proof};

/// Proof pruned from its cyclic inferences.
///
/// An inference is cyclic when one of its premises is not derivable once
/// its conclusion is blocked. A conclusion with a cyclic inference only
/// keeps its non-cyclic inferences, possibly none.
pub struct CyclePruned<P: Proof> {
	delegate: P,
	cyclic: HashSet<P::Inference>,
	remaining: HashMap<P::Conclusion, Vec<P::Inference>>,
}

impl<P: Proof> CyclePruned<P>
where
	P::Inference: Clone + Eq + Hash,
{
	pub fn new(delegate: P, goal: &P::Conclusion) -> Self {
		let mut cyclic = HashSet::new();
		let mut checker = DerivabilityChecker::new(&delegate);

		unfold_recursively(&delegate, goal, |inference| {
			let conclusion = inference.conclusion();
			checker.block(conclusion.clone());

			if inference.premises().iter().any(|p| !checker.is_derivable(p)) {
				cyclic.insert(inference.clone());
			}

			checker.unblock(conclusion);
		});

		let mut remaining = HashMap::new();
		for inference in &cyclic {
			let conclusion = inference.conclusion();
			if !remaining.contains_key(conclusion) {
				let kept = filtered(&delegate, conclusion, |i| !cyclic.contains(i));
				remaining.insert(conclusion.clone(), kept);
			}
		}

		log::debug!("{} cyclic inference(s)", cyclic.len());

		Self {
			delegate,
			cyclic,
			remaining,
		}
	}
}

impl<P: Proof> CyclePruned<P> {
	/// Inferences found cyclic.
	pub fn cyclic(&self) -> &HashSet<P::Inference> {
		&self.cyclic
	}

	pub fn delegate(&self) -> &P {
		&self.delegate
	}

	pub fn into_delegate(self) -> P {
		self.delegate
	}
}

impl<P: Proof> Proof for CyclePruned<P> {
	type Conclusion = P::Conclusion;
	type Inference = P::Inference;

	fn inferences(&self, conclusion: &P::Conclusion) -> &[P::Inference] {
		match self.remaining.get(conclusion) {
			Some(inferences) => inferences,
			None => self.delegate.inferences(conclusion),
		}
	}
}
