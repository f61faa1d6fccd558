use hashbrown::{HashMap, HashSet};

use super::{filtered, is_not_asserted};
use crate::{expand, unfold_recursively, Inference, Proof};

/// Proof restricted to the union of the justifications of a goal.
///
/// Conclusions derivable from the union keep the inferences applicable
/// from it. Axioms of the union keep their inferences whose premises are
/// all in the union. Conclusions outside the union lose their assertions.
pub struct JustificationPruned<P: Proof> {
	delegate: P,
	kept: HashMap<P::Conclusion, Vec<P::Inference>>,
}

impl<P: Proof> JustificationPruned<P>
where
	P::Inference: Clone + PartialEq,
{
	pub fn new(delegate: P, goal: &P::Conclusion, axioms: &HashSet<P::Conclusion>) -> Self {
		let mut derivable = axioms.clone();
		let mut kept: HashMap<_, Vec<_>> = HashMap::new();

		expand(&mut derivable, &delegate, goal, is_not_asserted, |i| {
			kept.entry(i.conclusion().clone())
				.or_default()
				.push(i.clone())
		});

		for axiom in axioms {
			for inference in delegate.inferences(axiom) {
				if inference.premises().iter().all(|p| axioms.contains(p)) {
					let list = kept.entry(axiom.clone()).or_default();
					if !list.contains(inference) {
						list.push(inference.clone())
					}
				}
			}
		}

		for conclusion in unfold_recursively(&delegate, goal, |_| ()) {
			if !kept.contains_key(&conclusion)
				&& !axioms.contains(&conclusion)
				&& delegate
					.inferences(&conclusion)
					.iter()
					.any(Inference::is_asserted)
			{
				let inferences = filtered(&delegate, &conclusion, is_not_asserted);
				kept.insert(conclusion, inferences);
			}
		}

		Self { delegate, kept }
	}
}

impl<P: Proof> JustificationPruned<P> {
	/// Inferences kept by the pruning.
	pub fn kept(&self) -> impl '_ + Iterator<Item = &P::Inference> {
		self.kept.values().flatten()
	}

	pub fn delegate(&self) -> &P {
		&self.delegate
	}
}

impl<P: Proof> Proof for JustificationPruned<P> {
	type Conclusion = P::Conclusion;
	type Inference = P::Inference;

	fn inferences(&self, conclusion: &P::Conclusion) -> &[P::Inference] {
		match self.kept.get(conclusion) {
			Some(inferences) => inferences,
			None => self.delegate.inferences(conclusion),
		}
	}
}
