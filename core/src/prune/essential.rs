use hashbrown::{HashMap, HashSet};

use crate::{essential_conclusions, expand, Inference, Proof};

/// Proof pruned from the inferences not needed to derive a goal from its
/// essential axioms.
///
/// When the goal is derivable from the essential axioms, the conclusions
/// it depends on only keep the inferences applicable from them. Every
/// other conclusion keeps its inferences.
///
/// Pruning the pruned proof again for the same goal gives the same
/// inferences, derivable conclusions and essential axioms. The essential
/// conclusions may grow once, since pruning removes alternative
/// derivations, and are stable afterwards.
pub struct EssentialPruned<P: Proof> {
	delegate: P,
	essential: HashSet<P::Conclusion>,
	derivable: HashSet<P::Conclusion>,
	expanded: HashMap<P::Conclusion, Vec<P::Inference>>,
}

impl<P: Proof> EssentialPruned<P>
where
	P::Inference: Clone,
{
	pub fn new(delegate: P, goal: &P::Conclusion) -> Self {
		let essential = essential_conclusions(&delegate, goal);
		let mut reached = HashSet::new();
		let mut applied: HashMap<_, Vec<_>> = HashMap::new();

		expand(
			&mut reached,
			&delegate,
			goal,
			|i| !i.is_asserted() || essential.contains(i.conclusion()),
			|i| {
				applied
					.entry(i.conclusion().clone())
					.or_default()
					.push(i.clone())
			},
		);

		// Only keep the conclusions the goal depends on.
		let mut derivable = HashSet::new();
		let mut expanded = HashMap::new();
		if reached.contains(goal) {
			let mut stack = vec![goal.clone()];
			derivable.insert(goal.clone());

			while let Some(conclusion) = stack.pop() {
				if let Some(inferences) = applied.remove(&conclusion) {
					for inference in &inferences {
						for premise in inference.premises() {
							if derivable.insert(premise.clone()) {
								stack.push(premise.clone())
							}
						}
					}

					expanded.insert(conclusion, inferences);
				}
			}
		}

		log::debug!(
			"{} essential conclusion(s), {} derivable from them",
			essential.len(),
			derivable.len()
		);

		Self {
			delegate,
			essential,
			derivable,
			expanded,
		}
	}
}

impl<P: Proof> EssentialPruned<P> {
	/// Conclusions without which the goal is not derivable.
	pub fn essential(&self) -> &HashSet<P::Conclusion> {
		&self.essential
	}

	/// Conclusions the goal depends on, derivable from the essential
	/// axioms.
	///
	/// Empty when the goal is not derivable from the essential axioms, in
	/// which case the pruned proof is the delegate.
	pub fn derivable(&self) -> &HashSet<P::Conclusion> {
		&self.derivable
	}

	pub fn delegate(&self) -> &P {
		&self.delegate
	}

	pub fn into_delegate(self) -> P {
		self.delegate
	}
}

impl<P: Proof> Proof for EssentialPruned<P> {
	type Conclusion = P::Conclusion;
	type Inference = P::Inference;

	fn inferences(&self, conclusion: &P::Conclusion) -> &[P::Inference] {
		match self.expanded.get(conclusion) {
			Some(inferences) => inferences,
			None => self.delegate.inferences(conclusion),
		}
	}
}
