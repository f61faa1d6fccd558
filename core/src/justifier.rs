//! Inference justifications.
//!
//! A justification is the set of axioms an inference rests on. It is
//! supplied by a [`Justifier`], independently from the proof itself.
use std::{fmt, hash::Hash};

use hashbrown::HashMap;

use crate::{proof::display_inference, Inference};

/// Provides the justification of inferences.
pub trait Justifier<I: ?Sized> {
	type Axiom: Clone + Eq + Hash;

	/// Axioms the given inference rests on.
	///
	/// Duplicates are allowed and ignored.
	fn justification<'a>(&'a self, inference: &'a I) -> &'a [Self::Axiom];
}

impl<'j, I: ?Sized, J: ?Sized + Justifier<I>> Justifier<I> for &'j J {
	type Axiom = J::Axiom;

	fn justification<'a>(&'a self, inference: &'a I) -> &'a [Self::Axiom] {
		(**self).justification(inference)
	}
}

/// Inference carrying its own justification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JustifiedInference<C, A> {
	conclusion: C,
	premises: Vec<C>,
	justification: Vec<A>,
	asserted: bool,
}

impl<C, A> JustifiedInference<C, A> {
	pub fn new(conclusion: C, premises: Vec<C>, justification: Vec<A>) -> Self {
		Self {
			conclusion,
			premises,
			justification,
			asserted: false,
		}
	}

	/// Asserted inference justified by the given axioms.
	pub fn asserted(conclusion: C, justification: Vec<A>) -> Self {
		Self {
			conclusion,
			premises: Vec::new(),
			justification,
			asserted: true,
		}
	}

	pub fn justification(&self) -> &[A] {
		&self.justification
	}
}

impl<C, A> Inference for JustifiedInference<C, A> {
	type Conclusion = C;

	fn conclusion(&self) -> &C {
		&self.conclusion
	}

	fn premises(&self) -> &[C] {
		&self.premises
	}

	fn is_asserted(&self) -> bool {
		self.asserted
	}
}

impl<C: fmt::Display, A: fmt::Display> fmt::Display for JustifiedInference<C, A> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		display_inference(f, &self.conclusion, &self.premises, self.asserted)?;

		if !self.justification.is_empty() {
			write!(f, " [")?;
			for (i, axiom) in self.justification.iter().enumerate() {
				if i > 0 {
					write!(f, ", ")?;
				}

				axiom.fmt(f)?;
			}
			write!(f, "]")?;
		}

		Ok(())
	}
}

/// Justifies [`JustifiedInference`]s by their own justification.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineJustifier;

impl<C, A: Clone + Eq + Hash> Justifier<JustifiedInference<C, A>> for InlineJustifier {
	type Axiom = A;

	fn justification<'a>(&'a self, inference: &'a JustifiedInference<C, A>) -> &'a [A] {
		&inference.justification
	}
}

/// Justifies inferences using a map, falling back to a default
/// justification for inferences absent from the map.
pub struct MapJustifier<I, A> {
	justifications: HashMap<I, Vec<A>>,
	default: Vec<A>,
}

impl<I, A> MapJustifier<I, A> {
	pub fn new(justifications: HashMap<I, Vec<A>>, default: Vec<A>) -> Self {
		Self {
			justifications,
			default,
		}
	}
}

impl<I: Eq + Hash, A: Clone + Eq + Hash> Justifier<I> for MapJustifier<I, A> {
	type Axiom = A;

	fn justification<'a>(&'a self, inference: &'a I) -> &'a [A] {
		self.justifications
			.get(inference)
			.unwrap_or(&self.default)
	}
}

/// Justifies asserted inferences by their conclusion, and every other
/// inference by the empty set.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssertedConclusionJustifier;

impl<I: Inference> Justifier<I> for AssertedConclusionJustifier
where
	I::Conclusion: Clone + Eq + Hash,
{
	type Axiom = I::Conclusion;

	fn justification<'a>(&'a self, inference: &'a I) -> &'a [I::Conclusion] {
		if inference.is_asserted() {
			std::slice::from_ref(inference.conclusion())
		} else {
			&[]
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::BaseInference;

	#[test]
	fn asserted_conclusions_justify_themselves() {
		let asserted = BaseInference::asserted("A");
		let derived = BaseInference::new("B", vec!["A"]);
		assert_eq!(AssertedConclusionJustifier.justification(&asserted), &["A"]);
		assert!(AssertedConclusionJustifier.justification(&derived).is_empty());
	}

	#[test]
	fn map_justifier_falls_back_to_default() {
		let a = BaseInference::new(1, vec![]);
		let b = BaseInference::new(2, vec![1]);
		let mut map = HashMap::new();
		map.insert(a.clone(), vec!['x', 'y']);
		let justifier = MapJustifier::new(map, vec!['z']);
		assert_eq!(justifier.justification(&a), &['x', 'y']);
		assert_eq!(justifier.justification(&b), &['z']);
	}

	#[test]
	fn inline_justification() {
		let inference = JustifiedInference::new("B", vec!["A"], vec![1, 2]);
		assert_eq!(InlineJustifier.justification(&inference), &[1, 2]);
		assert_eq!(inference.to_string(), "B <- A [1, 2]");
	}
}
