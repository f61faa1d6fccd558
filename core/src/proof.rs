//! Proof graph model.
//!
//! A [`Proof`] maps each conclusion to the [`Inference`]s deriving it. It is
//! read-only from the point of view of the engines, and may be cyclic.
use std::hash::Hash;

mod base;
mod traversal;

pub use base::*;
pub use traversal::*;

/// Derivation step.
pub trait Inference {
	type Conclusion;

	fn conclusion(&self) -> &Self::Conclusion;

	/// Ordered premises, possibly empty.
	fn premises(&self) -> &[Self::Conclusion];

	/// Checks if this inference asserts its conclusion as an axiom of the
	/// input.
	///
	/// Asserted inferences have no premises.
	fn is_asserted(&self) -> bool {
		false
	}
}

impl<'a, I: ?Sized + Inference> Inference for &'a I {
	type Conclusion = I::Conclusion;

	fn conclusion(&self) -> &Self::Conclusion {
		(**self).conclusion()
	}

	fn premises(&self) -> &[Self::Conclusion] {
		(**self).premises()
	}

	fn is_asserted(&self) -> bool {
		(**self).is_asserted()
	}
}

/// Inference base.
pub trait Proof {
	type Conclusion: Clone + Eq + Hash;

	type Inference: Inference<Conclusion = Self::Conclusion>;

	/// Returns the inferences deriving the given conclusion.
	///
	/// The result must not change for as long as the proof is borrowed.
	fn inferences(&self, conclusion: &Self::Conclusion) -> &[Self::Inference];
}

impl<'a, P: ?Sized + Proof> Proof for &'a P {
	type Conclusion = P::Conclusion;
	type Inference = P::Inference;

	fn inferences(&self, conclusion: &Self::Conclusion) -> &[Self::Inference] {
		(**self).inferences(conclusion)
	}
}

impl<P: ?Sized + Proof> Proof for Box<P> {
	type Conclusion = P::Conclusion;
	type Inference = P::Inference;

	fn inferences(&self, conclusion: &Self::Conclusion) -> &[Self::Inference] {
		(**self).inferences(conclusion)
	}
}

/// Conclusion type of a proof.
pub type ConclusionOf<P> = <P as Proof>::Conclusion;

/// Inference type of a proof.
pub type InferenceOf<P> = <P as Proof>::Inference;
