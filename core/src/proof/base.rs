use std::{fmt, hash::Hash};

use derivative::Derivative;
use hashbrown::HashMap;

use super::{Inference, Proof};

/// Owned inference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseInference<C> {
	conclusion: C,
	premises: Vec<C>,
	asserted: bool,
}

impl<C> BaseInference<C> {
	pub fn new(conclusion: C, premises: Vec<C>) -> Self {
		Self {
			conclusion,
			premises,
			asserted: false,
		}
	}

	/// Creates an inference asserting the given conclusion.
	pub fn asserted(conclusion: C) -> Self {
		Self {
			conclusion,
			premises: Vec::new(),
			asserted: true,
		}
	}
}

impl<C> Inference for BaseInference<C> {
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

impl<C: fmt::Display> fmt::Display for BaseInference<C> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		display_inference(f, &self.conclusion, &self.premises, self.asserted)
	}
}

pub(crate) fn display_inference<C: fmt::Display>(
	f: &mut fmt::Formatter,
	conclusion: &C,
	premises: &[C],
	asserted: bool,
) -> fmt::Result {
	write!(f, "{conclusion} <-")?;

	if asserted {
		write!(f, " (asserted)")?;
	}

	for (i, premise) in premises.iter().enumerate() {
		if i == 0 {
			write!(f, " {premise}")?;
		} else {
			write!(f, ", {premise}")?;
		}
	}

	Ok(())
}

/// Owned inference base.
#[derive(Derivative)]
#[derivative(
	Default(bound = ""),
	Debug(bound = "I: fmt::Debug, I::Conclusion: fmt::Debug")
)]
pub struct BaseProof<I: Inference> {
	inferences: HashMap<I::Conclusion, Vec<I>>,
	len: usize,
}

impl<I: Inference> BaseProof<I>
where
	I::Conclusion: Clone + Eq + Hash,
{
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds an inference to the proof.
	pub fn produce(&mut self, inference: I) {
		self.inferences
			.entry(inference.conclusion().clone())
			.or_default()
			.push(inference);
		self.len += 1
	}

	/// Number of inferences.
	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	pub fn clear(&mut self) {
		self.inferences.clear();
		self.len = 0
	}

	/// Conclusions having at least one inference.
	pub fn conclusions(&self) -> impl Iterator<Item = &I::Conclusion> {
		self.inferences.keys()
	}

	pub fn iter(&self) -> impl Iterator<Item = &I> {
		self.inferences.values().flatten()
	}
}

impl<I: Inference> Proof for BaseProof<I>
where
	I::Conclusion: Clone + Eq + Hash,
{
	type Conclusion = I::Conclusion;
	type Inference = I;

	fn inferences(&self, conclusion: &I::Conclusion) -> &[I] {
		self.inferences
			.get(conclusion)
			.map(Vec::as_slice)
			.unwrap_or_default()
	}
}

impl<I: Inference> Extend<I> for BaseProof<I>
where
	I::Conclusion: Clone + Eq + Hash,
{
	fn extend<T: IntoIterator<Item = I>>(&mut self, iter: T) {
		for inference in iter {
			self.produce(inference)
		}
	}
}

impl<I: Inference> FromIterator<I> for BaseProof<I>
where
	I::Conclusion: Clone + Eq + Hash,
{
	fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
		let mut result = Self::new();
		result.extend(iter);
		result
	}
}
