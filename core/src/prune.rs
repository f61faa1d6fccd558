//! Proof pruning.
//!
//! Pruned proofs are views over a delegate proof, restricted to the
//! inferences relevant to a goal.
use std::{fmt, hash::Hash, str::FromStr};

use hashbrown::HashSet;

use crate::{Inference, Proof};

mod cycle;
mod essential;
mod justification;

pub use cycle::*;
pub use essential::*;
pub use justification::*;

/// Pruning strategy.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PruneType {
	#[default]
	None,

	/// Essential conclusions pruning.
	Essential,

	/// Cyclic inferences pruning.
	Cycle,

	/// Essential then cycle pruning.
	EssentialCycle,

	/// Essential, cycle then justification pruning.
	///
	/// Requires the union of the justifications of the goal.
	Justification,
}

impl PruneType {
	pub const ALL: [Self; 5] = [
		Self::None,
		Self::Essential,
		Self::Cycle,
		Self::EssentialCycle,
		Self::Justification,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Essential => "ess",
			Self::Cycle => "cyc",
			Self::EssentialCycle => "esscyc",
			Self::Justification => "just",
		}
	}
}

impl fmt::Display for PruneType {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.as_str().fmt(f)
	}
}

#[derive(Debug, thiserror::Error)]
#[error("unknown prune type `{0}`")]
pub struct UnknownPruneType(pub String);

impl FromStr for PruneType {
	type Err = UnknownPruneType;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|t| t.as_str() == s)
			.ok_or_else(|| UnknownPruneType(s.to_owned()))
	}
}

/// Dynamic proof.
pub type DynProof<'a, C, I> = Box<dyn 'a + Proof<Conclusion = C, Inference = I>>;

/// Prunes the given proof for the given goal.
///
/// The `axioms` set is only used by [`PruneType::Justification`], and must
/// contain the union of the justifications of the goal.
pub fn prune<'a, P>(
	proof: P,
	goal: &P::Conclusion,
	prune_type: PruneType,
	axioms: &HashSet<P::Conclusion>,
) -> DynProof<'a, P::Conclusion, P::Inference>
where
	P: 'a + Proof,
	P::Inference: 'a + Clone + Eq + Hash,
{
	log::debug!("pruning proof with strategy `{prune_type}`");
	match prune_type {
		PruneType::None => Box::new(proof),
		PruneType::Essential => Box::new(EssentialPruned::new(proof, goal)),
		PruneType::Cycle => Box::new(CyclePruned::new(proof, goal)),
		PruneType::EssentialCycle => {
			let essential = EssentialPruned::new(proof, goal);
			Box::new(CyclePruned::new(essential, goal))
		}
		PruneType::Justification => {
			let essential = EssentialPruned::new(proof, goal);
			let cycle = CyclePruned::new(essential, goal);
			Box::new(JustificationPruned::new(cycle, goal, axioms))
		}
	}
}

/// Pruning statistics of a goal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PruningStats {
	/// Number of essential conclusions.
	pub essential: usize,

	/// Number of conclusions derived from the essential axioms.
	pub derivable: usize,

	/// Number of cyclic inferences.
	pub cyclic: usize,
}

impl PruningStats {
	pub fn new<P>(proof: &P, goal: &P::Conclusion) -> Self
	where
		P: ?Sized + Proof,
		P::Inference: Clone + Eq + Hash,
	{
		let essential = EssentialPruned::new(proof, goal);
		let cycle = CyclePruned::new(proof, goal);

		Self {
			essential: essential.essential().len(),
			derivable: essential.derivable().len(),
			cyclic: cycle.cyclic().len(),
		}
	}
}

impl fmt::Display for PruningStats {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(
			f,
			"essential: {}, derivable: {}, cyclic: {}",
			self.essential, self.derivable, self.cyclic
		)
	}
}

/// Clones the inferences of `conclusion` accepted by the filter.
fn filtered<P: ?Sized + Proof>(
	proof: &P,
	conclusion: &P::Conclusion,
	filter: impl Fn(&P::Inference) -> bool,
) -> Vec<P::Inference>
where
	P::Inference: Clone,
{
	proof
		.inferences(conclusion)
		.iter()
		.filter(|i| filter(i))
		.cloned()
		.collect()
}

fn is_not_asserted<I: Inference>(inference: &I) -> bool {
	!inference.is_asserted()
}
