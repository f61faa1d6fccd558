//! Proof graphs, derivability checking and proof pruning.
//!
//! This crate provides the proof model shared by the justification and
//! repair enumerators of `pinpoint-search`.
mod checker;
mod id;
mod justifier;
pub mod proof;
pub mod prune;
mod utils;

pub use checker::*;
pub use id::*;
pub use justifier::*;
pub use proof::{
	count_inferences, essential_axioms, essential_conclusions, expand, is_derivable,
	unfold_recursively, BaseInference, BaseProof, ConclusionOf, Inference, InferenceOf, Proof,
};
pub use prune::{prune, PruneType, PruningStats, UnknownPruneType};
pub use utils::*;
