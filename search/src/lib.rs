//! Justification and repair enumeration over proofs.
//!
//! A justification of a conclusion is a minimal set of axioms from which
//! it can be derived. A repair is a minimal set of axioms whose removal
//! makes it underivable. Justifications are computed by resolution
//! ([`ResolutionJustificationComputation`]) and repairs by a top-down
//! search ([`TopDownRepairComputation`]), which also computes minimal
//! hitting sets ([`MinimalHittingSetEnumerator`]).
pub mod enumerator;
pub mod hitting_set;
pub mod index;
pub mod repair;
pub mod resolution;

pub use enumerator::{
	Cardinality, Collector, FnMonitor, FnPriority, InterruptMonitor, Listener,
	MinimalSubsetEnumerator, NoInterruption, PriorityComparator, Stats,
};
pub use hitting_set::{minimal_hitting_sets, MinimalHittingSetEnumerator};
pub use index::MinimalityIndex;
pub use repair::TopDownRepairComputation;
pub use resolution::{ResolutionJustificationComputation, SelectionType, UnknownSelectionType};

/// Enumeration error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The selection function chose to resolve on the query conclusion.
	#[error("the query conclusion cannot be selected by an inference with premises ({0})")]
	QuerySelected(String),
}
