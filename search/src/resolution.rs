//! Justification enumeration by resolution.
//!
//! Inferences of the proof are turned into derived inferences over dense
//! identifiers, that are then resolved together until premise-less
//! inferences of the query are found. The justification of such an
//! inference is a justification of the query. Resolution is restricted by
//! a selection function choosing, for each inference, the single atom
//! (conclusion or premise) it can be resolved on.
use std::{collections::VecDeque, fmt, str::FromStr};

use hashbrown::{HashMap, HashSet};
use pinpoint_core::{
	contains, sorted_ids, union, union_len, without, Id, IdMap, IdSet, Inference, Justifier,
	Proof, SortedIds,
};
use slab::Slab;

use crate::{
	enumerator::PriorityQueue,
	index::{encode, MinimalityIndex},
	Error, InterruptMonitor, Listener, MinimalSubsetEnumerator, NoInterruption,
	PriorityComparator, Stats,
};

/// Selection function.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionType {
	/// Resolves on the conclusion, unless it is the query. In this case,
	/// resolves on the premise having the fewest inferences.
	TopDown,

	/// Resolves on the premise having the fewest inferences, or on the
	/// conclusion if there are no premises.
	BottomUp,

	/// Same as [`SelectionType::BottomUp`], unless the selected premise has
	/// more than [`SelectionType::THRESHOLD`] inferences and the conclusion
	/// is not the query. In this case, resolves on the conclusion.
	#[default]
	Threshold,
}

impl SelectionType {
	pub const THRESHOLD: usize = 2;

	pub const ALL: [Self; 3] = [Self::TopDown, Self::BottomUp, Self::Threshold];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::TopDown => "top-down",
			Self::BottomUp => "bottom-up",
			Self::Threshold => "threshold",
		}
	}
}

impl fmt::Display for SelectionType {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.as_str().fmt(f)
	}
}

#[derive(Debug, thiserror::Error)]
#[error("unknown selection type `{0}`")]
pub struct UnknownSelectionType(pub String);

impl FromStr for SelectionType {
	type Err = UnknownSelectionType;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|t| t.as_str() == s)
			.ok_or_else(|| UnknownSelectionType(s.to_owned()))
	}
}

/// Inference over identifiers, with its justification.
#[derive(Debug, Clone)]
struct DerivedInference {
	conclusion: Id,
	premises: SortedIds,
	justification: SortedIds,

	/// Already added to the minimal inferences of its conclusion.
	minimal: bool,
}

impl DerivedInference {
	fn is_tautology(&self) -> bool {
		contains(&self.premises, self.conclusion)
	}
}

impl fmt::Display for DerivedInference {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{} -| {:?}: {:?}", self.conclusion, self.premises, self.justification)
	}
}

enum Unprocessed {
	Initial(DerivedInference),

	/// Resolvent of an inference selected on its conclusion (`first`) with
	/// an inference selected on the same premise (`second`).
	Resolvent {
		first: usize,
		second: usize,
	},
}

enum Selection {
	Conclusion,
	Premise(Id),
}

/// Inferences waiting to be processed.
struct Agenda<'c, C: ?Sized, P> {
	comparator: &'c C,
	queue: PriorityQueue<P, Unprocessed>,
	produced: usize,
}

impl<'c, C: ?Sized, P: Ord> Agenda<'c, C, P> {
	fn new(comparator: &'c C) -> Self {
		Self {
			comparator,
			queue: PriorityQueue::new(),
			produced: 0,
		}
	}

	fn push<A>(&mut self, item: Unprocessed, inferences: &Slab<DerivedInference>, axioms: &IdMap<A>)
	where
		C: PriorityComparator<A, Priority = P>,
	{
		let (priority, size) = match &item {
			Unprocessed::Initial(inference) => {
				if inference.is_tautology() {
					return;
				}

				let priority = self
					.comparator
					.priority(IdSet::new(&inference.justification, axioms));
				(priority, inference.premises.len())
			}
			Unprocessed::Resolvent { first, second } => {
				let (first, second) = (&inferences[*first], &inferences[*second]);
				if contains(&first.premises, second.conclusion) {
					return;
				}

				let justification = union(&first.justification, &second.justification);
				let priority = self.comparator.priority(IdSet::new(&justification, axioms));
				let size = union_len(&first.premises, &second.premises).saturating_sub(1);
				(priority, size)
			}
		};

		self.produced += 1;
		self.queue.push(priority, size, item)
	}

	fn pop(&mut self) -> Option<Unprocessed> {
		self.queue.pop()
	}
}

/// Justification enumerator based on resolution.
///
/// The computation can be reused to enumerate the justifications of
/// several conclusions of the same proof, sharing the inferences resolved
/// so far.
pub struct ResolutionJustificationComputation<P: Proof, J: Justifier<P::Inference>, M = NoInterruption> {
	proof: P,
	justifier: J,
	monitor: M,
	selection: SelectionType,

	/// Conclusions whose inferences were already produced.
	initialized: HashSet<P::Conclusion>,

	conclusion_ids: IdMap<P::Conclusion>,
	axiom_ids: IdMap<J::Axiom>,

	/// Processed minimal inferences.
	inferences: Slab<DerivedInference>,

	/// Minimal inferences of each conclusion.
	minimal_inferences: HashMap<Id, MinimalityIndex>,

	/// Inferences selected on their conclusion, by conclusion.
	by_selected_conclusion: HashMap<Id, Vec<usize>>,

	/// Inferences selected on a premise, by premise.
	by_selected_premise: HashMap<Id, Vec<usize>>,

	/// Inferences whose justification was not minimal during the previous
	/// enumerations.
	blocked: VecDeque<DerivedInference>,

	stats: Stats,
}

impl<P: Proof, J: Justifier<P::Inference>> ResolutionJustificationComputation<P, J> {
	pub fn new(proof: P, justifier: J) -> Self {
		Self::with_monitor(proof, justifier, NoInterruption)
	}
}

impl<P: Proof, J: Justifier<P::Inference>, M> ResolutionJustificationComputation<P, J, M> {
	pub fn with_monitor(proof: P, justifier: J, monitor: M) -> Self {
		Self {
			proof,
			justifier,
			monitor,
			selection: SelectionType::default(),
			initialized: HashSet::new(),
			conclusion_ids: IdMap::new(),
			axiom_ids: IdMap::new(),
			inferences: Slab::new(),
			minimal_inferences: HashMap::new(),
			by_selected_conclusion: HashMap::new(),
			by_selected_premise: HashMap::new(),
			blocked: VecDeque::new(),
			stats: Stats::default(),
		}
	}

	pub fn with_selection(mut self, selection: SelectionType) -> Self {
		self.selection = selection;
		self
	}

	pub fn selection(&self) -> SelectionType {
		self.selection
	}

	pub fn proof(&self) -> &P {
		&self.proof
	}

	pub fn reset_stats(&mut self) {
		self.stats = Stats::default()
	}

	/// Produces the inferences of every conclusion reachable from the query
	/// that was not reached before.
	fn initialize<C>(&mut self, query: &P::Conclusion, agenda: &mut Agenda<C, C::Priority>)
	where
		C: ?Sized + PriorityComparator<J::Axiom>,
	{
		let mut todo = VecDeque::new();
		if self.initialized.insert(query.clone()) {
			todo.push_back(query.clone())
		}

		while let Some(conclusion) = todo.pop_front() {
			for inference in self.proof.inferences(&conclusion) {
				let derived = DerivedInference {
					conclusion: self.conclusion_ids.insert_ref(inference.conclusion()),
					premises: sorted_ids(
						inference
							.premises()
							.iter()
							.map(|p| self.conclusion_ids.insert_ref(p)),
					),
					justification: sorted_ids(
						self.justifier
							.justification(inference)
							.iter()
							.map(|a| self.axiom_ids.insert_ref(a)),
					),
					minimal: false,
				};

				agenda.push(Unprocessed::Initial(derived), &self.inferences, &self.axiom_ids);

				for premise in inference.premises() {
					if self.initialized.insert(premise.clone()) {
						todo.push_back(premise.clone())
					}
				}
			}
		}
	}

	fn resolve(&self, item: Unprocessed) -> DerivedInference {
		match item {
			Unprocessed::Initial(inference) => inference,
			Unprocessed::Resolvent { first, second } => {
				let (first, second) = (&self.inferences[first], &self.inferences[second]);
				let premises = if second.premises.len() == 1 {
					first.premises.clone()
				} else {
					union(&first.premises, &without(&second.premises, first.conclusion))
				};

				DerivedInference {
					conclusion: second.conclusion,
					premises,
					justification: union(&first.justification, &second.justification),
					minimal: false,
				}
			}
		}
	}

	fn select(&self, inference: &DerivedInference, query: Id) -> Selection {
		let cheapest = inference
			.premises
			.iter()
			.map(|&p| (self.proof.inferences(&self.conclusion_ids[p]).len(), p))
			.min_by_key(|(count, _)| *count);

		match (self.selection, cheapest) {
			(SelectionType::TopDown, Some((_, p))) if inference.conclusion == query => {
				Selection::Premise(p)
			}
			(SelectionType::BottomUp, Some((_, p))) => Selection::Premise(p),
			(SelectionType::Threshold, Some((count, p)))
				if count <= SelectionType::THRESHOLD || inference.conclusion == query =>
			{
				Selection::Premise(p)
			}
			_ => Selection::Conclusion,
		}
	}
}

impl<P: Proof, J: Justifier<P::Inference>, M: InterruptMonitor> ResolutionJustificationComputation<P, J, M> {
	fn process<L, C>(
		&mut self,
		query: Id,
		agenda: &mut Agenda<C, C::Priority>,
		listener: &mut L,
	) -> Result<(), Error>
	where
		L: Listener<J::Axiom>,
		C: ?Sized + PriorityComparator<J::Axiom>,
	{
		let mut justifications = MinimalityIndex::new();

		loop {
			if self.monitor.is_interrupted() {
				log::debug!("justification enumeration interrupted");
				while let Some(item) = agenda.pop() {
					let inference = self.resolve(item);
					self.blocked.push_back(inference)
				}

				break Ok(());
			}

			let Some(item) = agenda.pop() else {
				break Ok(());
			};

			let mut inference = self.resolve(item);
			log::trace!("processing {inference}");

			let key = encode(&[inference.justification.as_slice()]);
			if !justifications.is_minimal(&key) {
				self.blocked.push_back(inference);
				continue;
			}

			if inference.premises.is_empty() && inference.conclusion == query {
				justifications.add(&key);
				self.stats.reported += 1;
				listener.new_minimal_subset(
					IdSet::new(&inference.justification, &self.axiom_ids).to_set(),
				);
				self.blocked.push_back(inference);
				continue;
			}

			if !inference.minimal {
				let index = self.minimal_inferences.entry(inference.conclusion).or_default();
				let key = encode(&[inference.premises.as_slice(), inference.justification.as_slice()]);
				if !index.is_minimal(&key) {
					continue;
				}

				index.add(&key);
				inference.minimal = true;
				self.stats.minimal += 1;
			}

			match self.select(&inference, query) {
				Selection::Conclusion => {
					if inference.conclusion == query {
						break Err(Error::QuerySelected(inference.to_string()));
					}

					let selected = inference.conclusion;
					let i = self.inferences.insert(inference);
					self.by_selected_conclusion.entry(selected).or_default().push(i);

					if let Some(others) = self.by_selected_premise.get(&selected) {
						for &other in others {
							agenda.push(
								Unprocessed::Resolvent {
									first: i,
									second: other,
								},
								&self.inferences,
								&self.axiom_ids,
							)
						}
					}
				}
				Selection::Premise(selected) => {
					let i = self.inferences.insert(inference);
					self.by_selected_premise.entry(selected).or_default().push(i);

					if let Some(others) = self.by_selected_conclusion.get(&selected) {
						for &other in others {
							agenda.push(
								Unprocessed::Resolvent {
									first: other,
									second: i,
								},
								&self.inferences,
								&self.axiom_ids,
							)
						}
					}
				}
			}
		}
	}
}

impl<P: Proof, J: Justifier<P::Inference>, M: InterruptMonitor> MinimalSubsetEnumerator<P::Conclusion>
	for ResolutionJustificationComputation<P, J, M>
{
	type Element = J::Axiom;

	fn enumerate_by<L, C>(
		&mut self,
		query: &P::Conclusion,
		listener: &mut L,
		comparator: &C,
	) -> Result<(), Error>
	where
		L: Listener<J::Axiom>,
		C: PriorityComparator<J::Axiom>,
	{
		let query_id = self.conclusion_ids.insert_ref(query);
		let mut agenda = Agenda::new(comparator);
		self.initialize(query, &mut agenda);

		while let Some(inference) = self.blocked.pop_front() {
			agenda.push(Unprocessed::Initial(inference), &self.inferences, &self.axiom_ids)
		}

		// Inferences of the query must now be selected on a premise.
		if let Some(selected) = self.by_selected_conclusion.remove(&query_id) {
			for i in selected {
				let inference = self.inferences.remove(i);
				agenda.push(Unprocessed::Initial(inference), &self.inferences, &self.axiom_ids)
			}
		}

		let reported = self.stats.reported;
		let result = self.process(query_id, &mut agenda, listener);
		self.stats.produced += agenda.produced;

		log::debug!(
			"{} justification(s) for conclusion {query_id} ({})",
			self.stats.reported - reported,
			self.stats
		);

		result
	}

	fn stats(&self) -> Stats {
		self.stats
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pinpoint_core::{BaseInference, BaseProof, JustifiedInference, InlineJustifier};

	#[test]
	fn selection_names() {
		for t in SelectionType::ALL {
			assert_eq!(t.to_string().parse::<SelectionType>().ok(), Some(t))
		}

		assert!("top_down".parse::<SelectionType>().is_err())
	}

	#[test]
	fn tautologies_are_skipped() {
		let proof: BaseProof<_> = [
			JustifiedInference::new("A", vec!["A"], vec![1]),
			JustifiedInference::new("A", vec![], vec![2]),
		]
		.into_iter()
		.collect();

		let mut computation = ResolutionJustificationComputation::new(&proof, InlineJustifier);
		let expected: Vec<HashSet<i32>> = vec![[2].into_iter().collect()];
		assert_eq!(computation.collect(&"A").unwrap(), expected);
		assert_eq!(computation.stats().produced, 1);
	}

	#[test]
	fn underivable_query() {
		let proof: BaseProof<BaseInference<&str>> =
			[BaseInference::new("A", vec!["B"])].into_iter().collect();
		let mut computation = ResolutionJustificationComputation::new(&proof, pinpoint_core::AssertedConclusionJustifier);
		assert!(computation.collect(&"A").unwrap().is_empty());
		assert!(computation.collect(&"C").unwrap().is_empty());
	}
}
