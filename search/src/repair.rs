//! Top-down repair enumeration.
//!
//! A repair of a conclusion is a minimal set of axioms whose removal makes
//! the conclusion underivable. Repairs are found by breaking every
//! inference of the conclusion, either by breaking one of its premises
//! (recursively) or by removing one of the axioms of its justification.
use std::{collections::VecDeque, fmt};

use hashbrown::{HashMap, HashSet};
use pinpoint_core::{
	contains, sorted_ids, with, Id, IdMap, IdSet, Inference, Justifier, Proof, SortedIds,
};

use crate::{
	enumerator::PriorityQueue,
	index::{encode, MinimalityIndex},
	Error, InterruptMonitor, Listener, MinimalSubsetEnumerator, NoInterruption,
	PriorityComparator, Stats,
};

/// Inference over identifiers.
struct InferenceInfo {
	premises: SortedIds,
	justification: SortedIds,
}

impl InferenceInfo {
	fn cost(&self) -> usize {
		self.premises.len() + self.justification.len()
	}
}

/// Partial repair.
#[derive(Debug, Clone)]
struct Job {
	/// Axioms removed so far.
	repair: SortedIds,

	/// Inferences that remain to be broken.
	to_break: SortedIds,

	/// Conclusions that must not be derivable.
	broken: SortedIds,
}

impl fmt::Display for Job {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{:?}; {:?}; {:?}", self.repair, self.broken, self.to_break)
	}
}

/// Repair enumerator breaking inferences from the query down.
///
/// The computation can be reused to enumerate the repairs of several
/// conclusions of the same proof.
pub struct TopDownRepairComputation<P: Proof, J: Justifier<P::Inference>, M = NoInterruption> {
	proof: P,
	justifier: J,
	monitor: M,

	/// Conclusions whose inferences were already registered.
	initialized: HashSet<P::Conclusion>,

	conclusion_ids: IdMap<P::Conclusion>,
	axiom_ids: IdMap<J::Axiom>,

	/// Registered inferences, by identifier.
	inferences: Vec<InferenceInfo>,

	/// Registered inferences of each conclusion.
	inferences_of: HashMap<Id, Vec<Id>>,

	stats: Stats,
}

impl<P: Proof, J: Justifier<P::Inference>> TopDownRepairComputation<P, J> {
	pub fn new(proof: P, justifier: J) -> Self {
		Self::with_monitor(proof, justifier, NoInterruption)
	}
}

impl<P: Proof, J: Justifier<P::Inference>, M> TopDownRepairComputation<P, J, M> {
	pub fn with_monitor(proof: P, justifier: J, monitor: M) -> Self {
		Self {
			proof,
			justifier,
			monitor,
			initialized: HashSet::new(),
			conclusion_ids: IdMap::new(),
			axiom_ids: IdMap::new(),
			inferences: Vec::new(),
			inferences_of: HashMap::new(),
			stats: Stats::default(),
		}
	}

	pub fn proof(&self) -> &P {
		&self.proof
	}

	pub fn reset_stats(&mut self) {
		self.stats = Stats::default()
	}

	/// Registers the inferences of every conclusion reachable from the
	/// query that was not reached before.
	fn initialize(&mut self, query: &P::Conclusion) {
		let mut todo = VecDeque::new();
		if self.initialized.insert(query.clone()) {
			todo.push_back(query.clone())
		}

		while let Some(conclusion) = todo.pop_front() {
			let c = self.conclusion_ids.insert_ref(&conclusion);
			let mut ids = Vec::new();

			for inference in self.proof.inferences(&conclusion) {
				let info = InferenceInfo {
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
				};

				ids.push(Id(self.inferences.len() as u32));
				self.inferences.push(info);

				for premise in inference.premises() {
					if self.initialized.insert(premise.clone()) {
						todo.push_back(premise.clone())
					}
				}
			}

			self.inferences_of.insert(c, ids);
		}
	}

	fn info(&self, inference: Id) -> &InferenceInfo {
		&self.inferences[inference.index()]
	}

	/// Job breaking the given conclusion.
	fn do_break(&self, job: &Job, conclusion: Id) -> Job {
		let broken = with(&job.broken, conclusion);

		let kept = job
			.to_break
			.iter()
			.copied()
			.filter(|&i| !contains(&self.info(i).premises, conclusion));

		let added = self
			.inferences_of
			.get(&conclusion)
			.into_iter()
			.flatten()
			.copied()
			.filter(|&i| {
				let info = self.info(i);
				!info.premises.iter().any(|&p| contains(&broken, p))
					&& !info.justification.iter().any(|&a| contains(&job.repair, a))
			});

		Job {
			repair: job.repair.clone(),
			to_break: sorted_ids(kept.chain(added)),
			broken,
		}
	}

	/// Job removing the given axiom.
	fn repair(&self, job: &Job, axiom: Id) -> Job {
		Job {
			repair: with(&job.repair, axiom),
			to_break: job
				.to_break
				.iter()
				.copied()
				.filter(|&i| !contains(&self.info(i).justification, axiom))
				.collect(),
			broken: job.broken.clone(),
		}
	}

	fn produce<C>(&mut self, queue: &mut PriorityQueue<C::Priority, Job>, comparator: &C, job: Job)
	where
		C: ?Sized + PriorityComparator<J::Axiom>,
	{
		let priority = comparator.priority(IdSet::new(&job.repair, &self.axiom_ids));
		self.stats.produced += 1;
		queue.push(priority, job.to_break.len(), job)
	}

	/// Cheapest inference to break: fewest premises and axioms.
	fn choose_to_break(&self, job: &Job) -> Option<Id> {
		job.to_break
			.iter()
			.copied()
			.min_by_key(|&i| self.info(i).cost())
	}
}

impl<P: Proof, J: Justifier<P::Inference>, M: InterruptMonitor> MinimalSubsetEnumerator<P::Conclusion>
	for TopDownRepairComputation<P, J, M>
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
		self.initialize(query);
		let goal = self.conclusion_ids.insert_ref(query);

		let mut queue = PriorityQueue::new();
		let mut repairs = MinimalityIndex::new();
		let mut jobs = MinimalityIndex::new();
		let reported = self.stats.reported;

		let empty = Job {
			repair: SortedIds::new(),
			to_break: SortedIds::new(),
			broken: SortedIds::new(),
		};
		let first = self.do_break(&empty, goal);
		self.produce(&mut queue, comparator, first);

		loop {
			if self.monitor.is_interrupted() {
				log::debug!("repair enumeration interrupted");
				break;
			}

			let Some(job) = queue.pop() else {
				break;
			};

			let repair_key = encode(&[job.repair.as_slice()]);
			if !repairs.is_minimal(&repair_key) {
				continue;
			}

			let job_key = encode(&[job.repair.as_slice(), job.to_break.as_slice()]);
			if !jobs.is_minimal(&job_key) {
				continue;
			}

			jobs.add(&job_key);
			self.stats.minimal += 1;
			log::trace!("processing job {job}");

			match self.choose_to_break(&job) {
				None => {
					repairs.add(&repair_key);
					self.stats.reported += 1;
					listener.new_minimal_subset(IdSet::new(&job.repair, &self.axiom_ids).to_set())
				}
				Some(inference) => {
					let info = self.info(inference);
					let (premises, justification) = (info.premises.clone(), info.justification.clone());

					for premise in premises {
						let child = self.do_break(&job, premise);
						self.produce(&mut queue, comparator, child)
					}

					for axiom in justification {
						let child = self.repair(&job, axiom);
						self.produce(&mut queue, comparator, child)
					}
				}
			}
		}

		log::debug!(
			"{} repair(s) for conclusion {goal} ({})",
			self.stats.reported - reported,
			self.stats
		);

		Ok(())
	}

	fn stats(&self) -> Stats {
		self.stats
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pinpoint_core::{JustifiedInference, InlineJustifier, BaseProof};

	#[test]
	fn unconditional_inferences_cannot_be_repaired() {
		let proof: BaseProof<JustifiedInference<&str, u8>> =
			[JustifiedInference::new("A", vec![], vec![])].into_iter().collect();
		let mut computation = TopDownRepairComputation::new(&proof, InlineJustifier);
		assert!(computation.collect(&"A").unwrap().is_empty());
	}

	#[test]
	fn underivable_conclusions_have_the_empty_repair() {
		let proof: BaseProof<JustifiedInference<&str, u8>> = BaseProof::new();
		let mut computation = TopDownRepairComputation::new(&proof, InlineJustifier);
		let expected: Vec<HashSet<u8>> = vec![HashSet::new()];
		assert_eq!(computation.collect(&"A").unwrap(), expected);
	}

	#[test]
	fn self_loops_are_ignored() {
		let proof: BaseProof<JustifiedInference<&str, u8>> = [
			JustifiedInference::new("A", vec!["A"], vec![1]),
			JustifiedInference::new("A", vec![], vec![2]),
		]
		.into_iter()
		.collect();
		let mut computation = TopDownRepairComputation::new(&proof, InlineJustifier);
		let expected: Vec<HashSet<u8>> = vec![[2].into_iter().collect()];
		assert_eq!(computation.collect(&"A").unwrap(), expected);
	}
}
