//! Derivability checking with blocked conclusions.
use hashbrown::HashMap;

use crate::{Id, IdMap, Inference, Proof};

#[derive(Debug, Default, Clone, Copy)]
struct Status {
	derivable: bool,
	explored: bool,
	blocked: bool,
}

/// Inference waiting for one of its premises to be derived.
#[derive(Debug, Clone, Copy)]
struct Watch {
	conclusion: Id,

	/// Index of the inference among those of the conclusion.
	inference: usize,
}

/// Checks derivability of conclusions in a proof, while some conclusions
/// may be temporarily blocked.
///
/// A blocked conclusion is never derivable, and is never used to derive
/// other conclusions. Results are cached between calls: blocking a
/// derivable conclusion drops the positive results, and unblocking drops
/// the negative ones.
pub struct DerivabilityChecker<'p, P: ?Sized + Proof> {
	proof: &'p P,
	ids: IdMap<P::Conclusion>,
	status: Vec<Status>,

	/// Inferences watching each conclusion, by the first premise that was
	/// not derivable when they were checked.
	watchers: HashMap<Id, Vec<Watch>>,

	/// Conclusions to explore.
	todo: Vec<Id>,

	/// Inferences to check.
	to_check: Vec<Watch>,

	/// Derivable conclusions, in derivation order.
	derived: Vec<Id>,

	/// Explored conclusions.
	explored: Vec<Id>,
}

impl<'p, P: ?Sized + Proof> DerivabilityChecker<'p, P> {
	pub fn new(proof: &'p P) -> Self {
		Self {
			proof,
			ids: IdMap::new(),
			status: Vec::new(),
			watchers: HashMap::new(),
			todo: Vec::new(),
			to_check: Vec::new(),
			derived: Vec::new(),
			explored: Vec::new(),
		}
	}

	pub fn proof(&self) -> &'p P {
		self.proof
	}

	fn id(&mut self, conclusion: &P::Conclusion) -> Id {
		let id = self.ids.insert_ref(conclusion);
		if self.status.len() <= id.index() {
			self.status.resize(id.index() + 1, Status::default())
		}

		id
	}

	/// Checks if the given conclusion is derivable without using the
	/// blocked conclusions.
	pub fn is_derivable(&mut self, conclusion: &P::Conclusion) -> bool {
		let id = self.id(conclusion);
		let status = self.status[id.index()];

		if status.blocked {
			return false;
		}

		if !status.derivable && !status.explored {
			self.todo.push(id);
			self.process()
		}

		self.status[id.index()].derivable
	}

	/// Blocks the given conclusion.
	///
	/// Returns `true` if the conclusion was not already blocked.
	pub fn block(&mut self, conclusion: P::Conclusion) -> bool {
		let id = self.id(&conclusion);
		let status = &mut self.status[id.index()];

		if status.blocked {
			return false;
		}

		status.blocked = true;
		if status.derivable {
			log::trace!("blocking derivable conclusion {id}, dropping {} derived", self.derived.len());

			for d in self.derived.drain(..) {
				self.status[d.index()].derivable = false
			}

			self.forget_explored()
		}

		true
	}

	/// Unblocks the given conclusion.
	///
	/// Returns `true` if the conclusion was blocked.
	pub fn unblock(&mut self, conclusion: &P::Conclusion) -> bool {
		match self.ids.get(conclusion) {
			Some(id) if self.status[id.index()].blocked => {
				self.status[id.index()].blocked = false;
				self.forget_explored();
				true
			}
			_ => false,
		}
	}

	pub fn is_blocked(&self, conclusion: &P::Conclusion) -> bool {
		self.ids
			.get(conclusion)
			.map(|id| self.status[id.index()].blocked)
			.unwrap_or(false)
	}

	/// Conclusions found derivable so far.
	///
	/// This is not the set of all derivable conclusions, only those needed
	/// to answer the previous queries since the last cache reset.
	pub fn derivable_conclusions(&self) -> impl '_ + Iterator<Item = &P::Conclusion> {
		self.derived.iter().map(|id| &self.ids[*id])
	}

	fn forget_explored(&mut self) {
		for e in self.explored.drain(..) {
			self.status[e.index()].explored = false
		}

		self.watchers.clear();
	}

	fn process(&mut self) {
		loop {
			if let Some(watch) = self.to_check.pop() {
				self.check(watch);
				continue;
			}

			if let Some(id) = self.todo.pop() {
				self.explore(id);
				continue;
			}

			break;
		}
	}

	fn explore(&mut self, id: Id) {
		let status = &mut self.status[id.index()];
		if status.explored || status.blocked {
			return;
		}

		status.explored = true;
		self.explored.push(id);

		let count = self.proof.inferences(&self.ids[id]).len();
		self.to_check.extend((0..count).map(|inference| Watch {
			conclusion: id,
			inference,
		}))
	}

	fn check(&mut self, watch: Watch) {
		let status = self.status[watch.conclusion.index()];
		if status.derivable || status.blocked {
			return;
		}

		let proof = self.proof;
		let inference = &proof.inferences(&self.ids[watch.conclusion])[watch.inference];

		for premise in inference.premises() {
			let p = self.id(premise);
			let premise_status = self.status[p.index()];
			if !premise_status.derivable {
				self.watchers.entry(p).or_default().push(watch);
				if !premise_status.explored && !premise_status.blocked {
					self.todo.push(p)
				}

				return;
			}
		}

		self.derive(watch.conclusion)
	}

	fn derive(&mut self, id: Id) {
		self.status[id.index()].derivable = true;
		self.derived.push(id);

		if let Some(watching) = self.watchers.remove(&id) {
			self.to_check.extend(watching)
		}
	}
}
