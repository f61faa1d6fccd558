//! Minimal subset enumeration interface.
use std::{
	cmp::{Ordering, Reverse},
	collections::BinaryHeap,
	fmt,
	hash::Hash,
	sync::{
		atomic::{self, AtomicBool},
		Arc,
	},
};

use hashbrown::HashSet;
use pinpoint_core::IdSet;

use crate::Error;

/// Receives the minimal subsets found by an enumerator.
pub trait Listener<E> {
	fn new_minimal_subset(&mut self, set: HashSet<E>);
}

impl<E, F: FnMut(HashSet<E>)> Listener<E> for F {
	fn new_minimal_subset(&mut self, set: HashSet<E>) {
		self(set)
	}
}

/// Listener collecting every subset, in order.
#[derive(Debug, Clone)]
pub struct Collector<E>(pub Vec<HashSet<E>>);

impl<E> Default for Collector<E> {
	fn default() -> Self {
		Self(Vec::new())
	}
}

impl<E> Collector<E> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn into_inner(self) -> Vec<HashSet<E>> {
		self.0
	}
}

impl<E> Listener<E> for Collector<E> {
	fn new_minimal_subset(&mut self, set: HashSet<E>) {
		self.0.push(set)
	}
}

/// Priority of subsets.
///
/// Subsets are enumerated by increasing priority. The priority must be
/// monotonic with regard to set inclusion: a superset never has a strictly
/// lower priority than any of its subsets. Otherwise the enumeration order
/// is not guaranteed.
pub trait PriorityComparator<E> {
	type Priority: Ord;

	fn priority(&self, set: IdSet<E>) -> Self::Priority;
}

impl<'c, E, C: ?Sized + PriorityComparator<E>> PriorityComparator<E> for &'c C {
	type Priority = C::Priority;

	fn priority(&self, set: IdSet<E>) -> Self::Priority {
		(**self).priority(set)
	}
}

/// Smaller subsets first.
#[derive(Debug, Default, Clone, Copy)]
pub struct Cardinality;

impl<E> PriorityComparator<E> for Cardinality {
	type Priority = usize;

	fn priority(&self, set: IdSet<E>) -> usize {
		set.len()
	}
}

/// Priority given by a function.
#[derive(Debug, Clone, Copy)]
pub struct FnPriority<F>(pub F);

impl<E, P: Ord, F: Fn(IdSet<E>) -> P> PriorityComparator<E> for FnPriority<F> {
	type Priority = P;

	fn priority(&self, set: IdSet<E>) -> P {
		(self.0)(set)
	}
}

/// Cooperative cancellation signal, polled once per iteration of the
/// enumeration loops.
pub trait InterruptMonitor {
	fn is_interrupted(&self) -> bool;
}

/// Never interrupts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInterruption;

impl InterruptMonitor for NoInterruption {
	fn is_interrupted(&self) -> bool {
		false
	}
}

impl InterruptMonitor for () {
	fn is_interrupted(&self) -> bool {
		false
	}
}

impl InterruptMonitor for AtomicBool {
	fn is_interrupted(&self) -> bool {
		self.load(atomic::Ordering::Relaxed)
	}
}

impl<'a, M: ?Sized + InterruptMonitor> InterruptMonitor for &'a M {
	fn is_interrupted(&self) -> bool {
		(**self).is_interrupted()
	}
}

impl<M: ?Sized + InterruptMonitor> InterruptMonitor for Arc<M> {
	fn is_interrupted(&self) -> bool {
		(**self).is_interrupted()
	}
}

/// Monitor given by a function.
#[derive(Debug, Clone, Copy)]
pub struct FnMonitor<F>(pub F);

impl<F: Fn() -> bool> InterruptMonitor for FnMonitor<F> {
	fn is_interrupted(&self) -> bool {
		(self.0)()
	}
}

/// Enumeration counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
	/// Produced inferences or jobs.
	pub produced: usize,

	/// Produced inferences or jobs found minimal.
	pub minimal: usize,

	/// Reported subsets.
	pub reported: usize,
}

impl fmt::Display for Stats {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(
			f,
			"{} produced, {} minimal, {} reported",
			self.produced, self.minimal, self.reported
		)
	}
}

/// Enumerates the minimal subsets associated to a query, such as the
/// justifications or repairs of a conclusion.
pub trait MinimalSubsetEnumerator<Q: ?Sized> {
	type Element: Clone + Eq + Hash;

	/// Reports every minimal subset for the given query exactly once, by
	/// increasing priority.
	///
	/// The enumeration stops early, without error, when interrupted. The
	/// subsets reported so far are minimal, but others may be missing.
	fn enumerate_by<L, C>(&mut self, query: &Q, listener: &mut L, comparator: &C) -> Result<(), Error>
	where
		L: Listener<Self::Element>,
		C: PriorityComparator<Self::Element>;

	/// Reports every minimal subset, smallest first.
	fn enumerate<L>(&mut self, query: &Q, listener: &mut L) -> Result<(), Error>
	where
		L: Listener<Self::Element>,
	{
		self.enumerate_by(query, listener, &Cardinality)
	}

	/// Collects every minimal subset, smallest first.
	fn collect(&mut self, query: &Q) -> Result<Vec<HashSet<Self::Element>>, Error> {
		let mut collector = Collector::new();
		self.enumerate(query, &mut collector)?;
		Ok(collector.into_inner())
	}

	fn stats(&self) -> Stats;
}

/// Queued item, ordered by priority, then size, then insertion order.
struct Queued<P, T> {
	priority: P,
	size: usize,
	seq: u64,
	item: T,
}

impl<P: Ord, T> Queued<P, T> {
	fn key(&self) -> (&P, usize, u64) {
		(&self.priority, self.size, self.seq)
	}
}

impl<P: Ord, T> PartialEq for Queued<P, T> {
	fn eq(&self, other: &Self) -> bool {
		self.key() == other.key()
	}
}

impl<P: Ord, T> Eq for Queued<P, T> {}

impl<P: Ord, T> PartialOrd for Queued<P, T> {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl<P: Ord, T> Ord for Queued<P, T> {
	fn cmp(&self, other: &Self) -> Ordering {
		self.key().cmp(&other.key())
	}
}

/// Min-queue popping the lowest priority first, then the smallest size,
/// then the oldest item.
pub(crate) struct PriorityQueue<P, T> {
	heap: BinaryHeap<Reverse<Queued<P, T>>>,
	seq: u64,
}

impl<P: Ord, T> PriorityQueue<P, T> {
	pub fn new() -> Self {
		Self {
			heap: BinaryHeap::new(),
			seq: 0,
		}
	}

	pub fn push(&mut self, priority: P, size: usize, item: T) {
		self.heap.push(Reverse(Queued {
			priority,
			size,
			seq: self.seq,
			item,
		}));
		self.seq += 1
	}

	pub fn pop(&mut self) -> Option<T> {
		self.heap.pop().map(|Reverse(queued)| queued.item)
	}
}
