use std::{
	cell::Cell,
	fmt,
	path::PathBuf,
	process::ExitCode,
};

use clap::{Parser, Subcommand};
use hashbrown::HashSet;
use pinpoint_core::{
	count_inferences, essential_axioms, essential_conclusions, is_derivable, prune,
	unfold_recursively, BaseProof, InlineJustifier, JustifiedInference, Proof, PruneType,
	PruningStats,
};
use pinpoint_search::{
	FnMonitor, MinimalHittingSetEnumerator, MinimalSubsetEnumerator,
	ResolutionJustificationComputation, SelectionType, TopDownRepairComputation,
};
use yansi::Paint;

mod document;

use document::{Document, LoadError};

type CliProof = BaseProof<JustifiedInference<String, String>>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Input file.
	input: PathBuf,

	/// Turn debugging information on.
	#[arg(short, long = "verbose", action = clap::ArgAction::Count)]
	verbosity: u8,

	/// Maximum number of reported sets.
	#[arg(short, long)]
	limit: Option<usize>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Enumerates the justifications of a conclusion.
	Justifications {
		goal: String,

		/// Premise selection strategy (`top-down`, `bottom-up` or `threshold`).
		#[arg(short, long, default_value = "threshold")]
		selection: SelectionType,
	},

	/// Enumerates the repairs of a conclusion.
	Repairs { goal: String },

	/// Lists the essential conclusions and axioms of a goal.
	Essential { goal: String },

	/// Lists the cyclic inferences used to derive a goal.
	Cycles { goal: String },

	/// Prints the inferences of the pruned proof of a goal.
	Prune {
		goal: String,

		/// Pruning strategy (`none`, `ess`, `cyc`, `esscyc` or `just`).
		#[arg(short = 't', long = "type", default_value = "esscyc")]
		prune_type: PruneType,
	},

	/// Prints statistics about the proof of a goal.
	Stats { goal: String },

	/// Enumerates the minimal hitting sets of the input set family.
	HittingSets,
}

#[derive(Debug, thiserror::Error)]
enum Error {
	#[error("unable to load input: {0}")]
	Load(#[from] LoadError),

	#[error(transparent)]
	Search(#[from] pinpoint_search::Error),
}

fn main() -> ExitCode {
	let args = Args::parse();

	stderrlog::new()
		.verbosity(args.verbosity as usize)
		.init()
		.expect("unable to initialize logger");

	match run(args) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			log::error!("{e}");
			ExitCode::FAILURE
		}
	}
}

fn run(args: Args) -> Result<(), Error> {
	let document = Document::load(&args.input)?;
	let limit = args.limit.unwrap_or(usize::MAX);

	match args.command {
		Command::Justifications { goal, selection } => {
			let proof = document.proof();
			let reported = Cell::new(0);
			let monitor = FnMonitor(|| reported.get() >= limit);
			let mut computation =
				ResolutionJustificationComputation::with_monitor(&proof, InlineJustifier, monitor)
					.with_selection(selection);

			computation.enumerate(&goal, &mut |set: HashSet<String>| {
				reported.set(reported.get() + 1);
				println!("{}", SortedSet(&set))
			})?;

			log::info!("{}", computation.stats())
		}
		Command::Repairs { goal } => {
			let proof = document.proof();
			let reported = Cell::new(0);
			let monitor = FnMonitor(|| reported.get() >= limit);
			let mut computation =
				TopDownRepairComputation::with_monitor(&proof, InlineJustifier, monitor);

			computation.enumerate(&goal, &mut |set: HashSet<String>| {
				reported.set(reported.get() + 1);
				println!("{}", SortedSet(&set))
			})?;

			log::info!("{}", computation.stats())
		}
		Command::Essential { goal } => {
			let proof = document.proof();
			let conclusions = essential_conclusions(&proof, &goal);
			let axioms = essential_axioms(&proof, &goal);
			println!("{} {}", Paint::new("conclusions:").bold(), SortedSet(&conclusions));
			println!("{} {}", Paint::new("axioms:").bold(), SortedSet(&axioms));
		}
		Command::Cycles { goal } => {
			let proof = document.proof();
			let cycle = pinpoint_core::prune::CyclePruned::new(&proof, &goal);
			let mut cyclic: Vec<_> = cycle.cyclic().iter().map(ToString::to_string).collect();
			cyclic.sort_unstable();
			for inference in cyclic {
				println!("{inference}")
			}
		}
		Command::Prune { goal, prune_type } => {
			let proof = document.proof();
			let axioms = if prune_type == PruneType::Justification {
				justification_union(&proof, &goal)?
			} else {
				HashSet::new()
			};

			let pruned = prune(&proof, &goal, prune_type, &axioms);
			print_proof(&pruned, &goal)
		}
		Command::Stats { goal } => {
			let proof = document.proof();
			let derivable = is_derivable(&proof, &goal);
			println!(
				"{} {}",
				Paint::new("derivable:").bold(),
				if derivable {
					Paint::green("yes")
				} else {
					Paint::red("no")
				}
			);
			println!(
				"{} {}",
				Paint::new("inferences:").bold(),
				count_inferences(&proof, &goal)
			);
			println!("{}", PruningStats::new(&proof, &goal));
		}
		Command::HittingSets => {
			let reported = Cell::new(0);
			let monitor = FnMonitor(|| reported.get() >= limit);
			let mut enumerator = MinimalHittingSetEnumerator::with_monitor(monitor);
			enumerator.enumerate(&document.sets, &mut |set: HashSet<String>| {
				reported.set(reported.get() + 1);
				println!("{}", SortedSet(&set))
			})?;

			log::info!("{}", enumerator.stats())
		}
	}

	Ok(())
}

/// Union of the justifications of the goal, which are sets of asserted
/// conclusions when no explicit justification is given.
fn justification_union(proof: &CliProof, goal: &String) -> Result<HashSet<String>, Error> {
	let mut computation = ResolutionJustificationComputation::new(proof, InlineJustifier);
	let mut union = HashSet::new();
	computation.enumerate(goal, &mut |set: HashSet<String>| union.extend(set))?;
	Ok(union)
}

fn print_proof<P>(proof: &P, goal: &String)
where
	P: ?Sized + Proof<Conclusion = String>,
	P::Inference: fmt::Display,
{
	let mut lines = Vec::new();
	unfold_recursively(proof, goal, |inference| lines.push(inference.to_string()));
	lines.sort_unstable();
	for line in lines {
		println!("{line}")
	}
}

/// Displays a set in lexicographic order.
struct SortedSet<'a>(&'a HashSet<String>);

impl<'a> fmt::Display for SortedSet<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let mut items: Vec<_> = self.0.iter().collect();
		items.sort_unstable();

		write!(f, "{{")?;
		for (i, item) in items.into_iter().enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}

			write!(f, "{item}")?;
		}
		write!(f, "}}")
	}
}
