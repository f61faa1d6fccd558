use hashbrown::HashSet;
use pinpoint_core::{
	essential_axioms, essential_conclusions, is_derivable, prune,
	prune::{CyclePruned, EssentialPruned, JustificationPruned},
	unfold_recursively, BaseInference, BaseProof, Inference, Proof, PruneType, PruningStats,
};
use proptest::prelude::*;

type TestProof = BaseProof<BaseInference<&'static str>>;

fn proof(inferences: &[(&'static str, &[&'static str])], asserted: &[&'static str]) -> TestProof {
	inferences
		.iter()
		.map(|(c, p)| BaseInference::new(*c, p.to_vec()))
		.chain(asserted.iter().map(|a| BaseInference::asserted(*a)))
		.collect()
}

fn set(items: &[&'static str]) -> HashSet<&'static str> {
	items.iter().copied().collect()
}

/// G <- A, B; G <- B; B <- C; C; B; A
fn diamond() -> TestProof {
	proof(&[("G", &["A", "B"]), ("G", &["B"]), ("B", &["C"])], &["C", "B", "A"])
}

#[test]
fn essential_axioms_of_diamond() {
	let p = diamond();
	assert_eq!(essential_conclusions(&p, &"G"), set(&["G", "B"]));
	assert_eq!(essential_axioms(&p, &"G"), set(&["B"]));
}

#[test]
fn essential_pruning_keeps_goal_derivable() {
	let p = diamond();
	let pruned = EssentialPruned::new(&p, &"G");
	assert_eq!(pruned.essential(), &set(&["G", "B"]));
	assert_eq!(pruned.derivable(), &set(&["G", "B"]));
	assert!(is_derivable(&pruned, &"G"));

	let g: Vec<_> = pruned.inferences(&"G").iter().map(|i| i.premises().to_vec()).collect();
	assert_eq!(g, vec![vec!["B"]]);
}

#[test]
fn essential_pruning_is_idempotent() {
	let p = diamond();
	let once = EssentialPruned::new(&p, &"G");
	let twice = EssentialPruned::new(&once, &"G");
	assert_eq!(once.essential(), twice.essential());
	assert_eq!(once.derivable(), twice.derivable());
}

/// Inferences reachable from the goal.
fn reachable<P: Proof>(proof: &P, goal: &P::Conclusion) -> HashSet<P::Inference>
where
	P::Inference: Clone + Eq + std::hash::Hash,
{
	let mut result = HashSet::new();
	unfold_recursively(proof, goal, |i| {
		result.insert(i.clone());
	});
	result
}

#[test]
fn essential_conclusions_stabilize_after_one_pruning() {
	// 1 <- 3, 0 is lost by pruning, after which 2 becomes essential.
	let p = proof(
		&[("2", &["0"]), ("1", &["2"]), ("1", &["4"]), ("1", &["3", "0"])],
		&["0", "3"],
	);
	let once = EssentialPruned::new(&p, &"1");
	assert_eq!(once.essential(), &set(&["0", "1"]));
	assert_eq!(once.derivable(), &set(&["0", "1", "2"]));

	let twice = EssentialPruned::new(&once, &"1");
	assert_eq!(twice.essential(), &set(&["0", "1", "2"]));
	assert_eq!(twice.derivable(), once.derivable());
	assert_eq!(reachable(&twice, &"1"), reachable(&once, &"1"));
	assert_eq!(essential_axioms(&twice, &"1"), set(&["0"]));

	let thrice = EssentialPruned::new(&twice, &"1");
	assert_eq!(thrice.essential(), twice.essential());
}

#[test]
fn goals_underivable_from_essential_axioms_are_not_pruned() {
	let p = proof(&[("G", &["A"]), ("G", &["B"]), ("A", &["C"])], &["A", "B", "C"]);
	let pruned = EssentialPruned::new(&p, &"G");
	assert_eq!(pruned.essential(), &set(&["G"]));
	assert!(pruned.derivable().is_empty());
	assert_eq!(reachable(&pruned, &"G"), reachable(&p, &"G"));
}

fn arb_asserted_proof() -> impl Strategy<Value = BaseProof<BaseInference<u8>>> {
	(
		proptest::collection::vec((0..5u8, proptest::collection::vec(0..5u8, 0..3)), 0..10),
		proptest::collection::btree_set(0..5u8, 0..4),
	)
		.prop_map(|(inferences, asserted)| {
			inferences
				.into_iter()
				.map(|(c, p)| BaseInference::new(c, p))
				.chain(asserted.into_iter().map(BaseInference::asserted))
				.collect()
		})
}

proptest! {
	#[test]
	fn essential_pruning_is_stable(p in arb_asserted_proof(), goal in 0..5u8) {
		let once = EssentialPruned::new(&p, &goal);
		let twice = EssentialPruned::new(&once, &goal);
		let thrice = EssentialPruned::new(&twice, &goal);

		prop_assert_eq!(is_derivable(&once, &goal), is_derivable(&p, &goal));
		prop_assert_eq!(essential_axioms(&once, &goal), essential_axioms(&p, &goal));
		prop_assert_eq!(essential_axioms(&twice, &goal), essential_axioms(&p, &goal));
		prop_assert_eq!(twice.derivable(), once.derivable());
		prop_assert_eq!(reachable(&twice, &goal), reachable(&once, &goal));
		prop_assert!(once.essential().is_subset(twice.essential()));
		prop_assert_eq!(thrice.essential(), twice.essential());
	}
}

#[test]
fn pure_cycles_are_removed() {
	let p = proof(&[("X", &["Y"]), ("Y", &["X"])], &[]);
	let pruned = CyclePruned::new(&p, &"X");
	assert_eq!(pruned.cyclic().len(), 2);
	assert!(!is_derivable(&pruned, &"X"));
	assert!(!is_derivable(&pruned, &"Y"));
	assert!(pruned.inferences(&"X").is_empty());
}

#[test]
fn cycle_pruning_keeps_alternatives() {
	let p = proof(&[("G", &["X"]), ("X", &["Y"]), ("Y", &["X"])], &["Y"]);
	let pruned = CyclePruned::new(&p, &"G");

	let cyclic: Vec<_> = pruned.cyclic().iter().collect();
	assert_eq!(cyclic, vec![&BaseInference::new("Y", vec!["X"])]);
	assert_eq!(pruned.inferences(&"Y"), &[BaseInference::asserted("Y")]);
	assert_eq!(pruned.inferences(&"X").len(), 1);
	assert!(is_derivable(&pruned, &"G"));

	let again = CyclePruned::new(&pruned, &"G");
	assert!(again.cyclic().is_empty());
}

#[test]
fn justification_pruning() {
	let p = proof(
		&[("G", &["A", "B"]), ("G", &["C"]), ("A", &["D"])],
		&["A", "B", "C", "D"],
	);
	let axioms = set(&["A", "B"]);
	let pruned = JustificationPruned::new(&p, &"G", &axioms);

	assert_eq!(pruned.kept().count(), 3);
	assert_eq!(pruned.inferences(&"G"), &[BaseInference::new("G", vec!["A", "B"])]);
	assert_eq!(pruned.inferences(&"A"), &[BaseInference::asserted("A")]);
	assert!(pruned.inferences(&"C").is_empty());
	assert!(pruned.inferences(&"D").is_empty());
	assert!(is_derivable(&pruned, &"G"));
	assert!(!is_derivable(&pruned, &"C"));
}

#[test]
fn all_strategies_preserve_derivability() {
	let p = diamond();
	let axioms = set(&["B"]);

	for t in PruneType::ALL {
		let pruned = prune(&p, &"G", t, &axioms);
		assert!(is_derivable(&pruned, &"G"), "goal lost by `{t}` pruning");
	}
}

#[test]
fn prune_type_names() {
	for t in PruneType::ALL {
		assert_eq!(t.to_string().parse::<PruneType>().ok(), Some(t))
	}

	assert!("essential".parse::<PruneType>().is_err())
}

#[test]
fn pruning_stats() {
	let stats = PruningStats::new(&diamond(), &"G");
	assert_eq!(
		stats,
		PruningStats {
			essential: 2,
			derivable: 2,
			cyclic: 0
		}
	);
}
