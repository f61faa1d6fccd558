use std::{fs, io, path::Path};

use pinpoint_core::{BaseProof, JustifiedInference};
use serde::{Deserialize, Serialize};

/// Inference as written in input files.
///
/// The justification of an asserted inference defaults to its conclusion,
/// and to the empty set otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceEntry {
	pub conclusion: String,

	#[serde(default)]
	pub premises: Vec<String>,

	#[serde(default)]
	pub justification: Option<Vec<String>>,

	#[serde(default)]
	pub asserted: bool,
}

impl InferenceEntry {
	pub fn into_inference(self) -> JustifiedInference<String, String> {
		if self.asserted {
			let justification = self
				.justification
				.unwrap_or_else(|| vec![self.conclusion.clone()]);
			JustifiedInference::asserted(self.conclusion, justification)
		} else {
			JustifiedInference::new(
				self.conclusion,
				self.premises,
				self.justification.unwrap_or_default(),
			)
		}
	}
}

/// Input file.
///
/// ```ron
/// (
/// 	inferences: [
/// 		(conclusion: "A", asserted: true),
/// 		(conclusion: "G", premises: ["A"]),
/// 	],
/// 	sets: [["a", "b"], ["b", "c"]],
/// )
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Document {
	#[serde(default)]
	pub inferences: Vec<InferenceEntry>,

	/// Set family for hitting set queries.
	#[serde(default)]
	pub sets: Vec<Vec<String>>,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
	#[error(transparent)]
	IO(#[from] io::Error),

	#[error(transparent)]
	Ron(#[from] ron::error::SpannedError),
}

impl Document {
	pub fn load(path: &Path) -> Result<Self, LoadError> {
		let content = fs::read_to_string(path)?;
		Ok(ron::from_str(&content)?)
	}

	/// Builds the proof of the document.
	///
	/// Asserted inferences with premises are rejected with a warning.
	pub fn proof(&self) -> BaseProof<JustifiedInference<String, String>> {
		let mut proof = BaseProof::new();
		for entry in &self.inferences {
			if entry.asserted && !entry.premises.is_empty() {
				log::warn!(
					"ignoring asserted inference of `{}` with premises",
					entry.conclusion
				);
				continue;
			}

			proof.produce(entry.clone().into_inference())
		}

		log::debug!("loaded {} inference(s)", proof.len());
		proof
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pinpoint_core::{Inference, Justifier, InlineJustifier, Proof};

	#[test]
	fn parse_document() {
		let document: Document = ron::from_str(
			r#"(
				inferences: [
					(conclusion: "A", asserted: true),
					(conclusion: "B", asserted: true, justification: Some(["x", "y"])),
					(conclusion: "G", premises: ["A", "B"]),
					(conclusion: "H", premises: ["G"], asserted: true),
				],
			)"#,
		)
		.unwrap();

		assert!(document.sets.is_empty());
		let proof = document.proof();
		assert_eq!(proof.len(), 3);

		let a = &proof.inferences(&"A".to_owned())[0];
		assert!(a.is_asserted());
		assert_eq!(InlineJustifier.justification(a), ["A".to_owned()]);

		let b = &proof.inferences(&"B".to_owned())[0];
		assert_eq!(InlineJustifier.justification(b), ["x".to_owned(), "y".to_owned()]);

		let g = &proof.inferences(&"G".to_owned())[0];
		assert!(!g.is_asserted());
		assert!(InlineJustifier.justification(g).is_empty());
		assert!(proof.inferences(&"H".to_owned()).is_empty());
	}
}
