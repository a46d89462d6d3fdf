use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EbooksError;
use crate::io::{build_output_path, get_filename, read_file};
use crate::text::{EnglishText, TextUtilities};
use super::token_table::{TikiId, TokenTable};

/// Number of keywords kept from the statuses.
pub const KEYWORD_COUNT: usize = 200;

/// Ordered tikis of one sentence. Never empty once stored in a model.
pub type Sentence = Vec<TikiId>;

/// Raw corpus to consume.
///
/// At least one of the two lists must be present. Mentions are lines
/// addressed to the account (replies); statuses are everything else.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct RawCorpus {
	pub statuses: Option<Vec<String>>,
	pub mentions: Option<Vec<String>>,
}

impl RawCorpus {
	/// Reads a corpus file.
	///
	/// - `.json` files are parsed as a `RawCorpus` document
	/// - Any other file is read as one status per line
	pub fn from_file<P: AsRef<Path>>(filepath: P) -> Result<Self, EbooksError> {
		let path = filepath.as_ref();
		if path.extension().is_some_and(|e| e == "json") {
			let content = std::fs::read_to_string(path)?;
			Ok(serde_json::from_str(&content)?)
		} else {
			Ok(Self { statuses: Some(read_file(path)?), mentions: None })
		}
	}
}

/// Tokenized corpus used to generate statuses and replies.
///
/// This struct manages:
/// - `tokens`: the interning table, the only place holding token strings.
/// - `sentences`: tokenized sentences of the statuses.
/// - `mentions`: tokenized sentences of the mentions.
/// - `keywords`: the top `KEYWORD_COUNT` terms of the statuses, most
///   important first.
///
/// The serialized form has exactly these four fields.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct CorpusModel {
	pub(crate) tokens: TokenTable,
	pub(crate) sentences: Vec<Sentence>,
	pub(crate) mentions: Vec<Sentence>,
	pub(crate) keywords: Vec<String>,
}

impl CorpusModel {
	/// Returns an empty model.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a new model from `corpus` with the default text utilities.
	///
	/// # Errors
	/// `EbooksError::InvalidCorpus` if neither statuses nor mentions are given.
	pub fn consume(corpus: &RawCorpus) -> Result<Self, EbooksError> {
		Self::consume_with(corpus, &EnglishText)
	}

	/// Builds a new model from `corpus` using `text` for tokenization.
	pub fn consume_with<T: TextUtilities>(corpus: &RawCorpus, text: &T) -> Result<Self, EbooksError> {
		let mut model = Self::new();
		model.consume_in_place_with(corpus, text)?;
		Ok(model)
	}

	/// Consumes `corpus` into this model with the default text utilities.
	pub fn consume_in_place(&mut self, corpus: &RawCorpus) -> Result<(), EbooksError> {
		self.consume_in_place_with(corpus, &EnglishText)
	}

	/// Consumes `corpus` into this model.
	///
	/// # Behavior
	/// - Statuses replace `sentences` and `keywords`.
	/// - Mentions replace `mentions`.
	/// - A list absent from the corpus leaves its counterpart untouched.
	/// - The token table only grows; existing ids stay valid.
	///
	/// # Errors
	/// `EbooksError::InvalidCorpus` if neither list is present. The model is
	/// left unchanged in that case.
	pub fn consume_in_place_with<T: TextUtilities>(&mut self, corpus: &RawCorpus, text: &T) -> Result<(), EbooksError> {
		if corpus.statuses.is_none() && corpus.mentions.is_none() {
			return Err(EbooksError::InvalidCorpus);
		}

		if let Some(statuses) = &corpus.statuses {
			let blob = Self::join_lines(statuses, text);
			self.sentences = self.mass_tikify(&blob, text);
			self.keywords = text.keywords(&blob).top(KEYWORD_COUNT);
		}

		if let Some(mentions) = &corpus.mentions {
			let blob = Self::join_lines(mentions, text);
			self.mentions = self.mass_tikify(&blob, text);
		}

		log::info!(
			"Consumed corpus: {} sentences, {} mentions, {} tokens, {} keywords",
			self.sentences.len(),
			self.mentions.len(),
			self.tokens.len(),
			self.keywords.len()
		);

		Ok(())
	}

	/// Normalizes each line and joins them into one text blob.
	fn join_lines<T: TextUtilities>(lines: &[String], text: &T) -> String {
		lines.iter().map(|line| text.normalize(line)).collect::<Vec<_>>().join("\n")
	}

	/// Splits `blob` into sentences and interns their tokens.
	///
	/// Tokens containing `@` or `http` (usernames and urls) are dropped
	/// whole. Sentences left without tokens are not kept.
	fn mass_tikify<T: TextUtilities>(&mut self, blob: &str, text: &T) -> Vec<Sentence> {
		text.split_sentences(blob)
			.iter()
			.map(|sentence| {
				text.tokenize(sentence)
					.iter()
					.filter(|token| !token.contains('@') && !token.contains("http"))
					.map(|token| self.tokens.intern(token))
					.collect::<Sentence>()
			})
			.filter(|tikis| !tikis.is_empty())
			.collect()
	}

	pub fn tokens(&self) -> &TokenTable {
		&self.tokens
	}

	pub fn sentences(&self) -> &[Sentence] {
		&self.sentences
	}

	pub fn mentions(&self) -> &[Sentence] {
		&self.mentions
	}

	pub fn keywords(&self) -> &[String] {
		&self.keywords
	}

	/// Whether `tikis` is a copy of a stored sentence or mention.
	pub fn is_verbatim(&self, tikis: &[TikiId]) -> bool {
		self.sentences.iter().chain(&self.mentions).any(|sentence| sentence.as_slice() == tikis)
	}

	/// Serializes the model to its JSON document
	/// (`tokens`, `sentences`, `mentions`, `keywords`).
	pub fn serialize(&self) -> Result<String, EbooksError> {
		Ok(serde_json::to_string(self)?)
	}

	/// Loads a model from the JSON document produced by `serialize`.
	pub fn deserialize(blob: &str) -> Result<Self, EbooksError> {
		Ok(serde_json::from_str(blob)?)
	}

	/// Writes the model in the compact `postcard` binary form.
	pub fn save_binary<P: AsRef<Path>>(&self, filepath: P) -> Result<(), EbooksError> {
		let bytes = postcard::to_stdvec(self)?;
		std::fs::write(filepath, bytes)?;
		Ok(())
	}

	/// Reads a model written by `save_binary`.
	pub fn load_binary<P: AsRef<Path>>(filepath: P) -> Result<Self, EbooksError> {
		let bytes = std::fs::read(filepath)?;
		Ok(postcard::from_bytes(&bytes)?)
	}

	/// Loads the model of a corpus file.
	///
	/// - Loads the binary cache (`<stem>.bin`, next to the corpus) if it exists
	/// - Otherwise reads and consumes the corpus, then writes the cache
	///
	/// # Errors
	/// I/O and decoding errors, or `InvalidCorpus` for an empty document.
	pub fn open<P: AsRef<Path>>(filepath: P) -> Result<Self, EbooksError> {
		let binary_data_path = build_output_path(&filepath, "bin")?;
		let name = get_filename(&filepath)?;

		if binary_data_path.exists() {
			let model = Self::load_binary(&binary_data_path)?;
			log::info!("Loaded model '{}' from {}", name, binary_data_path.display());
			return Ok(model);
		}

		let corpus = RawCorpus::from_file(&filepath)?;
		let model = Self::consume(&corpus)?;
		model.save_binary(&binary_data_path)?;
		log::info!("Built model '{}', cached to {}", name, binary_data_path.display());

		Ok(model)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn statuses(lines: &[&str]) -> RawCorpus {
		RawCorpus { statuses: Some(lines.iter().map(|l| l.to_string()).collect()), mentions: None }
	}

	#[test]
	fn rejects_empty_corpus() {
		let result = CorpusModel::consume(&RawCorpus::default());
		assert!(matches!(result, Err(EbooksError::InvalidCorpus)));
	}

	#[test]
	fn failed_consume_leaves_model_untouched() {
		let mut model = CorpusModel::consume(&statuses(&["hello there friend"])).unwrap();
		let before = model.clone();

		assert!(model.consume_in_place(&RawCorpus::default()).is_err());
		assert_eq!(model, before);
	}

	#[test]
	fn strips_usernames_and_urls() {
		let model = CorpusModel::consume(&statuses(&["@someone look at https://example.com now"])).unwrap();

		assert_eq!(model.sentences().len(), 1);
		let tokens: Vec<&str> = model.sentences()[0].iter().filter_map(|t| model.tokens().get(*t)).collect();
		assert_eq!(tokens, vec!["look", "at", "now"]);
	}

	#[test]
	fn drops_sentences_without_tokens() {
		let model = CorpusModel::consume(&statuses(&["@only", "http://a.b", "kept line"])).unwrap();
		assert_eq!(model.sentences().len(), 1);
	}

	#[test]
	fn keywords_come_from_statuses_only() {
		let corpus = RawCorpus {
			statuses: Some(vec!["cheese cheese bread".to_owned()]),
			mentions: Some(vec!["wine wine wine wine".to_owned()]),
		};
		let model = CorpusModel::consume(&corpus).unwrap();

		assert_eq!(model.keywords(), &["cheese".to_owned(), "bread".to_owned()]);
	}

	#[test]
	fn in_place_replaces_only_given_lists() {
		let mut model = CorpusModel::consume(&RawCorpus {
			statuses: Some(vec!["first status here".to_owned()]),
			mentions: Some(vec!["first mention here".to_owned()]),
		})
		.unwrap();
		let tokens_before = model.tokens().len();

		model.consume_in_place(&RawCorpus { statuses: None, mentions: Some(vec!["other reply".to_owned()]) }).unwrap();

		assert_eq!(model.sentences().len(), 1);
		assert_eq!(model.mentions().len(), 1);
		assert_eq!(model.tokens().get(0), Some("first"));
		assert_eq!(model.tokens().len(), tokens_before + 2);
	}

	#[test]
	fn verbatim_detection() {
		let model = CorpusModel::consume(&statuses(&["a b c"])).unwrap();
		let sentence = model.sentences()[0].clone();

		assert!(model.is_verbatim(&sentence));
		assert!(!model.is_verbatim(&sentence[..2]));
	}
}
