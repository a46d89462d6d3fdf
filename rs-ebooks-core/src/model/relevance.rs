use rand::Rng;

use crate::text::{EnglishText, TextUtilities};
use super::corpus_model::{CorpusModel, Sentence};
use super::generation_input::GenerationInput;
use super::suffix_index::SuffixIndex;
use super::token_table::TikiId;

/// Minimum number of relevant sentences to reply from them.
const RELEVANT_THRESHOLD: usize = 3;

/// Minimum number of slightly relevant sentences to reply from them.
const SLIGHTLY_RELEVANT_THRESHOLD: usize = 5;

/// Sentences of a pool sharing tokens with a query.
///
/// A sentence appears once per matching query token, so sentences sharing
/// several tokens with the query weigh more as donors.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Relevance<'a> {
	/// Sentences sharing a non-stopword token with the query.
	pub relevant: Vec<&'a [TikiId]>,

	/// Sentences sharing any token with the query.
	pub slightly_relevant: Vec<&'a [TikiId]>,
}

impl CorpusModel {
	/// Generates a reply to `input` of at most `limit` characters.
	///
	/// `pool` defaults to the mentions. See `generate_reply_with`.
	pub fn generate_reply(&self, input: &str, limit: usize, pool: Option<&[Sentence]>) -> String {
		self.generate_reply_with(input, &GenerationInput::with_limit(limit), pool, &EnglishText, &mut rand::rng())
	}

	/// Generates a reply by recombining sentences related to `input`.
	///
	/// # Behavior
	/// - 3 or more relevant sentences: recombine among them.
	/// - Otherwise 5 or more slightly relevant sentences: recombine among those.
	/// - Otherwise: an unconditioned status.
	pub fn generate_reply_with<T, R>(&self, input: &str, generation: &GenerationInput, pool: Option<&[Sentence]>, text: &T, rng: &mut R) -> String
	where
		T: TextUtilities,
		R: Rng + ?Sized,
	{
		let pool = pool.unwrap_or(&self.mentions);
		let relevance = self.find_relevant(pool, input, text);

		let donors = if relevance.relevant.len() >= RELEVANT_THRESHOLD {
			log::debug!("Replying from {} relevant sentences", relevance.relevant.len());
			relevance.relevant
		} else if relevance.slightly_relevant.len() >= SLIGHTLY_RELEVANT_THRESHOLD {
			log::debug!("Replying from {} slightly relevant sentences", relevance.slightly_relevant.len());
			relevance.slightly_relevant
		} else {
			log::debug!("No relevant sentences for the input, generating a plain status");
			return self.generate_status_with(generation, None, text, rng);
		};

		let index = SuffixIndex::build(donors.iter().copied());
		self.generate_status_with(generation, Some(&index), text, rng)
	}

	/// Finds the sentences of `pool` sharing tokens with `input`.
	///
	/// Comparison is case-insensitive. A match on a stopword only counts as
	/// slightly relevant.
	pub fn find_relevant<'p, T: TextUtilities>(&self, pool: &'p [Sentence], input: &str, text: &T) -> Relevance<'p> {
		let query: Vec<String> = text.tokenize(input).iter().map(|token| token.to_lowercase()).collect();
		let mut relevance = Relevance::default();

		for sentence in pool {
			let words: Vec<String> = sentence
				.iter()
				.filter_map(|tiki| self.tokens.get(*tiki))
				.map(str::to_lowercase)
				.collect();

			for token in &query {
				if words.contains(token) {
					if !text.is_stopword(token) {
						relevance.relevant.push(sentence);
					}
					relevance.slightly_relevant.push(sentence);
				}
			}
		}

		relevance
	}
}
