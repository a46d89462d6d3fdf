use rand::Rng;

use crate::text::{EnglishText, TextUtilities};
use super::corpus_model::CorpusModel;
use super::generation_input::{GenerationInput, GramMode};
use super::generator::Generator;
use super::suffix_index::SuffixIndex;
use super::token_table::TikiId;

/// Candidates with at most this many tokens are only accepted for replies.
const MIN_STATUS_TIKIS: usize = 3;

impl CorpusModel {
	/// Generates a status of at most `limit` characters.
	///
	/// Uses the default text utilities and the thread-local random source.
	/// See `generate_status_with`.
	pub fn generate_status(&self, limit: usize) -> String {
		self.generate_status_with(&GenerationInput::with_limit(limit), None, &EnglishText, &mut rand::rng())
	}

	/// Generates a status by recombining sentences.
	///
	/// # Parameters
	/// - `input`: character limit, retry budget and passes.
	/// - `index`: donor index for a reply; `None` builds one over all the
	///   status sentences.
	/// - `text`: text utilities used for reconstruction and validation.
	/// - `rng`: random source.
	///
	/// # Behavior
	/// - Bigram generation is retried until the candidate has more than 3
	///   tokens (unless replying), fits in `limit` and has balanced enclosers,
	///   or until the retry budget is spent.
	/// - A candidate copying a stored sentence is replaced by a unigram
	///   generation with its own retry budget.
	///
	/// # Notes
	/// Never fails: when the budget runs out the last attempt is returned,
	/// even if it is too long or unbalanced.
	pub fn generate_status_with<T, R>(&self, input: &GenerationInput, index: Option<&SuffixIndex<'_>>, text: &T, rng: &mut R) -> String
	where
		T: TextUtilities,
		R: Rng + ?Sized,
	{
		let tikis = match index {
			Some(index) => self.gather_tikis(input, index, true, text, rng),
			None => {
				let index = SuffixIndex::build(&self.sentences);
				self.gather_tikis(input, &index, false, text, rng)
			}
		};

		let status = text.reconstruct(&tikis, &self.tokens);
		text.decode_html_entities(&status)
	}

	fn gather_tikis<T, R>(&self, input: &GenerationInput, index: &SuffixIndex<'_>, responding: bool, text: &T, rng: &mut R) -> Vec<TikiId>
	where
		T: TextUtilities,
		R: Rng + ?Sized,
	{
		let generator = Generator::new(index);

		let tikis = self.retry_generation(input, &generator, GramMode::Bigram, text, rng, |tikis| {
			tikis.len() > MIN_STATUS_TIKIS || responding
		});

		if tikis.len() > MIN_STATUS_TIKIS && self.is_verbatim(&tikis) {
			// Copied a corpus sentence by accident
			log::debug!("Bigram candidate is verbatim, falling back to unigrams");
			return self.retry_generation(input, &generator, GramMode::Unigram, text, rng, |_| true);
		}

		tikis
	}

	/// Generates until a candidate passes `accept` and `is_valid_status`, at
	/// most `input.retry_limit` times (at least once).
	fn retry_generation<T, R, F>(&self, input: &GenerationInput, generator: &Generator<'_, '_>, mode: GramMode, text: &T, rng: &mut R, accept: F) -> Vec<TikiId>
	where
		T: TextUtilities,
		R: Rng + ?Sized,
		F: Fn(&[TikiId]) -> bool,
	{
		let mut retries = 0;
		loop {
			let tikis = generator.generate(input.passes, mode, rng);
			if accept(&tikis) && self.is_valid_status(&tikis, input.limit, text) {
				return tikis;
			}

			retries += 1;
			if retries >= input.retry_limit {
				log::warn!("Retry budget of {} exhausted ({:?}), keeping last attempt", input.retry_limit, mode);
				return tikis;
			}
			log::debug!("Rejected {:?} candidate, retry {}/{}", mode, retries, input.retry_limit);
		}
	}

	/// Whether `tikis` reconstructs to at most `limit` characters with
	/// balanced enclosers.
	fn is_valid_status<T: TextUtilities>(&self, tikis: &[TikiId], limit: usize, text: &T) -> bool {
		let status = text.reconstruct(tikis, &self.tokens);
		status.chars().count() <= limit && !text.has_unmatched_enclosers(&status)
	}
}
