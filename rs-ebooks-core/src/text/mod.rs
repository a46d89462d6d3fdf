//! Text utilities used by the model: sentence splitting, tokenization,
//! reconstruction and the small classifiers the generator relies on.
//!
//! The model only talks to these through the `TextUtilities` trait, so a
//! different language or tokenizer can be plugged in. `EnglishText` is the
//! default implementation.

mod enclosers;
mod entities;
mod keywords;
mod stopwords;

pub use keywords::Keywords;

use crate::model::token_table::{TikiId, TokenTable};

/// Characters considered punctuation by tokenization and reconstruction.
pub const PUNCTUATION: &[char] = &['.', '?', '!', ','];

/// Characters ending a sentence when followed by whitespace.
const SENTENCE_END: &[char] = &['.', '?', '!'];

/// Text processing collaborator of the model.
///
/// # Responsibilities
/// - Turn raw corpus text into sentences and tokens
/// - Turn a tiki sequence back into readable text
/// - Classify tokens (stopwords) and texts (unmatched enclosers)
/// - Rank keywords of a text
pub trait TextUtilities {
	/// Cleans up a raw corpus line before splitting.
	fn normalize(&self, text: &str) -> String;

	/// Splits a text blob into ordered sentences.
	///
	/// Sentence boundaries are not required to match line boundaries.
	fn split_sentences(&self, text: &str) -> Vec<String>;

	/// Splits a sentence into tokens, punctuation as separate tokens.
	fn tokenize(&self, text: &str) -> Vec<String>;

	/// Inverse of `tokenize`: joins the tokens of `tikis` with correct spacing.
	fn reconstruct(&self, tikis: &[TikiId], tokens: &TokenTable) -> String;

	/// Ranks the important terms of `text`.
	fn keywords(&self, text: &str) -> Keywords;

	fn is_stopword(&self, token: &str) -> bool;

	/// Whether `text` contains an unbalanced quote, bracket or emphasis marker.
	fn has_unmatched_enclosers(&self, text: &str) -> bool;

	fn decode_html_entities(&self, text: &str) -> String;
}

/// Default English text utilities.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnglishText;

impl TextUtilities for EnglishText {
	/// Replaces typographic quotes and ellipsis with ASCII, then decodes
	/// HTML entities.
	fn normalize(&self, text: &str) -> String {
		let ascii = text
			.replace(['\u{201c}', '\u{201d}'], "\"")
			.replace(['\u{2018}', '\u{2019}'], "'")
			.replace('\u{2026}', "...");
		entities::decode(&ascii)
	}

	/// Breaks on runs of newlines and after `.`, `?` or `!` followed by
	/// whitespace. Empty pieces are dropped.
	fn split_sentences(&self, text: &str) -> Vec<String> {
		let mut sentences = Vec::new();
		let mut current = String::new();
		let mut previous: Option<char> = None;

		for c in text.chars() {
			let boundary = c == '\n' || (c.is_whitespace() && previous.is_some_and(|p| SENTENCE_END.contains(&p)));
			if boundary {
				push_trimmed(&mut sentences, &current);
				current.clear();
			} else {
				current.push(c);
			}
			previous = Some(c);
		}
		push_trimmed(&mut sentences, &current);

		sentences
	}

	/// Splits on whitespace, then detaches a trailing run of punctuation
	/// from a word: `"hello!?"` -> `["hello", "!?"]`.
	fn tokenize(&self, text: &str) -> Vec<String> {
		let mut tokens = Vec::new();
		for word in text.split_whitespace() {
			let stem = word.trim_end_matches(PUNCTUATION);
			if stem.is_empty() || stem.len() == word.len() {
				tokens.push(word.to_owned());
			} else {
				tokens.push(stem.to_owned());
				tokens.push(word[stem.len()..].to_owned());
			}
		}
		tokens
	}

	fn reconstruct(&self, tikis: &[TikiId], tokens: &TokenTable) -> String {
		let mut text = String::new();
		let mut last_token: Option<&str> = None;

		for token in tikis.iter().filter_map(|tiki| tokens.get(*tiki)) {
			if last_token.is_some() && !is_punctuation(token) {
				text.push(' ');
			}
			text.push_str(token);
			last_token = Some(token);
		}

		text
	}

	fn keywords(&self, text: &str) -> Keywords {
		Keywords::rank(self.tokenize(text).iter().map(String::as_str), |token| self.is_stopword(token))
	}

	fn is_stopword(&self, token: &str) -> bool {
		stopwords::contains(&token.to_lowercase())
	}

	fn has_unmatched_enclosers(&self, text: &str) -> bool {
		enclosers::unmatched(&self.tokenize(text))
	}

	fn decode_html_entities(&self, text: &str) -> String {
		entities::decode(text)
	}
}

/// Whether `token` is made only of punctuation characters.
pub fn is_punctuation(token: &str) -> bool {
	!token.is_empty() && token.chars().all(|c| PUNCTUATION.contains(&c))
}

/// Whether `needle` appears as a contiguous run inside `haystack`.
///
/// An empty needle is contained in every sequence.
pub fn is_contiguous_subsequence<T: PartialEq>(haystack: &[T], needle: &[T]) -> bool {
	if needle.is_empty() {
		return true;
	}
	if needle.len() > haystack.len() {
		return false;
	}
	haystack.windows(needle.len()).any(|window| window == needle)
}

fn push_trimmed(sentences: &mut Vec<String>, sentence: &str) {
	let trimmed = sentence.trim();
	if !trimmed.is_empty() {
		sentences.push(trimmed.to_owned());
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_on_lines_and_terminators() {
		let sentences = EnglishText.split_sentences("Hello there. How are you?\nFine!\n\nok");
		assert_eq!(sentences, vec!["Hello there.", "How are you?", "Fine!", "ok"]);
	}

	#[test]
	fn does_not_split_inside_words() {
		let sentences = EnglishText.split_sentences("version 1.2 is out");
		assert_eq!(sentences, vec!["version 1.2 is out"]);
	}

	#[test]
	fn tokenizes_trailing_punctuation() {
		let tokens = EnglishText.tokenize("hello, world!? 1.5 ...");
		assert_eq!(tokens, vec!["hello", ",", "world", "!?", "1.5", "..."]);
	}

	#[test]
	fn reconstruct_spacing() {
		let mut table = TokenTable::new();
		let tikis: Vec<TikiId> = ["hello", ",", "world", "!"].iter().map(|t| table.intern(t)).collect();
		assert_eq!(EnglishText.reconstruct(&tikis, &table), "hello, world!");
	}

	#[test]
	fn normalizes_typography() {
		assert_eq!(EnglishText.normalize("\u{201c}it\u{2019}s\u{201d}\u{2026} &amp;"), "\"it's\"... &");
	}

	#[test]
	fn contiguous_subsequence() {
		assert!(is_contiguous_subsequence(&[1, 2, 3, 4], &[2, 3]));
		assert!(!is_contiguous_subsequence(&[1, 2, 3, 4], &[2, 4]));
		assert!(!is_contiguous_subsequence(&[1, 2], &[1, 2, 3]));
		assert!(is_contiguous_subsequence(&[1, 2], &[1, 2]));
	}

	#[test]
	fn stopwords_are_case_insensitive() {
		assert!(EnglishText.is_stopword("The"));
		assert!(!EnglishText.is_stopword("hi"));
	}
}
