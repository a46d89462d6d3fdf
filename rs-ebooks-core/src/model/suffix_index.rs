use std::collections::HashMap;

use super::token_table::TikiId;

/// A donor location inside a sentence pool.
///
/// # Variants
/// - `EndOfSentence(sentence)`: the matched token(s) end the sentence,
///   there is no suffix to borrow.
/// - `Continuation(sentence, position)`: the suffix starting at `position`
///   follows the matched token(s).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Site {
	EndOfSentence(usize),
	Continuation(usize, usize),
}

impl Site {
	/// Index of the sentence this site belongs to.
	pub fn sentence(&self) -> usize {
		match self {
			Site::EndOfSentence(sentence) | Site::Continuation(sentence, _) => *sentence,
		}
	}
}

/// What precedes a position in a sentence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Anchor {
	SentenceStart,
	Tiki(TikiId),
}

/// Index of splice points over a pool of tokenized sentences.
///
/// Built for one generation call and then dropped. Sentences are borrowed
/// from the pool, duplicates included.
///
/// # Invariants
/// - `sentences` never contains an empty sentence
/// - every `Continuation(i, j)` satisfies `j < sentences[i].len()`
#[derive(Debug, Default)]
pub struct SuffixIndex<'a> {
	sentences: Vec<&'a [TikiId]>,

	/// Sites following an occurrence of a token, whatever precedes it.
	unigrams: HashMap<Anchor, Vec<Site>>,

	/// Sites following an ordered pair of tokens.
	bigrams: HashMap<Anchor, HashMap<TikiId, Vec<Site>>>,
}

impl<'a> SuffixIndex<'a> {
	/// Builds the index over `pool`, skipping empty sentences.
	///
	/// For each position `j` of sentence `i`, with `prev` the anchor before it:
	/// - `unigrams[prev]` gains `Continuation(i, j)`
	/// - `bigrams[prev][t[j]]` gains `Continuation(i, j + 1)`
	/// - on the last position, `unigrams[t[j]]` and `bigrams[prev][t[j]]`
	///   gain `EndOfSentence(i)` instead of pointing past the end
	pub fn build<I, S>(pool: I) -> Self
	where
		I: IntoIterator<Item = &'a S>,
		S: AsRef<[TikiId]> + ?Sized + 'a,
	{
		let sentences: Vec<&'a [TikiId]> = pool
			.into_iter()
			.map(<S as AsRef<[TikiId]>>::as_ref)
			.filter(|sentence| !sentence.is_empty())
			.collect();

		let mut unigrams: HashMap<Anchor, Vec<Site>> = HashMap::new();
		let mut bigrams: HashMap<Anchor, HashMap<TikiId, Vec<Site>>> = HashMap::new();

		for (i, tikis) in sentences.iter().enumerate() {
			let mut prev = Anchor::SentenceStart;
			let last = tikis.len() - 1;

			for (j, &tiki) in tikis.iter().enumerate() {
				unigrams.entry(prev).or_default().push(Site::Continuation(i, j));

				let pair = bigrams.entry(prev).or_default().entry(tiki).or_default();
				if j == last {
					pair.push(Site::EndOfSentence(i));
					unigrams.entry(Anchor::Tiki(tiki)).or_default().push(Site::EndOfSentence(i));
				} else {
					pair.push(Site::Continuation(i, j + 1));
				}

				prev = Anchor::Tiki(tiki);
			}
		}

		Self { sentences, unigrams, bigrams }
	}

	/// Number of indexed (non-empty) sentences.
	pub fn len(&self) -> usize {
		self.sentences.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sentences.is_empty()
	}

	/// Sentence `i` of the indexed pool.
	pub fn sentence(&self, i: usize) -> Option<&'a [TikiId]> {
		self.sentences.get(i).copied()
	}

	/// Sites following any occurrence of `tiki`.
	pub fn unigram_sites(&self, tiki: TikiId) -> &[Site] {
		self.unigrams.get(&Anchor::Tiki(tiki)).map(Vec::as_slice).unwrap_or_default()
	}

	/// Sites following the ordered pair `(first, second)`.
	pub fn bigram_sites(&self, first: TikiId, second: TikiId) -> &[Site] {
		self.bigrams
			.get(&Anchor::Tiki(first))
			.and_then(|next| next.get(&second))
			.map(Vec::as_slice)
			.unwrap_or_default()
	}

	/// Sites following `anchor`, including sentence starts.
	#[cfg(test)]
	fn sites_after(&self, anchor: Anchor) -> &[Site] {
		self.unigrams.get(&anchor).map(Vec::as_slice).unwrap_or_default()
	}
}
