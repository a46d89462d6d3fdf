use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::text::is_contiguous_subsequence;
use super::generation_input::GramMode;
use super::suffix_index::{Site, SuffixIndex};
use super::token_table::TikiId;

/// Splice candidates for one crossover position.
///
/// `position` is the index `k` of the pair `(t[k], t[k + 1])` in the current
/// sequence; each alternative is a `(sentence, suffix_start)` donor.
struct VariationSite {
	position: usize,
	alternatives: Vec<(usize, usize)>,
}

/// Recombination engine over a `SuffixIndex`.
///
/// Starting from a random sentence of the pool, each pass replaces the tail
/// of the current sequence with the tail of another sentence sharing the
/// token (or token pair) at the splice point.
///
/// # Responsibilities
/// - Pick a seed sentence uniformly at random
/// - Find the splice points of the current sequence
/// - Reject splices rebuilding (or swallowing) a borrowed sentence
///
/// Selection is uniform among valid splice points, there is no frequency
/// weighting.
#[derive(Debug)]
pub struct Generator<'i, 'a> {
	index: &'i SuffixIndex<'a>,
}

impl<'i, 'a> Generator<'i, 'a> {
	pub fn new(index: &'i SuffixIndex<'a>) -> Self {
		Self { index }
	}

	/// Generates a recombined tiki sequence.
	///
	/// # Parameters
	/// - `passes`: maximum number of splices.
	/// - `mode`: `Unigram` (loose) or `Bigram` (conservative) matching.
	/// - `rng`: random source, seeded by tests for determinism.
	///
	/// # Returns
	/// The final sequence. With `passes == 0` this is the seed sentence.
	/// An empty index yields an empty sequence.
	///
	/// # Behavior
	/// - Stops early when no position has an alternative.
	/// - Stops early when every alternative fails the verbatim check, later
	///   passes would see the same candidates.
	pub fn generate<R: Rng + ?Sized>(&self, passes: usize, mode: GramMode, rng: &mut R) -> Vec<TikiId> {
		if self.index.is_empty() {
			return Vec::new();
		}

		let seed = rng.random_range(0..self.index.len());
		let Some(seed_sentence) = self.index.sentence(seed) else {
			return Vec::new();
		};

		let mut tikis = seed_sentence.to_vec();
		let mut used: HashSet<usize> = HashSet::from([seed]);
		let mut verbatim: Vec<&[TikiId]> = vec![seed_sentence];

		for _ in 0..passes {
			let sites = self.variation_sites(&tikis, mode, &used);
			if sites.is_empty() {
				break;
			}

			match self.make_variant(&tikis, sites, &mut verbatim, rng) {
				Some((variant, donor)) => {
					used.insert(donor);
					tikis = variant;
				}
				None => break,
			}
		}

		tikis
	}

	/// Collects, per adjacent pair of `tikis`, the donor suffixes of unused
	/// sentences. Sentence endings are not candidates.
	fn variation_sites(&self, tikis: &[TikiId], mode: GramMode, used: &HashSet<usize>) -> Vec<VariationSite> {
		tikis
			.windows(2)
			.enumerate()
			.filter_map(|(position, pair)| {
				let sites = match mode {
					GramMode::Unigram => self.index.unigram_sites(pair[1]),
					GramMode::Bigram => self.index.bigram_sites(pair[0], pair[1]),
				};

				let alternatives: Vec<(usize, usize)> = sites
					.iter()
					.filter_map(|site| match site {
						Site::Continuation(sentence, start) if !used.contains(sentence) => Some((*sentence, *start)),
						_ => None,
					})
					.collect();

				(!alternatives.is_empty()).then_some(VariationSite { position, alternatives })
			})
			.collect()
	}

	/// Tries the splice candidates in random order and returns the first
	/// acceptable variant along with its donor sentence.
	///
	/// A variant is rejected when it is a contiguous run of a borrowed
	/// sentence or of the donor, or contains one of them.
	fn make_variant<R: Rng + ?Sized>(
		&self,
		tikis: &[TikiId],
		mut sites: Vec<VariationSite>,
		verbatim: &mut Vec<&'a [TikiId]>,
		rng: &mut R,
	) -> Option<(Vec<TikiId>, usize)> {
		sites.shuffle(rng);

		for mut site in sites {
			site.alternatives.shuffle(rng);

			for (sentence, start) in site.alternatives {
				let Some(donor) = self.index.sentence(sentence) else {
					continue;
				};

				let mut potential = tikis[..=site.position + 1].to_vec();
				potential.extend_from_slice(&donor[start..]);

				let rebuilds = verbatim
					.iter()
					.chain(std::iter::once(&donor))
					.any(|&v| is_contiguous_subsequence(v, &potential[..]) || is_contiguous_subsequence(&potential[..], v));
				if rebuilds {
					continue;
				}

				verbatim.push(donor);
				return Some((potential, sentence));
			}
		}

		None
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn zero_passes_returns_seed() {
		let pool: Vec<Vec<TikiId>> = vec![vec![1, 2, 3], vec![4, 2, 5, 6]];
		let index = SuffixIndex::build(&pool);
		let generator = Generator::new(&index);
		let mut rng = StdRng::seed_from_u64(7);

		for _ in 0..20 {
			let tikis = generator.generate(0, GramMode::Bigram, &mut rng);
			assert!(pool.contains(&tikis));
		}
	}

	#[test]
	fn empty_index_yields_nothing() {
		let pool: Vec<Vec<TikiId>> = vec![vec![]];
		let index = SuffixIndex::build(&pool);
		let mut rng = StdRng::seed_from_u64(1);

		assert!(Generator::new(&index).generate(3, GramMode::Unigram, &mut rng).is_empty());
	}

	#[test]
	fn single_sentence_cannot_change() {
		let pool: Vec<Vec<TikiId>> = vec![vec![1, 2, 3, 4]];
		let index = SuffixIndex::build(&pool);
		let mut rng = StdRng::seed_from_u64(3);

		assert_eq!(Generator::new(&index).generate(5, GramMode::Unigram, &mut rng), vec![1, 2, 3, 4]);
	}

	#[test]
	fn unigram_splice_crosses_sentences() {
		// Both sentences share token 2 at different places
		let pool: Vec<Vec<TikiId>> = vec![vec![1, 2, 3, 4], vec![5, 6, 2, 7, 8]];
		let index = SuffixIndex::build(&pool);
		let generator = Generator::new(&index);
		let mut rng = StdRng::seed_from_u64(11);

		for _ in 0..20 {
			let tikis = generator.generate(1, GramMode::Unigram, &mut rng);
			let spliced = [vec![1, 2, 7, 8], vec![5, 6, 2, 3, 4]];
			assert!(spliced.contains(&tikis), "unexpected sequence {tikis:?}");
		}
	}

	#[test]
	fn bigram_splice_requires_pair() {
		let pool: Vec<Vec<TikiId>> = vec![vec![1, 2, 3, 4], vec![9, 2, 3, 5, 6], vec![7, 2, 8]];
		let index = SuffixIndex::build(&pool);
		let generator = Generator::new(&index);
		let mut rng = StdRng::seed_from_u64(5);

		for _ in 0..30 {
			let tikis = generator.generate(1, GramMode::Bigram, &mut rng);
			let allowed = [vec![1, 2, 3, 5, 6], vec![9, 2, 3, 4], vec![7, 2, 8]];
			assert!(allowed.contains(&tikis), "unexpected sequence {tikis:?}");
		}
	}

	#[test]
	fn rejects_rebuilding_a_sentence() {
		// Splicing the duplicate would only rebuild the seed
		let pool: Vec<Vec<TikiId>> = vec![vec![1, 2, 3], vec![1, 2, 3]];
		let index = SuffixIndex::build(&pool);
		let mut rng = StdRng::seed_from_u64(9);

		for _ in 0..10 {
			assert_eq!(Generator::new(&index).generate(3, GramMode::Unigram, &mut rng), vec![1, 2, 3]);
		}
	}
}
