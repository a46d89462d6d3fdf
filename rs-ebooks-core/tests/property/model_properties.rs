use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_ebooks_core::{CorpusModel, GramMode, Generator, RawCorpus, Site, SuffixIndex, TikiId, TokenTable};

fn line() -> impl Strategy<Value = String> {
	prop::collection::vec("(@?[a-z]{1,6}[.!?,]?|http[a-z:/.]{0,8})", 0..8).prop_map(|words| words.join(" "))
}

fn raw_corpus() -> impl Strategy<Value = RawCorpus> {
	(
		prop::option::of(prop::collection::vec(line(), 0..12)),
		prop::option::of(prop::collection::vec(line(), 0..12)),
	)
		.prop_filter("needs statuses or mentions", |(s, m)| s.is_some() || m.is_some())
		.prop_map(|(statuses, mentions)| RawCorpus { statuses, mentions })
}

// ── Consumed models never store empty sentences ───────────────────────────

proptest! {
	#[test]
	fn consumed_sentences_are_never_empty(corpus in raw_corpus()) {
		let model = CorpusModel::consume(&corpus).unwrap();
		prop_assert!(model.sentences().iter().all(|s| !s.is_empty()));
		prop_assert!(model.mentions().iter().all(|s| !s.is_empty()));
		for sentence in model.sentences().iter().chain(model.mentions()) {
			for tiki in sentence {
				let token = model.tokens().get(*tiki).unwrap();
				prop_assert!(!token.contains('@') && !token.contains("http"));
			}
		}
	}
}

// ── Serialization preserves the model ─────────────────────────────────────

proptest! {
	#[test]
	fn serialize_round_trip(corpus in raw_corpus()) {
		let model = CorpusModel::consume(&corpus).unwrap();
		let loaded = CorpusModel::deserialize(&model.serialize().unwrap()).unwrap();
		prop_assert_eq!(loaded, model);
	}
}

// ── Interning is idempotent ───────────────────────────────────────────────

proptest! {
	#[test]
	fn intern_twice_same_id(tokens in prop::collection::vec("[a-z]{0,4}", 1..30)) {
		let mut table = TokenTable::new();
		for token in &tokens {
			let first = table.intern(token);
			let len = table.len();
			prop_assert_eq!(table.intern(token), first);
			prop_assert_eq!(table.len(), len);
			prop_assert_eq!(table.get(first), Some(token.as_str()));
		}
	}
}

// ── Index sites stay inside non-empty sentences ───────────────────────────

proptest! {
	#[test]
	fn index_sites_are_in_bounds(pool in prop::collection::vec(prop::collection::vec(0usize..6, 0..6), 0..10)) {
		let index = SuffixIndex::build(&pool);
		for i in 0..index.len() {
			prop_assert!(!index.sentence(i).unwrap().is_empty());
		}

		let tikis: Vec<TikiId> = (0..6).collect();
		for &a in &tikis {
			let pairs = tikis.iter().flat_map(|&b| index.bigram_sites(a, b).iter());
			for site in index.unigram_sites(a).iter().chain(pairs) {
				match site {
					Site::Continuation(i, j) => prop_assert!(*j < index.sentence(*i).unwrap().len()),
					Site::EndOfSentence(i) => prop_assert!(*i < index.len()),
				}
			}
		}
	}
}

// ── Zero passes return the seed sentence ──────────────────────────────────

proptest! {
	#[test]
	fn zero_passes_keep_seed(
		pool in prop::collection::vec(prop::collection::vec(0usize..5, 1..6), 1..8),
		seed in any::<u64>()
	) {
		let index = SuffixIndex::build(&pool);
		let mut rng = StdRng::seed_from_u64(seed);
		let tikis = Generator::new(&index).generate(0, GramMode::Bigram, &mut rng);
		prop_assert!(pool.contains(&tikis));
	}
}

// ── Recombined sequences are built from pool tokens ───────────────────────

proptest! {
	#[test]
	fn generated_tokens_come_from_pool(
		pool in prop::collection::vec(prop::collection::vec(0usize..5, 1..6), 1..8),
		seed in any::<u64>()
	) {
		let index = SuffixIndex::build(&pool);
		let mut rng = StdRng::seed_from_u64(seed);
		let tikis = Generator::new(&index).generate(3, GramMode::Unigram, &mut rng);
		prop_assert!(!tikis.is_empty());
		prop_assert!(tikis.iter().all(|t| pool.iter().any(|s| s.contains(t))));
	}
}
